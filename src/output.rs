//! Output formatting for the non-interactive commands.
//!
//! CHANGELOG:
//! - 10/18/2026 - Trimmed to json/compact switches

use serde::Serialize;
use serde_json::json;
use std::io::{self, Write};

/// Output control settings from CLI flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputControls {
    pub json: bool,
    pub compact: bool,
}

impl OutputControls {
    /// Render data as JSON according to the controls.
    pub fn emit<T: Serialize>(&self, data: &T) -> String {
        let rendered = if self.compact {
            serde_json::to_string(data)
        } else {
            serde_json::to_string_pretty(data)
        };
        rendered.unwrap_or_else(|e| format_error(&e.to_string()))
    }

    /// Write JSON output followed by a newline.
    pub fn write<T: Serialize, W: Write>(&self, out: &mut W, data: &T) -> io::Result<()> {
        writeln!(out, "{}", self.emit(data))
    }
}

/// Format error as JSON.
pub fn format_error(error: &str) -> String {
    json!({
        "error": error,
        "success": false
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_has_no_whitespace() {
        let controls = OutputControls {
            json: true,
            compact: true,
        };
        assert_eq!(controls.emit(&json!({"a": [1, 2]})), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn test_pretty_by_default() {
        let controls = OutputControls {
            json: true,
            compact: false,
        };
        assert!(controls.emit(&json!({"a": 1})).contains('\n'));
    }

    #[test]
    fn test_format_error() {
        let value: serde_json::Value = serde_json::from_str(&format_error("boom")).unwrap();
        assert_eq!(value["error"], "boom");
        assert_eq!(value["success"], false);
    }
}
