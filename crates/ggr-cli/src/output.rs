//! Output formatting for ggr-cli

use colored::Colorize;
use ggr_client::GatewayError;
use serde_json::Value;

/// Context for output rendering
pub struct OutputContext {
    pub compact: bool,
    pub quiet: bool,
}

impl OutputContext {
    pub fn new(compact: bool, no_color: bool, quiet: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { compact, quiet }
    }

    /// Render a JSON value in the configured layout
    pub fn render(&self, value: &Value) -> String {
        let rendered = if self.compact {
            serde_json::to_string(value)
        } else {
            serde_json::to_string_pretty(value)
        };
        rendered.unwrap_or_else(|_| value.to_string())
    }

    /// Print a vendor response (unless in quiet mode)
    pub fn print_value(&self, value: &Value) {
        if !self.quiet {
            println!("{}", self.render(value));
        }
    }

    /// Print a gateway error in the `{"error": ...}` shape
    pub fn error(&self, err: &GatewayError) {
        eprintln!("{}", self.render(&err.to_value()).red());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compact_render() {
        let ctx = OutputContext::new(true, true, false);
        assert_eq!(ctx.render(&json!({ "status": 1 })), r#"{"status":1}"#);
    }

    #[test]
    fn test_pretty_render() {
        let ctx = OutputContext::new(false, true, false);
        assert_eq!(
            ctx.render(&json!({ "status": 1 })),
            "{\n  \"status\": 1\n}"
        );
    }

    #[test]
    fn test_error_render() {
        let ctx = OutputContext::new(true, true, false);
        assert_eq!(
            ctx.render(&GatewayError::Decode.to_value()),
            r#"{"error":"Invalid JSON response"}"#
        );
    }
}
