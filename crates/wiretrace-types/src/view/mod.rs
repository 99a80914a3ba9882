mod llm;
mod mcp;
mod reported;

pub use llm::*;
pub use mcp::*;
pub use reported::Reported;

use serde::Serialize;

use crate::Protocol;

/// Normalized, optional-field-safe projection of one exchange
///
/// Built fresh on every normalization call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParsedView {
    Llm(Box<LlmView>),
    Mcp(McpView),
}

impl ParsedView {
    pub fn protocol(&self) -> Protocol {
        match self {
            ParsedView::Llm(_) => Protocol::Llm,
            ParsedView::Mcp(_) => Protocol::Mcp,
        }
    }

    pub fn as_llm(&self) -> Option<&LlmView> {
        match self {
            ParsedView::Llm(view) => Some(view),
            ParsedView::Mcp(_) => None,
        }
    }

    pub fn as_mcp(&self) -> Option<&McpView> {
        match self {
            ParsedView::Mcp(view) => Some(view),
            ParsedView::Llm(_) => None,
        }
    }
}

impl From<LlmView> for ParsedView {
    fn from(view: LlmView) -> Self {
        ParsedView::Llm(Box::new(view))
    }
}

impl From<McpView> for ParsedView {
    fn from(view: McpView) -> Self {
        ParsedView::Mcp(view)
    }
}

/// Value handed to the caller/renderer: a view, or a displayable error
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NormalizeOutcome {
    View(ParsedView),
    Error { error: String, code: String },
}

impl From<crate::Result<ParsedView>> for NormalizeOutcome {
    fn from(result: crate::Result<ParsedView>) -> Self {
        match result {
            Ok(view) => NormalizeOutcome::View(view),
            Err(err) => NormalizeOutcome::Error {
                error: err.to_string(),
                code: err.code().to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use serde_json::json;

    #[test]
    fn test_error_outcome_shape() {
        let outcome = NormalizeOutcome::from(Err::<ParsedView, _>(Error::UnsupportedProtocol(
            "grpc".to_string(),
        )));
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"error": "Unsupported protocol: grpc", "code": "unsupported_protocol"})
        );
    }
}
