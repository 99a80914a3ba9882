mod llm;
mod mcp;

pub use llm::*;
pub use mcp::*;

use serde::{Deserialize, Serialize};

use crate::Protocol;

/// One captured request/response interaction, tagged by protocol
///
/// Every field below the tag is optional on the wire: a recorder may write an
/// exchange before its response arrives, or lose parts of it entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "protocol", rename_all = "snake_case")]
pub enum RawExchange {
    Llm(LlmExchange),
    Mcp(McpExchange),
}

impl RawExchange {
    pub fn protocol(&self) -> Protocol {
        match self {
            RawExchange::Llm(_) => Protocol::Llm,
            RawExchange::Mcp(_) => Protocol::Mcp,
        }
    }

    /// Identifier used by listings; MCP exchanges fall back to their session
    pub fn id(&self) -> Option<&str> {
        match self {
            RawExchange::Llm(exchange) => exchange.id.as_deref(),
            RawExchange::Mcp(exchange) => exchange
                .id
                .as_deref()
                .or(exchange.session_id.as_deref()),
        }
    }

    pub fn timestamp(&self) -> Option<&str> {
        match self {
            RawExchange::Llm(exchange) => exchange.timestamp.as_deref(),
            RawExchange::Mcp(exchange) => exchange.timestamp.as_deref(),
        }
    }
}

impl From<LlmExchange> for RawExchange {
    fn from(exchange: LlmExchange) -> Self {
        RawExchange::Llm(exchange)
    }
}

impl From<McpExchange> for RawExchange {
    fn from(exchange: McpExchange) -> Self {
        RawExchange::Mcp(exchange)
    }
}
