use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Protocols the inspector knows how to normalize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    /// Chat-completion HTTP API, optionally streamed over SSE
    Llm,
    /// MCP JSON-RPC session
    Mcp,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Llm => "llm",
            Protocol::Mcp => "mcp",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "llm" => Ok(Protocol::Llm),
            "mcp" => Ok(Protocol::Mcp),
            _ => Err(Error::UnsupportedProtocol(tag.to_string())),
        }
    }
}
