use serde::{Deserialize, Serialize};

/// Character cutoffs applied when shortening text for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewLimits {
    /// Request/response text in list previews
    pub message_cutoff: usize,
    /// Canonical JSON-RPC params in MCP previews
    pub params_cutoff: usize,
    /// Canonical tool arguments in `ToolInfo::Invocation::arguments_summary`
    pub arguments_cutoff: usize,
}

impl Default for PreviewLimits {
    fn default() -> Self {
        Self {
            message_cutoff: 80,
            params_cutoff: 50,
            arguments_cutoff: 100,
        }
    }
}
