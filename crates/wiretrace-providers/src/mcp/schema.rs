use serde::Deserialize;
use serde_json::Value;

use crate::lenient::lenient;

/// `params` of a `tools/call` request
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ToolCallParams {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// `result` of a `tools/list` response
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ToolsListResult {
    #[serde(default, deserialize_with = "lenient")]
    pub tools: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ToolDescriptor {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

impl ToolCallParams {
    pub fn from_params(params: &Value) -> Self {
        serde_json::from_value(params.clone()).unwrap_or_default()
    }
}

impl ToolsListResult {
    pub fn from_result(result: &Value) -> Self {
        serde_json::from_value(result.clone()).unwrap_or_default()
    }

    /// Tool names in listing order, first occurrence wins
    pub fn tool_names(&self) -> Option<Vec<String>> {
        let tools = self.tools.as_ref()?;
        let mut names: Vec<String> = Vec::with_capacity(tools.len());
        for tool in tools {
            let Ok(descriptor) = serde_json::from_value::<ToolDescriptor>(tool.clone()) else {
                continue;
            };
            if let Some(name) = descriptor.name
                && !names.contains(&name)
            {
                names.push(name);
            }
        }
        Some(names)
    }
}
