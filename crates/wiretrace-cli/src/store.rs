use anyhow::{Context, Result};
use wiretrace_providers::{load_llm_dir, load_mcp_dir};
use wiretrace_types::{Protocol, RawExchange};

use crate::config::Config;

/// Captured exchanges on disk, as located by the config
pub struct ExchangeStore<'a> {
    config: &'a Config,
}

impl<'a> ExchangeStore<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Load every exchange, optionally restricted to one protocol
    pub fn load(&self, protocol: Option<Protocol>) -> Result<Vec<RawExchange>> {
        let mut exchanges = Vec::new();

        if protocol.is_none_or(|p| p == Protocol::Llm) {
            let dir = &self.config.llm_log_dir;
            let llm = load_llm_dir(dir)
                .with_context(|| format!("Failed to read LLM logs in {}", dir.display()))?;
            exchanges.extend(llm.into_iter().map(RawExchange::from));
        }

        if protocol.is_none_or(|p| p == Protocol::Mcp) {
            let dir = &self.config.mcp_log_dir;
            let mcp = load_mcp_dir(dir)
                .with_context(|| format!("Failed to read MCP logs in {}", dir.display()))?;
            exchanges.extend(mcp.into_iter().map(RawExchange::from));
        }

        Ok(exchanges)
    }

    /// Find one exchange by the id shown in listings
    pub fn find(&self, protocol: Protocol, id: &str) -> Result<Option<RawExchange>> {
        Ok(self
            .load(Some(protocol))?
            .into_iter()
            .find(|raw| raw.id() == Some(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(temp: &TempDir) -> Config {
        Config {
            llm_log_dir: temp.path().join("llm"),
            mcp_log_dir: temp.path().join("mcp"),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_dirs() -> Result<()> {
        let temp = TempDir::new()?;
        let config = config_in(&temp);
        let store = ExchangeStore::new(&config);
        assert!(store.load(None)?.is_empty());
        assert!(store.find(Protocol::Llm, "x")?.is_none());
        Ok(())
    }

    #[test]
    fn test_filter_and_find() -> Result<()> {
        let temp = TempDir::new()?;
        let config = config_in(&temp);
        std::fs::create_dir_all(&config.llm_log_dir)?;
        std::fs::create_dir_all(&config.mcp_log_dir)?;
        std::fs::write(config.llm_log_dir.join("a.json"), r#"{"id": "a", "method": "POST"}"#)?;
        std::fs::write(
            config.mcp_log_dir.join("s.jsonl"),
            r#"{"session_id": "s", "direction": "request", "message": {"method": "ping"}}"#,
        )?;

        let store = ExchangeStore::new(&config);
        assert_eq!(store.load(None)?.len(), 2);
        assert_eq!(store.load(Some(Protocol::Mcp))?.len(), 1);
        assert!(store.find(Protocol::Llm, "a")?.is_some());
        assert!(store.find(Protocol::Mcp, "a")?.is_none());
        assert!(store.find(Protocol::Mcp, "s_0")?.is_some());
        Ok(())
    }
}
