use tracing::warn;
use wiretrace_providers::{LlmNormalizer, McpNormalizer};
use wiretrace_types::{
    Error, NormalizeOutcome, ParsedView, PreviewLimits, Protocol, RawExchange, Result,
};

/// Routes a raw exchange to the normalizer for its protocol
///
/// Holds no mutable state; one dispatcher may serve concurrent callers.
#[derive(Default)]
pub struct Dispatcher {
    llm: LlmNormalizer,
    mcp: McpNormalizer,
}

impl Dispatcher {
    pub fn new(llm: LlmNormalizer, mcp: McpNormalizer) -> Self {
        Self { llm, mcp }
    }

    pub fn with_limits(limits: PreviewLimits) -> Self {
        Self::new(LlmNormalizer::default(), McpNormalizer::with_limits(limits))
    }

    /// Normalize `raw` under the protocol named by `tag`
    ///
    /// Unknown tags fail with [`Error::UnsupportedProtocol`]; a known tag that
    /// disagrees with the exchange fails with [`Error::ProtocolMismatch`].
    pub fn dispatch(&self, tag: &str, raw: &RawExchange) -> Result<ParsedView> {
        let protocol: Protocol = tag.parse().inspect_err(|_| {
            warn!(tag, "unsupported protocol tag");
        })?;

        if protocol != raw.protocol() {
            return Err(Error::ProtocolMismatch {
                expected: protocol.to_string(),
                found: raw.protocol().to_string(),
            });
        }

        self.normalize(raw)
    }

    /// Normalize `raw` under its own protocol
    pub fn normalize(&self, raw: &RawExchange) -> Result<ParsedView> {
        match raw {
            RawExchange::Llm(exchange) => self.llm.normalize(exchange).map(ParsedView::from),
            RawExchange::Mcp(exchange) => Ok(self.mcp.normalize(exchange).into()),
        }
    }

    /// [`Dispatcher::dispatch`] with the error folded into a displayable value
    pub fn outcome(&self, tag: &str, raw: &RawExchange) -> NormalizeOutcome {
        self.dispatch(tag, raw).into()
    }
}
