// Streamed response decoding
pub mod sse;

// Protocol adapters
pub mod mcp;
pub mod openai;

// Model classification
pub mod models;
pub mod traits;

// Recorder file discovery and lenient field helpers
pub(crate) mod discovery;
pub(crate) mod lenient;

pub use models::PrefixModelClassifier;
pub use sse::{DecodedStream, decode_stream};
pub use traits::{ModelClass, ModelClassifier};

// Normalizers
pub use mcp::{McpNormalizer, normalize_mcp_exchange};
pub use openai::{LlmNormalizer, last_message_content, normalize_llm_exchange, response_text};

// Recorder readers
pub use mcp::io::{SessionLogEntry, load_mcp_dir, pair_session_entries, parse_session_log};
pub use openai::io::{load_llm_dir, parse_llm_record};
