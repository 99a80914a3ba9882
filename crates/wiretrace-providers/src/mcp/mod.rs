pub mod io;
pub mod normalize;
pub(crate) mod schema;

pub use self::io::{SessionLogEntry, load_mcp_dir, pair_session_entries, parse_session_log};
pub use self::normalize::{McpNormalizer, normalize_mcp_exchange};
