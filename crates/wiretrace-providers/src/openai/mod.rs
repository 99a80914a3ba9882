pub mod io;
pub mod normalize;
pub(crate) mod schema;

pub use self::io::{load_llm_dir, parse_llm_record};
pub use self::normalize::{
    LlmNormalizer, last_message_content, normalize_llm_exchange, response_text,
};
