pub mod error;
pub mod exchange;
pub mod limits;
pub mod protocol;
pub mod view;
mod util;

pub use error::{Error, Result};
pub use exchange::*;
pub use limits::PreviewLimits;
pub use protocol::Protocol;
pub use util::*;
pub use view::*;
