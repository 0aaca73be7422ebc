pub mod allowlist;
pub mod assign;
pub mod cache;
pub mod color;
pub mod error;
pub mod platform;

pub use error::{RankError, Result};
