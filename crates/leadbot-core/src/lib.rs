pub mod config;
pub mod error;
pub mod types;

pub use config::LeadbotConfig;
pub use error::{LeadbotError, Result};
pub use types::*;
