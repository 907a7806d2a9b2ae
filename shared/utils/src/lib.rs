pub mod config;
pub mod logging;
pub mod error;

pub use self::config::*;
pub use logging::*;
pub use error::*;
