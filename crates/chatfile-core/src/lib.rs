pub mod config;
pub mod error;
pub mod logging;

pub mod attachment;
pub mod filename;
pub mod guard;
pub mod locator;

pub use error::{Error, Result};
pub use url;
