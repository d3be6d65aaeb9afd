pub mod blocks;
pub mod catalog;
pub mod config;
pub mod cursor;
pub mod error;
pub mod filter;
pub mod io;
pub mod loader;
pub mod local;
pub mod location;
pub mod memory;
pub mod paths;
pub mod source;
pub mod types;

pub use error::{FolioError, Result};
