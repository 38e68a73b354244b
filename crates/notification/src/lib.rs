mod config;
mod dead_letter;
mod error;
mod retry;
mod service;

pub use config::*;
pub use dead_letter::*;
pub use error::*;
pub use retry::*;
pub use service::*;
