pub mod config;
pub mod error;
pub mod observability;
pub mod relay;
pub mod routes;

pub use config::Config;
pub use relay::InquiryRelay;
pub use routes::AppState;
