// hackmate/src/lib.rs
pub mod api;
pub mod config;
pub mod models;
pub mod session;
pub mod utils;
pub mod views;

pub use api::HackmateApi;
pub use config::Config;
pub use models::ClientError;
pub use session::SessionStore;
