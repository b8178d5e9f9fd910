pub mod api;
pub mod command;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used items
pub use error::{ClientError, ClientResult};
pub use services::activity_service::{ActivityClient, MutationOutcome};
