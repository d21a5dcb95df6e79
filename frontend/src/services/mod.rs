//! Client-side services: the HTTP API client, the gateway seam the dashboard
//! state talks through, and session token storage for the CLI.

pub mod api;
pub mod error;
pub mod gateway;
pub mod session;

pub use api::ApiClient;
pub use error::ClientError;
pub use gateway::HabitGateway;
