//! REST API server for the Jobly job board.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use state::AppState;
