//! API layer - HTTP endpoints

pub mod dashboard;
pub mod health;
pub mod playground;
pub mod router;
pub mod state;
pub mod types;
pub mod validate;

pub use router::create_router;
pub use state::AppState;
