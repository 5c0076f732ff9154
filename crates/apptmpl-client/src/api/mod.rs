//! API endpoint implementations.

pub(crate) mod auth;
mod errors;
mod system;

pub use auth::AuthApi;
pub use errors::ErrorsApi;
pub use system::SystemApi;
