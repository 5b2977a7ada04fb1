pub mod auth;
pub mod failure;
pub mod plans;

pub use auth::*;
pub use failure::*;
pub use plans::*;
