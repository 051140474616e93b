//! Request handlers.

pub mod health;
pub mod jobs;
pub mod personas;

pub use health::*;
pub use jobs::*;
pub use personas::*;
