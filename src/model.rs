//! Data contracts exchanged with the API.

pub mod codes;
pub mod document;
pub mod submission;

pub use codes::*;
pub use document::*;
pub use submission::*;
