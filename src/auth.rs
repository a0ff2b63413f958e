//! Certificate authentication: bearer token storage, signer capability, and the two-step
//! challenge/exchange session.

pub mod session;
pub mod signer;
pub mod token;

pub use session::*;
pub use signer::*;
pub use token::*;
