pub mod message;
pub mod error;

pub use message::*;
pub use error::*;
