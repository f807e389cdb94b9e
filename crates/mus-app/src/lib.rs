pub mod controller;
pub mod discard;

pub use controller::{ManualSession, SessionError};
pub use discard::{DiscardInputError, parse_discard};
