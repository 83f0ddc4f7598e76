//! Database model definitions

mod booking;
mod room;

pub use booking::*;
pub use room::*;
