//! Request and response schemas for the HTTP surface

pub mod booking;
pub mod room;
