//! Injected time source
//!
//! All timestamp reads in the engine go through [`Clock`] so the past-date
//! validation rule can be pinned in tests.

use chrono::{NaiveDateTime, Utc};

/// A source of the current wall-clock time
#[derive(Clone, Copy, Debug)]
pub enum Clock {
	/// Read the system clock (UTC, naive)
	System,
	/// Always report a fixed instant
	Fixed(NaiveDateTime),
}

impl Clock {
	/// The current time according to this clock
	#[must_use]
	pub fn now(&self) -> NaiveDateTime {
		match self {
			Self::System => Utc::now().naive_utc(),
			Self::Fixed(at) => *at,
		}
	}
}
