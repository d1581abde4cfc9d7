//! Tellerbot Common Types
//!
//! Shared types used by the Tellerbot calculators: currency codes and pairs,
//! display rounding, and the follow-up prompt both calculators emit when a
//! query is missing information.

pub mod monetary;
pub mod prompt;

pub use monetary::*;
pub use prompt::*;
