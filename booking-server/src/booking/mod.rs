//! Booking domain: availability resolution, table combination selection,
//! pre-order pricing and the reservation lifecycle.
//!
//! The split mirrors how a booking flows through the system:
//! 1. [`availability`] answers "which tables are free for this window?"
//! 2. [`combinations`] answers "which sets of free tables seat this party?"
//! 3. [`preorder`] prices the optional pre-ordered dishes.
//! 4. [`manager`] ties it together and owns the reservation lifecycle.

pub mod availability;
pub mod combinations;
pub mod manager;
pub mod preorder;

pub use availability::Availability;
pub use combinations::{SelectionStrategy, TableCombinations};
pub use manager::{BookingError, BookingManager, BookingPolicy, BookingResult};
