//! # Domain Module
//!
//! All scheduling logic that does not depend on how the calendar is drawn.
//!
//! ## Module Organization
//!
//! - **appointment_store**: date-keyed, insertion-ordered appointment records
//! - **filter**: doctor/patient narrowing shared by both projections
//! - **calendar**: month grid generation and calendar date arithmetic
//! - **day_list**: single-day projection for the mobile view
//! - **appointment_form**: modal form draft and presence validation
//! - **selection**: Idle/Viewing/Editing state machine owning the store
//! - **session**: persisted authentication and dark-mode flags
//! - **scheduler**: facade adding simulated latency around the above
//!
//! ## Rules
//!
//! - Store reads never fail; an unknown date reads as an empty day
//! - Removing an out-of-range index changes nothing
//! - Ordering within a day is insertion order, never by time
//! - Add and remove always target the date whose modal is open

pub mod appointment_form;
pub mod appointment_store;
pub mod calendar;
pub mod day_list;
pub mod filter;
pub mod scheduler;
pub mod selection;
pub mod session;

pub use appointment_form::*;
pub use appointment_store::*;
pub use calendar::*;
pub use day_list::*;
pub use filter::*;
pub use scheduler::*;
pub use selection::*;
pub use session::*;
