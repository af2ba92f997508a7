//! # Scheduler Backend
//!
//! Non-presentational logic for the clinic appointment calendar.
//!
//! ## Architecture
//!
//! ```text
//! Renderers (month grid, day list, modal, login screen)
//!     ↓
//! Domain Layer (store, filters, projections, selection, session)
//!     ↓
//! Storage Layer (persisted session flags)
//! ```
//!
//! Renderers receive `shared` types (`MonthGrid`, `DayList`) and send back
//! date keys and form input. Appointments live only in memory.

pub mod config;
pub mod domain;
pub mod storage;

pub use config::SchedulerConfig;
pub use domain::*;
pub use storage::*;
