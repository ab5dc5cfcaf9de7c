//! Core types for ratiba.
//!
//! - `schedule`: the `Schedule` record and its draft/patch payloads
//! - `store`: the remote store seam (`ScheduleStore`) and its implementations
//! - `app`: the application root that owns the in-memory collection
//! - `form` / `item`: the edit form and per-item display state

pub mod app;
pub mod config;
pub mod error;
pub mod form;
pub mod item;
pub mod partition;
pub mod schedule;
pub mod store;

pub use app::{App, Theme};
pub use error::{RatibaError, RatibaResult};
pub use partition::{Partition, Tab};
pub use schedule::{Schedule, ScheduleDraft, ScheduleId, SchedulePatch};
