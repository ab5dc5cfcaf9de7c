//! The remote store seam.
//!
//! Everything durable lives behind `ScheduleStore`. `App` only ever talks to
//! the store through this trait.

mod memory;
mod postgrest;

pub use memory::MemoryStore;
pub use postgrest::PostgrestStore;

use async_trait::async_trait;

use crate::error::RatibaResult;
use crate::schedule::{Schedule, ScheduleDraft, ScheduleId, SchedulePatch};

#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Every schedule, ordered by `start_time` ascending.
    async fn list(&self) -> RatibaResult<Vec<Schedule>>;

    /// Insert a draft and return the stored row, including its new id.
    async fn insert(&self, draft: &ScheduleDraft) -> RatibaResult<Schedule>;

    /// Update the row with `id`. Success says nothing about whether a row matched.
    async fn update(&self, id: &ScheduleId, patch: &SchedulePatch) -> RatibaResult<()>;

    /// Delete the row with `id`. Deleting a missing id succeeds.
    async fn delete(&self, id: &ScheduleId) -> RatibaResult<()>;
}
