//! In-process store backed by a `Vec`, used as the store in tests.

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::ScheduleStore;
use crate::error::RatibaResult;
use crate::schedule::{Schedule, ScheduleDraft, ScheduleId, SchedulePatch};

#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Schedule>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schedules(rows: Vec<Schedule>) -> Self {
        MemoryStore {
            rows: Mutex::new(rows),
        }
    }

    /// Current rows in insertion order.
    pub async fn snapshot(&self) -> Vec<Schedule> {
        self.rows.lock().await.clone()
    }
}

#[async_trait]
impl ScheduleStore for MemoryStore {
    async fn list(&self) -> RatibaResult<Vec<Schedule>> {
        let mut rows = self.rows.lock().await.clone();
        rows.sort_by_key(|s| s.start_time);
        Ok(rows)
    }

    async fn insert(&self, draft: &ScheduleDraft) -> RatibaResult<Schedule> {
        let id = ScheduleId::new(Uuid::new_v4().to_string());
        let schedule = Schedule::from_draft(id, draft.clone());
        self.rows.lock().await.push(schedule.clone());
        Ok(schedule)
    }

    async fn update(&self, id: &ScheduleId, patch: &SchedulePatch) -> RatibaResult<()> {
        let mut rows = self.rows.lock().await;
        if let Some(row) = rows.iter_mut().find(|s| &s.id == id) {
            row.apply(patch);
        }
        Ok(())
    }

    async fn delete(&self, id: &ScheduleId) -> RatibaResult<()> {
        self.rows.lock().await.retain(|s| &s.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn draft(title: &str, hour: u32) -> ScheduleDraft {
        ScheduleDraft {
            title: title.to_string(),
            description: None,
            start_time: Utc.with_ymd_and_hms(2025, 1, 6, hour, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2025, 1, 6, hour, 30, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_distinct_ids() {
        let store = MemoryStore::new();
        let a = store.insert(&draft("A", 9)).await.unwrap();
        let b = store.insert(&draft("B", 10)).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.title, "A");
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_start_time() {
        let store = MemoryStore::new();
        store.insert(&draft("Late", 15)).await.unwrap();
        store.insert(&draft("Early", 8)).await.unwrap();

        let titles: Vec<_> = store.list().await.unwrap().into_iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["Early", "Late"]);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_id_succeed() {
        let store = MemoryStore::new();
        store.insert(&draft("A", 9)).await.unwrap();

        let ghost = ScheduleId::from("ghost");
        store.update(&ghost, &SchedulePatch::title("X")).await.unwrap();
        store.delete(&ghost).await.unwrap();

        let rows = store.snapshot().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "A");
    }
}
