//! The schedule record and the payloads used to create and change it.
//!
//! `Schedule` mirrors one row of the remote `schedules` table. A
//! `ScheduleDraft` is what the form emits (no id yet), and a `SchedulePatch`
//! carries only the fields an update touches.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque identifier assigned by the store.
///
/// Hosted tables use either uuid or bigint keys, so both a JSON string and a
/// JSON integer are accepted and held as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ScheduleId(String);

impl ScheduleId {
    pub fn new(id: impl Into<String>) -> Self {
        ScheduleId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScheduleId {
    fn from(id: &str) -> Self {
        ScheduleId(id.to_string())
    }
}

impl From<i64> for ScheduleId {
    fn from(id: i64) -> Self {
        ScheduleId(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ScheduleId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => ScheduleId(s),
            RawId::Number(n) => ScheduleId(n.to_string()),
        })
    }
}

/// A calendar entry as stored remotely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub start_time: DateTime<Utc>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub end_time: DateTime<Utc>,
}

impl Schedule {
    /// Build the stored form of a draft once the store has assigned an id.
    pub fn from_draft(id: ScheduleId, draft: ScheduleDraft) -> Self {
        Schedule {
            id,
            title: draft.title,
            description: draft.description,
            start_time: draft.start_time,
            end_time: draft.end_time,
        }
    }

    /// Shallow-merge the fields present in `patch`; everything else is kept.
    pub fn apply(&mut self, patch: &SchedulePatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(start_time) = patch.start_time {
            self.start_time = start_time;
        }
        if let Some(end_time) = patch.end_time {
            self.end_time = end_time;
        }
    }

    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.end_time < now
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// Field values for a schedule that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDraft {
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// The subset of fields an update changes.
///
/// `description: Some(None)` clears the description (sent as JSON `null`);
/// `description: None` leaves it alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchedulePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

impl SchedulePatch {
    pub fn title(title: impl Into<String>) -> Self {
        SchedulePatch {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
    }
}

impl From<ScheduleDraft> for SchedulePatch {
    fn from(draft: ScheduleDraft) -> Self {
        SchedulePatch {
            title: Some(draft.title),
            description: Some(draft.description),
            start_time: Some(draft.start_time),
            end_time: Some(draft.end_time),
        }
    }
}

/// Timestamp decoding for rows coming back from the store.
///
/// `timestamptz` columns arrive as RFC 3339; plain `timestamp` columns arrive
/// without an offset and are read as UTC.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, de::Error};

    const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"];

    pub fn parse(s: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(|naive| naive.and_utc())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp '{}'", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_schedule() -> Schedule {
        Schedule {
            id: ScheduleId::from(1),
            title: "Old".to_string(),
            description: Some("notes".to_string()),
            start_time: Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2025, 1, 6, 9, 15, 0).unwrap(),
        }
    }

    #[test]
    fn test_deserialize_row_with_uuid_id_and_offset() {
        let row = r#"{
            "id": "3f2a0c1e-0000-4000-8000-000000000001",
            "title": "Standup",
            "description": null,
            "start_time": "2025-01-06T09:00:00+00:00",
            "end_time": "2025-01-06T09:15:00+00:00"
        }"#;
        let schedule: Schedule = serde_json::from_str(row).unwrap();
        assert_eq!(schedule.id.as_str(), "3f2a0c1e-0000-4000-8000-000000000001");
        assert_eq!(schedule.description, None);
        assert_eq!(schedule.start_time, Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap());
    }

    #[test]
    fn test_deserialize_row_with_numeric_id_and_naive_timestamps() {
        let row = r#"{
            "id": 42,
            "title": "Standup",
            "start_time": "2025-01-06T09:00:00",
            "end_time": "2025-01-06T09:15"
        }"#;
        let schedule: Schedule = serde_json::from_str(row).unwrap();
        assert_eq!(schedule.id, ScheduleId::from(42));
        assert_eq!(schedule.end_time, Utc.with_ymd_and_hms(2025, 1, 6, 9, 15, 0).unwrap());
    }

    #[test]
    fn test_deserialize_rejects_garbage_timestamp() {
        let row = r#"{"id": 1, "title": "x", "start_time": "tomorrow", "end_time": "2025-01-06T09:15"}"#;
        assert!(serde_json::from_str::<Schedule>(row).is_err());
    }

    #[test]
    fn test_apply_title_patch_keeps_other_fields() {
        let mut schedule = make_schedule();
        let before = schedule.clone();
        schedule.apply(&SchedulePatch::title("New"));

        assert_eq!(schedule.title, "New");
        assert_eq!(schedule.id, before.id);
        assert_eq!(schedule.description, before.description);
        assert_eq!(schedule.start_time, before.start_time);
        assert_eq!(schedule.end_time, before.end_time);
    }

    #[test]
    fn test_apply_can_clear_description() {
        let mut schedule = make_schedule();
        schedule.apply(&SchedulePatch {
            description: Some(None),
            ..Default::default()
        });
        assert_eq!(schedule.description, None);
    }

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let json = serde_json::to_value(SchedulePatch::title("New")).unwrap();
        assert_eq!(json, serde_json::json!({ "title": "New" }));

        let clear = SchedulePatch {
            description: Some(None),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(clear).unwrap(), serde_json::json!({ "description": null }));
    }

    #[test]
    fn test_patch_from_draft_sets_every_field() {
        let schedule = make_schedule();
        let draft = ScheduleDraft {
            title: schedule.title.clone(),
            description: None,
            start_time: schedule.start_time,
            end_time: schedule.end_time,
        };
        let patch = SchedulePatch::from(draft);
        assert!(!patch.is_empty());
        assert_eq!(patch.description, Some(None));
        assert!(SchedulePatch::default().is_empty());
    }
}
