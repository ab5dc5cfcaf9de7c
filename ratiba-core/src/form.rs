//! Create / edit form state.
//!
//! The form only knows about text fields. It turns them into a
//! `ScheduleDraft` on submit and hands that back to the caller; it never
//! talks to the store.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

use crate::schedule::{Schedule, ScheduleDraft};

/// Edit-friendly local representation of a timestamp (`2025-01-06T09:00`).
pub const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Also accepted when parsing user input.
const ALT_INPUT_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S"];

/// Validation failures caught before anything reaches the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Invalid {field} '{value}'. Expected YYYY-MM-DDTHH:MM")]
    InvalidTime { field: &'static str, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleForm {
    pub title: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    editing: bool,
}

impl ScheduleForm {
    /// Empty form, or one pre-populated from the schedule being edited.
    pub fn new<Tz: TimeZone>(editing: Option<&Schedule>, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        match editing {
            Some(schedule) => ScheduleForm {
                title: schedule.title.clone(),
                description: schedule.description.clone().unwrap_or_default(),
                start_time: format_input(&schedule.start_time, tz),
                end_time: format_input(&schedule.end_time, tz),
                editing: true,
            },
            None => ScheduleForm::default(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn heading(&self) -> &'static str {
        if self.editing { "Edit Schedule" } else { "Create New Schedule" }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.editing { "Update" } else { "Create Schedule" }
    }

    /// Validate and emit the current values, then clear the fields.
    ///
    /// On a validation error the fields are left as they were.
    pub fn submit<Tz: TimeZone>(&mut self, tz: &Tz) -> Result<ScheduleDraft, FormError> {
        let draft = self.to_draft(tz)?;
        self.reset();
        Ok(draft)
    }

    /// Dismiss without emitting anything.
    pub fn close(&mut self) {
        self.reset();
        self.editing = false;
    }

    pub fn reset(&mut self) {
        self.title.clear();
        self.description.clear();
        self.start_time.clear();
        self.end_time.clear();
    }

    #[cfg(test)]
    fn is_blank(&self) -> bool {
        self.title.is_empty()
            && self.description.is_empty()
            && self.start_time.is_empty()
            && self.end_time.is_empty()
    }

    fn to_draft<Tz: TimeZone>(&self, tz: &Tz) -> Result<ScheduleDraft, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::MissingField("title"));
        }

        let start_time = required_time("start_time", &self.start_time, tz)?;
        let end_time = required_time("end_time", &self.end_time, tz)?;

        let description = match self.description.trim() {
            "" => None,
            _ => Some(self.description.clone()),
        };

        Ok(ScheduleDraft {
            title: title.to_string(),
            description,
            start_time,
            end_time,
        })
    }
}

/// Format a stored timestamp for the form in the given zone.
pub fn format_input<Tz: TimeZone>(time: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.with_timezone(tz).format(INPUT_FORMAT).to_string()
}

/// Parse a local form value into an absolute timestamp.
///
/// Times that fall in a DST gap are rejected; ambiguous times take the
/// earlier instant.
pub fn parse_input<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let value = value.trim();
    let naive = std::iter::once(INPUT_FORMAT)
        .chain(ALT_INPUT_FORMATS.iter().copied())
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

fn required_time<Tz: TimeZone>(
    field: &'static str,
    value: &str,
    tz: &Tz,
) -> Result<DateTime<Utc>, FormError> {
    if value.trim().is_empty() {
        return Err(FormError::MissingField(field));
    }
    parse_input(value, tz).ok_or_else(|| FormError::InvalidTime {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ScheduleId;
    use chrono::FixedOffset;

    fn make_schedule() -> Schedule {
        Schedule {
            id: ScheduleId::from("abc"),
            title: "Standup".to_string(),
            description: None,
            start_time: Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2025, 1, 6, 9, 15, 0).unwrap(),
        }
    }

    fn filled_form() -> ScheduleForm {
        ScheduleForm {
            title: "Standup".to_string(),
            description: String::new(),
            start_time: "2025-01-06T09:00".to_string(),
            end_time: "2025-01-06T09:15".to_string(),
            editing: false,
        }
    }

    #[test]
    fn test_new_form_is_empty() {
        let form = ScheduleForm::new(None, &Utc);
        assert!(form.is_blank());
        assert!(!form.is_editing());
        assert_eq!(form.heading(), "Create New Schedule");
    }

    #[test]
    fn test_edit_form_is_prepopulated() {
        let schedule = make_schedule();
        let form = ScheduleForm::new(Some(&schedule), &Utc);

        assert_eq!(form.title, "Standup");
        assert_eq!(form.description, "");
        assert_eq!(form.start_time, "2025-01-06T09:00");
        assert_eq!(form.end_time, "2025-01-06T09:15");
        assert_eq!(form.heading(), "Edit Schedule");
        assert_eq!(form.submit_label(), "Update");
    }

    #[test]
    fn test_edit_form_uses_local_zone() {
        let nairobi = FixedOffset::east_opt(3 * 3600).unwrap();
        let schedule = make_schedule();
        let form = ScheduleForm::new(Some(&schedule), &nairobi);

        assert_eq!(form.start_time, "2025-01-06T12:00");

        let mut form = form;
        let draft = form.submit(&nairobi).unwrap();
        assert_eq!(draft.start_time, schedule.start_time);
        assert_eq!(draft.end_time, schedule.end_time);
    }

    #[test]
    fn test_submit_emits_draft_and_clears_fields() {
        let mut form = filled_form();
        let draft = form.submit(&Utc).unwrap();

        assert_eq!(draft.title, "Standup");
        assert_eq!(draft.description, None);
        assert_eq!(draft.start_time, Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap());
        assert_eq!(draft.end_time, Utc.with_ymd_and_hms(2025, 1, 6, 9, 15, 0).unwrap());
        assert!(form.is_blank());
    }

    #[test]
    fn test_submit_keeps_description_text() {
        let mut form = filled_form();
        form.description = "Daily sync".to_string();
        assert_eq!(form.submit(&Utc).unwrap().description.as_deref(), Some("Daily sync"));
    }

    #[test]
    fn test_missing_title_is_rejected_and_fields_kept() {
        let mut form = filled_form();
        form.title = "   ".to_string();

        assert_eq!(form.submit(&Utc), Err(FormError::MissingField("title")));
        assert_eq!(form.start_time, "2025-01-06T09:00");
    }

    #[test]
    fn test_missing_times_are_rejected() {
        let mut form = filled_form();
        form.start_time.clear();
        assert_eq!(form.submit(&Utc), Err(FormError::MissingField("start_time")));

        let mut form = filled_form();
        form.end_time.clear();
        assert_eq!(form.submit(&Utc), Err(FormError::MissingField("end_time")));
    }

    #[test]
    fn test_unparseable_time_is_rejected() {
        let mut form = filled_form();
        form.end_time = "next tuesday".to_string();
        assert!(matches!(
            form.submit(&Utc),
            Err(FormError::InvalidTime { field: "end_time", .. })
        ));
    }

    #[test]
    fn test_end_before_start_is_allowed() {
        let mut form = filled_form();
        form.end_time = "2025-01-06T08:00".to_string();
        let draft = form.submit(&Utc).unwrap();
        assert!(draft.end_time < draft.start_time);
    }

    #[test]
    fn test_parse_input_accepts_space_and_seconds() {
        let expected = Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap();
        assert_eq!(parse_input("2025-01-06 09:00", &Utc), Some(expected));
        assert_eq!(parse_input("2025-01-06T09:00:00", &Utc), Some(expected));
        assert_eq!(parse_input("06/01/2025", &Utc), None);
    }

    #[test]
    fn test_close_resets_form() {
        let schedule = make_schedule();
        let mut form = ScheduleForm::new(Some(&schedule), &Utc);
        form.close();
        assert!(form.is_blank());
        assert!(!form.is_editing());
    }
}
