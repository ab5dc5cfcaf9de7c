//! Application root.
//!
//! `App` owns the session's only mutable copy of the schedule collection,
//! along with the form/tab/theme UI state. Store calls are awaited before the
//! collection is touched, so a failed call leaves the state as it was.

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use crate::error::RatibaResult;
use crate::item::ItemIntent;
use crate::partition::{Partition, Tab};
use crate::schedule::{Schedule, ScheduleDraft, ScheduleId, SchedulePatch};
use crate::store::ScheduleStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

pub struct App<S> {
    store: S,
    schedules: Vec<Schedule>,
    editing: Option<Schedule>,
    form_open: bool,
    tab: Tab,
    theme: Theme,
}

impl<S: ScheduleStore> App<S> {
    pub fn new(store: S) -> Self {
        App {
            store,
            schedules: Vec::new(),
            editing: None,
            form_open: false,
            tab: Tab::default(),
            theme: Theme::default(),
        }
    }

    pub fn schedules(&self) -> &[Schedule] {
        &self.schedules
    }

    pub fn find(&self, id: &ScheduleId) -> Option<&Schedule> {
        self.schedules.iter().find(|s| &s.id == id)
    }

    // ---- store operations -------------------------------------------------

    /// Replace the collection with the store's rows.
    pub async fn load(&mut self) -> RatibaResult<()> {
        match self.store.list().await {
            Ok(rows) => {
                debug!("Loaded {} schedules", rows.len());
                self.schedules = rows;
                Ok(())
            }
            Err(e) => {
                error!("Error fetching schedules: {}", e);
                Err(e)
            }
        }
    }

    /// Insert a new schedule and keep the collection sorted by start time.
    pub async fn create(&mut self, draft: ScheduleDraft) -> RatibaResult<ScheduleId> {
        match self.store.insert(&draft).await {
            Ok(schedule) => {
                info!("Created schedule {} ({})", schedule.id, schedule.title);
                let id = schedule.id.clone();
                self.schedules.push(schedule);
                self.schedules.sort_by_key(|s| s.start_time);
                self.form_open = false;
                Ok(id)
            }
            Err(e) => {
                error!("Error adding schedule: {}", e);
                Err(e)
            }
        }
    }

    /// Update one schedule and merge the patch into the local copy.
    ///
    /// The collection is not re-sorted, even if `start_time` changed.
    pub async fn update(&mut self, id: &ScheduleId, patch: SchedulePatch) -> RatibaResult<()> {
        match self.store.update(id, &patch).await {
            Ok(()) => {
                info!("Updated schedule {}", id);
                if let Some(schedule) = self.schedules.iter_mut().find(|s| &s.id == id) {
                    schedule.apply(&patch);
                }
                self.editing = None;
                self.form_open = false;
                Ok(())
            }
            Err(e) => {
                error!("Error updating schedule {}: {}", id, e);
                Err(e)
            }
        }
    }

    pub async fn delete(&mut self, id: &ScheduleId) -> RatibaResult<()> {
        match self.store.delete(id).await {
            Ok(()) => {
                info!("Deleted schedule {}", id);
                self.schedules.retain(|s| &s.id != id);
                Ok(())
            }
            Err(e) => {
                error!("Error deleting schedule {}: {}", id, e);
                Err(e)
            }
        }
    }

    /// Form submission: update the schedule being edited, or create a new one.
    pub async fn submit(&mut self, draft: ScheduleDraft) -> RatibaResult<()> {
        match self.editing.as_ref().map(|s| s.id.clone()) {
            Some(id) => self.update(&id, draft.into()).await,
            None => self.create(draft).await.map(|_| ()),
        }
    }

    /// Act on an intent raised by a list item.
    pub async fn dispatch(&mut self, intent: ItemIntent) -> RatibaResult<()> {
        match intent {
            ItemIntent::Edit(schedule) => {
                self.edit(schedule);
                Ok(())
            }
            ItemIntent::Delete(id) => self.delete(&id).await,
        }
    }

    // ---- derived views ----------------------------------------------------

    pub fn partition(&self, now: DateTime<Utc>) -> Partition<'_> {
        Partition::split(&self.schedules, now)
    }

    /// The partition selected by the active tab.
    pub fn displayed(&self, now: DateTime<Utc>) -> Vec<&Schedule> {
        self.partition(now).tab(self.tab).to_vec()
    }

    // ---- form / tab / theme state -----------------------------------------

    pub fn editing(&self) -> Option<&Schedule> {
        self.editing.as_ref()
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    /// Open the form for a new schedule.
    pub fn open_new(&mut self) {
        self.editing = None;
        self.form_open = true;
    }

    /// Open the form pre-filled with `schedule`.
    pub fn edit(&mut self, schedule: Schedule) {
        self.editing = Some(schedule);
        self.form_open = true;
    }

    /// Dismiss the form without touching the store.
    pub fn cancel(&mut self) {
        self.editing = None;
        self.form_open = false;
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }
}
