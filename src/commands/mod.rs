pub mod config;
pub mod delete;
pub mod edit;
pub mod interactive;
pub mod list;
pub mod new;

use anyhow::{Result, bail};
use clap::Args;
use ratiba_core::App;
use ratiba_core::form::ScheduleForm;
use ratiba_core::store::ScheduleStore;

use crate::utils::tui::create_spinner;

/// Form fields that can be given as flags instead of prompted for.
#[derive(Args, Debug, Default)]
pub struct FormArgs {
    #[arg(short, long)]
    pub title: Option<String>,

    /// Start time (e.g. "2025-03-20T15:00")
    #[arg(short, long)]
    pub start: Option<String>,

    /// End time (e.g. "2025-03-20T16:00")
    #[arg(short, long)]
    pub end: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,
}

impl FormArgs {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.start.is_none() && self.end.is_none() && self.description.is_none()
    }

    /// Copy the given flags over the form's fields.
    pub fn apply(self, form: &mut ScheduleForm) {
        if let Some(title) = self.title {
            form.title = title;
        }
        if let Some(start) = self.start {
            form.start_time = start;
        }
        if let Some(end) = self.end {
            form.end_time = end;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
    }
}

/// Initial fetch, with a spinner while the request is in flight.
pub async fn load<S: ScheduleStore>(app: &mut App<S>) -> Result<()> {
    let spinner = create_spinner("Loading schedules...".to_string());
    let result = app.load().await;
    spinner.finish_and_clear();

    if let Err(e) = result {
        bail!("Could not load schedules: {}", e);
    }
    Ok(())
}

/// Submit a validated form through the app, with a spinner.
pub async fn save<S: ScheduleStore>(app: &mut App<S>, form: &mut ScheduleForm) -> Result<String> {
    let label = form.submit_label();
    let draft = form.submit(&chrono::Local)?;
    let title = draft.title.clone();

    let spinner = create_spinner(format!("{}...", label));
    let result = app.submit(draft).await;
    spinner.finish_and_clear();

    match result {
        Ok(()) => Ok(title),
        Err(e) => bail!("Could not save \"{}\": {}", title, e),
    }
}
