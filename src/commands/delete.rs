use anyhow::Result;
use owo_colors::OwoColorize;
use ratiba_core::item::ScheduleItem;
use ratiba_core::store::ScheduleStore;
use ratiba_core::{App, ScheduleId};

use crate::prompt;
use crate::utils::tui::create_spinner;

pub async fn run<S: ScheduleStore>(app: &mut App<S>, id: &str, yes: bool) -> Result<()> {
    let id = ScheduleId::from(id);
    let Some(schedule) = app.find(&id) else {
        anyhow::bail!("Schedule '{}' not found. Run `ratiba list` to see ids.", id);
    };
    let item = ScheduleItem::new(schedule);
    let title = schedule.title.clone();

    if !yes && !prompt::confirm_delete(&item)? {
        println!("{}", "  Cancelled".dimmed());
        return Ok(());
    }

    let intent = item.delete_intent();
    let spinner = create_spinner("Deleting...".to_string());
    let result = app.dispatch(intent).await;
    spinner.finish_and_clear();

    if let Err(e) = result {
        anyhow::bail!("Could not delete \"{}\": {}", title, e);
    }
    println!("{}", format!("  Deleted: {}", title).red());

    Ok(())
}
