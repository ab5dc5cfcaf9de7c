use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;
use ratiba_core::form::ScheduleForm;
use ratiba_core::item::ScheduleItem;
use ratiba_core::store::ScheduleStore;
use ratiba_core::{App, ScheduleId};

use super::FormArgs;
use crate::prompt;

pub async fn run<S: ScheduleStore>(app: &mut App<S>, id: &str, args: FormArgs) -> Result<()> {
    let id = ScheduleId::from(id);
    let Some(schedule) = app.find(&id) else {
        anyhow::bail!("Schedule '{}' not found. Run `ratiba list` to see ids.", id);
    };

    let intent = ScheduleItem::new(schedule).edit_intent();
    app.dispatch(intent).await?;

    let mut form = ScheduleForm::new(app.editing(), &Local);
    let interactive = args.is_empty();
    args.apply(&mut form);

    if interactive {
        prompt::fill_form(&mut form)?;
    }

    let title = super::save(app, &mut form).await?;
    println!("{}", format!("  Updated: {}", title).yellow());

    Ok(())
}
