use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;
use ratiba_core::App;
use ratiba_core::form::ScheduleForm;
use ratiba_core::store::ScheduleStore;

use super::FormArgs;
use crate::prompt;

pub async fn run<S: ScheduleStore>(app: &mut App<S>, args: FormArgs) -> Result<()> {
    app.open_new();
    let mut form = ScheduleForm::new(None, &Local);

    // Only prompt when a required field was left off the command line
    let interactive = args.title.is_none() || args.start.is_none() || args.end.is_none();
    args.apply(&mut form);

    if interactive {
        prompt::fill_form(&mut form)?;
    }

    let title = super::save(app, &mut form).await?;

    if interactive {
        println!();
    }
    println!("{}", format!("  Created: {}", title).green());

    Ok(())
}
