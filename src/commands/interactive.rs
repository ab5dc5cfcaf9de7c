//! `ratiba` with no subcommand: one `App` kept alive across actions.

use anyhow::Result;
use chrono::{Local, Utc};
use dialoguer::Select;
use owo_colors::OwoColorize;
use ratiba_core::form::ScheduleForm;
use ratiba_core::item::ScheduleItem;
use ratiba_core::store::ScheduleStore;
use ratiba_core::{App, Schedule, Theme};

use crate::prompt;
use crate::render::{RenderAt, picker_label};
use crate::utils::tui::create_spinner;

#[derive(Clone, Copy)]
enum Action {
    New,
    Edit,
    Delete,
    SwitchTab,
    ToggleTheme,
    Reload,
    Quit,
}

const ACTIONS: [Action; 7] = [
    Action::New,
    Action::Edit,
    Action::Delete,
    Action::SwitchTab,
    Action::ToggleTheme,
    Action::Reload,
    Action::Quit,
];

impl Action {
    fn label<S: ScheduleStore>(&self, app: &App<S>) -> String {
        match self {
            Action::New => "New schedule".to_string(),
            Action::Edit => "Edit schedule".to_string(),
            Action::Delete => "Delete schedule".to_string(),
            Action::SwitchTab => format!("Show {}", app.tab().other().label().to_lowercase()),
            Action::ToggleTheme => match app.theme() {
                Theme::Dark => "Light theme".to_string(),
                Theme::Light => "Dark theme".to_string(),
            },
            Action::Reload => "Reload".to_string(),
            Action::Quit => "Quit".to_string(),
        }
    }
}

pub async fn run<S: ScheduleStore>(app: &mut App<S>) -> Result<()> {
    // A failed first load still opens the session; Reload can retry it
    if let Err(e) = super::load(app).await {
        eprintln!("  {}", e.to_string().red());
    }

    loop {
        println!();
        println!("{}", app.render_at(&Local::now(), app.theme()));
        println!();

        let labels: Vec<String> = ACTIONS.iter().map(|a| a.label(&*app)).collect();
        let Some(choice) = Select::new()
            .with_prompt("  What next?")
            .items(&labels)
            .default(0)
            .interact_opt()?
        else {
            break;
        };

        let outcome = match ACTIONS[choice] {
            Action::New => create(app).await,
            Action::Edit => edit(app).await,
            Action::Delete => delete(app).await,
            Action::SwitchTab => {
                app.set_tab(app.tab().other());
                Ok(())
            }
            Action::ToggleTheme => {
                app.toggle_theme();
                Ok(())
            }
            Action::Reload => super::load(app).await,
            Action::Quit => break,
        };

        if let Err(e) = outcome {
            eprintln!("  {}", e.to_string().red());
        }
    }

    Ok(())
}

async fn create<S: ScheduleStore>(app: &mut App<S>) -> Result<()> {
    app.open_new();
    let form = ScheduleForm::new(None, &Local);
    run_form(app, form).await
}

async fn edit<S: ScheduleStore>(app: &mut App<S>) -> Result<()> {
    let Some(schedule) = pick(app, "  Edit which?")? else {
        return Ok(());
    };

    app.dispatch(ScheduleItem::new(&schedule).edit_intent()).await?;
    let form = ScheduleForm::new(app.editing(), &Local);
    run_form(app, form).await
}

async fn delete<S: ScheduleStore>(app: &mut App<S>) -> Result<()> {
    let Some(schedule) = pick(app, "  Delete which?")? else {
        return Ok(());
    };
    let item = ScheduleItem::new(&schedule);

    if !prompt::confirm_delete(&item)? {
        return Ok(());
    }

    let spinner = create_spinner("Deleting...".to_string());
    let result = app.dispatch(item.delete_intent()).await;
    spinner.finish_and_clear();

    match result {
        Ok(()) => {
            println!("{}", format!("  Deleted: {}", schedule.title).red());
            Ok(())
        }
        Err(e) => anyhow::bail!("Could not delete \"{}\": {}", schedule.title, e),
    }
}

/// Prompt, submit, and offer a retry with the same values on failure.
///
/// Runs while `app` keeps the form open: a successful save or giving up
/// closes it.
async fn run_form<S: ScheduleStore>(app: &mut App<S>, mut form: ScheduleForm) -> Result<()> {
    let verb = if form.is_editing() { "Updated" } else { "Created" };

    while app.is_form_open() {
        if let Err(e) = prompt::fill_form(&mut form) {
            form.close();
            app.cancel();
            return Err(e);
        }

        let snapshot = form.clone();
        match super::save(app, &mut form).await {
            Ok(title) => println!("{}", format!("  {}: {}", verb, title).green()),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
                if prompt::confirm_retry()? {
                    form = snapshot;
                } else {
                    form.close();
                    app.cancel();
                }
            }
        }
    }

    Ok(())
}

/// Choose one schedule from the active tab.
fn pick<S: ScheduleStore>(app: &App<S>, prompt: &str) -> Result<Option<Schedule>> {
    let displayed: Vec<Schedule> = app.displayed(Utc::now()).into_iter().cloned().collect();
    if displayed.is_empty() {
        println!("  {}", format!("No {} schedules", app.tab().label().to_lowercase()).dimmed());
        return Ok(None);
    }

    let labels: Vec<String> = displayed
        .iter()
        .map(|s| picker_label(&ScheduleItem::new(s)))
        .collect();

    let choice = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact_opt()?;

    Ok(choice.map(|i| displayed[i].clone()))
}
