//! Interactive form filling and confirmation prompts.

use anyhow::Result;
use chrono::Local;
use dialoguer::{Confirm, Input};
use owo_colors::OwoColorize;
use ratiba_core::form::{ScheduleForm, parse_input};
use ratiba_core::item::ScheduleItem;

/// Prompt for every field, starting from the form's current values.
///
/// Title and both times are required; the prompts re-ask until they get a
/// usable value, so `ScheduleForm::submit` only sees complete input.
pub fn fill_form(form: &mut ScheduleForm) -> Result<()> {
    println!("{}", form.heading().bold());

    form.title = Input::<String>::new()
        .with_prompt("  Title")
        .with_initial_text(form.title.clone())
        .validate_with(|s: &String| -> Result<(), &'static str> {
            if s.trim().is_empty() {
                Err("Title is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    form.description = Input::<String>::new()
        .with_prompt("  Description (skip)")
        .with_initial_text(form.description.clone())
        .allow_empty(true)
        .interact_text()?;

    form.start_time = time_input("  Start (YYYY-MM-DDTHH:MM)", &form.start_time)?;

    // Start from the start time so only the hour usually needs changing
    let end_initial = if form.end_time.is_empty() {
        form.start_time.clone()
    } else {
        form.end_time.clone()
    };
    form.end_time = time_input("  End", &end_initial)?;

    Ok(())
}

fn time_input(prompt: &str, initial: &str) -> Result<String> {
    let value = Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .validate_with(|s: &String| -> Result<(), &'static str> {
            match parse_input(s, &Local) {
                Some(_) => Ok(()),
                None => Err("Expected YYYY-MM-DDTHH:MM"),
            }
        })
        .interact_text()?;

    Ok(value)
}

/// Ask before deleting; defaults to no.
pub fn confirm_delete(item: &ScheduleItem<'_>) -> Result<bool> {
    println!("{}", "Delete Schedule".bold());

    let confirmed = Confirm::new()
        .with_prompt(format!("  {}", item.delete_confirmation()))
        .default(false)
        .interact()?;

    Ok(confirmed)
}

pub fn confirm_retry() -> Result<bool> {
    Ok(Confirm::new().with_prompt("  Try again?").default(true).interact()?)
}
