//! Terminal rendering for the schedule list.
//!
//! Extension trait over ratiba-core types, coloured with owo_colors.

use chrono::{DateTime, Local, Utc};
use owo_colors::OwoColorize;
use ratiba_core::item::ScheduleItem;
use ratiba_core::store::ScheduleStore;
use ratiba_core::{App, Tab, Theme};

/// Render against a reference time and palette.
pub trait RenderAt {
    fn render_at(&self, now: &DateTime<Local>, theme: Theme) -> String;
}

/// Description lines shown under the title
const DESCRIPTION_LINES: usize = 2;
const DESCRIPTION_WIDTH: usize = 72;

fn emphasis(text: &str, theme: Theme) -> String {
    match theme {
        Theme::Dark => text.bold().bright_white().to_string(),
        Theme::Light => text.bold().black().to_string(),
    }
}

fn muted(text: &str, theme: Theme) -> String {
    match theme {
        Theme::Dark => text.bright_black().to_string(),
        Theme::Light => text.dimmed().to_string(),
    }
}

impl RenderAt for ScheduleItem<'_> {
    fn render_at(&self, now: &DateTime<Local>, theme: Theme) -> String {
        let schedule = self.schedule();
        let past = self.is_past(now);
        let (start, end) = self.time_range(&Local);

        let title = if past {
            schedule.title.dimmed().to_string()
        } else {
            emphasis(&schedule.title, theme)
        };
        let badge = if self.is_today(now) {
            format!("  {}", "TODAY".green().bold())
        } else {
            String::new()
        };

        let mut body = vec![format!("{}{}", title, badge)];
        if let Some(description) = &schedule.description {
            body.extend(clamp_description(description).into_iter().map(|l| muted(&l, theme)));
        }
        let footer = format!("{} · #{}", self.date_label(&Local), schedule.id);
        body.push(muted(&footer, theme));

        let times = [start, end];
        let mut lines = Vec::new();
        for (i, text) in body.iter().enumerate() {
            let time = times.get(i).map(String::as_str).unwrap_or("");
            let time = format!("{:>7}", time);
            let time = if past { time.dimmed().to_string() } else { muted(&time, theme) };
            lines.push(format!("{} {} {}", time, "│".dimmed(), text));
        }

        lines.join("\n")
    }
}

/// Header with the tab labels and their counts.
fn render_tabs(active: Tab, upcoming: usize, past: usize, theme: Theme) -> String {
    [(Tab::Upcoming, upcoming), (Tab::Past, past)]
        .into_iter()
        .map(|(tab, count)| {
            let label = if count > 0 {
                format!("{} ({})", tab.label(), count)
            } else {
                tab.label().to_string()
            };
            if tab == active {
                emphasis(&label, theme).underline().to_string()
            } else {
                muted(&label, theme)
            }
        })
        .collect::<Vec<_>>()
        .join("   ")
}

fn render_empty(tab: Tab, theme: Theme) -> String {
    match tab {
        Tab::Upcoming => format!(
            "  {}\n  {}",
            emphasis("No schedules yet", theme),
            muted("Create your first schedule to get started (ratiba new)", theme)
        ),
        Tab::Past => format!("  {}", muted("No past schedules", theme)),
    }
}

impl<S: ScheduleStore> RenderAt for App<S> {
    fn render_at(&self, now: &DateTime<Local>, theme: Theme) -> String {
        let partition = self.partition(now.with_timezone(&Utc));
        let mut out = vec![
            render_tabs(self.tab(), partition.upcoming.len(), partition.past.len(), theme),
            String::new(),
        ];

        let displayed = partition.tab(self.tab());
        if displayed.is_empty() {
            out.push(render_empty(self.tab(), theme));
        } else {
            let items: Vec<String> = displayed
                .iter()
                .map(|s| ScheduleItem::new(s).render_at(now, theme))
                .collect();
            out.push(items.join("\n\n"));
        }

        out.join("\n")
    }
}

/// One-line label for pickers, e.g. "Mon, Jan 6, 2025 09:00  Standup".
pub fn picker_label(item: &ScheduleItem<'_>) -> String {
    let (start, _) = item.time_range(&Local);
    format!("{} {}  {}", item.date_label(&Local), start, item.schedule().title)
}

/// First lines of a description, each cut to a fixed width.
fn clamp_description(description: &str) -> Vec<String> {
    let lines: Vec<&str> = description.lines().filter(|l| !l.trim().is_empty()).collect();
    let truncated = lines.len() > DESCRIPTION_LINES;

    lines
        .into_iter()
        .take(DESCRIPTION_LINES)
        .enumerate()
        .map(|(i, line)| {
            let mut clamped: String = line.chars().take(DESCRIPTION_WIDTH).collect();
            if line.chars().count() > DESCRIPTION_WIDTH || (truncated && i + 1 == DESCRIPTION_LINES) {
                clamped.push('…');
            }
            clamped
        })
        .collect()
}
