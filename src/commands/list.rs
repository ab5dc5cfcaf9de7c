use chrono::Local;
use ratiba_core::store::ScheduleStore;
use ratiba_core::{App, Tab};

use crate::render::RenderAt;

pub fn run<S: ScheduleStore>(app: &mut App<S>, past: bool) {
    if past {
        app.set_tab(Tab::Past);
    }
    println!("{}", app.render_at(&Local::now(), app.theme()));
}
