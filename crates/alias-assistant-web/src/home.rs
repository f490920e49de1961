use alias_assistant_lib::route::Route;
use dominator::{html, link, Dom};
use futures_signals::signal::SignalExt;

use crate::app::UpdateFlow;

pub struct Home;

impl Home {
    pub fn render(updater: &UpdateFlow) -> Dom {
        html!("main", {
            .class("page")
            .class("home")
            .children(&mut [
                html!("h1", {
                    .text("Alias Assistant")
                }),
                link!(Route::Settings.url(), {
                    .class("settings-link")
                    .text("Settings")
                }),
            ])
            .child_signal(updater.status().signal_ref(|status| status.version.clone()).map(|version| {
                version.map(|version| html!("p", {
                    .class("update-badge")
                    .text(&format!("Version {} is available", version))
                }))
            }))
        })
    }
}
