use std::rc::Rc;

use alias_assistant_lib::{prelude::*, APP_VERSION};
use dominator::{clone, events, html, link, Dom};
use futures_signals::signal::SignalExt;

use crate::app::UpdateFlow;
use crate::common::snackbar;
use crate::utils::AsyncLoader;

pub struct Settings {
    theme: Rc<ThemeController>,
    updater: Rc<UpdateFlow>,
    loader: AsyncLoader,
}

impl Settings {
    pub fn new(theme: Rc<ThemeController>, updater: Rc<UpdateFlow>) -> Rc<Self> {
        Rc::new(Self {
            theme,
            updater,
            loader: AsyncLoader::new(),
        })
    }

    fn check_for_update(settings: Rc<Self>) {
        settings.loader.load(clone!(settings => async move {
            if !settings.updater.check_for_update().await {
                if let Some(error) = settings.updater.snapshot().error {
                    snackbar::error(error);
                } else {
                    snackbar::info("You are on the latest version");
                }
            }
        }));
    }

    fn install_update(settings: Rc<Self>) {
        settings.loader.load(clone!(settings => async move {
            match settings.updater.install_update().await {
                Ok(()) => {
                    // still running, so the shell did not restart on its own
                    snackbar::info("Update installed, restart Alias Assistant to finish");
                }
                Err(e) => {
                    error!("error installing update: {}", e);
                    snackbar::error(format!("Failed to install update: {}", e));
                }
            }
        }));
    }

    fn render_theme(settings: Rc<Self>) -> Dom {
        html!("section", {
            .class("settings-section")
            .children(&mut [
                html!("h2", {
                    .text("Theme")
                }),
                html!("div", {
                    .class("settings-row")
                    .children(settings.theme.themes().iter().map(|option| {
                        html!("button", {
                            .class_signal("active", settings.theme.current_theme_signal().map(move |theme| theme == option.name))
                            .text(option.label)
                            .event(clone!(settings => move |_: events::Click| settings.theme.set_theme(option.name)))
                        })
                    }))
                })
            ])
        })
    }

    fn render_update(settings: Rc<Self>) -> Dom {
        let status = settings.updater.status();

        html!("section", {
            .class("settings-section")
            .children(&mut [
                html!("h2", {
                    .text("Updates")
                }),
                html!("p", {
                    .text_signal(status.signal_ref(|status| {
                        let current = if status.current_version.is_empty() {
                            APP_VERSION
                        } else {
                            status.current_version.as_str()
                        };
                        match &status.version {
                            Some(version) => format!("Version {} is available (current {})", version, current),
                            None => format!("Current version {}", current),
                        }
                    }))
                }),
                html!("div", {
                    .class("progress")
                    .visible_signal(status.signal_ref(|status| status.downloading))
                    .children(&mut [
                        html!("div", {
                            .class("progress-bar")
                            .style_signal("width", status.signal_ref(|status| format!("{}%", status.progress)))
                        })
                    ])
                }),
                html!("div", {
                    .class("settings-row")
                    .children(&mut [
                        html!("button", {
                            .text("Check for updates")
                            .attr_signal("disabled", settings.loader.is_loading().map(|loading| loading.then_some("")))
                            .event(clone!(settings => move |_: events::Click| Self::check_for_update(settings.clone())))
                        }),
                        html!("button", {
                            .class("primary")
                            .text("Install and restart")
                            .visible_signal(status.signal_ref(|status| status.available && !status.downloading))
                            .event(clone!(settings => move |_: events::Click| Self::install_update(settings.clone())))
                        }),
                    ])
                }),
            ])
        })
    }

    pub fn render(self: Rc<Self>) -> Dom {
        html!("main", {
            .class("page")
            .class("settings")
            .children(&mut [
                link!(Route::Home.url(), {
                    .class("back-link")
                    .text("Back")
                }),
                Self::render_theme(self.clone()),
                Self::render_update(self),
            ])
        })
    }
}
