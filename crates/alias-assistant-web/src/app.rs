use std::cell::RefCell;
use std::rc::Rc;

use alias_assistant_lib::prelude::*;
use dominator::{clone, events, html, Dom};
use futures_signals::signal::SignalExt;

use crate::common::{route, snackbar};
use crate::home::Home;
use crate::host::{DocumentRoot, LocalStorage, SystemColorScheme};
use crate::settings::Settings;
use crate::tauri::TauriUpdater;

pub type UpdateFlow = UpdateController<TauriUpdater>;

pub struct App {
    theme: Rc<ThemeController>,
    theme_mount: RefCell<Option<ThemeMount>>,
    updater: Rc<UpdateFlow>,
}

impl App {
    pub fn new() -> Result<Rc<Self>, anyhow::Error> {
        let theme = ThemeController::new(
            Rc::new(LocalStorage::new()),
            Rc::new(DocumentRoot::new()?),
            Rc::new(SystemColorScheme::new()?),
        );

        Ok(Rc::new(App {
            theme,
            theme_mount: RefCell::new(None),
            updater: UpdateController::new(TauriUpdater),
        }))
    }

    pub fn render(app: Rc<Self>) -> Dom {
        html!("div", {
            .class("app")
            .after_inserted(clone!(app => move |_| {
                debug!("mounting theme controller");
                app.theme_mount.replace(Some(ThemeController::mount(&app.theme)));
            }))
            .after_removed(clone!(app => move |_| {
                app.theme_mount.replace(None);
            }))
            .child_signal(route::signal().map(clone!(app => move |x| {
                match x {
                    Route::Home => Some(Home::render(&app.updater)),
                    Route::Settings => Some(
                        Settings::new(app.theme.clone(), app.updater.clone()).render()
                    ),
                    Route::NotFound => Some(
                        html!("div", {
                            .class("page")
                            .children(&mut [
                                html!("p", {
                                    .text("not found")
                                }),
                                html!("button", {
                                    .text("Home")
                                    .event(|_: events::Click| route::go_to(Route::Home))
                                }),
                            ])
                        }),
                    ),
                }
            })))
            .children(&mut [
                snackbar::render(),
            ])
        })
    }
}
