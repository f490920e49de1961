use std::rc::Rc;

use dominator::{clone, events, html, Dom};
use futures_signals::signal::{Mutable, SignalExt};
use gloo_timers::callback::Timeout;

const INFO_TIMEOUT_MS: u32 = 4_000;

thread_local! {
    static SNACKBAR: Rc<Snackbar> = Snackbar::new();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
struct Message {
    kind: Kind,
    text: String,
}

/// Shows a message that dismisses itself.
pub fn info(message: impl Into<String>) {
    SNACKBAR.with(|s| Snackbar::show(s, Kind::Info, message.into()));
}

/// Shows a message that stays until dismissed.
pub fn error(message: impl Into<String>) {
    SNACKBAR.with(|s| Snackbar::show(s, Kind::Error, message.into()));
}

pub fn render() -> Dom {
    SNACKBAR.with(|s| Snackbar::render(s.clone()))
}

pub struct Snackbar {
    message: Mutable<Option<Message>>,
    timeout: std::cell::RefCell<Option<Timeout>>,
}

impl Snackbar {
    fn new() -> Rc<Self> {
        Rc::new(Self {
            message: Mutable::new(None),
            timeout: std::cell::RefCell::new(None),
        })
    }

    fn show(snackbar: &Rc<Self>, kind: Kind, text: String) {
        snackbar.message.set(Some(Message { kind, text }));

        let timeout = (kind == Kind::Info).then(|| {
            Timeout::new(INFO_TIMEOUT_MS, clone!(snackbar => move || {
                snackbar.message.set(None);
            }))
        });
        // replacing drops, and so cancels, a pending dismissal
        snackbar.timeout.replace(timeout);
    }

    fn dismiss(&self) {
        self.timeout.replace(None);
        self.message.set(None);
    }

    fn render(snackbar: Rc<Self>) -> Dom {
        html!("div", {
            .class("snackbar")
            .class_signal("snackbar-error", snackbar.message.signal_ref(|message| {
                matches!(message, Some(Message { kind: Kind::Error, .. }))
            }))
            .visible_signal(snackbar.message.signal_ref(|message| message.is_some()))
            .children(&mut [
                html!("div", {
                    .child_signal(snackbar.message.signal_cloned().map(|message| message.map(|message| html!("span", {
                            .text(&message.text)
                        })
                    )))
                    .children(&mut [
                        html!("button", {
                            .attr("aria-label", "Dismiss")
                            .text("×")
                            .event(clone!(snackbar => move |_: events::Click| snackbar.dismiss()))
                        })
                    ])
                })
            ])
        })
    }
}
