use alias_assistant_lib::route::Route;
use dominator::routing;
use futures_signals::signal::{Signal, SignalExt};
use wasm_bindgen::prelude::*;
use web_sys::Url;

/// Current route, following the browser location.
pub fn signal() -> impl Signal<Item = Route> {
    routing::url()
        .signal_ref(|url| Url::new(url).unwrap_throw())
        .map(|url| Route::from_path(&url.pathname()))
}

pub fn go_to(route: Route) {
    routing::go_to_url(&route.url());
}
