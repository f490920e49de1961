#[macro_use]
extern crate log;

mod app;
mod common;
mod home;
mod host;
mod settings;
mod tauri;
mod utils;

use wasm_bindgen::prelude::*;

use app::App;

#[wasm_bindgen(start)]
pub async fn main_js() -> Result<(), JsValue> {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    let app = App::new().map_err(|e| JsValue::from_str(&e.to_string()))?;
    dominator::append_dom(&dominator::body(), App::render(app));

    Ok(())
}
