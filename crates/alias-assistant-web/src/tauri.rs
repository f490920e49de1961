//! Bindings to the updater plugin exposed on `window.__TAURI__` when the
//! shell is built with `withGlobalTauri`.

use std::time::Duration;

use alias_assistant_lib::prelude::{DownloadEvent, Error, PendingUpdate, UpdateSource};
use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::{prelude::*, JsCast};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["__TAURI__", "updater"], js_name = check, catch)]
    async fn updater_check() -> Result<JsValue, JsValue>;

    type JsUpdate;

    #[wasm_bindgen(method, getter)]
    fn version(this: &JsUpdate) -> String;

    #[wasm_bindgen(method, getter, js_name = currentVersion)]
    fn current_version(this: &JsUpdate) -> String;

    #[wasm_bindgen(method, catch, js_name = downloadAndInstall)]
    async fn download_and_install(
        this: &JsUpdate,
        on_event: &js_sys::Function,
    ) -> Result<JsValue, JsValue>;
}

fn js_error(e: JsValue) -> Error {
    let message = js_sys::Reflect::get(&e, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .or_else(|| e.as_string())
        .unwrap_or_default();

    Error::Updater(message)
}

fn decode_event(event: &JsValue) -> Option<DownloadEvent> {
    let json = js_sys::JSON::stringify(event).ok()?.as_string()?;
    match serde_json::from_str(&json) {
        Ok(event) => Some(event),
        Err(e) => {
            warn!("unknown download event {}: {}", json, e);
            None
        }
    }
}

pub struct TauriUpdate {
    inner: JsUpdate,
    version: String,
    current_version: String,
}

#[async_trait(?Send)]
impl PendingUpdate for TauriUpdate {
    fn version(&self) -> &str {
        &self.version
    }

    fn current_version(&self) -> &str {
        &self.current_version
    }

    async fn download_and_install(
        &self,
        mut on_event: Box<dyn FnMut(DownloadEvent)>,
    ) -> Result<(), Error> {
        let closure = Closure::wrap(Box::new(move |event: JsValue| {
            if let Some(event) = decode_event(&event) {
                on_event(event);
            }
        }) as Box<dyn FnMut(JsValue)>);

        let result = self
            .inner
            .download_and_install(closure.as_ref().unchecked_ref())
            .await;
        drop(closure);

        result.map(|_| ()).map_err(js_error)
    }
}

pub struct TauriUpdater;

#[async_trait(?Send)]
impl UpdateSource for TauriUpdater {
    type Update = TauriUpdate;

    async fn check(&self) -> Result<Option<Self::Update>, Error> {
        let value = updater_check().await.map_err(js_error)?;
        if value.is_null() || value.is_undefined() {
            return Ok(None);
        }

        let inner: JsUpdate = value.unchecked_into();
        Ok(Some(TauriUpdate {
            version: inner.version(),
            current_version: inner.current_version(),
            inner,
        }))
    }

    async fn pause(&self, duration: Duration) {
        TimeoutFuture::new(duration.as_millis() as u32).await;
    }
}
