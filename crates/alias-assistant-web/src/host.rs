use std::rc::Rc;

use alias_assistant_lib::prelude::{ColorSchemeQuery, KeyValueStore, RootElement, Subscription};
use alias_assistant_lib::theme::DARK_MEDIA_QUERY;
use anyhow::anyhow;
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{Element, MediaQueryList, Storage};

use crate::utils::{document, local_storage, window};

pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    pub fn new() -> Self {
        Self {
            storage: local_storage(),
        }
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set_item(key, value) {
            warn!("error saving {}: {:?}", key, e);
        }
    }
}

/// `<html>`, the document's root element.
pub struct DocumentRoot {
    element: Element,
}

impl DocumentRoot {
    pub fn new() -> Result<Self, anyhow::Error> {
        let element = document()
            .document_element()
            .ok_or_else(|| anyhow!("no document element"))?;

        Ok(Self { element })
    }
}

impl RootElement for DocumentRoot {
    fn set_attribute(&self, name: &str, value: &str) {
        self.element.set_attribute(name, value).unwrap_throw();
    }

    fn remove_attribute(&self, name: &str) {
        self.element.remove_attribute(name).unwrap_throw();
    }

    fn toggle_class(&self, class: &str, present: bool) {
        self.element
            .class_list()
            .toggle_with_force(class, present)
            .unwrap_throw();
    }
}

pub struct SystemColorScheme {
    media_query_list: MediaQueryList,
}

impl SystemColorScheme {
    pub fn new() -> Result<Self, anyhow::Error> {
        let media_query_list = window()
            .match_media(DARK_MEDIA_QUERY)
            .map_err(|e| anyhow!("error match media: {:?}", e))?
            .ok_or_else(|| anyhow!("no color scheme query"))?;

        Ok(Self { media_query_list })
    }
}

impl ColorSchemeQuery for SystemColorScheme {
    fn prefers_dark(&self) -> bool {
        self.media_query_list.matches()
    }

    fn subscribe(&self, listener: Rc<dyn Fn()>) -> Subscription {
        let closure = Closure::wrap(Box::new(move |_: web_sys::Event| listener())
            as Box<dyn FnMut(_)>);

        self.media_query_list
            .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
            .unwrap_throw();

        let media_query_list = self.media_query_list.clone();
        Subscription::new(move || {
            if let Err(e) = media_query_list
                .remove_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
            {
                warn!("error removing color scheme listener: {:?}", e);
            }
        })
    }
}
