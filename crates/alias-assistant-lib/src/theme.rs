use std::rc::Rc;

use futures_signals::signal::{Mutable, Signal};

use crate::models::{DEFAULT_THEME, THEMES, ThemeOption};
use crate::traits::{ColorSchemeQuery, KeyValueStore, RootElement, Subscription};

pub const STORAGE_KEY: &str = "alias-assistant-theme";
pub const THEME_ATTRIBUTE: &str = "data-theme";
pub const DARK_CLASS: &str = "dark";
pub const DARK_MEDIA_QUERY: &str = "(prefers-color-scheme: dark)";

/// Owns the active theme name and keeps the root element in sync with it
/// and with the system color scheme.
pub struct ThemeController {
    current_theme: Mutable<String>,
    storage: Rc<dyn KeyValueStore>,
    root: Rc<dyn RootElement>,
    media: Rc<dyn ColorSchemeQuery>,
}

impl ThemeController {
    pub fn new(
        storage: Rc<dyn KeyValueStore>,
        root: Rc<dyn RootElement>,
        media: Rc<dyn ColorSchemeQuery>,
    ) -> Rc<Self> {
        Rc::new(Self {
            current_theme: Mutable::new(DEFAULT_THEME.to_string()),
            storage,
            root,
            media,
        })
    }

    pub fn themes(&self) -> &'static [ThemeOption] {
        THEMES
    }

    pub fn current_theme(&self) -> String {
        self.current_theme.get_cloned()
    }

    pub fn current_theme_signal(&self) -> impl Signal<Item = String> + use<> {
        self.current_theme.signal_cloned()
    }

    /// Applies and persists `theme`. Names outside [`THEMES`] are applied
    /// as given.
    pub fn set_theme(&self, theme: &str) {
        debug!("set theme {}", theme);
        self.current_theme.set(theme.to_string());

        self.root.remove_attribute(THEME_ATTRIBUTE);
        self.root.set_attribute(THEME_ATTRIBUTE, theme);

        self.storage.set(STORAGE_KEY, theme);

        self.update_dark_mode();
    }

    pub fn update_dark_mode(&self) {
        self.root.toggle_class(DARK_CLASS, self.media.prefers_dark());
    }

    pub fn load_theme(&self) {
        let theme = self
            .storage
            .get(STORAGE_KEY)
            .filter(|theme| !theme.is_empty())
            .unwrap_or_else(|| DEFAULT_THEME.to_string());
        self.set_theme(&theme);
    }

    /// Loads the persisted theme and starts following the system color
    /// scheme until the returned [`ThemeMount`] is dropped.
    pub fn mount(this: &Rc<Self>) -> ThemeMount {
        this.load_theme();
        this.update_dark_mode();

        let listener = Rc::downgrade(this);
        let subscription = this.media.subscribe(Rc::new(move || {
            if let Some(controller) = listener.upgrade() {
                controller.update_dark_mode();
            }
        }));

        ThemeMount {
            _subscription: subscription,
        }
    }
}

/// Keeps the color-scheme subscription alive for one mount.
pub struct ThemeMount {
    _subscription: Subscription,
}

#[cfg(test)]
mod test {
    use std::cell::{Cell, RefCell};
    use std::collections::{BTreeSet, HashMap};

    use super::*;

    #[derive(Default)]
    struct MemoryStore {
        values: RefCell<HashMap<String, String>>,
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.values.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) {
            self.values
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
        }
    }

    #[derive(Default)]
    struct FakeRoot {
        attributes: RefCell<Vec<(String, String)>>,
        classes: RefCell<BTreeSet<String>>,
    }

    impl FakeRoot {
        fn attribute_values(&self, name: &str) -> Vec<String> {
            self.attributes
                .borrow()
                .iter()
                .filter(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
                .collect()
        }

        fn has_class(&self, class: &str) -> bool {
            self.classes.borrow().contains(class)
        }
    }

    impl RootElement for FakeRoot {
        fn set_attribute(&self, name: &str, value: &str) {
            let mut attributes = self.attributes.borrow_mut();
            if let Some(entry) = attributes.iter_mut().find(|(key, _)| key == name) {
                entry.1 = value.to_string();
            } else {
                attributes.push((name.to_string(), value.to_string()));
            }
        }

        fn remove_attribute(&self, name: &str) {
            self.attributes.borrow_mut().retain(|(key, _)| key != name);
        }

        fn toggle_class(&self, class: &str, present: bool) {
            let mut classes = self.classes.borrow_mut();
            if present {
                classes.insert(class.to_string());
            } else {
                classes.remove(class);
            }
        }
    }

    #[derive(Default)]
    struct FakeMedia {
        dark: Cell<bool>,
        next_id: Cell<usize>,
        listeners: Rc<RefCell<Vec<(usize, Rc<dyn Fn()>)>>>,
    }

    impl FakeMedia {
        fn change(&self, dark: bool) {
            self.dark.set(dark);
            let listeners = self.listeners.borrow().clone();
            for (_, listener) in listeners {
                listener();
            }
        }

        fn listener_count(&self) -> usize {
            self.listeners.borrow().len()
        }
    }

    impl ColorSchemeQuery for FakeMedia {
        fn prefers_dark(&self) -> bool {
            self.dark.get()
        }

        fn subscribe(&self, listener: Rc<dyn Fn()>) -> Subscription {
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            self.listeners.borrow_mut().push((id, listener));

            let listeners = self.listeners.clone();
            Subscription::new(move || listeners.borrow_mut().retain(|(other, _)| *other != id))
        }
    }

    fn controller() -> (
        Rc<ThemeController>,
        Rc<MemoryStore>,
        Rc<FakeRoot>,
        Rc<FakeMedia>,
    ) {
        let storage = Rc::new(MemoryStore::default());
        let root = Rc::new(FakeRoot::default());
        let media = Rc::new(FakeMedia::default());
        let controller = ThemeController::new(storage.clone(), root.clone(), media.clone());
        (controller, storage, root, media)
    }

    #[test]
    fn test_set_theme_last_write_wins() {
        let (controller, storage, root, _) = controller();

        controller.set_theme("zinc");
        controller.set_theme("zinc");
        controller.set_theme("gray");

        assert_eq!(root.attribute_values(THEME_ATTRIBUTE), vec!["gray"]);
        assert_eq!(controller.current_theme(), "gray");
        assert_eq!(storage.get(STORAGE_KEY).as_deref(), Some("gray"));
    }

    #[test]
    fn test_set_theme_accepts_unknown_name() {
        let (controller, storage, root, _) = controller();

        controller.set_theme("solarized");

        assert_eq!(root.attribute_values(THEME_ATTRIBUTE), vec!["solarized"]);
        assert_eq!(storage.get(STORAGE_KEY).as_deref(), Some("solarized"));
    }

    #[test]
    fn test_load_theme_falls_back_to_default() {
        let (controller, storage, root, _) = controller();

        controller.load_theme();

        assert_eq!(controller.current_theme(), DEFAULT_THEME);
        assert_eq!(root.attribute_values(THEME_ATTRIBUTE), vec![DEFAULT_THEME]);
        assert_eq!(storage.get(STORAGE_KEY).as_deref(), Some(DEFAULT_THEME));
    }

    #[test]
    fn test_load_theme_restores_saved_theme() {
        let (controller, storage, root, _) = controller();
        storage.set(STORAGE_KEY, "neutral");

        controller.load_theme();

        assert_eq!(controller.current_theme(), "neutral");
        assert_eq!(root.attribute_values(THEME_ATTRIBUTE), vec!["neutral"]);
    }

    #[test]
    fn test_update_dark_mode_is_idempotent() {
        let (controller, _, root, media) = controller();
        media.dark.set(true);

        controller.update_dark_mode();
        assert!(root.has_class(DARK_CLASS));
        controller.update_dark_mode();
        assert!(root.has_class(DARK_CLASS));

        media.dark.set(false);
        controller.update_dark_mode();
        controller.update_dark_mode();
        assert!(!root.has_class(DARK_CLASS));
    }

    #[test]
    fn test_mount_follows_system_scheme() {
        let (controller, _, root, media) = controller();

        let mount = ThemeController::mount(&controller);
        assert!(!root.has_class(DARK_CLASS));

        media.change(true);
        assert!(root.has_class(DARK_CLASS));

        drop(mount);
        media.change(false);
        assert!(root.has_class(DARK_CLASS));
    }

    #[test]
    fn test_repeated_mount_does_not_accumulate_listeners() {
        let (controller, _, _, media) = controller();

        for _ in 0..3 {
            let mount = ThemeController::mount(&controller);
            assert_eq!(media.listener_count(), 1);
            drop(mount);
            assert_eq!(media.listener_count(), 0);
        }
    }
}
