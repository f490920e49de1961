#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Settings,
    NotFound,
}

impl Route {
    pub const ALL: [Route; 2] = [Route::Home, Route::Settings];

    pub fn from_path(pathname: &str) -> Self {
        let mut paths = pathname.split('/').collect::<Vec<_>>();
        paths.retain(|path| !path.is_empty());

        match paths.as_slice() {
            [] => Route::Home,
            ["settings"] => Route::Settings,
            _ => Route::NotFound,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Settings => "settings",
            Route::NotFound => "not-found",
        }
    }

    pub fn url(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Settings => "/settings".to_string(),
            Route::NotFound => "/notfound".to_string(),
        }
    }
}
