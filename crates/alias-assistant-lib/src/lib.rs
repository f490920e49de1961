#[macro_use]
extern crate log;

pub mod error;
pub mod models;
pub mod prelude;
pub mod route;
pub mod theme;
pub mod traits;
pub mod updater;

/// Version of the frontend build, shown next to the update status.
pub static APP_VERSION: &str = env!("CARGO_PKG_VERSION");
