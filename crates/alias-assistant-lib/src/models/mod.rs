pub mod download_event;
pub use download_event::*;

pub mod theme_option;
pub use theme_option::*;

pub mod update_status;
pub use update_status::*;
