pub use crate::error::Error;
pub use crate::models::*;
pub use crate::route::Route;
pub use crate::theme::{ThemeController, ThemeMount};
pub use crate::traits::*;
pub use crate::updater::{ProgressPolicy, UpdateController};
