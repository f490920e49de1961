use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("No update available")]
    NoUpdateAvailable,
    #[error("{0}")]
    Updater(String),
}
