use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use futures_signals::signal::Mutable;

use crate::error::Error;
use crate::models::{DownloadEvent, UpdateStatus};
use crate::traits::{PendingUpdate, UpdateSource};

/// Time left for a platform-initiated restart after installation returns.
pub const RESTART_GRACE: Duration = Duration::from_millis(500);

/// Activity indicator for downloads. The plugin does not report a reliable
/// total size, so progress moves in fixed steps and only reaches 100 when
/// the installer reports completion.
pub struct ProgressPolicy;

impl ProgressPolicy {
    pub const STARTED: u8 = 5;
    pub const STEP: u8 = 2;
    pub const CAP: u8 = 95;
    pub const FINISHED: u8 = 100;

    pub fn apply(progress: u8, event: &DownloadEvent) -> u8 {
        match event {
            DownloadEvent::Started { .. } => Self::STARTED,
            DownloadEvent::Progress { chunk_length } if *chunk_length > 0 => {
                progress.saturating_add(Self::STEP).min(Self::CAP)
            }
            DownloadEvent::Progress { .. } => progress,
            DownloadEvent::Finished => Self::FINISHED,
        }
    }
}

pub struct UpdateController<S: UpdateSource> {
    source: S,
    status: Mutable<UpdateStatus>,
    update: RefCell<Option<Rc<S::Update>>>,
}

impl<S: UpdateSource> UpdateController<S> {
    pub fn new(source: S) -> Rc<Self> {
        Rc::new(Self {
            source,
            status: Mutable::new(UpdateStatus::default()),
            update: RefCell::new(None),
        })
    }

    pub fn status(&self) -> &Mutable<UpdateStatus> {
        &self.status
    }

    pub fn snapshot(&self) -> UpdateStatus {
        self.status.get_cloned()
    }

    /// Queries the update source once. Returns whether an update is
    /// available; failures are recorded in the status instead. Only a check
    /// that finds an update leaves a handle for `install_update`.
    pub async fn check_for_update(&self) -> bool {
        self.status.lock_mut().error = None;

        match self.source.check().await {
            Ok(Some(update)) => {
                info!(
                    "update {} available, running {}",
                    update.version(),
                    update.current_version()
                );
                {
                    let mut status = self.status.lock_mut();
                    status.available = true;
                    status.version = Some(update.version().to_string());
                    status.current_version = update.current_version().to_string();
                }
                self.update.replace(Some(Rc::new(update)));
                true
            }
            Ok(None) => {
                info!("no update available");
                {
                    let mut status = self.status.lock_mut();
                    status.available = false;
                    status.version = None;
                }
                self.update.replace(None);
                false
            }
            Err(e) => {
                error!("error checking for update: {}", e);
                {
                    let mut status = self.status.lock_mut();
                    status.error = Some(error_message(&e, "Failed to check for updates"));
                    status.available = false;
                }
                self.update.replace(None);
                false
            }
        }
    }

    /// Downloads and installs the update found by the last check.
    pub async fn install_update(&self) -> Result<(), Error> {
        let update = self
            .update
            .borrow()
            .clone()
            .ok_or(Error::NoUpdateAvailable)?;

        {
            let mut status = self.status.lock_mut();
            status.downloading = true;
            status.error = None;
            status.progress = 0;
        }

        let status = self.status.clone();
        let on_event = Box::new(move |event: DownloadEvent| {
            let mut status = status.lock_mut();
            status.progress = ProgressPolicy::apply(status.progress, &event);
        });

        if let Err(e) = update.download_and_install(on_event).await {
            error!("error installing update {}: {}", update.version(), e);
            let mut status = self.status.lock_mut();
            status.error = Some(error_message(&e, "Failed to install update"));
            status.downloading = false;
            status.progress = 0;
            return Err(e);
        }

        info!("update {} installed, waiting for restart", update.version());
        self.source.pause(RESTART_GRACE).await;

        Ok(())
    }
}

fn error_message(e: &Error, fallback: &str) -> String {
    let message = e.to_string();
    if message.is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
