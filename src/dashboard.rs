//! The analysis session: upload form → results → reset.
//!
//! [`Dashboard`] strings the three stages together. It holds either an
//! upload form or a result view, queues notifications for the front end,
//! and never merges successive uploads: each success replaces the previous
//! result set wholesale.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::Result;
use crate::presenter::export::{self, ExportScope};
use crate::presenter::{ResultView, ViewState};
use crate::types::{ClassificationRecord, Notification, Notifications};
use crate::upload::{CandidateFile, Classifier, UploadSession};

/// Shown after the service returns records.
pub const PROCESSED_MESSAGE: &str = "File processed successfully!";

/// One user's analysis session.
#[derive(Debug, Default)]
pub struct Dashboard {
    upload: UploadSession,
    results: Option<ResultView>,
    notifications: Notifications,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upload(&self) -> &UploadSession {
        &self.upload
    }

    pub fn upload_mut(&mut self) -> &mut UploadSession {
        &mut self.upload
    }

    pub fn results(&self) -> Option<&ResultView> {
        self.results.as_ref()
    }

    pub fn results_mut(&mut self) -> Option<&mut ResultView> {
        self.results.as_mut()
    }

    /// Offer a file to the upload gate. Returns whether it was accepted;
    /// a rejection queues an error notification.
    pub fn select_file(&mut self, file: CandidateFile) -> bool {
        match self.upload.select(file) {
            Ok(()) => true,
            Err(e) => {
                self.notifications.push(Notification::error(e.user_message()));
                false
            }
        }
    }

    /// Send the selected file and, on success, switch to the results stage.
    ///
    /// The busy flag is held for the duration of the request and cleared on
    /// every path out of this function. On failure the selection is kept so
    /// the user can retry.
    pub async fn submit(&mut self, classifier: &dyn Classifier) -> Result<usize> {
        let (_busy, file) = match self.upload.begin_submit() {
            Ok(pending) => pending,
            Err(e) => {
                self.notifications.push(Notification::error(e.user_message()));
                return Err(e);
            }
        };

        match classifier.classify(&file).await {
            Ok(records) => {
                let count = records.len();
                info!(classifier = classifier.name(), records = count, "results received");
                self.show_results(records);
                self.upload.reset();
                self.notifications.push(Notification::success(PROCESSED_MESSAGE));
                Ok(count)
            }
            Err(e) => {
                warn!(classifier = classifier.name(), error = %e, "submission failed");
                self.notifications.push(Notification::error(e.user_message()));
                Err(e)
            }
        }
    }

    /// Replace any current results with `records`.
    pub fn show_results(&mut self, records: Vec<ClassificationRecord>) {
        self.results = Some(ResultView::new(records));
    }

    /// Apply view settings to the current results, if any.
    pub fn set_view(&mut self, state: ViewState) {
        if let Some(view) = self.results.as_mut() {
            view.state = state;
        }
    }

    /// Write an export of the current results.
    ///
    /// Returns `Ok(None)` when there are no results to export.
    pub fn export(&mut self, scope: ExportScope, target: &Path) -> Result<Option<PathBuf>> {
        let Some(view) = self.results.as_ref() else {
            return Ok(None);
        };

        let date = export::today();
        let written = match scope {
            ExportScope::All => export::write_export(target, scope, date, view.records()),
            ExportScope::Filtered => export::write_export(target, scope, date, view.visible()),
        };

        match written {
            Ok(path) => {
                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.notifications
                    .push(Notification::success(format!("Downloaded {filename}")));
                Ok(Some(path))
            }
            Err(e) => {
                self.notifications.push(Notification::error(e.user_message()));
                Err(e)
            }
        }
    }

    /// Back to an empty upload form; results and selection are discarded.
    pub fn reset(&mut self) {
        self.results = None;
        self.upload.reset();
    }

    /// Take all queued notifications, oldest first.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }
}
