//! Upload gate: accept or reject a file before anything is sent.
//!
//! The gate owns no parsing logic. It checks that a file was chosen, that it
//! looks like CSV, and that it fits under [`MAX_UPLOAD_BYTES`].

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};

use crate::telemetry;
use crate::{Result, SegscopeError};

/// Largest accepted upload: 10 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Media type the service expects.
pub const CSV_MEDIA_TYPE: &str = "text/csv";

/// A file the user picked, described the way a file picker would.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub path: PathBuf,
    /// Display name (usually the final path component).
    pub name: String,
    /// Declared media type; empty when unknown.
    pub media_type: String,
    pub size: u64,
}

impl CandidateFile {
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        media_type: impl Into<String>,
        size: u64,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            media_type: media_type.into(),
            size,
        }
    }

    /// Describe a file on disk. Size comes from metadata; the media type is
    /// guessed from the extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let size = std::fs::metadata(path)?.len();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let media_type = guess_media_type(&name).to_string();
        Ok(Self::new(path, name, media_type, size))
    }

    fn has_csv_name(&self) -> bool {
        self.name.to_ascii_lowercase().ends_with(".csv")
    }
}

fn guess_media_type(name: &str) -> &'static str {
    let lower = name.to_ascii_lowercase();
    match lower.rsplit_once('.').map(|(_, ext)| ext) {
        Some("csv") => CSV_MEDIA_TYPE,
        Some("txt") => "text/plain",
        Some("json") => "application/json",
        Some("xls") => "application/vnd.ms-excel",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "",
    }
}

/// Check a candidate file.
///
/// Rules apply in order: a file must be present, must be CSV by media type
/// or by name, and must not exceed [`MAX_UPLOAD_BYTES`].
pub fn validate(file: Option<&CandidateFile>) -> Result<()> {
    let result = match file {
        None => Err(SegscopeError::NoFileSelected),
        Some(f) if f.media_type != CSV_MEDIA_TYPE && !f.has_csv_name() => {
            Err(SegscopeError::WrongFormat)
        }
        Some(f) => check_size(f),
    };

    if let Err(ref e) = result {
        warn!(
            file = file.map(|f| f.name.as_str()),
            reason = e.kind(),
            "upload rejected"
        );
        metrics::counter!(telemetry::VALIDATION_REJECTIONS_TOTAL, "reason" => e.kind())
            .increment(1);
    }
    result
}

/// Size rule on its own, independent of the format rule.
pub fn check_size(file: &CandidateFile) -> Result<()> {
    if file.size > MAX_UPLOAD_BYTES {
        return Err(SegscopeError::TooLarge {
            size: file.size,
            limit: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

/// Shared "request in flight" flag.
///
/// Cloning shares the flag. At most one [`BusyGuard`] exists at a time.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Mark busy, or fail with [`SegscopeError::Busy`] if already marked.
    pub fn try_acquire(&self) -> Result<BusyGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SegscopeError::Busy)?;
        Ok(BusyGuard(self.0.clone()))
    }
}

/// Clears the busy flag when dropped.
#[derive(Debug)]
pub struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Ephemeral state of the upload form.
#[derive(Debug, Default)]
pub struct UploadSession {
    selected: Option<CandidateFile>,
    busy: BusyFlag,
    drag_hover: bool,
}

impl UploadSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&CandidateFile> {
        self.selected.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    pub fn is_drag_hover(&self) -> bool {
        self.drag_hover
    }

    /// Handle to the busy flag, shared with whoever runs the request.
    pub fn busy_flag(&self) -> BusyFlag {
        self.busy.clone()
    }

    /// Validate and, on success, replace the current selection.
    /// A rejected file leaves the previous selection untouched.
    pub fn select(&mut self, file: CandidateFile) -> Result<()> {
        validate(Some(&file))?;
        debug!(file = %file.name, size = file.size, "file selected");
        self.selected = Some(file);
        Ok(())
    }

    pub fn drag_enter(&mut self) {
        self.drag_hover = true;
    }

    pub fn drag_leave(&mut self) {
        self.drag_hover = false;
    }

    /// Handle a drop: only the first file is considered.
    pub fn drop_files(&mut self, files: Vec<CandidateFile>) -> Result<()> {
        self.drag_hover = false;
        match files.into_iter().next() {
            Some(file) => self.select(file),
            None => Ok(()),
        }
    }

    /// Clear the selection and any drag state.
    pub fn reset(&mut self) {
        self.selected = None;
        self.drag_hover = false;
    }

    /// Re-validate the selection and mark the session busy.
    ///
    /// Returns the file to send and a guard that clears the busy flag when
    /// the request finishes, whatever its outcome.
    pub fn begin_submit(&self) -> Result<(BusyGuard, CandidateFile)> {
        validate(self.selected.as_ref())?;
        let guard = self.busy.try_acquire().inspect_err(|e| {
            metrics::counter!(telemetry::VALIDATION_REJECTIONS_TOTAL, "reason" => e.kind())
                .increment(1);
        })?;
        let file = self.selected.clone().ok_or(SegscopeError::NoFileSelected)?;
        Ok((guard, file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv(name: &str, size: u64) -> CandidateFile {
        CandidateFile::new(name, name, CSV_MEDIA_TYPE, size)
    }

    fn untyped(name: &str, size: u64) -> CandidateFile {
        CandidateFile::new(name, name, "", size)
    }

    #[test]
    fn missing_file_is_rejected() {
        assert!(matches!(validate(None), Err(SegscopeError::NoFileSelected)));
    }

    #[test]
    fn csv_by_name_or_type_is_accepted() {
        assert!(validate(Some(&untyped("data.csv", 10))).is_ok());
        assert!(validate(Some(&untyped("DATA.CSV", 10))).is_ok());
        assert!(validate(Some(&csv("export", 10))).is_ok());
    }

    #[test]
    fn non_csv_is_wrong_format() {
        for name in ["data.txt", "data.csv.gz", "csv", "data.xlsx"] {
            let result = validate(Some(&untyped(name, 10)));
            assert!(matches!(result, Err(SegscopeError::WrongFormat)), "{name}");
        }
        let typed = CandidateFile::new("a.json", "a.json", "application/json", 10);
        assert!(matches!(
            validate(Some(&typed)),
            Err(SegscopeError::WrongFormat)
        ));
    }

    #[test]
    fn size_limit_is_inclusive() {
        assert!(validate(Some(&csv("a.csv", MAX_UPLOAD_BYTES))).is_ok());
        assert!(matches!(
            validate(Some(&csv("a.csv", MAX_UPLOAD_BYTES + 1))),
            Err(SegscopeError::TooLarge { .. })
        ));
    }

    #[test]
    fn check_size_ignores_extension() {
        for name in ["a.csv", "a.txt", "noext"] {
            assert!(matches!(
                check_size(&untyped(name, MAX_UPLOAD_BYTES * 2)),
                Err(SegscopeError::TooLarge { .. })
            ));
        }
    }

    #[test]
    fn rejected_selection_keeps_previous() {
        let mut session = UploadSession::new();
        session.select(csv("first.csv", 1)).unwrap();
        assert!(session.select(untyped("second.pdf", 1)).is_err());
        assert_eq!(session.selected().unwrap().name, "first.csv");

        session.select(csv("third.csv", 1)).unwrap();
        assert_eq!(session.selected().unwrap().name, "third.csv");
    }

    #[test]
    fn drop_takes_first_file_and_clears_hover() {
        let mut session = UploadSession::new();
        session.drag_enter();
        assert!(session.is_drag_hover());
        session
            .drop_files(vec![csv("one.csv", 1), csv("two.csv", 1)])
            .unwrap();
        assert!(!session.is_drag_hover());
        assert_eq!(session.selected().unwrap().name, "one.csv");
    }

    #[test]
    fn reset_clears_selection() {
        let mut session = UploadSession::new();
        session.select(csv("a.csv", 1)).unwrap();
        session.drag_enter();
        session.reset();
        assert!(session.selected().is_none());
        assert!(!session.is_drag_hover());
    }

    #[test]
    fn begin_submit_requires_selection() {
        let session = UploadSession::new();
        assert!(matches!(
            session.begin_submit(),
            Err(SegscopeError::NoFileSelected)
        ));
        assert!(!session.is_busy());
    }

    #[test]
    fn busy_session_refuses_second_submit() {
        let mut session = UploadSession::new();
        session.select(csv("a.csv", 1)).unwrap();

        let (guard, file) = session.begin_submit().unwrap();
        assert_eq!(file.name, "a.csv");
        assert!(session.is_busy());
        assert!(matches!(session.begin_submit(), Err(SegscopeError::Busy)));

        drop(guard);
        assert!(!session.is_busy());
        assert!(session.begin_submit().is_ok());
    }

    #[test]
    fn from_path_reads_size_and_guesses_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("customers.csv");
        std::fs::write(&path, "Invoice,StockCode\n1,2\n").unwrap();

        let file = CandidateFile::from_path(&path).unwrap();
        assert_eq!(file.name, "customers.csv");
        assert_eq!(file.media_type, CSV_MEDIA_TYPE);
        assert_eq!(file.size, 22);
    }

    #[test]
    fn from_path_missing_file_is_io_error() {
        let result = CandidateFile::from_path("/nonexistent/customers.csv");
        assert!(matches!(result, Err(SegscopeError::Io(_))));
    }
}
