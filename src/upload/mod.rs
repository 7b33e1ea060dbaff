//! Upload gate and transport.

pub mod gate;
pub mod transport;

pub use gate::{BusyFlag, BusyGuard, CandidateFile, MAX_UPLOAD_BYTES, UploadSession, validate};
pub use transport::{Classifier, ClassifierClient};
