//! Segscope - customer segmentation dashboard client
//!
//! Uploads a CSV of customer transactions to an external classification
//! service and presents the returned per-customer segments: per-segment
//! statistics, search, cluster focus, sorting and CSV export.
//!
//! The pipeline has three stages:
//! - [`upload::gate`] accepts or rejects a file before anything is sent
//! - [`upload::transport`] posts the file and maps failures to [`SegscopeError`]
//! - [`presenter`] aggregates, filters, sorts, exports and renders the records
//!
//! [`Dashboard`] drives them as one session.
//!
//! # Example
//!
//! ```rust,no_run
//! use segscope::{CandidateFile, ClassifierClient, Config, Dashboard};
//!
//! #[tokio::main]
//! async fn main() -> segscope::Result<()> {
//!     let config = Config::load(None)?;
//!     let client = ClassifierClient::new(&config)?;
//!
//!     let mut dashboard = Dashboard::new();
//!     dashboard.select_file(CandidateFile::from_path("transactions.csv")?);
//!     dashboard.submit(&client).await?;
//!
//!     if let Some(view) = dashboard.results() {
//!         println!("{}", segscope::presenter::render::render_dashboard(view));
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dashboard;
pub mod error;
pub mod presenter;
pub mod telemetry;
pub mod types;
pub mod upload;

/// Package version from Cargo.toml.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

pub use config::Config;
pub use dashboard::Dashboard;
pub use error::{Result, SegscopeError};
pub use presenter::{ClusterAggregate, ExportScope, ResultView, SortKey, SortOrder, ViewState};
pub use types::{
    ClassificationRecord, ClusterProfile, Notification, NotificationLevel, RfmValues,
};
pub use upload::{CandidateFile, Classifier, ClassifierClient, UploadSession};

/// Columns the classification service expects in the uploaded CSV.
///
/// Advisory only: the client never parses the file.
pub const EXPECTED_COLUMNS: [&str; 8] = [
    "Invoice",
    "StockCode",
    "Description",
    "Quantity",
    "InvoiceDate",
    "Price",
    "Customer ID",
    "Country",
];
