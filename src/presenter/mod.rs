//! Result presenter: statistics, filtering, sorting, export and rendering.
//!
//! Everything here is synchronous and, apart from [`export::write_export`],
//! free of side effects. Derived values are recomputed from the record set
//! and the [`ViewState`] on every call.

pub mod aggregate;
pub mod export;
pub mod render;
pub mod view;

pub use aggregate::{ClusterAggregate, aggregate};
pub use export::{ExportScope, to_csv};
pub use view::{ResultView, SortKey, SortOrder, ViewState, matches, visible};
