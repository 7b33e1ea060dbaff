//! Search, cluster focus and sorting over the record set

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::aggregate::{ClusterAggregate, aggregate};
use crate::types::{ClassificationRecord, ClusterProfile};

/// Column the customer table is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    CustomerId,
    Cluster,
    Monetary,
    Frequency,
    Recency,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::CustomerId,
        SortKey::Cluster,
        SortKey::Monetary,
        SortKey::Frequency,
        SortKey::Recency,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::CustomerId => "customer-id",
            SortKey::Cluster => "cluster",
            SortKey::Monetary => "monetary",
            SortKey::Frequency => "frequency",
            SortKey::Recency => "recency",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "customer-id" | "customer" | "id" => Ok(SortKey::CustomerId),
            "cluster" | "segment" => Ok(SortKey::Cluster),
            "monetary" | "monetary-value" => Ok(SortKey::Monetary),
            "frequency" => Ok(SortKey::Frequency),
            "recency" => Ok(SortKey::Recency),
            other => Err(format!(
                "unknown sort key '{other}' (expected one of: {})",
                SortKey::ALL.map(|k| k.as_str()).join(", ")
            )),
        }
    }
}

/// Direction of the sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortOrder::Asc => "↑",
            SortOrder::Desc => "↓",
        }
    }
}

/// User-controlled view settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Substring matched case-insensitively against customer ids.
    pub search: String,
    /// Cluster pinned for focus, if any.
    pub focus: Option<u32>,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
}

impl ViewState {
    /// Focus `cluster_id`, or clear the focus if it is already focused.
    pub fn toggle_cluster(&mut self, cluster_id: u32) {
        self.focus = if self.focus == Some(cluster_id) {
            None
        } else {
            Some(cluster_id)
        };
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Change the sort column; the direction is kept.
    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
    }

    pub fn toggle_order(&mut self) {
        self.sort_order = self.sort_order.toggle();
    }
}

/// Whether a record passes the search term and cluster focus.
pub fn matches(record: &ClassificationRecord, search: &str, focus: Option<u32>) -> bool {
    let matches_search = record
        .customer_id
        .to_lowercase()
        .contains(&search.to_lowercase());
    let matches_cluster = focus.is_none_or(|id| record.predicted_cluster_id == id);
    matches_search && matches_cluster
}

/// Natural ascending order of two records on `key`.
pub fn compare(a: &ClassificationRecord, b: &ClassificationRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::CustomerId => a.customer_id.cmp(&b.customer_id),
        SortKey::Cluster => a.predicted_cluster_id.cmp(&b.predicted_cluster_id),
        SortKey::Monetary => a
            .rfm_values
            .monetary_value
            .total_cmp(&b.rfm_values.monetary_value),
        SortKey::Frequency => a.rfm_values.frequency.cmp(&b.rfm_values.frequency),
        SortKey::Recency => a.rfm_values.recency.cmp(&b.rfm_values.recency),
    }
}

/// Filter then sort. Equal keys keep their input order in
/// either direction.
pub fn visible<'a>(
    records: &'a [ClassificationRecord],
    state: &ViewState,
) -> Vec<&'a ClassificationRecord> {
    let mut rows: Vec<&ClassificationRecord> = records
        .iter()
        .filter(|r| matches(r, &state.search, state.focus))
        .collect();
    match state.sort_order {
        SortOrder::Asc => rows.sort_by(|a, b| compare(a, b, state.sort_key)),
        SortOrder::Desc => rows.sort_by(|a, b| compare(b, a, state.sort_key)),
    }
    rows
}

/// The result set of one analysis plus the user's view of it.
///
/// Records are fixed for the lifetime of the view; aggregates are computed
/// once from them.
#[derive(Debug, Clone)]
pub struct ResultView {
    records: Vec<ClassificationRecord>,
    aggregates: BTreeMap<u32, ClusterAggregate>,
    pub state: ViewState,
}

impl ResultView {
    pub fn new(records: Vec<ClassificationRecord>) -> Self {
        let aggregates = aggregate(&records);
        Self {
            records,
            aggregates,
            state: ViewState::default(),
        }
    }

    pub fn with_state(mut self, state: ViewState) -> Self {
        self.state = state;
        self
    }

    pub fn records(&self) -> &[ClassificationRecord] {
        &self.records
    }

    pub fn aggregates(&self) -> &BTreeMap<u32, ClusterAggregate> {
        &self.aggregates
    }

    /// Rows currently shown in the customer table.
    pub fn visible(&self) -> Vec<&ClassificationRecord> {
        visible(&self.records, &self.state)
    }

    /// Profile of the focused cluster, when one is focused and known.
    pub fn detail(&self) -> Option<&'static ClusterProfile> {
        self.state.focus.and_then(ClusterProfile::lookup)
    }

    pub fn summary(&self) -> String {
        format!(
            "{} customers analyzed across {} segments",
            self.records.len(),
            self.aggregates.len()
        )
    }
}
