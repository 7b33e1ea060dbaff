//! Per-segment statistics over a record set

use std::collections::BTreeMap;

use crate::types::ClassificationRecord;

/// Count, totals and means for one cluster id.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterAggregate {
    pub cluster_id: u32,
    /// Display name, taken from the first record seen for this cluster.
    pub name: String,
    pub count: usize,
    pub total_monetary: f64,
    pub total_frequency: u64,
    pub total_recency: u64,
    pub avg_monetary: f64,
    pub avg_frequency: f64,
    pub avg_recency: f64,
}

impl ClusterAggregate {
    fn empty(cluster_id: u32, name: &str) -> Self {
        Self {
            cluster_id,
            name: name.to_string(),
            count: 0,
            total_monetary: 0.0,
            total_frequency: 0,
            total_recency: 0,
            avg_monetary: 0.0,
            avg_frequency: 0.0,
            avg_recency: 0.0,
        }
    }

    fn add(&mut self, record: &ClassificationRecord) {
        self.count += 1;
        self.total_monetary += record.rfm_values.monetary_value;
        self.total_frequency += record.rfm_values.frequency;
        self.total_recency += record.rfm_values.recency;
    }

    fn finish(&mut self) {
        // count is never zero here: an entry exists only once a record was added
        let n = self.count as f64;
        self.avg_monetary = self.total_monetary / n;
        self.avg_frequency = self.total_frequency as f64 / n;
        self.avg_recency = self.total_recency as f64 / n;
    }
}

/// Group records by cluster id and compute count and means per group.
///
/// Keys come back in ascending cluster id order. An empty slice yields an
/// empty map.
pub fn aggregate(records: &[ClassificationRecord]) -> BTreeMap<u32, ClusterAggregate> {
    let mut stats: BTreeMap<u32, ClusterAggregate> = BTreeMap::new();
    for record in records {
        stats
            .entry(record.predicted_cluster_id)
            .or_insert_with(|| {
                ClusterAggregate::empty(record.predicted_cluster_id, &record.cluster_name)
            })
            .add(record);
    }
    stats.values_mut().for_each(ClusterAggregate::finish);
    stats
}
