//! Per-customer classification records returned by the service

use serde::{Deserialize, Deserializer, Serialize};

/// One customer's classification result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    #[serde(deserialize_with = "customer_id_from_json")]
    pub customer_id: String,
    pub predicted_cluster_id: u32,
    pub cluster_name: String,
    pub rfm_values: RfmValues,
    #[serde(default)]
    pub cluster_interpretation: String,
    #[serde(default)]
    pub cluster_recommendations: Vec<String>,
}

/// Recency / Frequency / Monetary scores for one customer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RfmValues {
    /// Total spend.
    #[serde(rename = "MonetaryValue")]
    pub monetary_value: f64,
    /// Number of transactions.
    #[serde(rename = "Frequency")]
    pub frequency: u64,
    /// Days since last activity.
    #[serde(rename = "Recency")]
    pub recency: u64,
}

/// Parse a service response body into records.
pub fn parse_records(body: &str) -> crate::Result<Vec<ClassificationRecord>> {
    Ok(serde_json::from_str(body)?)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCustomerId {
    Text(String),
    Integer(i64),
    Float(f64),
}

// The source dataset stores "Customer ID" as a float column, so the service
// may echo it back as `12346.0` rather than `"12346"`.
fn customer_id_from_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawCustomerId::deserialize(deserializer)? {
        RawCustomerId::Text(s) => s,
        RawCustomerId::Integer(n) => n.to_string(),
        RawCustomerId::Float(f) if f.fract() == 0.0 => format!("{f:.0}"),
        RawCustomerId::Float(f) => f.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_record_with_string_id() {
        let json = r#"[{
            "customer_id": "C1",
            "predicted_cluster_id": 3,
            "cluster_name": "Champions & VIPs",
            "rfm_values": {"MonetaryValue": 1234.5, "Frequency": 10, "Recency": 2},
            "cluster_interpretation": "best",
            "cluster_recommendations": ["a", "b"]
        }]"#;
        let records = parse_records(json).unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.customer_id, "C1");
        assert_eq!(r.predicted_cluster_id, 3);
        assert_eq!(r.rfm_values.frequency, 10);
        assert_eq!(r.rfm_values.recency, 2);
        assert!((r.rfm_values.monetary_value - 1234.5).abs() < f64::EPSILON);
        assert_eq!(r.cluster_recommendations, vec!["a", "b"]);
    }

    #[test]
    fn numeric_customer_ids_become_strings() {
        let json = r#"[
            {"customer_id": 12346.0, "predicted_cluster_id": 1, "cluster_name": "x",
             "rfm_values": {"MonetaryValue": 0.0, "Frequency": 1, "Recency": 300}},
            {"customer_id": 17850, "predicted_cluster_id": 0, "cluster_name": "y",
             "rfm_values": {"MonetaryValue": 5.0, "Frequency": 2, "Recency": 1}}
        ]"#;
        let records = parse_records(json).unwrap();
        assert_eq!(records[0].customer_id, "12346");
        assert_eq!(records[1].customer_id, "17850");
        assert!(records[0].cluster_recommendations.is_empty());
    }

    #[test]
    fn object_body_is_rejected() {
        assert!(parse_records(r#"{"message": "ok"}"#).is_err());
    }
}
