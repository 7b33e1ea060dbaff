//! Properties of the result presenter: aggregation, filter + sort, focus,
//! export layout and the empty-result case.

use segscope::presenter::export::{csv_row, to_csv};
use segscope::presenter::render::{NO_CUSTOMERS_MESSAGE, render_dashboard};
use segscope::presenter::{ResultView, SortKey, SortOrder, ViewState, aggregate, visible};
use segscope::{ClassificationRecord, RfmValues};

fn record(id: &str, cluster: u32, monetary: f64, frequency: u64, recency: u64) -> ClassificationRecord {
    ClassificationRecord {
        customer_id: id.to_string(),
        predicted_cluster_id: cluster,
        cluster_name: format!("Segment {cluster}"),
        rfm_values: RfmValues {
            monetary_value: monetary,
            frequency,
            recency,
        },
        cluster_interpretation: String::new(),
        cluster_recommendations: Vec::new(),
    }
}

fn sample() -> Vec<ClassificationRecord> {
    vec![
        record("12345", 0, 250.0, 4, 12),
        record("99999", 1, 40.0, 1, 300),
        record("A123B", 3, 5100.0, 25, 1),
        record("77123", 0, 250.0, 6, 20),
        record("55555", 2, 80.0, 2, 90),
        record("x1234", 1, 15.5, 1, 210),
        record("00123", 3, 3900.0, 18, 3),
    ]
}

#[test]
fn aggregate_counts_and_means_match_groups() {
    let records = sample();
    let stats = aggregate(&records);

    for (id, agg) in &stats {
        let members: Vec<&ClassificationRecord> = records
            .iter()
            .filter(|r| r.predicted_cluster_id == *id)
            .collect();
        let n = members.len() as f64;
        assert_eq!(agg.count, members.len());

        let mean_m = members.iter().map(|r| r.rfm_values.monetary_value).sum::<f64>() / n;
        let mean_f = members.iter().map(|r| r.rfm_values.frequency as f64).sum::<f64>() / n;
        let mean_r = members.iter().map(|r| r.rfm_values.recency as f64).sum::<f64>() / n;
        assert!((agg.avg_monetary - mean_m).abs() < 1e-9);
        assert!((agg.avg_frequency - mean_f).abs() < 1e-9);
        assert!((agg.avg_recency - mean_r).abs() < 1e-9);
    }
    assert_eq!(stats.values().map(|a| a.count).sum::<usize>(), records.len());
}

#[test]
fn search_then_monetary_desc() {
    let records = sample();
    let state = ViewState {
        search: "123".to_string(),
        sort_key: SortKey::Monetary,
        sort_order: SortOrder::Desc,
        ..Default::default()
    };
    let rows = visible(&records, &state);

    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|r| r.customer_id.contains("123")));
    assert!(
        rows.windows(2)
            .all(|w| w[0].rfm_values.monetary_value >= w[1].rfm_values.monetary_value)
    );
    // equal monetary values keep input order
    let ids: Vec<&str> = rows.iter().map(|r| r.customer_id.as_str()).collect();
    assert_eq!(ids, vec!["A123B", "00123", "12345", "77123", "x1234"]);
}

#[test]
fn focus_and_search_combine() {
    let records = sample();
    let mut state = ViewState {
        search: "123".to_string(),
        ..Default::default()
    };
    state.toggle_cluster(3);
    let ids: Vec<&str> = visible(&records, &state)
        .iter()
        .map(|r| r.customer_id.as_str())
        .collect();
    assert_eq!(ids, vec!["00123", "A123B"]);
}

#[test]
fn every_sort_key_orders_monotonically() {
    let records = sample();
    for key in SortKey::ALL {
        let state = ViewState {
            sort_key: key,
            ..Default::default()
        };
        let rows = visible(&records, &state);
        assert_eq!(rows.len(), records.len());
        assert!(
            rows.windows(2).all(|w| {
                segscope::presenter::view::compare(w[0], w[1], key) != std::cmp::Ordering::Greater
            }),
            "{key}"
        );
    }
}

#[test]
fn focus_toggle_round_trip() {
    let mut state = ViewState::default();
    state.toggle_cluster(2);
    state.toggle_cluster(2);
    assert_eq!(state.focus, None);

    state.toggle_cluster(2);
    state.toggle_cluster(3);
    assert_eq!(state.focus, Some(3));
}

#[test]
fn export_row_layout() {
    let record = ClassificationRecord {
        customer_id: "C1".to_string(),
        predicted_cluster_id: 3,
        cluster_name: "Champions & VIPs".to_string(),
        rfm_values: RfmValues {
            monetary_value: 1234.5,
            frequency: 10,
            recency: 2,
        },
        cluster_interpretation: "...".to_string(),
        cluster_recommendations: vec!["a".to_string(), "b".to_string()],
    };
    assert_eq!(
        csv_row(&record),
        r#"C1,3,Champions & VIPs,1234.50,10,2,"...","a; b""#
    );
}

#[test]
fn empty_result_set_end_to_end() {
    let view = ResultView::new(Vec::new());

    assert!(view.aggregates().is_empty());
    assert!(view.visible().is_empty());
    assert!(render_dashboard(&view).contains(NO_CUSTOMERS_MESSAGE));
    assert_eq!(view.summary(), "0 customers analyzed across 0 segments");

    let csv = to_csv(view.records());
    assert_eq!(csv.lines().count(), 1);
    assert!(csv.starts_with("Customer ID,Cluster ID,"));
}
