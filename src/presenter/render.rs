//! Terminal rendering of the results dashboard.

use comfy_table::{
    Attribute, Cell, Color, ContentArrangement, Table, modifiers::UTF8_ROUND_CORNERS,
    presets::UTF8_FULL,
};

use super::view::ResultView;
use crate::types::{ClassificationRecord, ClusterProfile};

/// Shown in place of the customer table when nothing matches.
pub const NO_CUSTOMERS_MESSAGE: &str = "No customers found matching your criteria.";

/// Marker put in front of the focused segment.
const FOCUS_MARKER: &str = "▶ ";

/// Colour associated with a cluster id; unknown ids are grey.
pub fn cluster_color(cluster_id: u32) -> Color {
    match cluster_id {
        0 => Color::Blue,
        1 => Color::Red,
        2 => Color::Yellow,
        3 => Color::Green,
        _ => Color::Grey,
    }
}

/// `$1234.50`
pub fn format_money(value: f64) -> String {
    format!("${value:.2}")
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header<const N: usize>(titles: [&str; N]) -> Vec<Cell> {
    titles
        .into_iter()
        .map(|t| Cell::new(t).add_attribute(Attribute::Bold))
        .collect()
}

/// One row per segment: name, size and average RFM values.
pub fn render_segments(view: &ResultView) -> String {
    let mut table = new_table();
    table.set_header(header([
        "Segment",
        "Customers",
        "Avg Monetary",
        "Avg Frequency",
        "Avg Recency",
    ]));

    for (id, stats) in view.aggregates() {
        let focused = view.state.focus == Some(*id);
        let label = if focused {
            format!("{FOCUS_MARKER}{}", stats.name)
        } else {
            stats.name.clone()
        };
        let mut name = Cell::new(label).fg(cluster_color(*id));
        if focused {
            name = name.add_attribute(Attribute::Bold);
        }
        table.add_row(vec![
            name,
            Cell::new(stats.count),
            Cell::new(format_money(stats.avg_monetary)),
            Cell::new(format!("{:.1}", stats.avg_frequency)),
            Cell::new(format!("{:.1}", stats.avg_recency)),
        ]);
    }
    table.to_string()
}

/// Name, interpretation and recommendations of one segment.
pub fn render_detail(profile: &ClusterProfile) -> String {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new(profile.name)
            .fg(cluster_color(profile.id))
            .add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new(profile.interpretation)]);

    let bullets = profile
        .recommendations
        .iter()
        .map(|rec| format!("• {rec}"))
        .collect::<Vec<_>>()
        .join("\n");
    table.add_row(vec![Cell::new(format!("Recommendations:\n{bullets}"))]);
    table.to_string()
}

/// The customer table, or [`NO_CUSTOMERS_MESSAGE`] when `rows` is empty.
pub fn render_customers(rows: &[&ClassificationRecord]) -> String {
    if rows.is_empty() {
        return NO_CUSTOMERS_MESSAGE.to_string();
    }

    let mut table = new_table();
    table.set_header(header([
        "Customer ID",
        "Segment",
        "Monetary Value",
        "Frequency",
        "Recency",
    ]));
    for record in rows {
        let rfm = &record.rfm_values;
        table.add_row(vec![
            Cell::new(&record.customer_id),
            Cell::new(&record.cluster_name).fg(cluster_color(record.predicted_cluster_id)),
            Cell::new(format_money(rfm.monetary_value)),
            Cell::new(rfm.frequency),
            Cell::new(rfm.recency),
        ]);
    }
    table.to_string()
}

/// Full dashboard: summary, segments, focused detail and customers.
pub fn render_dashboard(view: &ResultView) -> String {
    let state = &view.state;
    let mut out = vec![view.summary(), render_segments(view)];

    if let Some(profile) = view.detail() {
        out.push(render_detail(profile));
    }

    let mut filters = vec![format!(
        "sorted by {} {}",
        state.sort_key,
        state.sort_order.arrow()
    )];
    if !state.search.is_empty() {
        filters.push(format!("search \"{}\"", state.search));
    }
    if let Some(id) = state.focus {
        filters.push(format!("segment {id}"));
    }
    out.push(filters.join(", "));

    out.push(render_customers(&view.visible()));
    out.join("\n\n")
}

/// Every known segment profile.
pub fn render_profiles() -> String {
    ClusterProfile::all()
        .iter()
        .map(|p| format!("[{}]\n{}", p.id, render_detail(p)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RfmValues;

    fn record(id: &str, cluster: u32, name: &str) -> ClassificationRecord {
        ClassificationRecord {
            customer_id: id.to_string(),
            predicted_cluster_id: cluster,
            cluster_name: name.to_string(),
            rfm_values: RfmValues {
                monetary_value: 42.0,
                frequency: 3,
                recency: 12,
            },
            cluster_interpretation: String::new(),
            cluster_recommendations: Vec::new(),
        }
    }

    #[test]
    fn unknown_cluster_is_grey() {
        assert_eq!(cluster_color(3), Color::Green);
        assert_eq!(cluster_color(9), Color::Grey);
    }

    #[test]
    fn empty_customers_message() {
        assert_eq!(render_customers(&[]), NO_CUSTOMERS_MESSAGE);
    }

    #[test]
    fn dashboard_shows_segments_and_rows() {
        let view = ResultView::new(vec![
            record("12346", 1, "At-Risk & Dormant"),
            record("17850", 3, "Champions & VIPs"),
        ]);
        let out = render_dashboard(&view);
        assert!(out.contains("2 customers analyzed across 2 segments"));
        assert!(out.contains("At-Risk & Dormant"));
        assert!(out.contains("17850"));
        assert!(out.contains("$42.00"));
        assert!(!out.contains("Recommendations:"));
    }

    #[test]
    fn focused_known_segment_shows_detail() {
        let mut view = ResultView::new(vec![record("a", 0, "Loyal & Engaged")]);
        view.state.toggle_cluster(0);
        let out = render_dashboard(&view);
        assert!(out.contains(FOCUS_MARKER));
        assert!(out.contains("Recommendations:"));
        assert!(out.contains("tiered rewards"));
    }

    #[test]
    fn focused_unknown_segment_renders_without_detail() {
        let mut view = ResultView::new(vec![record("a", 11, "Mystery")]);
        view.state.toggle_cluster(11);
        let out = render_dashboard(&view);
        assert!(out.contains("Mystery"));
        assert!(!out.contains("Recommendations:"));
    }

    #[test]
    fn profiles_listing_has_all_segments() {
        let out = render_profiles();
        for profile in ClusterProfile::all() {
            assert!(out.contains(profile.name));
        }
    }
}
