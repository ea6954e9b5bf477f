//! Channel-specific post-fetch column cleanup.

use pulse_core::error::PulseResult;
use pulse_core::frame::ReportFrame;
use serde_json::Value;

/// Micros-to-units divisor for vendor cost columns.
const MICROS_PER_UNIT: f64 = 1_000_000.0;

const GOOGLE_COST_MICROS: &str = "metrics_cost_micros";
const GOOGLE_DROPPED_COLUMNS: [&str; 2] = [
    "metrics_conversions_value",
    "campaign_selective_optimization_conversion_actions",
];

/// Google Ads cleanup: `#` separators become `_`, cost leaves micros and is
/// renamed `cost`, the raw conversion-value and selective-optimization
/// columns are dropped, and `installs` isolates conversions not already
/// attributed to a selected conversion action.
pub fn google_ads(mut report: ReportFrame) -> PulseResult<ReportFrame> {
    report.rename_columns(|name| name.replace('#', "_"));
    report.scale_column(GOOGLE_COST_MICROS, MICROS_PER_UNIT)?;
    report.rename_column(GOOGLE_COST_MICROS, "cost")?;
    report.drop_columns(&GOOGLE_DROPPED_COLUMNS);

    let total = report.numeric_column("total_conversions")?;
    let selected = report.numeric_column("selected_conversions")?;
    let installs = total
        .iter()
        .zip(&selected)
        .map(|(t, s)| Value::from(t - s))
        .collect();
    report.append_column("installs", installs)?;
    Ok(report)
}

/// Snapchat cleanup: spend arrives in micros.
pub fn snapchat(mut report: ReportFrame) -> PulseResult<ReportFrame> {
    report.scale_column("spend", MICROS_PER_UNIT)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::error::PulseError;
    use serde_json::json;

    fn google_stub() -> ReportFrame {
        let mut frame = ReportFrame::new(vec![
            "campaign#id".to_string(),
            "metrics#cost_micros".to_string(),
            "metrics#conversions_value".to_string(),
            "campaign#selective_optimization#conversion_actions".to_string(),
            "total_conversions".to_string(),
            "selected_conversions".to_string(),
        ]);
        frame
            .push_row(vec![
                json!("123"),
                json!(2_000_000),
                json!(14.5),
                json!("[]"),
                json!(10),
                json!(3),
            ])
            .unwrap();
        frame
    }

    #[test]
    fn test_google_ads_separators_and_cost() {
        let report = google_ads(google_stub()).unwrap();
        assert!(report.has_column("campaign_id"));
        assert!(!report.has_column("campaign#id"));
        assert_eq!(report.numeric_column("cost").unwrap(), vec![2.0]);
        assert!(!report.has_column("metrics_cost_micros"));
    }

    #[test]
    fn test_google_ads_drops_raw_conversion_columns() {
        let report = google_ads(google_stub()).unwrap();
        assert!(!report.has_column("metrics_conversions_value"));
        assert!(!report.has_column("campaign_selective_optimization_conversion_actions"));
    }

    #[test]
    fn test_google_ads_derives_installs() {
        let report = google_ads(google_stub()).unwrap();
        assert_eq!(report.numeric_column("installs").unwrap(), vec![7.0]);
    }

    #[test]
    fn test_google_ads_requires_cost_column() {
        let frame = ReportFrame::new(vec!["campaign#id".to_string()]);
        let err = google_ads(frame).unwrap_err();
        assert!(matches!(err, PulseError::UnknownColumn(c) if c == "metrics_cost_micros"));
    }

    #[test]
    fn test_snapchat_spend_leaves_micros() {
        let mut frame = ReportFrame::new(vec![
            "id".to_string(),
            "name".to_string(),
            "spend".to_string(),
        ]);
        frame
            .push_row(vec![json!("a-1"), json!("Squad A"), json!(5_000_000)])
            .unwrap();
        let report = snapchat(frame).unwrap();
        assert_eq!(report.numeric_column("spend").unwrap(), vec![5.0]);
    }
}
