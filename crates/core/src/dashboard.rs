//! Presentation model for the vitals dashboard.
//!
//! The dashboard shows a score ring and one progress bar per vital. Progress values are rough
//! visual fractions, not clinical judgements.

use crate::reading::{VitalKind, VitalSignEntry};
use crate::scoring::{estimate_health_score, score_percent};
use serde::{Deserialize, Serialize};

/// Fixed bar fill for blood pressure, which has no single-number scale.
pub const BLOOD_PRESSURE_PROGRESS: f32 = 0.85;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalRow {
    pub kind: VitalKind,
    pub label: String,
    pub icon: String,
    pub value: String,
    /// Bar fill in `[0, 1]`.
    pub progress: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub score: f32,
    pub percent: i32,
    pub rows: Vec<VitalRow>,
}

fn icon(kind: VitalKind) -> &'static str {
    match kind {
        VitalKind::Pulse => "❤️",
        VitalKind::Temperature => "🌡",
        VitalKind::Glucose => "🩸",
        VitalKind::Spo2 => "🫁",
        VitalKind::RespiratoryRate => "🌬",
        VitalKind::BloodPressure => "🩺",
    }
}

fn row(kind: VitalKind, value: String, progress: f32) -> VitalRow {
    VitalRow {
        kind,
        label: kind.label().to_owned(),
        icon: icon(kind).to_owned(),
        value: format!("{value} {}", kind.unit()),
        progress: if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        },
    }
}

/// One row per vital, in [`VitalKind::ALL`] order.
pub fn vital_rows(entry: &VitalSignEntry) -> Vec<VitalRow> {
    let reading = entry.reading();
    let blood_pressure = entry.blood_pressure.clone().unwrap_or_default();

    vec![
        row(
            VitalKind::Pulse,
            reading.pulse.to_string(),
            reading.pulse as f32 / 120.0 * 0.8,
        ),
        VitalRow {
            // No space between the number and °C.
            value: format!("{}°C", reading.temperature),
            ..row(
                VitalKind::Temperature,
                String::new(),
                (reading.temperature as f32 - 35.0) / 5.0,
            )
        },
        row(
            VitalKind::Glucose,
            reading.glucose.to_string(),
            reading.glucose as f32 / 200.0,
        ),
        VitalRow {
            value: format!("{}%", reading.spo2),
            ..row(VitalKind::Spo2, String::new(), reading.spo2 as f32 / 100.0)
        },
        row(
            VitalKind::RespiratoryRate,
            reading.respiratory_rate.to_string(),
            reading.respiratory_rate as f32 / 30.0 * 0.8,
        ),
        row(VitalKind::BloodPressure, blood_pressure, BLOOD_PRESSURE_PROGRESS),
    ]
}

/// Builds the dashboard for the latest entry, if any.
///
/// Without an entry the score is computed from an all-zero reading, matching what the mobile
/// client shows before data arrives, and no rows are produced.
pub fn build_dashboard(latest: Option<&VitalSignEntry>) -> Dashboard {
    let reading = latest.map(VitalSignEntry::reading).unwrap_or_default();
    let score = estimate_health_score(&reading);

    Dashboard {
        score,
        percent: score_percent(score),
        rows: latest.map(vital_rows).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitnest_types::UserId;

    fn entry() -> VitalSignEntry {
        VitalSignEntry {
            user_id: UserId::new("1").unwrap(),
            timestamp: 0,
            pulse: Some(90.0),
            temperature: Some(37.5),
            glucose: Some(250.0),
            spo2: Some(98.0),
            respiratory_rate: Some(15.0),
            blood_pressure: Some("120/80".into()),
        }
    }

    #[test]
    fn rows_follow_display_formulas() {
        let rows = vital_rows(&entry());
        assert_eq!(rows.len(), 6);

        assert_eq!(rows[0].value, "90 bpm");
        assert!((rows[0].progress - 0.6).abs() < 1e-6);

        assert_eq!(rows[1].value, "37.5°C");
        assert!((rows[1].progress - 0.5).abs() < 1e-6);

        // 250 / 200 overflows and is clamped.
        assert_eq!(rows[2].value, "250 mg/dL");
        assert_eq!(rows[2].progress, 1.0);

        assert_eq!(rows[3].value, "98%");
        assert!((rows[3].progress - 0.98).abs() < 1e-6);

        assert_eq!(rows[4].value, "15 bpm");
        assert!((rows[4].progress - 0.4).abs() < 1e-6);

        assert_eq!(rows[5].label, "Blood Pressure");
        assert_eq!(rows[5].value, "120/80 mmHg");
        assert_eq!(rows[5].progress, BLOOD_PRESSURE_PROGRESS);
    }

    #[test]
    fn low_temperature_clamps_to_zero() {
        let mut e = entry();
        e.temperature = Some(30.0);
        assert_eq!(vital_rows(&e)[1].progress, 0.0);
    }

    #[test]
    fn dashboard_without_entry_has_no_rows() {
        let dashboard = build_dashboard(None);
        assert!(dashboard.rows.is_empty());
        assert!((dashboard.score - 0.6).abs() < 1e-4);
    }

    #[test]
    fn dashboard_scores_latest_entry() {
        let dashboard = build_dashboard(Some(&entry()));
        // temperature and glucose fall outside their normal ranges
        let expected = (4.0 + 0.8 + 0.6) / 6.0;
        assert!((dashboard.score - expected).abs() < 1e-4);
        assert_eq!(dashboard.percent, score_percent(dashboard.score));
        assert_eq!(dashboard.rows.len(), 6);
    }
}
