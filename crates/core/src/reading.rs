//! Vital-sign readings.
//!
//! Three shapes of the same six measurements live here:
//!
//! - [`VitalReading`]: fully numeric snapshot fed to the scorer.
//! - [`VitalMeasurements`]: the same vitals with every field optional, as read from storage.
//! - [`VitalSignEntry`]: the stored document, tagged with the owning user and a timestamp.

use crate::blood_pressure::leading_systolic;
use fitnest_types::UserId;
use serde::{Deserialize, Serialize};

/// The six vitals that make up a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalKind {
    Pulse,
    Temperature,
    Glucose,
    Spo2,
    RespiratoryRate,
    BloodPressure,
}

impl VitalKind {
    pub const ALL: [VitalKind; 6] = [
        VitalKind::Pulse,
        VitalKind::Temperature,
        VitalKind::Glucose,
        VitalKind::Spo2,
        VitalKind::RespiratoryRate,
        VitalKind::BloodPressure,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VitalKind::Pulse => "pulse",
            VitalKind::Temperature => "temperature",
            VitalKind::Glucose => "glucose",
            VitalKind::Spo2 => "spo2",
            VitalKind::RespiratoryRate => "respiratory_rate",
            VitalKind::BloodPressure => "blood_pressure",
        }
    }

    /// Human-readable label used on the dashboard.
    pub fn label(self) -> &'static str {
        match self {
            VitalKind::Pulse => "Pulse",
            VitalKind::Temperature => "Temperature",
            VitalKind::Glucose => "Glucose",
            VitalKind::Spo2 => "SpO₂",
            VitalKind::RespiratoryRate => "Respiratory Rate",
            VitalKind::BloodPressure => "Blood Pressure",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            VitalKind::Pulse => "bpm",
            VitalKind::Temperature => "°C",
            VitalKind::Glucose => "mg/dL",
            VitalKind::Spo2 => "%",
            VitalKind::RespiratoryRate => "bpm",
            VitalKind::BloodPressure => "mmHg",
        }
    }
}

impl std::fmt::Display for VitalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One snapshot of measured vitals.
///
/// `blood_pressure` is the systolic component only.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VitalReading {
    pub pulse: i32,
    pub temperature: f64,
    pub glucose: i32,
    pub spo2: i32,
    pub respiratory_rate: i32,
    pub blood_pressure: i32,
}

/// The six vitals with each one independently optional.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VitalMeasurements {
    pub pulse: Option<i32>,
    pub temperature: Option<f64>,
    pub glucose: Option<i32>,
    pub spo2: Option<i32>,
    pub respiratory_rate: Option<i32>,
    pub blood_pressure: Option<i32>,
}

impl VitalMeasurements {
    /// Vitals that have no value, in [`VitalKind::ALL`] order.
    pub fn missing(&self) -> Vec<VitalKind> {
        let present = [
            self.pulse.is_some(),
            self.temperature.is_some(),
            self.glucose.is_some(),
            self.spo2.is_some(),
            self.respiratory_rate.is_some(),
            self.blood_pressure.is_some(),
        ];

        VitalKind::ALL
            .into_iter()
            .zip(present)
            .filter_map(|(kind, present)| (!present).then_some(kind))
            .collect()
    }

    /// Substitutes 0 for every absent vital.
    pub fn or_zero(&self) -> VitalReading {
        VitalReading {
            pulse: self.pulse.unwrap_or(0),
            temperature: self.temperature.unwrap_or(0.0),
            glucose: self.glucose.unwrap_or(0),
            spo2: self.spo2.unwrap_or(0),
            respiratory_rate: self.respiratory_rate.unwrap_or(0),
            blood_pressure: self.blood_pressure.unwrap_or(0),
        }
    }

    /// Returns a reading only when all six vitals are present.
    pub fn complete(&self) -> Option<VitalReading> {
        Some(VitalReading {
            pulse: self.pulse?,
            temperature: self.temperature?,
            glucose: self.glucose?,
            spo2: self.spo2?,
            respiratory_rate: self.respiratory_rate?,
            blood_pressure: self.blood_pressure?,
        })
    }
}

impl From<VitalReading> for VitalMeasurements {
    fn from(reading: VitalReading) -> Self {
        Self {
            pulse: Some(reading.pulse),
            temperature: Some(reading.temperature),
            glucose: Some(reading.glucose),
            spo2: Some(reading.spo2),
            respiratory_rate: Some(reading.respiratory_rate),
            blood_pressure: Some(reading.blood_pressure),
        }
    }
}

/// A stored vital-signs document.
///
/// Field names follow the camelCase document layout the mobile client writes. `timestamp` is
/// milliseconds since the Unix epoch and is only used to pick the most recent entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalSignEntry {
    pub user_id: UserId,
    pub timestamp: i64,
    #[serde(default)]
    pub pulse: Option<f64>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub glucose: Option<f64>,
    #[serde(default)]
    pub spo2: Option<f64>,
    #[serde(default)]
    pub respiratory_rate: Option<f64>,
    #[serde(default)]
    pub blood_pressure: Option<String>,
}

impl VitalSignEntry {
    /// Converts the document into optional vitals.
    ///
    /// Integer vitals are truncated toward zero; non-finite values count as absent. Blood
    /// pressure keeps only the leading systolic integer of the stored text.
    pub fn measurements(&self) -> VitalMeasurements {
        fn whole(value: Option<f64>) -> Option<i32> {
            value.filter(|v| v.is_finite()).map(|v| v.trunc() as i32)
        }

        VitalMeasurements {
            pulse: whole(self.pulse),
            temperature: self.temperature.filter(|v| v.is_finite()),
            glucose: whole(self.glucose),
            spo2: whole(self.spo2),
            respiratory_rate: whole(self.respiratory_rate),
            blood_pressure: self.blood_pressure.as_deref().map(leading_systolic),
        }
    }

    /// The stored reading with absent vitals replaced by 0.
    pub fn reading(&self) -> VitalReading {
        self.measurements().or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> VitalSignEntry {
        VitalSignEntry {
            user_id: UserId::new("7").unwrap(),
            timestamp: 1_700_000_000_000,
            pulse: Some(72.9),
            temperature: Some(36.8),
            glucose: Some(101.0),
            spo2: Some(97.0),
            respiratory_rate: Some(16.0),
            blood_pressure: Some("118/76".into()),
        }
    }

    #[test]
    fn measurements_truncate_and_extract_systolic() {
        let m = entry().measurements();
        assert_eq!(m.pulse, Some(72));
        assert_eq!(m.temperature, Some(36.8));
        assert_eq!(m.blood_pressure, Some(118));
        assert!(m.missing().is_empty());
    }

    #[test]
    fn missing_fields_are_listed_in_order() {
        let mut e = entry();
        e.glucose = None;
        e.blood_pressure = None;
        e.pulse = Some(f64::NAN);

        let m = e.measurements();
        assert_eq!(
            m.missing(),
            vec![VitalKind::Pulse, VitalKind::Glucose, VitalKind::BloodPressure]
        );
        assert!(m.complete().is_none());

        let zeroed = m.or_zero();
        assert_eq!(zeroed.pulse, 0);
        assert_eq!(zeroed.glucose, 0);
        assert_eq!(zeroed.blood_pressure, 0);
        assert_eq!(zeroed.spo2, 97);
    }

    #[test]
    fn document_uses_camel_case_and_tolerates_missing_fields() {
        let json = r#"{"userId":"7","timestamp":5,"respiratoryRate":14,"bloodPressure":"120/80"}"#;
        let e: VitalSignEntry = serde_json::from_str(json).unwrap();
        assert_eq!(e.respiratory_rate, Some(14.0));
        assert_eq!(e.pulse, None);

        let out = serde_json::to_value(&e).unwrap();
        assert_eq!(out["userId"], "7");
        assert_eq!(out["bloodPressure"], "120/80");
    }
}
