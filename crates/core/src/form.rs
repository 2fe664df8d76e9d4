//! Vital-sign entry form validation.
//!
//! The form arrives as six raw strings exactly as the user typed them. Validation collects an
//! error for every bad field rather than stopping at the first one, so the caller can flag
//! them all at once.

use crate::blood_pressure::BloodPressure;
use crate::error::FieldError;
use crate::reading::VitalKind;
use crate::{VitalsError, VitalsResult};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Raw form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalSignForm {
    #[serde(default)]
    pub pulse: String,
    #[serde(default)]
    pub temperature: String,
    #[serde(default)]
    pub glucose: String,
    #[serde(default)]
    pub spo2: String,
    #[serde(default)]
    pub respiratory_rate: String,
    #[serde(default)]
    pub blood_pressure: String,
}

/// A validated submission, not yet tied to a user or a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVitalSign {
    pub pulse: f64,
    pub temperature: f64,
    pub glucose: f64,
    pub spo2: f64,
    pub respiratory_rate: f64,
    /// Normalized text, either `S/D` or a whole systolic number.
    pub blood_pressure: String,
}

/// Physically plausible domain for each vital. Values outside are treated as typos.
pub fn expected_domain(kind: VitalKind) -> RangeInclusive<f64> {
    match kind {
        VitalKind::Pulse => 0.0..=300.0,
        VitalKind::Temperature => 30.0..=45.0,
        VitalKind::Glucose => 0.0..=600.0,
        VitalKind::Spo2 => 0.0..=100.0,
        VitalKind::RespiratoryRate => 0.0..=60.0,
        VitalKind::BloodPressure => 0.0..=300.0,
    }
}

fn check_domain(kind: VitalKind, value: f64, errors: &mut Vec<FieldError>) {
    let domain = expected_domain(kind);
    if !domain.contains(&value) {
        errors.push(FieldError {
            field: kind.as_str(),
            message: format!(
                "{value} is outside {}..={} {}",
                domain.start(),
                domain.end(),
                kind.unit()
            ),
        });
    }
}

fn parse_number(kind: VitalKind, raw: &str, errors: &mut Vec<FieldError>) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => {
            check_domain(kind, value, errors);
            value
        }
        _ => {
            errors.push(FieldError {
                field: kind.as_str(),
                message: format!("invalid {} value", kind.label().to_lowercase()),
            });
            0.0
        }
    }
}

impl VitalSignForm {
    /// Validates every field.
    ///
    /// # Errors
    ///
    /// Returns `VitalsError::InvalidForm` listing every field that is not a finite number within
    /// its expected domain, or (for blood pressure) not in `S/D` or plain-number form.
    pub fn validate(&self) -> VitalsResult<NewVitalSign> {
        let mut errors = Vec::new();

        let pulse = parse_number(VitalKind::Pulse, &self.pulse, &mut errors);
        let temperature = parse_number(VitalKind::Temperature, &self.temperature, &mut errors);
        let glucose = parse_number(VitalKind::Glucose, &self.glucose, &mut errors);
        let spo2 = parse_number(VitalKind::Spo2, &self.spo2, &mut errors);
        let respiratory_rate =
            parse_number(VitalKind::RespiratoryRate, &self.respiratory_rate, &mut errors);

        // Stored text is scored by its leading integer, so keep only the canonical form.
        let blood_pressure = match self.blood_pressure.trim().parse::<BloodPressure>() {
            Ok(bp) => {
                check_domain(VitalKind::BloodPressure, f64::from(bp.systolic), &mut errors);
                bp.to_string()
            }
            Err(_) => {
                errors.push(FieldError {
                    field: VitalKind::BloodPressure.as_str(),
                    message: "invalid blood pressure format (expected systolic/diastolic)".into(),
                });
                String::new()
            }
        };

        if !errors.is_empty() {
            return Err(VitalsError::InvalidForm(errors));
        }

        Ok(NewVitalSign {
            pulse,
            temperature,
            glucose,
            spo2,
            respiratory_rate,
            blood_pressure,
        })
    }
}
