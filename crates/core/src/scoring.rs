//! Vital-sign health score.
//!
//! Each vital is banded against its clinically normal range:
//!
//! | Band | Partial score |
//! |---|---|
//! | inside `[min, max]` | 1.0 |
//! | inside `[min - 5, max + 5]` | 0.8 |
//! | anywhere else | 0.6 |
//!
//! SpO₂ uses its own three-tier rule (see [`score_spo2`]). The composite score is the mean of
//! the six partial scores. Every function here is pure and total over finite input; this is a
//! visualisation aid, not a medical validator.

use crate::constants::{
    GLUCOSE_RANGE, PULSE_RANGE, RESPIRATORY_RATE_RANGE, SPO2_LOW_MIN, SPO2_NORMAL_MIN,
    SYSTOLIC_RANGE, TEMPERATURE_RANGE, TOLERANCE_BAND,
};
use crate::reading::{VitalKind, VitalMeasurements, VitalReading};
use serde::{Deserialize, Serialize};

pub const SCORE_NORMAL: f32 = 1.0;
pub const SCORE_BORDERLINE: f32 = 0.8;
pub const SCORE_ABNORMAL: f32 = 0.6;

/// A closed interval of clinically normal values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalRange {
    pub min: f32,
    pub max: f32,
}

impl NormalRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// The range widened by the tolerance band on both sides.
    pub fn widened(&self) -> NormalRange {
        NormalRange::new(self.min - TOLERANCE_BAND, self.max + TOLERANCE_BAND)
    }
}

/// Scores a single measurement against its normal range.
pub fn score_in_range(value: f32, range: NormalRange) -> f32 {
    if range.contains(value) {
        SCORE_NORMAL
    } else if range.widened().contains(value) {
        SCORE_BORDERLINE
    } else {
        SCORE_ABNORMAL
    }
}

/// Scores oxygen saturation.
///
/// There is no upper bound: any value at or above 95 scores 1.0, including physically
/// impossible ones.
pub fn score_spo2(spo2: i32) -> f32 {
    if spo2 >= SPO2_NORMAL_MIN {
        SCORE_NORMAL
    } else if spo2 >= SPO2_LOW_MIN {
        SCORE_BORDERLINE
    } else {
        SCORE_ABNORMAL
    }
}

/// Per-vital partial scores for one reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartialScores {
    pub pulse: f32,
    pub temperature: f32,
    pub glucose: f32,
    pub spo2: f32,
    pub respiratory_rate: f32,
    pub blood_pressure: f32,
}

impl PartialScores {
    pub fn for_reading(reading: &VitalReading) -> Self {
        Self {
            pulse: score_in_range(reading.pulse as f32, PULSE_RANGE),
            temperature: score_in_range(reading.temperature as f32, TEMPERATURE_RANGE),
            glucose: score_in_range(reading.glucose as f32, GLUCOSE_RANGE),
            spo2: score_spo2(reading.spo2),
            respiratory_rate: score_in_range(reading.respiratory_rate as f32, RESPIRATORY_RATE_RANGE),
            blood_pressure: score_in_range(reading.blood_pressure as f32, SYSTOLIC_RANGE),
        }
    }

    pub fn get(&self, kind: VitalKind) -> f32 {
        match kind {
            VitalKind::Pulse => self.pulse,
            VitalKind::Temperature => self.temperature,
            VitalKind::Glucose => self.glucose,
            VitalKind::Spo2 => self.spo2,
            VitalKind::RespiratoryRate => self.respiratory_rate,
            VitalKind::BloodPressure => self.blood_pressure,
        }
    }

    /// Mean of the six partial scores.
    ///
    /// The percent round-trip and clamp have no effect for in-range partials but are kept so
    /// results match the mobile client bit for bit.
    pub fn composite(&self) -> f32 {
        let average = (self.pulse
            + self.temperature
            + self.glucose
            + self.spo2
            + self.respiratory_rate
            + self.blood_pressure)
            / 6.0;

        (average * 100.0).clamp(0.0, 100.0) / 100.0
    }
}

/// Composite health score for a reading, in `[0.6, 1.0]` for finite input.
///
/// Absent vitals must already have been substituted by the caller; an all-zero reading scores
/// 0.6. Use [`assess`] to tell missing data apart from a poor reading.
pub fn estimate_health_score(reading: &VitalReading) -> f32 {
    PartialScores::for_reading(reading).composite()
}

/// Outcome of scoring possibly incomplete measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HealthAssessment {
    Scored { score: f32, partials: PartialScores },
    InsufficientData { missing: Vec<VitalKind> },
}

impl HealthAssessment {
    pub fn score(&self) -> Option<f32> {
        match self {
            HealthAssessment::Scored { score, .. } => Some(*score),
            HealthAssessment::InsufficientData { .. } => None,
        }
    }
}

/// Scores measurements only when every vital is present.
///
/// `None` means no reading exists at all and reports every vital as missing.
pub fn assess(measurements: Option<&VitalMeasurements>) -> HealthAssessment {
    let Some(measurements) = measurements else {
        return HealthAssessment::InsufficientData {
            missing: VitalKind::ALL.to_vec(),
        };
    };

    match measurements.complete() {
        Some(reading) => {
            let partials = PartialScores::for_reading(&reading);
            HealthAssessment::Scored {
                score: partials.composite(),
                partials,
            }
        }
        None => HealthAssessment::InsufficientData {
            missing: measurements.missing(),
        },
    }
}

/// Whole percentage shown to the user, truncated toward zero.
pub fn score_percent(score: f32) -> i32 {
    (score * 100.0) as i32
}
