//! Blood-pressure text handling.
//!
//! Users type blood pressure either as `systolic/diastolic` (e.g. `120/80`) or as a single
//! number. Scoring only ever looks at the systolic component.

use crate::{VitalsError, VitalsResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A parsed blood-pressure entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodPressure {
    pub systolic: i32,
    pub diastolic: Option<i32>,
}

fn is_two_or_three_digits(part: &str) -> bool {
    (2..=3).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
}

impl FromStr for BloodPressure {
    type Err = VitalsError;

    /// Accepts `SS/DD` with two or three digits on each side, or any plain decimal number.
    fn from_str(s: &str) -> VitalsResult<Self> {
        if let Some((systolic, diastolic)) = s.split_once('/') {
            if is_two_or_three_digits(systolic) && is_two_or_three_digits(diastolic) {
                // Both sides are at most three ASCII digits, so parsing cannot fail.
                return Ok(Self {
                    systolic: systolic.parse().unwrap_or_default(),
                    diastolic: Some(diastolic.parse().unwrap_or_default()),
                });
            }
            return Err(VitalsError::InvalidInput(format!(
                "invalid blood pressure format (expected systolic/diastolic): {s}"
            )));
        }

        match s.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Self {
                systolic: value.trunc() as i32,
                diastolic: None,
            }),
            _ => Err(VitalsError::InvalidInput(format!(
                "invalid blood pressure value: {s}"
            ))),
        }
    }
}

impl std::fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.diastolic {
            Some(diastolic) => write!(f, "{}/{}", self.systolic, diastolic),
            None => write!(f, "{}", self.systolic),
        }
    }
}

/// Extracts the leading integer of stored blood-pressure text.
///
/// Everything from the first non-digit onwards is discarded, so `"120/80"` yields 120. Text
/// with no leading digits yields 0.
pub fn leading_systolic(raw: &str) -> i32 {
    let raw = raw.trim_start();
    let (negative, rest) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };

    let digits: &str = {
        let end = rest
            .bytes()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };

    let value = digits
        .bytes()
        .fold(0i32, |acc, b| acc.saturating_mul(10).saturating_add(i32::from(b - b'0')));

    if negative {
        -value
    } else {
        value
    }
}
