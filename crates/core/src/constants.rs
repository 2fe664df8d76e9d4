//! Constants used throughout the FitNest core crate.
//!
//! This module contains path names, defaults and clinical bands so they stay consistent across
//! the codebase.

use crate::scoring::NormalRange;

/// Default directory for vital-sign storage when no explicit directory is configured.
pub const DEFAULT_DATA_DIR: &str = "fitnest_data";

/// Directory name for vital-sign documents.
pub const VITAL_SIGNS_DIR_NAME: &str = "vital_signs";

/// Number of readings returned by a history query when the caller does not ask for a limit.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Widening applied on both sides of a normal range for the 0.8 tolerance band.
pub const TOLERANCE_BAND: f32 = 5.0;

pub const PULSE_RANGE: NormalRange = NormalRange::new(60.0, 100.0);
pub const TEMPERATURE_RANGE: NormalRange = NormalRange::new(36.1, 37.2);
pub const GLUCOSE_RANGE: NormalRange = NormalRange::new(70.0, 140.0);
pub const RESPIRATORY_RATE_RANGE: NormalRange = NormalRange::new(12.0, 20.0);
pub const SYSTOLIC_RANGE: NormalRange = NormalRange::new(90.0, 120.0);

/// SpO₂ at or above this percentage scores 1.0.
pub const SPO2_NORMAL_MIN: i32 = 95;
/// SpO₂ at or above this percentage (and below [`SPO2_NORMAL_MIN`]) scores 0.8.
pub const SPO2_LOW_MIN: i32 = 90;
