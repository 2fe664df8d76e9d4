//! # FitNest Core
//!
//! Core business logic for the FitNest vital-signs tracker.
//!
//! This crate contains pure data operations and storage:
//! - Health-score estimation from a vital-sign reading ([`scoring`])
//! - Entry-form validation and blood-pressure parsing
//! - The dashboard presentation model
//! - Vital-sign repositories (in-memory and file-backed) with latest-reading observation
//!
//! **No API concerns**: HTTP servers and CLI parsing belong in `api-rest`, `api-shared` and
//! `fitnest-cli`.

pub mod blood_pressure;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod reading;
pub mod repositories;
pub mod scoring;
pub mod service;

pub use blood_pressure::{leading_systolic, BloodPressure};
pub use config::CoreConfig;
pub use constants::DEFAULT_DATA_DIR;
pub use dashboard::{build_dashboard, Dashboard, VitalRow};
pub use error::{FieldError, VitalsError, VitalsResult};
pub use fitnest_types::{TextError, UserId};
pub use form::{NewVitalSign, VitalSignForm};
pub use reading::{VitalKind, VitalMeasurements, VitalReading, VitalSignEntry};
pub use repositories::{FileVitalsRepository, InMemoryVitalsRepository, VitalsRepository};
pub use scoring::{
    assess, estimate_health_score, score_in_range, score_percent, score_spo2, HealthAssessment,
    NormalRange, PartialScores,
};
pub use service::VitalsService;
