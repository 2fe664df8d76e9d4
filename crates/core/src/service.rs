//! Vital-sign operations used by the REST API and the CLI.

use crate::config::CoreConfig;
use crate::dashboard::{build_dashboard, Dashboard};
use crate::form::VitalSignForm;
use crate::reading::VitalSignEntry;
use crate::repositories::{LatestReceiver, VitalsRepository};
use crate::scoring::{assess, estimate_health_score, HealthAssessment};
use crate::VitalsResult;
use chrono::Utc;
use fitnest_types::UserId;
use std::sync::Arc;

/// Service for recording, fetching and scoring a user's vital signs.
///
/// Generic over the storage backend so the same logic runs against files in production and an
/// in-memory map in tests. `VitalsService<dyn VitalsRepository>` picks the backend at runtime.
#[derive(Debug)]
pub struct VitalsService<R: ?Sized> {
    cfg: Arc<CoreConfig>,
    repo: Arc<R>,
}

impl<R: ?Sized> Clone for VitalsService<R> {
    fn clone(&self) -> Self {
        Self {
            cfg: self.cfg.clone(),
            repo: self.repo.clone(),
        }
    }
}

impl<R: VitalsRepository + ?Sized> VitalsService<R> {
    pub fn new(cfg: Arc<CoreConfig>, repo: Arc<R>) -> Self {
        Self { cfg, repo }
    }

    /// Validates a form submission and stores it stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns `VitalsError::InvalidForm` if any field fails validation, or a storage error if
    /// the reading cannot be written.
    pub fn submit(&self, user: &UserId, form: &VitalSignForm) -> VitalsResult<VitalSignEntry> {
        self.submit_at(user, form, Utc::now().timestamp_millis())
    }

    /// Like [`submit`](Self::submit) with an explicit timestamp in epoch milliseconds.
    pub fn submit_at(
        &self,
        user: &UserId,
        form: &VitalSignForm,
        timestamp: i64,
    ) -> VitalsResult<VitalSignEntry> {
        let new = form.validate()?;

        let entry = VitalSignEntry {
            user_id: user.clone(),
            timestamp,
            pulse: Some(new.pulse),
            temperature: Some(new.temperature),
            glucose: Some(new.glucose),
            spo2: Some(new.spo2),
            respiratory_rate: Some(new.respiratory_rate),
            blood_pressure: Some(new.blood_pressure),
        };

        self.repo.record(entry.clone())?;
        tracing::info!(user = %user, timestamp, "recorded vital signs");
        Ok(entry)
    }

    pub fn latest(&self, user: &UserId) -> VitalsResult<Option<VitalSignEntry>> {
        self.repo.latest(user)
    }

    /// History with the configured default limit.
    pub fn history(&self, user: &UserId) -> VitalsResult<Vec<VitalSignEntry>> {
        self.history_with_limit(user, self.cfg.history_limit())
    }

    pub fn history_with_limit(
        &self,
        user: &UserId,
        limit: usize,
    ) -> VitalsResult<Vec<VitalSignEntry>> {
        crate::config::validate_history_limit(limit)?;
        self.repo.history(user, limit)
    }

    /// Scores the latest reading, reporting missing vitals instead of guessing.
    pub fn latest_assessment(&self, user: &UserId) -> VitalsResult<HealthAssessment> {
        let latest = self.repo.latest(user)?;
        let measurements = latest.as_ref().map(VitalSignEntry::measurements);
        Ok(assess(measurements.as_ref()))
    }

    /// Scores the latest reading with absent vitals (or no reading at all) treated as 0.
    pub fn latest_score(&self, user: &UserId) -> VitalsResult<f32> {
        let reading = self
            .repo
            .latest(user)?
            .map(|entry| entry.reading())
            .unwrap_or_default();
        Ok(estimate_health_score(&reading))
    }

    pub fn dashboard(&self, user: &UserId) -> VitalsResult<Dashboard> {
        let latest = self.repo.latest(user)?;
        Ok(build_dashboard(latest.as_ref()))
    }

    pub fn observe(&self, user: &UserId) -> VitalsResult<LatestReceiver> {
        self.repo.observe(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::VitalKind;
    use crate::repositories::InMemoryVitalsRepository;
    use crate::VitalsError;

    fn service() -> VitalsService<InMemoryVitalsRepository> {
        VitalsService::new(
            Arc::new(CoreConfig::default()),
            Arc::new(InMemoryVitalsRepository::new()),
        )
    }

    fn user() -> UserId {
        UserId::new("42").unwrap()
    }

    fn form() -> VitalSignForm {
        VitalSignForm {
            pulse: "75".into(),
            temperature: "36.8".into(),
            glucose: "100".into(),
            spo2: "98".into(),
            respiratory_rate: "16".into(),
            blood_pressure: "110/70".into(),
        }
    }

    #[test]
    fn submit_then_score() {
        let svc = service();
        let entry = svc.submit_at(&user(), &form(), 1_000).unwrap();
        assert_eq!(entry.timestamp, 1_000);
        assert_eq!(entry.blood_pressure.as_deref(), Some("110/70"));

        assert_eq!(svc.latest_score(&user()).unwrap(), 1.0);
        assert_eq!(svc.latest_assessment(&user()).unwrap().score(), Some(1.0));
    }

    #[test]
    fn signed_plain_blood_pressure_scores_as_typed() {
        let svc = service();
        let entry = svc
            .submit_at(
                &user(),
                &VitalSignForm {
                    blood_pressure: "+115".into(),
                    ..form()
                },
                1,
            )
            .unwrap();
        assert_eq!(entry.blood_pressure.as_deref(), Some("115"));

        match svc.latest_assessment(&user()).unwrap() {
            HealthAssessment::Scored { score, partials } => {
                assert_eq!(partials.blood_pressure, 1.0);
                assert_eq!(score, 1.0);
            }
            other => panic!("expected a score, got {other:?}"),
        }
    }

    #[test]
    fn invalid_form_is_not_stored() {
        let svc = service();
        let bad = VitalSignForm {
            pulse: "".into(),
            ..form()
        };

        let err = svc.submit(&user(), &bad).unwrap_err();
        assert!(matches!(err, VitalsError::InvalidForm(_)));
        assert!(svc.latest(&user()).unwrap().is_none());
    }

    #[test]
    fn no_reading_is_insufficient_data_but_legacy_score_is_floor() {
        let svc = service();
        assert_eq!(
            svc.latest_assessment(&user()).unwrap(),
            HealthAssessment::InsufficientData {
                missing: VitalKind::ALL.to_vec()
            }
        );
        assert!((svc.latest_score(&user()).unwrap() - 0.6).abs() < 1e-4);
    }

    #[test]
    fn history_uses_configured_limit() {
        let cfg = CoreConfig::new(std::path::PathBuf::from("unused"), 2).unwrap();
        let svc = VitalsService::new(Arc::new(cfg), Arc::new(InMemoryVitalsRepository::new()));
        for ts in 1..=4 {
            svc.submit_at(&user(), &form(), ts).unwrap();
        }

        assert_eq!(svc.history(&user()).unwrap().len(), 2);
        assert_eq!(svc.history_with_limit(&user(), 3).unwrap().len(), 3);
        assert!(svc.history_with_limit(&user(), 0).is_err());
    }

    #[test]
    fn dashboard_reflects_latest_submission() {
        let svc = service();
        svc.submit_at(&user(), &form(), 1).unwrap();
        svc.submit_at(
            &user(),
            &VitalSignForm {
                spo2: "92".into(),
                ..form()
            },
            2,
        )
        .unwrap();

        let dashboard = svc.dashboard(&user()).unwrap();
        assert!((dashboard.score - (5.0 + 0.8) / 6.0).abs() < 1e-4);
        assert_eq!(dashboard.rows[3].value, "92%");
    }

    #[test]
    fn observe_sees_submissions() {
        let svc = service();
        let mut rx = svc.observe(&user()).unwrap();
        assert!(rx.borrow_and_update().is_none());

        svc.submit_at(&user(), &form(), 9).unwrap();
        assert_eq!(rx.borrow().as_ref().map(|e| e.timestamp), Some(9));
    }
}
