use crate::types::HealthRes;

/// Simple liveness service for the FitNest APIs.
#[derive(Clone)]
pub struct HealthService;

impl HealthService {
    /// Check health without creating an instance.
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "FitNest is alive".into(),
        }
    }
}
