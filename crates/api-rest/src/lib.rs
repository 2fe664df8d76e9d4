//! # API REST
//!
//! REST API implementation for FitNest.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! Uses `api-shared` for wire types and `fitnest-core` for everything else.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    BloodPressureReq, DashboardRes, ErrorRes, EstimateReq, EstimateRes, HealthRes, HealthScoreRes,
    HealthService, HistoryRes, PartialScoresRes, SubmitVitalsReq, VitalRowRes, VitalSignRes,
};
use fitnest_core::{
    estimate_health_score, leading_systolic, score_percent, Dashboard, HealthAssessment,
    PartialScores, UserId, VitalReading, VitalSignEntry, VitalSignForm, VitalsError,
    VitalsRepository, VitalsService,
};

/// Runtime-selected vitals service shared by every handler.
pub type SharedVitalsService = VitalsService<dyn VitalsRepository>;

/// Application state for the REST API server.
#[derive(Clone)]
pub struct AppState {
    pub vitals: SharedVitalsService,
}

type ApiError = (StatusCode, Json<ErrorRes>);

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        estimate,
        submit_vitals,
        list_vitals,
        latest_vitals,
        health_score,
        dashboard,
    ),
    components(schemas(
        HealthRes,
        ErrorRes,
        EstimateReq,
        BloodPressureReq,
        EstimateRes,
        SubmitVitalsReq,
        VitalSignRes,
        HistoryRes,
        HealthScoreRes,
        PartialScoresRes,
        DashboardRes,
        VitalRowRes,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router with Swagger UI at `/swagger-ui`.
pub fn router(vitals: SharedVitalsService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health-score", post(estimate))
        .route("/users/:user_id/vitals", get(list_vitals).post(submit_vitals))
        .route("/users/:user_id/vitals/latest", get(latest_vitals))
        .route("/users/:user_id/health-score", get(health_score))
        .route("/users/:user_id/dashboard", get(dashboard))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(AppState { vitals })
}

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorRes {
            error: message.into(),
        }),
    )
}

/// Maps core errors to responses. Validation problems are the caller's to fix and are echoed
/// back; anything else is logged and hidden.
fn error_response(context: &str, e: VitalsError) -> ApiError {
    if e.is_validation() {
        return bad_request(e.to_string());
    }

    tracing::error!("{} error: {:?}", context, e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorRes {
            error: "Internal error".into(),
        }),
    )
}

fn parse_user(raw: &str) -> Result<UserId, ApiError> {
    UserId::new(raw).map_err(|e| error_response("Parse user", e.into()))
}

fn systolic(bp: &BloodPressureReq) -> i32 {
    match bp {
        BloodPressureReq::Systolic(value) => value.trunc() as i32,
        BloodPressureReq::Text(text) => leading_systolic(text),
    }
}

fn entry_res(entry: VitalSignEntry) -> VitalSignRes {
    VitalSignRes {
        user_id: entry.user_id.to_string(),
        timestamp: entry.timestamp,
        pulse: entry.pulse,
        temperature: entry.temperature,
        glucose: entry.glucose,
        spo2: entry.spo2,
        respiratory_rate: entry.respiratory_rate,
        blood_pressure: entry.blood_pressure,
    }
}

fn partials_res(partials: PartialScores) -> PartialScoresRes {
    PartialScoresRes {
        pulse: partials.pulse,
        temperature: partials.temperature,
        glucose: partials.glucose,
        spo2: partials.spo2,
        respiratory_rate: partials.respiratory_rate,
        blood_pressure: partials.blood_pressure,
    }
}

fn assessment_res(assessment: HealthAssessment) -> HealthScoreRes {
    match assessment {
        HealthAssessment::Scored { score, partials } => HealthScoreRes {
            status: "scored".into(),
            score: Some(score),
            percent: Some(score_percent(score)),
            partials: Some(partials_res(partials)),
            missing: Vec::new(),
        },
        HealthAssessment::InsufficientData { missing } => HealthScoreRes {
            status: "insufficient_data".into(),
            score: None,
            percent: None,
            partials: None,
            missing: missing.into_iter().map(|k| k.as_str().to_owned()).collect(),
        },
    }
}

fn dashboard_res(dashboard: Dashboard) -> DashboardRes {
    DashboardRes {
        score: dashboard.score,
        percent: dashboard.percent,
        rows: dashboard
            .rows
            .into_iter()
            .map(|row| VitalRowRes {
                kind: row.kind.as_str().to_owned(),
                label: row.label,
                icon: row.icon,
                value: row.value,
                progress: row.progress,
            })
            .collect(),
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint used by monitoring and load balancers.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/health-score",
    request_body = EstimateReq,
    responses(
        (status = 200, description = "Composite health score", body = EstimateRes)
    )
)]
/// Score a reading without storing it.
///
/// Never fails for well-formed JSON: every numeric input has a defined score.
#[axum::debug_handler]
async fn estimate(
    State(_state): State<AppState>,
    Json(req): Json<EstimateReq>,
) -> Json<EstimateRes> {
    let reading = VitalReading {
        pulse: req.pulse,
        temperature: req.temperature,
        glucose: req.glucose,
        spo2: req.spo2,
        respiratory_rate: req.respiratory_rate,
        blood_pressure: systolic(&req.blood_pressure),
    };
    let score = estimate_health_score(&reading);

    Json(EstimateRes {
        score,
        percent: score_percent(score),
    })
}

#[utoipa::path(
    post,
    path = "/users/{user_id}/vitals",
    request_body = SubmitVitalsReq,
    params(("user_id" = String, Path, description = "Owner of the reading")),
    responses(
        (status = 201, description = "Reading stored", body = VitalSignRes),
        (status = 400, description = "Invalid user id or form values", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Validate and store a vital-sign form submission.
#[axum::debug_handler]
async fn submit_vitals(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<SubmitVitalsReq>,
) -> Result<(StatusCode, Json<VitalSignRes>), ApiError> {
    let user = parse_user(&user_id)?;
    let form = VitalSignForm {
        pulse: req.pulse,
        temperature: req.temperature,
        glucose: req.glucose,
        spo2: req.spo2,
        respiratory_rate: req.respiratory_rate,
        blood_pressure: req.blood_pressure,
    };

    match state.vitals.submit(&user, &form) {
        Ok(entry) => Ok((StatusCode::CREATED, Json(entry_res(entry)))),
        Err(e) => Err(error_response("Submit vitals", e)),
    }
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    limit: Option<usize>,
}

#[utoipa::path(
    get,
    path = "/users/{user_id}/vitals",
    params(
        ("user_id" = String, Path, description = "Owner of the readings"),
        ("limit" = Option<usize>, Query, description = "Maximum number of readings")
    ),
    responses(
        (status = 200, description = "Readings, newest first", body = HistoryRes),
        (status = 400, description = "Invalid user id or limit", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List a user's readings, newest first.
#[axum::debug_handler]
async fn list_vitals(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryRes>, ApiError> {
    let user = parse_user(&user_id)?;
    let result = match query.limit {
        Some(limit) => state.vitals.history_with_limit(&user, limit),
        None => state.vitals.history(&user),
    };

    result
        .map(|entries| {
            Json(HistoryRes {
                entries: entries.into_iter().map(entry_res).collect(),
            })
        })
        .map_err(|e| error_response("List vitals", e))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}/vitals/latest",
    params(("user_id" = String, Path, description = "Owner of the reading")),
    responses(
        (status = 200, description = "Most recent reading", body = VitalSignRes),
        (status = 404, description = "No readings for this user", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Fetch a user's most recent reading.
#[axum::debug_handler]
async fn latest_vitals(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<VitalSignRes>, ApiError> {
    let user = parse_user(&user_id)?;
    match state.vitals.latest(&user) {
        Ok(Some(entry)) => Ok(Json(entry_res(entry))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorRes {
                error: format!("no vital signs recorded for {user}"),
            }),
        )),
        Err(e) => Err(error_response("Latest vitals", e)),
    }
}

#[utoipa::path(
    get,
    path = "/users/{user_id}/health-score",
    params(("user_id" = String, Path, description = "Owner of the reading")),
    responses(
        (status = 200, description = "Score of the latest reading, or the missing vitals", body = HealthScoreRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Score a user's latest reading.
///
/// Missing vitals produce `insufficient_data` instead of a misleadingly low score.
#[axum::debug_handler]
async fn health_score(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<HealthScoreRes>, ApiError> {
    let user = parse_user(&user_id)?;
    state
        .vitals
        .latest_assessment(&user)
        .map(|assessment| Json(assessment_res(assessment)))
        .map_err(|e| error_response("Health score", e))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}/dashboard",
    params(("user_id" = String, Path, description = "Owner of the reading")),
    responses(
        (status = 200, description = "Dashboard for the latest reading", body = DashboardRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn dashboard(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<DashboardRes>, ApiError> {
    let user = parse_user(&user_id)?;
    state
        .vitals
        .dashboard(&user)
        .map(|d| Json(dashboard_res(d)))
        .map_err(|e| error_response("Dashboard", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use fitnest_core::{CoreConfig, FileVitalsRepository, InMemoryVitalsRepository};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let repo: Arc<dyn VitalsRepository> = Arc::new(InMemoryVitalsRepository::new());
        router(VitalsService::new(Arc::new(CoreConfig::default()), repo))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn normal_form() -> Value {
        json!({
            "pulse": "75",
            "temperature": "36.8",
            "glucose": "100",
            "spo2": "98",
            "respiratoryRate": "16",
            "bloodPressure": "110/70"
        })
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (status, body) = send(&app(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn estimate_scores_without_storing() {
        let (status, body) = send(
            &app(),
            "POST",
            "/health-score",
            Some(json!({
                "pulse": 75,
                "temperature": 36.8,
                "glucose": 100,
                "spo2": 92,
                "respiratoryRate": 16,
                "bloodPressure": "110/70"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let score = body["score"].as_f64().unwrap();
        assert!((score - 5.8 / 6.0).abs() < 1e-4);
        assert_eq!(body["percent"], 96);
    }

    #[tokio::test]
    async fn estimate_accepts_numeric_blood_pressure() {
        let (status, body) = send(
            &app(),
            "POST",
            "/health-score",
            Some(json!({
                "pulse": 75,
                "temperature": 36.8,
                "glucose": 100,
                "spo2": 98,
                "respiratoryRate": 16,
                "bloodPressure": 110
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"].as_f64().unwrap(), 1.0);
        assert_eq!(body["percent"], 100);
    }

    #[tokio::test]
    async fn submit_then_read_back() {
        let app = app();
        let (status, body) = send(&app, "POST", "/users/7/vitals", Some(normal_form())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["userId"], "7");
        assert_eq!(body["bloodPressure"], "110/70");

        let (status, latest) = send(&app, "GET", "/users/7/vitals/latest", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(latest["timestamp"], body["timestamp"]);

        let (status, score) = send(&app, "GET", "/users/7/health-score", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(score["status"], "scored");
        assert_eq!(score["percent"], 100);

        let (_, history) = send(&app, "GET", "/users/7/vitals?limit=5", None).await;
        assert_eq!(history["entries"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalid_form_is_bad_request() {
        let mut form = normal_form();
        form["bloodPressure"] = json!("high");

        let (status, body) = send(&app(), "POST", "/users/7/vitals", Some(form)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Please enter valid values for all fields"));
    }

    #[tokio::test]
    async fn invalid_user_id_is_bad_request() {
        let (status, body) = send(&app(), "GET", "/users/bad%20id/vitals/latest", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("invalid user id"));
    }

    #[tokio::test]
    async fn unknown_user_has_no_latest_and_insufficient_data() {
        let app = app();
        let (status, _) = send(&app, "GET", "/users/nobody/vitals/latest", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, score) = send(&app, "GET", "/users/nobody/health-score", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(score["status"], "insufficient_data");
        assert_eq!(score["missing"].as_array().unwrap().len(), 6);
        assert!(score.get("score").is_none());
    }

    #[tokio::test]
    async fn zero_history_limit_is_bad_request() {
        let (status, _) = send(&app(), "GET", "/users/7/vitals?limit=0", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn dashboard_lists_rows_from_file_storage() {
        let temp = tempfile::TempDir::new().unwrap();
        let cfg = Arc::new(CoreConfig::new(temp.path().to_path_buf(), 10).unwrap());
        let repo: Arc<dyn VitalsRepository> = Arc::new(FileVitalsRepository::new(&cfg));
        let app = router(VitalsService::new(cfg, repo));

        send(&app, "POST", "/users/u-1/vitals", Some(normal_form())).await;
        let (status, body) = send(&app, "GET", "/users/u-1/dashboard", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["percent"], 100);
        assert_eq!(body["rows"].as_array().unwrap().len(), 6);
        assert_eq!(body["rows"][5]["value"], "110/70 mmHg");
    }
}
