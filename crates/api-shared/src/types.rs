//! Wire types for the REST API.
//!
//! Field names are camelCase to match the documents the mobile client already reads and
//! writes.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

/// Vital-sign entry form, one raw string per field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitVitalsReq {
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
    /// `systolic/diastolic` (e.g. `120/80`) or a single number.
    #[serde(default)]
    pub blood_pressure: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VitalSignRes {
    pub user_id: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub pulse: Option<f64>,
    pub temperature: Option<f64>,
    pub glucose: Option<f64>,
    pub spo2: Option<f64>,
    pub respiratory_rate: Option<f64>,
    pub blood_pressure: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HistoryRes {
    pub entries: Vec<VitalSignRes>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartialScoresRes {
    pub pulse: f32,
    pub temperature: f32,
    pub glucose: f32,
    pub spo2: f32,
    pub respiratory_rate: f32,
    pub blood_pressure: f32,
}

/// Health score of a user's latest reading.
///
/// `status` is `scored` or `insufficient_data`. Score fields are only present when scored;
/// `missing` lists absent vitals otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthScoreRes {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partials: Option<PartialScoresRes>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
}

/// A fully numeric reading to score without storing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstimateReq {
    pub pulse: i32,
    pub temperature: f64,
    pub glucose: i32,
    pub spo2: i32,
    pub respiratory_rate: i32,
    pub blood_pressure: BloodPressureReq,
}

/// Blood pressure as a systolic number or as `systolic/diastolic` text.
///
/// Only the systolic value is scored; text is read up to its first non-digit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum BloodPressureReq {
    Systolic(f64),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EstimateRes {
    pub score: f32,
    pub percent: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VitalRowRes {
    pub kind: String,
    pub label: String,
    pub icon: String,
    pub value: String,
    pub progress: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardRes {
    pub score: f32,
    pub percent: i32,
    pub rows: Vec<VitalRowRes>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_request_accepts_camel_case_and_missing_fields() {
        let req: SubmitVitalsReq =
            serde_json::from_str(r#"{"pulse":"70","respiratoryRate":"14","bloodPressure":"120/80"}"#)
                .unwrap();
        assert_eq!(req.respiratory_rate, "14");
        assert_eq!(req.blood_pressure, "120/80");
        assert!(req.glucose.is_empty());
    }

    #[test]
    fn estimate_request_takes_number_or_text_blood_pressure() {
        let numeric: EstimateReq = serde_json::from_str(
            r#"{"pulse":70,"temperature":36.6,"glucose":90,"spo2":97,"respiratoryRate":14,"bloodPressure":110}"#,
        )
        .unwrap();
        assert_eq!(numeric.blood_pressure, BloodPressureReq::Systolic(110.0));

        let text: EstimateReq = serde_json::from_str(
            r#"{"pulse":70,"temperature":36.6,"glucose":90,"spo2":97,"respiratoryRate":14,"bloodPressure":"120/80"}"#,
        )
        .unwrap();
        assert_eq!(text.blood_pressure, BloodPressureReq::Text("120/80".into()));
    }

    #[test]
    fn insufficient_data_omits_score_fields() {
        let res = HealthScoreRes {
            status: "insufficient_data".into(),
            score: None,
            percent: None,
            partials: None,
            missing: vec!["spo2".into()],
        };
        let json = serde_json::to_value(&res).unwrap();
        assert!(json.get("score").is_none());
        assert_eq!(json["missing"][0], "spo2");
    }
}
