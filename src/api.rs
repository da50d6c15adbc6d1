//! Request/response boundary for the personalization engine.
//!
//! Transport-agnostic: takes a JSON payload `{"diaries": [...]}`, rejects
//! malformed shapes with [`InputShapeError`], and renders the engine result
//! as the service response. Per-field parsing of entries is lenient; only the
//! overall shape is enforced.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::decision::{ClassificationMethod, ClusterLabel, Personalization};
use crate::diary::DiaryEntry;
use crate::engine::Personalizer;
use crate::features::FeatureSummary;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputShapeError {
    #[error("Invalid JSON payload")]
    InvalidJson,
    #[error("Missing diary data")]
    MissingDiaries,
    #[error("`diaries` must be a list")]
    NotAList,
    #[error("diary entry {index} is not an object")]
    MalformedEntry { index: usize },
}

impl InputShapeError {
    /// Client-error body, e.g. `{"error": "Missing diary data"}`.
    pub fn error_body(&self) -> Value {
        json!({ "error": self.to_string() })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalizeResponse {
    pub status: String,
    pub method: ClassificationMethod,
    pub cluster: ClusterLabel,
    pub features: FeatureSummary,
}

impl From<Personalization> for PersonalizeResponse {
    fn from(p: Personalization) -> Self {
        Self {
            status: "ok".to_string(),
            method: p.method,
            cluster: p.cluster,
            features: p.features,
        }
    }
}

/// Validate the request shape and extract the entries.
pub fn parse_request(body: &Value) -> Result<Vec<DiaryEntry>, InputShapeError> {
    let diaries = body
        .as_object()
        .and_then(|o| o.get("diaries"))
        .filter(|v| !v.is_null())
        .ok_or(InputShapeError::MissingDiaries)?;

    let items = diaries.as_array().ok_or(InputShapeError::NotAList)?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_entry(item).ok_or(InputShapeError::MalformedEntry { index }))
        .collect()
}

/// Entry-like record → `DiaryEntry`. Wrong-typed fields count as absent.
fn parse_entry(item: &Value) -> Option<DiaryEntry> {
    let obj = item.as_object()?;

    let category = obj
        .get("category")
        .and_then(Value::as_str)
        .map(str::to_string);

    let feelings = obj
        .get("feelings")
        .and_then(Value::as_array)
        .map(|xs| {
            xs.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let created_at = obj
        .get("createdAt")
        .or_else(|| obj.get("created_at"))
        .and_then(parse_timestamp);

    Some(DiaryEntry {
        category,
        feelings,
        created_at,
    })
}

/// RFC 3339 strings, or exported Firestore-style `{"_seconds": n}` / `{"seconds": n}`.
fn parse_timestamp(v: &Value) -> Option<DateTime<Utc>> {
    match v {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Object(o) => {
            let secs = o
                .get("_seconds")
                .or_else(|| o.get("seconds"))
                .and_then(Value::as_i64)?;
            let nanos = o
                .get("_nanoseconds")
                .or_else(|| o.get("nanoseconds"))
                .and_then(Value::as_u64)
                .unwrap_or(0);
            DateTime::from_timestamp(secs, u32::try_from(nanos).unwrap_or(0))
        }
        _ => None,
    }
}

pub fn handle_value(
    body: &Value,
    engine: &Personalizer,
) -> Result<PersonalizeResponse, InputShapeError> {
    let entries = parse_request(body)?;
    Ok(engine.personalize(&entries).into())
}

pub fn handle_json(
    raw: &str,
    engine: &Personalizer,
) -> Result<PersonalizeResponse, InputShapeError> {
    let body: Value = serde_json::from_str(raw).map_err(|_| InputShapeError::InvalidJson)?;
    handle_value(&body, engine)
}
