//! Spreadsheet function endpoints
//!
//! - `GET /api/v1/functions`: registered functions and their signatures
//! - `POST /api/v1/functions/{name}`: evaluate one function
//! - `POST /api/v1/batch`: evaluate many calls, results in input order
//!
//! Values are bare JSON numbers. Under the legacy policy a NaN or infinite
//! result serialises as `null`.

use std::collections::BTreeMap;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use pricer_models::analytical::Measure;
use pricer_models::batch::FunctionCall;
use pricer_models::functions::{
    FunctionError, FunctionId, HostValue, Model, OptionTypePolicy, ParamDefault, ParamSpec,
};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;

/// One parameter in a function listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParamInfo {
    /// Parameter name
    pub name: String,
    /// True when the parameter has no default
    pub required: bool,
    /// Default value, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<HostValue>,
}

impl From<&ParamSpec> for ParamInfo {
    fn from(spec: &ParamSpec) -> Self {
        let default = match spec.default {
            ParamDefault::Required => None,
            ParamDefault::Number(value) => Some(HostValue::Number(value)),
            ParamDefault::OptionType(option_type) => Some(HostValue::from(option_type.as_str())),
        };
        Self {
            name: spec.name.to_string(),
            required: !spec.is_optional(),
            default,
        }
    }
}

/// One entry of `GET /api/v1/functions`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionInfo {
    /// Canonical name
    pub name: String,
    /// Model family
    pub model: Model,
    /// Price or Greek
    pub measure: Measure,
    /// Ordered parameters
    pub params: Vec<ParamInfo>,
}

impl From<FunctionId> for FunctionInfo {
    fn from(id: FunctionId) -> Self {
        Self {
            name: id.name(),
            model: id.model(),
            measure: id.measure(),
            params: id.params().iter().map(ParamInfo::from).collect(),
        }
    }
}

/// Function listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionListResponse {
    /// Policy applied to every evaluation
    pub policy: OptionTypePolicy,
    /// Registered functions
    pub functions: Vec<FunctionInfo>,
}

/// Body of `POST /api/v1/functions/{name}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluateRequest {
    /// Positional arguments; `null` takes the default
    #[serde(default)]
    pub args: Vec<HostValue>,
    /// Named arguments, matched case-insensitively
    #[serde(default)]
    pub named: BTreeMap<String, HostValue>,
}

/// Result of a single evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateResponse {
    /// Canonical function name
    pub function: String,
    /// Price or Greek
    pub value: Option<f64>,
}

/// Body of `POST /api/v1/batch`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchRequest {
    /// Calls to evaluate
    pub calls: Vec<FunctionCall>,
}

/// Outcome of one batch entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum BatchItem {
    /// Failed evaluation
    Error {
        /// Error category
        error: String,
        /// Error detail
        message: String,
    },
    /// Successful evaluation
    Value {
        /// Price or Greek
        value: Option<f64>,
    },
}

impl From<Result<f64, FunctionError>> for BatchItem {
    fn from(result: Result<f64, FunctionError>) -> Self {
        match result {
            Ok(value) => BatchItem::Value {
                value: finite(value),
            },
            Err(err) => BatchItem::Error {
                error: err.kind().to_string(),
                message: err.to_string(),
            },
        }
    }
}

/// Batch results, one per call in request order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    /// Per-call outcomes
    pub results: Vec<BatchItem>,
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Build the function routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/functions", get(list_handler))
        .route("/api/v1/functions/{name}", post(evaluate_handler))
        .route("/api/v1/batch", post(batch_handler))
}

/// GET /api/v1/functions
async fn list_handler(State(state): State<AppState>) -> Json<FunctionListResponse> {
    Json(FunctionListResponse {
        policy: state.registry.policy(),
        functions: state.registry.functions().map(FunctionInfo::from).collect(),
    })
}

/// POST /api/v1/functions/{name}
async fn evaluate_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<EvaluateResponse>, ApiError> {
    let Json(request) = body?;
    let id = state.registry.lookup(&name)?;
    let value = state.registry.evaluate_id(id, &request.args, &request.named)?;

    Ok(Json(EvaluateResponse {
        function: id.name(),
        value: finite(value),
    }))
}

/// POST /api/v1/batch
async fn batch_handler(
    State(state): State<AppState>,
    body: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<Json<BatchResponse>, ApiError> {
    let Json(request) = body?;
    let limit = state.config.max_batch_size;
    if request.calls.len() > limit {
        return Err(ApiError::BatchTooLarge {
            size: request.calls.len(),
            limit,
        });
    }

    // rayon work must not block the async executor
    let evaluator = state.batch;
    let results = tokio::task::spawn_blocking(move || evaluator.evaluate(&request.calls))
        .await
        .map_err(|e| ApiError::Internal(format!("batch evaluation aborted: {}", e)))?;

    tracing::info!(calls = results.len(), "batch evaluated");
    Ok(Json(BatchResponse {
        results: results.into_iter().map(BatchItem::from).collect(),
    }))
}
