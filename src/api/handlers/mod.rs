use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::models::*;
use crate::registry::{ErrorKind, Registry, RegistryError, ReserveOutcome};

type ApiError = (StatusCode, Json<ApiResponse>);

// ============================================================
// Error Handling
// ============================================================

/// Convert a registry error into the `{success:false, message}` envelope.
///
/// Validation and lookup failures carry their own message to the client.
/// Storage failures are logged in full server-side and the client only sees
/// `internal_message`.
fn error_response(e: RegistryError, internal_message: &str) -> ApiError {
    let status = match e.kind() {
        ErrorKind::Validation => {
            tracing::warn!("Validation error: {:?}", e);
            StatusCode::BAD_REQUEST
        }
        ErrorKind::NotFound => {
            tracing::warn!("Not found: {:?}", e);
            StatusCode::NOT_FOUND
        }
        ErrorKind::Internal => {
            tracing::error!("Internal error: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::rejected(internal_message)),
            );
        }
    };
    (status, Json(ApiResponse::rejected(e.to_string())))
}

/// Like [`error_response`], but storage failures that happen while reading
/// get the generic message, since nothing was saved or cancelled yet.
fn mutation_error(e: RegistryError, write_message: &str) -> ApiError {
    let message = if e.is_read_failure() {
        "Erro interno do servidor"
    } else {
        write_message
    };
    error_response(e, message)
}

fn bad_body(rejection: JsonRejection) -> ApiError {
    tracing::warn!("Rejected request body: {}", rejection.body_text());
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::rejected("Corpo da requisição inválido")),
    )
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "OK".to_string(),
        timestamp: Utc::now(),
    })
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Endpoint não encontrado" })),
    )
}

// ============================================================
// Gifts
// ============================================================

pub async fn list_gifts(State(registry): State<Registry>) -> Result<Json<Vec<Gift>>, ApiError> {
    registry
        .gifts()
        .map(Json)
        .map_err(|e| error_response(e, "Erro ao carregar lista de presentes"))
}

pub async fn reserve_gift(
    State(registry): State<Registry>,
    payload: Result<Json<ReserveInput>, JsonRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let Json(input) = payload.map_err(bad_body)?;

    match registry
        .reserve(input)
        .map_err(|e| mutation_error(e, "Erro ao salvar reserva"))?
    {
        ReserveOutcome::Reserved(gift) => Ok(Json(
            ApiResponse::ok("Presente reservado com sucesso").with_gift(gift),
        )),
        ReserveOutcome::AlreadyReserved(_) => Ok(Json(ApiResponse::rejected(
            "Este presente já foi reservado",
        ))),
    }
}

pub async fn cancel_reservation(
    State(registry): State<Registry>,
    payload: Result<Json<CancelInput>, JsonRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let Json(input) = payload.map_err(bad_body)?;

    registry
        .cancel(input)
        .map(|_| Json(ApiResponse::ok("Reserva cancelada com sucesso")))
        .map_err(|e| mutation_error(e, "Erro ao cancelar reserva"))
}

// ============================================================
// Reservation records
// ============================================================

pub async fn list_people(State(registry): State<Registry>) -> Result<Json<Vec<Person>>, ApiError> {
    registry
        .people()
        .map(Json)
        .map_err(|e| error_response(e, "Erro ao carregar lista de pessoas"))
}

/// Query parameters for the per-guest summary.
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    #[serde(default)]
    pub nome: Option<String>,
}

pub async fn guest_summary(
    State(registry): State<Registry>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<GuestSummary>, ApiError> {
    registry
        .summary(query.nome.as_deref().unwrap_or_default())
        .map(Json)
        .map_err(|e| error_response(e, "Erro ao carregar lista de presentes"))
}
