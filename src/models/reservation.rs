use serde::{Deserialize, Serialize};

use super::gift::Gift;

/// Body of `POST /api/reservar`.
///
/// Both fields are optional at the serde level so that a missing field is
/// reported as a validation failure rather than a body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveInput {
    #[serde(default)]
    pub id_presente: Option<String>,
    #[serde(default)]
    pub nome_usuario: Option<String>,
}

impl ReserveInput {
    pub fn new(gift_id: impl Into<String>, guest: impl Into<String>) -> Self {
        Self {
            id_presente: Some(gift_id.into()),
            nome_usuario: Some(guest.into()),
        }
    }
}

/// Body of `POST /api/cancelar-reserva`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelInput {
    #[serde(default)]
    pub nome_usuario: Option<String>,
    #[serde(default)]
    pub presente_id: Option<String>,
}

impl CancelInput {
    pub fn new(guest: impl Into<String>, gift_id: impl Into<String>) -> Self {
        Self {
            nome_usuario: Some(guest.into()),
            presente_id: Some(gift_id.into()),
        }
    }
}

/// Uniform response envelope for the mutation endpoints and for every error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presente: Option<Gift>,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            presente: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            presente: None,
        }
    }

    pub fn with_gift(mut self, gift: Gift) -> Self {
        self.presente = Some(gift);
        self
    }
}

/// Per-guest counters shown next to the gift list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestSummary {
    /// Gifts nobody has reserved yet.
    pub disponiveis: usize,
    /// Gifts reserved by this guest.
    pub reservados: usize,
    /// Gifts reserved by this guest and already confirmed.
    pub confirmados: usize,
}

/// Response of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
