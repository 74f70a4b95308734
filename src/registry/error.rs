use thiserror::Error;

use super::name::NameError;
use crate::store::StoreError;

/// How a [`RegistryError`] should be reported to a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing input.
    Validation,
    /// Unknown gift or reservation.
    NotFound,
    /// Storage failure.
    Internal,
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("ID do presente e nome do usuário são obrigatórios")]
    MissingField(&'static str),

    #[error("Nome inválido")]
    InvalidName(#[from] NameError),

    #[error("Presente não encontrado")]
    GiftNotFound(String),

    #[error("Nenhuma reserva encontrada para este nome e presente")]
    ReservationNotFound,

    #[error("storage failure: {0}")]
    Persistence(#[from] StoreError),
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField(_) | Self::InvalidName(_) => ErrorKind::Validation,
            Self::GiftNotFound(_) | Self::ReservationNotFound => ErrorKind::NotFound,
            Self::Persistence(_) => ErrorKind::Internal,
        }
    }

    /// Whether the failure happened before anything was written.
    pub fn is_read_failure(&self) -> bool {
        matches!(self, Self::Persistence(e) if e.is_read())
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
