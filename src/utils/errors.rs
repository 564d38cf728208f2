//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del motor de alquileres.
//! Cada operación reporta exactamente un error: la primera precondición
//! violada según el orden de verificación del servicio.

use thiserror::Error;
use uuid::Uuid;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] validator::ValidationErrors),

    #[error("El cliente debe ser mayor de 18 años para alquilar {0}")]
    IneligibleAge(String),

    #[error("El vehículo no está disponible (estado: {0})")]
    VehicleUnavailable(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Ya existe una devolución para este alquiler")]
    DuplicateReturn,

    #[error("{0} no encontrado")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &Uuid) -> AppError {
    AppError::NotFound(format!("{} '{}'", resource, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AppError::IneligibleAge("Scooter Urbano".to_string());
        assert_eq!(
            err.to_string(),
            "El cliente debe ser mayor de 18 años para alquilar Scooter Urbano"
        );

        let err = AppError::VehicleUnavailable("alquilado".to_string());
        assert_eq!(err.to_string(), "El vehículo no está disponible (estado: alquilado)");
    }

    #[test]
    fn test_not_found_helper() {
        let id = Uuid::nil();
        let err = not_found_error("Vehículo", &id);
        assert!(err.to_string().starts_with("Vehículo"));
        assert!(err.to_string().ends_with("no encontrado"));
    }
}
