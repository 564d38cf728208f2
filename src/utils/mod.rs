//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores y de importes
//! monetarios comunes a todos los servicios.

pub mod errors;
pub mod money;
