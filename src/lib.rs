//! ECO-MOVE Rental Engine
//!
//! Motor de precios y ciclo de vida para el alquiler de vehículos
//! eléctricos: calculadoras de costo y liquidación, validación de
//! elegibilidad y la máquina de estados alquiler/vehículo.
//!
//! El transporte HTTP, la persistencia real y el control de acceso viven
//! fuera de este crate; los colaboradores externos se consumen a través de
//! los contratos de `repositories`.

pub mod dto;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;

pub use utils::errors::{AppError, AppResult};
