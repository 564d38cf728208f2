//! Repositorios del sistema
//!
//! Contratos de almacenamiento que consume el motor. La persistencia real
//! es un colaborador externo; las implementaciones en memoria de este
//! módulo respaldan el registro de disponibilidad y los tests.

pub mod customer_store;
pub mod rental_store;
pub mod vehicle_store;
