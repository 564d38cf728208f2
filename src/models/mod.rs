//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos del motor de alquileres.
//! Los importes monetarios usan `Decimal` y se redondean a 2 decimales
//! únicamente al armar el registro de salida.

pub mod customer;
pub mod rental;
pub mod vehicle;
