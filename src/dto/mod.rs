//! DTOs de entrada del motor
//!
//! Requests y filtros que la capa externa (API) arma antes de invocar los
//! servicios.

pub mod rental_dto;
