//! Services module
//!
//! Este módulo contiene la lógica de negocio del motor de alquileres:
//! las calculadoras puras de precios y liquidación, la validación de
//! elegibilidad, el registro de disponibilidad y el servicio de ciclo de
//! vida que los orquesta.

pub mod availability_registry;
pub mod eligibility_service;
pub mod pricing_service;
pub mod rental_service;
pub mod settlement_service;

pub use availability_registry::AvailabilityRegistry;
pub use pricing_service::{calculate_pricing, PricingBreakdown};
pub use rental_service::RentalService;
pub use settlement_service::{calculate_settlement, SettlementBreakdown};
