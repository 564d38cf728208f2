//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y su estado de disponibilidad.
//! El estado se muta únicamente a través del `AvailabilityRegistry`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Estado del vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VehicleState {
    #[serde(rename = "disponible")]
    Available,
    #[serde(rename = "alquilado")]
    Rented,
    #[serde(rename = "mantenimiento")]
    Maintenance,
}

impl VehicleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleState::Available => "disponible",
            VehicleState::Rented => "alquilado",
            VehicleState::Maintenance => "mantenimiento",
        }
    }
}

impl std::fmt::Display for VehicleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vehículo de la flota
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub daily_tariff: Decimal,
    pub requires_adult: bool,
    pub state: VehicleState,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn new(code: &str, name: &str, daily_tariff: Decimal, requires_adult: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.to_uppercase(),
            name: name.to_string(),
            description: None,
            daily_tariff,
            requires_adult,
            state: VehicleState::Available,
            created_at: Utc::now(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.state == VehicleState::Available
    }
}
