//! Modelos de Alquiler y Devolución
//!
//! El alquiler congela el desglose de costos calculado al momento de la
//! creación; una vez en estado terminal (devuelto o cancelado) el registro
//! es inmutable. La devolución es 1:1 con el alquiler y se crea a lo sumo
//! una vez, sólo mientras el alquiler está activo.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Estado del alquiler
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RentalState {
    #[serde(rename = "activo")]
    Active,
    #[serde(rename = "devuelto")]
    Returned,
    #[serde(rename = "cancelado")]
    Cancelled,
}

impl RentalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalState::Active => "activo",
            RentalState::Returned => "devuelto",
            RentalState::Cancelled => "cancelado",
        }
    }

    /// Returned y Cancelled no admiten más transiciones
    pub fn is_terminal(&self) -> bool {
        matches!(self, RentalState::Returned | RentalState::Cancelled)
    }
}

impl std::fmt::Display for RentalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alquiler con el desglose de costos contratado
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rental {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub start_date: NaiveDate,
    pub tentative_return_date: NaiveDate,
    pub days: i64,
    pub base_amount: Decimal,
    pub extended_discount: Decimal,
    pub frequent_discount: Decimal,
    pub deposit: Decimal,
    pub total_due: Decimal,
    pub state: RentalState,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Rental {
    pub fn is_active(&self) -> bool {
        self.state == RentalState::Active
    }
}

/// Devolución registrada al completar un alquiler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalReturn {
    pub id: Uuid,
    pub rental_id: Uuid,
    pub actual_return_date: NaiveDate,
    pub late_days: i64,
    pub fine: Decimal,
    pub deposit_returned: Decimal,
    pub extra_due: Decimal,
    pub final_total: Decimal,
    pub observations: Option<String>,
    pub created_at: DateTime<Utc>,
}
