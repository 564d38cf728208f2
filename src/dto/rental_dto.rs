use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::rental::RentalState;

// Request para crear un alquiler (también usado para el preview de costos)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRentalRequest {
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub start_date: NaiveDate,
    pub tentative_return_date: NaiveDate,

    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

// Request para registrar la devolución de un alquiler activo
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CompleteRentalRequest {
    pub actual_return_date: NaiveDate,

    #[validate(length(max = 500))]
    pub observations: Option<String>,
}

/// Filtros para búsqueda de alquileres
#[derive(Debug, Default, Deserialize)]
pub struct RentalFilters {
    pub state: Option<RentalState>,
    pub customer_id: Option<Uuid>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}
