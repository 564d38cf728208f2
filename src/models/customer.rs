//! Modelo de Customer
//!
//! Los clientes son propiedad del sistema externo; el motor de alquileres
//! sólo los lee (fecha de nacimiento y marca de cliente frecuente).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub dni: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub is_frequent: bool,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(
        dni: &str,
        first_name: &str,
        last_name: &str,
        birth_date: NaiveDate,
        is_frequent: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            dni: dni.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            birth_date,
            is_frequent,
            created_at: Utc::now(),
        }
    }
}
