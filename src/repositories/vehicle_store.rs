use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::vehicle::{Vehicle, VehicleState};
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Contrato de almacenamiento de vehículos
#[async_trait]
pub trait VehicleStore: Send + Sync {
    async fn get(&self, id: Uuid) -> AppResult<Vehicle>;

    async fn insert(&self, vehicle: Vehicle) -> AppResult<Vehicle>;

    async fn list(&self, state: Option<VehicleState>) -> AppResult<Vec<Vehicle>>;

    /// Transición atómica de estado: aplica sólo si el estado actual
    /// coincide con `expected`; si no, devuelve `Conflict` con el estado
    /// observado. Es la primitiva que respalda `reserve`.
    async fn compare_and_set_state(
        &self,
        id: Uuid,
        expected: VehicleState,
        next: VehicleState,
    ) -> AppResult<Vehicle>;

    /// Transición incondicional de estado (liberación del vehículo)
    async fn set_state(&self, id: Uuid, next: VehicleState) -> AppResult<Vehicle>;
}

/// Implementación en memoria
#[derive(Clone, Default)]
pub struct InMemoryVehicleStore {
    vehicles: Arc<RwLock<HashMap<Uuid, Vehicle>>>,
}

impl InMemoryVehicleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleStore for InMemoryVehicleStore {
    async fn get(&self, id: Uuid) -> AppResult<Vehicle> {
        let vehicles = self.vehicles.read().await;
        vehicles
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found_error("Vehículo", &id))
    }

    async fn insert(&self, vehicle: Vehicle) -> AppResult<Vehicle> {
        let mut vehicles = self.vehicles.write().await;
        if vehicles.contains_key(&vehicle.id) {
            return Err(AppError::Conflict(format!(
                "ya existe un vehículo con id '{}'",
                vehicle.id
            )));
        }
        vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle)
    }

    async fn list(&self, state: Option<VehicleState>) -> AppResult<Vec<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        let mut result: Vec<Vehicle> = vehicles
            .values()
            .filter(|v| state.map_or(true, |s| v.state == s))
            .cloned()
            .collect();
        result.sort_by_key(|v| v.created_at);
        Ok(result)
    }

    async fn compare_and_set_state(
        &self,
        id: Uuid,
        expected: VehicleState,
        next: VehicleState,
    ) -> AppResult<Vehicle> {
        // Verificación y transición bajo el mismo write lock: ante llamadas
        // concurrentes exactamente una observa `expected`
        let mut vehicles = self.vehicles.write().await;
        let vehicle = vehicles
            .get_mut(&id)
            .ok_or_else(|| not_found_error("Vehículo", &id))?;

        if vehicle.state != expected {
            return Err(AppError::Conflict(vehicle.state.as_str().to_string()));
        }

        vehicle.state = next;
        Ok(vehicle.clone())
    }

    async fn set_state(&self, id: Uuid, next: VehicleState) -> AppResult<Vehicle> {
        let mut vehicles = self.vehicles.write().await;
        let vehicle = vehicles
            .get_mut(&id)
            .ok_or_else(|| not_found_error("Vehículo", &id))?;

        vehicle.state = next;
        Ok(vehicle.clone())
    }
}
