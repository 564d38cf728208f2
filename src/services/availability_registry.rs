//! Registro de disponibilidad de vehículos
//!
//! Único punto de mutación del estado de los vehículos. `reserve` es un
//! check-and-set atómico: ante llamadas concurrentes por el mismo vehículo
//! exactamente una observa `Available` y transiciona; las demás fallan con
//! el estado posterior a la transición.

use std::sync::Arc;

use uuid::Uuid;

use crate::models::vehicle::{Vehicle, VehicleState};
use crate::repositories::vehicle_store::VehicleStore;
use crate::utils::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct AvailabilityRegistry {
    vehicles: Arc<dyn VehicleStore>,
}

impl AvailabilityRegistry {
    pub fn new(vehicles: Arc<dyn VehicleStore>) -> Self {
        Self { vehicles }
    }

    /// Reserva el vehículo para un alquiler (Available → Rented)
    pub async fn reserve(&self, vehicle_id: Uuid) -> AppResult<Vehicle> {
        match self
            .vehicles
            .compare_and_set_state(vehicle_id, VehicleState::Available, VehicleState::Rented)
            .await
        {
            Ok(vehicle) => {
                log::info!("🔒 Vehículo {} reservado", vehicle_id);
                Ok(vehicle)
            }
            Err(AppError::Conflict(state)) => Err(AppError::VehicleUnavailable(state)),
            Err(e) => Err(e),
        }
    }

    /// Libera el vehículo al cancelar o completar un alquiler
    pub async fn release(&self, vehicle_id: Uuid) -> AppResult<Vehicle> {
        let vehicle = self
            .vehicles
            .set_state(vehicle_id, VehicleState::Available)
            .await?;
        log::info!("🔓 Vehículo {} liberado", vehicle_id);
        Ok(vehicle)
    }

    /// Envía un vehículo disponible a mantenimiento
    pub async fn send_to_maintenance(&self, vehicle_id: Uuid) -> AppResult<Vehicle> {
        match self
            .vehicles
            .compare_and_set_state(vehicle_id, VehicleState::Available, VehicleState::Maintenance)
            .await
        {
            Ok(vehicle) => {
                log::info!("🔧 Vehículo {} enviado a mantenimiento", vehicle_id);
                Ok(vehicle)
            }
            Err(AppError::Conflict(state)) => Err(AppError::VehicleUnavailable(state)),
            Err(e) => Err(e),
        }
    }

    /// Reincorpora un vehículo desde mantenimiento
    pub async fn reactivate(&self, vehicle_id: Uuid) -> AppResult<Vehicle> {
        match self
            .vehicles
            .compare_and_set_state(vehicle_id, VehicleState::Maintenance, VehicleState::Available)
            .await
        {
            Ok(vehicle) => {
                log::info!("✅ Vehículo {} disponible nuevamente", vehicle_id);
                Ok(vehicle)
            }
            Err(AppError::Conflict(state)) => Err(AppError::Conflict(format!(
                "el vehículo {} no está en mantenimiento (estado: {})",
                vehicle_id, state
            ))),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::vehicle_store::InMemoryVehicleStore;
    use rust_decimal::Decimal;

    async fn registry_with_vehicle() -> (AvailabilityRegistry, Vehicle) {
        let store = Arc::new(InMemoryVehicleStore::new());
        let vehicle = store
            .insert(Vehicle::new("sc-01", "Scooter Urbano", Decimal::from(25), false))
            .await
            .unwrap();
        (AvailabilityRegistry::new(store), vehicle)
    }

    #[tokio::test]
    async fn test_reserve_and_release() {
        let (registry, vehicle) = registry_with_vehicle().await;

        let reserved = registry.reserve(vehicle.id).await.unwrap();
        assert_eq!(reserved.state, VehicleState::Rented);

        let err = registry.reserve(vehicle.id).await.unwrap_err();
        assert!(matches!(err, AppError::VehicleUnavailable(ref s) if s == "alquilado"));

        let released = registry.release(vehicle.id).await.unwrap();
        assert_eq!(released.state, VehicleState::Available);
    }

    #[tokio::test]
    async fn test_reserve_in_maintenance_fails() {
        let (registry, vehicle) = registry_with_vehicle().await;

        registry.send_to_maintenance(vehicle.id).await.unwrap();

        let err = registry.reserve(vehicle.id).await.unwrap_err();
        assert!(matches!(err, AppError::VehicleUnavailable(ref s) if s == "mantenimiento"));

        let reactivated = registry.reactivate(vehicle.id).await.unwrap();
        assert_eq!(reactivated.state, VehicleState::Available);
    }

    #[tokio::test]
    async fn test_cannot_send_rented_vehicle_to_maintenance() {
        let (registry, vehicle) = registry_with_vehicle().await;

        registry.reserve(vehicle.id).await.unwrap();

        let err = registry.send_to_maintenance(vehicle.id).await.unwrap_err();
        assert!(matches!(err, AppError::VehicleUnavailable(_)));
    }

    #[tokio::test]
    async fn test_concurrent_reserves_have_exactly_one_winner() {
        let (registry, vehicle) = registry_with_vehicle().await;

        let mut handles = Vec::new();
        for _ in 0..16 {
            let registry = registry.clone();
            let vehicle_id = vehicle.id;
            handles.push(tokio::spawn(async move {
                registry.reserve(vehicle_id).await
            }));
        }

        let mut winners = 0;
        let mut losers = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => winners += 1,
                Err(AppError::VehicleUnavailable(_)) => losers += 1,
                Err(e) => panic!("unexpected error: {}", e),
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(losers, 15);
    }
}
