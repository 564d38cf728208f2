use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::dto::rental_dto::RentalFilters;
use crate::models::rental::{Rental, RentalReturn, RentalState};
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Contrato de almacenamiento de alquileres y devoluciones
#[async_trait]
pub trait RentalStore: Send + Sync {
    async fn insert_rental(&self, rental: Rental) -> AppResult<Rental>;

    async fn get_rental(&self, id: Uuid) -> AppResult<Rental>;

    /// Transición guardada de estado: aplica sólo si el estado actual
    /// coincide con `expected`. Protege la inmutabilidad de los estados
    /// terminales incluso ante llamadas concurrentes.
    async fn set_rental_state(
        &self,
        id: Uuid,
        expected: RentalState,
        next: RentalState,
    ) -> AppResult<Rental>;

    /// Lista alquileres como colección propia (sin aliasing), más reciente
    /// primero
    async fn list_rentals(&self, filters: &RentalFilters) -> AppResult<Vec<Rental>>;

    async fn active_rental_for_vehicle(&self, vehicle_id: Uuid) -> AppResult<Option<Rental>>;

    async fn active_rentals_for_customer(&self, customer_id: Uuid) -> AppResult<Vec<Rental>>;

    /// Registra la devolución; a lo sumo una por alquiler
    async fn insert_return(&self, record: RentalReturn) -> AppResult<RentalReturn>;

    async fn get_return_for_rental(&self, rental_id: Uuid) -> AppResult<Option<RentalReturn>>;

    async fn list_returns(&self) -> AppResult<Vec<RentalReturn>>;
}

/// Implementación en memoria. Las devoluciones se indexan por alquiler,
/// lo que hace estructural la restricción 1:1.
#[derive(Clone, Default)]
pub struct InMemoryRentalStore {
    rentals: Arc<RwLock<HashMap<Uuid, Rental>>>,
    returns: Arc<RwLock<HashMap<Uuid, RentalReturn>>>,
}

impl InMemoryRentalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RentalStore for InMemoryRentalStore {
    async fn insert_rental(&self, rental: Rental) -> AppResult<Rental> {
        let mut rentals = self.rentals.write().await;
        if rentals.contains_key(&rental.id) {
            return Err(AppError::Conflict(format!(
                "ya existe un alquiler con id '{}'",
                rental.id
            )));
        }
        rentals.insert(rental.id, rental.clone());
        Ok(rental)
    }

    async fn get_rental(&self, id: Uuid) -> AppResult<Rental> {
        let rentals = self.rentals.read().await;
        rentals
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found_error("Alquiler", &id))
    }

    async fn set_rental_state(
        &self,
        id: Uuid,
        expected: RentalState,
        next: RentalState,
    ) -> AppResult<Rental> {
        let mut rentals = self.rentals.write().await;
        let rental = rentals
            .get_mut(&id)
            .ok_or_else(|| not_found_error("Alquiler", &id))?;

        if rental.state != expected {
            return Err(AppError::InvalidTransition(format!(
                "el alquiler {} no está en estado '{}' (estado: {})",
                id, expected, rental.state
            )));
        }

        rental.state = next;
        Ok(rental.clone())
    }

    async fn list_rentals(&self, filters: &RentalFilters) -> AppResult<Vec<Rental>> {
        let rentals = self.rentals.read().await;
        let mut result: Vec<Rental> = rentals
            .values()
            .filter(|r| filters.state.map_or(true, |s| r.state == s))
            .filter(|r| filters.customer_id.map_or(true, |c| r.customer_id == c))
            .cloned()
            .collect();

        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let offset = filters.offset.unwrap_or(0);
        let limit = filters.limit.unwrap_or(100);
        Ok(result.into_iter().skip(offset).take(limit).collect())
    }

    async fn active_rental_for_vehicle(&self, vehicle_id: Uuid) -> AppResult<Option<Rental>> {
        let rentals = self.rentals.read().await;
        Ok(rentals
            .values()
            .find(|r| r.vehicle_id == vehicle_id && r.is_active())
            .cloned())
    }

    async fn active_rentals_for_customer(&self, customer_id: Uuid) -> AppResult<Vec<Rental>> {
        let rentals = self.rentals.read().await;
        Ok(rentals
            .values()
            .filter(|r| r.customer_id == customer_id && r.is_active())
            .cloned()
            .collect())
    }

    async fn insert_return(&self, record: RentalReturn) -> AppResult<RentalReturn> {
        let mut returns = self.returns.write().await;
        if returns.contains_key(&record.rental_id) {
            return Err(AppError::DuplicateReturn);
        }
        returns.insert(record.rental_id, record.clone());
        Ok(record)
    }

    async fn get_return_for_rental(&self, rental_id: Uuid) -> AppResult<Option<RentalReturn>> {
        let returns = self.returns.read().await;
        Ok(returns.get(&rental_id).cloned())
    }

    async fn list_returns(&self) -> AppResult<Vec<RentalReturn>> {
        let returns = self.returns.read().await;
        let mut result: Vec<RentalReturn> = returns.values().cloned().collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;

    fn sample_rental(customer_id: Uuid, vehicle_id: Uuid) -> Rental {
        Rental {
            id: Uuid::new_v4(),
            customer_id,
            vehicle_id,
            start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            tentative_return_date: NaiveDate::from_ymd_opt(2026, 3, 7).unwrap(),
            days: 6,
            base_amount: Decimal::new(15000, 2),
            extended_discount: Decimal::new(2250, 2),
            frequent_discount: Decimal::new(1275, 2),
            deposit: Decimal::new(1800, 2),
            total_due: Decimal::new(13275, 2),
            state: RentalState::Active,
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn sample_return(rental_id: Uuid) -> RentalReturn {
        RentalReturn {
            id: Uuid::new_v4(),
            rental_id,
            actual_return_date: NaiveDate::from_ymd_opt(2026, 3, 7).unwrap(),
            late_days: 0,
            fine: Decimal::ZERO,
            deposit_returned: Decimal::new(1800, 2),
            extra_due: Decimal::ZERO,
            final_total: Decimal::new(11475, 2),
            observations: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_set_rental_state_guards_terminal_states() {
        let store = InMemoryRentalStore::new();
        let rental = store
            .insert_rental(sample_rental(Uuid::new_v4(), Uuid::new_v4()))
            .await
            .unwrap();

        let cancelled = store
            .set_rental_state(rental.id, RentalState::Active, RentalState::Cancelled)
            .await
            .unwrap();
        assert_eq!(cancelled.state, RentalState::Cancelled);

        // Un estado terminal no admite más transiciones
        let err = store
            .set_rental_state(rental.id, RentalState::Active, RentalState::Returned)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(_)));
    }

    #[tokio::test]
    async fn test_insert_return_is_unique_per_rental() {
        let store = InMemoryRentalStore::new();
        let rental = store
            .insert_rental(sample_rental(Uuid::new_v4(), Uuid::new_v4()))
            .await
            .unwrap();

        store.insert_return(sample_return(rental.id)).await.unwrap();

        let err = store.insert_return(sample_return(rental.id)).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateReturn));
    }

    #[tokio::test]
    async fn test_list_rentals_filters() {
        let store = InMemoryRentalStore::new();
        let customer_a = Uuid::new_v4();
        let customer_b = Uuid::new_v4();

        let r1 = store
            .insert_rental(sample_rental(customer_a, Uuid::new_v4()))
            .await
            .unwrap();
        let r2 = store
            .insert_rental(sample_rental(customer_b, Uuid::new_v4()))
            .await
            .unwrap();
        store
            .set_rental_state(r2.id, RentalState::Active, RentalState::Cancelled)
            .await
            .unwrap();

        let active = store
            .list_rentals(&RentalFilters {
                state: Some(RentalState::Active),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, r1.id);

        let by_customer = store
            .list_rentals(&RentalFilters {
                customer_id: Some(customer_b),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_customer.len(), 1);
        assert_eq!(by_customer[0].id, r2.id);
    }

    #[tokio::test]
    async fn test_active_rental_queries() {
        let store = InMemoryRentalStore::new();
        let customer_id = Uuid::new_v4();
        let vehicle_id = Uuid::new_v4();

        let rental = store
            .insert_rental(sample_rental(customer_id, vehicle_id))
            .await
            .unwrap();

        let found = store.active_rental_for_vehicle(vehicle_id).await.unwrap();
        assert_eq!(found.unwrap().id, rental.id);

        let for_customer = store.active_rentals_for_customer(customer_id).await.unwrap();
        assert_eq!(for_customer.len(), 1);

        store
            .set_rental_state(rental.id, RentalState::Active, RentalState::Returned)
            .await
            .unwrap();
        assert!(store
            .active_rental_for_vehicle(vehicle_id)
            .await
            .unwrap()
            .is_none());
    }
}
