//! Servicio de ciclo de vida de alquileres
//!
//! Orquesta la creación, cancelación y devolución de alquileres aplicando
//! la máquina de estados Active → Returned | Cancelled (ambos terminales).
//! Un vehículo está Rented si y sólo si exactamente un alquiler activo lo
//! referencia; la reserva atómica del registro de disponibilidad sostiene
//! esa correspondencia sin brechas observables.
//!
//! Orden de verificación en cada operación: existencia → validez de la
//! transición → forma de la request → reglas de negocio (fechas,
//! elegibilidad, disponibilidad). La primera precondición violada
//! determina el único error devuelto.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use crate::dto::rental_dto::{CompleteRentalRequest, CreateRentalRequest, RentalFilters};
use crate::models::rental::{Rental, RentalReturn, RentalState};
use crate::models::vehicle::Vehicle;
use crate::repositories::customer_store::CustomerStore;
use crate::repositories::rental_store::RentalStore;
use crate::repositories::vehicle_store::VehicleStore;
use crate::services::availability_registry::AvailabilityRegistry;
use crate::services::eligibility_service::check_eligibility;
use crate::services::pricing_service::{calculate_pricing, PricingBreakdown};
use crate::services::settlement_service::{calculate_settlement, SettlementBreakdown};
use crate::utils::errors::{AppError, AppResult};

pub struct RentalService {
    vehicles: Arc<dyn VehicleStore>,
    customers: Arc<dyn CustomerStore>,
    rentals: Arc<dyn RentalStore>,
    registry: AvailabilityRegistry,
}

impl RentalService {
    pub fn new(
        vehicles: Arc<dyn VehicleStore>,
        customers: Arc<dyn CustomerStore>,
        rentals: Arc<dyn RentalStore>,
    ) -> Self {
        let registry = AvailabilityRegistry::new(vehicles.clone());
        Self {
            vehicles,
            customers,
            rentals,
            registry,
        }
    }

    pub fn registry(&self) -> &AvailabilityRegistry {
        &self.registry
    }

    /// Calcula el costo del alquiler sin crear el registro (preview)
    pub async fn quote(&self, request: &CreateRentalRequest) -> AppResult<PricingBreakdown> {
        let customer = self.customers.get(request.customer_id).await?;
        let vehicle = self.vehicles.get(request.vehicle_id).await?;

        // La existencia se verifica antes que la forma de la request
        request.validate()?;
        validate_rental_dates(request.start_date, request.tentative_return_date)?;
        validate_tariff(&vehicle)?;

        Ok(calculate_pricing(
            request.start_date,
            request.tentative_return_date,
            vehicle.daily_tariff,
            customer.is_frequent,
        ))
    }

    /// Crea un nuevo alquiler activo reservando el vehículo
    pub async fn create(&self, request: &CreateRentalRequest) -> AppResult<Rental> {
        let customer = self.customers.get(request.customer_id).await?;
        let vehicle = self.vehicles.get(request.vehicle_id).await?;

        request.validate()?;
        validate_rental_dates(request.start_date, request.tentative_return_date)?;
        validate_tariff(&vehicle)?;

        // Elegibilidad antes de tocar el estado del vehículo: un rechazo
        // por edad no debe dejar rastro
        check_eligibility(&customer, &vehicle)?;

        // Reserva atómica: de varios create concurrentes por el mismo
        // vehículo sólo uno la obtiene
        self.registry.reserve(vehicle.id).await?;

        let pricing = calculate_pricing(
            request.start_date,
            request.tentative_return_date,
            vehicle.daily_tariff,
            customer.is_frequent,
        );

        let rental = Rental {
            id: Uuid::new_v4(),
            customer_id: customer.id,
            vehicle_id: vehicle.id,
            start_date: request.start_date,
            tentative_return_date: request.tentative_return_date,
            days: pricing.days,
            base_amount: pricing.base_amount,
            extended_discount: pricing.extended_discount,
            frequent_discount: pricing.frequent_discount,
            deposit: pricing.deposit,
            total_due: pricing.total_due,
            state: RentalState::Active,
            notes: request.notes.clone(),
            created_at: Utc::now(),
        };

        match self.rentals.insert_rental(rental).await {
            Ok(stored) => {
                log::info!(
                    "✅ Alquiler {} creado para el vehículo {} ({} días, total {})",
                    stored.id,
                    vehicle.id,
                    stored.days,
                    stored.total_due
                );
                Ok(stored)
            }
            Err(e) => {
                // No dejar el vehículo reservado sin alquiler activo
                if let Err(release_err) = self.registry.release(vehicle.id).await {
                    log::warn!(
                        "⚠️ No se pudo liberar el vehículo {} tras fallar el alta del alquiler: {}",
                        vehicle.id,
                        release_err
                    );
                }
                Err(e)
            }
        }
    }

    /// Cancela un alquiler activo y libera el vehículo
    pub async fn cancel(&self, rental_id: Uuid) -> AppResult<Rental> {
        let rental = self.rentals.get_rental(rental_id).await?;

        ensure_active(&rental)?;

        // La transición terminal guardada va primero: de dos cancelaciones
        // concurrentes sólo la ganadora del CAS libera el vehículo, y el
        // vehículo nunca queda disponible con su alquiler todavía activo
        let cancelled = self
            .rentals
            .set_rental_state(rental.id, RentalState::Active, RentalState::Cancelled)
            .await?;
        self.registry.release(rental.vehicle_id).await?;

        log::info!("🚫 Alquiler {} cancelado", cancelled.id);
        Ok(cancelled)
    }

    /// Calcula la liquidación sin registrar la devolución (preview)
    pub async fn quote_settlement(
        &self,
        rental_id: Uuid,
        actual_return_date: NaiveDate,
    ) -> AppResult<SettlementBreakdown> {
        let rental = self.rentals.get_rental(rental_id).await?;

        ensure_active(&rental)?;

        Ok(calculate_settlement(&rental, actual_return_date))
    }

    /// Registra la devolución: liquida la multa contra el depósito, libera
    /// el vehículo y cierra el alquiler
    pub async fn complete(
        &self,
        rental_id: Uuid,
        request: &CompleteRentalRequest,
    ) -> AppResult<(Rental, RentalReturn)> {
        let rental = self.rentals.get_rental(rental_id).await?;

        ensure_active(&rental)?;

        request.validate()?;

        if self.rentals.get_return_for_rental(rental.id).await?.is_some() {
            return Err(AppError::DuplicateReturn);
        }

        let settlement = calculate_settlement(&rental, request.actual_return_date);

        // La transición terminal precede a la liberación: el vehículo no
        // queda disponible mientras el alquiler siga activo
        let returned = self
            .rentals
            .set_rental_state(rental.id, RentalState::Active, RentalState::Returned)
            .await?;
        self.registry.release(rental.vehicle_id).await?;

        let record = RentalReturn {
            id: Uuid::new_v4(),
            rental_id: rental.id,
            actual_return_date: request.actual_return_date,
            late_days: settlement.late_days,
            fine: settlement.fine,
            deposit_returned: settlement.deposit_returned,
            extra_due: settlement.extra_due,
            final_total: settlement.final_total,
            observations: request.observations.clone(),
            created_at: Utc::now(),
        };
        let stored = self.rentals.insert_return(record).await?;

        log::info!(
            "✅ Devolución del alquiler {} registrada ({} días de mora, total final {})",
            rental.id,
            stored.late_days,
            stored.final_total
        );
        Ok((returned, stored))
    }

    pub async fn get_rental(&self, rental_id: Uuid) -> AppResult<Rental> {
        self.rentals.get_rental(rental_id).await
    }

    pub async fn list_rentals(&self, filters: &RentalFilters) -> AppResult<Vec<Rental>> {
        self.rentals.list_rentals(filters).await
    }

    pub async fn active_rentals_for_customer(&self, customer_id: Uuid) -> AppResult<Vec<Rental>> {
        self.rentals.active_rentals_for_customer(customer_id).await
    }

    pub async fn active_rental_for_vehicle(&self, vehicle_id: Uuid) -> AppResult<Option<Rental>> {
        self.rentals.active_rental_for_vehicle(vehicle_id).await
    }

    pub async fn get_return(&self, rental_id: Uuid) -> AppResult<Option<RentalReturn>> {
        self.rentals.get_return_for_rental(rental_id).await
    }

    pub async fn list_returns(&self) -> AppResult<Vec<RentalReturn>> {
        self.rentals.list_returns().await
    }
}

fn ensure_active(rental: &Rental) -> AppResult<()> {
    if !rental.is_active() {
        return Err(AppError::InvalidTransition(format!(
            "el alquiler {} no está activo (estado: {})",
            rental.id, rental.state
        )));
    }
    Ok(())
}

fn validate_rental_dates(start_date: NaiveDate, tentative_return_date: NaiveDate) -> AppResult<()> {
    if tentative_return_date < start_date {
        return Err(AppError::Validation(
            "La fecha de devolución debe ser posterior a la fecha de inicio".to_string(),
        ));
    }
    Ok(())
}

fn validate_tariff(vehicle: &Vehicle) -> AppResult<()> {
    if vehicle.daily_tariff <= Decimal::ZERO {
        return Err(AppError::Validation(format!(
            "La tarifa diaria del vehículo {} debe ser positiva",
            vehicle.code
        )));
    }
    Ok(())
}
