//! Servicio de elegibilidad
//!
//! Valida si el cliente puede alquilar un vehículo según su edad. Sólo
//! aplica a vehículos que requieren mayoría de edad.

use chrono::{Datelike, NaiveDate, Utc};

use crate::models::customer::Customer;
use crate::models::vehicle::Vehicle;
use crate::utils::errors::{AppError, AppResult};

/// Edad mínima para los vehículos que requieren mayoría de edad
pub const ADULT_AGE: i32 = 18;

/// Calcula la edad en años cumplidos a una fecha de referencia
pub fn age_in_years(birth_date: NaiveDate, on_date: NaiveDate) -> i32 {
    let mut age = on_date.year() - birth_date.year();

    // Ajustar si aún no cumplió años este año
    if (on_date.month(), on_date.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }

    age
}

/// Valida la elegibilidad del cliente usando la fecha actual
pub fn check_eligibility(customer: &Customer, vehicle: &Vehicle) -> AppResult<()> {
    check_eligibility_on(customer, vehicle, Utc::now().date_naive())
}

/// Valida la elegibilidad a una fecha de referencia explícita
pub fn check_eligibility_on(
    customer: &Customer,
    vehicle: &Vehicle,
    today: NaiveDate,
) -> AppResult<()> {
    if !vehicle.requires_adult {
        return Ok(());
    }

    if age_in_years(customer.birth_date, today) < ADULT_AGE {
        return Err(AppError::IneligibleAge(vehicle.name.clone()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn customer_born(birth: NaiveDate) -> Customer {
        Customer::new("40555666", "Lucía", "Pereyra", birth, false)
    }

    fn adult_only_vehicle() -> Vehicle {
        Vehicle::new("mt-07", "Moto Eléctrica", Decimal::from(35), true)
    }

    #[test]
    fn test_age_counts_whole_years() {
        let birth = date(2000, 6, 15);

        assert_eq!(age_in_years(birth, date(2026, 6, 15)), 26); // cumpleaños
        assert_eq!(age_in_years(birth, date(2026, 6, 14)), 25); // un día antes
        assert_eq!(age_in_years(birth, date(2026, 6, 16)), 26);
    }

    #[test]
    fn test_exactly_eighteen_is_eligible() {
        let customer = customer_born(date(2008, 3, 10));
        let vehicle = adult_only_vehicle();

        assert!(check_eligibility_on(&customer, &vehicle, date(2026, 3, 10)).is_ok());
    }

    #[test]
    fn test_day_before_eighteenth_birthday_is_rejected() {
        let customer = customer_born(date(2008, 3, 10));
        let vehicle = adult_only_vehicle();

        let err = check_eligibility_on(&customer, &vehicle, date(2026, 3, 9)).unwrap_err();
        assert!(matches!(err, AppError::IneligibleAge(ref name) if name == "Moto Eléctrica"));
    }

    #[test]
    fn test_minor_can_rent_when_adult_not_required() {
        let customer = customer_born(date(2014, 1, 1));
        let vehicle = Vehicle::new("bk-01", "Bicicleta Eléctrica", Decimal::from(15), false);

        assert!(check_eligibility_on(&customer, &vehicle, date(2026, 8, 30)).is_ok());
    }
}
