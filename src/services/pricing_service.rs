//! Servicio de cálculo de precios
//!
//! Calculadora pura y determinista: fechas del alquiler + tarifa diaria →
//! desglose de costos. Reglas de negocio:
//! - DÍAS: fecha tentativa de devolución - fecha de inicio (mínimo 1)
//! - IMPORTE: días × tarifa diaria
//! - DESCUENTO USO EXTENDIDO: 15% si días > 5
//! - DESCUENTO CLIENTE FRECUENTE: 10% adicional sobre el importe ya
//!   descontado
//! - DEPÓSITO: 12% del importe original, sin descuentos
//! - TOTAL: importe - descuentos + depósito

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::money::round_money;

/// Días mínimos para acceder al descuento por uso extendido
pub const EXTENDED_USE_MIN_DAYS: i64 = 5;

/// Desglose de costos del alquiler. Registro de salida opaco: la capa de
/// persistencia y presentación lo consume tal cual, sin recomputar nada.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingBreakdown {
    pub days: i64,
    pub base_amount: Decimal,
    pub extended_discount: Decimal,
    pub frequent_discount: Decimal,
    pub deposit: Decimal,
    pub total_due: Decimal,
}

/// Calcula el desglose de costos de un alquiler.
///
/// Las fórmulas intermedias trabajan con precisión completa; cada campo se
/// redondea a 2 decimales de forma independiente al armar el resultado.
pub fn calculate_pricing(
    start_date: NaiveDate,
    tentative_return_date: NaiveDate,
    daily_tariff: Decimal,
    is_frequent_customer: bool,
) -> PricingBreakdown {
    let extended_use_rate = Decimal::new(15, 2); // 15%
    let frequent_rate = Decimal::new(10, 2); // 10%
    let deposit_rate = Decimal::new(12, 2); // 12%

    let mut days = (tentative_return_date - start_date).num_days();
    if days < 1 {
        days = 1;
    }

    let base_amount = daily_tariff * Decimal::from(days);

    let extended_discount = if days > EXTENDED_USE_MIN_DAYS {
        base_amount * extended_use_rate
    } else {
        Decimal::ZERO
    };

    // El descuento de cliente frecuente se aplica sobre el importe ya
    // descontado, no sobre el importe original
    let frequent_discount = if is_frequent_customer {
        (base_amount - extended_discount) * frequent_rate
    } else {
        Decimal::ZERO
    };

    // El depósito siempre se calcula sobre el importe original
    let deposit = base_amount * deposit_rate;

    let total_due = base_amount - extended_discount - frequent_discount + deposit;

    PricingBreakdown {
        days,
        base_amount: round_money(base_amount),
        extended_discount: round_money(extended_discount),
        frequent_discount: round_money(frequent_discount),
        deposit: round_money(deposit),
        total_due: round_money(total_due),
    }
}
