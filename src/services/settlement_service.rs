//! Servicio de liquidación de devoluciones
//!
//! Calculadora pura: alquiler contratado + fecha real de devolución →
//! desglose de multa y depósito. Reglas de negocio:
//! - DÍAS MORA: si la fecha real supera la tentativa
//! - MULTA: 10% del importe diario contratado por cada día de mora
//! - DEPÓSITO DEVUELTO: el depósito absorbe la multa
//! - MONTO ADICIONAL: si la multa supera el depósito, se cobra la
//!   diferencia
//! - TOTAL FINAL: total contratado + monto adicional - depósito devuelto

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::rental::Rental;
use crate::utils::money::round_money;

/// Desglose de la liquidación. Registro de salida opaco, consumido tal
/// cual por las capas de persistencia y presentación.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettlementBreakdown {
    pub late_days: i64,
    pub fine: Decimal,
    pub deposit_returned: Decimal,
    pub extra_due: Decimal,
    pub final_total: Decimal,
}

/// Liquida la devolución de un alquiler contra su fecha real de entrega.
///
/// El importe diario se calcula sobre los días contratados, no sobre los
/// días de mora. El total final no se recorta en cero: una devolución en
/// término deja el depósito completo a favor del cliente.
pub fn calculate_settlement(rental: &Rental, actual_return_date: NaiveDate) -> SettlementBreakdown {
    let late_fee_rate = Decimal::new(10, 2); // 10% del importe diario por día

    let mut late_days = (actual_return_date - rental.tentative_return_date).num_days();
    if late_days < 0 {
        late_days = 0;
    }

    let fine = if late_days > 0 {
        let daily_amount = rental.base_amount / Decimal::from(rental.days);
        daily_amount * late_fee_rate * Decimal::from(late_days)
    } else {
        Decimal::ZERO
    };

    let (deposit_returned, extra_due) = if fine >= rental.deposit {
        // El depósito cubre parte de la multa y se cobra lo adicional
        (Decimal::ZERO, fine - rental.deposit)
    } else {
        // Se devuelve el depósito menos la multa
        (rental.deposit - fine, Decimal::ZERO)
    };

    let final_total = rental.total_due + extra_due - deposit_returned;

    SettlementBreakdown {
        late_days,
        fine: round_money(fine),
        deposit_returned: round_money(deposit_returned),
        extra_due: round_money(extra_due),
        final_total: round_money(final_total),
    }
}
