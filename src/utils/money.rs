//! Utilidades monetarias

use rust_decimal::Decimal;

/// Escala de los importes monetarios en los registros de salida
pub const MONEY_SCALE: u32 = 2;

/// Redondea un importe a 2 decimales para el registro de salida.
///
/// El redondeo se aplica una sola vez al armar el registro; las fórmulas
/// intermedias trabajan siempre con precisión completa.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp(MONEY_SCALE)
}
