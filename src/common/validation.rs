// src/common/validation.rs

use rust_decimal::Decimal;
use validator::ValidationError;

// ---
// Validações customizadas compartilhadas pelos payloads
// ---

/// Teto para quantidades e valores monetários (1 trilhão).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Teto para margens e porcentagens (1000%).
pub const MAX_PERCENTAGE: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

fn out_of_range(min: f64, max: Decimal, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new("range");
    err.add_param("min".into(), &min);
    err.add_param("max".into(), &max.to_string());
    err.message = Some(message.into());
    err
}

pub fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        return Err(out_of_range(0.0, MAX_AMOUNT, "O valor não pode ser negativo."));
    }
    if *val > MAX_AMOUNT {
        return Err(out_of_range(0.0, MAX_AMOUNT, "O valor excede o limite permitido."));
    }
    Ok(())
}

pub fn validate_percentage(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        return Err(out_of_range(0.0, MAX_PERCENTAGE, "A porcentagem não pode ser negativa."));
    }
    if *val > MAX_PERCENTAGE {
        return Err(out_of_range(0.0, MAX_PERCENTAGE, "A porcentagem não pode passar de 1000%."));
    }
    Ok(())
}
