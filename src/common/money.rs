// src/common/money.rs

use rust_decimal::{Decimal, RoundingStrategy};

pub const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Arredonda um valor monetário para 2 casas (meio para cima).
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Extremo representável com o sinal pedido; é o resultado de uma conta que estoura.
pub fn saturated(negative: bool) -> Decimal {
    if negative { Decimal::MIN } else { Decimal::MAX }
}

/// `part / whole * 100`, ou zero quando o denominador não é positivo.
/// Estouro satura no extremo com o sinal de `part`.
pub fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    match part.checked_div(whole) {
        Some(ratio) => ratio.saturating_mul(HUNDRED),
        None => saturated(part.is_sign_negative()),
    }
}

/// Divisão que devolve zero em vez de entrar em pânico com denominador zero.
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn round2_uses_half_up() {
        assert_eq!(round2(dec!(2.345)), dec!(2.35));
        assert_eq!(round2(dec!(2.344)), dec!(2.34));
        assert_eq!(round2(dec!(-2.345)), dec!(-2.35));
    }

    #[test]
    fn percentage_of_zero_whole_is_zero() {
        assert_eq!(percentage_of(dec!(10), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(percentage_of(dec!(25), dec!(200)), dec!(12.5));
    }

    #[test]
    fn percentage_of_tiny_whole_saturates() {
        assert_eq!(percentage_of(dec!(1000000000000), dec!(0.0000000000000000000000000001)), Decimal::MAX);
        assert_eq!(percentage_of(dec!(-1000000000000), dec!(0.0000000000000000000000000001)), Decimal::MIN);
    }

    #[test]
    fn safe_div_by_zero() {
        assert_eq!(safe_div(dec!(10), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(safe_div(dec!(10), dec!(4)), dec!(2.5));
    }
}
