// src/engine/units.rs

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::money::saturated;

// --- Famílias de unidades ---
// Só convertemos dentro da mesma família. Contagem nunca converte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitFamily {
    Mass,
    Volume,
    Length,
    Count,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "measurement_unit", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MeasurementUnit {
    // Massa
    Kg,
    G,
    Mg,
    // Volume
    L,
    Ml,
    Cl,
    // Comprimento
    M,
    Cm,
    Mm,
    // Contagem (unidade, peça, caixa, pacote)
    Un,
    Pc,
    Cx,
    Pct,
}

impl MeasurementUnit {
    pub fn family(self) -> UnitFamily {
        use MeasurementUnit::*;
        match self {
            Kg | G | Mg => UnitFamily::Mass,
            L | Ml | Cl => UnitFamily::Volume,
            M | Cm | Mm => UnitFamily::Length,
            Un | Pc | Cx | Pct => UnitFamily::Count,
        }
    }

    /// Fator para a menor unidade da família (g, ml, mm).
    fn factor(self) -> Decimal {
        use MeasurementUnit::*;
        match self {
            Kg | L | M => Decimal::from(1000),
            Cl | Cm => Decimal::TEN,
            G | Ml | Mm => Decimal::ONE,
            Mg => Decimal::new(1, 3),
            Un | Pc | Cx | Pct => Decimal::ONE,
        }
    }

    pub fn symbol(self) -> &'static str {
        use MeasurementUnit::*;
        match self {
            Kg => "kg",
            G => "g",
            Mg => "mg",
            L => "l",
            Ml => "ml",
            Cl => "cl",
            M => "m",
            Cm => "cm",
            Mm => "mm",
            Un => "un",
            Pc => "pc",
            Cx => "cx",
            Pct => "pct",
        }
    }
}

impl fmt::Display for MeasurementUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unidade de medida desconhecida: {0}")]
pub struct UnknownUnit(pub String);

impl FromStr for MeasurementUnit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use MeasurementUnit::*;
        let unit = match s.trim().to_lowercase().as_str() {
            "kg" => Kg,
            "g" => G,
            "mg" => Mg,
            "l" | "lt" => L,
            "ml" => Ml,
            "cl" => Cl,
            "m" => M,
            "cm" => Cm,
            "mm" => Mm,
            "un" | "und" | "unidade" => Un,
            "pc" | "pç" | "peça" => Pc,
            "cx" | "caixa" => Cx,
            "pct" | "pacote" => Pct,
            _ => return Err(UnknownUnit(s.to_string())),
        };
        Ok(unit)
    }
}

/// Resultado de uma conversão, com o diagnóstico de famílias incompatíveis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    pub value: Decimal,
    pub family_mismatch: bool,
}

/// Converte `value` de `from` para `to`.
///
/// Famílias diferentes (ex.: kg -> l) não convertem: o valor volta intacto e
/// `family_mismatch` fica `true`. Receitas antigas dependem desse repasse.
///
/// Se o resultado não cabe em `Decimal`, satura em `Decimal::MAX` (ou `MIN`
/// para valores negativos).
pub fn convert_checked(value: Decimal, from: MeasurementUnit, to: MeasurementUnit) -> Conversion {
    if from == to {
        return Conversion { value, family_mismatch: false };
    }

    let family = from.family();
    if family != to.family() {
        return Conversion { value, family_mismatch: true };
    }

    if family == UnitFamily::Count {
        return Conversion { value, family_mismatch: false };
    }

    let converted = value
        .checked_mul(from.factor())
        .and_then(|v| v.checked_div(to.factor()))
        .unwrap_or_else(|| saturated(value.is_sign_negative()));

    Conversion { value: converted, family_mismatch: false }
}

/// Igual a [`convert_checked`], mas registra um aviso quando as famílias não batem.
pub fn convert(value: Decimal, from: MeasurementUnit, to: MeasurementUnit) -> Decimal {
    let conversion = convert_checked(value, from, to);
    if conversion.family_mismatch {
        tracing::warn!(
            %from,
            %to,
            %value,
            "Conversão entre famílias de unidades incompatíveis; valor mantido"
        );
    }
    conversion.value
}
