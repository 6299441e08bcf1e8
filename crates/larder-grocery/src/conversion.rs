// ABOUTME: Unit conversion table mapping every ingredient unit to a family and base factor
// ABOUTME: Volume converts to milliliters, weight to grams, counts stay in whole units
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::error::Error;
use std::fmt::{self, Display, Formatter, Result as FmtResult};

use larder_core::constants::units::{
    GRAMS_PER_KG, GRAMS_PER_LB, GRAMS_PER_OZ, ML_PER_CUP, ML_PER_DASH, ML_PER_L, ML_PER_PINCH,
    ML_PER_TBSP, ML_PER_TSP,
};
use larder_core::models::IngredientUnit;
use serde::{Deserialize, Serialize};

/// Conversion error types
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// Amount is negative, NaN or infinite
    InvalidAmount(f64),
    /// Units belong to different families (e.g. `g` and `cup`)
    IncompatibleUnits {
        /// Source unit
        from: IngredientUnit,
        /// Target unit
        to: IngredientUnit,
    },
}

impl Display for ConversionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::InvalidAmount(amount) => {
                write!(f, "Invalid amount {amount} (must be finite and non-negative)")
            }
            Self::IncompatibleUnits { from, to } => write!(
                f,
                "Cannot convert {from} ({}) to {to} ({})",
                unit_family(*from),
                unit_family(*to)
            ),
        }
    }
}

impl Error for ConversionError {}

/// Measurement family; units only convert within their family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitFamily {
    /// Liquid or dry volume, base unit milliliters
    Volume,
    /// Mass, base unit grams
    Weight,
    /// Whole items, base unit `unit`
    Count,
}

impl UnitFamily {
    /// Family identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Volume => "volume",
            Self::Weight => "weight",
            Self::Count => "count",
        }
    }

    /// Canonical unit every member of the family converts into
    #[must_use]
    pub const fn base_unit(&self) -> IngredientUnit {
        match self {
            Self::Volume => IngredientUnit::Ml,
            Self::Weight => IngredientUnit::G,
            Self::Count => IngredientUnit::Unit,
        }
    }
}

impl Display for UnitFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Family a unit belongs to
#[must_use]
pub const fn unit_family(unit: IngredientUnit) -> UnitFamily {
    match unit {
        IngredientUnit::Tsp
        | IngredientUnit::Tbsp
        | IngredientUnit::Cup
        | IngredientUnit::Ml
        | IngredientUnit::L
        | IngredientUnit::Pinch
        | IngredientUnit::Dash => UnitFamily::Volume,
        IngredientUnit::G | IngredientUnit::Kg | IngredientUnit::Oz | IngredientUnit::Lb => {
            UnitFamily::Weight
        }
        IngredientUnit::Unit => UnitFamily::Count,
    }
}

/// Multiplicative factor converting one `unit` into its family's base unit
#[must_use]
pub const fn base_factor(unit: IngredientUnit) -> f64 {
    match unit {
        IngredientUnit::Unit | IngredientUnit::Ml | IngredientUnit::G => 1.0,
        IngredientUnit::Tsp => ML_PER_TSP,
        IngredientUnit::Tbsp => ML_PER_TBSP,
        IngredientUnit::Cup => ML_PER_CUP,
        IngredientUnit::L => ML_PER_L,
        IngredientUnit::Pinch => ML_PER_PINCH,
        IngredientUnit::Dash => ML_PER_DASH,
        IngredientUnit::Kg => GRAMS_PER_KG,
        IngredientUnit::Oz => GRAMS_PER_OZ,
        IngredientUnit::Lb => GRAMS_PER_LB,
    }
}

/// Base unit of the family `unit` belongs to
#[must_use]
pub const fn base_unit(unit: IngredientUnit) -> IngredientUnit {
    unit_family(unit).base_unit()
}

/// Express `quantity` of `unit` in its family's base unit
///
/// # Errors
///
/// Returns `ConversionError::InvalidAmount` if the quantity is negative or not finite
///
/// # Examples
///
/// ```rust
/// use larder_core::models::IngredientUnit;
/// use larder_grocery::conversion::to_base_quantity;
///
/// // 2 tablespoons are 30 ml
/// assert_eq!(to_base_quantity(2.0, IngredientUnit::Tbsp), Ok(30.0));
/// ```
pub fn to_base_quantity(quantity: f64, unit: IngredientUnit) -> Result<f64, ConversionError> {
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(ConversionError::InvalidAmount(quantity));
    }
    Ok(quantity * base_factor(unit))
}

/// Convert between two units of the same family
///
/// # Errors
///
/// Returns `ConversionError::IncompatibleUnits` when the families differ and
/// `ConversionError::InvalidAmount` for negative or non-finite quantities
pub fn convert(
    quantity: f64,
    from: IngredientUnit,
    to: IngredientUnit,
) -> Result<f64, ConversionError> {
    if unit_family(from) != unit_family(to) {
        return Err(ConversionError::IncompatibleUnits { from, to });
    }
    Ok(to_base_quantity(quantity, from)? / base_factor(to))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_every_unit_has_a_positive_factor() {
        for unit in IngredientUnit::ALL {
            assert!(base_factor(unit) > 0.0, "{unit} has no factor");
            assert!(approx(base_factor(base_unit(unit)), 1.0));
        }
    }

    #[test]
    fn test_families() {
        assert_eq!(unit_family(IngredientUnit::Tsp), UnitFamily::Volume);
        assert_eq!(unit_family(IngredientUnit::Pinch), UnitFamily::Volume);
        assert_eq!(unit_family(IngredientUnit::Lb), UnitFamily::Weight);
        assert_eq!(unit_family(IngredientUnit::Unit), UnitFamily::Count);
    }

    #[test]
    fn test_convert_within_family() {
        assert!(approx(
            convert(3.0, IngredientUnit::Tsp, IngredientUnit::Tbsp).unwrap(),
            1.0
        ));
        assert!(approx(
            convert(1.0, IngredientUnit::Kg, IngredientUnit::G).unwrap(),
            1000.0
        ));
    }

    #[test]
    fn test_convert_across_families_is_rejected() {
        let err = convert(1.0, IngredientUnit::G, IngredientUnit::Cup).unwrap_err();
        assert_eq!(
            err,
            ConversionError::IncompatibleUnits {
                from: IngredientUnit::G,
                to: IngredientUnit::Cup
            }
        );
        assert_eq!(err.to_string(), "Cannot convert g (weight) to cup (volume)");
    }

    #[test]
    fn test_invalid_amount() {
        assert!(to_base_quantity(-1.0, IngredientUnit::Cup).is_err());
        assert!(to_base_quantity(f64::NAN, IngredientUnit::Cup).is_err());
    }
}
