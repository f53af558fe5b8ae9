// 🧾 Tax Bands - Category and amount derived from family income
//
// Bands (income in local currency):
//   income <  1000         → A, 10%
//   1000 <= income < 2500  → B, 15%
//   income >= 2500         → C, 20%
// Amounts are rounded half-up to cents.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

// ============================================================================
// TAX CATEGORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxCategory {
    A,
    B,
    C,
}

impl TaxCategory {
    pub fn for_income(income: Decimal) -> Self {
        if income < Decimal::new(1000, 0) {
            TaxCategory::A
        } else if income < Decimal::new(2500, 0) {
            TaxCategory::B
        } else {
            TaxCategory::C
        }
    }

    /// Rate as a fraction (0.10 = 10%)
    pub fn rate(&self) -> Decimal {
        match self {
            TaxCategory::A => Decimal::new(10, 2),
            TaxCategory::B => Decimal::new(15, 2),
            TaxCategory::C => Decimal::new(20, 2),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaxCategory::A => "A",
            TaxCategory::B => "B",
            TaxCategory::C => "C",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "A" => Some(TaxCategory::A),
            "B" => Some(TaxCategory::B),
            "C" => Some(TaxCategory::C),
            _ => None,
        }
    }

    pub fn all() -> [TaxCategory; 3] {
        [TaxCategory::A, TaxCategory::B, TaxCategory::C]
    }
}

impl std::fmt::Display for TaxCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ASSESSMENT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxAssessment {
    pub income: Decimal,
    pub category: TaxCategory,
    pub rate: Decimal,
    pub amount: Decimal,
}

/// Assess the tax owed on a family income
pub fn assess(income: Decimal) -> TaxAssessment {
    let category = TaxCategory::for_income(income);
    let rate = category.rate();

    TaxAssessment {
        income,
        category,
        rate,
        amount: round_money(income * rate),
    }
}

/// Round to two decimals, ties away from zero
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// ============================================================================
// TESTS
// ============================================================================
