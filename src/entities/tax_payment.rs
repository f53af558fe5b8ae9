// 💰 Tax Payment Entity - One per house, derived from the family owner's income
//
// House → Family → Owner-typed Person → Owner.family_income
// On every save the income is snapshotted and category/amount recomputed.

use crate::entities::house::House;
use crate::entities::owner::owner_of_family;
use crate::record::{date_at, date_value, decimal_at, decimal_value, exists, find, Record};
use crate::tax::{self, TaxCategory};
use crate::validation::{RegistryResult, ValidationErrors};
use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, Value, ValueRef};
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// PAYMENT STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "en proceso")]
    InProcess,
    #[serde(rename = "pagada")]
    Paid,
    #[serde(rename = "debe")]
    Owed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::InProcess => "en proceso",
            PaymentStatus::Paid => "pagada",
            PaymentStatus::Owed => "debe",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "en proceso" => Some(PaymentStatus::InProcess),
            "pagada" => Some(PaymentStatus::Paid),
            "debe" => Some(PaymentStatus::Owed),
            _ => None,
        }
    }
}

impl FromSql for PaymentStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        PaymentStatus::parse(s)
            .ok_or_else(|| FromSqlError::Other(format!("unknown payment status {:?}", s).into()))
    }
}

impl FromSql for TaxCategory {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        TaxCategory::parse(s)
            .ok_or_else(|| FromSqlError::Other(format!("unknown tax category {:?}", s).into()))
    }
}

// ============================================================================
// TAX PAYMENT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxPayment {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub issued_on: Option<NaiveDate>,

    /// Snapshot of the owner's income at the last save
    #[serde(default, deserialize_with = "crate::record::empty_as_default")]
    pub family_income: Decimal,

    /// Derived on save
    #[serde(default)]
    pub category: Option<TaxCategory>,

    /// Derived on save
    #[serde(default, deserialize_with = "crate::record::empty_as_default")]
    pub amount: Decimal,

    pub payment_status: PaymentStatus,

    pub house_id: i64,
}

impl TaxPayment {
    pub fn new(house_id: i64, payment_status: PaymentStatus) -> Self {
        TaxPayment {
            id: None,
            issued_on: None,
            family_income: Decimal::ZERO,
            category: None,
            amount: Decimal::ZERO,
            payment_status,
            house_id,
        }
    }

    pub fn issued(mut self, date: NaiveDate) -> Self {
        self.issued_on = Some(date);
        self
    }
}

impl Record for TaxPayment {
    const ENTITY: &'static str = "tax_payment";
    const TABLE: &'static str = "tax_payments";
    const COLUMNS: &'static [&'static str] = &[
        "issued_on",
        "family_income",
        "category",
        "amount",
        "payment_status",
        "house_id",
    ];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<Value> {
        vec![
            date_value(self.issued_on),
            decimal_value(self.family_income),
            match self.category {
                Some(category) => Value::Text(category.as_str().to_string()),
                None => Value::Null,
            },
            decimal_value(self.amount),
            Value::Text(self.payment_status.as_str().to_string()),
            Value::Integer(self.house_id),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(TaxPayment {
            id: Some(row.get(0)?),
            issued_on: date_at(row, 1)?,
            family_income: decimal_at(row, 2)?,
            category: Some(row.get(3)?),
            amount: decimal_at(row, 4)?,
            payment_status: row.get(5)?,
            house_id: row.get(6)?,
        })
    }

    fn clean(&mut self, conn: &Connection) -> RegistryResult<()> {
        let mut errors = ValidationErrors::new(Self::ENTITY);

        if exists(
            conn,
            "SELECT 1 FROM tax_payments WHERE house_id = ?1 AND id IS NOT ?2",
            params![self.house_id, self.id],
        )? {
            errors.add(
                "house_id",
                format!("House {} already has a tax payment", self.house_id),
            );
        }

        // Income, category and amount come from House → Family → Owner
        match find::<House>(conn, self.house_id)? {
            Some(house) => match owner_of_family(conn, house.family_id)? {
                Some(owner) => {
                    let assessment = tax::assess(owner.family_income);
                    self.family_income = assessment.income;
                    self.category = Some(assessment.category);
                    self.amount = assessment.amount;
                }
                None => errors.add(
                    "house_id",
                    format!("Family {} of house {} has no owner", house.family_id, self.house_id),
                ),
            },
            None => errors.add("house_id", format!("House {} does not exist", self.house_id)),
        }

        errors.finish()
    }
}

/// Family income behind a house, following House → Family → Owner
pub fn family_income_for_house(conn: &Connection, house_id: i64) -> RegistryResult<Option<Decimal>> {
    let Some(house) = find::<House>(conn, house_id)? else {
        return Ok(None);
    };
    Ok(owner_of_family(conn, house.family_id)?.map(|owner| owner.family_income))
}
