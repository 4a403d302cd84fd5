use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ProductId;

pub const MIN_DESCRIPTION_LEN: usize = 2;

/// Unit of sale. Serialized as the short code shown in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    #[serde(rename = "UN")]
    Each,
    #[serde(rename = "KG")]
    Kilogram,
    #[serde(rename = "LT")]
    Liter,
    #[serde(rename = "MT")]
    Meter,
    #[serde(rename = "M2")]
    SquareMeter,
    #[serde(rename = "M3")]
    CubicMeter,
    #[serde(rename = "PC")]
    Piece,
    #[serde(rename = "CX")]
    Box,
    #[serde(rename = "DZ")]
    Dozen,
    #[serde(rename = "GR")]
    Gram,
    #[serde(rename = "ML")]
    Milliliter,
    #[serde(rename = "CM")]
    Centimeter,
}

impl Unit {
    pub fn code(self) -> &'static str {
        match self {
            Unit::Each => "UN",
            Unit::Kilogram => "KG",
            Unit::Liter => "LT",
            Unit::Meter => "MT",
            Unit::SquareMeter => "M2",
            Unit::CubicMeter => "M3",
            Unit::Piece => "PC",
            Unit::Box => "CX",
            Unit::Dozen => "DZ",
            Unit::Gram => "GR",
            Unit::Milliliter => "ML",
            Unit::Centimeter => "CM",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProductStatus {
    #[default]
    #[serde(rename = "Ativo", alias = "Active")]
    Active,
    #[serde(rename = "Inativo", alias = "Inactive")]
    Inactive,
}

impl ProductStatus {
    pub fn label(self) -> &'static str {
        match self {
            ProductStatus::Active => "Active",
            ProductStatus::Inactive => "Inactive",
        }
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub description: String,
    pub unit: Unit,
    pub unit_price: Decimal,
    pub status: ProductStatus,
    /// Placeholder column; never decremented.
    pub stock_quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub description: String,
    pub unit: Unit,
    pub unit_price: Decimal,
    pub status: ProductStatus,
}

impl Product {
    /// Only active products may be added to new order lines.
    pub fn is_orderable(&self) -> bool {
        self.status == ProductStatus::Active
    }

    pub fn matches(&self, term: &str) -> bool {
        self.description.to_lowercase().contains(&term.to_lowercase())
    }
}
