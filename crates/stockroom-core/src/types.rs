//! # Domain Types
//!
//! Small enums shared across the catalog and the CLI.
//!
//! ## Product State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Per-Product Status                                │
//! │                                                                         │
//! │        sell (qty → 0)                                                   │
//! │   ACTIVE ───────────────► OUT_OF_STOCK                                  │
//! │     ▲                         │                                         │
//! │     └─────── restock ─────────┘                                         │
//! │                                                                         │
//! │   Grocery only:                                                         │
//! │   ACTIVE / OUT_OF_STOCK ──(date passes)──► EXPIRED ──(sweep)──► removed │
//! │                                                                         │
//! │   EXPIRED is terminal. Restocking an expired item does not revive it.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

// =============================================================================
// Category
// =============================================================================

/// The three fixed product categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Electronics,
    Grocery,
    Clothing,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 3] = [Category::Electronics, Category::Grocery, Category::Clothing];

    /// The label used in product descriptions (`[Grocery] ...`).
    pub fn label(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Grocery => "Grocery",
            Category::Clothing => "Clothing",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "electronics" | "electronic" => Ok(Category::Electronics),
            "grocery" | "groceries" => Ok(Category::Grocery),
            "clothing" | "clothes" => Ok(Category::Clothing),
            _ => Err(ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: Category::ALL
                    .iter()
                    .map(|c| c.label().to_lowercase())
                    .collect(),
            }),
        }
    }
}

// =============================================================================
// Product Status
// =============================================================================

/// Derived, never stored: computed from quantity and (for Grocery) expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    /// In stock and sellable.
    Active,
    /// Quantity is zero. Restocking returns it to Active.
    OutOfStock,
    /// Grocery past its expiry date. Only a sweep moves it on.
    Expired,
}

impl ProductStatus {
    /// Only active products count as available for sale.
    pub fn is_available(&self) -> bool {
        matches!(self, ProductStatus::Active)
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductStatus::Active => write!(f, "active"),
            ProductStatus::OutOfStock => write!(f, "out of stock"),
            ProductStatus::Expired => write!(f, "expired"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parsing() {
        assert_eq!("Electronics".parse::<Category>().unwrap(), Category::Electronics);
        assert_eq!("grocery".parse::<Category>().unwrap(), Category::Grocery);
        assert_eq!(" CLOTHES ".parse::<Category>().unwrap(), Category::Clothing);
        assert!("furniture".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_display_round_trips() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_status_availability() {
        assert!(ProductStatus::Active.is_available());
        assert!(!ProductStatus::OutOfStock.is_available());
        assert!(!ProductStatus::Expired.is_available());
    }
}
