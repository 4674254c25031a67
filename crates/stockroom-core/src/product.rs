//! # Product
//!
//! A product is a shared field set plus one of three category variants.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              Product                                    │
//! │  ─────────────────────────────────────────────────────────────────────  │
//! │  id (immutable)   name   price: Money   quantity: i64   kind ──┐       │
//! │                                                                 │       │
//! │        ┌────────────────────────┬───────────────────────────────┤       │
//! │        ▼                        ▼                               ▼       │
//! │  Electronics              Grocery                        Clothing       │
//! │  brand, warranty_years    expiry_date                    size, material │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only Grocery carries an expiry date, so "which variants expire" is
//! answered by the type rather than by a nullable field.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::error::{CatalogError, CatalogResult, ValidationError};
use crate::local_today;
use crate::money::Money;
use crate::types::{Category, ProductStatus};
use crate::validation::{
    validate_attribute, validate_price, validate_product_id, validate_product_name,
    validate_stock_level, ValidationResult,
};

// =============================================================================
// Product Kind
// =============================================================================

/// Category-specific fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum ProductKind {
    Electronics { brand: String, warranty_years: u32 },
    Grocery { expiry_date: NaiveDate },
    Clothing { size: String, material: String },
}

impl ProductKind {
    /// The category tag for this variant.
    pub fn category(&self) -> Category {
        match self {
            ProductKind::Electronics { .. } => Category::Electronics,
            ProductKind::Grocery { .. } => Category::Grocery,
            ProductKind::Clothing { .. } => Category::Clothing,
        }
    }

    /// Same variant with free-text attributes trimmed.
    fn trimmed(self) -> Self {
        match self {
            ProductKind::Electronics {
                brand,
                warranty_years,
            } => ProductKind::Electronics {
                brand: brand.trim().to_string(),
                warranty_years,
            },
            ProductKind::Grocery { expiry_date } => ProductKind::Grocery { expiry_date },
            ProductKind::Clothing { size, material } => ProductKind::Clothing {
                size: size.trim().to_string(),
                material: material.trim().to_string(),
            },
        }
    }

    fn validate(&self) -> ValidationResult<()> {
        match self {
            ProductKind::Electronics { brand, .. } => validate_attribute("brand", brand),
            ProductKind::Grocery { .. } => Ok(()),
            ProductKind::Clothing { size, material } => {
                validate_attribute("size", size)?;
                validate_attribute("material", material)
            }
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product held by the catalog.
///
/// Fields are private: the ID never changes after construction and the
/// quantity only moves through catalog operations, which keep it
/// non-negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    id: String,
    name: String,
    price: Money,
    quantity: i64,
    #[serde(flatten)]
    kind: ProductKind,
}

impl Product {
    /// Builds a validated product.
    ///
    /// ## Rules
    /// - ID: see [`validate_product_id`]
    /// - Name: non-empty, at most 200 characters
    /// - Price and quantity: non-negative, with price × quantity in range
    /// - Brand/size/material: non-empty; stored trimmed like the name
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        quantity: i64,
        kind: ProductKind,
    ) -> ValidationResult<Self> {
        let id = id.into();
        let name = name.into();

        validate_product_id(&id)?;
        validate_product_name(&name)?;
        validate_price(price)?;
        validate_stock_level(quantity)?;
        kind.validate()?;
        if price.checked_multiply_quantity(quantity).is_none() {
            return Err(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                reason: "price × quantity exceeds the largest stock value".to_string(),
            });
        }

        Ok(Product {
            id,
            name: name.trim().to_string(),
            price,
            quantity,
            kind: kind.trimmed(),
        })
    }

    /// Builds an Electronics product.
    pub fn electronics(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        quantity: i64,
        warranty_years: u32,
        brand: impl Into<String>,
    ) -> ValidationResult<Self> {
        let kind = ProductKind::Electronics {
            brand: brand.into(),
            warranty_years,
        };
        Self::new(id, name, price, quantity, kind)
    }

    /// Builds a Grocery product. The expiry date is mandatory.
    pub fn grocery(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        quantity: i64,
        expiry_date: NaiveDate,
    ) -> ValidationResult<Self> {
        Self::new(id, name, price, quantity, ProductKind::Grocery { expiry_date })
    }

    /// Builds a Clothing product.
    pub fn clothing(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        quantity: i64,
        size: impl Into<String>,
        material: impl Into<String>,
    ) -> ValidationResult<Self> {
        let kind = ProductKind::Clothing {
            size: size.into(),
            material: material.into(),
        };
        Self::new(id, name, price, quantity, kind)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price.
    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    /// Quantity on hand. Never negative.
    #[inline]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    #[inline]
    pub fn kind(&self) -> &ProductKind {
        &self.kind
    }

    #[inline]
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// Expiry date, for Grocery only.
    pub fn expiry_date(&self) -> Option<NaiveDate> {
        match self.kind {
            ProductKind::Grocery { expiry_date } => Some(expiry_date),
            _ => None,
        }
    }

    /// Price × quantity on hand. Exact: construction and restocking keep
    /// it in range.
    pub fn stock_value(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// True if this is a Grocery item whose expiry date is strictly before
    /// `today`. An item expiring today is still fresh.
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        self.expiry_date().is_some_and(|expiry| expiry < today)
    }

    /// [`Product::is_expired_on`] against the local calendar date.
    pub fn is_expired(&self) -> bool {
        self.is_expired_on(local_today())
    }

    /// Where this product sits in the status state machine on `today`.
    ///
    /// Expired wins over out-of-stock: an expired item is terminal no
    /// matter how much of it is on the shelf.
    pub fn status_on(&self, today: NaiveDate) -> ProductStatus {
        if self.is_expired_on(today) {
            ProductStatus::Expired
        } else if self.quantity == 0 {
            ProductStatus::OutOfStock
        } else {
            ProductStatus::Active
        }
    }

    /// Quantity > 0 and, for Grocery, not expired on `today`.
    pub fn is_available_on(&self, today: NaiveDate) -> bool {
        self.status_on(today).is_available()
    }

    /// [`Product::is_available_on`] against the local calendar date.
    pub fn is_available(&self) -> bool {
        self.is_available_on(local_today())
    }

    // =========================================================================
    // Description
    // =========================================================================

    /// One-line summary with freshness judged on `today`.
    pub fn describe_on(&self, today: NaiveDate) -> String {
        self.describe_with_symbol(today, "$")
    }

    /// Like [`Product::describe_on`] with a caller-chosen currency symbol.
    pub fn describe_with_symbol(&self, today: NaiveDate, symbol: &str) -> String {
        let details = match &self.kind {
            ProductKind::Electronics {
                brand,
                warranty_years,
            } => format!("Brand: {}, Warranty: {} yrs", brand, warranty_years),
            ProductKind::Grocery { expiry_date } => {
                let status = if self.is_expired_on(today) {
                    "Expired"
                } else {
                    "Fresh"
                };
                format!("Expires: {}, Status: {}", expiry_date, status)
            }
            ProductKind::Clothing { size, material } => {
                format!("Size: {}, Material: {}", size, material)
            }
        };

        format!(
            "[{}] {} ({}) - {}, Qty: {}",
            self.category(),
            self.name,
            details,
            self.price.format_with(symbol),
            self.quantity
        )
    }

    /// One-line summary, e.g.
    /// `[Clothing] Shirt (Size: M, Material: Cotton) - $29.99, Qty: 15`.
    pub fn describe(&self) -> String {
        self.describe_on(local_today())
    }

    // =========================================================================
    // Stock Movements (catalog only)
    // =========================================================================

    /// Removes `quantity` units. Caller has already checked `quantity > 0`.
    pub(crate) fn take_stock(&mut self, quantity: i64) -> CatalogResult<i64> {
        if quantity > self.quantity {
            return Err(CatalogError::InsufficientStock {
                id: self.id.clone(),
                available: self.quantity,
                requested: quantity,
            });
        }

        self.quantity -= quantity;
        Ok(self.quantity)
    }

    /// Adds `quantity` units. Caller has already checked `quantity > 0`.
    ///
    /// Rejects levels whose stock value would not fit in `Money`.
    pub(crate) fn put_stock(&mut self, quantity: i64) -> CatalogResult<i64> {
        let on_hand = self
            .quantity
            .checked_add(quantity)
            .filter(|q| self.price.checked_multiply_quantity(*q).is_some())
            .ok_or_else(|| CatalogError::InvalidQuantity {
                id: self.id.clone(),
                quantity,
            })?;

        self.quantity = on_hand;
        Ok(on_hand)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn phone() -> Product {
        Product::electronics("E001", "Phone", Money::from_cents(99999), 10, 2, "Apple").unwrap()
    }

    fn milk(expiry: NaiveDate) -> Product {
        Product::grocery("G001", "Milk", Money::from_cents(350), 20, expiry).unwrap()
    }

    #[test]
    fn test_constructors_set_category() {
        assert_eq!(phone().category(), Category::Electronics);
        assert_eq!(milk(date(2030, 1, 1)).category(), Category::Grocery);

        let shirt =
            Product::clothing("C001", "Shirt", Money::from_cents(2999), 15, "M", "Cotton").unwrap();
        assert_eq!(shirt.category(), Category::Clothing);
        assert_eq!(shirt.expiry_date(), None);
    }

    #[test]
    fn test_construction_rejects_bad_data() {
        let err = Product::electronics("", "Phone", Money::zero(), 1, 1, "Acme").unwrap_err();
        assert!(matches!(err, ValidationError::Required { .. }));

        let err = Product::electronics("E1", " ", Money::zero(), 1, 1, "Acme").unwrap_err();
        assert!(matches!(err, ValidationError::Required { .. }));

        let err =
            Product::electronics("E1", "Phone", Money::from_cents(-1), 1, 1, "Acme").unwrap_err();
        assert_eq!(err.to_string(), "price must not be negative");

        let err = Product::electronics("E1", "Phone", Money::zero(), -1, 1, "Acme").unwrap_err();
        assert_eq!(err.to_string(), "quantity must not be negative");

        let err = Product::clothing("C1", "Shirt", Money::zero(), 1, "M", "").unwrap_err();
        assert_eq!(err.to_string(), "material is required");

        let price = Money::from_cents(99_999);
        let err = Product::electronics("E1", "Phone", price, i64::MAX / 2, 1, "Acme").unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));
    }

    #[test]
    fn test_attributes_are_trimmed() {
        let price = Money::from_cents(2999);
        let shirt = Product::clothing("C1", " Shirt ", price, 15, " M ", "Cotton  ").unwrap();
        assert_eq!(
            shirt.kind(),
            &ProductKind::Clothing {
                size: "M".to_string(),
                material: "Cotton".to_string()
            }
        );
        assert_eq!(
            shirt.describe_on(date(2026, 10, 19)),
            "[Clothing] Shirt (Size: M, Material: Cotton) - $29.99, Qty: 15"
        );

        let phone = Product::electronics("E1", "Phone", Money::zero(), 1, 2, "\tApple ").unwrap();
        assert!(matches!(phone.kind(), ProductKind::Electronics { brand, .. } if brand == "Apple"));
    }

    #[test]
    fn test_zero_price_and_stock_allowed() {
        let freebie = Product::electronics("E2", "Sticker", Money::zero(), 0, 0, "Acme").unwrap();
        assert_eq!(freebie.stock_value(), Money::zero());
    }

    #[test]
    fn test_expiry_is_strictly_before_today() {
        let today = date(2026, 10, 19);

        assert!(milk(date(2026, 10, 18)).is_expired_on(today));
        assert!(!milk(date(2026, 10, 19)).is_expired_on(today));
        assert!(!milk(date(2026, 10, 20)).is_expired_on(today));

        // Non-grocery items never expire
        assert!(!phone().is_expired_on(date(2999, 1, 1)));
    }

    #[test]
    fn test_status_transitions() {
        let today = date(2026, 10, 19);
        let mut item = milk(date(2026, 10, 25));
        assert_eq!(item.status_on(today), ProductStatus::Active);

        item.take_stock(20).unwrap();
        assert_eq!(item.status_on(today), ProductStatus::OutOfStock);
        assert!(!item.is_available_on(today));

        item.put_stock(5).unwrap();
        assert_eq!(item.status_on(today), ProductStatus::Active);

        // Once past expiry, restocking does not revive it
        let later = date(2026, 11, 1);
        assert_eq!(item.status_on(later), ProductStatus::Expired);
        item.put_stock(5).unwrap();
        assert_eq!(item.status_on(later), ProductStatus::Expired);
        assert!(!item.is_available_on(later));
    }

    #[test]
    fn test_take_stock_rejects_oversell() {
        let mut item = phone();
        let err = item.take_stock(11).unwrap_err();
        assert_eq!(
            err,
            CatalogError::InsufficientStock {
                id: "E001".to_string(),
                available: 10,
                requested: 11,
            }
        );
        assert_eq!(item.quantity(), 10);
    }

    #[test]
    fn test_put_stock_rejects_overflow() {
        let mut item = phone();
        let err = item.put_stock(i64::MAX).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidQuantity { .. }));
        assert_eq!(item.quantity(), 10);

        // Quantity fits but its stock value would not
        let err = item.put_stock(i64::MAX / 2).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidQuantity { .. }));
        assert_eq!(item.quantity(), 10);
        assert_eq!(item.stock_value(), Money::from_cents(999_990));
    }

    #[test]
    fn test_describe() {
        let today = date(2026, 10, 19);

        assert_eq!(
            phone().describe_on(today),
            "[Electronics] Phone (Brand: Apple, Warranty: 2 yrs) - $999.99, Qty: 10"
        );
        assert_eq!(
            milk(date(2026, 10, 24)).describe_on(today),
            "[Grocery] Milk (Expires: 2026-10-24, Status: Fresh) - $3.50, Qty: 20"
        );
        assert_eq!(
            milk(date(2026, 10, 1)).describe_on(today),
            "[Grocery] Milk (Expires: 2026-10-01, Status: Expired) - $3.50, Qty: 20"
        );
        assert_eq!(
            phone().describe_with_symbol(today, "€"),
            "[Electronics] Phone (Brand: Apple, Warranty: 2 yrs) - €999.99, Qty: 10"
        );
    }

    #[test]
    fn test_serialize_flattens_kind() {
        let json = serde_json::to_value(milk(date(2026, 10, 24))).unwrap();
        assert_eq!(json["id"], "G001");
        assert_eq!(json["category"], "grocery");
        assert_eq!(json["expiry_date"], "2026-10-24");
        assert_eq!(json["price"], 350);
    }
}
