//! # Demo Data
//!
//! Pre-loads a small catalog so the shell has something to work on.
//!
//! ## Generated Products
//! - Electronics: phone, laptop
//! - Grocery: milk (fresh), yogurt (already expired), bread
//! - Clothing: shirt, jacket (out of stock)
//!
//! Grocery expiry dates are relative to the day the shell starts, so every
//! run shows one fresh, one expired, and one nearly-expired item.
//!
//! Skipped with `--no-seed` or `seed_demo_data = false`.

use chrono::{Duration, NaiveDate};
use stockroom_core::validation::ValidationResult;
use stockroom_core::{Catalog, CatalogResult, Money, Product};
use tracing::info;

/// (id, name, price in cents, quantity, warranty years, brand)
const ELECTRONICS: &[(&str, &str, i64, i64, u32, &str)] = &[
    ("E001", "Phone", 99_999, 10, 2, "Apple"),
    ("E002", "Laptop", 149_900, 3, 3, "Lenovo"),
];

/// (id, name, price in cents, quantity, days until expiry)
const GROCERIES: &[(&str, &str, i64, i64, i64)] = &[
    ("G001", "Milk", 350, 20, 5),
    ("G002", "Yogurt", 125, 8, -1),
    ("G003", "Bread", 275, 4, 1),
];

/// (id, name, price in cents, quantity, size, material)
const CLOTHING: &[(&str, &str, i64, i64, &str, &str)] = &[
    ("C001", "Shirt", 2_999, 15, "M", "Cotton"),
    ("C002", "Jacket", 8_950, 0, "L", "Denim"),
];

/// Builds the demo products with expiry dates relative to `today`.
pub fn demo_products(today: NaiveDate) -> ValidationResult<Vec<Product>> {
    let mut products = Vec::with_capacity(ELECTRONICS.len() + GROCERIES.len() + CLOTHING.len());

    for &(id, name, cents, qty, warranty, brand) in ELECTRONICS {
        products.push(Product::electronics(
            id,
            name,
            Money::from_cents(cents),
            qty,
            warranty,
            brand,
        )?);
    }

    for &(id, name, cents, qty, days) in GROCERIES {
        let expiry = today + Duration::days(days);
        products.push(Product::grocery(id, name, Money::from_cents(cents), qty, expiry)?);
    }

    for &(id, name, cents, qty, size, material) in CLOTHING {
        products.push(Product::clothing(
            id,
            name,
            Money::from_cents(cents),
            qty,
            size,
            material,
        )?);
    }

    Ok(products)
}

/// Adds the demo products to `catalog`. Returns how many were added.
///
/// Fails on the first product whose ID is already taken.
pub fn seed_catalog(catalog: &mut Catalog, today: NaiveDate) -> CatalogResult<usize> {
    let products = demo_products(today)?;
    let count = products.len();

    for product in products {
        catalog.add(product)?;
    }

    info!(count, "Seeded demo products");
    Ok(count)
}
