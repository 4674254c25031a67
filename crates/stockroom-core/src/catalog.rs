//! # Catalog
//!
//! The in-memory owner of every product, keyed by product ID.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Operations                               │
//! │                                                                         │
//! │  Mutations (validate first, then touch the map)                         │
//! │  ───────────────────────────────────────────────                        │
//! │  add(product)            DuplicateProduct                               │
//! │  remove(id)              ProductNotFound                                │
//! │  sell(id, qty)           InvalidQuantity, ProductNotFound,              │
//! │                          InsufficientStock                              │
//! │  restock(id, qty)        InvalidQuantity, ProductNotFound               │
//! │  remove_expired()        never fails                                    │
//! │                                                                         │
//! │  Queries (read only)                                                    │
//! │  ───────────────────                                                    │
//! │  get, search, filter, list, total_value, out_of_stock,                 │
//! │  expired_as_of, low_stock, summary_as_of                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A rejected operation leaves the map exactly as it was: every check runs
//! before the first write.
//!
//! ## Valuation Policy
//! `total_value()` counts every live entry, including zero-stock items and
//! groceries that are past their date but have not been swept yet. Expiry
//! only takes effect through an explicit sweep.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::error::{CatalogError, CatalogResult};
use crate::local_today;
use crate::money::Money;
use crate::product::Product;
use crate::types::Category;
use crate::validation::{validate_search_query, ValidationResult};

// =============================================================================
// Search Query
// =============================================================================

/// What to look for in [`Catalog::search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Exact product ID.
    Id(String),
    /// Case-insensitive substring of the product name. Empty matches all.
    Name(String),
    /// Every product of one category.
    Category(Category),
}

impl SearchQuery {
    /// Builds a name query, trimming and length-checking the text.
    pub fn name(text: &str) -> ValidationResult<Self> {
        Ok(SearchQuery::Name(validate_search_query(text)?))
    }

    fn matches(&self, product: &Product) -> bool {
        match self {
            SearchQuery::Id(id) => product.id() == id.as_str(),
            SearchQuery::Name(text) => product
                .name()
                .to_lowercase()
                .contains(&text.to_lowercase()),
            SearchQuery::Category(category) => product.category() == *category,
        }
    }
}

// =============================================================================
// Inventory Summary
// =============================================================================

/// Point-in-time figures for the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventorySummary {
    pub as_of: NaiveDate,
    pub product_count: usize,
    pub total_units: i64,
    pub total_value: Money,
    pub out_of_stock: usize,
    pub expired: usize,
    pub by_category: BTreeMap<Category, usize>,
}

// =============================================================================
// Catalog
// =============================================================================

/// In-memory product catalog.
///
/// ## Invariants
/// - No two entries share an ID (the map key is the product's ID)
/// - No quantity is ever negative
/// - `total_value()` is always the sum of price × quantity over entries
/// - Unit and value totals always fit in an `i64`
///
/// Entries are kept in a `BTreeMap`, so every listing comes back ordered
/// by product ID.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: BTreeMap<String, Product>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a fully constructed product.
    ///
    /// ## Errors
    /// - `DuplicateProduct` if the ID is taken; the existing entry is untouched
    /// - `InvalidQuantity` if its stock would push unit or value totals out
    ///   of range
    pub fn add(&mut self, product: Product) -> CatalogResult<()> {
        if self.products.contains_key(product.id()) {
            debug!(id = %product.id(), "Rejected duplicate product");
            return Err(CatalogError::DuplicateProduct {
                id: product.id().to_string(),
            });
        }
        self.ensure_totals_fit(product.id(), product.quantity(), product.stock_value())?;

        debug!(
            id = %product.id(),
            category = %product.category(),
            quantity = product.quantity(),
            "Product added"
        );
        self.products.insert(product.id().to_string(), product);
        Ok(())
    }

    /// Removes a product and hands it back to the caller.
    ///
    /// ## Errors
    /// - `ProductNotFound` if no product has this ID
    pub fn remove(&mut self, id: &str) -> CatalogResult<Product> {
        let product = self
            .products
            .remove(id)
            .ok_or_else(|| CatalogError::ProductNotFound(id.to_string()))?;

        debug!(id = %id, "Product removed");
        Ok(product)
    }

    /// Sells `quantity` units and returns the remaining stock.
    ///
    /// At zero stock the product stays in the catalog; it just reports
    /// unavailable until restocked.
    ///
    /// ## Errors
    /// - `InvalidQuantity` if `quantity <= 0`
    /// - `ProductNotFound` if no product has this ID
    /// - `InsufficientStock` if `quantity` exceeds the stock on hand
    pub fn sell(&mut self, id: &str, quantity: i64) -> CatalogResult<i64> {
        ensure_positive(id, quantity)?;

        let product = self.get_mut(id)?;
        let remaining = product.take_stock(quantity)?;

        debug!(id = %id, sold = quantity, remaining, "Product sold");
        Ok(remaining)
    }

    /// Adds `quantity` units and returns the new stock level.
    ///
    /// ## Errors
    /// - `InvalidQuantity` if `quantity <= 0`, or the new level or its value
    ///   would push catalog totals out of range
    /// - `ProductNotFound` if no product has this ID
    pub fn restock(&mut self, id: &str, quantity: i64) -> CatalogResult<i64> {
        ensure_positive(id, quantity)?;

        let price = self.get_mut(id)?.price();
        let added_value = price
            .checked_multiply_quantity(quantity)
            .ok_or_else(|| CatalogError::InvalidQuantity {
                id: id.to_string(),
                quantity,
            })?;
        self.ensure_totals_fit(id, quantity, added_value)?;

        let product = self.get_mut(id)?;
        let on_hand = product.put_stock(quantity)?;

        debug!(id = %id, added = quantity, on_hand, "Product restocked");
        Ok(on_hand)
    }

    /// Sweeps groceries whose expiry date is strictly before `today`.
    ///
    /// Returns the removed products, ordered by ID. Electronics and clothing
    /// are never touched.
    pub fn remove_expired_as_of(&mut self, today: NaiveDate) -> Vec<Product> {
        let expired_ids: Vec<String> = self
            .products
            .values()
            .filter(|p| p.is_expired_on(today))
            .map(|p| p.id().to_string())
            .collect();

        let removed: Vec<Product> = expired_ids
            .iter()
            .filter_map(|id| self.products.remove(id))
            .collect();

        info!(
            %today,
            removed = removed.len(),
            remaining = self.products.len(),
            "Expiry sweep complete"
        );
        removed
    }

    /// [`Catalog::remove_expired_as_of`] against the local calendar date.
    pub fn remove_expired(&mut self) -> Vec<Product> {
        self.remove_expired_as_of(local_today())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Looks up one product by ID.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.get(id)
    }

    fn get_mut(&mut self, id: &str) -> CatalogResult<&mut Product> {
        self.products
            .get_mut(id)
            .ok_or_else(|| CatalogError::ProductNotFound(id.to_string()))
    }

    /// Every product, ordered by ID.
    pub fn list(&self) -> Vec<&Product> {
        self.products.values().collect()
    }

    /// Products matching the query, ordered by ID. Possibly empty.
    pub fn search(&self, query: &SearchQuery) -> Vec<&Product> {
        let results: Vec<&Product> = match query {
            SearchQuery::Id(id) => self.products.get(id).into_iter().collect(),
            _ => self.filter(|p| query.matches(p)),
        };

        debug!(?query, count = results.len(), "Search returned products");
        results
    }

    /// Products satisfying an arbitrary predicate, ordered by ID.
    pub fn filter<P>(&self, predicate: P) -> Vec<&Product>
    where
        P: Fn(&Product) -> bool,
    {
        self.products.values().filter(|&p| predicate(p)).collect()
    }

    /// Sum of price × quantity over every entry.
    ///
    /// Includes zero-stock items (they add nothing) and expired groceries
    /// that have not been swept yet. `add` and `restock` keep the sum in
    /// range, so the saturating fold never clamps.
    pub fn total_value(&self) -> Money {
        self.products
            .values()
            .fold(Money::zero(), |acc, p| acc.saturating_add(p.stock_value()))
    }

    /// Units on hand across every entry. Kept in range like `total_value`.
    pub fn total_units(&self) -> i64 {
        self.products
            .values()
            .fold(0i64, |acc, p| acc.saturating_add(p.quantity()))
    }

    fn ensure_totals_fit(&self, id: &str, units: i64, value: Money) -> CatalogResult<()> {
        let fits = self.total_units().checked_add(units).is_some()
            && self.total_value().checked_add(value).is_some();

        if !fits {
            debug!(id = %id, units, value = %value, "Rejected stock beyond catalog totals");
            return Err(CatalogError::InvalidQuantity {
                id: id.to_string(),
                quantity: units,
            });
        }
        Ok(())
    }

    /// Products with zero stock.
    pub fn out_of_stock(&self) -> Vec<&Product> {
        self.filter(|p| p.quantity() == 0)
    }

    /// Groceries that a sweep on `today` would remove. Nothing is removed.
    pub fn expired_as_of(&self, today: NaiveDate) -> Vec<&Product> {
        self.filter(|p| p.is_expired_on(today))
    }

    /// Products still in stock but at or below `threshold` units.
    pub fn low_stock(&self, threshold: i64) -> Vec<&Product> {
        self.filter(|p| p.quantity() > 0 && p.quantity() <= threshold)
    }

    /// Point-in-time totals, with expiry judged on `today`.
    pub fn summary_as_of(&self, today: NaiveDate) -> InventorySummary {
        let mut by_category: BTreeMap<Category, usize> =
            Category::ALL.iter().map(|c| (*c, 0)).collect();
        for product in self.products.values() {
            *by_category.entry(product.category()).or_insert(0) += 1;
        }

        InventorySummary {
            as_of: today,
            product_count: self.products.len(),
            total_units: self.total_units(),
            total_value: self.total_value(),
            out_of_stock: self.out_of_stock().len(),
            expired: self.expired_as_of(today).len(),
            by_category,
        }
    }
}

fn ensure_positive(id: &str, quantity: i64) -> CatalogResult<()> {
    if quantity <= 0 {
        return Err(CatalogError::InvalidQuantity {
            id: id.to_string(),
            quantity,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
