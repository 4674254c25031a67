//! # stockroom-core: Pure Inventory Logic for Stockroom
//!
//! This crate is the **heart** of Stockroom. It owns the product model and
//! the in-memory catalog, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    CLI (apps/cli)                               │   │
//! │  │    add ──► sell ──► restock ──► sweep ──► value                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CatalogState (Mutex)                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockroom-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  product  │  │   money   │  │  catalog  │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │  Catalog  │  │   rules   │  │   │
//! │  │   │   Kind    │  │   cents   │  │  Search   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PERSISTENCE • NO NETWORK                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Small domain enums (Category, ProductStatus)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`product`] - Product entity and its category variants
//! - [`catalog`] - The catalog: add, remove, sell, restock, search, sweep
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::{Catalog, Money, Product};
//!
//! let mut catalog = Catalog::new();
//! let phone = Product::electronics("E1", "Phone", Money::from_major_minor(500, 0), 10, 2, "Acme")
//!     .unwrap();
//! catalog.add(phone).unwrap();
//!
//! catalog.sell("E1", 3).unwrap();
//! assert_eq!(catalog.total_value(), Money::from_major_minor(3500, 0));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod product;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{Catalog, InventorySummary, SearchQuery};
pub use error::{CatalogError, CatalogResult, ValidationError};
pub use money::Money;
pub use product::{Product, ProductKind};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product ID.
pub const MAX_PRODUCT_ID_LEN: usize = 50;

/// Maximum length of a product name.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Maximum length of a free-text attribute (brand, size, material).
pub const MAX_ATTRIBUTE_LEN: usize = 100;

/// Returns today's date on the local clock.
///
/// Expiry is judged by calendar day, so the sweep and availability checks
/// compare against this rather than a timestamp.
pub fn local_today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
