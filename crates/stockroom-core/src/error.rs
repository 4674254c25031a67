//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  ├── CatalogError     - Rejected catalog operations                    │
//! │  └── ValidationError  - Invalid product data                           │
//! │                                                                         │
//! │  CLI errors (apps/cli)                                                 │
//! │  └── CliError         - What the shell prints                          │
//! │                                                                         │
//! │  Flow: ValidationError → CatalogError → CliError → stdout              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every variant carries the offending ID and/or quantity
//! 3. A rejected operation never leaves the catalog half-mutated

use thiserror::Error;

// =============================================================================
// Catalog Error
// =============================================================================

/// Errors raised by catalog operations.
///
/// All of them are local and synchronous. The catalog never retries; the
/// caller decides what to do.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A product with this ID is already in the catalog.
    #[error("Product ID already exists: {id}")]
    DuplicateProduct { id: String },

    /// No product with this ID.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Tried to sell more than is on hand.
    ///
    /// ## User Workflow
    /// ```text
    /// sell E1 5
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { id: "E1", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// Shell shows: "Insufficient stock for E1: available 3, requested 5"
    /// ```
    #[error("Insufficient stock for {id}: available {available}, requested {requested}")]
    InsufficientStock {
        id: String,
        available: i64,
        requested: i64,
    },

    /// Sell/restock quantity was zero or negative, or the resulting stock
    /// would push unit or value totals out of range.
    #[error(
        "Invalid quantity {quantity} for {id}: must be positive and keep stock totals in range"
    )]
    InvalidQuantity { id: String, quantity: i64 },

    /// Product data failed validation.
    #[error("Invalid product data: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised when a product is constructed from bad data, before it ever
/// reaches the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., bad characters, unparseable amount or date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is valid on its own but pushes a derived figure out of range.
    #[error("{field} is out of range: {reason}")]
    OutOfRange { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CatalogError.
pub type CatalogResult<T> = Result<T, CatalogError>;
