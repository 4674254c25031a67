//! # Catalog State
//!
//! Shares one catalog between every caller of the shell.
//!
//! ## Thread Safety
//! The catalog is wrapped in `Arc<Mutex<T>>` because:
//! 1. The shell and any embedding code may hold handles at the same time
//! 2. Every catalog operation runs start to finish under the lock
//! 3. No operation splits into steps that could run in parallel
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog State Operations                             │
//! │                                                                         │
//! │  Shell Command        Access                 Catalog Call               │
//! │  ─────────────        ──────                 ────────────               │
//! │                                                                         │
//! │  add / sell ────────► with_catalog_mut() ──► catalog.add / sell         │
//! │  restock / remove ──► with_catalog_mut() ──► catalog.restock / remove   │
//! │  sweep ─────────────► with_catalog_mut() ──► catalog.remove_expired     │
//! │                                                                         │
//! │  search / list ─────► with_catalog() ──────► (read only)                │
//! │  value / flagged ───► with_catalog() ──────► (read only)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use stockroom_core::Catalog;

/// Shared handle to a catalog.
///
/// Cloning the handle shares the same catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    catalog: Arc<Mutex<Catalog>>,
}

impl CatalogState {
    /// Wraps an existing catalog.
    pub fn new(catalog: Catalog) -> Self {
        CatalogState {
            catalog: Arc::new(Mutex::new(catalog)),
        }
    }

    /// Executes a function with read access to the catalog.
    ///
    /// ## Usage
    /// ```rust
    /// # use stockroom_cli::state::CatalogState;
    /// let state = CatalogState::default();
    /// let value = state.with_catalog(|catalog| catalog.total_value());
    /// assert!(value.is_zero());
    /// ```
    pub fn with_catalog<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Catalog) -> R,
    {
        let catalog = self.catalog.lock().expect("Catalog mutex poisoned");
        f(&catalog)
    }

    /// Executes a function with write access to the catalog.
    pub fn with_catalog_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Catalog) -> R,
    {
        let mut catalog = self.catalog.lock().expect("Catalog mutex poisoned");
        f(&mut catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use stockroom_core::{Money, Product};

    #[test]
    fn test_clones_share_catalog() {
        let state = CatalogState::default();
        let other = state.clone();

        let phone = Product::electronics("E1", "Phone", Money::from_cents(100), 1, 1, "Acme").unwrap();
        state.with_catalog_mut(|c| c.add(phone)).unwrap();

        assert_eq!(other.with_catalog(|c| c.len()), 1);
    }

    #[test]
    fn test_concurrent_restocks_are_serialized() {
        let mut catalog = Catalog::new();
        catalog
            .add(Product::clothing("C1", "Sock", Money::from_cents(300), 0, "M", "Wool").unwrap())
            .unwrap();
        let state = CatalogState::new(catalog);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let state = state.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        state.with_catalog_mut(|c| c.restock("C1", 1)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let qty = state.with_catalog(|c| c.get("C1").map(|p| p.quantity()));
        assert_eq!(qty, Some(800));
    }
}
