//! The fixed cake catalog offered at submission time.
//!
//! Categories, sizes (with base price in LKR), and flavors are a small,
//! compiled-in enumeration. Submissions are validated against these lists,
//! and the selected size's price is the base of an order's `total_price`.
//! Catalog edits never touch already-created orders.

use serde::Serialize;

/// A cake size option and its base price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CakeSize {
    /// Display label, e.g. "1kg".
    pub size: &'static str,
    /// Base price in LKR for this size.
    pub price: f64,
}

/// Cake categories available on the storefront.
pub const CAKE_CATEGORIES: &[&str] = &[
    "Birthday Cakes",
    "Bento Cakes",
    "Wedding Cakes",
    "Custom Cakes",
];

/// Cake sizes with their base prices.
pub const CAKE_SIZES: &[CakeSize] = &[
    CakeSize {
        size: "1kg",
        price: 3500.0,
    },
    CakeSize {
        size: "1.5kg",
        price: 5000.0,
    },
    CakeSize {
        size: "2kg",
        price: 6500.0,
    },
];

/// Cake flavors available on the storefront.
pub const CAKE_FLAVORS: &[&str] = &[
    "Chocolate Fudge",
    "Vanilla Bean",
    "Red Velvet",
    "Ribbon Cake",
    "Coffee",
    "Butter Cake",
    "Custom",
];

/// Looks up the base price for a size label, `None` if the size is not in
/// the catalog.
#[must_use]
pub fn size_price(size: &str) -> Option<f64> {
    CAKE_SIZES.iter().find(|s| s.size == size).map(|s| s.price)
}

/// Whether a category label is part of the catalog.
#[must_use]
pub fn is_known_category(category: &str) -> bool {
    CAKE_CATEGORIES.contains(&category)
}

/// Whether a flavor label is part of the catalog.
#[must_use]
pub fn is_known_flavor(flavor: &str) -> bool {
    CAKE_FLAVORS.contains(&flavor)
}
