//! Core business logic - framework-agnostic order, validation, lifecycle,
//! aggregation, and suggestion operations.

/// Dashboard summary aggregation
pub mod dashboard;
/// Reference-image blob storage
pub mod image;
/// Order status and payment mutations
pub mod lifecycle;
/// Order creation, lookup, listing, and deletion
pub mod order;
/// Fulfillment and payment status types with the transition table
pub mod status;
/// AI cake-suggestion gateway
pub mod suggestion;
/// Submission validation
pub mod validation;
