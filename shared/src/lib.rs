//! Shared domain logic for the Shop Inventory Management Platform
//!
//! This crate contains the pure, database-free half of the inventory engine:
//! stock-level alert decisions, reference-code generation, and input
//! validation helpers. The backend drives these from its transactional
//! workflows; other components reuse the same rules.

pub mod reference;
pub mod stock;
pub mod validation;

pub use reference::*;
pub use stock::*;
pub use validation::*;
