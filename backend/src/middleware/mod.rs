//! HTTP middleware for the Shop Inventory Management Platform

pub mod auth;

pub use auth::{auth_middleware, AuthUser, CurrentUser};
