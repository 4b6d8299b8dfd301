//! Business logic services for the Shop Inventory Management Platform

pub mod adjustment;
pub mod customer;
pub mod notification;
pub mod product;
pub mod purchase_order;
pub mod sale;
pub mod stock;

pub use adjustment::AdjustmentService;
pub use customer::CustomerService;
pub use notification::NotificationService;
pub use product::ProductService;
pub use purchase_order::PurchaseOrderService;
pub use sale::SaleService;
