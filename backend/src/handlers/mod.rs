//! HTTP handlers for the Shop Inventory Management Platform

pub mod adjustment;
pub mod customer;
pub mod notification;
pub mod product;
pub mod purchase_order;
pub mod sale;

pub use adjustment::{
    create_adjustment, delete_adjustment, get_adjustment, list_adjustments, update_adjustment,
};
pub use customer::{
    create_customer, delete_customer, get_customer, list_customers, update_customer,
};
pub use notification::{
    delete_notification, get_notification, get_unread_count, list_notifications,
    update_notification,
};
pub use product::{create_product, delete_product, get_product, list_products, update_product};
pub use purchase_order::{
    create_purchase_order, delete_purchase_order, get_purchase_order, list_purchase_orders,
    update_purchase_order,
};
pub use sale::{
    create_sale, delete_sale, get_sale, list_sales, list_sales_by_shop, update_sale,
};
