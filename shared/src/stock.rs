//! Stock-level alert decisions.
//!
//! Pure functions over a product's post-mutation stock count. The backend
//! evaluates every stock movement through these before persisting a
//! notification, and frontends can reuse the same thresholds for badges.

use serde::{Deserialize, Serialize};

/// Severity of a stock alert, least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Info,
    Warning,
    Danger,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Info => "info",
            AlertSeverity::Warning => "warning",
            AlertSeverity::Danger => "danger",
        }
    }
}

/// Classification of an on-hand count against a product's alert threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    /// At or above the alert threshold. No alert.
    Healthy,
    /// Below the threshold with units still on hand (or oversold below zero).
    BelowThreshold,
    /// Below the threshold at exactly zero units.
    OutOfStock,
}

/// Classify a post-mutation stock count.
///
/// The threshold gates everything: a count at or above `alert_quantity` is
/// healthy even when it is zero. Below the threshold, exactly zero is
/// out-of-stock and anything else (including negative counts from
/// overselling) is below-threshold.
pub fn classify_stock_level(stock_quantity: i32, alert_quantity: i32) -> StockLevel {
    if stock_quantity >= alert_quantity {
        StockLevel::Healthy
    } else if stock_quantity == 0 {
        StockLevel::OutOfStock
    } else {
        StockLevel::BelowThreshold
    }
}

/// A stock alert ready to persist as a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAlert {
    pub severity: AlertSeverity,
    pub status_text: String,
    pub message: String,
}

/// Alert decision for depleting movements (sale issuance, subtraction
/// adjustments): `DANGER` when the product just hit zero, `WARNING` when it
/// fell below the threshold, nothing otherwise.
pub fn depletion_alert(
    product_name: &str,
    stock_quantity: i32,
    alert_quantity: i32,
) -> Option<StockAlert> {
    match classify_stock_level(stock_quantity, alert_quantity) {
        StockLevel::Healthy => None,
        StockLevel::OutOfStock => Some(StockAlert {
            severity: AlertSeverity::Danger,
            status_text: "Out of stock".to_string(),
            message: format!(
                "The stock of {} is out. Current stock is {}.",
                product_name, stock_quantity
            ),
        }),
        StockLevel::BelowThreshold => Some(StockAlert {
            severity: AlertSeverity::Warning,
            status_text: "Warning".to_string(),
            message: format!(
                "The stock of {} has gone below threshold. Current stock is {}.",
                product_name, stock_quantity
            ),
        }),
    }
}

/// Alert decision for replenishing movements (purchase-order receipts):
/// receiving stock that still leaves the product under its threshold is
/// informational, never a warning.
pub fn replenishment_alert(
    product_name: &str,
    stock_quantity: i32,
    alert_quantity: i32,
) -> Option<StockAlert> {
    match classify_stock_level(stock_quantity, alert_quantity) {
        StockLevel::Healthy => None,
        _ => Some(StockAlert {
            severity: AlertSeverity::Info,
            status_text: "New Stock".to_string(),
            message: format!(
                "New stock for {}. Current stock is {}.",
                product_name, stock_quantity
            ),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_healthy_at_threshold() {
        assert_eq!(classify_stock_level(5, 5), StockLevel::Healthy);
        assert_eq!(classify_stock_level(100, 5), StockLevel::Healthy);
    }

    #[test]
    fn test_classify_out_of_stock() {
        assert_eq!(classify_stock_level(0, 5), StockLevel::OutOfStock);
        assert_eq!(classify_stock_level(0, 1), StockLevel::OutOfStock);
    }

    #[test]
    fn test_classify_zero_with_zero_threshold_is_healthy() {
        // The threshold gate comes first: alert_quantity of 0 never alerts.
        assert_eq!(classify_stock_level(0, 0), StockLevel::Healthy);
    }

    #[test]
    fn test_classify_below_threshold() {
        assert_eq!(classify_stock_level(3, 5), StockLevel::BelowThreshold);
        assert_eq!(classify_stock_level(1, 2), StockLevel::BelowThreshold);
    }

    #[test]
    fn test_classify_negative_is_below_threshold_not_out() {
        assert_eq!(classify_stock_level(-2, 5), StockLevel::BelowThreshold);
    }

    #[test]
    fn test_depletion_danger_message() {
        let alert = depletion_alert("Sugar 1kg", 0, 5).unwrap();
        assert_eq!(alert.severity, AlertSeverity::Danger);
        assert_eq!(alert.status_text, "Out of stock");
        assert_eq!(
            alert.message,
            "The stock of Sugar 1kg is out. Current stock is 0."
        );
    }

    #[test]
    fn test_depletion_warning_message() {
        let alert = depletion_alert("Sugar 1kg", 3, 5).unwrap();
        assert_eq!(alert.severity, AlertSeverity::Warning);
        assert_eq!(alert.status_text, "Warning");
        assert_eq!(
            alert.message,
            "The stock of Sugar 1kg has gone below threshold. Current stock is 3."
        );
    }

    #[test]
    fn test_depletion_none_at_or_above_threshold() {
        assert!(depletion_alert("Sugar 1kg", 5, 5).is_none());
        assert!(depletion_alert("Sugar 1kg", 50, 5).is_none());
    }

    #[test]
    fn test_replenishment_info_below_threshold() {
        let alert = replenishment_alert("Rice 5kg", 4, 10).unwrap();
        assert_eq!(alert.severity, AlertSeverity::Info);
        assert_eq!(alert.status_text, "New Stock");
        assert_eq!(
            alert.message,
            "New stock for Rice 5kg. Current stock is 4."
        );
    }

    #[test]
    fn test_replenishment_never_warns() {
        // Even a receipt landing on zero stays informational.
        let alert = replenishment_alert("Rice 5kg", 0, 10).unwrap();
        assert_eq!(alert.severity, AlertSeverity::Info);
    }

    #[test]
    fn test_replenishment_none_at_threshold() {
        assert!(replenishment_alert("Rice 5kg", 10, 10).is_none());
    }
}
