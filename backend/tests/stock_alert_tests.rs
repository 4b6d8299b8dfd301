//! Low-stock notifier tests
//!
//! Covers the alert decision applied after every stock movement:
//! - alerts fire only when the count lands below the alert threshold
//! - depleting to exactly zero escalates to danger
//! - replenishing movements stay informational
//! - notification message and status text formats

use proptest::prelude::*;

use shared::stock::{
    classify_stock_level, depletion_alert, replenishment_alert, AlertSeverity, StockLevel,
};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Selling the entire stock lands on zero and escalates to danger
    #[test]
    fn test_sale_depleting_to_zero_is_danger() {
        // 10 on hand, threshold 5, sell all 10
        let post_sale_stock = 10 - 10;
        let alert = depletion_alert("Maize Flour 2kg", post_sale_stock, 5).unwrap();

        assert_eq!(alert.severity, AlertSeverity::Danger);
        assert_eq!(alert.status_text, "Out of stock");
        assert_eq!(
            alert.message,
            "The stock of Maize Flour 2kg is out. Current stock is 0."
        );
    }

    /// A sale leaving units on hand below the threshold warns
    #[test]
    fn test_sale_below_threshold_is_warning() {
        let alert = depletion_alert("Maize Flour 2kg", 2, 5).unwrap();

        assert_eq!(alert.severity, AlertSeverity::Warning);
        assert_eq!(alert.status_text, "Warning");
        assert_eq!(
            alert.message,
            "The stock of Maize Flour 2kg has gone below threshold. Current stock is 2."
        );
    }

    /// A sale leaving stock at or above the threshold is silent
    #[test]
    fn test_sale_at_threshold_is_silent() {
        assert!(depletion_alert("Maize Flour 2kg", 5, 5).is_none());
        assert!(depletion_alert("Maize Flour 2kg", 9, 5).is_none());
    }

    /// A zero threshold disables alerts entirely, even at zero stock
    #[test]
    fn test_zero_threshold_never_alerts() {
        assert!(depletion_alert("Promo Item", 0, 0).is_none());
        assert!(replenishment_alert("Promo Item", 0, 0).is_none());
    }

    /// Oversold (negative) stock is a warning, not out-of-stock
    #[test]
    fn test_oversold_stock_is_warning() {
        let alert = depletion_alert("Maize Flour 2kg", -3, 5).unwrap();
        assert_eq!(alert.severity, AlertSeverity::Warning);
    }

    /// A receipt that still leaves the product short is informational
    #[test]
    fn test_receipt_below_threshold_is_info() {
        let alert = replenishment_alert("Cooking Oil 1L", 6, 10).unwrap();

        assert_eq!(alert.severity, AlertSeverity::Info);
        assert_eq!(alert.status_text, "New Stock");
        assert_eq!(
            alert.message,
            "New stock for Cooking Oil 1L. Current stock is 6."
        );
    }

    /// A receipt reaching the threshold clears the alert condition
    #[test]
    fn test_receipt_reaching_threshold_is_silent() {
        assert!(replenishment_alert("Cooking Oil 1L", 10, 10).is_none());
        assert!(replenishment_alert("Cooking Oil 1L", 25, 10).is_none());
    }

    /// Severity maps to the wire labels used by the notifications table
    #[test]
    fn test_severity_labels() {
        assert_eq!(AlertSeverity::Info.as_str(), "info");
        assert_eq!(AlertSeverity::Warning.as_str(), "warning");
        assert_eq!(AlertSeverity::Danger.as_str(), "danger");
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// An alert exists exactly when the count is below the threshold
        #[test]
        fn prop_alert_iff_below_threshold(
            stock in -100i32..=200,
            alert_quantity in 0i32..=100
        ) {
            let depleting = depletion_alert("Test Product", stock, alert_quantity);
            let replenishing = replenishment_alert("Test Product", stock, alert_quantity);

            if stock < alert_quantity {
                prop_assert!(depleting.is_some());
                prop_assert!(replenishing.is_some());
            } else {
                prop_assert!(depleting.is_none());
                prop_assert!(replenishing.is_none());
            }
        }

        /// Depleting alerts are danger at exactly zero, warning otherwise
        #[test]
        fn prop_depletion_severity(
            stock in -100i32..=200,
            alert_quantity in 1i32..=100
        ) {
            if let Some(alert) = depletion_alert("Test Product", stock, alert_quantity) {
                if stock == 0 {
                    prop_assert_eq!(alert.severity, AlertSeverity::Danger);
                } else {
                    prop_assert_eq!(alert.severity, AlertSeverity::Warning);
                }
            }
        }

        /// Replenishing alerts never escalate past info
        #[test]
        fn prop_replenishment_is_always_info(
            stock in -100i32..=200,
            alert_quantity in 0i32..=100
        ) {
            if let Some(alert) = replenishment_alert("Test Product", stock, alert_quantity) {
                prop_assert_eq!(alert.severity, AlertSeverity::Info);
            }
        }

        /// Classification and alert decisions agree
        #[test]
        fn prop_classification_matches_alerts(
            stock in -100i32..=200,
            alert_quantity in 0i32..=100
        ) {
            let level = classify_stock_level(stock, alert_quantity);
            let alert = depletion_alert("Test Product", stock, alert_quantity);

            match level {
                StockLevel::Healthy => prop_assert!(alert.is_none()),
                StockLevel::OutOfStock => {
                    prop_assert_eq!(alert.unwrap().severity, AlertSeverity::Danger)
                }
                StockLevel::BelowThreshold => {
                    prop_assert_eq!(alert.unwrap().severity, AlertSeverity::Warning)
                }
            }
        }

        /// Every alert message names the product and the exact count
        #[test]
        fn prop_message_carries_product_and_count(
            stock in -100i32..=200,
            alert_quantity in 0i32..=100
        ) {
            for alert in [
                depletion_alert("Basmati Rice", stock, alert_quantity),
                replenishment_alert("Basmati Rice", stock, alert_quantity),
            ]
            .into_iter()
            .flatten()
            {
                prop_assert!(alert.message.contains("Basmati Rice"));
                prop_assert!(alert.message.contains(&stock.to_string()));
            }
        }
    }
}
