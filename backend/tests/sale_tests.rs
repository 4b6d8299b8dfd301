//! Sale workflow tests
//!
//! Covers the rules enforced by sale creation:
//! - credit sales never exceed the customer's remaining limit
//! - the credit account moves limit and unpaid balance together
//! - stock issuance subtracts every line item exactly once
//! - line item validation

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::validation::{validate_amount, validate_quantity};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Customer credit account model: the remaining limit and the unpaid
/// balance move together under a credit sale
#[derive(Debug, Clone, Copy, PartialEq)]
struct CreditAccount {
    remaining_limit: Decimal,
    unpaid_amount: Decimal,
}

/// The guarded credit extension a credit sale applies: rejected when the
/// balance exceeds the remaining limit, atomic otherwise
fn extend_credit(account: CreditAccount, balance: Decimal) -> Option<CreditAccount> {
    if balance > account.remaining_limit {
        return None;
    }
    Some(CreditAccount {
        remaining_limit: account.remaining_limit - balance,
        unpaid_amount: account.unpaid_amount + balance,
    })
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// A balance within the remaining limit is accepted and moves both sides
    #[test]
    fn test_credit_within_limit_accepted() {
        let account = CreditAccount {
            remaining_limit: dec("100.00"),
            unpaid_amount: dec("0.00"),
        };

        let account = extend_credit(account, dec("40.00")).unwrap();
        assert_eq!(account.remaining_limit, dec("60.00"));
        assert_eq!(account.unpaid_amount, dec("40.00"));
    }

    /// A balance equal to the remaining limit is still accepted
    #[test]
    fn test_credit_at_limit_accepted() {
        let account = CreditAccount {
            remaining_limit: dec("100.00"),
            unpaid_amount: dec("25.00"),
        };

        let account = extend_credit(account, dec("100.00")).unwrap();
        assert_eq!(account.remaining_limit, dec("0.00"));
        assert_eq!(account.unpaid_amount, dec("125.00"));
    }

    /// A balance above the remaining limit is rejected without movement
    #[test]
    fn test_credit_over_limit_rejected() {
        let account = CreditAccount {
            remaining_limit: dec("100.00"),
            unpaid_amount: dec("0.00"),
        };

        // Requesting 150 against a remaining limit of 100
        assert!(extend_credit(account, dec("150.00")).is_none());
    }

    /// A second sale cannot spend credit the first already consumed
    #[test]
    fn test_sequential_credit_sales_respect_remaining_limit() {
        let account = CreditAccount {
            remaining_limit: dec("100.00"),
            unpaid_amount: dec("0.00"),
        };

        // Both sales are within the original limit, but not together
        let account = extend_credit(account, dec("70.00")).unwrap();
        assert!(extend_credit(account, dec("70.00")).is_none());

        // The remainder is still spendable
        assert!(extend_credit(account, dec("30.00")).is_some());
    }

    /// Issuing stock subtracts each line item from the on-hand count
    #[test]
    fn test_stock_issuance_subtracts_line_items() {
        let mut stock = 50;
        let quantities = [10, 5, 2];

        for quantity in quantities {
            stock -= quantity;
        }

        assert_eq!(stock, 33);
    }

    /// Two line items for the same product accumulate their deltas
    #[test]
    fn test_repeated_product_lines_accumulate() {
        let mut stock = 10;

        // The same product appears twice in one sale
        stock -= 4;
        stock -= 4;

        assert_eq!(stock, 2);
    }

    /// Selling more than is on hand drives the count negative, not clamped
    #[test]
    fn test_overselling_goes_negative() {
        let stock = 3 - 5;
        assert_eq!(stock, -2);
    }

    /// Line item quantities must be whole and positive
    #[test]
    fn test_line_item_quantity_validation() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(120).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-4).is_err());
    }

    /// Monetary fields on a sale must not be negative
    #[test]
    fn test_sale_amount_validation() {
        assert!(validate_amount(dec("0.00")).is_ok());
        assert!(validate_amount(dec("1999.99")).is_ok());
        assert!(validate_amount(dec("-0.01")).is_err());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating monetary amounts (0.01 to 10000.00)
    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=1_000_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// A successful credit extension conserves limit + unpaid
        #[test]
        fn prop_credit_extension_conserves_account_total(
            limit in amount_strategy(),
            unpaid in amount_strategy(),
            balance in amount_strategy()
        ) {
            let account = CreditAccount {
                remaining_limit: limit,
                unpaid_amount: unpaid,
            };

            if let Some(updated) = extend_credit(account, balance) {
                prop_assert_eq!(
                    updated.remaining_limit + updated.unpaid_amount,
                    limit + unpaid
                );
            }
        }

        /// No sequence of credit sales can push the remaining limit negative
        #[test]
        fn prop_credit_limit_never_overrun(
            limit in amount_strategy(),
            balances in prop::collection::vec(amount_strategy(), 1..20)
        ) {
            let mut account = CreditAccount {
                remaining_limit: limit,
                unpaid_amount: Decimal::ZERO,
            };
            let mut accepted_total = Decimal::ZERO;

            for balance in balances {
                if let Some(updated) = extend_credit(account, balance) {
                    account = updated;
                    accepted_total += balance;
                }
            }

            prop_assert!(account.remaining_limit >= Decimal::ZERO);
            prop_assert!(accepted_total <= limit);
            prop_assert_eq!(account.unpaid_amount, accepted_total);
        }

        /// Total stock issued equals the sum of line item quantities,
        /// regardless of line order
        #[test]
        fn prop_stock_issuance_totals(
            initial_stock in 0i32..=10_000,
            quantities in prop::collection::vec(1i32..=50, 1..15)
        ) {
            let total: i32 = quantities.iter().sum();

            let mut forward = initial_stock;
            for quantity in &quantities {
                forward -= quantity;
            }

            let mut reversed = initial_stock;
            for quantity in quantities.iter().rev() {
                reversed -= quantity;
            }

            prop_assert_eq!(forward, initial_stock - total);
            prop_assert_eq!(reversed, forward);
        }
    }
}
