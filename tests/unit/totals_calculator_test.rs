// Property-based tests for invoice total composition
//
// Covers: idempotence, zero items, exact total invariant, the worked
// percentage/fixed examples, the overflow policy and monotonicity in price.

use clinic_invoicing::core::{AppError, Currency};
use clinic_invoicing::discounts::{DiscountPolicy, DiscountSpec};
use clinic_invoicing::invoices::{InvoiceTotals, LineItem, TotalsCalculator};
use clinic_invoicing::taxes::TaxSpec;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn line_items(rows: &[(i32, Decimal)]) -> Vec<LineItem> {
    rows.iter()
        .map(|(qty, price)| LineItem::new("Therapy session", *qty, *price).unwrap())
        .collect()
}

/// Unit price in cents-with-a-fraction: 0.000 to 10,000.000
fn price() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|milli| Decimal::new(milli, 3))
}

fn rows() -> impl Strategy<Value = Vec<(i32, Decimal)>> {
    prop::collection::vec((0i32..50i32, price()), 0..8)
}

fn discount() -> impl Strategy<Value = DiscountSpec> {
    prop_oneof![
        (0i64..=10_000i64).prop_map(|bp| DiscountSpec::percentage(Decimal::new(bp, 2))),
        (0i64..5_000_000i64).prop_map(|cents| DiscountSpec::fixed(Decimal::new(cents, 2))),
    ]
}

fn tax() -> impl Strategy<Value = TaxSpec> {
    (0i64..=5_000i64).prop_map(|bp| TaxSpec::new(Decimal::new(bp, 2)))
}

proptest! {
    #[test]
    fn test_compose_is_idempotent(rows in rows(), discount in discount(), tax in tax()) {
        let calculator = TotalsCalculator::default();
        let items = line_items(&rows);

        let first = calculator.compose_totals(&items, &discount, &tax).unwrap();
        let second = calculator.compose_totals(&items, &discount, &tax).unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_total_invariant_is_exact(rows in rows(), discount in discount(), tax in tax()) {
        let totals = TotalsCalculator::default()
            .compose_totals(&line_items(&rows), &discount, &tax)
            .unwrap();

        prop_assert_eq!(
            totals.total_amount,
            totals.subtotal - totals.discount_amount + totals.tax_amount
        );
        prop_assert!(totals.discount_amount <= totals.subtotal);
        prop_assert!(totals.subtotal >= Decimal::ZERO);
        prop_assert!(totals.discount_amount >= Decimal::ZERO);
        prop_assert!(totals.tax_amount >= Decimal::ZERO);
        prop_assert!(totals.total_amount >= Decimal::ZERO);
    }

    #[test]
    fn test_components_have_currency_scale(rows in rows(), discount in discount(), tax in tax()) {
        let totals = TotalsCalculator::default()
            .compose_totals(&line_items(&rows), &discount, &tax)
            .unwrap();

        for amount in [totals.subtotal, totals.discount_amount, totals.tax_amount, totals.total_amount] {
            prop_assert!(amount.scale() <= 2, "{} has more than 2 decimal places", amount);
        }
    }

    #[test]
    fn test_total_monotonic_in_unit_price(
        rows in prop::collection::vec((1i32..50i32, price()), 1..8),
        index in any::<prop::sample::Index>(),
        increase in price(),
        discount in discount(),
        tax in tax(),
    ) {
        let calculator = TotalsCalculator::default();
        let before = line_items(&rows);

        let mut raised = rows.clone();
        let i = index.index(raised.len());
        raised[i].1 += increase;
        let after = line_items(&raised);

        let total_before = calculator.compose_totals(&before, &discount, &tax).unwrap().total_amount;
        let total_after = calculator.compose_totals(&after, &discount, &tax).unwrap().total_amount;

        prop_assert!(
            total_after >= total_before,
            "raising a unit price lowered the total: {} -> {}",
            total_before,
            total_after
        );
    }

    #[test]
    fn test_reject_policy_never_produces_negative_taxable(
        rows in rows(),
        discount in discount(),
        tax in tax(),
    ) {
        let calculator = TotalsCalculator::new(Currency::USD, DiscountPolicy::Reject);

        match calculator.compose_totals(&line_items(&rows), &discount, &tax) {
            Ok(totals) => prop_assert!(totals.taxable_amount() >= Decimal::ZERO),
            Err(err) => prop_assert!(
                matches!(err, AppError::NegativeTaxableAmount { .. }),
                "unexpected error: {}",
                err
            ),
        }
    }
}

#[test]
fn test_zero_items_yield_zero_totals() {
    let totals = TotalsCalculator::default()
        .compose_totals(&[], &DiscountSpec::percentage(dec!(0)), &TaxSpec::new(dec!(0)))
        .unwrap();

    assert_eq!(totals, InvoiceTotals::default());
}

#[test]
fn test_percentage_discount_example() {
    let totals = TotalsCalculator::default()
        .compose_totals(
            &line_items(&[(5, dec!(500)), (1, dec!(800))]),
            &DiscountSpec::percentage(dec!(10)),
            &TaxSpec::new(dec!(15)),
        )
        .unwrap();

    assert_eq!(totals.subtotal, dec!(3300));
    assert_eq!(totals.discount_amount, dec!(330));
    assert_eq!(totals.taxable_amount(), dec!(2970));
    assert_eq!(totals.tax_amount, dec!(445.5));
    assert_eq!(totals.total_amount, dec!(3415.5));
}

#[test]
fn test_fixed_discount_example() {
    let totals = TotalsCalculator::default()
        .compose_totals(
            &line_items(&[(4, dec!(600))]),
            &DiscountSpec::fixed(dec!(200)),
            &TaxSpec::new(dec!(15)),
        )
        .unwrap();

    assert_eq!(totals.subtotal, dec!(2400));
    assert_eq!(totals.discount_amount, dec!(200));
    assert_eq!(totals.tax_amount, dec!(330));
    assert_eq!(totals.total_amount, dec!(2530));
}

#[test]
fn test_clamp_policy_caps_discount_at_subtotal() {
    let totals = TotalsCalculator::new(Currency::USD, DiscountPolicy::Clamp)
        .compose_totals(
            &line_items(&[(1, dec!(700)), (1, dec!(500))]),
            &DiscountSpec::fixed(dec!(1500)),
            &TaxSpec::new(dec!(15)),
        )
        .unwrap();

    assert_eq!(totals.subtotal, dec!(1200));
    assert_eq!(totals.discount_amount, dec!(1200));
    assert_eq!(totals.tax_amount, dec!(0));
    assert_eq!(totals.total_amount, dec!(0));
}

#[test]
fn test_reject_policy_fails_with_negative_taxable_amount() {
    let result = TotalsCalculator::new(Currency::USD, DiscountPolicy::Reject).compose_totals(
        &line_items(&[(1, dec!(700)), (1, dec!(500))]),
        &DiscountSpec::fixed(dec!(1500)),
        &TaxSpec::new(dec!(15)),
    );

    assert_eq!(
        result,
        Err(AppError::NegativeTaxableAmount {
            subtotal: dec!(1200),
            discount: dec!(1500),
        })
    );
}
