//! Loan arithmetic and the number formats printed on the documents.
//!
//! All money math runs on `rust_decimal::Decimal` so that rounding matches
//! what a reader would compute by hand (half-up, never banker's rounding).

use rust_decimal::prelude::*;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use thiserror::Error;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FinanceError {
    #[error("loan duration must be at least one month")]
    ZeroDuration,
    #[error("installment computation overflowed for amount {amount} over {months} months")]
    Overflow { amount: Decimal, months: u32 },
}

/// Round to cents, half away from zero.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Fixed monthly installment of an amortizing (annuity) loan.
///
/// `annual_rate_percent` is the nominal annual rate (TAN) in percent. A zero
/// rate degenerates to a straight division of the principal.
pub fn monthly_payment(
    amount: Decimal,
    months: u32,
    annual_rate_percent: Decimal,
) -> Result<Decimal, FinanceError> {
    if months == 0 {
        return Err(FinanceError::ZeroDuration);
    }
    let overflow = || FinanceError::Overflow { amount, months };
    let periods = Decimal::from(months);

    let r = annual_rate_percent / PERCENT / MONTHS_PER_YEAR;
    if r.is_zero() {
        return Ok(round_cents(amount / periods));
    }

    let growth = (Decimal::ONE + r)
        .checked_powu(u64::from(months))
        .ok_or_else(overflow)?;
    let numerator = amount
        .checked_mul(r)
        .and_then(|v| v.checked_mul(growth))
        .ok_or_else(overflow)?;
    let denominator = growth - Decimal::ONE;
    let payment = numerator.checked_div(denominator).ok_or_else(overflow)?;

    Ok(round_cents(payment))
}

/// `"€ 1234.50"`: euro sign, a space, exactly two decimals, half-up.
pub fn format_currency(value: Decimal) -> String {
    format!("€ {:.2}", round_cents(value))
}

/// Italian-style number: comma separator, at most two decimals, trailing
/// zeros and a dangling separator trimmed (`7.50` → `"7,5"`, `7.00` → `"7"`).
pub fn format_percent_localized(value: Decimal) -> String {
    let fixed = format!("{:.2}", round_cents(value)).replace('.', ",");
    fixed
        .trim_end_matches('0')
        .trim_end_matches(',')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_payment_annuity() {
        let payment = monthly_payment(dec!(10000), 24, dec!(7.86)).unwrap();
        assert_eq!(payment, dec!(451.63));

        let payment = monthly_payment(dec!(5000), 36, dec!(7.86)).unwrap();
        assert_eq!(payment, dec!(156.36));
    }

    #[test]
    fn test_monthly_payment_long_mortgage() {
        let payment = monthly_payment(dec!(200000), 360, dec!(3.5)).unwrap();
        assert_eq!(payment, dec!(898.09));
    }

    #[test]
    fn test_monthly_payment_zero_rate_is_straight_division() {
        assert_eq!(monthly_payment(dec!(1000), 3, Decimal::ZERO).unwrap(), dec!(333.33));
        assert_eq!(monthly_payment(dec!(1000), 6, dec!(0.00)).unwrap(), dec!(166.67));
    }

    #[test]
    fn test_monthly_payment_rejects_zero_months() {
        assert_eq!(
            monthly_payment(dec!(1000), 0, dec!(5)),
            Err(FinanceError::ZeroDuration)
        );
    }

    #[test]
    fn test_monthly_payment_overflow_is_reported() {
        let result = monthly_payment(Decimal::MAX, 600, dec!(99));
        assert!(matches!(result, Err(FinanceError::Overflow { .. })));
    }

    #[test]
    fn test_format_currency_rounds_half_up() {
        assert_eq!(format_currency(dec!(1234.005)), "€ 1234.01");
        assert_eq!(format_currency(dec!(1234.994)), "€ 1234.99");
        assert_eq!(format_currency(dec!(0.125)), "€ 0.13");
        assert_eq!(format_currency(dec!(150)), "€ 150.00");
    }

    #[test]
    fn test_format_percent_localized() {
        assert_eq!(format_percent_localized(dec!(7.50)), "7,5");
        assert_eq!(format_percent_localized(dec!(7.00)), "7");
        assert_eq!(format_percent_localized(dec!(7.86)), "7,86");
        assert_eq!(format_percent_localized(dec!(10)), "10");
        assert_eq!(format_percent_localized(dec!(0.05)), "0,05");
    }
}
