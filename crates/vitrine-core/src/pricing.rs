//! Effective price computation.
//!
//! Only the product-level promotion is applied. A size's own `price` field is
//! carried into the cart line but never folded into the charged price.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Original, discounted and saved amounts for one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    pub original: Decimal,
    pub discounted: Decimal,
    pub savings: Decimal,
}

impl PriceBreakdown {
    /// Whether the struck-through original price should be displayed.
    #[must_use]
    pub fn has_promotion(&self) -> bool {
        self.savings > Decimal::ZERO
    }
}

/// Applies `promotion_percent` to `base_price`.
///
/// `discounted = round2(base - base * pct / 100)` and
/// `savings = round2(base - discounted)`, rounding half away from zero.
/// A zero promotion returns the base price untouched. Percentages outside
/// `0..=100` are clamped.
#[must_use]
pub fn resolve_price(base_price: Decimal, promotion_percent: Decimal) -> PriceBreakdown {
    let pct = promotion_percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);

    if pct.is_zero() {
        return PriceBreakdown {
            original: base_price,
            discounted: base_price,
            savings: Decimal::ZERO,
        };
    }

    let discounted = round2(base_price - base_price * pct / Decimal::ONE_HUNDRED);
    let savings = round2(base_price - discounted);

    PriceBreakdown {
        original: base_price,
        discounted,
        savings,
    }
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount the way the storefront displays dinars:
/// three fraction digits, comma decimal separator, narrow no-break space
/// grouping, `DT` suffix. `1250` renders as `"1 250,000 DT"`.
#[must_use]
pub fn format_tnd(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero);
    let digits = format!("{:.3}", rounded.abs());
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "000"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 * 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('\u{202f}');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped},{frac_part}\u{a0}DT")
}
