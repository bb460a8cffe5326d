//! Derived monetary values.
//!
//! Everything here is a pure function of its inputs. Sums keep full `f64`
//! precision; rounding to two fractional digits happens only in
//! [`format_amount`].

use serde::Serialize;

use crate::models::ProductLine;

/// Sum of `unit_price * quantity` over `lines`.
pub fn compute_total(lines: &[ProductLine]) -> f64 {
    lines.iter().map(ProductLine::subtotal).sum()
}

/// How a total is covered by meal vouchers of a fixed value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoucherBreakdown {
    /// Vouchers fully consumed by the total
    pub used: u32,
    /// Additional spend needed to consume one more voucher
    pub remaining_for_next: f64,
}

impl VoucherBreakdown {
    /// Breakdown reported when voucher tracking is off
    pub fn disabled() -> Self {
        Self {
            used: 0,
            remaining_for_next: 0.0,
        }
    }
}

/// Split `total` into consumed vouchers and the amount missing for the next one.
///
/// A non-positive `voucher_value` disables the feature. When `total` is an
/// exact multiple of `voucher_value`, the full value is reported as missing.
pub fn compute_voucher_breakdown(total: f64, voucher_value: f64) -> VoucherBreakdown {
    if voucher_value.is_nan() || voucher_value <= 0.0 {
        return VoucherBreakdown::disabled();
    }

    let used = (total / voucher_value).floor();
    VoucherBreakdown {
        used: used as u32,
        remaining_for_next: voucher_value - total % voucher_value,
    }
}

/// Whether a voucher breakdown is worth showing at all.
pub fn voucher_visible(total: f64, voucher_value: f64) -> bool {
    voucher_value > 0.0 && total > 0.0
}

/// Fixed two-decimal euro formatting.
pub fn format_amount(amount: f64) -> String {
    format!("€{:.2}", amount)
}

/// Parse the leading decimal number of `text`, accepting `,` as the
/// fractional separator.
///
/// Text after the number is ignored, so `"2.50€"` reads as 2.5 and
/// `"3 kg"` as 3. Returns `None` when `text` does not start with a number.
pub fn parse_amount(text: &str) -> Option<f64> {
    let normalized = text.trim_start().replacen(',', ".", 1);
    leading_number(&normalized)
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Longest prefix of `text` shaped like `[+-]digits[.digits][e[+-]digits]`,
/// or `""` if there is none.
fn leading_number(text: &str) -> &str {
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = digits_from(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    &text[..end]
}
