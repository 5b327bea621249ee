//! Display formatting for money and multipliers
//!
//! Pure functions, no state.

/// Format a money amount for the HUD and ticker.
///
/// Billions and millions collapse to two decimals with a `B`/`M` suffix,
/// smaller amounts get thousands separators.
pub fn format_money(amount: f64) -> String {
    if amount >= 1e9 {
        format!("${:.2}B", amount / 1e9)
    } else if amount >= 1e6 {
        format!("${:.2}M", amount / 1e6)
    } else {
        format!("${}", group_thousands(amount))
    }
}

/// Multiplier shown as an integer when whole, otherwise with two decimals
pub fn format_multiplier(multiplier: f64) -> String {
    if multiplier.fract() == 0.0 && multiplier.is_finite() {
        format!("{}", multiplier as i64)
    } else {
        format!("{:.2}", multiplier)
    }
}

/// Digits grouped by commas, up to three fraction digits with trailing zeros trimmed
fn group_thousands(amount: f64) -> String {
    let negative = amount < 0.0;
    let rounded = format!("{:.3}", amount.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let mut out = String::new();
    if negative && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}
