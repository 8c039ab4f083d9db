//! Display formatting for APY and TVL figures

/// Format a USD amount with thousands separators and cents, e.g.
/// `$842,000,000.00`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u128;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, fraction)
}

/// Format a percentage with two decimals, e.g. `3.25%`.
pub fn format_percent(percent: f64) -> String {
    format!("{:.2}%", percent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(842_000_000.0), "$842,000,000.00");
        assert_eq!(format_currency(1_250_000_000.0), "$1,250,000,000.00");
        assert_eq!(format_currency(999.5), "$999.50");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(-1234.567), "-$1,234.57");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(3.25), "3.25%");
        assert_eq!(format_percent(11.0), "11.00%");
    }
}
