//! Land-area units and price parsing
//!
//! Plot sizes in the hills are quoted in Nali, a regional unit of roughly
//! 2160 sq ft. Prices are stored as display strings (`"₹ 45,00,000"`),
//! so numeric comparisons go through [`parse_price`].

/// Square feet in one Nali
pub const SQFT_PER_NALI: f64 = 2160.0;

/// Convert square feet to Nali
pub fn nali_from_sqft(sqft: f64) -> f64 {
    sqft / SQFT_PER_NALI
}

/// Convert Nali to square feet
pub fn sqft_from_nali(nali: f64) -> f64 {
    nali * SQFT_PER_NALI
}

/// Format a Nali amount for display: `"2.5 Nali"`, `"3 Nali"`
pub fn format_nali(nali: f64) -> String {
    let fixed = format!("{:.2}", nali);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{} Nali", trimmed)
}

/// Numeric value of a formatted price: every non-digit is dropped.
///
/// `"₹ 45,00,000"` -> `4500000`. Returns `None` when no digits remain
/// (`"Price on request"`) or the number does not fit in a `u64`.
pub fn parse_price(price: &str) -> Option<u64> {
    let digits: String = price.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Leading decimal number of an area string: `"4,320 sq ft"` -> `4320.0`
pub fn parse_area(area: &str) -> Option<f64> {
    let number: String = area
        .trim()
        .chars()
        .filter(|c| *c != ',')
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    number.parse().ok().filter(|v: &f64| v.is_finite())
}
