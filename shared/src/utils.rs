//! # Shared Utility Functions
//!
//! Display helpers used by the dashboard and its CLI driver.
//!
//! ## Identifier Formatting
//!
//! Transaction and refill ids from the gateway are long opaque strings:
//! - [`format_id`] - Keep the first N and last M characters with an ellipsis
//! - [`truncate_id`] - `format_id` with 4/4
//!
//! ## Amounts
//!
//! - [`format_rupees`] - `₹1,234.50` style formatting for wallet balances and charges
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::{format_id, format_rupees};
//!
//! assert_eq!(format_id("TXN8W6QginkhTTxoP2deQjq7", 4, 4), "TXN8...Qjq7");
//! assert_eq!(format_rupees(1234.5), "₹1,234.50");
//! ```

/// Shorten an identifier to its first `prefix_len` and last `suffix_len` characters.
///
/// Ids no longer than `prefix_len + suffix_len` characters are returned as-is.
pub fn format_id(id: &str, prefix_len: usize, suffix_len: usize) -> String {
    let chars: Vec<char> = id.chars().collect();
    let len = chars.len();

    if len <= prefix_len + suffix_len {
        return id.to_string();
    }

    let prefix: String = chars[..prefix_len].iter().collect();
    let suffix: String = chars[len - suffix_len..].iter().collect();

    format!("{}...{}", prefix, suffix)
}

/// [`format_id`] with a 4-character prefix and suffix.
pub fn truncate_id(id: &str) -> String {
    format_id(id, 4, 4)
}

/// Format an amount as Indian rupees with two decimals and thousands separators.
pub fn format_rupees(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}₹{}.{:02}", if negative { "-" } else { "" }, grouped, fraction)
}
