//! Small terminal output helpers

use colored::*;

/// Render a price given in minor units of the configured currency
pub fn format_price(cents: i64, currency: &str) -> String {
    let symbol = match currency {
        "eur" => "€",
        "gbp" => "£",
        _ => "$",
    };
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    format!("{}{}{}.{:02}", sign, symbol, cents / 100, cents % 100)
}

/// Section header in the style used across commands
pub fn header(text: &str) {
    println!();
    println!("  {}", text.bright_blue().bold());
    println!("  {}", "═".repeat(text.chars().count()).bright_blue());
}
