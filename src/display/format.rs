//! Formatting helpers shared by the terminal renderers

use crate::models::Money;

/// Money with the configured currency symbol
pub fn money(amount: Money, symbol: &str) -> String {
    amount.format_with_symbol(symbol)
}

/// Signed difference, `+` for savings and `-` for added cost
pub fn signed_money(amount: Money, symbol: &str) -> String {
    if amount.is_positive() {
        format!("+{}", amount.format_with_symbol(symbol))
    } else {
        amount.format_with_symbol(symbol)
    }
}

/// Percentages are already rounded to one decimal
pub fn format_percentage(pct: f64) -> String {
    format!("{:.1}%", pct)
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Satisfaction as stars, or a dash when unscored
pub fn format_satisfaction(score: Option<u8>) -> String {
    match score {
        Some(s) => format!("{}{}", "★".repeat(s as usize), "☆".repeat(5usize.saturating_sub(s as usize))),
        None => "-".to_string(),
    }
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate to `max_chars` characters, ending with an ellipsis when cut
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 3 {
        "...".chars().take(max_chars).collect()
    } else {
        let kept: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", kept)
    }
}
