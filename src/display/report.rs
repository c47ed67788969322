//! Report formatting utilities for terminal output

use crate::models::Money;

/// Format a money amount with color hints for terminal display
pub fn format_money_colored(amount: Money, symbol: &str) -> String {
    let text = amount.format_with_symbol(symbol);
    if amount.is_negative() {
        format!("\x1b[31m{}\x1b[0m", text)
    } else if amount.is_positive() {
        format!("\x1b[32m{}\x1b[0m", text)
    } else {
        text
    }
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct > 0.0 && pct < 0.1 {
        format!("{:.2}%", pct)
    } else if pct.abs() < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Format a 0-1 ratio as a percentage, or "n/a" when undefined
pub fn format_ratio(ratio: Option<f64>) -> String {
    ratio.map_or_else(|| "n/a".to_string(), |r| format_percentage(r * 100.0))
}

/// Horizontal bar, `value / max_value` filled, capped at full width
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate to `max_len` characters with an ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.5), "5.5%");
        assert_eq!(format_percentage(42.0), "42%");
    }

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(Some(0.25)), "25%");
        assert_eq!(format_ratio(None), "n/a");
    }

    #[test]
    fn test_format_bar() {
        let half = format_bar(50.0, 100.0, 10);
        assert_eq!(half.chars().filter(|c| *c == '█').count(), 5);

        let over = format_bar(150.0, 100.0, 10);
        assert_eq!(over.chars().filter(|c| *c == '█').count(), 10);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Groceries and more", 10), "Groceri...");
        assert_eq!(truncate("Café", 4), "Café");
        assert_eq!(truncate("Rent", 2), "..");
    }

    #[test]
    fn test_colored_money() {
        let text = format_money_colored(Money::from_dollars(-5), "€");
        assert!(text.contains("-€5.00"));
        assert!(text.starts_with("\x1b[31m"));
    }
}
