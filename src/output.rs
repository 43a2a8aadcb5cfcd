//! Output formatting helpers
//!
//! Renderers are pure string builders so they can be tested without a
//! terminal; commands print the returned strings. JSON mode serializes
//! the underlying value verbatim and never reshapes it.

use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;

use crate::models::ProjectStatus;

/// Print a value as pretty JSON, exactly as received
pub fn emit_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Spinner shown around a network call
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Colored status badge for a project. Unknown statuses render as the
/// raw server value, uncolored.
pub fn status_badge(status: &ProjectStatus) -> String {
    match status {
        ProjectStatus::Active => "🟢 Active".green().to_string(),
        ProjectStatus::Upcoming => "🔵 Upcoming".blue().to_string(),
        ProjectStatus::Completed => "⚫ Completed".bright_black().to_string(),
        ProjectStatus::Paused => "🟡 Paused".yellow().to_string(),
        ProjectStatus::Cancelled => "🔴 Cancelled".red().to_string(),
        ProjectStatus::Other(raw) => raw.clone(),
    }
}

/// Group a decimal string's integer digits by thousands.
/// Non-numeric input is passed through untouched.
pub fn format_number(value: &str) -> String {
    if value.parse::<f64>().is_err() {
        return value.to_string();
    }

    let (sign, rest) = match value.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", value),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Render an XRP amount, e.g. "1,250.5 XRP"
pub fn format_xrp(amount: &str) -> String {
    format!("{} XRP", format_number(amount))
}

/// Shorten a long identifier with a trailing ellipsis.
/// Counts characters, not bytes; server data is not always ASCII.
pub fn truncate_id(id: &str, max_len: usize) -> String {
    if id.chars().count() <= max_len {
        id.to_string()
    } else {
        let prefix: String = id.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", prefix)
    }
}

/// Shorten an address keeping both ends visible
pub fn truncate_middle(s: &str, max_len: usize) -> String {
    let count = s.chars().count();
    if count <= max_len {
        s.to_string()
    } else {
        let keep = max_len.saturating_sub(3) / 2;
        let head: String = s.chars().take(keep).collect();
        let tail: String = s.chars().skip(count - keep).collect();
        format!("{}...{}", head, tail)
    }
}

/// Mask a credential, keeping only the first 8 characters visible
pub fn mask_secret(secret: &str) -> String {
    let visible = secret.chars().take(8).collect::<String>();
    let hidden = secret.chars().count().saturating_sub(8);
    format!("{}{}", visible, "*".repeat(hidden))
}

/// Horizontal section rule used under headings
pub fn rule(width: usize) -> String {
    "─".repeat(width).bright_black().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_badges() {
        colored::control::set_override(false);
        assert_eq!(status_badge(&ProjectStatus::Active), "🟢 Active");
        assert_eq!(status_badge(&ProjectStatus::Cancelled), "🔴 Cancelled");
        assert_eq!(
            status_badge(&ProjectStatus::Other("draft".to_string())),
            "draft"
        );
        colored::control::unset_override();
    }

    #[test]
    fn test_format_number_groups_thousands() {
        assert_eq!(format_number("1000000"), "1,000,000");
        assert_eq!(format_number("1234567.5"), "1,234,567.5");
        assert_eq!(format_number("-4200"), "-4,200");
        assert_eq!(format_number("999"), "999");
    }

    #[test]
    fn test_format_number_passthrough_on_garbage() {
        assert_eq!(format_number("N/A"), "N/A");
        assert_eq!(format_number(""), "");
    }

    #[test]
    fn test_format_xrp() {
        assert_eq!(format_xrp("250.5"), "250.5 XRP");
        assert_eq!(format_xrp("10000"), "10,000 XRP");
    }

    #[test]
    fn test_truncation() {
        assert_eq!(truncate_id("short", 12), "short");
        assert_eq!(truncate_id("proj_0123456789abcdef", 12), "proj_0123...");
        assert_eq!(truncate_middle("rN7n7otQDd6FczFgLdSqtcsAUxDkw6fzRH", 13), "rN7n7...6fzRH");
        assert_eq!(truncate_middle("rShort", 13), "rShort");
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        // 12 characters but 36 bytes; must not split mid-character
        assert_eq!(
            truncate_id("プロジェクトプロジェクト", 25),
            "プロジェクトプロジェクト"
        );
        assert_eq!(truncate_id("プロジェクト", 5), "プロ...");
        assert_eq!(truncate_middle("rÅÅ…", 13), "rÅÅ…");
        assert_eq!(truncate_middle(&"Å".repeat(20), 13), "ÅÅÅÅÅ...ÅÅÅÅÅ");
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("xsale_live_abcd"), "xsale_li*******");
        assert_eq!(mask_secret("short"), "short");
    }
}
