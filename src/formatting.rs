//! Text formatting utilities for the dashboard.
//!
//! This module provides helper functions for formatting values in a human-readable way.

use sysinfo::{Pid, ProcessRefreshKind, RefreshKind, System};

use crate::i18n::Language;

/// Groups the digits of an unsigned integer string with `separator`.
fn group_digits(digits: &str, separator: char) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut result = String::with_capacity(chars.len() + chars.len() / 3);
    for (i, ch) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(separator);
        }
        result.push(*ch);
    }
    result
}

/// Formats a USD amount with two decimals in the conventions of `language`.
///
/// Spanish places the currency after the number and, as in `es-ES`, only
/// groups thousands from five integer digits upward.
///
/// # Examples
/// ```
/// use cryptodash::formatting::format_currency;
/// use cryptodash::i18n::Language;
///
/// assert_eq!(format_currency(1234.5, Language::En), "$1,234.50");
/// assert_eq!(format_currency(43210.0, Language::Es), "43.210,00 US$");
/// ```
pub fn format_currency(value: f64, language: Language) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };

    match language {
        Language::En => format!("{sign}${}.{frac_part}", group_digits(int_part, ',')),
        Language::Es => {
            let grouped = if int_part.len() >= 5 {
                group_digits(int_part, '.')
            } else {
                int_part.to_string()
            };
            format!("{sign}{grouped},{frac_part} US$")
        }
    }
}

/// Formats a percentage with two decimals and an explicit `+` for gains.
///
/// # Examples
/// ```
/// use cryptodash::formatting::format_percentage;
///
/// assert_eq!(format_percentage(3.14159), "+3.14%");
/// assert_eq!(format_percentage(-0.5), "-0.50%");
/// assert_eq!(format_percentage(0.0), "0.00%");
/// ```
pub fn format_percentage(value: f64) -> String {
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{sign}{value:.2}%")
}

/// Escapes text for safe inclusion in markup
pub fn escape_html(text: &str) -> String {
    v_htmlescape::escape(text).to_string()
}

/// Gets the current process memory usage in megabytes.
///
/// Returns 0.0 if the process information cannot be retrieved.
pub fn get_current_memory_mb() -> f64 {
    let mut sys = System::new_with_specifics(
        RefreshKind::new().with_processes(ProcessRefreshKind::new().with_memory())
    );
    sys.refresh_processes_specifics(ProcessRefreshKind::new().with_memory());

    if let Some(process) = sys.process(Pid::from_u32(std::process::id())) {
        process.memory() as f64 / (1024.0 * 1024.0)
    } else {
        0.0
    }
}

/// Formats memory usage in MB as a human-readable string.
///
/// # Examples
/// ```
/// use cryptodash::formatting::format_memory_mb;
///
/// assert_eq!(format_memory_mb(512.5), "512.5 MB");
/// assert_eq!(format_memory_mb(2048.0), "2.00 GB");
/// ```
pub fn format_memory_mb(memory_mb: f64) -> String {
    if memory_mb > 1024.0 {
        format!("{:.2} GB", memory_mb / 1024.0)
    } else {
        format!("{:.1} MB", memory_mb)
    }
}
