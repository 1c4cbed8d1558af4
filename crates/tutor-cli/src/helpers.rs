//! Shared CLI helpers — answer printing, status marks, thinking placeholder.

use colored::Colorize;

/// Print a tutor answer to stdout.
pub fn print_answer(provider: &str, answer: &str) {
    println!();
    println!("{}", format!("Tutor ({provider})").cyan().bold());
    if answer.is_empty() {
        println!("{}", "(no answer)".dimmed());
    } else {
        println!("{answer}");
    }
    println!();
}

/// Status mark for a key: green check when set, dimmed note otherwise.
pub fn key_status(configured: bool) -> String {
    if configured {
        format!("{} (key set)", "✓".green())
    } else {
        format!("{}", "· not configured".dimmed())
    }
}

/// Mask an API key for display, keeping the first and last four characters.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}

/// Print a "thinking" placeholder while the provider works.
pub fn print_thinking() {
    eprint!("{}", "⠿ thinking...".dimmed());
}

/// Clear the "thinking" placeholder.
pub fn clear_thinking() {
    eprint!("\r{}\r", " ".repeat(40));
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
