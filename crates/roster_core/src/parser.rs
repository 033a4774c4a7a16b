//! Pasted roster text parser
//!
//! Group chats circulate attendance lists like:
//!
//! ```text
//! Vôlei sábado 18h
//! 1- Maria ✅
//! 2- Pedro
//! 3- Ana 💰
//! ```
//!
//! Only lines carrying a confirmation mark (✅) or a payment mark (💰) count.

/// Confirmation check mark.
pub const CONFIRMED_MARK: char = '\u{2705}';
/// Payment indicator.
pub const PAID_MARK: char = '\u{1F4B0}';

const VARIATION_SELECTOR: char = '\u{FE0F}';

fn is_marker(c: char) -> bool {
    c == CONFIRMED_MARK || c == PAID_MARK
}

fn is_enumeration_prefix(c: char) -> bool {
    c.is_ascii_digit() || c.is_whitespace() || matches!(c, '.' | '-' | ':' | '(' | ')')
}

/// Extracts confirmed names in line order. Never fails; duplicates are kept.
pub fn parse_roster_text(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| line.chars().any(is_marker))
        .filter_map(extract_name)
        .collect()
}

fn extract_name(line: &str) -> Option<String> {
    let body = line.trim_start_matches(is_enumeration_prefix);

    let mut name = String::with_capacity(body.len());
    let mut after_marker = false;
    for c in body.chars() {
        if is_marker(c) {
            after_marker = true;
            continue;
        }
        // ✅️ is often sent as mark + U+FE0F
        if after_marker && c == VARIATION_SELECTOR {
            continue;
        }
        after_marker = false;
        name.push(c);
    }

    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
