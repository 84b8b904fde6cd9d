//! Lenient parsing of user-typed numbers.
//!
//! Anything that does not parse yields `None`, which callers treat as
//! "no action" rather than an error.

/// Non-negative whole number (hours, minutes), surrounding whitespace allowed.
pub fn parse_number(input: &str) -> Option<u32> {
    input.trim().parse::<u32>().ok()
}

/// Like [`parse_number`] but zero is rejected too.
pub fn parse_positive(input: &str) -> Option<u32> {
    parse_number(input).filter(|m| *m > 0)
}

/// `"H:MM"` / `"HH:MM"` into `(hour, minute)`. Ranges are not checked here.
pub fn parse_clock(input: &str) -> Option<(u32, u32)> {
    let (hour, minute) = input.trim().split_once(':')?;
    Some((parse_number(hour)?, parse_number(minute)?))
}
