//! # Sale Id Sequencing
//!
//! Sale ids look like `SALE001`, `SALE042`, `SALE1234`: the `SALE` prefix
//! followed by a decimal number, zero-padded to at least three digits.
//!
//! ```text
//!   existing ids: SALE001, SALE003, SALE2, S-17, SALEx9
//!                    │        │       │      └──────┴── skipped (no match)
//!                    1        3       2
//!                             └── max = 3 ──► next = SALE004
//! ```
//!
//! These helpers are pure. The read-then-format preview and the
//! transactional allocator in dealer-db both build on them.

/// Prefix shared by every generated sale id.
pub const SALE_ID_PREFIX: &str = "SALE";

/// Extracts the numeric suffix of a sale id.
///
/// Returns `None` unless the whole id is `SALE` followed by one or more ASCII
/// digits that fit in a `u32`.
///
/// ```rust
/// use dealer_core::sequence::parse_sale_number;
///
/// assert_eq!(parse_sale_number("SALE007"), Some(7));
/// assert_eq!(parse_sale_number("SALE2"), Some(2));
/// assert_eq!(parse_sale_number("SALE"), None);
/// assert_eq!(parse_sale_number("sale001"), None);
/// assert_eq!(parse_sale_number("SALE12a"), None);
/// ```
pub fn parse_sale_number(id: &str) -> Option<u32> {
    let digits = id.strip_prefix(SALE_ID_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Formats a sale number as an id, zero-padded to three digits.
///
/// ```rust
/// use dealer_core::sequence::format_sale_id;
///
/// assert_eq!(format_sale_id(8), "SALE008");
/// assert_eq!(format_sale_id(1234), "SALE1234");
/// ```
pub fn format_sale_id(number: u32) -> String {
    format!("{}{:03}", SALE_ID_PREFIX, number)
}

/// Highest numeric suffix among `ids`, or 0 when none match.
pub fn max_sale_number<'a, I>(ids: I) -> u32
where
    I: IntoIterator<Item = &'a str>,
{
    ids.into_iter()
        .filter_map(parse_sale_number)
        .max()
        .unwrap_or(0)
}

/// Number that follows `current`, or `None` once `u32::MAX` is taken.
pub fn following(current: u32) -> Option<u32> {
    current.checked_add(1)
}

/// Next sale id after scanning `ids`, or `None` when the highest suffix is
/// already `u32::MAX`.
///
/// ```rust
/// use dealer_core::sequence::next_sale_id;
///
/// assert_eq!(next_sale_id(Vec::<&str>::new()).as_deref(), Some("SALE001"));
/// assert_eq!(next_sale_id(["SALE001", "SALE003", "SALE2"]).as_deref(), Some("SALE004"));
/// ```
pub fn next_sale_id<'a, I>(ids: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    following(max_sale_number(ids)).map(format_sale_id)
}
