//! Lenient parsing of user-typed id lists.

use crate::model::RecordId;

/// Parses a comma-separated list of record ids.
///
/// Each token is trimmed and read as an optional sign followed by leading
/// decimal digits, with anything after the digits ignored. Only base 10 is
/// recognised: `0x1F` reads as `0` and `1e5` as `1`. Tokens that yield no
/// integer are dropped without error. Order and duplicates are preserved.
///
/// # Example
///
/// ```
/// use artgrid_lib::model::RecordId;
/// use artgrid_lib::selection::parse_id_list;
///
/// let ids = parse_id_list("3, 7, x, 9abc, -2");
/// assert_eq!(ids, vec![RecordId(3), RecordId(7), RecordId(9), RecordId(-2)]);
/// ```
pub fn parse_id_list(raw: &str) -> Vec<RecordId> {
    raw.split(',').filter_map(parse_leading_int).map(RecordId).collect()
}

/// Reads an optionally signed run of leading digits from a trimmed token.
fn parse_leading_int(token: &str) -> Option<i64> {
    let token = token.trim();
    let (negative, rest) = match token.as_bytes().first()? {
        b'-' => (true, &token[1..]),
        b'+' => (false, &token[1..]),
        _ => (false, token),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        log::debug!("Ignoring non-numeric id token {:?}", token);
        return None;
    }

    // Overflowing runs are dropped rather than wrapped.
    let value: i64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}
