//! Pagination arithmetic shared by `page` and `reverse_page`.

/// Row offset for a 1-based page number.
///
/// `None` means the empty page: non-positive page numbers fetch nothing
/// rather than failing.
pub fn offset(number: i64, size: u64) -> Option<u64> {
    if number <= 0 {
        return None;
    }
    Some((number as u64 - 1) * size)
}

/// Flips the sign of an order field.
///
/// A pure toggle: `-` is prefixed when absent and stripped when present, so
/// reversing twice restores the original order.
pub fn reverse(order: &str) -> String {
    match order.strip_prefix('-') {
        Some(rest) => rest.to_string(),
        None => format!("-{order}"),
    }
}
