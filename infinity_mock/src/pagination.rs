//! Pages over a virtual collection that is known only by its size.

use infinity_api::types::PaginationMetadata;
use serde::Deserialize;

/// One page of generated items.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMetadata,
}

/// Builds the page `[offset, offset + limit)` of a collection of `total`
/// items, calling `factory` once per item, in order.
///
/// Out-of-range windows produce empty pages rather than errors.
pub fn paginate<T>(
    total: u64,
    offset: u64,
    limit: u64,
    mut factory: impl FnMut() -> T,
) -> Page<T> {
    let count = limit.min(total.saturating_sub(offset));
    let mut items = Vec::with_capacity(count.min(1024) as usize);
    for _ in 0..count {
        items.push(factory());
    }
    Page {
        items,
        pagination: PaginationMetadata {
            offset,
            limit,
            total,
            has_more: offset.saturating_add(count) < total,
        },
    }
}

/// Raw `offset`/`limit` query parameters, kept as text so that a bad value
/// falls back to its default instead of failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub offset: Option<String>,
    pub limit: Option<String>,
}

impl PageParams {
    /// Resolves to `(offset, limit)`.
    ///
    /// Missing or unparseable values take their defaults and negative values
    /// clamp to zero.
    pub fn resolve(&self, default_limit: u64) -> (u64, u64) {
        (
            lenient_u64(self.offset.as_deref(), 0),
            lenient_u64(self.limit.as_deref(), default_limit),
        )
    }
}

fn lenient_u64(raw: Option<&str>, default: u64) -> u64 {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return default;
    };
    if let Ok(n) = raw.parse::<u64>() {
        return n;
    }
    if raw.parse::<i64>().is_ok() {
        // Any integer that is not a u64 here is negative.
        return 0;
    }
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => n.max(0.0).floor() as u64,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> impl FnMut() -> u64 {
        let mut n = 0;
        move || {
            n += 1;
            n
        }
    }

    #[test]
    fn middle_page() {
        let page = paginate(25, 0, 10, counter());
        assert_eq!(page.items, (1..=10).collect::<Vec<_>>());
        assert!(page.pagination.has_more);
        assert_eq!(page.pagination.total, 25);
    }

    #[test]
    fn last_partial_page() {
        let page = paginate(25, 20, 10, counter());
        assert_eq!(page.items.len(), 5);
        assert!(!page.pagination.has_more);
        assert_eq!(page.pagination.offset, 20);
        assert_eq!(page.pagination.limit, 10);
    }

    #[test]
    fn exact_last_page() {
        let page = paginate(20, 10, 10, counter());
        assert_eq!(page.items.len(), 10);
        assert!(!page.pagination.has_more);
    }

    #[test]
    fn past_the_end_is_empty() {
        let page = paginate(25, 30, 10, counter());
        assert!(page.items.is_empty());
        assert!(!page.pagination.has_more);
    }

    #[test]
    fn empty_collection() {
        let page = paginate(0, 0, 10, counter());
        assert!(page.items.is_empty());
        assert!(!page.pagination.has_more);
    }

    #[test]
    fn zero_limit() {
        let mut calls = 0;
        let page = paginate(25, 5, 0, || calls += 1);
        assert!(page.items.is_empty());
        assert_eq!(calls, 0);
        assert!(page.pagination.has_more);
    }

    #[test]
    fn huge_window_does_not_overflow() {
        let page = paginate(3, u64::MAX, u64::MAX, counter());
        assert!(page.items.is_empty());
        assert!(!page.pagination.has_more);
        let page = paginate(3, 1, u64::MAX, counter());
        assert_eq!(page.items.len(), 2);
    }

    #[test]
    fn factory_called_once_per_item() {
        for (total, offset, limit) in [(0, 0, 10), (7, 0, 3), (7, 6, 3), (7, 7, 3), (100, 95, 10)] {
            let mut calls = 0u64;
            let page = paginate(total, offset, limit, || calls += 1);
            let expected = limit.min(total.saturating_sub(offset));
            assert_eq!(calls, expected);
            assert_eq!(page.items.len() as u64, expected);
            assert_eq!(page.pagination.has_more, offset + expected < total);
        }
    }

    fn params(offset: Option<&str>, limit: Option<&str>) -> PageParams {
        PageParams {
            offset: offset.map(String::from),
            limit: limit.map(String::from),
        }
    }

    #[test]
    fn params_default_when_missing() {
        assert_eq!(params(None, None).resolve(10), (0, 10));
        assert_eq!(params(Some(""), Some(" ")).resolve(10), (0, 10));
    }

    #[test]
    fn params_parse_numbers() {
        assert_eq!(params(Some("20"), Some("5")).resolve(10), (20, 5));
        assert_eq!(params(Some(" 3 "), Some("2.9")).resolve(10), (3, 2));
    }

    #[test]
    fn params_clamp_negatives() {
        assert_eq!(params(Some("-5"), Some("-1")).resolve(10), (0, 0));
        assert_eq!(params(Some("-2.5"), None).resolve(10), (0, 10));
    }

    #[test]
    fn params_ignore_garbage() {
        assert_eq!(params(Some("abc"), Some("ten")).resolve(10), (0, 10));
        assert_eq!(params(Some("NaN"), Some("inf")).resolve(10), (0, 10));
    }
}
