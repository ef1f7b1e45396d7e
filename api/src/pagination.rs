use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Serialize;
use std::convert::Infallible;

/// `?page=` query parameter.
///
/// Never rejects a request: a missing, repeated or non-numeric `page` key
/// resolves to the first value given, or to page 1.
#[derive(Debug, Default)]
pub struct PageParams {
    pub page: Option<String>,
}

impl PageParams {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            page: pairs
                .into_iter()
                .find(|(key, _)| key == "page")
                .map(|(_, value)| value),
        }
    }

    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(1)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for PageParams {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let pairs = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();
        Ok(Self::from_pairs(pairs))
    }
}

/// One page of an ordered listing.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub per_page: usize,
    pub total: usize,
    pub pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub prev_num: Option<i64>,
    pub next_num: Option<i64>,
}

impl<T> Page<T> {
    /// Cut page `page` (1-based) out of `all`. Out-of-range pages are empty.
    pub fn slice(all: Vec<T>, page: i64, per_page: usize) -> Self {
        let total = all.len();
        let pages = if per_page == 0 {
            0
        } else {
            total.div_ceil(per_page)
        };

        let start = usize::try_from(page.saturating_sub(1))
            .ok()
            .and_then(|index| index.checked_mul(per_page));
        let items = match start {
            Some(start) if start < total => all
                .into_iter()
                .skip(start)
                .take(per_page)
                .collect(),
            _ => Vec::new(),
        };

        let has_prev = page > 1;
        let has_next = page >= 1 && (page as u64) < pages as u64;

        Self {
            items,
            page,
            per_page,
            total,
            pages,
            has_prev,
            has_next,
            prev_num: has_prev.then(|| page - 1),
            next_num: has_next.then(|| page + 1),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            pages: self.pages,
            has_prev: self.has_prev,
            has_next: self.has_next,
            prev_num: self.prev_num,
            next_num: self.next_num,
        }
    }

    /// Page numbers worth linking to, with `None` marking a gap.
    ///
    /// Keeps the first `left_edge` pages, the last `right_edge` pages, and
    /// the pages from `page - left_current` up to `page + right_current - 1`.
    pub fn iter_pages(
        &self,
        left_edge: usize,
        left_current: usize,
        right_current: usize,
        right_edge: usize,
    ) -> Vec<Option<usize>> {
        let mut links = Vec::new();
        let mut last = 0;

        for num in 1..=self.pages {
            let current = num as i64;
            let near_current = current >= self.page.saturating_sub(left_current as i64)
                && current < self.page.saturating_add(right_current as i64);

            if num <= left_edge || near_current || num + right_edge > self.pages {
                if last + 1 != num {
                    links.push(None);
                }
                links.push(Some(num));
                last = num;
            }
        }

        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(count: usize) -> Vec<usize> {
        (1..=count).collect()
    }

    #[test]
    fn test_page_param_defaults() {
        let params = |raw: Option<&str>| PageParams {
            page: raw.map(str::to_string),
        };

        assert_eq!(params(None).page(), 1);
        assert_eq!(params(Some("abc")).page(), 1);
        assert_eq!(params(Some("")).page(), 1);
        assert_eq!(params(Some("3")).page(), 3);
        assert_eq!(params(Some("-2")).page(), -2);
    }

    #[test]
    fn test_page_param_takes_first_value() {
        let pairs = |raw: &[(&str, &str)]| {
            raw.iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect::<Vec<_>>()
        };

        let repeated = PageParams::from_pairs(pairs(&[("page", "2"), ("page", "5")]));
        let other_keys = PageParams::from_pairs(pairs(&[("sort", "new"), ("page", "3")]));
        let absent = PageParams::from_pairs(pairs(&[("sort", "new")]));

        assert_eq!(repeated.page(), 2);
        assert_eq!(other_keys.page(), 3);
        assert_eq!(absent.page(), 1);
    }

    #[test]
    fn test_slice_middle_page() {
        let page = Page::slice(numbers(12), 2, 5);

        assert_eq!(page.items, vec![6, 7, 8, 9, 10]);
        assert_eq!(page.total, 12);
        assert_eq!(page.pages, 3);
        assert!(page.has_prev);
        assert!(page.has_next);
        assert_eq!(page.prev_num, Some(1));
        assert_eq!(page.next_num, Some(3));
    }

    #[test]
    fn test_slice_last_partial_page() {
        let page = Page::slice(numbers(12), 3, 5);

        assert_eq!(page.items, vec![11, 12]);
        assert!(!page.has_next);
        assert_eq!(page.next_num, None);
    }

    #[test]
    fn test_out_of_range_pages_are_empty() {
        for n in [i64::MIN, -1, 0, 4, 100, i64::MAX] {
            let page = Page::slice(numbers(12), n, 5);
            assert!(page.items.is_empty(), "page {n} should be empty");
            assert_eq!(page.total, 12);
        }
    }

    #[test]
    fn test_empty_listing() {
        let page = Page::slice(Vec::<usize>::new(), 1, 5);

        assert!(page.items.is_empty());
        assert_eq!(page.pages, 0);
        assert!(!page.has_prev);
        assert!(!page.has_next);
        assert!(page.iter_pages(1, 1, 2, 1).is_empty());
    }

    #[test]
    fn test_iter_pages_window() {
        let page = Page::slice(numbers(50), 5, 5);

        assert_eq!(
            page.iter_pages(1, 1, 2, 1),
            vec![
                Some(1),
                None,
                Some(4),
                Some(5),
                Some(6),
                None,
                Some(10)
            ]
        );
    }

    #[test]
    fn test_iter_pages_without_gaps() {
        let page = Page::slice(numbers(12), 1, 5);

        assert_eq!(page.iter_pages(1, 1, 2, 1), vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = Page::slice(numbers(7), 2, 5).map(|n| n * 10);

        assert_eq!(page.items, vec![60, 70]);
        assert_eq!(page.page, 2);
        assert_eq!(page.pages, 2);
    }
}
