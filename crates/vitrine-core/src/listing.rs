//! Shop and category listing helpers.

use percent_encoding::percent_decode_str;

pub const DEFAULT_ITEMS_PER_PAGE: u32 = 12;

/// Query for `GET /products`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    /// Zero-based page index.
    pub page: u32,
    pub items_per_page: u32,
    pub sort: Option<String>,
    /// Category slug, as it appears in the category route.
    pub category: Option<String>,
    pub filters: Vec<String>,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            page: 0,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            sort: None,
            category: None,
            filters: Vec::new(),
        }
    }
}

impl ProductQuery {
    pub fn for_category(slug: impl Into<String>) -> Self {
        Self {
            category: Some(slug.into()),
            ..Self::default()
        }
    }

    /// Replaces the active filters. The page goes back to the first one
    /// since the old index may be past the end of the new result set.
    #[must_use]
    pub fn with_filters(mut self, filters: Vec<String>) -> Self {
        self.filters = filters;
        self.page = 0;
        self
    }

    /// Query string pairs in a stable order. Filters repeat as `filters[]`.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("itemsPerPage", self.items_per_page.to_string()),
        ];
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        pairs.extend(self.filters.iter().map(|f| ("filters[]", f.clone())));
        pairs
    }
}

/// "Showing X to Y of N" bounds for a listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// One-based index of the first product shown.
    pub start: u64,
    /// One-based index of the last product shown.
    pub end: u64,
    pub total: u64,
}

impl PageWindow {
    /// A page with nothing on it (empty listing, or a page past the end)
    /// yields `0` to `0`.
    #[must_use]
    pub fn new(page: u32, per_page: u32, total: u64) -> Self {
        let page = u64::from(page);
        let per_page = u64::from(per_page);
        let start = page * per_page + 1;

        if per_page == 0 || start > total {
            return Self {
                start: 0,
                end: 0,
                total,
            };
        }

        Self {
            start,
            end: ((page + 1) * per_page).min(total),
            total,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == 0
    }
}

/// Human label for a category route slug: percent-decoded, dashes to spaces.
#[must_use]
pub fn category_display_name(slug: &str) -> String {
    percent_decode_str(slug)
        .decode_utf8_lossy()
        .replace('-', " ")
        .trim()
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_query_pairs() {
        assert_eq!(
            ProductQuery::default().query_pairs(),
            vec![("page", "0".to_owned()), ("itemsPerPage", "12".to_owned())]
        );
    }

    #[test]
    fn full_query_pairs_keep_order() {
        let query = ProductQuery {
            page: 2,
            items_per_page: 24,
            sort: Some("Newest".to_owned()),
            category: Some("robes-d-ete".to_owned()),
            filters: vec!["lin".to_owned(), "coton".to_owned()],
        };
        assert_eq!(
            query.query_pairs(),
            vec![
                ("page", "2".to_owned()),
                ("itemsPerPage", "24".to_owned()),
                ("sort", "Newest".to_owned()),
                ("category", "robes-d-ete".to_owned()),
                ("filters[]", "lin".to_owned()),
                ("filters[]", "coton".to_owned()),
            ]
        );
    }

    #[test]
    fn changing_filters_resets_page() {
        let query = ProductQuery {
            page: 4,
            ..ProductQuery::for_category("robes")
        }
        .with_filters(vec!["noir".to_owned()]);
        assert_eq!(query.page, 0);
        assert_eq!(query.category.as_deref(), Some("robes"));
    }

    #[test]
    fn page_window_bounds() {
        assert_eq!(
            PageWindow::new(0, 12, 30),
            PageWindow { start: 1, end: 12, total: 30 }
        );
        assert_eq!(
            PageWindow::new(2, 12, 30),
            PageWindow { start: 25, end: 30, total: 30 }
        );
        assert_eq!(
            PageWindow::new(0, 12, 0),
            PageWindow { start: 0, end: 0, total: 0 }
        );
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let window = PageWindow::new(5, 12, 30);
        assert_eq!(window, PageWindow { start: 0, end: 0, total: 30 });
        assert!(window.is_empty());
        assert!(!PageWindow::new(2, 12, 30).is_empty());
    }

    #[test]
    fn category_names_are_decoded() {
        assert_eq!(category_display_name("robes-d-%C3%A9t%C3%A9"), "robes d été");
        assert_eq!(category_display_name("robes-d%C3%A9t%C3%A9"), "robes dété");
        assert_eq!(category_display_name("-accessoires-"), "accessoires");
    }
}
