//! Page window clamping and sort key parsing for list endpoints.

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Recognized orderings for project lists. Unknown input falls back to the
/// default rather than erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    CreatedAtDesc,
    CreatedAtAsc,
    TitleAsc,
    TitleDesc,
}

impl SortKey {
    /// Parse a client-supplied sort token. A leading `-` means descending;
    /// both snake_case and the camelCase spelling clients send are accepted.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("created_at") | Some("createdAt") => Self::CreatedAtAsc,
            Some("-created_at") | Some("-createdAt") => Self::CreatedAtDesc,
            Some("title") => Self::TitleAsc,
            Some("-title") => Self::TitleDesc,
            _ => Self::CreatedAtDesc,
        }
    }

    /// Column the ordering sorts on.
    pub fn column(self) -> &'static str {
        match self {
            Self::CreatedAtDesc | Self::CreatedAtAsc => "created_at",
            Self::TitleAsc | Self::TitleDesc => "title",
        }
    }

    pub fn descending(self) -> bool {
        matches!(self, Self::CreatedAtDesc | Self::TitleDesc)
    }
}

/// A clamped page window. Construction never fails; out-of-range input is
/// pulled back into range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: i64,
    pub size: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self::clamped(None, None)
    }
}

impl Page {
    /// Clamp raw query input: page floors at 1, size is pulled into
    /// `1..=MAX_PAGE_SIZE` and defaults to [`DEFAULT_PAGE_SIZE`].
    pub fn clamped(page: Option<i64>, size: Option<i64>) -> Self {
        let number = page.unwrap_or(1).max(1);
        let size = size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        Self { number, size }
    }

    pub fn offset(self) -> i64 {
        (self.number - 1) * self.size
    }

    /// Total pages needed for `total` rows at this page size.
    pub fn page_count(self, total: i64) -> i64 {
        if total <= 0 {
            0
        } else {
            (total + self.size - 1) / self.size
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unspecified() {
        let page = Page::clamped(None, None);
        assert_eq!(page, Page { number: 1, size: DEFAULT_PAGE_SIZE });
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn clamps_out_of_range_input() {
        assert_eq!(Page::clamped(Some(0), Some(0)), Page { number: 1, size: 1 });
        assert_eq!(Page::clamped(Some(-5), Some(-5)), Page { number: 1, size: 1 });
        assert_eq!(
            Page::clamped(Some(3), Some(1000)),
            Page { number: 3, size: MAX_PAGE_SIZE }
        );
    }

    #[test]
    fn offset_steps_by_page_size() {
        assert_eq!(Page::clamped(Some(3), Some(10)).offset(), 20);
    }

    #[test]
    fn page_count_rounds_up() {
        let page = Page::clamped(None, Some(10));
        assert_eq!(page.page_count(0), 0);
        assert_eq!(page.page_count(1), 1);
        assert_eq!(page.page_count(10), 1);
        assert_eq!(page.page_count(11), 2);
        assert_eq!(page.page_count(100), 10);
    }

    #[test]
    fn unknown_sort_tokens_fall_back_to_newest_first() {
        assert_eq!(SortKey::parse(None), SortKey::CreatedAtDesc);
        assert_eq!(SortKey::parse(Some("")), SortKey::CreatedAtDesc);
        assert_eq!(SortKey::parse(Some("bogus")), SortKey::CreatedAtDesc);
    }

    #[test]
    fn sort_tokens_parse_both_spellings() {
        assert_eq!(SortKey::parse(Some("created_at")), SortKey::CreatedAtAsc);
        assert_eq!(SortKey::parse(Some("createdAt")), SortKey::CreatedAtAsc);
        assert_eq!(SortKey::parse(Some("-createdAt")), SortKey::CreatedAtDesc);
        assert_eq!(SortKey::parse(Some("title")), SortKey::TitleAsc);
        assert_eq!(SortKey::parse(Some("-title")), SortKey::TitleDesc);
    }

    #[test]
    fn sort_keys_map_to_columns() {
        assert_eq!(SortKey::CreatedAtDesc.column(), "created_at");
        assert!(SortKey::CreatedAtDesc.descending());
        assert_eq!(SortKey::TitleAsc.column(), "title");
        assert!(!SortKey::TitleAsc.descending());
    }
}
