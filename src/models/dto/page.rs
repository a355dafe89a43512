use serde::Deserialize;

/// Fixed page size applied to every list endpoint.
pub const PAGE_SIZE: i64 = 5;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
}

/// Validates a requested page against the total row count and returns the row
/// offset of its first entry. Pages are 1-based; a page starting past the end
/// of the result set is invalid, except page 1 of an empty set.
pub fn page_offset(page: i64, count: i64) -> Option<i64> {
    if page < 1 {
        return None;
    }
    let offset = (page - 1) * PAGE_SIZE;
    if offset > 0 && offset >= count {
        return None;
    }
    Some(offset)
}

/// Computes the `next`/`previous` page numbers for the given page.
pub fn page_links(page: i64, count: i64) -> (Option<i64>, Option<i64>) {
    let next = if page * PAGE_SIZE < count {
        Some(page + 1)
    } else {
        None
    };
    let previous = if page > 1 { Some(page - 1) } else { None };
    (next, previous)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_starts_at_zero() {
        assert_eq!(page_offset(1, 12), Some(0));
    }

    #[test]
    fn first_page_of_empty_set_is_valid() {
        assert_eq!(page_offset(1, 0), Some(0));
    }

    #[test]
    fn page_past_the_end_is_invalid() {
        // 7 rows fill pages 1 and 2 only
        assert_eq!(page_offset(2, 7), Some(5));
        assert_eq!(page_offset(3, 7), None);
    }

    #[test]
    fn zero_and_negative_pages_are_invalid() {
        assert_eq!(page_offset(0, 10), None);
        assert_eq!(page_offset(-1, 10), None);
    }

    #[test]
    fn links_on_a_middle_page() {
        assert_eq!(page_links(2, 12), (Some(3), Some(1)));
    }

    #[test]
    fn links_on_the_only_page() {
        assert_eq!(page_links(1, 3), (None, None));
    }

    #[test]
    fn links_on_first_and_last_pages() {
        assert_eq!(page_links(1, 12), (Some(2), None));
        assert_eq!(page_links(3, 12), (None, Some(2)));
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        assert_eq!(page_links(2, 10), (None, Some(1)));
    }
}
