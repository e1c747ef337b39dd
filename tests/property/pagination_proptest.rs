//! Property-based tests for page/size parsing

use proptest::prelude::*;
use kawa_forum::shared::pagination::{has_more, offset, PageQuery, MAX_PAGE_SIZE};

proptest! {
    #[test]
    fn test_page_size_always_clamped(page in any::<i64>(), size in any::<i64>()) {
        let (page, size) = PageQuery::new(page, size).page_size();
        prop_assert!(page >= 1);
        prop_assert!((1..=MAX_PAGE_SIZE).contains(&size));
    }

    #[test]
    fn test_offsets_are_contiguous(page in 1i64..10_000, size in 1i64..=MAX_PAGE_SIZE) {
        prop_assert_eq!(offset(page + 1, size) - offset(page, size), size);
        prop_assert!(offset(page, size) >= 0);
    }

    #[test]
    fn test_offset_of_any_clamped_query(page in any::<i64>(), size in any::<i64>()) {
        let (page, size) = PageQuery::new(page, size).page_size();
        let offset = offset(page, size);
        prop_assert!(offset >= 0);
        if page > 1 {
            prop_assert!(offset >= size);
        }
    }

    #[test]
    fn test_short_page_has_no_more(size in 1i64..=MAX_PAGE_SIZE, missing in 1i64..=MAX_PAGE_SIZE) {
        prop_assume!(missing <= size);
        prop_assert!(!has_more((size - missing) as usize, size));
        prop_assert!(has_more(size as usize, size));
    }
}
