//! Property-based tests for login and content validation

use proptest::prelude::*;
use kawa_forum::backend::auth::handlers::signup::is_valid_login;
use kawa_forum::backend::spam::ContentFilter;

proptest! {
    #[test]
    fn test_generated_logins_are_valid(login in "[a-zA-Z][a-zA-Z0-9_]{2,29}") {
        prop_assert!(is_valid_login(&login));
    }

    #[test]
    fn test_logins_starting_with_digit_are_invalid(login in "[0-9][a-z]{2,10}") {
        prop_assert!(!is_valid_login(&login));
    }

    #[test]
    fn test_filter_catches_word_anywhere(prefix in "[a-z ]{0,20}", suffix in "[a-z ]{0,20}") {
        let filter = ContentFilter::new(&["spam".to_string()]);
        let text = format!("{}SpAm{}", prefix, suffix);
        prop_assert!(!filter.validate(&text));
    }

    #[test]
    fn test_empty_filter_accepts_everything(text in ".*") {
        let filter = ContentFilter::new(Vec::<String>::new());
        prop_assert!(filter.validate(&text));
    }
}
