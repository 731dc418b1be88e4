use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for a single materialized-path label
    /// Lowercase alphanumeric runs joined by single underscores
    /// - Valid: "women", "casual_dresses", "t_shirts2"
    /// - Invalid: "_women", "women_", "casual__dresses", "Women", "t-shirts"
    pub static ref PATH_LABEL_REGEX: Regex =
        Regex::new(r"^[a-z0-9]+(?:_[a-z0-9]+)*$").unwrap();

    /// Regex for a full materialized path (labels joined by dots)
    /// - Valid: "women", "women.clothing", "men.t_shirts.plain_t_shirts"
    /// - Invalid: ".women", "women.", "women..clothing", "women.Clothing"
    pub static ref MATERIALIZED_PATH_REGEX: Regex =
        Regex::new(r"^[a-z0-9]+(?:_[a-z0-9]+)*(?:\.[a-z0-9]+(?:_[a-z0-9]+)*)*$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_label_regex_valid() {
        assert!(PATH_LABEL_REGEX.is_match("women"));
        assert!(PATH_LABEL_REGEX.is_match("casual_dresses"));
        assert!(PATH_LABEL_REGEX.is_match("t_shirts2"));
        assert!(PATH_LABEL_REGEX.is_match("a"));
        assert!(PATH_LABEL_REGEX.is_match("42"));
    }

    #[test]
    fn test_path_label_regex_invalid() {
        assert!(!PATH_LABEL_REGEX.is_match("_women")); // leading underscore
        assert!(!PATH_LABEL_REGEX.is_match("women_")); // trailing underscore
        assert!(!PATH_LABEL_REGEX.is_match("casual__dresses")); // double underscore
        assert!(!PATH_LABEL_REGEX.is_match("Women")); // uppercase
        assert!(!PATH_LABEL_REGEX.is_match("t-shirts")); // hyphen
        assert!(!PATH_LABEL_REGEX.is_match("women.clothing")); // more than one segment
        assert!(!PATH_LABEL_REGEX.is_match("")); // empty
    }

    #[test]
    fn test_materialized_path_regex() {
        assert!(MATERIALIZED_PATH_REGEX.is_match("women"));
        assert!(MATERIALIZED_PATH_REGEX.is_match("women.clothing"));
        assert!(MATERIALIZED_PATH_REGEX.is_match("men.t_shirts.plain_t_shirts"));

        assert!(!MATERIALIZED_PATH_REGEX.is_match(".women"));
        assert!(!MATERIALIZED_PATH_REGEX.is_match("women."));
        assert!(!MATERIALIZED_PATH_REGEX.is_match("women..clothing"));
        assert!(!MATERIALIZED_PATH_REGEX.is_match("women.Clothing"));
        assert!(!MATERIALIZED_PATH_REGEX.is_match(""));
    }
}
