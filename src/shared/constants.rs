/// Separator between segments of a materialized path
pub const PATH_SEPARATOR: char = '.';

/// Icon assigned when a category is created without one
pub const DEFAULT_CATEGORY_ICON: &str = "folder";

/// Color assigned when a category is created without one (indigo)
pub const DEFAULT_CATEGORY_COLOR: &str = "#3f51b5";

