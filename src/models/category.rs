use serde::{Deserialize, Serialize};

/// Category id used when no categories are configured at all
pub const FALLBACK_CATEGORY: &str = "personal";

/// Category reference entity
///
/// The set is fixed configuration; tasks point at a category by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Terminal color name (see `cli::output`)
    pub color: String,
}

impl Category {
    pub fn new(id: &str, name: &str, color: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
        }
    }

    /// Case-insensitive match against id or display name
    pub fn matches(&self, candidate: &str) -> bool {
        self.id.eq_ignore_ascii_case(candidate) || self.name.to_lowercase() == candidate.to_lowercase()
    }
}

/// Built-in category set, used when the rc file defines none
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("personal", "Personal", "blue"),
        Category::new("work", "Work", "magenta"),
        Category::new("health", "Health", "green"),
        Category::new("learning", "Learning", "yellow"),
    ]
}

/// Look up a category by id or name
pub fn find_category<'a>(categories: &'a [Category], candidate: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.matches(candidate))
}
