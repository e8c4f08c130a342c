pub mod checkins;
pub mod facilities;
pub mod guests;
pub mod pool;
pub mod templates;
pub mod users;

pub use checkins::*;
pub use facilities::*;
pub use guests::*;
pub use pool::{create_pool, run_migrations};
pub use templates::*;
pub use users::*;

pub const DEFAULT_LIMIT: i64 = 25;
pub const MAX_LIMIT: i64 = 1000;

/// Common list filters and paging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilter {
    pub active_only: bool,
    /// Case-insensitive substring match
    pub name: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for ListFilter {
    fn default() -> Self {
        Self {
            active_only: false,
            name: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl ListFilter {
    /// Clamp paging into `1..=MAX_LIMIT` and a non-negative offset
    pub fn new(active_only: bool, name: Option<String>, limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            active_only,
            name: crate::models::normalize(name),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
            offset: offset.unwrap_or(0).max(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paging_is_clamped() {
        let filter = ListFilter::new(true, Some("  ".into()), Some(5000), Some(-3));
        assert_eq!(filter.limit, MAX_LIMIT);
        assert_eq!(filter.offset, 0);
        assert_eq!(filter.name, None);
        assert_eq!(ListFilter::new(false, None, None, None), ListFilter::default());
    }
}
