use crate::record::Record;
use serde::{Deserialize, Serialize};

/// Records per page in the reference deployment.
pub const PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub query: String,
    /// 1-indexed. Pages past the end are legal and simply empty.
    pub page: u32,
    pub total_results: u32,
    pub total_pages: u32,
    pub records: Vec<Record>,
}

impl SearchPage {
    pub fn new(query: impl Into<String>, page: u32, total_results: u32, records: Vec<Record>) -> Self {
        Self {
            query: query.into(),
            page: page.max(1),
            total_results,
            total_pages: Self::total_pages_for(total_results),
            records,
        }
    }

    pub fn total_pages_for(total_results: u32) -> u32 {
        total_results.div_ceil(PAGE_SIZE)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_is_ceiling() {
        assert_eq!(SearchPage::total_pages_for(0), 0);
        assert_eq!(SearchPage::total_pages_for(1), 1);
        assert_eq!(SearchPage::total_pages_for(10), 1);
        assert_eq!(SearchPage::total_pages_for(11), 2);
        assert_eq!(SearchPage::total_pages_for(439), 44);
    }

    #[test]
    fn test_new_clamps_page() {
        let page = SearchPage::new("batman", 0, 25, Vec::new());
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 3);
        assert!(page.is_empty());
    }
}
