use serde::Serialize;

/// Pages shown on either side of the current page.
const WINDOW: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageButton {
    pub number: u32,
    pub current: bool,
}

/// Controls under a result list: an optional Previous, a window of page
/// buttons around the current page, and an optional Next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current: u32,
    pub total_pages: u32,
    pub previous: Option<u32>,
    pub next: Option<u32>,
    pub pages: Vec<PageButton>,
}

impl Pagination {
    /// `None` when everything fits on one page.
    pub fn build(current: u32, total_pages: u32) -> Option<Self> {
        if total_pages <= 1 {
            return None;
        }
        let current = current.clamp(1, total_pages);
        let first = current.saturating_sub(WINDOW).max(1);
        let last = (current + WINDOW).min(total_pages);

        Some(Self {
            current,
            total_pages,
            previous: (current > 1).then(|| current - 1),
            next: (current < total_pages).then(|| current + 1),
            pages: (first..=last)
                .map(|number| PageButton {
                    number,
                    current: number == current,
                })
                .collect(),
        })
    }

    pub fn numbers(&self) -> Vec<u32> {
        self.pages.iter().map(|p| p.number).collect()
    }
}
