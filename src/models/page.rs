//! Page requests for list and search queries.

/// A zero-based page of a deterministically ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page_index: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page_index: u32, page_size: u32) -> Self {
        Self {
            page_index,
            page_size,
        }
    }

    /// Rows to skip: `page_index × page_size`.
    pub fn offset(&self) -> u64 {
        u64::from(self.page_index) * u64::from(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }
}
