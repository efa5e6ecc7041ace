//! Offset/limit pagination.

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

impl Page {
    pub const DEFAULT_LIMIT: usize = 100;
    pub const MAX_LIMIT: usize = 1000;

    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Take the `[offset, offset + limit)` window of `items`.
    ///
    /// An offset past the end yields an empty page.
    pub fn slice<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items.into_iter().skip(self.offset).take(self.limit).collect()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_window() {
        let page = Page::new(3, 2);
        assert_eq!(page.slice(0..10), vec![2, 3, 4]);
    }

    #[test]
    fn test_slice_clamps_to_end() {
        assert_eq!(Page::new(10, 8).slice(0..10), vec![8, 9]);
        assert!(Page::new(10, 1000).slice(0..10).is_empty());
    }
}
