pub struct Pagination {
    limit: i64,
    offset: Option<i64>,
}

impl Pagination {
    pub fn new(limit: i64, offset: Option<i64>) -> Self {
        Self { limit, offset }
    }

    pub fn page(page: i64, size: i64) -> Self {
        let size = size.max(1);
        Self::new(size, Some((page.max(1) - 1) * size))
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0)
    }
}
