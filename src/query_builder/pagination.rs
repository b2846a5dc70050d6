/// LIMIT/OFFSET criteria. Each side overrides independently on merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl Pagination {
    /// Create pagination with page number and per-page count.
    /// Offsets past `u32::MAX` saturate.
    pub fn new(page: u32, per_page: u32) -> Self {
        let offset = page
            .checked_sub(1)
            .map(|skipped| skipped.saturating_mul(per_page));
        Self {
            limit: Some(per_page),
            offset,
        }
    }

    pub fn limit_only(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            offset: None,
        }
    }

    pub fn offset_only(offset: u32) -> Self {
        Self {
            limit: None,
            offset: Some(offset),
        }
    }

    /// Later values win, absent values keep what was there
    pub fn overridden_by(self, other: Pagination) -> Pagination {
        Pagination {
            limit: other.limit.or(self.limit),
            offset: other.offset.or(self.offset),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.limit.is_none() && self.offset.is_none()
    }

    /// Convert to SQL string
    pub fn to_sql(&self) -> String {
        let mut sql = String::new();

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }

        sql
    }
}
