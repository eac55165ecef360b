/// LIMIT/OFFSET pair.
///
/// A limit of zero is meaningful: `page(0, k)` translates to it and must
/// fetch no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub limit: u64,
    pub offset: Option<u64>,
}

impl Limit {
    pub fn new(limit: u64) -> Self {
        Self {
            limit,
            offset: None,
        }
    }

    pub fn with_offset(limit: u64, offset: u64) -> Self {
        Self {
            limit,
            offset: Some(offset),
        }
    }
}
