use serde::Serialize;

/// Page size used when a list request does not name one.
pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// Pagination block echoed with every list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
}

impl Pagination {
    pub fn total_pages(&self) -> usize {
        if self.limit == 0 {
            0
        } else {
            self.total.div_ceil(self.limit)
        }
    }
}

/// 1-indexed page request. Zero or absent values fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl PageRequest {
    pub fn new(page: Option<usize>, limit: Option<usize>) -> Self {
        Self {
            page: page.filter(|value| *value >= 1).unwrap_or(1),
            limit: limit
                .filter(|value| *value >= 1)
                .unwrap_or(DEFAULT_PAGE_LIMIT),
        }
    }
}

/// List payload in the `{data, pagination}` envelope shape.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// Slice semantics: `[(page-1)*limit .. page*limit]`. A page beyond the end
/// is an empty list, not an error.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Paginated<T> {
    let total = items.len();
    let start = request.page.saturating_sub(1).saturating_mul(request.limit);
    let data = items.into_iter().skip(start).take(request.limit).collect();

    Paginated {
        data,
        pagination: Pagination {
            page: request.page,
            limit: request.limit,
            total,
        },
    }
}
