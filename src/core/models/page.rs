use serde::Serialize;
use utoipa::ToSchema;

/// Offset pagination as requested by `?page=&limit=`. Values below 1 fall back to the defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn new(page: Option<u32>, limit: Option<u32>, default_limit: u32) -> Self {
        PageRequest {
            page: page.filter(|p| *p > 0).unwrap_or(1),
            limit: limit.filter(|l| *l > 0).unwrap_or(default_limit),
        }
    }

    fn offset(&self) -> usize {
        (self.page as usize - 1) * self.limit as usize
    }
}

#[derive(Clone, Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: usize,
    pub pages: usize,
}

#[derive(Clone, Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Slices an already filtered and sorted result set.
    pub fn from_sorted(items: Vec<T>, request: PageRequest) -> Self {
        let total = items.len();
        let pages = total.div_ceil(request.limit as usize);
        let items = items
            .into_iter()
            .skip(request.offset())
            .take(request.limit as usize)
            .collect();
        Page {
            items,
            pagination: Pagination {
                page: request.page,
                limit: request.limit,
                total,
                pages,
            },
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}
