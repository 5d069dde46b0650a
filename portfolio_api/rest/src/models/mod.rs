use portfolio_models::pagination::{PaginationLimit, PaginationSlice};
use serde::{Deserialize, Serialize};

pub mod contact;

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

/// Page based pagination as used by the admin endpoints. Converted into the
/// offset based [`PaginationSlice`] used by the persistence layer.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ApiPaginationQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default)]
    pub limit: PaginationLimit,
}

impl ApiPaginationQuery {
    pub fn page(self) -> u64 {
        self.page.max(1)
    }

    pub fn slice(self) -> PaginationSlice {
        PaginationSlice {
            limit: self.limit,
            offset: (self.page() - 1) * *self.limit,
        }
    }

    pub fn total_pages(self, total: u64) -> u64 {
        total.div_ceil(*self.limit)
    }
}

fn default_page() -> u64 {
    1
}
