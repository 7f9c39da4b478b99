// ── Listing query parameters ──

use cantina_api::PageParams;
use chrono::NaiveDate;

use crate::model::{ResourceId, SaleStatus};

/// Conversion of a listing query into URL query pairs. Unset filters are
/// omitted entirely.
pub trait QueryParams {
    fn to_params(&self) -> Vec<(&'static str, String)>;
}

impl QueryParams for PageParams {
    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        self.extend_params(&mut params);
        params
    }
}

impl QueryParams for () {
    fn to_params(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub page: PageParams,
    pub category_id: Option<ResourceId>,
    pub active: Option<bool>,
}

impl QueryParams for ProductQuery {
    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = self.page.to_params();
        if let Some(category_id) = &self.category_id {
            params.push(("categoryId", category_id.to_string()));
        }
        if let Some(active) = self.active {
            params.push(("active", active.to_string()));
        }
        params
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryQuery {
    pub page: PageParams,
    pub active: Option<bool>,
}

impl QueryParams for CategoryQuery {
    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = self.page.to_params();
        if let Some(active) = self.active {
            params.push(("active", active.to_string()));
        }
        params
    }
}

/// Inclusive date window, sent as `startDate` / `endDate` (`YYYY-MM-DD`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date: Some(start_date),
            end_date: Some(end_date),
        }
    }

    fn extend_params(&self, params: &mut Vec<(&'static str, String)>) {
        if let Some(start) = self.start_date {
            params.push(("startDate", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end_date {
            params.push(("endDate", end.format("%Y-%m-%d").to_string()));
        }
    }
}

impl QueryParams for DateRange {
    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        self.extend_params(&mut params);
        params
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaleQuery {
    pub page: PageParams,
    pub customer_id: Option<ResourceId>,
    pub status: Option<SaleStatus>,
    pub range: DateRange,
}

impl QueryParams for SaleQuery {
    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = self.page.to_params();
        if let Some(customer_id) = &self.customer_id {
            params.push(("customerId", customer_id.to_string()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.to_string()));
        }
        self.range.extend_params(&mut params);
        params
    }
}

/// People listing. Unlike the other listings every parameter is always
/// sent, defaulting to the first page of ten active people.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonQuery {
    pub page: u32,
    pub limit: u32,
    pub active_only: bool,
}

impl Default for PersonQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            active_only: true,
        }
    }
}

impl QueryParams for PersonQuery {
    fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("activeOnly", self.active_only.to_string()),
        ]
    }
}
