use serde::Deserialize;
use utoipa::IntoParams;

use crate::db::ListFilter;

/// Filters and paging for list endpoints
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Only active rows when true
    pub active: Option<bool>,
    /// Case-insensitive name substring
    pub name: Option<String>,
    /// Page size, default 25, at most 1000
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListParams {
    pub fn into_filter(self) -> ListFilter {
        ListFilter::new(self.active.unwrap_or(false), self.name, self.limit, self.offset)
    }
}

/// Query for the checkins of one night
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CheckinParams {
    /// Checkin date, YYYY-MM-DD (required for listing)
    pub date: Option<String>,
    /// Attach the assigned guest to each checkin
    pub with_guest: Option<bool>,
}
