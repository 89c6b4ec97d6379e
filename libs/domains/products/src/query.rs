//! Builds a store-level query from list request parameters.

use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Largest offset the store accepts (BSON int64)
const MAX_SKIP: u64 = i64::MAX as u64;

/// Stored fields returned by list queries
pub const SUMMARY_FIELDS: &[&str] = &["_id", "name", "price", "created_at"];

/// Query string of the list endpoint.
///
/// Values are kept as raw strings and coerced leniently by [`QuerySpec::build`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// 1-based page number (default 1)
    #[param(example = "1")]
    pub page: Option<String>,
    /// Results per page (default 10)
    #[param(example = "10")]
    pub page_size: Option<String>,
    /// Case-insensitive substring matched against name and description
    pub keyword: Option<String>,
    /// `recent` (default) or `favorite`; anything else keeps store order
    #[param(example = "recent")]
    pub order_by: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Newest first
    Recent,
    /// Most favorited first
    Favorite,
}

impl SortKey {
    /// `None` means natural store order.
    pub fn from_param(order_by: Option<&str>) -> Option<Self> {
        match order_by.unwrap_or("recent") {
            "recent" => Some(SortKey::Recent),
            "favorite" => Some(SortKey::Favorite),
            _ => None,
        }
    }
}

/// Store-agnostic product filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Trimmed, never empty
    pub keyword: Option<String>,
}

impl ProductFilter {
    pub fn keyword(keyword: Option<&str>) -> Self {
        let keyword = keyword
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string);
        Self { keyword }
    }

    /// Case-insensitive substring match on name or description.
    pub fn matches(&self, name: &str, description: &str) -> bool {
        match &self.keyword {
            None => true,
            Some(keyword) => {
                let keyword = keyword.to_lowercase();
                name.to_lowercase().contains(&keyword)
                    || description.to_lowercase().contains(&keyword)
            }
        }
    }
}

/// Filter, sort, pagination and projection for one list request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub filter: ProductFilter,
    pub sort: Option<SortKey>,
    pub page: u64,
    pub page_size: u64,
    pub skip: u64,
    pub limit: u64,
    pub fields: &'static [&'static str],
}

impl QuerySpec {
    pub fn build(params: &ListParams) -> Self {
        let page = positive_or(params.page.as_deref(), DEFAULT_PAGE);
        let page_size = positive_or(params.page_size.as_deref(), DEFAULT_PAGE_SIZE);

        Self {
            filter: ProductFilter::keyword(params.keyword.as_deref()),
            sort: SortKey::from_param(params.order_by.as_deref()),
            page,
            page_size,
            skip: (page - 1).saturating_mul(page_size).min(MAX_SKIP),
            limit: page_size,
            fields: SUMMARY_FIELDS,
        }
    }
}

fn positive_or(value: Option<&str>, default: u64) -> u64 {
    match value.and_then(leading_int) {
        Some(n) if n >= 1 => n as u64,
        _ => default,
    }
}

/// Integer prefix of `s`: leading whitespace, an optional sign, then digits.
/// `"2abc"` gives 2, `"2.9"` gives 2, `"abc"` gives `None`.
fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
