use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// Success envelope shared by every JSON endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip)]
    status: StatusCode,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status: StatusCode::OK,
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            ..Self::ok(message, data)
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Raw `?page=&limit=` values. Unparsable numbers fall back to the defaults
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

const MAX_LIMIT: i64 = 100;
/// Largest page whose offset still fits in an `i64` at the maximum limit.
const MAX_PAGE: i64 = i64::MAX / MAX_LIMIT;

/// Normalised page/limit pair: page in 1..=MAX_PAGE, limit in 1..=100 (default 10).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: i64,
    pub limit: i64,
}

impl PageParams {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.filter(|p| *p >= 1).unwrap_or(1).min(MAX_PAGE);
        let limit = limit.filter(|l| (1..=MAX_LIMIT).contains(l)).unwrap_or(10);
        Self { page, limit }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl From<PageQuery> for PageParams {
    fn from(q: PageQuery) -> Self {
        let parse = |raw: Option<String>| raw.and_then(|v| v.trim().parse::<i64>().ok());
        Self::new(parse(q.page), parse(q.limit))
    }
}

#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub data: Vec<T>,
    pub total_count: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl<T: Serialize> Paginated<T> {
    pub fn new(data: Vec<T>, total_count: i64, params: PageParams) -> Self {
        Self {
            data,
            total_count,
            page: params.page,
            limit: params.limit,
            total_pages: total_pages(total_count, params.limit),
        }
    }
}

fn total_pages(total_count: i64, limit: i64) -> i64 {
    if limit <= 0 {
        return 0;
    }
    (total_count + limit - 1) / limit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_params_fall_back_to_defaults() {
        assert_eq!(PageParams::new(None, None), PageParams { page: 1, limit: 10 });
        assert_eq!(PageParams::new(Some(0), Some(0)), PageParams { page: 1, limit: 10 });
        assert_eq!(PageParams::new(Some(-3), Some(101)), PageParams { page: 1, limit: 10 });
        assert_eq!(PageParams::new(Some(3), Some(100)), PageParams { page: 3, limit: 100 });
    }

    #[test]
    fn huge_page_is_capped_without_overflow() {
        let q = PageQuery {
            page: Some(i64::MAX.to_string()),
            limit: Some("100".to_string()),
        };
        let params = PageParams::from(q);
        assert_eq!(params.page, MAX_PAGE);
        assert_eq!(params.offset(), (MAX_PAGE - 1) * 100);
    }

    #[test]
    fn garbage_query_values_use_defaults() {
        let q = PageQuery {
            page: Some("two".to_string()),
            limit: Some("25".to_string()),
        };
        assert_eq!(PageParams::from(q), PageParams { page: 1, limit: 25 });
    }

    #[test]
    fn offset_and_total_pages() {
        let params = PageParams::new(Some(3), Some(20));
        assert_eq!(params.offset(), 40);
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
    }

    #[test]
    fn message_envelope_omits_data() {
        let body = serde_json::to_value(ApiResponse::message("Logged out successfully")).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Logged out successfully");
        assert!(body.get("data").is_none());
    }
}
