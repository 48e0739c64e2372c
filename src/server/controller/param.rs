use serde::Deserialize;

use crate::server::error::AppError;

/// Largest page size a list endpoint returns.
pub const MAX_PER_PAGE: u64 = 100;

/// Pagination query shared by list endpoints.
#[derive(Deserialize, Debug, Clone)]
pub struct PaginationParam {
    /// Zero-indexed page number.
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

pub fn default_per_page() -> u64 {
    10
}

/// Clamps `per_page` to `1..=MAX_PER_PAGE` and rejects pages whose row offset the
/// database cannot represent.
///
/// # Returns
/// - `Ok((page, per_page))` - Values safe to hand to the repositories
/// - `Err(AppError::BadRequest)` - `page * per_page` exceeds the largest SQL offset
pub fn paginate(page: u64, per_page: u64) -> Result<(u64, u64), AppError> {
    let per_page = per_page.clamp(1, MAX_PER_PAGE);

    match page.checked_mul(per_page) {
        Some(offset) if offset <= i64::MAX as u64 => Ok((page, per_page)),
        _ => Err(AppError::BadRequest(format!("Page {} is out of range", page))),
    }
}

/// Optional `status` filter for list endpoints.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct StatusQuery {
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expected: page size forced into 1..=MAX_PER_PAGE
    #[test]
    fn clamps_per_page() {
        assert_eq!(paginate(2, 0).unwrap(), (2, 1));
        assert_eq!(paginate(2, 25).unwrap(), (2, 25));
        assert_eq!(paginate(2, u64::MAX).unwrap(), (2, MAX_PER_PAGE));
    }

    /// Expected: Err(BadRequest) instead of an overflowing offset
    #[test]
    fn rejects_out_of_range_page() {
        assert!(matches!(paginate(u64::MAX, 10), Err(AppError::BadRequest(_))));
        assert!(matches!(
            paginate(i64::MAX as u64, 10),
            Err(AppError::BadRequest(_))
        ));
    }
}
