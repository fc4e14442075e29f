// src/common/pagination.rs

use crate::common::error::AppError;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PER_PAGE: i64 = 20;
pub const MAX_PER_PAGE: i64 = 100;

/// Koersi defensif parameter numerik query. Input non-angka atau
/// non-finite jatuh ke default, bukan error: parameter paging yang
/// rusak tidak layak menggagalkan request baca.
fn coerce(raw: Option<&str>, default: i64) -> i64 {
    let Some(raw) = raw else { return default };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v.floor() as i64,
        _ => default,
    }
}

/// `page` minimal 1.
pub fn coerce_page(raw: Option<&str>) -> i64 {
    coerce(raw, DEFAULT_PAGE).max(1)
}

/// `per_page` di-clamp ke [1, 100].
pub fn coerce_per_page(raw: Option<&str>) -> i64 {
    coerce(raw, DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
}

/// `limit` listing cursor di-clamp ke [1, max]; default 20.
pub fn clamp_limit(raw: Option<i64>, max: i64) -> i64 {
    raw.unwrap_or(DEFAULT_PER_PAGE).clamp(1, max)
}

/// Validasi filter bulan: rentang tertutup [1, 12].
pub fn parse_month(raw: Option<&str>) -> Result<Option<i32>, AppError> {
    let Some(raw) = raw else { return Ok(None) };
    match raw.trim().parse::<i32>() {
        Ok(m) if (1..=12).contains(&m) => Ok(Some(m)),
        _ => Err(AppError::invalid_field("month", "Bulan harus di antara 1 dan 12.")),
    }
}

/// Validasi filter tahun: rentang tertutup [1970, 2100].
pub fn parse_year(raw: Option<&str>) -> Result<Option<i32>, AppError> {
    let Some(raw) = raw else { return Ok(None) };
    match raw.trim().parse::<i32>() {
        Ok(y) if (1970..=2100).contains(&y) => Ok(Some(y)),
        _ => Err(AppError::invalid_field("year", "Tahun harus di antara 1970 dan 2100.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn koersi_page() {
        assert_eq!(coerce_page(None), 1);
        assert_eq!(coerce_page(Some("3")), 3);
        assert_eq!(coerce_page(Some("0")), 1);
        assert_eq!(coerce_page(Some("-5")), 1);
        assert_eq!(coerce_page(Some("2.9")), 2);
        assert_eq!(coerce_page(Some("abc")), 1);
        assert_eq!(coerce_page(Some("NaN")), 1);
        assert_eq!(coerce_page(Some("Infinity")), 1);
    }

    #[test]
    fn koersi_per_page() {
        assert_eq!(coerce_per_page(None), 20);
        assert_eq!(coerce_per_page(Some("50")), 50);
        assert_eq!(coerce_per_page(Some("0")), 1);
        assert_eq!(coerce_per_page(Some("1000")), 100);
        assert_eq!(coerce_per_page(Some("junk")), 20);
    }

    #[test]
    fn clamp_limit_cursor() {
        assert_eq!(clamp_limit(None, 100), 20);
        assert_eq!(clamp_limit(Some(0), 100), 1);
        assert_eq!(clamp_limit(Some(500), 200), 200);
        assert_eq!(clamp_limit(Some(7), 100), 7);
    }

    #[test]
    fn batas_bulan() {
        assert_eq!(parse_month(None).unwrap(), None);
        assert_eq!(parse_month(Some("1")).unwrap(), Some(1));
        assert_eq!(parse_month(Some("12")).unwrap(), Some(12));
        assert!(parse_month(Some("0")).is_err());
        assert!(parse_month(Some("13")).is_err());
        assert!(parse_month(Some("abc")).is_err());
    }

    #[test]
    fn batas_tahun() {
        assert_eq!(parse_year(Some("1970")).unwrap(), Some(1970));
        assert_eq!(parse_year(Some("2100")).unwrap(), Some(2100));
        assert!(parse_year(Some("1969")).is_err());
        assert!(parse_year(Some("2101")).is_err());
        assert!(parse_year(Some("20x5")).is_err());
    }
}
