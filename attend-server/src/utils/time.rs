//! 门户日期格式解析
//!
//! 课表与考勤记录沿用门户历史格式：单日 `DD-MM-YYYY`，
//! 轮转区间 `DD/MM/YYYY TO DD/MM/YYYY` (两端均含)。

use chrono::NaiveDate;

use super::{AppError, AppResult};

/// 解析单日日期 (DD-MM-YYYY)，格式错误返回 None
///
/// 科目解析需要对任意输入保持全函数性，因此这里刻意宽松：
/// 无法解析的日期由调用方降级处理而不是报错。
pub fn parse_day_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%d-%m-%Y").ok()
}

/// 解析轮转日期区间 "DD/MM/YYYY TO DD/MM/YYYY"
///
/// 配置加载路径，格式错误是配置问题，返回验证错误。
pub fn parse_date_range(range: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let mut parts = range.split_whitespace();
    let (Some(start_str), Some("TO"), Some(end_str), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(AppError::validation(format!(
            "Invalid date range '{range}', expected 'DD/MM/YYYY TO DD/MM/YYYY'"
        )));
    };

    let start = NaiveDate::parse_from_str(start_str, "%d/%m/%Y")
        .map_err(|_| AppError::validation(format!("Invalid range start date: {start_str}")))?;
    let end = NaiveDate::parse_from_str(end_str, "%d/%m/%Y")
        .map_err(|_| AppError::validation(format!("Invalid range end date: {end_str}")))?;

    if end < start {
        return Err(AppError::validation(format!(
            "Range '{range}' ends before it starts"
        )));
    }

    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_portal_day_format() {
        assert_eq!(
            parse_day_date("21-11-2025"),
            NaiveDate::from_ymd_opt(2025, 11, 21)
        );
        assert_eq!(parse_day_date("2025-11-21"), None);
        assert_eq!(parse_day_date(""), None);
    }

    #[test]
    fn parses_rotation_ranges() {
        let (start, end) = parse_date_range("01/11/2025 TO 20/11/2025").unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 11, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 11, 20).unwrap());
    }

    #[test]
    fn rejects_malformed_ranges() {
        assert!(parse_date_range("01/11/2025 - 20/11/2025").is_err());
        assert!(parse_date_range("20/11/2025 TO 01/11/2025").is_err());
        assert!(parse_date_range("junk").is_err());
    }
}
