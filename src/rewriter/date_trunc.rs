use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use crate::ast::functions;

/// Date-truncation granularities, coarsest first. A finer level can always
/// serve a predicate expressed at a coarser level, never the other way round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TruncLevel {
    Year,
    YearMonth,
    YearMonthDay,
}

pub const DATE_TRUNC_HIERARCHY: [TruncLevel; 3] =
    [TruncLevel::Year, TruncLevel::YearMonth, TruncLevel::YearMonthDay];

impl TruncLevel {
    pub fn function_name(self) -> &'static str {
        match self {
            TruncLevel::Year => functions::DATE_TRUNC_Y,
            TruncLevel::YearMonth => functions::DATE_TRUNC_YM,
            TruncLevel::YearMonthDay => functions::DATE_TRUNC_YMD,
        }
    }

    pub fn from_function_name(name: &str) -> Option<TruncLevel> {
        match name {
            functions::DATE_TRUNC_Y => Some(TruncLevel::Year),
            functions::DATE_TRUNC_YM => Some(TruncLevel::YearMonth),
            functions::DATE_TRUNC_YMD => Some(TruncLevel::YearMonthDay),
            _ => None,
        }
    }

    /// True when `self` can distinguish everything `other` can.
    pub fn at_least_as_fine(self, other: TruncLevel) -> bool {
        self >= other
    }

    /// This level and every finer one, coarsest first.
    pub fn and_finer(self) -> impl Iterator<Item = TruncLevel> {
        DATE_TRUNC_HIERARCHY.into_iter().filter(move |level| *level >= self)
    }

    /// Classifies a floating-timestamp literal to the coarsest truncation
    /// level that reproduces it exactly. Timestamps with a time-of-day
    /// component are not expressible at any level.
    pub fn classify_timestamp(text: &str) -> Option<TruncLevel> {
        let ts = parse_timestamp(text)?;

        if ts.time() != NaiveTime::MIN {
            return None;
        }
        if ts.day() == 1 && ts.month() == 1 {
            return Some(TruncLevel::Year);
        }
        if ts.day() == 1 {
            return Some(TruncLevel::YearMonth);
        }
        Some(TruncLevel::YearMonthDay)
    }
}

fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

    for format in FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(text, format) {
            return Some(ts);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}
