use std::fmt;

/// A component of a date/time value addressable by the lookup DSL.
///
/// `Year` exists for parsing only; translation rewrites year lookups to
/// literal date comparisons rather than an EXTRACT call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DatePart {
    Year,
    Month,
    Day,
    WeekDay,
    Hour,
    Minute,
    Second,
}

impl DatePart {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "year" => Self::Year,
            "month" => Self::Month,
            "day" => Self::Day,
            "week_day" => Self::WeekDay,
            "hour" => Self::Hour,
            "minute" => Self::Minute,
            "second" => Self::Second,
            _ => return None,
        })
    }
}

impl fmt::Display for DatePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Year => "YEAR",
            Self::Month => "MONTH",
            Self::Day => "DAY",
            Self::WeekDay => "DOW",
            Self::Hour => "HOUR",
            Self::Minute => "MINUTE",
            Self::Second => "SECOND",
        })
    }
}
