use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Reporting period picked on the dashboard. Weeks start on Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Period {
    #[default]
    Today,
    ThisWeek,
    LastWeek,
    ThisMonth,
}

/// Inclusive bounds; `end == None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindow {
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
}

impl PeriodWindow {
    pub fn contains(&self, moment: NaiveDateTime) -> bool {
        moment >= self.start && self.end.map_or(true, |end| moment <= end)
    }
}

impl Period {
    pub const ALL: [Period; 4] = [Period::Today, Period::ThisWeek, Period::LastWeek, Period::ThisMonth];

    pub fn label(self) -> &'static str {
        match self {
            Period::Today => "Today",
            Period::ThisWeek => "This week",
            Period::LastWeek => "Last week",
            Period::ThisMonth => "This month",
        }
    }

    /// Window relative to `now`, in local wall-clock time.
    pub fn window(self, now: NaiveDateTime) -> PeriodWindow {
        let today = now.date();
        let week_start = today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
        match self {
            Period::Today => PeriodWindow {
                start: midnight(today),
                end: None,
            },
            Period::ThisWeek => PeriodWindow {
                start: midnight(week_start),
                end: None,
            },
            Period::LastWeek => PeriodWindow {
                start: midnight(week_start - Duration::days(7)),
                end: Some(midnight(week_start) - Duration::milliseconds(1)),
            },
            Period::ThisMonth => PeriodWindow {
                start: midnight(today - Duration::days(i64::from(today.day0()))),
                end: None,
            },
        }
    }
}

pub(crate) fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}
