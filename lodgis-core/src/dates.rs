use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Longest bookable stay, in nights.
pub const MAX_STAY_NIGHTS: u32 = 365;

/// How far into the future a checkout date may lie, in days.
pub const MAX_HORIZON_DAYS: u64 = 730;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StayKind {
    Overnight,
    DayUse,
}

/// A normalized stay window. `end` is exclusive: the guest occupies the room
/// on every night in `[start, end)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StayWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub nights: u32,
}

impl StayWindow {
    pub fn iter_nights(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take(self.nights as usize)
    }
}

/// Validates and normalizes raw stay-window input. No side effects.
#[derive(Debug, Clone)]
pub struct DateRangeValidator {
    pub max_nights: u32,
    pub max_horizon_days: u64,
}

impl Default for DateRangeValidator {
    fn default() -> Self {
        Self {
            max_nights: MAX_STAY_NIGHTS,
            max_horizon_days: MAX_HORIZON_DAYS,
        }
    }
}

impl DateRangeValidator {
    pub fn validate_overnight(
        &self,
        check_in: Option<&str>,
        check_out: Option<&str>,
    ) -> EngineResult<StayWindow> {
        self.validate_overnight_at(Utc::now().date_naive(), check_in, check_out)
    }

    pub fn validate_day_use(&self, date: Option<&str>) -> EngineResult<StayWindow> {
        self.validate_day_use_at(Utc::now().date_naive(), date)
    }

    pub(crate) fn validate_overnight_at(
        &self,
        today: NaiveDate,
        check_in: Option<&str>,
        check_out: Option<&str>,
    ) -> EngineResult<StayWindow> {
        let start = parse_date(check_in, "check_in")?;
        let end = parse_date(check_out, "check_out")?;

        if end <= start {
            return Err(EngineError::validation(
                "check_out must be after check_in for overnight stays",
            ));
        }
        self.check_horizon(today, end)?;

        let nights = (end - start).num_days() as u32;
        if nights > self.max_nights {
            return Err(EngineError::Validation(format!(
                "stay of {} nights exceeds the {} night limit",
                nights, self.max_nights
            )));
        }

        Ok(StayWindow { start, end, nights })
    }

    /// Day-use collapses to a single-night window on the requested date.
    pub(crate) fn validate_day_use_at(
        &self,
        today: NaiveDate,
        date: Option<&str>,
    ) -> EngineResult<StayWindow> {
        let start = parse_date(date, "date")?;
        let end = start
            .checked_add_days(Days::new(1))
            .ok_or_else(|| EngineError::validation("date is out of calendar range"))?;
        self.check_horizon(today, end)?;

        Ok(StayWindow {
            start,
            end,
            nights: 1,
        })
    }

    fn check_horizon(&self, today: NaiveDate, end: NaiveDate) -> EngineResult<()> {
        let horizon = today
            .checked_add_days(Days::new(self.max_horizon_days))
            .ok_or_else(|| EngineError::validation("date is out of calendar range"))?;
        if end > horizon {
            return Err(EngineError::Validation(format!(
                "check_out {} is beyond the {} day booking horizon",
                end, self.max_horizon_days
            )));
        }
        Ok(())
    }
}

fn parse_date(raw: Option<&str>, field: &str) -> EngineResult<NaiveDate> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| EngineError::Validation(format!("{} is required", field)))?;

    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
        EngineError::Validation(format!("{} must be a valid YYYY-MM-DD date: {}", field, raw))
    })
}
