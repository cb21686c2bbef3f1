// src/market_time.rs

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

pub enum MarketTimezone {
    Eastern,
    // Additional market timezones can be added here
}

impl MarketTimezone {
    // Returns the timezone corresponding to the market
    pub fn timezone(&self) -> Tz {
        match self {
            MarketTimezone::Eastern => chrono_tz::US::Eastern,
        }
    }

    /// Epoch seconds of local midnight on `date` in the market's timezone.
    pub fn day_start_timestamp(&self, date: NaiveDate) -> Option<i64> {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        self.timezone()
            .from_local_datetime(&midnight)
            .single()
            .map(|dt| dt.timestamp())
    }

    /// Renders an epoch-second stamp as a local minute stamp, e.g.
    /// `2024-03-15 09:30:00-04:00`.
    pub fn format_minute(&self, epoch_secs: i64) -> Option<String> {
        let utc: DateTime<Utc> = DateTime::from_timestamp(epoch_secs, 0)?;
        let local = utc.with_timezone(&self.timezone());
        Some(local.format("%Y-%m-%d %H:%M:%S%:z").to_string())
    }
}
