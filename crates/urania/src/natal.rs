//! Birth moment and planetary hour.
//!
//! The day (sunrise to sunset) and the night (sunset to next sunrise) are each
//! split into twelve unequal hours. The hour of birth selects a ruler from the
//! day or night sequence of the birth weekday.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Hour of birth within the day or night, 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanetaryHour {
    pub hour: u8,
    pub diurnal: bool,
}

/// Everything the ruler rules need to know about the birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NatalMoment {
    pub weekday: Weekday,
    pub year: i32,
    pub hour: PlanetaryHour,
}

impl NatalMoment {
    pub fn new(date: NaiveDate, hour: PlanetaryHour) -> Self {
        Self {
            weekday: date.weekday(),
            year: date.year(),
            hour,
        }
    }

    /// Derives the planetary hour from clock times of birth, sunrise and sunset.
    pub fn from_clock(
        date: NaiveDate,
        birth: NaiveTime,
        sunrise: NaiveTime,
        sunset: NaiveTime,
    ) -> Option<Self> {
        planetary_hour(birth, sunrise, sunset).map(|hour| Self::new(date, hour))
    }
}

fn minutes_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Planetary hour of `birth`; `None` when sunrise is not before sunset.
pub fn planetary_hour(
    birth: NaiveTime,
    sunrise: NaiveTime,
    sunset: NaiveTime,
) -> Option<PlanetaryHour> {
    let birth = minutes_of_day(birth);
    let sunrise = minutes_of_day(sunrise);
    let sunset = minutes_of_day(sunset);
    if sunrise >= sunset {
        return None;
    }

    let (elapsed, span, diurnal) = if birth < sunrise || birth >= sunset {
        let before_midnight = MINUTES_PER_DAY - sunset;
        let elapsed = if birth < sunrise {
            birth + before_midnight
        } else {
            birth - sunset
        };
        (elapsed, before_midnight + sunrise, false)
    } else {
        (birth - sunrise, sunset - sunrise, true)
    };

    let fraction = f64::from(elapsed) / f64::from(span) * 12.0;
    let hour = (fraction.floor() as u8).saturating_add(1).min(12);
    log::debug!(
        "{} birth: hour {hour} ({fraction:.2}), {elapsed}/{span} min",
        if diurnal { "day" } else { "night" }
    );
    Some(PlanetaryHour { hour, diurnal })
}
