//! Input checks run ahead of the formulas they guard.
//!
//! Every check returns before any arithmetic happens, so a formula never
//! computes on a value that is later rejected.

use crate::error::{QdwbError, Result};
use chrono::NaiveDate;

/// Lowest daily air temperature accepted by the snow formulas [°C].
pub const MIN_AIR_TEMPERATURE: f64 = -90.0;

/// Highest daily air temperature accepted by the snow formulas [°C].
pub const MAX_AIR_TEMPERATURE: f64 = 60.0;

/// Rejects a daily maximum temperature that is not finite or falls outside
/// [`MIN_AIR_TEMPERATURE`, `MAX_AIR_TEMPERATURE`].
pub fn check_maximum_temperature(tmax: f64) -> Result<()> {
    if !tmax.is_finite() {
        return Err(QdwbError::invalid_input("tmax", tmax, "must be a finite number"));
    }
    if !(MIN_AIR_TEMPERATURE..=MAX_AIR_TEMPERATURE).contains(&tmax) {
        return Err(QdwbError::invalid_input(
            "tmax",
            tmax,
            format!("must be between {MIN_AIR_TEMPERATURE} and {MAX_AIR_TEMPERATURE} °C"),
        ));
    }
    Ok(())
}

/// Parses a `YYYY-MM-DD` date literal.
pub fn parse_date(name: &'static str, date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| QdwbError::invalid_input(name, date, format!("expected YYYY-MM-DD ({e})")))
}

/// Checks that `modeling_date` falls inside the season starting at `plant_date`.
///
/// `n_day` is the signed day offset between the two dates and `season_length`
/// the sum of all four stage lengths.
pub fn check_date_for_crop_coefficient(
    plant_date: NaiveDate,
    modeling_date: NaiveDate,
    n_day: i64,
    season_length: u32,
) -> Result<()> {
    if modeling_date < plant_date || n_day < 0 || n_day > i64::from(season_length) {
        return Err(QdwbError::InvalidDateRange {
            plant_date: plant_date.to_string(),
            modeling_date: modeling_date.to_string(),
            n_day,
            season_length,
        });
    }
    Ok(())
}
