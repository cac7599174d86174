use crate::check::check_maximum_temperature;
use crate::error::Result;

/// Degree-day factor for snow melt [mm/day/°C].
pub const DEGREE_DAY_FACTOR: f64 = 1.5;

/// Classifies the day's precipitation as snow (`true`) or rain (`false`).
///
/// Precipitation is snow when `tmean - (tmax - tmin) / 3 <= 0`, following
/// equation 1-2 of SWB version 2.0.
///
/// # Parameters
///
/// - `tmax`: Maximum daily air temperature [°C].
/// - `tmin`: Minimum daily air temperature [°C].
/// - `tmean`: Mean daily air temperature [°C].
pub fn classify_precipitation_phase(tmax: f64, tmin: f64, tmean: f64) -> bool {
    tmean - (tmax - tmin) / 3.0 <= 0.0
}

/// Snow melt rate from the daily maximum temperature (SWB 2.0 equation 1-3).
///
/// Returns the melt rate in mm/day, or `InvalidInput` when `tmax` fails the
/// maximum temperature check.
pub fn snow_melt_rate(tmax: f64) -> Result<f64> {
    check_maximum_temperature(tmax)?;
    Ok(DEGREE_DAY_FACTOR * tmax)
}

/// Evaporation (sublimation) from snow and ice surfaces [mm/day].
///
/// # Parameters
///
/// - `wind_speed_10m`: Mean daily wind speed 10 m above the snow surface [m/s].
/// - `e_snow_surface`: Saturated vapor pressure at the snow surface temperature [kPa].
/// - `e_2m`: Vapor pressure 2 m above the snow surface [kPa].
pub fn sublimation_snow_ice(wind_speed_10m: f64, e_snow_surface: f64, e_2m: f64) -> f64 {
    (0.18 + 0.98 * wind_speed_10m) * (e_snow_surface - e_2m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QdwbError;
    use approx::assert_relative_eq;

    #[test]
    fn test_classify_precipitation_phase() {
        // 2 - (6 - 0) / 3 = 0, the boundary is snow
        assert!(classify_precipitation_phase(6.0, 0.0, 2.0));
        assert!(classify_precipitation_phase(1.0, -8.0, -3.5));
        assert!(!classify_precipitation_phase(18.0, 6.0, 12.0));
        assert!(!classify_precipitation_phase(6.0, 0.0, 2.000001));
    }

    #[test]
    fn test_snow_melt_rate() {
        assert_eq!(snow_melt_rate(0.0).unwrap(), 0.0);
        assert_relative_eq!(snow_melt_rate(10.0).unwrap(), 15.0);
        assert_relative_eq!(snow_melt_rate(-4.0).unwrap(), -6.0);
        assert!(snow_melt_rate(11.0).unwrap() > snow_melt_rate(10.0).unwrap());
    }

    #[test]
    fn test_snow_melt_rate_rejects_implausible_tmax() {
        assert!(matches!(
            snow_melt_rate(75.0),
            Err(QdwbError::InvalidInput { name: "tmax", .. })
        ));
        assert!(snow_melt_rate(f64::INFINITY).is_err());
    }

    #[test]
    fn test_sublimation_snow_ice() {
        // (0.18 + 0.98 * 3) * (0.61 - 0.4) = 3.12 * 0.21
        assert_relative_eq!(sublimation_snow_ice(3.0, 0.61, 0.4), 0.6552, epsilon = 1e-12);
        assert_eq!(sublimation_snow_ice(5.0, 0.5, 0.5), 0.0);
    }
}
