/// Kc threshold below which the mid/end correction may be skipped under standard climate.
pub const KC_CORRECTION_THRESHOLD: f64 = 0.45;

/// Wind speed at 2 m of the FAO-56 standard sub-humid climate [m/s].
pub const STANDARD_WIND_SPEED: f64 = 2.0;

/// Minimum relative humidity of the FAO-56 standard sub-humid climate [%].
pub const STANDARD_RH_MIN: f64 = 45.0;

/// Corrects the tabulated mid-season and end-of-season crop coefficients for local
/// wind speed and minimum relative humidity (FAO-56 equation 70).
///
/// Each coefficient is corrected independently. A coefficient is left untouched only when it
/// is below 0.45 and the climate is exactly the standard one (`wind_2m == 2`, `rh_min == 45`).
///
/// # Parameters
///
/// - `kc_mid`: Tabulated mid-season Kc (FAO-56 table 12).
/// - `kc_end`: Tabulated end-of-season Kc (FAO-56 table 12).
/// - `rh_min`: Mean daily minimum relative humidity during the stage, in percentage.
/// - `max_crop_height`: Mean maximum crop height during the stage in meters.
/// - `wind_2m`: Mean daily wind speed at 2 m in m/s.
///
/// # Returns
///
/// The corrected `(kc_mid, kc_end)` pair.
pub fn correct_crop_coefficients(
    kc_mid: f64,
    kc_end: f64,
    rh_min: f64,
    max_crop_height: f64,
    wind_2m: f64,
) -> (f64, f64) {
    let adjustment = climate_adjustment(wind_2m, rh_min, max_crop_height);
    let standard_climate = wind_2m == STANDARD_WIND_SPEED && rh_min == STANDARD_RH_MIN;

    let correct = |kc: f64| {
        if kc < KC_CORRECTION_THRESHOLD && standard_climate {
            kc
        } else {
            kc + adjustment
        }
    };

    (correct(kc_mid), correct(kc_end))
}

pub(crate) fn climate_adjustment(wind_2m: f64, rh_min: f64, crop_height: f64) -> f64 {
    let term1 = 0.04 * (wind_2m - STANDARD_WIND_SPEED);
    let term2 = 0.004 * (rh_min - STANDARD_RH_MIN);
    (term1 - term2) * (crop_height / 3.0).powf(0.3)
}
