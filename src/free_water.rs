use crate::error::{QdwbError, Result};
use std::fmt;
use std::str::FromStr;

/// Radiation-based free-water evaporation formulas (equations 8 and 9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadiationMethod {
    Jensen,
    Stuart,
}

/// Mass-transfer free-water evaporation formulas (equations 4 and 5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindMethod {
    Harbeck,
    Shuttleworth,
}

impl RadiationMethod {
    /// Evaporation from a free water surface [mm/day].
    ///
    /// `rs` is solar or shortwave radiation [MJ/m²/day] and `tmean` the mean
    /// daily air temperature [°C].
    pub fn evaporation(self, rs: f64, tmean: f64) -> f64 {
        match self {
            RadiationMethod::Jensen => 0.03523 * rs * (0.014 * tmean - 0.37),
            RadiationMethod::Stuart => 0.03495 * rs * (0.0082 * tmean - 0.19),
        }
    }
}

impl WindMethod {
    /// Evaporation from a lake or reservoir surface [mm/day].
    ///
    /// # Parameters
    ///
    /// - `water_area`: Water surface area of the lake or reservoir [m²].
    /// - `wind_2m`: Wind speed 2 m above the surface [m/s].
    /// - `e_s`: Saturation vapor pressure [kPa].
    /// - `e_a`: Actual vapor pressure [kPa].
    pub fn evaporation(self, water_area: f64, wind_2m: f64, e_s: f64, e_a: f64) -> f64 {
        let deficit = e_s - e_a;
        match self {
            WindMethod::Harbeck => 2.909 * water_area.powf(-0.05) * wind_2m * deficit,
            WindMethod::Shuttleworth => 3.623 * water_area.powf(-0.066) * wind_2m * deficit,
        }
    }
}

impl FromStr for RadiationMethod {
    type Err = QdwbError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Jensen" => Ok(RadiationMethod::Jensen),
            "Stuart" => Ok(RadiationMethod::Stuart),
            _ => Err(QdwbError::UnknownMethod {
                family: "radiation",
                method: s.to_string(),
            }),
        }
    }
}

impl FromStr for WindMethod {
    type Err = QdwbError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Harbeck" => Ok(WindMethod::Harbeck),
            "Shuttleworth" => Ok(WindMethod::Shuttleworth),
            _ => Err(QdwbError::UnknownMethod {
                family: "wind and vapor pressure",
                method: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for RadiationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RadiationMethod::Jensen => f.write_str("Jensen"),
            RadiationMethod::Stuart => f.write_str("Stuart"),
        }
    }
}

impl fmt::Display for WindMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindMethod::Harbeck => f.write_str("Harbeck"),
            WindMethod::Shuttleworth => f.write_str("Shuttleworth"),
        }
    }
}

/// Free-water evaporation from radiation, selecting the formula by its exact name.
///
/// Returns `UnknownMethod` for anything other than `"Jensen"` or `"Stuart"`.
pub fn evaporation_by_radiation(rs: f64, method: &str, tmean: f64) -> Result<f64> {
    Ok(method.parse::<RadiationMethod>()?.evaporation(rs, tmean))
}

/// Free-water evaporation from the energy balance (equation 7) [mm/day].
///
/// # Parameters
///
/// - `delta`: Slope of the vapor pressure curve [kPa/°C].
/// - `gamma`: Psychrometric constant [kPa/°C].
/// - `rs`: Solar or shortwave radiation [MJ/m²/day].
/// - `latent_heat`: Latent heat of vaporization.
pub fn evaporation_by_energy_balance(delta: f64, gamma: f64, rs: f64, latent_heat: f64) -> f64 {
    52.6 * (delta / (delta + gamma)) * (rs / latent_heat) - 0.12
}

/// Free-water evaporation from wind speed and vapor pressure deficit, selecting
/// the formula by its exact name.
///
/// Returns `UnknownMethod` for anything other than `"Harbeck"` or `"Shuttleworth"`.
pub fn evaporation_by_wind_and_vapor_pressure(
    method: &str,
    water_area: f64,
    wind_2m: f64,
    e_s: f64,
    e_a: f64,
) -> Result<f64> {
    Ok(method
        .parse::<WindMethod>()?
        .evaporation(water_area, wind_2m, e_s, e_a))
}

// Inputs for every free-water formula, for callers that evaluate all of them for one water body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeWaterEvaporation {
    pub rs: f64,          // Solar or shortwave radiation [MJ/m²/day]
    pub tmean: f64,       // Mean daily temperature [°C]
    pub delta: f64,       // Slope of the vapor pressure curve [kPa/°C]
    pub gamma: f64,       // Psychrometric constant [kPa/°C]
    pub latent_heat: f64, // Latent heat of vaporization
    pub water_area: f64,  // Lake or reservoir surface area [m²]
    pub wind_2m: f64,     // Wind speed at 2 m [m/s]
    pub e_s: f64,         // Saturation vapor pressure [kPa]
    pub e_a: f64,         // Actual vapor pressure [kPa]
}

impl FreeWaterEvaporation {
    pub fn by_radiation(&self, method: RadiationMethod) -> f64 {
        method.evaporation(self.rs, self.tmean)
    }

    pub fn by_energy_balance(&self) -> f64 {
        evaporation_by_energy_balance(self.delta, self.gamma, self.rs, self.latent_heat)
    }

    pub fn by_wind_and_vapor_pressure(&self, method: WindMethod) -> f64 {
        method.evaporation(self.water_area, self.wind_2m, self.e_s, self.e_a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_evaporation_by_radiation_jensen() {
        // 0.03523 * 100 * (0.28 - 0.37)
        let e = evaporation_by_radiation(100.0, "Jensen", 20.0).unwrap();
        assert_relative_eq!(e, -0.31707, epsilon = 1e-9);
        assert_relative_eq!(e, 0.03523 * 100.0 * (0.014 * 20.0 - 0.37), epsilon = 1e-12);
    }

    #[test]
    fn test_evaporation_by_radiation_stuart() {
        // 0.03495 * 20 * (0.0082 * 30 - 0.19) = 0.699 * 0.056
        let e = evaporation_by_radiation(20.0, "Stuart", 30.0).unwrap();
        assert_relative_eq!(e, 0.039144, epsilon = 1e-9);
    }

    #[test]
    fn test_evaporation_by_radiation_unknown_method() {
        for name in ["Penman", "jensen", " Jensen", ""] {
            let err = evaporation_by_radiation(20.0, name, 30.0).unwrap_err();
            assert!(matches!(err, QdwbError::UnknownMethod { family: "radiation", .. }));
        }
        // Wind formulas are not accepted by the radiation family.
        assert!(evaporation_by_radiation(20.0, "Harbeck", 30.0).is_err());
    }

    #[test]
    fn test_evaporation_by_energy_balance() {
        // 52.6 * 0.5 * (10 / 2.45) - 0.12
        let e = evaporation_by_energy_balance(0.1, 0.1, 10.0, 2.45);
        assert_relative_eq!(e, 52.6 * 0.5 * (10.0 / 2.45) - 0.12, epsilon = 1e-12);
        assert_relative_eq!(e, 107.2269387755102, epsilon = 1e-9);
    }

    #[test]
    fn test_evaporation_by_wind_and_vapor_pressure() {
        let harbeck = evaporation_by_wind_and_vapor_pressure("Harbeck", 1.0, 2.0, 3.0, 1.0).unwrap();
        assert_relative_eq!(harbeck, 2.909 * 2.0 * 2.0, epsilon = 1e-12);

        let shuttleworth =
            evaporation_by_wind_and_vapor_pressure("Shuttleworth", 1.0e6, 3.0, 2.5, 1.5).unwrap();
        assert_relative_eq!(
            shuttleworth,
            3.623 * 1.0e6_f64.powf(-0.066) * 3.0 * 1.0,
            epsilon = 1e-12
        );

        assert!(matches!(
            evaporation_by_wind_and_vapor_pressure("Stuart", 1.0, 2.0, 3.0, 1.0),
            Err(QdwbError::UnknownMethod { .. })
        ));
    }

    #[test]
    fn test_method_names_round_trip_through_display() {
        assert_eq!(RadiationMethod::Stuart.to_string(), "Stuart");
        assert_eq!("Shuttleworth".parse::<WindMethod>().unwrap(), WindMethod::Shuttleworth);
    }

    #[test]
    fn test_free_water_evaporation_bundle() {
        let fw = FreeWaterEvaporation {
            rs: 100.0,
            tmean: 20.0,
            delta: 0.1,
            gamma: 0.1,
            latent_heat: 2.45,
            water_area: 1.0,
            wind_2m: 2.0,
            e_s: 3.0,
            e_a: 1.0,
        };
        assert_eq!(
            fw.by_radiation(RadiationMethod::Jensen),
            evaporation_by_radiation(100.0, "Jensen", 20.0).unwrap()
        );
        assert_eq!(fw.by_energy_balance(), evaporation_by_energy_balance(0.1, 0.1, 100.0, 2.45));
        assert_relative_eq!(fw.by_wind_and_vapor_pressure(WindMethod::Harbeck), 11.636, epsilon = 1e-9);
    }
}
