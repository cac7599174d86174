mod check;
mod error;
mod free_water;
mod kc_adjust;
mod kcc_gs;
mod real_et;
mod snow;

pub use check::{check_date_for_crop_coefficient, check_maximum_temperature, parse_date};
pub use check::{MAX_AIR_TEMPERATURE, MIN_AIR_TEMPERATURE};
pub use error::{QdwbError, Result};
pub use free_water::evaporation_by_energy_balance;
pub use free_water::evaporation_by_radiation;
pub use free_water::evaporation_by_wind_and_vapor_pressure;
pub use free_water::{FreeWaterEvaporation, RadiationMethod, WindMethod};
pub use kc_adjust::correct_crop_coefficients;
pub use kc_adjust::{KC_CORRECTION_THRESHOLD, STANDARD_RH_MIN, STANDARD_WIND_SPEED};
pub use kcc_gs::{crop_coefficient_gs, crop_coefficient_on_date};
pub use kcc_gs::{Climate, CropCoefficientsGs, CropEntry, CropTable, GrowthStage};
pub use real_et::{available_evaporable_water_step, available_water, e_noncovered};
pub use real_et::{et_covered, et_total, evaporable_water_ratio, moisture_reduction_factor};
pub use real_et::{step_real_et, RealEtFluxes, RealEtInputs, StepState};
pub use snow::{classify_precipitation_phase, snow_melt_rate, sublimation_snow_ice};
pub use snow::DEGREE_DAY_FACTOR;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    // Day 2 must start from day 1's evaporable water, not from the initial value
    fn test_two_day_real_et_chain() {
        let et0 = 4.0;
        let crop_cover = 0.5;
        let aw = available_water(12.0, 32.0, 400.0);
        assert_relative_eq!(aw, 80.0);

        // Day 1
        let day1 = StepState::from_options(true, Some(5.0), None).unwrap();
        let ratio1 = evaporable_water_ratio(&day1, aw).unwrap();
        let e_nc1 = e_noncovered(ratio1, crop_cover, et0);
        let aew1 = available_evaporable_water_step(e_nc1, &day1, 10.0);
        // 0.5 * 10 + 5 - (0.5 * 4 * 5 / 80)
        assert_relative_eq!(aew1, 9.875, epsilon = 1e-12);

        // Day 2
        let day2 = StepState::from_options(false, None, Some(aew1)).unwrap();
        let ratio2 = evaporable_water_ratio(&day2, aw).unwrap();
        assert_relative_eq!(ratio2, aew1 / aw, epsilon = 1e-12);
        let e_nc2 = e_noncovered(ratio2, crop_cover, et0);
        let aew2 = available_evaporable_water_step(e_nc2, &day2, 0.0);
        assert_relative_eq!(aew2, aew1 - e_nc2, epsilon = 1e-12);
        assert!((aew2 - (5.0 - e_nc2)).abs() > 1.0);

        let f = moisture_reduction_factor(100.0, 12.0, 32.0, 400.0).unwrap();
        let total = et_total(e_nc2, et_covered(f, 1.0, crop_cover, et0));
        assert_relative_eq!(total, f * 0.5 * 4.0 + e_nc2, epsilon = 1e-12);
    }

    #[test]
    fn test_step_real_et_threads_state_across_days() {
        let inputs = RealEtInputs {
            et0: 4.0,
            kc: 1.0,
            crop_cover: 0.5,
            infiltration: 10.0,
            soil_wetness_prev: 100.0,
            pwp_pct: 12.0,
            fc_pct: 32.0,
            soil_depth: 400.0,
        };

        let mut state = StepState::FirstStep { initial_value: 5.0 };
        let mut history = Vec::new();
        for _ in 0..3 {
            let (next, fluxes) = step_real_et(&inputs, &state).unwrap();
            history.push(fluxes);
            state = next;
        }

        assert_relative_eq!(history[0].available_evaporable_water, 9.875, epsilon = 1e-12);
        assert_relative_eq!(
            history[1].evaporable_water_ratio,
            history[0].available_evaporable_water / 80.0,
            epsilon = 1e-12
        );
        assert_eq!(state.carried_value(), history[2].available_evaporable_water);
    }

    #[test]
    fn test_bundled_fao56_table() {
        let table = CropTable::load(concat!(env!("CARGO_MANIFEST_DIR"), "/fao56.toml")).unwrap();
        assert!(table.names().contains(&"corn"));
        assert_eq!(table.climate().u2, 2.0);
        assert_eq!(table.climate().rh_min, 45.0);

        // Standard climate leaves corn's mid-season Kc as tabulated
        let corn = table.season("corn").unwrap();
        assert_eq!(corn.kc_mid(), 1.2);
        assert_eq!(corn.total_season_length(), 120);

        let kc = crop_coefficient_on_date(&corn, "2024-05-01", "2024-06-30").unwrap();
        assert_eq!(kc, 1.2);
    }

    #[test]
    fn test_standard_climate_constants_drive_the_skip_rule() {
        let (mid, end) = correct_crop_coefficients(
            0.4,
            KC_CORRECTION_THRESHOLD,
            STANDARD_RH_MIN,
            1.0,
            STANDARD_WIND_SPEED,
        );
        assert_eq!(mid, 0.4);
        assert_eq!(end, KC_CORRECTION_THRESHOLD);
    }

    #[test]
    fn test_snow_and_free_water_formulas_compose() {
        let is_snow = classify_precipitation_phase(1.0, -6.0, -2.0);
        assert!(is_snow);
        let melt = snow_melt_rate(1.0).unwrap();
        assert_relative_eq!(melt, DEGREE_DAY_FACTOR);

        let fw = FreeWaterEvaporation {
            rs: 18.0,
            tmean: 25.0,
            delta: 0.189,
            gamma: 0.066,
            latent_heat: 2.45,
            water_area: 5.0e5,
            wind_2m: 2.5,
            e_s: 3.17,
            e_a: 1.9,
        };
        assert_eq!(
            fw.by_radiation(RadiationMethod::Stuart),
            evaporation_by_radiation(18.0, "Stuart", 25.0).unwrap()
        );
        assert_eq!(
            fw.by_wind_and_vapor_pressure(WindMethod::Harbeck),
            evaporation_by_wind_and_vapor_pressure("Harbeck", 5.0e5, 2.5, 3.17, 1.9).unwrap()
        );
    }
}
