//! Actual (moisture-limited) evapotranspiration with the QDWB approach.
//!
//! Evapotranspiration is split between the crop-covered fraction of a cell, limited by the soil
//! moisture of the previous step, and the non-covered fraction, limited by the water left in the
//! evaporable surface layer. The evaporable water is the only quantity carried from one day to the
//! next, and it is carried by the caller through [`StepState`].

use crate::error::{QdwbError, Result};
use log::{debug, warn};

/// Available evaporable water carried into a time step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepState {
    /// First day of a run, seeded with an assumed initial value [mm].
    FirstStep { initial_value: f64 },
    /// Any later day, carrying the value computed on the previous day [mm].
    SubsequentStep { previous_value: f64 },
}

impl StepState {
    /// Builds the state from a first-step flag and the two optional values.
    ///
    /// Returns `MissingStateInput` when the value required by `is_first_step` is `None`.
    /// The other value is ignored.
    pub fn from_options(
        is_first_step: bool,
        initial_value: Option<f64>,
        previous_value: Option<f64>,
    ) -> Result<StepState> {
        if is_first_step {
            initial_value
                .map(|initial_value| StepState::FirstStep { initial_value })
                .ok_or(QdwbError::MissingStateInput {
                    name: "initial_available_evaporable_water",
                })
        } else {
            previous_value
                .map(|previous_value| StepState::SubsequentStep { previous_value })
                .ok_or(QdwbError::MissingStateInput {
                    name: "available_evaporable_water_in_previous_step",
                })
        }
    }

    pub fn is_first_step(&self) -> bool {
        matches!(self, StepState::FirstStep { .. })
    }

    /// The evaporable water this step starts from [mm].
    pub fn carried_value(&self) -> f64 {
        match *self {
            StepState::FirstStep { initial_value } => initial_value,
            StepState::SubsequentStep { previous_value } => previous_value,
        }
    }
}

/// Available evaporable water at the end of the step [mm].
///
/// `0.5 * infiltration + carried - e_noncovered`, where `carried` is the initial value on the
/// first step and the previous step's value afterwards.
pub fn available_evaporable_water_step(
    e_noncovered: f64,
    state: &StepState,
    infiltration: f64,
) -> f64 {
    0.5 * infiltration + state.carried_value() - e_noncovered
}

/// Available water between field capacity and wilting point [mm].
///
/// `pwp_pct` and `fc_pct` are volumetric percentages, `soil_depth` in mm.
pub fn available_water(pwp_pct: f64, fc_pct: f64, soil_depth: f64) -> f64 {
    (fc_pct * soil_depth - pwp_pct * soil_depth) / 100.0
}

/// Soil moisture reduction factor `f` from the previous step's soil wetness.
///
/// `(SW - PWP) / (FC - PWP)` with both bounds converted to mm over `soil_depth`. A soil whose
/// field capacity equals its wilting point has no range to scale over and returns `DivisionByZero`.
pub fn moisture_reduction_factor(
    soil_wetness_prev: f64,
    pwp_pct: f64,
    fc_pct: f64,
    soil_depth: f64,
) -> Result<f64> {
    let fc = fc_pct / 100.0 * soil_depth;
    let pwp = pwp_pct / 100.0 * soil_depth;
    let range = fc - pwp;
    if range == 0.0 {
        return Err(QdwbError::DivisionByZero {
            quantity: "field capacity minus wilting point",
        });
    }

    let f = (soil_wetness_prev - pwp) / range;
    if !(0.0..=1.0).contains(&f) {
        warn!("moisture reduction factor {f:.4} outside [0, 1] (soil wetness {soil_wetness_prev} mm)");
    }
    Ok(f)
}

/// Evapotranspiration of the crop-covered fraction [mm].
pub fn et_covered(moisture_reduction_factor: f64, kc: f64, crop_cover: f64, et0: f64) -> f64 {
    moisture_reduction_factor * kc * crop_cover * et0
}

/// Ratio of actual to total evaporable water.
///
/// The numerator is the state's carried value: the initial value on the first step, the available
/// evaporable water supplied by the caller afterwards. Returns `DivisionByZero` when
/// `available_water` is zero.
pub fn evaporable_water_ratio(state: &StepState, available_water: f64) -> Result<f64> {
    if available_water == 0.0 {
        return Err(QdwbError::DivisionByZero {
            quantity: "available water",
        });
    }
    Ok(state.carried_value() / available_water)
}

/// Evaporation from the non-covered fraction [mm].
pub fn e_noncovered(ratio: f64, crop_cover: f64, et0: f64) -> f64 {
    (1.0 - crop_cover) * et0 * ratio
}

/// Daily actual evapotranspiration [mm].
pub fn et_total(e_noncovered: f64, et_covered: f64) -> f64 {
    et_covered + e_noncovered
}

// Per-day inputs of the real evapotranspiration chain for one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RealEtInputs {
    pub et0: f64,               // Reference crop evapotranspiration [mm]
    pub kc: f64,                // Crop coefficient of the day [-]
    pub crop_cover: f64,        // Covered fraction of the cell [-]
    pub infiltration: f64,      // Infiltration [mm]
    pub soil_wetness_prev: f64, // Soil wetness of the previous step [mm]
    pub pwp_pct: f64,           // Permanent wilting point [% volumetric]
    pub fc_pct: f64,            // Field capacity [% volumetric]
    pub soil_depth: f64,        // Soil depth [mm]
}

/// Fluxes from a single real evapotranspiration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RealEtFluxes {
    pub available_water: f64,
    pub moisture_reduction_factor: f64,
    pub et_covered: f64,
    pub evaporable_water_ratio: f64,
    pub e_noncovered: f64,
    pub available_evaporable_water: f64,
    pub et_total: f64,
}

/// Execute one day of the real evapotranspiration chain.
///
/// Returns (state for the next day, fluxes). The next state is always `SubsequentStep`
/// carrying this day's available evaporable water.
pub fn step_real_et(inputs: &RealEtInputs, state: &StepState) -> Result<(StepState, RealEtFluxes)> {
    let aw = available_water(inputs.pwp_pct, inputs.fc_pct, inputs.soil_depth);
    let f = moisture_reduction_factor(
        inputs.soil_wetness_prev,
        inputs.pwp_pct,
        inputs.fc_pct,
        inputs.soil_depth,
    )?;
    let etc = et_covered(f, inputs.kc, inputs.crop_cover, inputs.et0);

    let ratio = evaporable_water_ratio(state, aw)?;
    let e_nc = e_noncovered(ratio, inputs.crop_cover, inputs.et0);

    let aew = available_evaporable_water_step(e_nc, state, inputs.infiltration);
    let total = et_total(e_nc, etc);

    let fluxes = RealEtFluxes {
        available_water: aw,
        moisture_reduction_factor: f,
        et_covered: etc,
        evaporable_water_ratio: ratio,
        e_noncovered: e_nc,
        available_evaporable_water: aew,
        et_total: total,
    };

    if state.is_first_step() {
        debug!("real ET leaves the first step with {aew:.3} mm evaporable water");
    }
    debug!("real ET step: {fluxes:?}");

    Ok((StepState::SubsequentStep { previous_value: aew }, fluxes))
}
