use crate::check::{check_date_for_crop_coefficient, parse_date};
use crate::error::{QdwbError, Result};
use crate::kc_adjust::correct_crop_coefficients;
use chrono::NaiveDate;
use log::{debug, trace};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

// Crop Coefficients GS struct to hold the FAO-56 stage coefficients of a crop and the length in days of each
// growth stage. The Kc curve is flat in the initial and mid-season stages and linear in the other two.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropCoefficientsGs {
    kc_ini: f64,
    kc_mid: f64,
    kc_end: f64,
    len_ini: u32,
    len_dev: u32,
    len_mid: u32,
    len_late: u32,
}

/// FAO-56 growth stage a day of the season falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthStage {
    Initial,
    Development,
    MidSeason,
    LateSeason,
}

impl CropCoefficientsGs {
    /// Creates the growing-season description of a crop.
    ///
    /// # Parameters
    ///
    /// - `kc_ini`, `kc_mid`, `kc_end`: Crop coefficients of the initial, mid-season and end of the late
    ///   season (FAO-56 table 12), possibly corrected with [`correct_crop_coefficients`].
    /// - `len_ini`, `len_dev`, `len_mid`, `len_late`: Length in days of each stage (FAO-56 table 11).
    ///
    /// # Returns
    ///
    /// `InvalidInput` if any Kc is not finite, negative, or exceeds 2, or if the stage lengths add up
    /// to more than `u32::MAX` days.
    pub fn new(
        kc_ini: f64,
        kc_mid: f64,
        kc_end: f64,
        len_ini: u32,
        len_dev: u32,
        len_mid: u32,
        len_late: u32,
    ) -> Result<CropCoefficientsGs> {
        for (name, kc) in [("kc_ini", kc_ini), ("kc_mid", kc_mid), ("kc_end", kc_end)] {
            if !kc.is_finite() || !(0.0..=2.0).contains(&kc) {
                return Err(QdwbError::invalid_input(name, kc, "Kc must be between 0 and 2"));
            }
        }

        let season_length = len_ini
            .checked_add(len_dev)
            .and_then(|days| days.checked_add(len_mid))
            .and_then(|days| days.checked_add(len_late));
        if season_length.is_none() {
            return Err(QdwbError::invalid_input(
                "growth_stages_days",
                format!("{:?}", [len_ini, len_dev, len_mid, len_late]),
                "total season length overflows",
            ));
        }

        Ok(CropCoefficientsGs {
            kc_ini,
            kc_mid,
            kc_end,
            len_ini,
            len_dev,
            len_mid,
            len_late,
        })
    }

    pub fn kc_ini(&self) -> f64 {
        self.kc_ini
    }

    pub fn kc_mid(&self) -> f64 {
        self.kc_mid
    }

    pub fn kc_end(&self) -> f64 {
        self.kc_end
    }

    /// Sum of the four stage lengths in days.
    pub fn total_season_length(&self) -> u32 {
        self.len_ini + self.len_dev + self.len_mid + self.len_late
    }

    /// Stage of day `n_day` since planting, or `None` outside `0..=total_season_length()`.
    pub fn growth_stage(&self, n_day: i64) -> Option<GrowthStage> {
        let end_ini = i64::from(self.len_ini);
        let end_dev = end_ini + i64::from(self.len_dev);
        let end_mid = end_dev + i64::from(self.len_mid);
        let end_late = end_mid + i64::from(self.len_late);

        match n_day {
            n if n < 0 => None,
            n if n <= end_ini => Some(GrowthStage::Initial),
            n if n <= end_dev => Some(GrowthStage::Development),
            n if n <= end_mid => Some(GrowthStage::MidSeason),
            n if n <= end_late => Some(GrowthStage::LateSeason),
            _ => None,
        }
    }
}

/// Calculates the crop coefficient (Kc) on `modeling_date` for a crop planted on `plant_date`
/// (FAO-56 equation 66).
///
/// # Parameters
///
/// - `cc`: The crop's stage coefficients and stage lengths.
/// - `plant_date`: A `NaiveDate` for the planting date, which starts the initial stage.
/// - `modeling_date`: A `NaiveDate` for the day the Kc is requested for.
///
/// # Returns
///
/// The Kc of the day, or `InvalidDateRange` if `modeling_date` precedes `plant_date` or lies
/// beyond the last day of the late season.
pub fn crop_coefficient_gs(
    cc: &CropCoefficientsGs,
    plant_date: NaiveDate,
    modeling_date: NaiveDate,
) -> Result<f64> {
    let n_day = modeling_date.signed_duration_since(plant_date).num_days();
    let season_length = cc.total_season_length();
    check_date_for_crop_coefficient(plant_date, modeling_date, n_day, season_length)?;

    let out_of_range = || QdwbError::InvalidDateRange {
        plant_date: plant_date.to_string(),
        modeling_date: modeling_date.to_string(),
        n_day,
        season_length,
    };
    let stage = cc.growth_stage(n_day).ok_or_else(out_of_range)?;
    trace!("crop coefficient on day {n_day} of {season_length}: {stage:?}");

    let kc = match stage {
        GrowthStage::Initial => cc.kc_ini,
        GrowthStage::Development => {
            // Interpolation between the initial and mid-season coefficients
            let fraction = (n_day - i64::from(cc.len_ini)) as f64 / f64::from(cc.len_dev);
            cc.kc_ini + fraction * (cc.kc_mid - cc.kc_ini)
        }
        GrowthStage::MidSeason => cc.kc_mid,
        GrowthStage::LateSeason => {
            // Interpolation between the mid-season and end coefficients
            let days_into_late = n_day - i64::from(cc.len_ini + cc.len_dev + cc.len_mid);
            let fraction = days_into_late as f64 / f64::from(cc.len_late);
            cc.kc_mid + fraction * (cc.kc_end - cc.kc_mid)
        }
    };

    Ok(kc)
}

/// Same as [`crop_coefficient_gs`] with both dates given as `YYYY-MM-DD` literals.
pub fn crop_coefficient_on_date(
    cc: &CropCoefficientsGs,
    plant_date: &str,
    modeling_date: &str,
) -> Result<f64> {
    let plant_date = parse_date("plant_date", plant_date)?;
    let modeling_date = parse_date("modeling_date", modeling_date)?;
    crop_coefficient_gs(cc, plant_date, modeling_date)
}

// Define the CropEntry struct for individual crop data
#[derive(Debug, Clone, Deserialize)]
pub struct CropEntry {
    pub name: String,
    pub k_ini: f64,                   // Initial stage coefficient
    pub k_mid: f64,                   // Mid-season coefficient
    pub k_end: f64,                   // Late-season coefficient
    pub height_m: f64,                // Maximum crop height in meters
    pub growth_stages_days: Vec<u32>, // Growth stages in days [initial, dev, mid, late]
}

// Define the Climate struct for the site the table is corrected for
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Climate {
    pub u2: f64,     // Wind speed at 2m height (m/s)
    pub rh_min: f64, // Minimum relative humidity (%)
}

/// FAO-56 crop parameters and site climate, deserialized from a TOML table.
#[derive(Debug, Clone, Deserialize)]
pub struct CropTable {
    crops: HashMap<String, CropEntry>,
    climate: Climate,
}

impl CropTable {
    pub fn from_toml_str(toml_str: &str) -> Result<CropTable> {
        let table: CropTable = toml::from_str(toml_str).map_err(|e| QdwbError::Config {
            message: e.to_string(),
        })?;

        for (key, crop) in &table.crops {
            if crop.growth_stages_days.len() != 4 {
                return Err(QdwbError::invalid_input(
                    "growth_stages_days",
                    format!("{:?}", crop.growth_stages_days),
                    format!("crop `{key}` must list exactly 4 stage lengths"),
                ));
            }
        }

        Ok(table)
    }

    /// Reads and parses a crop table such as the bundled `fao56.toml`.
    pub fn load(path: impl AsRef<Path>) -> Result<CropTable> {
        let path = path.as_ref();
        let toml_str = fs::read_to_string(path).map_err(|source| QdwbError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = CropTable::from_toml_str(&toml_str)?;
        debug!("loaded {} crops from {}", table.crops.len(), path.display());
        Ok(table)
    }

    pub fn climate(&self) -> Climate {
        self.climate
    }

    pub fn crop(&self, name: &str) -> Option<&CropEntry> {
        self.crops.get(name)
    }

    /// Crop keys in alphabetical order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.crops.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Growing season of `name` with mid and end Kc corrected for the table's climate.
    pub fn season(&self, name: &str) -> Result<CropCoefficientsGs> {
        let crop = self
            .crop(name)
            .ok_or_else(|| QdwbError::invalid_input("crop", name, "not present in the crop table"))?;

        let (kc_mid, kc_end) = correct_crop_coefficients(
            crop.k_mid,
            crop.k_end,
            self.climate.rh_min,
            crop.height_m,
            self.climate.u2,
        );
        let [len_ini, len_dev, len_mid, len_late] = crop.growth_stages_days[..] else {
            return Err(QdwbError::invalid_input(
                "growth_stages_days",
                format!("{:?}", crop.growth_stages_days),
                format!("crop `{name}` must list exactly 4 stage lengths"),
            ));
        };

        CropCoefficientsGs::new(crop.k_ini, kc_mid, kc_end, len_ini, len_dev, len_mid, len_late)
    }
}
