//! # Tapered Face Calculation
//!
//! Lays out panels on a face whose horizontal run changes linearly from one
//! end of the eave to the other. This approximates the triangular or
//! trapezoidal faces next to hips and valleys: sheets get shorter (or longer)
//! across the face instead of all sharing one length.
//!
//! The sheet-count logic is identical to the uniform face; only the per-panel
//! run varies, interpolated at each panel's centre-line eave position.

use serde::{Deserialize, Serialize};

use crate::calculations::face::{slope_length, validate_finite};
use crate::calculations::material_list::{MaterialList, Panel};
use crate::errors::{RoofError, RoofResult};

/// Input parameters for a tapered roof face.
///
/// Same fields as [`FaceInput`](crate::calculations::face::FaceInput), except
/// the single `run` is replaced by `start_run` and `end_run` at the two ends
/// of the eave.
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "Tapered",
///   "eave_length": 20.0,
///   "start_run": 10.0,
///   "end_run": 4.0,
///   "slope_deg": 30.0,
///   "sheet_width": 2.0,
///   "sheet_overlap": 0.0,
///   "ridge_gap": 0.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaperedFaceInput {
    /// Face label; None for an unlabeled calculation
    pub name: Option<String>,

    /// Plan length along the eave, > 0
    pub eave_length: f64,

    /// Horizontal run at the start end of the eave, >= 0
    pub start_run: f64,

    /// Horizontal run at the end end of the eave, >= 0
    pub end_run: f64,

    /// Roof pitch in degrees, within (0, 89)
    pub slope_deg: f64,

    /// Nominal sheet width, > 0
    pub sheet_width: f64,

    /// Width consumed by adjacent-sheet overlap, 0 <= overlap < sheet_width
    pub sheet_overlap: f64,

    /// Length subtracted near the ridge, applied equally across the taper
    pub ridge_gap: f64,
}

impl TaperedFaceInput {
    /// Validate input parameters. Eager, like the uniform face.
    pub fn validate(&self) -> RoofResult<()> {
        validate_finite("eave_length", self.eave_length)?;
        validate_finite("start_run", self.start_run)?;
        validate_finite("end_run", self.end_run)?;
        validate_finite("slope_deg", self.slope_deg)?;
        validate_finite("sheet_width", self.sheet_width)?;
        validate_finite("sheet_overlap", self.sheet_overlap)?;
        validate_finite("ridge_gap", self.ridge_gap)?;

        if self.sheet_width <= 0.0 {
            return Err(RoofError::invalid_input(
                "sheet_width",
                self.sheet_width.to_string(),
                "Sheet width must be greater than zero",
            ));
        }
        if self.eave_length <= 0.0 {
            return Err(RoofError::invalid_input(
                "eave_length",
                self.eave_length.to_string(),
                "Eave length must be greater than zero",
            ));
        }
        if self.sheet_overlap < 0.0 {
            return Err(RoofError::invalid_input(
                "sheet_overlap",
                self.sheet_overlap.to_string(),
                "Sheet overlap must be zero or positive",
            ));
        }
        if self.coverage() <= 0.0 {
            return Err(RoofError::invalid_input(
                "sheet_overlap",
                self.sheet_overlap.to_string(),
                "Sheet overlap must be less than sheet width",
            ));
        }
        if self.start_run < 0.0 {
            return Err(RoofError::invalid_input(
                "start_run",
                self.start_run.to_string(),
                "Run must be zero or positive",
            ));
        }
        if self.end_run < 0.0 {
            return Err(RoofError::invalid_input(
                "end_run",
                self.end_run.to_string(),
                "Run must be zero or positive",
            ));
        }
        if self.slope_deg <= 0.0 || self.slope_deg >= 89.0 {
            return Err(RoofError::invalid_input(
                "slope_deg",
                self.slope_deg.to_string(),
                "Slope angle must be between 0 and 89 degrees",
            ));
        }
        if self.ridge_gap < 0.0 {
            return Err(RoofError::invalid_input(
                "ridge_gap",
                self.ridge_gap.to_string(),
                "Ridge gap must be zero or positive",
            ));
        }
        Ok(())
    }

    /// Net eave-width contributed by one sheet after subtracting overlap.
    pub fn coverage(&self) -> f64 {
        self.sheet_width - self.sheet_overlap
    }

    /// Horizontal run at a normalized eave position `t` in [0, 1].
    fn run_at(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        self.start_run + t * (self.end_run - self.start_run)
    }
}

/// Lay out panels on a tapered face.
///
/// Each panel's horizontal run is interpolated between `start_run` and
/// `end_run` at the panel's centre-line eave position, then the ridge gap and
/// cosine projection apply exactly as in the uniform case.
///
/// # Example
///
/// ```rust
/// use roof_core::calculations::tapered::{TaperedFaceInput, calculate};
///
/// let input = TaperedFaceInput {
///     name: Some("Tapered".to_string()),
///     eave_length: 20.0,
///     start_run: 10.0,
///     end_run: 4.0,
///     slope_deg: 30.0,
///     sheet_width: 2.0,
///     sheet_overlap: 0.0,
///     ridge_gap: 0.0,
/// };
///
/// let materials = calculate(&input).unwrap();
/// assert_eq!(materials.total_sheets(), 10);
/// // Sheets get shorter toward the end with the smaller run
/// assert!(materials.panels[0].sheet_length > materials.panels[9].sheet_length);
/// ```
pub fn calculate(input: &TaperedFaceInput) -> RoofResult<MaterialList> {
    input.validate()?;

    let coverage = input.coverage();
    let sheet_count = (input.eave_length / coverage).ceil() as usize;

    let panels = (0..sheet_count)
        .map(|i| {
            let eave_position = coverage * (i as f64 + 0.5);
            let run = input.run_at(eave_position / input.eave_length);
            Panel {
                index: i as u32 + 1,
                effective_width: coverage,
                sheet_length: slope_length(run, input.ridge_gap, input.slope_deg),
                eave_position,
                face: input.name.clone(),
            }
        })
        .collect();

    Ok(MaterialList { panels })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_taper() -> TaperedFaceInput {
        TaperedFaceInput {
            name: Some("Tapered".to_string()),
            eave_length: 20.0,
            start_run: 10.0,
            end_run: 4.0,
            slope_deg: 30.0,
            sheet_width: 2.0,
            sheet_overlap: 0.0,
            ridge_gap: 0.0,
        }
    }

    #[test]
    fn test_sheet_count_matches_uniform_logic() {
        let materials = calculate(&test_taper()).unwrap();
        // coverage = 2, ceil(20 / 2) = 10
        assert_eq!(materials.total_sheets(), 10);
    }

    #[test]
    fn test_end_panel_lengths() {
        let materials = calculate(&test_taper()).unwrap();
        let cos30 = 30.0_f64.to_radians().cos();

        // First panel centre at t = 1/20 = 0.05: run = 10 + 0.05*(-6) = 9.7
        let first = &materials.panels[0];
        assert!((first.sheet_length - 9.7 / cos30).abs() < 1e-9);

        // Last panel centre at t = 19/20 = 0.95: run = 10 + 0.95*(-6) = 4.3
        let last = &materials.panels[9];
        assert!((last.sheet_length - 4.3 / cos30).abs() < 1e-9);
    }

    #[test]
    fn test_lengths_strictly_decreasing() {
        let materials = calculate(&test_taper()).unwrap();
        for pair in materials.panels.windows(2) {
            assert!(pair[0].sheet_length > pair[1].sheet_length);
        }
    }

    #[test]
    fn test_equal_runs_behave_like_uniform_face() {
        let mut taper = test_taper();
        taper.end_run = taper.start_run;
        let materials = calculate(&taper).unwrap();

        let cos30 = 30.0_f64.to_radians().cos();
        for p in &materials.panels {
            assert!((p.sheet_length - 10.0 / cos30).abs() < 1e-9);
        }
    }

    #[test]
    fn test_ridge_gap_floors_at_zero() {
        let mut taper = test_taper();
        taper.ridge_gap = 5.0;
        let materials = calculate(&taper).unwrap();

        // Panels near the shallow end have run < ridge gap: zero length
        let last = materials.panels.last().unwrap();
        assert_eq!(last.sheet_length, 0.0);

        // Panels near the deep end stay positive
        assert!(materials.panels[0].sheet_length > 0.0);
    }

    #[test]
    fn test_coverage_zero_fails() {
        let mut taper = test_taper();
        taper.sheet_overlap = taper.sheet_width;
        assert!(calculate(&taper).is_err());
    }

    #[test]
    fn test_negative_run_fails() {
        let mut taper = test_taper();
        taper.end_run = -1.0;
        assert!(calculate(&taper).is_err());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let taper = test_taper();
        let json = serde_json::to_string_pretty(&taper).unwrap();
        let roundtrip: TaperedFaceInput = serde_json::from_str(&json).unwrap();
        assert_eq!(taper, roundtrip);
    }
}
