//! # Uniform Face Calculation
//!
//! Lays out sheeting panels on a single planar rectangular roof face.
//!
//! ## Assumptions
//!
//! - The face is a uniform rectangle: one horizontal run from eave to ridge,
//!   so every panel shares the same slope length
//! - The last sheet may overhang past the eave length; coverage is never
//!   under-provisioned, only over by less than one sheet width
//! - Slope angles at or above 89 degrees are rejected (the cosine projection
//!   blows up toward 90)
//!
//! ## Example (LLM-friendly)
//!
//! ```rust
//! use roof_core::calculations::face::{FaceInput, calculate};
//!
//! let input = FaceInput {
//!     name: Some("Front".to_string()),
//!     eave_length: 40.0,
//!     run: 15.0,
//!     slope_deg: 26.565,
//!     sheet_width: 3.0,
//!     sheet_overlap: 0.125,
//!     ridge_gap: 0.0,
//! };
//!
//! let materials = calculate(&input).unwrap();
//!
//! assert_eq!(materials.total_sheets(), 14);
//! println!("Sheet length: {:.3}", materials.panels[0].sheet_length);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::material_list::{MaterialList, Panel};
use crate::errors::{RoofError, RoofResult};

/// Input parameters for one uniform rectangular roof face.
///
/// All dimensions share one unit (metres or feet); the calculation is
/// unit-agnostic.
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "FrontLeft",
///   "eave_length": 40.0,
///   "run": 15.0,
///   "slope_deg": 26.565,
///   "sheet_width": 3.0,
///   "sheet_overlap": 0.125,
///   "ridge_gap": 0.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceInput {
    /// Face label (e.g. "FrontLeft", "Upper"); None for an unlabeled
    /// single-face calculation
    pub name: Option<String>,

    /// Plan length along the eave, > 0
    pub eave_length: f64,

    /// Horizontal distance from eave to ridge, >= 0
    pub run: f64,

    /// Roof pitch in degrees, within (0, 89)
    pub slope_deg: f64,

    /// Nominal sheet width, > 0
    pub sheet_width: f64,

    /// Width consumed by adjacent-sheet overlap, 0 <= overlap < sheet_width
    pub sheet_overlap: f64,

    /// Length subtracted near the ridge for flashing clearance, >= 0
    pub ridge_gap: f64,
}

impl FaceInput {
    /// Validate input parameters.
    ///
    /// Validation is eager: no panel is emitted once any field is out of
    /// range, so a failing face calculation is atomic.
    pub fn validate(&self) -> RoofResult<()> {
        validate_finite("eave_length", self.eave_length)?;
        validate_finite("run", self.run)?;
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
        if self.run < 0.0 {
            return Err(RoofError::invalid_input(
                "run",
                self.run.to_string(),
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

    /// Number of sheets needed to cover the eave length.
    ///
    /// Ceiling division: the last sheet may overhang past the eave length.
    pub fn sheet_count(&self) -> usize {
        (self.eave_length / self.coverage()).ceil() as usize
    }
}

/// Project a horizontal run onto the slope: `run / cos(angle)`.
///
/// The ridge gap is subtracted from the run and floored at zero first, so a
/// gap larger than the run yields a zero-length sheet rather than a negative
/// one.
pub(crate) fn slope_length(run: f64, ridge_gap: f64, slope_deg: f64) -> f64 {
    let horizontal_run = (run - ridge_gap).max(0.0);
    let angle_rad = slope_deg.to_radians();
    horizontal_run / angle_rad.cos()
}

/// Lay out panels on a uniform rectangular face.
///
/// This is a pure function suitable for LLM invocation.
///
/// # Arguments
///
/// * `input` - Face parameters (dimensions, slope, sheet geometry)
///
/// # Returns
///
/// * `Ok(MaterialList)` - One panel per sheet, all sharing the same
///   effective width and sheet length
/// * `Err(RoofError)` - Structured error if any input is invalid
///
/// # Example
///
/// ```rust
/// use roof_core::calculations::face::{FaceInput, calculate};
///
/// let input = FaceInput {
///     name: None,
///     eave_length: 10.0,
///     run: 4.0,
///     slope_deg: 30.0,
///     sheet_width: 2.0,
///     sheet_overlap: 0.0,
///     ridge_gap: 0.0,
/// };
///
/// let materials = calculate(&input).expect("Calculation should succeed");
/// assert_eq!(materials.total_sheets(), 5);
/// ```
pub fn calculate(input: &FaceInput) -> RoofResult<MaterialList> {
    input.validate()?;

    let coverage = input.coverage();
    let sheet_count = input.sheet_count();
    let sheet_length = slope_length(input.run, input.ridge_gap, input.slope_deg);

    let panels = (0..sheet_count)
        .map(|i| Panel {
            index: i as u32 + 1,
            effective_width: coverage,
            sheet_length,
            eave_position: coverage * (i as f64 + 0.5),
            face: input.name.clone(),
        })
        .collect();

    Ok(MaterialList { panels })
}

pub(crate) fn validate_finite(field: &str, value: f64) -> RoofResult<()> {
    if !value.is_finite() {
        return Err(RoofError::invalid_input(
            field,
            value.to_string(),
            "Value must be a finite number",
        ));
    }
    Ok(())
}
