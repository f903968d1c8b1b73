//! # Project Data Structures
//!
//! The `Project` struct is the root container for a saved take-off. Projects
//! serialize to `.json` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, name, timestamps)
//! └── settings: ProjectSettings (units, roof type, dimensions, overrides)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use roof_core::project::Project;
//!
//! let project = Project::new("Smith residence");
//!
//! // Serialize to JSON
//! let json = serde_json::to_string_pretty(&project).unwrap();
//!
//! // Save to file (see file_io module for atomic saves)
//! std::fs::write("project.json", &json).unwrap();
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::face::FaceInput;
use crate::calculations::roof::Roof;
use crate::errors::{RoofError, RoofResult};

/// Current schema version for project files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// This is the top-level struct that gets serialized to project files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, name, timestamps)
    pub meta: ProjectMetadata,

    /// The take-off inputs
    pub settings: ProjectSettings,
}

impl Project {
    /// Create a new project with default settings.
    ///
    /// # Example
    ///
    /// ```rust
    /// use roof_core::project::Project;
    ///
    /// let project = Project::new("Smith residence");
    /// assert_eq!(project.meta.name, "Smith residence");
    /// ```
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                name: name.into(),
                created: now,
                modified: now,
            },
            settings: ProjectSettings::default(),
        }
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Project name
    pub name: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// Measurement system selector.
///
/// All core calculations are unit-agnostic; the unit only labels reports and
/// exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    Metric,
    Imperial,
}

impl Unit {
    /// Human-readable description used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Unit::Metric => "metric (m)",
            Unit::Imperial => "imperial (ft)",
        }
    }
}

impl Default for Unit {
    fn default() -> Self {
        Unit::Imperial
    }
}

/// Roof shape selector for project settings.
///
/// The shape determines which face slots [`ProjectSettings::to_roof`]
/// populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoofType {
    SingleFace,
    Gable,
    Hip,
    Valley,
}

impl Default for RoofType {
    fn default() -> Self {
        RoofType::SingleFace
    }
}

/// Optional per-face dimension overrides for one face slot.
///
/// `None` means "use the shared default"; an override only takes effect when
/// [`ProjectSettings::overrides_enabled`] is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceOverride {
    /// Override for the face's eave length
    pub eave_length: Option<f64>,

    /// Override for the face's horizontal run
    pub run: Option<f64>,
}

impl FaceOverride {
    fn validate(&self, slot: &str) -> RoofResult<()> {
        if let Some(eave_length) = self.eave_length {
            validate_override(&format!("{slot}.eave_length"), eave_length)?;
        }
        if let Some(run) = self.run {
            validate_override(&format!("{slot}.run"), run)?;
        }
        Ok(())
    }
}

fn validate_override(field: &str, value: f64) -> RoofResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(RoofError::invalid_input(
            field,
            value.to_string(),
            "Override must be a positive number",
        ));
    }
    Ok(())
}

/// Per-slot overrides for the four hip faces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HipOverrides {
    pub front_left: FaceOverride,
    pub front_right: FaceOverride,
    pub back_left: FaceOverride,
    pub back_right: FaceOverride,
}

/// Per-slot overrides for the two valley faces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ValleyOverrides {
    pub upper: FaceOverride,
    pub lower: FaceOverride,
}

/// All inputs for one take-off, as persisted to a project file.
///
/// Shared dimensions apply to every face of the selected roof type; hip and
/// valley slots can override eave length and run individually when
/// `overrides_enabled` is set.
///
/// ## JSON Example
///
/// ```json
/// {
///   "unit": "Imperial",
///   "roof_type": "Gable",
///   "eave_length": 40.0,
///   "run": 15.0,
///   "slope_deg": 26.565,
///   "sheet_width": 3.0,
///   "sheet_overlap": 0.125,
///   "ridge_gap": 0.0,
///   "rounding_increment": 0.0,
///   "overrides_enabled": false,
///   "hip_overrides": {
///     "front_left": { "eave_length": null, "run": null },
///     "front_right": { "eave_length": null, "run": null },
///     "back_left": { "eave_length": null, "run": null },
///     "back_right": { "eave_length": null, "run": null }
///   },
///   "valley_overrides": {
///     "upper": { "eave_length": null, "run": null },
///     "lower": { "eave_length": null, "run": null }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// Measurement system (labels only; calculations are unit-agnostic)
    pub unit: Unit,

    /// Selected roof shape
    pub roof_type: RoofType,

    /// Shared plan length along the eave
    pub eave_length: f64,

    /// Shared horizontal eave-to-ridge distance
    pub run: f64,

    /// Shared roof pitch in degrees
    pub slope_deg: f64,

    /// Nominal sheet width
    pub sheet_width: f64,

    /// Width consumed by adjacent-sheet overlap
    pub sheet_overlap: f64,

    /// Length subtracted near the ridge
    pub ridge_gap: f64,

    /// Sheet length rounding increment; 0 disables rounding
    pub rounding_increment: f64,

    /// Whether per-face overrides apply
    pub overrides_enabled: bool,

    /// Hip face slot overrides
    pub hip_overrides: HipOverrides,

    /// Valley face slot overrides
    pub valley_overrides: ValleyOverrides,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        ProjectSettings {
            unit: Unit::default(),
            roof_type: RoofType::default(),
            eave_length: 40.0,
            run: 15.0,
            slope_deg: 26.565,
            sheet_width: 3.0,
            sheet_overlap: 0.125,
            ridge_gap: 0.0,
            rounding_increment: 0.0,
            overrides_enabled: false,
            hip_overrides: HipOverrides::default(),
            valley_overrides: ValleyOverrides::default(),
        }
    }
}

impl ProjectSettings {
    /// Validate the shared dimensions and any active overrides.
    ///
    /// This is the application-level boundary: it enforces everything the
    /// face calculations check plus the rounding increment and the override
    /// fields, so a settings record that validates here will calculate
    /// without error.
    pub fn validate(&self) -> RoofResult<()> {
        for (field, value) in [
            ("eave_length", self.eave_length),
            ("run", self.run),
            ("slope_deg", self.slope_deg),
            ("sheet_width", self.sheet_width),
            ("sheet_overlap", self.sheet_overlap),
            ("ridge_gap", self.ridge_gap),
            ("rounding_increment", self.rounding_increment),
        ] {
            if !value.is_finite() {
                return Err(RoofError::invalid_input(
                    field,
                    value.to_string(),
                    "Value must be a finite number",
                ));
            }
        }

        if self.eave_length <= 0.0 {
            return Err(RoofError::invalid_input(
                "eave_length",
                self.eave_length.to_string(),
                "Eave length must be greater than zero",
            ));
        }
        if self.run <= 0.0 {
            return Err(RoofError::invalid_input(
                "run",
                self.run.to_string(),
                "Run must be greater than zero",
            ));
        }
        if self.slope_deg <= 0.0 || self.slope_deg >= 89.0 {
            return Err(RoofError::invalid_input(
                "slope_deg",
                self.slope_deg.to_string(),
                "Slope angle must be between 0 and 89 degrees",
            ));
        }
        if self.sheet_width <= 0.0 {
            return Err(RoofError::invalid_input(
                "sheet_width",
                self.sheet_width.to_string(),
                "Sheet width must be greater than zero",
            ));
        }
        if self.sheet_overlap < 0.0 {
            return Err(RoofError::invalid_input(
                "sheet_overlap",
                self.sheet_overlap.to_string(),
                "Sheet overlap must be zero or positive",
            ));
        }
        if self.sheet_width <= self.sheet_overlap {
            return Err(RoofError::invalid_input(
                "sheet_overlap",
                self.sheet_overlap.to_string(),
                "Sheet width must be greater than sheet overlap",
            ));
        }
        if self.ridge_gap < 0.0 {
            return Err(RoofError::invalid_input(
                "ridge_gap",
                self.ridge_gap.to_string(),
                "Ridge gap must be zero or positive",
            ));
        }
        if self.rounding_increment < 0.0 {
            return Err(RoofError::invalid_input(
                "rounding_increment",
                self.rounding_increment.to_string(),
                "Sheet length rounding must be zero or positive",
            ));
        }

        if self.overrides_enabled {
            match self.roof_type {
                RoofType::Hip => {
                    self.hip_overrides.front_left.validate("hip.front_left")?;
                    self.hip_overrides.front_right.validate("hip.front_right")?;
                    self.hip_overrides.back_left.validate("hip.back_left")?;
                    self.hip_overrides.back_right.validate("hip.back_right")?;
                }
                RoofType::Valley => {
                    self.valley_overrides.upper.validate("valley.upper")?;
                    self.valley_overrides.lower.validate("valley.lower")?;
                }
                RoofType::SingleFace | RoofType::Gable => {}
            }
        }

        Ok(())
    }

    /// A face built from the shared dimensions, with no name.
    fn shared_face(&self) -> FaceInput {
        FaceInput {
            name: None,
            eave_length: self.eave_length,
            run: self.run,
            slope_deg: self.slope_deg,
            sheet_width: self.sheet_width,
            sheet_overlap: self.sheet_overlap,
            ridge_gap: self.ridge_gap,
        }
    }

    /// A face with slot overrides applied on top of the shared dimensions.
    ///
    /// Overrides only take effect when `overrides_enabled` is set; a `None`
    /// field always falls back to the shared value.
    fn face_with_override(&self, ov: &FaceOverride) -> FaceInput {
        let mut face = self.shared_face();
        if self.overrides_enabled {
            if let Some(eave_length) = ov.eave_length {
                face.eave_length = eave_length;
            }
            if let Some(run) = ov.run {
                face.run = run;
            }
        }
        face
    }

    /// Expand these settings into the carried [`Roof`] variant.
    ///
    /// # Example
    ///
    /// ```rust
    /// use roof_core::project::{ProjectSettings, RoofType};
    ///
    /// let mut settings = ProjectSettings::default();
    /// settings.roof_type = RoofType::Gable;
    ///
    /// let roof = settings.to_roof();
    /// let materials = roof.calculate().unwrap();
    /// assert_eq!(materials.total_sheets(), 28);
    /// ```
    pub fn to_roof(&self) -> Roof {
        match self.roof_type {
            RoofType::SingleFace => Roof::single_face(self.shared_face()),
            RoofType::Gable => Roof::symmetric_gable(self.shared_face()),
            RoofType::Hip => Roof::hip(
                self.face_with_override(&self.hip_overrides.front_left),
                self.face_with_override(&self.hip_overrides.front_right),
                self.face_with_override(&self.hip_overrides.back_left),
                self.face_with_override(&self.hip_overrides.back_right),
            ),
            RoofType::Valley => Roof::valley(
                self.face_with_override(&self.valley_overrides.upper),
                self.face_with_override(&self.valley_overrides.lower),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_creation() {
        let project = Project::new("Smith residence");
        assert_eq!(project.meta.name, "Smith residence");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert!(project.settings.validate().is_ok());
    }

    #[test]
    fn test_project_serialization() {
        let project = Project::new("Roundtrip");
        let json = serde_json::to_string_pretty(&project).unwrap();

        assert!(json.contains("Roundtrip"));
        assert!(json.contains("roof_type"));

        let roundtrip: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, project);
    }

    #[test]
    fn test_touch_updates_modified() {
        let mut project = Project::new("Touch");
        let before = project.meta.modified;
        project.touch();
        assert!(project.meta.modified >= before);
    }

    #[test]
    fn test_unit_labels() {
        assert_eq!(Unit::Metric.label(), "metric (m)");
        assert_eq!(Unit::Imperial.label(), "imperial (ft)");
    }

    #[test]
    fn test_default_settings_validate() {
        assert!(ProjectSettings::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = ProjectSettings::default();
        settings.eave_length = 0.0;
        assert!(settings.validate().is_err());

        let mut settings = ProjectSettings::default();
        settings.slope_deg = 89.0;
        assert!(settings.validate().is_err());

        let mut settings = ProjectSettings::default();
        settings.sheet_overlap = settings.sheet_width;
        assert!(settings.validate().is_err());

        let mut settings = ProjectSettings::default();
        settings.rounding_increment = -0.5;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_override_only_when_enabled() {
        let mut settings = ProjectSettings::default();
        settings.roof_type = RoofType::Hip;
        settings.hip_overrides.front_left.run = Some(-3.0);

        // Disabled overrides are ignored entirely
        settings.overrides_enabled = false;
        assert!(settings.validate().is_ok());

        settings.overrides_enabled = true;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_single_face_roof_has_no_name() {
        let settings = ProjectSettings::default();
        let roof = settings.to_roof();
        match roof {
            Roof::SingleFace { face } => assert!(face.name.is_none()),
            other => panic!("expected single face, got {other:?}"),
        }
    }

    #[test]
    fn test_hip_overrides_fall_back_to_shared() {
        let mut settings = ProjectSettings::default();
        settings.roof_type = RoofType::Hip;
        settings.overrides_enabled = true;
        settings.hip_overrides.front_left.eave_length = Some(12.0);
        // front_left.run and all other slots stay None

        match settings.to_roof() {
            Roof::Hip {
                front_left,
                front_right,
                ..
            } => {
                assert_eq!(front_left.eave_length, 12.0);
                assert_eq!(front_left.run, settings.run);
                assert_eq!(front_right.eave_length, settings.eave_length);
            }
            other => panic!("expected hip, got {other:?}"),
        }
    }

    #[test]
    fn test_overrides_ignored_when_disabled() {
        let mut settings = ProjectSettings::default();
        settings.roof_type = RoofType::Valley;
        settings.overrides_enabled = false;
        settings.valley_overrides.upper.eave_length = Some(99.0);

        match settings.to_roof() {
            Roof::Valley { upper, .. } => {
                assert_eq!(upper.eave_length, settings.eave_length);
            }
            other => panic!("expected valley, got {other:?}"),
        }
    }

    #[test]
    fn test_settings_roundtrip_preserves_overrides() {
        let mut settings = ProjectSettings::default();
        settings.roof_type = RoofType::Valley;
        settings.overrides_enabled = true;
        settings.valley_overrides.lower.run = Some(8.5);

        let json = serde_json::to_string(&settings).unwrap();
        let roundtrip: ProjectSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, settings);
        assert_eq!(roundtrip.valley_overrides.lower.run, Some(8.5));
    }
}
