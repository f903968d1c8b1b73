//! # Composite Roof Calculation
//!
//! Combines independently computed faces into one material list. A [`Roof`]
//! is a closed set of variants (single face, gable, hip, valley), each
//! carrying the faces it needs, dispatched through one `calculate` entry
//! point.
//!
//! Faces never interact geometrically: a hip or valley is modeled as isolated
//! rectangles, not coupled surfaces sharing real hip/valley lines. That is a
//! deliberate, named simplification carried over from the approximate nature
//! of the whole take-off.

use serde::{Deserialize, Serialize};

use crate::calculations::face::{self, FaceInput};
use crate::calculations::material_list::MaterialList;
use crate::errors::RoofResult;

/// Concatenate the panel layouts of several faces, in input order.
///
/// Panel indices restart at 1 for each face (each face keeps its own
/// numbering). Any invalid face fails the whole composite; no partial list
/// escapes.
///
/// # Example
///
/// ```rust
/// use roof_core::calculations::face::FaceInput;
/// use roof_core::calculations::roof::calculate_composite;
///
/// let face = FaceInput {
///     name: Some("Face A".to_string()),
///     eave_length: 10.0,
///     run: 4.0,
///     slope_deg: 30.0,
///     sheet_width: 2.0,
///     sheet_overlap: 0.0,
///     ridge_gap: 0.0,
/// };
/// let mut other = face.clone();
/// other.name = Some("Face B".to_string());
///
/// let materials = calculate_composite(&[face, other]).unwrap();
/// assert_eq!(materials.total_sheets(), 10);
/// ```
pub fn calculate_composite(faces: &[FaceInput]) -> RoofResult<MaterialList> {
    // Validate everything up front so an invalid later face cannot leave a
    // partial result behind.
    for face in faces {
        face.validate()?;
    }

    let mut combined = MaterialList::new();
    for face in faces {
        combined.extend_from(face::calculate(face)?);
    }
    Ok(combined)
}

/// A roof shape: a closed set of variants, each carrying its faces.
///
/// Constructors stamp the canonical face names ("Face A"/"Face B" on a
/// gable, "FrontLeft".."BackRight" on a hip, "Upper"/"Lower" on a valley);
/// the flashing estimator keys its valley-tray rule off those names.
///
/// ## JSON Example
///
/// ```json
/// {
///   "type": "Gable",
///   "face_a": { "name": "Face A", "eave_length": 10.0, "run": 4.0,
///               "slope_deg": 30.0, "sheet_width": 2.0,
///               "sheet_overlap": 0.0, "ridge_gap": 0.0 },
///   "face_b": { "name": "Face B", "eave_length": 10.0, "run": 4.0,
///               "slope_deg": 30.0, "sheet_width": 2.0,
///               "sheet_overlap": 0.0, "ridge_gap": 0.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Roof {
    /// One planar face
    SingleFace { face: FaceInput },
    /// Two faces meeting at a ridge
    Gable { face_a: FaceInput, face_b: FaceInput },
    /// Four faces, one per side
    Hip {
        front_left: FaceInput,
        front_right: FaceInput,
        back_left: FaceInput,
        back_right: FaceInput,
    },
    /// Two faces meeting in a valley
    Valley { upper: FaceInput, lower: FaceInput },
}

impl Roof {
    /// Single face, keeping whatever name the input carries.
    pub fn single_face(face: FaceInput) -> Self {
        Roof::SingleFace { face }
    }

    /// Gable roof from two faces; stamps "Face A" and "Face B".
    pub fn gable(face_a: FaceInput, face_b: FaceInput) -> Self {
        Roof::Gable {
            face_a: named(face_a, "Face A"),
            face_b: named(face_b, "Face B"),
        }
    }

    /// Symmetric gable: both faces share one set of dimensions.
    pub fn symmetric_gable(face: FaceInput) -> Self {
        Roof::gable(face.clone(), face)
    }

    /// Hip roof from four faces; stamps the canonical slot names.
    pub fn hip(
        front_left: FaceInput,
        front_right: FaceInput,
        back_left: FaceInput,
        back_right: FaceInput,
    ) -> Self {
        Roof::Hip {
            front_left: named(front_left, "FrontLeft"),
            front_right: named(front_right, "FrontRight"),
            back_left: named(back_left, "BackLeft"),
            back_right: named(back_right, "BackRight"),
        }
    }

    /// Valley roof from two faces; stamps "Upper" and "Lower".
    pub fn valley(upper: FaceInput, lower: FaceInput) -> Self {
        Roof::Valley {
            upper: named(upper, "Upper"),
            lower: named(lower, "Lower"),
        }
    }

    /// The faces this roof is built from, in processing order.
    pub fn faces(&self) -> Vec<&FaceInput> {
        match self {
            Roof::SingleFace { face } => vec![face],
            Roof::Gable { face_a, face_b } => vec![face_a, face_b],
            Roof::Hip {
                front_left,
                front_right,
                back_left,
                back_right,
            } => vec![front_left, front_right, back_left, back_right],
            Roof::Valley { upper, lower } => vec![upper, lower],
        }
    }

    /// Short description used in reports (e.g. "gable, both faces").
    pub fn description(&self) -> &'static str {
        match self {
            Roof::SingleFace { .. } => "single face",
            Roof::Gable { .. } => "gable, both faces",
            Roof::Hip { .. } => "hip, 4 faces",
            Roof::Valley { .. } => "valley, 2 faces",
        }
    }

    /// Compute the material list for this roof.
    ///
    /// Dispatches to [`calculate_composite`] over the variant's faces.
    pub fn calculate(&self) -> RoofResult<MaterialList> {
        let faces: Vec<FaceInput> = self.faces().into_iter().cloned().collect();
        calculate_composite(&faces)
    }
}

fn named(mut face: FaceInput, name: &str) -> FaceInput {
    face.name = Some(name.to_string());
    face
}
