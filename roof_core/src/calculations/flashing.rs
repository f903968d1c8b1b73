//! # Flashing Estimator
//!
//! Derives coarse accessory quantities (ridge cap, barge/verge, valley tray,
//! screws) from a computed panel layout.
//!
//! These estimates are deliberately approximate: they are read off the panel
//! list alone, with no real flashing geometry behind them, and every constant
//! is a configurable rule of thumb rather than a derived value. Treat the
//! output as a starting point for a quote, not a structural quantity.

use serde::{Deserialize, Serialize};

use crate::calculations::material_list::{MaterialList, Panel};

/// Fallback group name for panels without a face label.
const UNNAMED_FACE: &str = "Face";

/// Tunable constants for the estimator.
///
/// The defaults are the original rules of thumb; they have no physical
/// derivation, so they are kept configurable rather than "corrected".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashingRules {
    /// Approximate screws per unit of panel coverage area
    pub screws_per_area: f64,
}

impl Default for FlashingRules {
    fn default() -> Self {
        FlashingRules { screws_per_area: 7.0 }
    }
}

/// One estimated flashing or accessory line item.
///
/// Length-measured items (ridge, barge, valley) use `total_length` and leave
/// `count` at 0; counted items (screws) do the opposite.
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "Ridge cap",
///   "total_length": 16.771,
///   "count": 0,
///   "notes": "Approximate main ridge length."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashingSummary {
    /// Name / type, e.g. "Ridge cap", "Barge / verge (Face A)", "Valley tray"
    pub name: String,

    /// Total running length in panel units; 0 for counted items
    pub total_length: f64,

    /// Item count (e.g. number of screws); 0 for length items
    pub count: u64,

    /// Extra info for the user
    pub notes: String,
}

/// Per-face aggregate, in first-seen order.
struct FaceGroup {
    name: String,
    max_length: f64,
}

fn group_by_face(materials: &MaterialList) -> Vec<FaceGroup> {
    let mut groups: Vec<FaceGroup> = Vec::new();
    for panel in &materials.panels {
        let name = face_group_name(panel);
        match groups.iter_mut().find(|g| g.name == name) {
            Some(group) => group.max_length = group.max_length.max(panel.sheet_length),
            None => groups.push(FaceGroup {
                name: name.to_string(),
                max_length: panel.sheet_length,
            }),
        }
    }
    groups
}

fn face_group_name(panel: &Panel) -> &str {
    panel
        .face
        .as_deref()
        .filter(|f| !f.trim().is_empty())
        .unwrap_or(UNNAMED_FACE)
}

/// Estimate flashing and accessory quantities from a panel layout.
///
/// Rules, in output order:
///
/// 1. **Ridge cap** - with at least two face groups, the smallest of the
///    per-group maximum sheet lengths stands in for the shared ridge run.
/// 2. **Barge / verge** - one per face group, equal to that group's maximum
///    sheet length.
/// 3. **Valley tray** - if at least two groups are named "Upper" or "Lower"
///    (case-insensitive), the smallest of their maximum lengths.
/// 4. **Screws / fasteners** - `ceil(total coverage area x screws_per_area)`.
///
/// Zero-length/zero-count candidates are dropped. An empty material list
/// yields an empty estimate.
///
/// # Example
///
/// ```rust
/// use roof_core::calculations::face::{FaceInput, calculate};
/// use roof_core::calculations::flashing::{estimate, FlashingRules};
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
/// let materials = calculate(&input).unwrap();
/// let flashings = estimate(&materials, &FlashingRules::default());
///
/// // Single face: one barge plus screws
/// assert_eq!(flashings.len(), 2);
/// ```
pub fn estimate(materials: &MaterialList, rules: &FlashingRules) -> Vec<FlashingSummary> {
    let mut results = Vec::new();

    if materials.panels.is_empty() {
        return results;
    }

    let groups = group_by_face(materials);

    // Ridge cap: smallest per-face maximum, as a rough shared ridge run
    if groups.len() >= 2 {
        let ridge_length = groups
            .iter()
            .map(|g| g.max_length)
            .fold(f64::INFINITY, f64::min);

        if ridge_length > 0.0 {
            results.push(FlashingSummary {
                name: "Ridge cap".to_string(),
                total_length: ridge_length,
                count: 0,
                notes: "Approximate main ridge length.".to_string(),
            });
        }
    }

    // Barge / verge: one per face, at that face's longest sheet
    for group in &groups {
        if group.max_length <= 0.0 {
            continue;
        }
        results.push(FlashingSummary {
            name: format!("Barge / verge ({})", group.name),
            total_length: group.max_length,
            count: 0,
            notes: "Approximate barge length for this face.".to_string(),
        });
    }

    // Valley tray: needs faces named Upper/Lower
    let valley_lengths: Vec<f64> = groups
        .iter()
        .filter(|g| {
            let lower = g.name.to_lowercase();
            lower.contains("upper") || lower.contains("lower")
        })
        .map(|g| g.max_length)
        .collect();

    if valley_lengths.len() >= 2 {
        let valley_length = valley_lengths.iter().copied().fold(f64::INFINITY, f64::min);
        if valley_length > 0.0 {
            results.push(FlashingSummary {
                name: "Valley tray".to_string(),
                total_length: valley_length,
                count: 0,
                notes: "Approximate valley tray length (simplified).".to_string(),
            });
        }
    }

    // Screws: rule-of-thumb density over total coverage area
    let screw_count = (materials.total_coverage_area() * rules.screws_per_area).ceil();
    if screw_count > 0.0 {
        results.push(FlashingSummary {
            name: "Screws / fasteners".to_string(),
            total_length: 0.0,
            count: screw_count as u64,
            notes: format!(
                "Approx. {:.0} per area unit based on panel coverage.",
                rules.screws_per_area
            ),
        });
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::face::FaceInput;
    use crate::calculations::roof::Roof;

    fn test_face(eave_length: f64, run: f64) -> FaceInput {
        FaceInput {
            name: None,
            eave_length,
            run,
            slope_deg: 30.0,
            sheet_width: 2.0,
            sheet_overlap: 0.0,
            ridge_gap: 0.0,
        }
    }

    #[test]
    fn test_empty_list_gives_empty_estimate() {
        let flashings = estimate(&MaterialList::new(), &FlashingRules::default());
        assert!(flashings.is_empty());
    }

    #[test]
    fn test_single_face_has_no_ridge() {
        let materials = crate::calculations::face::calculate(&test_face(10.0, 4.0)).unwrap();
        let flashings = estimate(&materials, &FlashingRules::default());

        assert!(!flashings.iter().any(|f| f.name == "Ridge cap"));
        assert!(flashings.iter().any(|f| f.name == "Barge / verge (Face)"));
        assert!(flashings.iter().any(|f| f.name == "Screws / fasteners"));
    }

    #[test]
    fn test_gable_ridge_uses_smaller_face() {
        // Face A run 4, Face B run 6: ridge length comes from the shorter face
        let roof = Roof::gable(test_face(10.0, 4.0), test_face(10.0, 6.0));
        let materials = roof.calculate().unwrap();
        let flashings = estimate(&materials, &FlashingRules::default());

        let ridge = flashings.iter().find(|f| f.name == "Ridge cap").unwrap();
        let cos30 = 30.0_f64.to_radians().cos();
        assert!((ridge.total_length - 4.0 / cos30).abs() < 1e-9);
    }

    #[test]
    fn test_barge_per_face_group() {
        let roof = Roof::gable(test_face(10.0, 4.0), test_face(10.0, 6.0));
        let materials = roof.calculate().unwrap();
        let flashings = estimate(&materials, &FlashingRules::default());

        assert!(flashings.iter().any(|f| f.name == "Barge / verge (Face A)"));
        assert!(flashings.iter().any(|f| f.name == "Barge / verge (Face B)"));
    }

    #[test]
    fn test_valley_tray_from_upper_lower_names() {
        let roof = Roof::valley(test_face(10.0, 4.0), test_face(10.0, 6.0));
        let materials = roof.calculate().unwrap();
        let flashings = estimate(&materials, &FlashingRules::default());

        let valley = flashings.iter().find(|f| f.name == "Valley tray").unwrap();
        let cos30 = 30.0_f64.to_radians().cos();
        assert!((valley.total_length - 4.0 / cos30).abs() < 1e-9);
    }

    #[test]
    fn test_gable_has_no_valley_tray() {
        let roof = Roof::symmetric_gable(test_face(10.0, 4.0));
        let materials = roof.calculate().unwrap();
        let flashings = estimate(&materials, &FlashingRules::default());
        assert!(!flashings.iter().any(|f| f.name == "Valley tray"));
    }

    #[test]
    fn test_screw_count() {
        let materials = crate::calculations::face::calculate(&test_face(10.0, 4.0)).unwrap();
        let flashings = estimate(&materials, &FlashingRules::default());

        let screws = flashings
            .iter()
            .find(|f| f.name == "Screws / fasteners")
            .unwrap();
        let expected = (materials.total_coverage_area() * 7.0).ceil() as u64;
        assert_eq!(screws.count, expected);
        assert_eq!(screws.total_length, 0.0);
    }

    #[test]
    fn test_custom_screw_rule() {
        let materials = crate::calculations::face::calculate(&test_face(10.0, 4.0)).unwrap();
        let rules = FlashingRules { screws_per_area: 2.0 };
        let flashings = estimate(&materials, &rules);

        let screws = flashings
            .iter()
            .find(|f| f.name == "Screws / fasteners")
            .unwrap();
        let expected = (materials.total_coverage_area() * 2.0).ceil() as u64;
        assert_eq!(screws.count, expected);
    }

    #[test]
    fn test_zero_length_panels_emit_nothing_but_are_not_an_error() {
        // Ridge gap swallows the whole run: all lengths zero, zero area
        let mut face = test_face(10.0, 4.0);
        face.ridge_gap = 10.0;
        let materials = crate::calculations::face::calculate(&face).unwrap();
        let flashings = estimate(&materials, &FlashingRules::default());
        assert!(flashings.is_empty());
    }

    #[test]
    fn test_summary_serialization_roundtrip() {
        let summary = FlashingSummary {
            name: "Ridge cap".to_string(),
            total_length: 16.771,
            count: 0,
            notes: "Approximate main ridge length.".to_string(),
        };
        let json = serde_json::to_string(&summary).unwrap();
        let roundtrip: FlashingSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary, roundtrip);
    }
}
