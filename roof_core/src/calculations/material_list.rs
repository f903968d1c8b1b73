//! # Panels and Material Lists
//!
//! Output value types shared by every roof calculation. A calculation emits a
//! [`MaterialList`]: an ordered sequence of [`Panel`]s (face processing order,
//! then index within the face) from which sheet counts, length summaries and
//! coverage areas are derived.
//!
//! ## Example
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
//! println!("Total sheets: {}", materials.total_sheets());
//! for summary in materials.sheet_summaries() {
//!     println!("{:.3} x {}", summary.sheet_length, summary.count);
//! }
//! ```

use serde::{Deserialize, Serialize};

/// One roof sheet in the computed layout.
///
/// Panels are pure value objects: they are created by one calculation call and
/// have no identity or mutation beyond it (aside from the explicit length
/// rounding pass, see [`MaterialList::with_rounded_lengths`]).
///
/// ## JSON Example
///
/// ```json
/// {
///   "index": 1,
///   "effective_width": 2.875,
///   "sheet_length": 16.771,
///   "eave_position": 1.4375,
///   "face": "Front"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    /// 1-based position along the eave within the panel's face
    pub index: u32,

    /// Net eave-width contributed by this sheet (sheet width minus overlap)
    pub effective_width: f64,

    /// Slope-corrected length of this sheet
    pub sheet_length: f64,

    /// Centre-line offset of the panel along the eave
    pub eave_position: f64,

    /// Originating face name (None for an unlabeled single-face calculation)
    pub face: Option<String>,
}

/// One group of panels sharing a sheet length.
///
/// Lengths are grouped after rounding to 3 decimal places so that panels whose
/// lengths differ only by floating-point noise land in the same group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetSummary {
    /// The shared sheet length for this group (in roof units)
    pub sheet_length: f64,

    /// Number of panels that share this sheet length
    pub count: usize,
}

/// Ordered sequence of panels produced by one roof calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialList {
    /// All panels, in face processing order, then index order within a face
    pub panels: Vec<Panel>,
}

impl MaterialList {
    /// Create an empty material list.
    pub fn new() -> Self {
        MaterialList { panels: Vec::new() }
    }

    /// Total number of sheets across all faces.
    pub fn total_sheets(&self) -> usize {
        self.panels.len()
    }

    /// Append all panels from another list, preserving their order.
    ///
    /// Panel indices are not renumbered: each face keeps its own 1-based run.
    pub fn extend_from(&mut self, other: MaterialList) {
        self.panels.extend(other.panels);
    }

    /// Group panels by sheet length (rounded to 3 decimal places),
    /// sorted by length descending.
    pub fn sheet_summaries(&self) -> Vec<SheetSummary> {
        use std::collections::BTreeMap;

        // Key in thousandths so lengths that agree to 3 dp group together.
        let mut groups: BTreeMap<i64, usize> = BTreeMap::new();
        for panel in &self.panels {
            let key = (panel.sheet_length * 1000.0).round() as i64;
            *groups.entry(key).or_insert(0) += 1;
        }

        groups
            .into_iter()
            .rev()
            .map(|(key, count)| SheetSummary {
                sheet_length: key as f64 / 1000.0,
                count,
            })
            .collect()
    }

    /// Total coverage area: Σ(effective_width × sheet_length) over all panels.
    ///
    /// Used by the flashing estimator's screw-count approximation.
    pub fn total_coverage_area(&self) -> f64 {
        self.panels
            .iter()
            .map(|p| p.effective_width * p.sheet_length)
            .sum()
    }

    /// Return a copy with every sheet length rounded to the nearest multiple
    /// of `increment`.
    ///
    /// An `increment <= 0` is the identity transform (no rounding requested).
    /// Rounding uses `f64::round`, i.e. half-away-from-zero: a length exactly
    /// between two increments rounds to the larger magnitude. This affects
    /// supplier-facing totals, so the choice is pinned by a test.
    ///
    /// Apply this before deriving flashing estimates and summaries so
    /// downstream consumers always see the rounded lengths.
    pub fn with_rounded_lengths(&self, increment: f64) -> MaterialList {
        if increment <= 0.0 {
            return self.clone();
        }

        let panels = self
            .panels
            .iter()
            .map(|p| {
                let mut panel = p.clone();
                panel.sheet_length = (p.sheet_length / increment).round() * increment;
                panel
            })
            .collect();

        MaterialList { panels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(index: u32, length: f64, face: Option<&str>) -> Panel {
        Panel {
            index,
            effective_width: 2.0,
            sheet_length: length,
            eave_position: 2.0 * (index as f64 - 0.5),
            face: face.map(|f| f.to_string()),
        }
    }

    #[test]
    fn test_total_sheets() {
        let list = MaterialList {
            panels: vec![panel(1, 5.0, None), panel(2, 5.0, None)],
        };
        assert_eq!(list.total_sheets(), 2);
    }

    #[test]
    fn test_sheet_summaries_group_and_sort() {
        let list = MaterialList {
            panels: vec![
                panel(1, 5.0, Some("Upper")),
                panel(2, 5.0, Some("Upper")),
                panel(1, 8.0, Some("Lower")),
                // Within 3 dp of 5.0, must join the 5.0 group
                panel(3, 5.0001, Some("Upper")),
            ],
        };

        let summaries = list.sheet_summaries();
        assert_eq!(summaries.len(), 2);
        // Sorted by length descending
        assert_eq!(summaries[0].sheet_length, 8.0);
        assert_eq!(summaries[0].count, 1);
        assert_eq!(summaries[1].sheet_length, 5.0);
        assert_eq!(summaries[1].count, 3);
    }

    #[test]
    fn test_total_coverage_area() {
        let list = MaterialList {
            panels: vec![panel(1, 5.0, None), panel(2, 3.0, None)],
        };
        // 2.0*5.0 + 2.0*3.0 = 16.0
        assert!((list.total_coverage_area() - 16.0).abs() < 1e-12);
    }

    #[test]
    fn test_rounding_zero_increment_is_identity() {
        let list = MaterialList {
            panels: vec![panel(1, 5.123, None), panel(2, 3.456, None)],
        };
        assert_eq!(list.with_rounded_lengths(0.0), list);
        assert_eq!(list.with_rounded_lengths(-0.5), list);
    }

    #[test]
    fn test_rounding_produces_exact_multiples() {
        let list = MaterialList {
            panels: vec![panel(1, 16.771, None), panel(2, 4.2, None)],
        };
        let rounded = list.with_rounded_lengths(0.5);

        for p in &rounded.panels {
            let multiple = p.sheet_length / 0.5;
            assert!((multiple - multiple.round()).abs() < 1e-9);
        }
        assert!((rounded.panels[0].sheet_length - 17.0).abs() < 1e-9);
        assert!((rounded.panels[1].sheet_length - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        // 5.25 is exactly between 5.0 and 5.5; half-away-from-zero picks 5.5
        let list = MaterialList {
            panels: vec![panel(1, 5.25, None)],
        };
        let rounded = list.with_rounded_lengths(0.5);
        assert!((rounded.panels[0].sheet_length - 5.5).abs() < 1e-9);
    }

    #[test]
    fn test_rounding_preserves_everything_but_length() {
        let list = MaterialList {
            panels: vec![panel(3, 5.2, Some("Front"))],
        };
        let rounded = list.with_rounded_lengths(1.0);
        let p = &rounded.panels[0];
        assert_eq!(p.index, 3);
        assert_eq!(p.face.as_deref(), Some("Front"));
        assert_eq!(p.effective_width, 2.0);
        assert_eq!(p.eave_position, 5.0);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let list = MaterialList {
            panels: vec![panel(1, 5.0, Some("Face A")), panel(1, 6.0, Some("Face B"))],
        };
        let json = serde_json::to_string_pretty(&list).unwrap();
        let roundtrip: MaterialList = serde_json::from_str(&json).unwrap();
        assert_eq!(list, roundtrip);
    }
}
