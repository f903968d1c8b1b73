//! # Diagram Layout
//!
//! Pure geometry for the proportional panel diagram: every face becomes a row
//! of rectangles, each rectangle scaled from the panel's effective width and
//! sheet length. [`layout`] produces the rectangles; [`render_svg`] wraps
//! them into a self-contained SVG document.
//!
//! The diagram shows relative proportions only. Faces share one horizontal
//! scale (taken from the widest row) and one vertical scale (taken from the
//! longest sheet of any row) so both sheet counts and sheet lengths compare
//! visually across faces.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::calculations::material_list::{MaterialList, Panel};

/// Fallback row name for panels without a face label.
const UNNAMED_FACE: &str = "Face";

/// Canvas geometry for the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagramOptions {
    /// Canvas width in output units (pixels)
    pub width: f64,

    /// Canvas height in output units (pixels)
    pub height: f64,

    /// Margin around the drawing area
    pub margin: f64,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        DiagramOptions {
            width: 600.0,
            height: 400.0,
            margin: 20.0,
        }
    }
}

/// One scaled panel rectangle, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,

    /// Label drawn inside the rectangle: "P3", or two newline-separated
    /// lines ("FrontLeft\nP3") when the panel has a face name
    pub label: String,
}

struct FaceRow<'a> {
    panels: Vec<&'a Panel>,
    total_width: f64,
    max_length: f64,
}

fn group_rows(materials: &MaterialList) -> Vec<FaceRow<'_>> {
    let mut names: Vec<&str> = Vec::new();
    let mut rows: Vec<FaceRow> = Vec::new();

    for panel in &materials.panels {
        let name = panel
            .face
            .as_deref()
            .filter(|f| !f.trim().is_empty())
            .unwrap_or(UNNAMED_FACE);

        let row = match names.iter().position(|n| *n == name) {
            Some(idx) => &mut rows[idx],
            None => {
                names.push(name);
                rows.push(FaceRow {
                    panels: Vec::new(),
                    total_width: 0.0,
                    max_length: 0.0,
                });
                rows.last_mut().unwrap()
            }
        };

        row.panels.push(panel);
        row.total_width += panel.effective_width;
        row.max_length = row.max_length.max(panel.sheet_length);
    }

    for row in &mut rows {
        row.panels
            .sort_by(|a, b| a.eave_position.total_cmp(&b.eave_position));
    }

    rows
}

// Two lines: face name on the first, panel index on the second
fn panel_label(panel: &Panel) -> String {
    match panel.face.as_deref().filter(|f| !f.trim().is_empty()) {
        Some(face) => format!("{}\nP{}", face, panel.index),
        None => format!("P{}", panel.index),
    }
}

/// Lay out one rectangle per panel.
///
/// Panels group into one row per face (first-seen order), ordered within the
/// row by eave position. All rows share a horizontal scale from the widest
/// row and a vertical scale that fits the longest sheet of any row into the
/// row height (rows are at least 40 units tall), so sheet lengths stay
/// comparable across faces. Rectangles are vertically centred in their row.
///
/// An empty material list yields no rectangles.
pub fn layout(materials: &MaterialList, options: &DiagramOptions) -> Vec<PanelRect> {
    let rows = group_rows(materials);
    if rows.is_empty() {
        return Vec::new();
    }

    let margin = options.margin;
    let available_width = options.width - 2.0 * margin;
    let available_height = options.height - 2.0 * margin;

    let max_row_width = rows.iter().map(|r| r.total_width).fold(0.0, f64::max);

    let max_row_length = rows.iter().map(|r| r.max_length).fold(0.0, f64::max);

    let row_height = (available_height / rows.len() as f64).max(40.0);
    let scale_x = if max_row_width > 0.0 {
        available_width / max_row_width
    } else {
        1.0
    };
    // One vertical scale for every row, leaving headroom for labels; a
    // shorter face must render shorter than a longer one
    let scale_y = if max_row_length > 0.0 {
        (row_height - 20.0) / max_row_length
    } else {
        1.0
    };

    let mut rects = Vec::with_capacity(materials.panels.len());

    for (row_index, row) in rows.iter().enumerate() {
        let y_base = margin + row_index as f64 * row_height;
        let mut x_cursor = margin;

        for panel in &row.panels {
            let rect_width = panel.effective_width * scale_x;
            let rect_height = panel.sheet_length * scale_y;

            rects.push(PanelRect {
                x: x_cursor,
                y: y_base + (row_height - rect_height) / 2.0,
                width: rect_width,
                height: rect_height,
                label: panel_label(panel),
            });

            x_cursor += rect_width;
        }
    }

    rects
}

/// Render the panel diagram as a self-contained SVG document.
///
/// # Example
///
/// ```rust
/// use roof_core::calculations::face::{FaceInput, calculate};
/// use roof_core::diagram::{render_svg, DiagramOptions};
///
/// let materials = calculate(&FaceInput {
///     name: None,
///     eave_length: 10.0,
///     run: 4.0,
///     slope_deg: 30.0,
///     sheet_width: 2.0,
///     sheet_overlap: 0.0,
///     ridge_gap: 0.0,
/// })
/// .unwrap();
///
/// let svg = render_svg(&materials, &DiagramOptions::default());
/// assert!(svg.starts_with("<svg"));
/// ```
pub fn render_svg(materials: &MaterialList, options: &DiagramOptions) -> String {
    let rects = layout(materials, options);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{:.0}\" height=\"{:.0}\" viewBox=\"0 0 {:.0} {:.0}\">",
        options.width, options.height, options.width, options.height
    );

    for rect in &rects {
        let _ = writeln!(
            out,
            "  <rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"lightgray\" stroke=\"darkslategray\" stroke-width=\"1\" />",
            rect.x, rect.y, rect.width, rect.height
        );

        // One tspan per label line, stacked below the rectangle's top edge
        let _ = write!(
            out,
            "  <text x=\"{:.2}\" y=\"{:.2}\" font-size=\"9\">",
            rect.x + 2.0,
            rect.y + 11.0
        );
        for (line_index, line) in rect.label.lines().enumerate() {
            let _ = write!(
                out,
                "<tspan x=\"{:.2}\" dy=\"{}\">{}</tspan>",
                rect.x + 2.0,
                if line_index == 0 { 0 } else { 10 },
                xml_escape(line)
            );
        }
        out.push_str("</text>\n");
    }

    out.push_str("</svg>\n");
    out
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::face::{calculate, FaceInput};
    use crate::calculations::roof::Roof;

    fn test_face(name: Option<&str>) -> FaceInput {
        FaceInput {
            name: name.map(|n| n.to_string()),
            eave_length: 10.0,
            run: 4.0,
            slope_deg: 30.0,
            sheet_width: 2.0,
            sheet_overlap: 0.0,
            ridge_gap: 0.0,
        }
    }

    #[test]
    fn test_empty_list_yields_no_rects() {
        let rects = layout(&MaterialList::new(), &DiagramOptions::default());
        assert!(rects.is_empty());
    }

    #[test]
    fn test_one_rect_per_panel() {
        let materials = calculate(&test_face(Some("Front"))).unwrap();
        let rects = layout(&materials, &DiagramOptions::default());
        assert_eq!(rects.len(), materials.total_sheets());
    }

    #[test]
    fn test_widest_row_fills_available_width() {
        let materials = calculate(&test_face(Some("Front"))).unwrap();
        let options = DiagramOptions::default();
        let rects = layout(&materials, &options);

        let right_edge = rects.iter().map(|r| r.x + r.width).fold(0.0, f64::max);
        assert!((right_edge - (options.width - options.margin)).abs() < 1e-6);
    }

    #[test]
    fn test_rows_per_face_group() {
        let roof = Roof::symmetric_gable(test_face(None));
        let materials = roof.calculate().unwrap();
        let options = DiagramOptions::default();
        let rects = layout(&materials, &options);

        // Two faces -> two distinct row bands; Face B rects sit below Face A
        let face_a_y = rects[0].y;
        let face_b_y = rects.last().unwrap().y;
        assert!(face_b_y > face_a_y);
    }

    #[test]
    fn test_labels_are_two_lines_with_face_name() {
        let materials = calculate(&test_face(Some("Front"))).unwrap();
        let rects = layout(&materials, &DiagramOptions::default());
        assert_eq!(rects[0].label, "Front\nP1");

        let unnamed = calculate(&test_face(None)).unwrap();
        let rects = layout(&unnamed, &DiagramOptions::default());
        assert_eq!(rects[0].label, "P1");
    }

    #[test]
    fn test_shared_vertical_scale_keeps_faces_proportional() {
        // Upper run 8, lower run 2: lower sheets are a quarter the length and
        // must render a quarter the height
        let upper = {
            let mut f = test_face(None);
            f.run = 8.0;
            f
        };
        let lower = {
            let mut f = test_face(None);
            f.run = 2.0;
            f
        };
        let roof = Roof::valley(upper, lower);
        let materials = roof.calculate().unwrap();
        let rects = layout(&materials, &DiagramOptions::default());

        let upper_height = rects[0].height;
        let lower_height = rects.last().unwrap().height;
        assert!(upper_height > 0.0);
        assert!((lower_height / upper_height - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_rects_stay_inside_canvas_horizontally() {
        let roof = Roof::gable(test_face(None), {
            let mut f = test_face(None);
            f.eave_length = 6.0;
            f
        });
        let materials = roof.calculate().unwrap();
        let options = DiagramOptions::default();
        let rects = layout(&materials, &options);

        for rect in &rects {
            assert!(rect.x >= options.margin - 1e-9);
            assert!(rect.x + rect.width <= options.width - options.margin + 1e-6);
        }
    }

    #[test]
    fn test_svg_contains_rects_and_labels() {
        let materials = calculate(&test_face(Some("Front"))).unwrap();
        let svg = render_svg(&materials, &DiagramOptions::default());

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<rect").count(), 5);
        assert_eq!(svg.matches("<text").count(), 5);
        // Named panels get two label lines: face, then index
        assert_eq!(svg.matches("<tspan").count(), 10);
        assert!(svg.contains(">Front</tspan>"));
        assert!(svg.contains(">P1</tspan>"));
    }

    #[test]
    fn test_svg_escapes_labels() {
        let mut materials = calculate(&test_face(Some("A<B>"))).unwrap();
        materials.panels.truncate(1);
        let svg = render_svg(&materials, &DiagramOptions::default());
        assert!(svg.contains(">A&lt;B&gt;</tspan>"));
    }

    #[test]
    fn test_zero_length_panels_do_not_divide_by_zero() {
        let mut face = test_face(Some("Flat"));
        face.ridge_gap = 10.0; // all sheet lengths become 0
        let materials = calculate(&face).unwrap();
        let rects = layout(&materials, &DiagramOptions::default());

        assert_eq!(rects.len(), materials.total_sheets());
        for rect in &rects {
            assert!(rect.height.is_finite());
            assert_eq!(rect.height, 0.0);
        }
    }
}
