//! # Export Module
//!
//! Pure string builders for the take-off exports (panel CSV, sheet summary
//! CSV, flashings CSV, cut-list HTML) plus a small helper for writing them to
//! disk. Numeric formatting is fixed at three decimal places and is
//! locale-independent.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::calculations::flashing::FlashingSummary;
use crate::calculations::material_list::MaterialList;
use crate::errors::{RoofError, RoofResult};
use crate::project::Unit;

/// Full panel list as CSV.
///
/// Header: `Face,Index,EavePosition,EffectiveWidth,SheetLength`; one row per
/// panel in list order; an unnamed face serializes as an empty field.
pub fn panels_csv(materials: &MaterialList) -> String {
    let mut out = String::from("Face,Index,EavePosition,EffectiveWidth,SheetLength\n");
    for p in &materials.panels {
        let face = p.face.as_deref().unwrap_or("");
        let _ = writeln!(
            out,
            "{},{},{:.3},{:.3},{:.3}",
            face, p.index, p.eave_position, p.effective_width, p.sheet_length
        );
    }
    out
}

/// Sheet length summary as CSV.
///
/// Header: `SheetLength,Count`; rows sorted by length descending, matching
/// [`MaterialList::sheet_summaries`].
pub fn sheet_summary_csv(materials: &MaterialList) -> String {
    let mut out = String::from("SheetLength,Count\n");
    for s in materials.sheet_summaries() {
        let _ = writeln!(out, "{:.3},{}", s.sheet_length, s.count);
    }
    out
}

/// Flashing estimates as CSV.
///
/// Header: `Name,TotalLength,Count,Notes`. Commas inside names and notes are
/// replaced with spaces so the rows stay well-formed without quoting.
pub fn flashings_csv(flashings: &[FlashingSummary]) -> String {
    let mut out = String::from("Name,TotalLength,Count,Notes\n");
    for f in flashings {
        let safe_name = f.name.replace(',', " ");
        let safe_notes = f.notes.replace(',', " ");
        let _ = writeln!(out, "{},{:.3},{},{}", safe_name, f.total_length, f.count, safe_notes);
    }
    out
}

/// Self-contained cut-list HTML document.
///
/// Contains the total sheet count, the sheet length summary table, the full
/// panel table, and (when non-empty) the flashing table. All user-supplied
/// text is HTML-escaped.
pub fn cut_list_html(
    title: &str,
    materials: &MaterialList,
    flashings: &[FlashingSummary],
    unit: Unit,
    generated_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    out.push_str("  <meta charset=\"utf-8\" />\n");
    let _ = writeln!(out, "  <title>{} - Cut List</title>", html_escape(title));
    out.push_str("  <style>\n");
    out.push_str("    body { font-family: system-ui, sans-serif; margin: 20px; }\n");
    out.push_str("    h1 { margin-bottom: 0.2em; }\n");
    out.push_str("    h2 { margin-top: 1.6em; margin-bottom: 0.4em; }\n");
    out.push_str("    table { border-collapse: collapse; width: 100%; max-width: 900px; }\n");
    out.push_str("    th, td { border: 1px solid #cccccc; padding: 4px 8px; font-size: 13px; }\n");
    out.push_str("    th { background: #f0f0f0; text-align: left; }\n");
    out.push_str("    tbody tr:nth-child(even) { background: #fafafa; }\n");
    out.push_str("    .small { font-size: 11px; color: #666; }\n");
    out.push_str("  </style>\n</head>\n<body>\n");

    let _ = writeln!(out, "  <h1>{} - Cut List</h1>", html_escape(title));
    let _ = writeln!(
        out,
        "  <p class=\"small\">Generated at {} [{}]</p>",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        unit.label()
    );
    let _ = writeln!(
        out,
        "  <p>Total sheets: <strong>{}</strong></p>",
        materials.total_sheets()
    );

    out.push_str("  <h2>Sheet length summary</h2>\n  <table>\n");
    out.push_str("    <thead><tr><th>Sheet length</th><th>Count</th></tr></thead>\n    <tbody>\n");
    for s in materials.sheet_summaries() {
        let _ = writeln!(
            out,
            "      <tr><td>{:.3}</td><td>{}</td></tr>",
            s.sheet_length, s.count
        );
    }
    out.push_str("    </tbody>\n  </table>\n");

    out.push_str("  <h2>Panel list</h2>\n  <table>\n    <thead>\n      <tr>\n");
    out.push_str("        <th>#</th>\n        <th>Face</th>\n        <th>Eave position</th>\n");
    out.push_str("        <th>Effective width</th>\n        <th>Sheet length</th>\n");
    out.push_str("      </tr>\n    </thead>\n    <tbody>\n");
    for p in &materials.panels {
        let face = match p.face.as_deref() {
            Some(f) if !f.trim().is_empty() => html_escape(f),
            _ => "&nbsp;".to_string(),
        };
        let _ = writeln!(
            out,
            "      <tr><td>{}</td><td>{}</td><td>{:.3}</td><td>{:.3}</td><td>{:.3}</td></tr>",
            p.index, face, p.eave_position, p.effective_width, p.sheet_length
        );
    }
    out.push_str("    </tbody>\n  </table>\n");

    if !flashings.is_empty() {
        out.push_str("  <h2>Flashings / accessories</h2>\n  <table>\n");
        out.push_str(
            "    <thead><tr><th>Name</th><th>Total length</th><th>Count</th><th>Notes</th></tr></thead>\n",
        );
        out.push_str("    <tbody>\n");
        for f in flashings {
            let _ = writeln!(
                out,
                "      <tr><td>{}</td><td>{:.3}</td><td>{}</td><td>{}</td></tr>",
                html_escape(&f.name),
                f.total_length,
                f.count,
                html_escape(&f.notes)
            );
        }
        out.push_str("    </tbody>\n  </table>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

/// Write an export artifact to disk, mapping I/O failures to
/// [`RoofError::FileError`].
pub fn write_text(path: &Path, contents: &str) -> RoofResult<()> {
    fs::write(path, contents).map_err(|e| {
        RoofError::file_error("write export", path.display().to_string(), e.to_string())
    })
}

fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
