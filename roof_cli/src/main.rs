//! # RoofTakeoff CLI Application
//!
//! Terminal-based interface for roof sheeting take-offs. Prompts for the
//! shared roof dimensions (or loads a saved project file passed as the first
//! argument), prints the panel layout, sheet summary and flashing estimate,
//! and optionally writes the export artifacts to a directory.
//!
//! The last-used settings are saved silently to the platform data directory
//! so the next run can start from them.

use std::env;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;

use roof_core::calculations::flashing::{estimate, FlashingRules};
use roof_core::diagram::{render_svg, DiagramOptions};
use roof_core::errors::RoofResult;
use roof_core::export;
use roof_core::file_io::{last_project_path, load_project, save_project};
use roof_core::project::{Project, ProjectSettings, RoofType, Unit};

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn prompt_choice(prompt: &str, max: usize, default: usize) -> usize {
    let value = prompt_f64(prompt, default as f64) as usize;
    if value <= max {
        value
    } else {
        default
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return String::new();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return String::new();
    }

    input.trim().to_string()
}

fn prompt_settings(defaults: &ProjectSettings) -> ProjectSettings {
    let mut settings = defaults.clone();

    let unit_choice = prompt_choice("Units (0=metric, 1=imperial) [1]: ", 1, 1);
    settings.unit = if unit_choice == 0 { Unit::Metric } else { Unit::Imperial };

    let roof_choice = prompt_choice(
        "Roof type (0=single face, 1=gable, 2=hip, 3=valley) [0]: ",
        3,
        0,
    );
    settings.roof_type = match roof_choice {
        1 => RoofType::Gable,
        2 => RoofType::Hip,
        3 => RoofType::Valley,
        _ => RoofType::SingleFace,
    };

    settings.eave_length = prompt_f64(
        &format!("Eave length [{}]: ", defaults.eave_length),
        defaults.eave_length,
    );
    settings.run = prompt_f64(&format!("Run (eave to ridge) [{}]: ", defaults.run), defaults.run);
    settings.slope_deg = prompt_f64(
        &format!("Slope angle (degrees) [{}]: ", defaults.slope_deg),
        defaults.slope_deg,
    );
    settings.sheet_width = prompt_f64(
        &format!("Sheet width [{}]: ", defaults.sheet_width),
        defaults.sheet_width,
    );
    settings.sheet_overlap = prompt_f64(
        &format!("Sheet overlap [{}]: ", defaults.sheet_overlap),
        defaults.sheet_overlap,
    );
    settings.ridge_gap = prompt_f64(
        &format!("Ridge gap [{}]: ", defaults.ridge_gap),
        defaults.ridge_gap,
    );
    settings.rounding_increment = prompt_f64(
        &format!("Sheet length rounding (0 = off) [{}]: ", defaults.rounding_increment),
        defaults.rounding_increment,
    );

    // Per-face overrides stay file-only: editing eight optional fields at a
    // prompt is worse than editing the saved JSON.
    settings
}

fn run_takeoff(project: &Project) -> RoofResult<()> {
    let settings = &project.settings;
    settings.validate()?;

    let roof = settings.to_roof();
    let materials = roof
        .calculate()?
        .with_rounded_lengths(settings.rounding_increment);
    let flashings = estimate(&materials, &FlashingRules::default());

    println!();
    println!("═══════════════════════════════════════");
    println!("  ROOF TAKE-OFF RESULTS");
    println!("═══════════════════════════════════════");
    println!();
    println!(
        "Total sheets: {} ({}) [{}]",
        materials.total_sheets(),
        roof.description(),
        settings.unit.label()
    );
    println!();

    println!("Sheet length summary:");
    for s in materials.sheet_summaries() {
        println!("  {:>10.3} x {}", s.sheet_length, s.count);
    }
    println!();

    println!("Panels:");
    for p in &materials.panels {
        match p.face.as_deref() {
            Some(face) => println!(
                "  {} - Panel {}: cover = {:.3}, length = {:.3}",
                face, p.index, p.effective_width, p.sheet_length
            ),
            None => println!(
                "  Panel {}: cover = {:.3}, length = {:.3}",
                p.index, p.effective_width, p.sheet_length
            ),
        }
    }
    println!();

    if !flashings.is_empty() {
        println!("Flashings / accessories (approximate):");
        for f in &flashings {
            if f.count > 0 {
                println!("  {}: {} ({})", f.name, f.count, f.notes);
            } else {
                println!("  {}: {:.3} ({})", f.name, f.total_length, f.notes);
            }
        }
        println!();
    }

    println!("JSON Output (for LLM/API use):");
    if let Ok(json) = serde_json::to_string_pretty(&materials) {
        println!("{}", json);
    }

    let export_dir = prompt_line("Export directory (blank to skip): ");
    if !export_dir.is_empty() {
        let dir = PathBuf::from(export_dir);
        write_exports(&dir, project, &materials, &flashings)?;
        println!("Exported take-off files to: {}", dir.display());
    }

    Ok(())
}

fn write_exports(
    dir: &Path,
    project: &Project,
    materials: &roof_core::MaterialList,
    flashings: &[roof_core::FlashingSummary],
) -> RoofResult<()> {
    std::fs::create_dir_all(dir).map_err(|e| {
        roof_core::RoofError::file_error("create export dir", dir.display().to_string(), e.to_string())
    })?;

    let title = if project.meta.name.is_empty() {
        "RoofTakeoff"
    } else {
        project.meta.name.as_str()
    };

    export::write_text(&dir.join("Panels.csv"), &export::panels_csv(materials))?;
    export::write_text(&dir.join("SheetSummary.csv"), &export::sheet_summary_csv(materials))?;
    export::write_text(&dir.join("Flashings.csv"), &export::flashings_csv(flashings))?;
    export::write_text(
        &dir.join("CutList.html"),
        &export::cut_list_html(title, materials, flashings, project.settings.unit, Utc::now()),
    )?;
    export::write_text(
        &dir.join("Diagram.svg"),
        &render_svg(materials, &DiagramOptions::default()),
    )?;

    Ok(())
}

fn save_last_settings_silently(project: &Project) {
    // Best effort: a failed auto-save never fails the run
    if let Ok(path) = last_project_path() {
        let _ = save_project(project, &path);
    }
}

fn load_last_settings() -> ProjectSettings {
    last_project_path()
        .ok()
        .filter(|path| path.exists())
        .and_then(|path| load_project(&path).ok())
        .map(|project| project.settings)
        .unwrap_or_default()
}

fn main() {
    println!("RoofTakeoff CLI - Roof Sheeting Calculator");
    println!("==========================================");
    println!();

    let mut project = match env::args().nth(1) {
        Some(arg) => {
            let path = PathBuf::from(arg);
            match load_project(&path) {
                Ok(project) => {
                    println!("Loaded project: {}", path.display());
                    project
                }
                Err(e) => {
                    eprintln!("Error loading {}: {}", path.display(), e);
                    std::process::exit(1);
                }
            }
        }
        None => {
            let defaults = load_last_settings();
            let mut project = Project::new("");
            project.settings = prompt_settings(&defaults);
            project
        }
    };

    match run_takeoff(&project) {
        Ok(()) => {
            project.touch();
            save_last_settings_silently(&project);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            std::process::exit(1);
        }
    }
}
