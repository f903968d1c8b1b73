//! # roof_core - Roof Sheeting Take-Off Engine
//!
//! `roof_core` computes material take-offs (sheet counts, lengths, flashing
//! estimates) for corrugated/metal roof sheeting over simple rectangular and
//! composite roof geometries, with a clean, LLM-friendly API. All inputs and
//! outputs are JSON-serializable, making it ideal for integration with AI
//! assistants via MCP or similar protocols.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Well-Documented**: Every type and function has examples
//!
//! ## Quick Start
//!
//! ```rust
//! use roof_core::calculations::face::{FaceInput, calculate};
//!
//! let input = FaceInput {
//!     name: None,
//!     eave_length: 40.0,
//!     run: 15.0,
//!     slope_deg: 26.565,
//!     sheet_width: 3.0,
//!     sheet_overlap: 0.125,
//!     ridge_gap: 0.0,
//! };
//!
//! let materials = calculate(&input).unwrap();
//! assert_eq!(materials.total_sheets(), 14);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Panel layout, composite roofs, flashing estimates
//! - [`project`] - Project container, metadata, and settings
//! - [`diagram`] - Proportional panel diagram layout and SVG rendering
//! - [`export`] - CSV and HTML export builders
//! - [`errors`] - Structured error types
//! - [`file_io`] - File operations with atomic saves
//!
//! ## A Note on Fidelity
//!
//! Every multi-face roof here treats its faces as independent rectangles or
//! trapezoids; hip and valley lines are never intersected geometrically, and
//! the flashing estimator works from rules of thumb. The output is a material
//! estimate, not a structural calculation.

pub mod calculations;
pub mod diagram;
pub mod errors;
pub mod export;
pub mod file_io;
pub mod project;

// Re-export commonly used types at crate root for convenience
pub use calculations::{FaceInput, FlashingRules, FlashingSummary, MaterialList, Panel, Roof, SheetSummary, TaperedFaceInput};
pub use errors::{RoofError, RoofResult};
pub use file_io::{load_project, save_project};
pub use project::{Project, ProjectMetadata, ProjectSettings, RoofType, Unit};
