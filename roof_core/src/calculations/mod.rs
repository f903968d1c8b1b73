//! # Roof Take-Off Calculations
//!
//! This module contains the panel layout calculator and everything derived
//! from it. Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `MaterialList` - Calculation result (JSON-serializable)
//! - `calculate(input) -> Result<MaterialList, RoofError>` - Pure calculation function
//!
//! ## LLM Integration
//!
//! All types are designed for LLM consumption:
//! - Comprehensive rustdoc with examples
//! - Clean JSON serialization
//! - Structured error responses
//!
//! ## Available Calculations
//!
//! - [`face`] - Uniform rectangular face layout
//! - [`tapered`] - Face with linearly varying run (hip/valley approximation)
//! - [`roof`] - Composite roofs (single face, gable, hip, valley)
//! - [`flashing`] - Approximate accessory estimates from a panel layout

pub mod face;
pub mod flashing;
pub mod material_list;
pub mod roof;
pub mod tapered;

// Re-export commonly used types
pub use face::FaceInput;
pub use flashing::{FlashingRules, FlashingSummary};
pub use material_list::{MaterialList, Panel, SheetSummary};
pub use roof::Roof;
pub use tapered::TaperedFaceInput;
