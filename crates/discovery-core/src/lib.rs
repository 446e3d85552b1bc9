//! Core of the discovery self-assessment: the diagnostic flow engine, the
//! step/activity model, plan export, and the catalog loader that supplies
//! the static data.

pub mod catalog;
pub mod engine;
pub mod export;
pub mod model;

pub use catalog::{Catalog, CatalogError};
pub use engine::{CONFIDENCE_THRESHOLD, DiagnosticEngine, MAX_CONFIDENCE, UNIVERSAL_CATEGORIES};
pub use model::{Activity, Confidence, Outcome, PlanEntry, Step};
