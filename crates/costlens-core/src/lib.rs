//! Facility cost exposure engine.
//!
//! [`ScenarioEvaluator`] prices one scenario (area × benchmark rate per category band) into a
//! [`ScenarioResult`]; [`compare`] turns two results into a [`DeltaReport`] with per-category
//! heat, top drivers and summary lists. Both are pure: identical inputs give identical outputs.
//!
//! The [`input`], [`config`] and [`session`] modules are the host side: narrowing loose
//! documents into engine inputs, default settings, and the recompute-on-change loop.

pub mod benchmark;
pub mod catalog;
pub mod config;
pub mod delta;
pub mod errors;
pub mod evaluate;
pub mod input;
pub mod model;
pub mod session;

pub use benchmark::{BandRates, BenchmarkLibrary, BenchmarkSet, RateLookup};
pub use catalog::{Catalog, Category};
pub use config::{load_settings, parse_settings, Settings, SettingsError};
pub use delta::{
    compare, CompareConfig, CompareOverrides, DeltaReport, DeltaRow, Direction, Heat, SortMode,
    MAX_SUMMARY_ROWS, MAX_TOP_DRIVERS,
};
pub use errors::{CompareError, EvaluateError, ValidationError};
pub use evaluate::ScenarioEvaluator;
pub use input::{load_workspace, parse_workspace, InputError, ScenarioInput, Workspace};
pub use model::{Band, CategoryCost, ScenarioResult, Selection, Side};
pub use session::{evaluate_guarded, ScenarioOutcome, Session, SessionError, SessionView};
