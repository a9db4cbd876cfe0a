//! ellipsize - multi-line text truncation that converges on a real rendered height.
//!
//! Cut points are first guessed from coarse per-character width estimates,
//! then corrected by re-measuring the rendered candidate and trimming one
//! character at a time until it fits the row budget.
//!
//! The pipeline lives in [`Ellipsis`], a state machine that asks its host for
//! measurements through [`Effect`]s and receives the results as [`Event`]s.
//! Hosts without real asynchrony can use [`driver::run`] with any
//! [`MeasurementOracle`].

pub mod boundary;
pub mod config;
pub mod engine;
pub mod error;
pub mod measure;
pub mod plan;
pub mod presenter;
pub mod units;
pub mod verify;
pub mod width;

pub use config::{Direction, EllipsisConfig, Tunables, Width};
pub use engine::{Effect, Ellipsis, Event, Generation, driver};
pub use error::EllipsisError;
pub use measure::{ComputedStyle, MeasureTarget, MeasurementOracle, MeasurementResult};
pub use plan::EllipsisPlan;
pub use presenter::{DisplayState, Notification, PresenterState, Segment, Toggle, View};
