//! # Label Composition
//!
//! Everything between a label job and its command buffer.
//!
//! ## Module Structure
//!
//! - [`variant`]: the label templates and their block layouts
//! - [`geometry`]: label height, gap and the feeds derived from them
//! - [`planner`]: spacing between blocks
//! - [`tracker`]: print head position during a job
//! - [`composer`]: the per-job state machine
//! - [`batch`]: batch tables and drift compensation
//!
//! ## Example
//!
//! ```
//! use osilabel::label::{GapSize, LabelComposer, LabelGeometry, LabelHeight, LabelVariant};
//! use osilabel::printer::PrinterConfig;
//! use osilabel::transport::MemorySink;
//!
//! let config = PrinterConfig::NP3511D;
//! let geometry = LabelGeometry::new(LabelHeight::Mm50, GapSize::Mm5, &config);
//! let mut composer = LabelComposer::new(config, geometry);
//!
//! let job = LabelVariant::EquipmentIntake { identifier: "123456".into() };
//! let mut sink = MemorySink::new();
//! composer.print(&job, &mut sink)?;
//!
//! assert_eq!(sink.len(), 1);
//! # Ok::<(), osilabel::error::LabelError>(())
//! ```

pub mod batch;
pub mod composer;
pub mod geometry;
pub mod planner;
pub mod tracker;
pub mod variant;

pub use composer::{ComposedLabel, ComposerState, LabelComposer, PrintReport, nudge};
pub use geometry::{GapSize, LabelGeometry, LabelHeight};
pub use variant::{LabelLayout, LabelVariant, OutboundFields};
