//! # Label Composer
//!
//! Turns a [`LabelVariant`] into finished command buffers and hands them to a
//! [`PrintSink`].
//!
//! ## State machine
//!
//! ```text
//! Idle → Configuring → AligningToLabelStart → EmittingBlocks(0..n)
//!      → FinalFeedToCutPoint → Cutting → Flushed → Idle
//! ```
//!
//! Validation and layout planning run before `Configuring`. If either fails
//! the composer stays `Idle`, nothing is encoded and the sink is never
//! called. [`LabelComposer::compose`] returns to `Idle` once every label is
//! encoded; [`LabelComposer::print`] returns there after the last buffer is
//! flushed or a send fails.
//!
//! ## Gap alignment
//!
//! Each job assumes the previous one left the cutter on a gap midpoint. The
//! job first feeds backward to the first print line, prints its blocks while
//! tracking the head, and finally feeds forward so the cutter lands on the
//! midpoint of the next gap:
//!
//! ```text
//! final feed = height + gap - head + cutter_offset (+ intake adjustment)
//! ```

use chrono::{Local, NaiveDate};

use crate::encoder::{CommandBuffer, CommandEncoder};
use crate::error::LabelError;
use crate::ir::{FeedDirection, Program};
use crate::printer::{PrinterConfig, PrinterSession};
use crate::transport::PrintSink;

use super::batch::{self, NUDGE_MM};
use super::geometry::LabelGeometry;
use super::planner::LayoutPlanner;
use super::tracker::FeedPositionTracker;
use super::variant::{LabelLayout, LabelVariant, Row};

/// Composer states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerState {
    Idle,
    Configuring,
    AligningToLabelStart,
    EmittingBlocks(usize),
    FinalFeedToCutPoint,
    Cutting,
    Flushed,
}

/// One encoded label, ready to send.
#[derive(Debug, Clone)]
pub struct ComposedLabel {
    pub name: &'static str,
    pub program: Program,
    pub buffer: CommandBuffer,
    /// Planned space between blocks
    pub spacing_mm: f64,
    /// Tracked head position just before the final feed
    pub head_before_cut_mm: f64,
    /// Tracked head position after the final feed
    pub final_head_mm: f64,
    /// States entered while encoding, `Configuring` through `Cutting`
    pub states: Vec<ComposerState>,
}

/// What a print call sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrintReport {
    pub labels: usize,
    pub nudges: usize,
}

/// Encodes label jobs for one printer and label stock.
#[derive(Debug, Clone)]
pub struct LabelComposer {
    config: PrinterConfig,
    session: PrinterSession,
    geometry: LabelGeometry,
    date: NaiveDate,
    state: ComposerState,
    transitions: Vec<Vec<ComposerState>>,
}

impl LabelComposer {
    /// Composer with default session settings, dating outbound labels today.
    pub fn new(config: PrinterConfig, geometry: LabelGeometry) -> Self {
        Self {
            session: PrinterSession::for_printer(&config),
            config,
            geometry,
            date: Local::now().date_naive(),
            state: ComposerState::Idle,
            transitions: Vec::new(),
        }
    }

    pub fn with_session(mut self, session: PrinterSession) -> Self {
        self.session = session;
        self
    }

    /// Date printed on outbound labels.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn geometry(&self) -> &LabelGeometry {
        &self.geometry
    }

    pub fn session(&self) -> &PrinterSession {
        &self.session
    }

    pub fn state(&self) -> ComposerState {
        self.state
    }

    /// States entered by each label of the most recent job, one list per
    /// label starting with `Configuring`. Labels that were sent end with
    /// `Flushed`.
    pub fn transitions(&self) -> &[Vec<ComposerState>] {
        &self.transitions
    }

    fn enter(&mut self, state: ComposerState) {
        tracing::debug!(from = ?self.state, to = ?state, "composer transition");
        self.state = state;
        if state == ComposerState::Configuring {
            self.transitions.push(Vec::new());
        }
        if state != ComposerState::Idle {
            if let Some(label) = self.transitions.last_mut() {
                label.push(state);
            }
        }
    }

    /// Encode every label of a job without sending anything.
    ///
    /// All labels are validated and planned before the first one is
    /// encoded, so an error means nothing was produced.
    pub fn compose(&mut self, job: &LabelVariant) -> Result<Vec<ComposedLabel>, LabelError> {
        let labels = self.encode_job(job)?;
        self.enter(ComposerState::Idle);
        Ok(labels)
    }

    fn encode_job(&mut self, job: &LabelVariant) -> Result<Vec<ComposedLabel>, LabelError> {
        self.state = ComposerState::Idle;
        self.transitions.clear();

        let layouts = job.layouts(self.date).inspect_err(|e| {
            tracing::warn!(variant = job.name(), error = %e, "label rejected");
        })?;

        let planner = LayoutPlanner::new(
            self.geometry.height_mm(),
            self.geometry.margin_mm,
            self.config.line_height_mm,
        );
        let spacings = layouts
            .iter()
            .map(|layout| planner.spacing(layout.row_count(), layout.block_count()))
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| {
                tracing::warn!(variant = job.name(), error = %e, "label does not fit");
            })?;

        Ok(layouts
            .iter()
            .zip(spacings)
            .map(|(layout, spacing)| self.encode_label(layout, spacing))
            .collect())
    }

    fn encode_label(&mut self, layout: &LabelLayout, spacing_mm: f64) -> ComposedLabel {
        let mut encoder = CommandEncoder::new();
        let mut head = FeedPositionTracker::new();

        self.enter(ComposerState::Configuring);
        self.session.configure(&mut encoder);

        self.enter(ComposerState::AligningToLabelStart);
        head.advance(encoder.feed_backward_mm(self.geometry.alignment_feed_mm()));
        head.reset_to(self.geometry.label_start_position());

        let last = layout.blocks.len().saturating_sub(1);
        for (i, block) in layout.blocks.iter().enumerate() {
            self.enter(ComposerState::EmittingBlocks(i));
            for row in &block.rows {
                match row {
                    Row::Text(text) => encoder.emit_text(text),
                    Row::Barcode(spec) => encoder.emit_barcode(spec),
                }
                head.advance_rows(1, self.config.line_height_mm);
            }
            if i < last {
                head.advance(encoder.feed_forward_mm(spacing_mm));
            }
        }

        self.enter(ComposerState::FinalFeedToCutPoint);
        let adjustment = if layout.intake_adjustment {
            self.config.intake_adjustment_mm
        } else {
            0.0
        };
        let head_before_cut_mm = head.position();
        tracing::debug!(spacing_mm, head_mm = head_before_cut_mm, "head before cut");
        let feed = self.geometry.cut_point_feed_mm(head_before_cut_mm, adjustment);
        head.advance(encoder.feed_forward_mm(feed));
        tracing::debug!(head_mm = head.position(), "head after cut feed");

        self.enter(ComposerState::Cutting);
        encoder.cut();

        let (program, buffer) = encoder.finish();
        tracing::debug!(label = layout.name, hex = %buffer.to_hex(), "label buffer");

        ComposedLabel {
            name: layout.name,
            program,
            buffer,
            spacing_mm,
            head_before_cut_mm,
            final_head_mm: head.position(),
            states: self.transitions.last().cloned().unwrap_or_default(),
        }
    }

    /// Compose a job and send it, one buffer per label.
    ///
    /// Batch jobs get a forward nudge before every fifth label. A sink
    /// error stops the job and is returned unchanged.
    pub fn print(
        &mut self,
        job: &LabelVariant,
        sink: &mut dyn PrintSink,
    ) -> Result<PrintReport, LabelError> {
        let labels = self.encode_job(job)?;
        let report = match self.send_labels(job, &labels, sink) {
            Ok(report) => report,
            Err(e) => {
                self.state = ComposerState::Idle;
                return Err(e);
            }
        };

        tracing::info!(
            variant = job.name(),
            labels = report.labels,
            nudges = report.nudges,
            "job printed"
        );
        Ok(report)
    }

    fn send_labels(
        &mut self,
        job: &LabelVariant,
        labels: &[ComposedLabel],
        sink: &mut dyn PrintSink,
    ) -> Result<PrintReport, LabelError> {
        let is_batch = matches!(job, LabelVariant::BatchFromTable { .. });
        let mut report = PrintReport::default();

        for (i, label) in labels.iter().enumerate() {
            if is_batch && batch::nudge_before(i) {
                tracing::debug!(row = i + 1, "drift compensation nudge");
                sink.send(&nudge(FeedDirection::Forward, NUDGE_MM))?;
                report.nudges += 1;
            }

            sink.send(&label.buffer)?;
            self.state = ComposerState::Flushed;
            if let Some(states) = self.transitions.get_mut(i) {
                states.push(ComposerState::Flushed);
            }
            tracing::debug!(label = i + 1, "label flushed");
            report.labels += 1;
        }

        self.enter(ComposerState::Idle);
        Ok(report)
    }
}

/// A standalone paper feed job, used to nudge the stock by hand.
pub fn nudge(direction: FeedDirection, distance_mm: f64) -> CommandBuffer {
    let mut encoder = CommandEncoder::new();
    match direction {
        FeedDirection::Forward => encoder.feed_forward_mm(distance_mm),
        FeedDirection::Backward => encoder.feed_backward_mm(distance_mm),
    };
    encoder.finish().1
}
