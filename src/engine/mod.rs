//! The truncation pipeline as an event-driven state machine.
//!
//! [`Ellipsis::handle`] consumes one [`Event`] and returns the [`Effect`]s the
//! host must perform: measurements to take, settle timers to arm and
//! notifications to deliver. Results come back as further events. Every
//! content or configuration change starts a new [`Generation`]; events tagged
//! with an older generation are dropped, so a late measurement from a
//! superseded cycle can never overwrite the current one.

pub mod driver;


use std::fmt;
use std::time::Duration;

use log::{debug, warn};

use crate::config::{DEFAULT_LINE_HEIGHT, Direction, EllipsisConfig};
use crate::measure::{MeasureTarget, MeasurementResult};
use crate::plan::{EllipsisPlan, Metrics, plan};
use crate::presenter::{DisplayState, Notification, Toggle, View, view};
use crate::verify::verify_round;
use crate::width::WidthTable;

/// Monotonic cycle counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Input to the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ContentChanged(String),
    ConfigChanged(EllipsisConfig),
    /// A measurement requested by [`Effect::Measure`] resolved.
    Measured {
        generation: Generation,
        target: MeasureTarget,
        result: Option<MeasurementResult>,
    },
    /// A settle timer armed by [`Effect::ScheduleSettle`] fired.
    SettleElapsed { generation: Generation },
    Expand,
    Collapse,
    Click,
}

/// Work the host performs on behalf of the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Render `text` on `target` and report back with [`Event::Measured`].
    Measure {
        generation: Generation,
        target: MeasureTarget,
        text: String,
    },
    /// Report back with [`Event::SettleElapsed`] after `delay`.
    ScheduleSettle {
        generation: Generation,
        delay: Duration,
    },
    Notify(Notification),
}

/// Results of the two opening measurements, filled in as they arrive.
///
/// The outer `Option` tracks arrival; the inner one is the result itself,
/// which may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Probes {
    symbol: Option<Option<f64>>,
    root: Option<Option<MeasurementResult>>,
}

/// Where the current cycle is.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    /// Waiting for the symbol and root measurements, in either order.
    Measuring(Probes),
    /// Waiting for the full content's rendered height.
    CheckingOverflow(Metrics),
    /// A candidate was composed; waiting for the render to settle.
    Settling(Metrics),
    /// Waiting for the candidate's rendered height.
    Verifying(Metrics),
    /// Nothing in flight.
    Settled,
}

/// One truncated text element.
#[derive(Debug, Clone)]
pub struct Ellipsis {
    content: String,
    config: EllipsisConfig,
    generation: Generation,
    phase: Phase,
    display: DisplayState,
    plan: EllipsisPlan,
    symbol_width: Option<f64>,
    rounds: usize,
}

impl Ellipsis {
    /// Create an element. Nothing happens until [`Ellipsis::start`].
    pub fn new(content: impl Into<String>, config: EllipsisConfig) -> Self {
        Self {
            content: content.into(),
            config,
            generation: Generation::default(),
            phase: Phase::Settled,
            display: DisplayState::default(),
            plan: EllipsisPlan::default(),
            symbol_width: None,
            rounds: 0,
        }
    }

    /// Begin a fresh cycle for the current content and configuration.
    pub fn start(&mut self) -> Vec<Effect> {
        self.generation = self.generation.next();
        self.phase = Phase::Measuring(Probes::default());
        self.display.reset();
        self.plan = EllipsisPlan::default();
        self.symbol_width = None;
        self.rounds = 0;

        debug!(
            "cycle {}: {} chars, {} rows, {}",
            self.generation,
            self.content.chars().count(),
            self.config.rows,
            self.config.direction
        );

        vec![
            self.measure(MeasureTarget::Symbol, self.symbol_text()),
            self.measure(MeasureTarget::Root, self.content.clone()),
        ]
    }

    /// Feed one event through the state machine.
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::ContentChanged(content) => {
                self.content = content;
                self.start()
            }
            Event::ConfigChanged(config) => {
                self.config = config;
                self.start()
            }
            Event::Measured {
                generation,
                target,
                result,
            } => {
                if self.is_stale(generation) {
                    return Vec::new();
                }
                self.on_measured(target, result)
            }
            Event::SettleElapsed { generation } => {
                if self.is_stale(generation) {
                    return Vec::new();
                }
                self.on_settled()
            }
            Event::Expand => self.toggle(Toggle::Expand),
            Event::Collapse => self.toggle(Toggle::Collapse),
            Event::Click => vec![Effect::Notify(Notification::Click)],
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn config(&self) -> &EllipsisConfig {
        &self.config
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn plan(&self) -> &EllipsisPlan {
        &self.plan
    }

    pub fn display(&self) -> DisplayState {
        self.display
    }

    /// Verification rounds run in the current cycle.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Whether the current cycle has nothing left in flight.
    pub fn is_settled(&self) -> bool {
        matches!(self.phase, Phase::Settled)
    }

    /// The composed truncated text for the current plan.
    pub fn candidate(&self) -> String {
        self.plan.compose(&self.config.symbol, &self.config.expand_text)
    }

    /// What should currently be on screen.
    pub fn view(&self) -> View<'_> {
        view(self.display, &self.content, &self.plan, &self.config)
    }

    fn is_stale(&self, generation: Generation) -> bool {
        if generation != self.generation {
            debug!(
                "dropping event from {generation}, current is {}",
                self.generation
            );
            return true;
        }
        false
    }

    fn measure(&self, target: MeasureTarget, text: String) -> Effect {
        Effect::Measure {
            generation: self.generation,
            target,
            text,
        }
    }

    fn schedule_settle(&self) -> Effect {
        Effect::ScheduleSettle {
            generation: self.generation,
            delay: self.config.settle_delay,
        }
    }

    /// Text whose rendered width stands in for the symbol width.
    fn symbol_text(&self) -> String {
        let symbol = &self.config.symbol;
        let affix = &self.config.expand_text;
        match self.config.direction {
            Direction::End | Direction::Middle => format!("{symbol}{affix}"),
            Direction::Start => format!("{symbol}{affix}{symbol}"),
        }
    }

    fn on_measured(
        &mut self,
        target: MeasureTarget,
        result: Option<MeasurementResult>,
    ) -> Vec<Effect> {
        match (target, self.phase) {
            (MeasureTarget::Symbol, Phase::Measuring(mut probes)) if probes.symbol.is_none() => {
                probes.symbol = Some(result.map(|r| r.sanitized().width));
                self.on_probe(probes)
            }
            (MeasureTarget::Root, Phase::Measuring(mut probes)) if probes.root.is_none() => {
                probes.root = Some(result);
                self.on_probe(probes)
            }
            (MeasureTarget::Copy, Phase::CheckingOverflow(metrics)) => {
                self.on_overflow_check(metrics, result)
            }
            (MeasureTarget::Copy, Phase::Verifying(metrics)) => self.on_verify(metrics, result),
            (target, phase) => {
                debug!("ignoring {target:?} measurement in {phase:?}");
                Vec::new()
            }
        }
    }

    /// Plan once both opening measurements are in.
    fn on_probe(&mut self, probes: Probes) -> Vec<Effect> {
        let (Some(symbol), Some(root)) = (probes.symbol, probes.root) else {
            self.phase = Phase::Measuring(probes);
            return Vec::new();
        };
        self.symbol_width = symbol;
        self.on_root(root)
    }

    fn on_root(&mut self, result: Option<MeasurementResult>) -> Vec<Effect> {
        let root = match result {
            Some(root) => root,
            None => match self.estimate_root() {
                Some(estimate) => {
                    warn!("root not measurable, estimating from configured width");
                    estimate
                }
                None => {
                    warn!("root not measurable and width is auto, showing full content");
                    self.phase = Phase::Settled;
                    return Vec::new();
                }
            },
        };

        let metrics = Metrics::resolve(&root, &self.config, self.symbol_width);
        self.phase = Phase::CheckingOverflow(metrics);
        vec![self.measure(MeasureTarget::Copy, self.content.clone())]
    }

    /// Stand-in root measurement built from configuration and estimated widths.
    fn estimate_root(&self) -> Option<MeasurementResult> {
        let width = self.config.width.px().filter(|w| *w > 0.0)?;
        let tunables = &self.config.tunables;
        let font_size = tunables.reference_font_size;
        let line_height = Some(self.config.line_height)
            .filter(|lh| *lh > 0.0)
            .unwrap_or(DEFAULT_LINE_HEIGHT);
        let table = WidthTable::for_font_size(font_size, tunables);
        let lines = (table.text_width(&self.content) / width).ceil().max(1.0);

        Some(MeasurementResult {
            width,
            height: lines * line_height,
            line_height: Some(line_height),
            padding_top: 0.0,
            padding_bottom: 0.0,
            font_size,
        })
    }

    fn on_overflow_check(
        &mut self,
        metrics: Metrics,
        result: Option<MeasurementResult>,
    ) -> Vec<Effect> {
        let height = match result.map(|r| r.sanitized().height) {
            Some(height) if height > 0.0 => height,
            _ => {
                warn!("full content not measurable, using root height");
                metrics.origin_height
            }
        };

        if !metrics.exceeds(height) {
            debug!("content fits: {height}px <= {}px", metrics.max_height);
            self.phase = Phase::Settled;
            return Vec::new();
        }

        let chars: Vec<char> = self.content.chars().collect();
        self.plan = plan(&chars, &metrics, &self.config);
        self.display.exceeded = true;
        self.phase = Phase::Settling(metrics);
        vec![self.schedule_settle()]
    }

    fn on_settled(&mut self) -> Vec<Effect> {
        let Phase::Settling(metrics) = self.phase else {
            debug!("settle elapsed in {:?}", self.phase);
            return Vec::new();
        };
        self.phase = Phase::Verifying(metrics);
        vec![self.measure(MeasureTarget::Copy, self.candidate())]
    }

    fn on_verify(&mut self, metrics: Metrics, result: Option<MeasurementResult>) -> Vec<Effect> {
        self.rounds += 1;
        let height = result.map(|r| r.sanitized().height);
        let verdict = verify_round(&mut self.plan, self.config.direction, height, &metrics);

        if verdict.is_final() {
            debug!(
                "settled after {} round(s): {verdict:?}, {} chars kept",
                self.rounds,
                self.plan.kept_chars()
            );
            self.phase = Phase::Settled;
            return Vec::new();
        }

        self.phase = Phase::Settling(metrics);
        vec![self.schedule_settle()]
    }

    fn toggle(&mut self, toggle: Toggle) -> Vec<Effect> {
        match self.display.apply(toggle) {
            Some(notification) => vec![Effect::Notify(notification)],
            None => {
                debug!("ignoring {toggle} in {:?}", self.display.state());
                Vec::new()
            }
        }
    }
}
