//! Effect execution for App: measurements, settle timers, notifications.

use std::time::Instant;

use ellipsize::{Effect, Event, MeasurementOracle};
use log::debug;

use super::App;

impl App {
    /// Feed an event to the ellipsis and queue what it asks for.
    pub(super) fn send(&mut self, event: Event) {
        let effects = self.ellipsis.handle(event);
        self.pending.extend(effects);
    }

    /// Perform every queued effect.
    ///
    /// Measurements are answered by the surface straight away; settle timers
    /// are armed relative to `now` and fire later through [`App::fire_due`].
    pub fn pump(&mut self, now: Instant) {
        while let Some(effect) = self.pending.pop_front() {
            match effect {
                Effect::Measure {
                    generation,
                    target,
                    text,
                } => {
                    let result = self.surface.measure(target, &text);
                    self.send(Event::Measured {
                        generation,
                        target,
                        result,
                    });
                }
                Effect::ScheduleSettle { generation, delay } => {
                    self.settle_at = Some((generation, now + delay));
                }
                Effect::Notify(notification) => {
                    debug!("notification: {notification:?}");
                    self.record(notification);
                }
            }
        }
    }

    /// When the armed settle timer fires, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.settle_at.map(|(_, at)| at)
    }

    /// Fire the settle timer if it is due. Returns whether it fired.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        match self.settle_at {
            Some((generation, at)) if at <= now => {
                self.settle_at = None;
                self.send(Event::SettleElapsed { generation });
                true
            }
            _ => false,
        }
    }
}
