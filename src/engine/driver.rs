//! Synchronous execution of effects against a [`MeasurementOracle`].

use std::collections::VecDeque;

use super::{Effect, Ellipsis, Event};
use crate::measure::MeasurementOracle;
use crate::presenter::Notification;

/// What a driven run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Notifications emitted, in order.
    pub notifications: Vec<Notification>,
    /// Measurements taken.
    pub measurements: usize,
}

/// Perform `effects` and everything they lead to until nothing is pending.
///
/// Measurements resolve immediately through `oracle` and settle timers fire
/// without waiting, so a whole cycle runs to completion in one call.
pub fn settle<O>(ellipsis: &mut Ellipsis, effects: Vec<Effect>, oracle: &mut O) -> Outcome
where
    O: MeasurementOracle + ?Sized,
{
    let mut queue: VecDeque<Effect> = effects.into();
    let mut outcome = Outcome::default();

    while let Some(effect) = queue.pop_front() {
        let follow_up = match effect {
            Effect::Measure {
                generation,
                target,
                text,
            } => {
                outcome.measurements += 1;
                let result = oracle.measure(target, &text);
                ellipsis.handle(Event::Measured {
                    generation,
                    target,
                    result,
                })
            }
            Effect::ScheduleSettle { generation, .. } => {
                ellipsis.handle(Event::SettleElapsed { generation })
            }
            Effect::Notify(notification) => {
                outcome.notifications.push(notification);
                continue;
            }
        };
        queue.extend(follow_up);
    }

    outcome
}

/// Handle one event and drive its effects to completion.
pub fn dispatch<O>(ellipsis: &mut Ellipsis, event: Event, oracle: &mut O) -> Outcome
where
    O: MeasurementOracle + ?Sized,
{
    let effects = ellipsis.handle(event);
    settle(ellipsis, effects, oracle)
}

/// Start a fresh cycle and drive it to completion.
pub fn run<O>(ellipsis: &mut Ellipsis, oracle: &mut O) -> Outcome
where
    O: MeasurementOracle + ?Sized,
{
    let effects = ellipsis.start();
    settle(ellipsis, effects, oracle)
}
