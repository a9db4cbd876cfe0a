//! Trim-and-remeasure rounds that correct the width heuristic.

use log::trace;

use crate::config::Direction;
use crate::plan::{EllipsisPlan, Metrics};

/// Outcome of one verification round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The candidate renders within the row budget.
    Fits,
    /// The surface gave no usable height; the candidate is kept as is.
    Unverified,
    /// One character was dropped; the candidate must be measured again.
    Trimmed,
    /// Still overflowing and the kept slices are now empty.
    Exhausted,
}

impl Verdict {
    /// Whether the loop is finished after this round.
    pub fn is_final(self) -> bool {
        !matches!(self, Verdict::Trimmed)
    }
}

/// Drop one character from the truncated side of `plan`.
///
/// `End` shortens `leading` from its end, `Start` shortens `tailing` from
/// its front. `Middle` shortens whichever slice is longer, `tailing` on a tie.
/// Returns `false` when there was nothing left to drop.
pub fn trim_one(plan: &mut EllipsisPlan, direction: Direction) -> bool {
    let trim_leading = match direction {
        Direction::End => true,
        Direction::Start => false,
        Direction::Middle => plan.leading.chars().count() > plan.tailing.chars().count(),
    };

    if trim_leading {
        plan.leading.pop().is_some()
    } else {
        match plan.tailing.chars().next() {
            Some(first) => {
                plan.tailing.drain(..first.len_utf8());
                true
            }
            None => false,
        }
    }
}

/// Run one round against the height measured for the current candidate.
pub fn verify_round(
    plan: &mut EllipsisPlan,
    direction: Direction,
    measured_height: Option<f64>,
    metrics: &Metrics,
) -> Verdict {
    let Some(height) = measured_height.filter(|h| h.is_finite() && *h > 0.0) else {
        return Verdict::Unverified;
    };
    if !metrics.exceeds(height) {
        return Verdict::Fits;
    }
    if !trim_one(plan, direction) || plan.is_empty() {
        return Verdict::Exhausted;
    }
    trace!(
        "candidate {height}px > {}px, trimmed to {} chars",
        metrics.max_height,
        plan.kept_chars()
    );
    Verdict::Trimmed
}
