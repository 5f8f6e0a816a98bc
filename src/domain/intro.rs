/// Intro choreography: a timer-driven phase machine.
///
///   Particles ──800ms──▶ Forming ──2200ms──▶ Glow ──3800ms──▶ Fadeout ──4500ms──▶ (complete)
///
/// All four deadlines are scheduled at activation from fixed offsets, not
/// chained, so a late `tick` fires every overdue step in declared order.
/// Completion is reported exactly once; `teardown` revokes whatever is
/// still pending.

use crate::config::IntroTiming;
use super::timeline::{Millis, Timeline};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IntroPhase {
    Particles,
    Forming,
    Glow,
    Fadeout,
}

/// What the controller reports back to its owner on `tick`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IntroSignal {
    Phase(IntroPhase),
    Complete,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Step {
    Enter(IntroPhase),
    Complete,
}

#[derive(Debug)]
pub struct IntroController {
    timing: IntroTiming,
    phase: IntroPhase,
    activated_at: Option<Millis>,
    phase_started_at: Millis,
    completed: bool,
    torn_down: bool,
    timers: Timeline<Step>,
}

impl IntroController {
    pub fn new(timing: IntroTiming) -> Self {
        IntroController {
            timing,
            phase: IntroPhase::Particles,
            activated_at: None,
            phase_started_at: 0,
            completed: false,
            torn_down: false,
            timers: Timeline::new(),
        }
    }

    /// Schedule the whole choreography relative to `now`.
    /// Ignored once started (no restart) or after teardown.
    pub fn activate(&mut self, now: Millis) {
        if self.activated_at.is_some() || self.torn_down {
            return;
        }
        self.activated_at = Some(now);
        self.phase_started_at = now;
        let t = &self.timing;
        self.timers.schedule(now + t.forming_ms, Step::Enter(IntroPhase::Forming));
        self.timers.schedule(now + t.glow_ms, Step::Enter(IntroPhase::Glow));
        self.timers.schedule(now + t.fadeout_ms, Step::Enter(IntroPhase::Fadeout));
        self.timers.schedule(now + t.complete_ms, Step::Complete);
    }

    /// Fire every transition due at `now`, in order.
    pub fn tick(&mut self, now: Millis) -> Vec<IntroSignal> {
        let mut signals = Vec::new();
        for step in self.timers.drain_due(now) {
            match step {
                Step::Enter(phase) => {
                    self.phase = phase;
                    self.phase_started_at = now;
                    signals.push(IntroSignal::Phase(phase));
                }
                Step::Complete => {
                    if !self.completed {
                        self.completed = true;
                        signals.push(IntroSignal::Complete);
                    }
                }
            }
        }
        signals
    }

    /// Cancel all pending transitions. Nothing fires afterwards.
    pub fn teardown(&mut self) {
        self.timers.cancel_all();
        self.torn_down = true;
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    #[allow(dead_code)]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    #[allow(dead_code)]
    pub fn is_active(&self) -> bool {
        self.activated_at.is_some() && !self.torn_down && !self.completed
    }

    #[allow(dead_code)]
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Elapsed time since activation.
    pub fn elapsed(&self, now: Millis) -> Millis {
        self.activated_at.map_or(0, |t0| now.saturating_sub(t0))
    }

    /// Fraction (0..=1) of the current phase that has elapsed.
    pub fn progress(&self, now: Millis) -> f32 {
        let Some(t0) = self.activated_at else { return 0.0 };
        let t = &self.timing;
        let end = t0 + match self.phase {
            IntroPhase::Particles => t.forming_ms,
            IntroPhase::Forming => t.glow_ms,
            IntroPhase::Glow => t.fadeout_ms,
            IntroPhase::Fadeout => t.complete_ms,
        };
        let span = end.saturating_sub(self.phase_started_at);
        if span == 0 {
            return 1.0;
        }
        let done = now.saturating_sub(self.phase_started_at).min(span);
        done as f32 / span as f32
    }
}
