/// One-shot scroll reveal.
///
/// A `RevealGate` consumes visibility fractions for one page region and
/// flips to revealed the first time the fraction reaches its threshold.
/// After that it is unsubscribed: later observations are ignored, so a
/// section never hides again when scrolled away.
///
/// `Viewport` is the capability that produces those fractions from the
/// page layout (row spans against the scroll window).

use super::timeline::Millis;

pub const DEFAULT_THRESHOLD: f32 = 0.1;

#[derive(Clone, Debug)]
pub struct RevealGate {
    threshold: f32,
    revealed_at: Option<Millis>,
}

impl RevealGate {
    pub fn new(threshold: f32) -> Self {
        RevealGate { threshold, revealed_at: None }
    }

    /// Feed one observation. Returns true only on the observation that
    /// flips the gate.
    pub fn observe(&mut self, visible_fraction: f32, now: Millis) -> bool {
        if self.revealed_at.is_some() {
            return false;
        }
        if visible_fraction >= self.threshold && visible_fraction > 0.0 {
            self.revealed_at = Some(now);
            true
        } else {
            false
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed_at.is_some()
    }

    /// Still listening for visibility changes?
    pub fn is_subscribed(&self) -> bool {
        self.revealed_at.is_none()
    }

    #[allow(dead_code)]
    pub fn revealed_at(&self) -> Option<Millis> {
        self.revealed_at
    }

    /// Entrance animation progress (0..=1) over `duration` after reveal.
    pub fn entrance(&self, now: Millis, duration: Millis) -> f32 {
        match self.revealed_at {
            None => 0.0,
            Some(_) if duration == 0 => 1.0,
            Some(t) => (now.saturating_sub(t).min(duration)) as f32 / duration as f32,
        }
    }
}

impl Default for RevealGate {
    fn default() -> Self {
        RevealGate::new(DEFAULT_THRESHOLD)
    }
}

/// The visible window into the page, in rows.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Viewport {
    pub top: usize,
    pub height: usize,
}

impl Viewport {
    /// Fraction of a region `[top, top + height)` that lies inside the viewport.
    pub fn intersection_ratio(&self, top: usize, height: usize) -> f32 {
        if height == 0 || self.height == 0 {
            return 0.0;
        }
        let start = top.max(self.top);
        let end = (top + height).min(self.top + self.height);
        if end <= start {
            return 0.0;
        }
        (end - start) as f32 / height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flips_once_at_threshold() {
        let mut gate = RevealGate::new(0.1);
        assert!(!gate.observe(0.05, 10));
        assert!(!gate.is_revealed());
        assert!(gate.observe(0.1, 20));
        assert!(gate.is_revealed());
        assert_eq!(gate.revealed_at(), Some(20));
    }

    #[test]
    fn ignores_everything_after_flip() {
        let mut gate = RevealGate::default();
        gate.observe(0.5, 0);
        assert!(!gate.is_subscribed());
        assert!(!gate.observe(0.0, 100));
        assert!(!gate.observe(1.0, 200));
        assert!(gate.is_revealed());
        assert_eq!(gate.revealed_at(), Some(0));
    }

    #[test]
    fn zero_visibility_never_reveals() {
        let mut gate = RevealGate::new(0.0);
        assert!(!gate.observe(0.0, 0));
        assert!(gate.observe(0.01, 1));
    }

    #[test]
    fn entrance_progress() {
        let mut gate = RevealGate::default();
        assert_eq!(gate.entrance(50, 100), 0.0);
        gate.observe(1.0, 100);
        assert_eq!(gate.entrance(150, 100), 0.5);
        assert_eq!(gate.entrance(900, 100), 1.0);
        assert_eq!(gate.entrance(100, 0), 1.0);
    }

    #[test]
    fn intersection_ratio_of_spans() {
        let vp = Viewport { top: 10, height: 20 };
        assert_eq!(vp.intersection_ratio(0, 5), 0.0);
        assert_eq!(vp.intersection_ratio(0, 20), 0.5);
        assert_eq!(vp.intersection_ratio(12, 4), 1.0);
        assert_eq!(vp.intersection_ratio(25, 10), 0.5);
        assert_eq!(vp.intersection_ratio(30, 10), 0.0);
        assert_eq!(vp.intersection_ratio(15, 0), 0.0);
    }
}
