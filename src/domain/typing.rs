/// Typing-text effect.
///
/// Two layers:
///   - `Frames`: a pure, lazy, never-ending generator of display snapshots.
///     Each frame says what to show and how long to hold it.
///   - `TypingAnimation`: the timed driver. It owns one pending timeline
///     entry; every frame change cancels it and schedules the next one.
///
/// Per phrase the sequence is: "" → +1 char per `typing` → full phrase
/// (held typing + pause + deleting) → −1 char per `deleting` → "" → next
/// phrase, wrapping around forever.

use std::time::Duration;

use crate::config::TypingTiming;
use super::timeline::{Millis, TimerHandle, Timeline};

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TypingFrame {
    pub text: String,
    pub index: usize,
    pub deleting: bool,
    pub hold: Duration,
}

/// Infinite frame generator over a fixed phrase list.
#[derive(Clone, Debug)]
pub struct Frames {
    phrases: Vec<Vec<char>>,
    timing: TypingTiming,
    index: usize,
    len: usize,
    deleting: bool,
}

impl Frames {
    /// Panics if `phrases` is empty; callers validate the catalog first.
    pub fn new(phrases: &[String], timing: TypingTiming) -> Self {
        assert!(!phrases.is_empty(), "typing animation needs at least one phrase");
        Frames {
            phrases: phrases.iter().map(|p| p.chars().collect()).collect(),
            timing,
            index: 0,
            len: 0,
            deleting: false,
        }
    }

    fn current(&self) -> &[char] {
        &self.phrases[self.index]
    }

    fn hold(&self) -> Duration {
        let t = &self.timing;
        if self.deleting {
            Duration::from_millis(t.deleting_speed_ms)
        } else if self.len == self.current().len() {
            // Full phrase: one more typing beat notices the end, then the
            // pause, then the first deleting beat.
            Duration::from_millis(t.typing_speed_ms + t.pause_ms + t.deleting_speed_ms)
        } else {
            Duration::from_millis(t.typing_speed_ms)
        }
    }

    fn snapshot(&self) -> TypingFrame {
        TypingFrame {
            text: self.current()[..self.len].iter().collect(),
            index: self.index,
            deleting: self.deleting,
            hold: self.hold(),
        }
    }

    fn advance(&mut self) {
        let full = self.current().len();
        if self.deleting {
            if self.len > 0 {
                self.len -= 1;
            } else {
                self.deleting = false;
                self.index = (self.index + 1) % self.phrases.len();
            }
        } else if self.len < full {
            self.len += 1;
        } else {
            self.deleting = true;
            self.len = self.len.saturating_sub(1);
        }
    }
}

impl Iterator for Frames {
    type Item = TypingFrame;

    fn next(&mut self) -> Option<TypingFrame> {
        let frame = self.snapshot();
        self.advance();
        Some(frame)
    }
}

// ── Timed driver ──

#[derive(Debug)]
pub struct TypingAnimation {
    frames: Frames,
    current: TypingFrame,
    timers: Timeline<()>,
    pending: Option<TimerHandle>,
    torn_down: bool,
}

impl TypingAnimation {
    pub fn new(phrases: &[String], timing: TypingTiming) -> Self {
        let mut frames = Frames::new(phrases, timing);
        let current = frames.next().unwrap_or_else(|| TypingFrame {
            text: String::new(),
            index: 0,
            deleting: false,
            hold: Duration::ZERO,
        });
        TypingAnimation {
            frames,
            current,
            timers: Timeline::new(),
            pending: None,
            torn_down: false,
        }
    }

    /// Begin cycling; the first change lands one hold after `now`.
    pub fn start(&mut self, now: Millis) {
        if self.torn_down || self.pending.is_some() {
            return;
        }
        self.reschedule(now);
    }

    /// Apply every frame change due at `now`. Returns true if the text changed.
    pub fn tick(&mut self, now: Millis) -> bool {
        let mut changed = false;
        // A long stall can owe several frames; step through them in order.
        loop {
            let Some(handle) = self.pending else { break };
            let Some(deadline) = self.timers.next_deadline() else { break };
            if deadline > now {
                break;
            }
            self.timers.drain_due(deadline);
            debug_assert!(!self.timers.is_pending(handle));
            self.pending = None;

            let before = self.current.text.clone();
            if let Some(frame) = self.frames.next() {
                self.current = frame;
            }
            changed |= self.current.text != before;
            self.reschedule(deadline);
        }
        changed
    }

    fn reschedule(&mut self, from: Millis) {
        if let Some(old) = self.pending.take() {
            self.timers.cancel(old);
        }
        let hold = self.current.hold.as_millis() as Millis;
        self.pending = Some(self.timers.schedule(from + hold, ()));
    }

    /// Stop for good: the pending step is revoked and never runs.
    pub fn teardown(&mut self) {
        self.timers.cancel_all();
        self.pending = None;
        self.torn_down = true;
    }

    pub fn display_text(&self) -> &str {
        &self.current.text
    }

    #[allow(dead_code)]
    pub fn index(&self) -> usize {
        self.current.index
    }

    pub fn is_deleting(&self) -> bool {
        self.current.deleting
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn timing() -> TypingTiming {
        TypingTiming { typing_speed_ms: 100, deleting_speed_ms: 50, pause_ms: 2000 }
    }

    fn phrases(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn frames_walk_two_phrases_and_wrap() {
        let frames: Vec<(String, usize)> = Frames::new(&phrases(&["AB", "C"]), timing())
            .take(13)
            .map(|f| (f.text, f.index))
            .collect();
        let expected: Vec<(String, usize)> = [
            ("", 0), ("A", 0), ("AB", 0), ("A", 0), ("", 0),
            ("", 1), ("C", 1), ("", 1),
            ("", 0), ("A", 0), ("AB", 0), ("A", 0), ("", 0),
        ]
        .iter()
        .map(|(t, i)| (t.to_string(), *i))
        .collect();
        assert_eq!(frames, expected);
    }

    #[test]
    fn full_phrase_is_held_at_least_the_pause() {
        let t = timing();
        let full = Frames::new(&phrases(&["AB", "C"]), t)
            .find(|f| f.text == "AB")
            .unwrap();
        assert!(full.hold >= Duration::from_millis(t.pause_ms));
        assert!(!full.deleting);
    }

    #[test]
    fn hold_durations_follow_direction() {
        let f: Vec<TypingFrame> = Frames::new(&phrases(&["AB"]), timing()).take(5).collect();
        assert_eq!(f[0].hold, Duration::from_millis(100));
        assert_eq!(f[1].hold, Duration::from_millis(100));
        assert_eq!(f[2].hold, Duration::from_millis(2150));
        assert!(f[3].deleting);
        assert_eq!(f[3].hold, Duration::from_millis(50));
        assert_eq!(f[4].hold, Duration::from_millis(50));
    }

    #[test]
    fn single_phrase_cycles_against_itself() {
        let texts: Vec<String> = Frames::new(&phrases(&["Hi"]), timing())
            .take(12)
            .map(|f| f.text)
            .collect();
        assert_eq!(texts, vec!["", "H", "Hi", "H", "", "", "H", "Hi", "H", "", "", "H"]);
    }

    #[test]
    fn multibyte_phrases_slice_by_char() {
        let texts: Vec<String> = Frames::new(&phrases(&["né"]), timing())
            .take(3)
            .map(|f| f.text)
            .collect();
        assert_eq!(texts, vec!["", "n", "né"]);
    }

    #[test]
    fn driver_follows_the_clock() {
        let mut anim = TypingAnimation::new(&phrases(&["AB", "C"]), timing());
        anim.start(0);
        assert_eq!(anim.display_text(), "");

        assert!(!anim.tick(99));
        assert!(anim.tick(100));
        assert_eq!(anim.display_text(), "A");
        anim.tick(200);
        assert_eq!(anim.display_text(), "AB");

        // Held through the pause.
        anim.tick(2_000);
        assert_eq!(anim.display_text(), "AB");
        anim.tick(2_349);
        assert_eq!(anim.display_text(), "AB");
        anim.tick(2_350);
        assert_eq!(anim.display_text(), "A");
        assert!(anim.is_deleting());
        anim.tick(2_400);
        assert_eq!(anim.display_text(), "");
        anim.tick(2_450);
        assert_eq!(anim.index(), 1);
        anim.tick(2_550);
        assert_eq!(anim.display_text(), "C");
    }

    #[test]
    fn late_tick_catches_up_in_order() {
        let mut anim = TypingAnimation::new(&phrases(&["AB", "C"]), timing());
        anim.start(0);
        anim.tick(2_550);
        assert_eq!(anim.display_text(), "C");
        assert_eq!(anim.index(), 1);
    }

    #[test]
    fn teardown_freezes_the_text() {
        let mut anim = TypingAnimation::new(&phrases(&["AB"]), timing());
        anim.start(0);
        anim.tick(100);
        anim.teardown();
        assert!(!anim.is_running());
        assert!(!anim.tick(100_000));
        assert_eq!(anim.display_text(), "A");
        anim.start(200_000);
        assert!(!anim.tick(300_000));
    }

    proptest! {
        #[test]
        fn display_never_exceeds_current_phrase(
            list in prop::collection::vec("[a-zA-Z ]{0,8}", 1..5),
            steps in 0usize..200,
        ) {
            let lens: Vec<usize> = list.iter().map(|p| p.chars().count()).collect();
            for f in Frames::new(&list, timing()).take(steps) {
                let n = f.text.chars().count();
                prop_assert!(n <= lens[f.index]);
                prop_assert!(list[f.index].starts_with(&f.text));
            }
        }
    }
}
