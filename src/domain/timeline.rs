/// Timeline: the cancellable set of scheduled events owned by a controller.
///
/// Every deferred action is an explicit record `{fire_at, action}` stored in
/// an arena slot and addressed by a `TimerHandle`. Handles carry the slot's
/// generation, so a handle that outlived its entry (fired or cancelled) can
/// never cancel whatever was scheduled into the reused slot later.
///
/// Time is a plain millisecond count from a monotonic origin chosen by the
/// owner (the event loop uses `Instant` elapsed since startup).

/// Milliseconds since the owner's clock origin.
pub type Millis = u64;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct TimerHandle {
    slot: usize,
    generation: u32,
}

#[derive(Debug)]
struct Entry<A> {
    fire_at: Millis,
    seq: u64,
    action: A,
}

#[derive(Debug)]
struct Slot<A> {
    generation: u32,
    entry: Option<Entry<A>>,
}

#[derive(Debug)]
pub struct Timeline<A> {
    slots: Vec<Slot<A>>,
    free: Vec<usize>,
    next_seq: u64,
}

impl<A> Default for Timeline<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Timeline<A> {
    pub fn new() -> Self {
        Timeline {
            slots: Vec::new(),
            free: Vec::new(),
            next_seq: 0,
        }
    }

    /// Schedule `action` to fire once `now >= fire_at`.
    pub fn schedule(&mut self, fire_at: Millis, action: A) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        let entry = Entry { fire_at, seq, action };

        if let Some(slot) = self.free.pop() {
            let s = &mut self.slots[slot];
            s.entry = Some(entry);
            TimerHandle { slot, generation: s.generation }
        } else {
            self.slots.push(Slot { generation: 0, entry: Some(entry) });
            TimerHandle { slot: self.slots.len() - 1, generation: 0 }
        }
    }

    /// Cancel a pending entry. Returns false if it already fired or was
    /// cancelled before.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.slots.get_mut(handle.slot) {
            Some(s) if s.generation == handle.generation && s.entry.is_some() => {
                s.entry = None;
                s.generation = s.generation.wrapping_add(1);
                self.free.push(handle.slot);
                true
            }
            _ => false,
        }
    }

    /// Cancel everything still pending.
    pub fn cancel_all(&mut self) {
        for (idx, s) in self.slots.iter_mut().enumerate() {
            if s.entry.take().is_some() {
                s.generation = s.generation.wrapping_add(1);
                self.free.push(idx);
            }
        }
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.slots
            .get(handle.slot)
            .map_or(false, |s| s.generation == handle.generation && s.entry.is_some())
    }

    /// Number of entries still waiting to fire.
    #[allow(dead_code)]
    pub fn pending(&self) -> usize {
        self.slots.iter().filter(|s| s.entry.is_some()).count()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.pending() == 0
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.slots
            .iter()
            .filter_map(|s| s.entry.as_ref().map(|e| e.fire_at))
            .min()
    }

    /// Remove and return every action due at `now`, ordered by deadline and
    /// then by scheduling order.
    pub fn drain_due(&mut self, now: Millis) -> Vec<A> {
        let mut due: Vec<Entry<A>> = Vec::new();
        for (idx, s) in self.slots.iter_mut().enumerate() {
            let fire = matches!(&s.entry, Some(e) if e.fire_at <= now);
            if fire {
                if let Some(e) = s.entry.take() {
                    due.push(e);
                }
                s.generation = s.generation.wrapping_add(1);
                self.free.push(idx);
            }
        }
        due.sort_by_key(|e| (e.fire_at, e.seq));
        due.into_iter().map(|e| e.action).collect()
    }
}
