use crate::application::SessionCommand;
use crate::domain::{ActivityId, SimTime, TimeKind};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

/// A command due for delivery, with enough context for the liveness check
#[derive(Debug, Clone, PartialEq)]
pub struct DueCommand {
    pub fire_time: SimTime,
    pub kind: TimeKind,
    pub owner: Option<ActivityId>,
    pub command: SessionCommand,
}

#[derive(Debug)]
struct Entry {
    fire_time: SimTime,
    seq: u64,
    kind: TimeKind,
    owner: Option<ActivityId>,
    command: SessionCommand,
}

// Ordering key is (fire_time, seq); `seq` is unique so this is a total
// order consistent with equality.
impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_time == other.fire_time && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we want the earliest entry
        // (and, on ties, the lowest seq) on top.
        (other.fire_time, other.seq).cmp(&(self.fire_time, self.seq))
    }
}

/// Fire-and-forget timer service over two timelines
///
/// Registration returns immediately; commands fire when the host advances
/// the clock past their deadline. Commands scheduled for the same
/// timestamp fire in registration order. There is no cancellation API:
/// staleness is resolved by the session's liveness check at fire time.
#[derive(Debug, Default)]
pub struct Scheduler {
    sim: BinaryHeap<Entry>,
    real: BinaryHeap<Entry>,
    sim_now: SimTime,
    real_now: SimTime,
    paused: bool,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sim_now(&self) -> SimTime {
        self.sim_now
    }

    pub fn real_now(&self) -> SimTime {
        self.real_now
    }

    pub fn now(&self, kind: TimeKind) -> SimTime {
        match kind {
            TimeKind::Sim => self.sim_now,
            TimeKind::Real => self.real_now,
        }
    }

    /// Pause the simulation timeline; real-time entries keep firing
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pending(&self) -> usize {
        self.sim.len() + self.real.len()
    }

    /// Register a command to fire once after `delay`
    pub fn schedule(
        &mut self,
        delay: Duration,
        kind: TimeKind,
        owner: Option<ActivityId>,
        command: SessionCommand,
    ) -> SimTime {
        let fire_time = self.now(kind) + delay;
        let entry = Entry {
            fire_time,
            seq: self.next_seq,
            kind,
            owner,
            command,
        };
        self.next_seq += 1;

        tracing::debug!(%fire_time, timeline = %kind, "scheduled command");

        match kind {
            TimeKind::Sim => self.sim.push(entry),
            TimeKind::Real => self.real.push(entry),
        }

        fire_time
    }

    /// Advance both timelines by `dt` (sim only if unpaused) and collect
    /// everything that came due
    ///
    /// Entries from the same timeline are delivered in (fire-time,
    /// registration) order. The timelines have independent epochs once a
    /// pause has occurred, so ordering across them is unspecified; sim
    /// entries are delivered first.
    pub fn advance(&mut self, dt: Duration) -> Vec<DueCommand> {
        self.real_now.advance(dt);
        if !self.paused {
            self.sim_now.advance(dt);
        }

        let mut due: Vec<Entry> = Vec::new();

        while let Some(top) = self.sim.peek() {
            if top.fire_time > self.sim_now {
                break;
            }
            if let Some(entry) = self.sim.pop() {
                due.push(entry);
            }
        }

        while let Some(top) = self.real.peek() {
            if top.fire_time > self.real_now {
                break;
            }
            if let Some(entry) = self.real.pop() {
                due.push(entry);
            }
        }

        due.into_iter()
            .map(|e| DueCommand {
                fire_time: e.fire_time,
                kind: e.kind,
                owner: e.owner,
                command: e.command,
            })
            .collect()
    }
}
