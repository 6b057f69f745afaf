use std::collections::HashMap;
use std::time::Instant;

/// Deferred work the practice session asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timer {
    /// Release the highlight of a pressed key.
    ClearKey(String),
    /// Move on after the prompt was typed correctly.
    AdvancePrompt,
}

/// What a timer is keyed on. Scheduling again under the same key supersedes the older timer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum TimerKey {
    Key(String),
    Prompt,
}

impl Timer {
    fn key(&self) -> TimerKey {
        match self {
            Timer::ClearKey(id) => TimerKey::Key(id.clone()),
            Timer::AdvancePrompt => TimerKey::Prompt,
        }
    }
}

#[derive(Debug, Clone)]
struct Scheduled {
    due: Instant,
    generation: u64,
    timer: Timer,
}

/// Single-threaded timer queue polled by the event loop.
///
/// Every scheduled timer carries a generation number. A timer fires only if its generation
/// is still the latest one recorded for its key, so a newer schedule or a cancel turns any
/// earlier timer for that key into a no-op instead of letting it race.
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: Vec<Scheduled>,
    latest: HashMap<TimerKey, u64>,
    generation: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, timer: Timer, due: Instant) -> u64 {
        self.generation += 1;
        self.latest.insert(timer.key(), self.generation);
        self.entries.push(Scheduled {
            due,
            generation: self.generation,
            timer,
        });
        self.generation
    }

    pub fn cancel(&mut self, timer: &Timer) {
        let key = timer.key();
        self.latest.remove(&key);
        self.entries.retain(|e| e.timer.key() != key);
    }

    pub fn cancel_all(&mut self) {
        self.entries.clear();
        self.latest.clear();
    }

    /// Earliest deadline among timers that can still fire.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries
            .iter()
            .filter(|e| self.is_live(e))
            .map(|e| e.due)
            .min()
    }

    /// Removes every timer due at `now` and returns the ones still current, in due order.
    pub fn pop_due(&mut self, now: Instant) -> Vec<Timer> {
        let (mut due, pending): (Vec<Scheduled>, Vec<Scheduled>) =
            self.entries.drain(..).partition(|e| e.due <= now);
        self.entries = pending;

        due.sort_by_key(|e| (e.due, e.generation));
        let mut fired = Vec::new();
        for entry in due {
            if self.is_live(&entry) {
                self.latest.remove(&entry.timer.key());
                fired.push(entry.timer);
            }
        }
        fired
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| self.is_live(e)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_live(&self, entry: &Scheduled) -> bool {
        self.latest.get(&entry.timer.key()) == Some(&entry.generation)
    }
}
