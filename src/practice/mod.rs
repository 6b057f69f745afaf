pub mod timers;

use crate::config::PracticeParams;
use crate::layout::SPACE_IDENTITY;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use timers::{Timer, TimerQueue};
use tracing::debug;

pub const DEFAULT_PROMPTS: [&str; 5] = [
    "Pack my box with five dozen liquor jugs.",
    "The quick brown fox jumps over the lazy dog.",
    "Waltz, bad nymph, for quick jigs vex.",
    "How vexingly quick daft zebras jump!",
    "Bright vixens jump; dozy fowl quack.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharStatus {
    Correct,
    Incorrect,
    Current,
    Pending,
}

/// Name under which a typed character lights up its key.
pub fn key_identity(ch: char) -> String {
    if ch == ' ' {
        SPACE_IDENTITY.to_string()
    } else {
        ch.to_uppercase().collect()
    }
}

/// Typing-practice state: the prompt being typed, what has been typed so far,
/// which keys are lit, and the timers that will unlight them.
#[derive(Debug)]
pub struct PracticeSession {
    prompts: Vec<String>,
    index: usize,
    input: Vec<char>,
    pressed: HashSet<String>,
    timers: TimerQueue,
    clear_delay: Duration,
    advance_delay: Duration,
}

impl PracticeSession {
    pub fn new(params: &PracticeParams) -> Self {
        let prompts = if params.prompts.is_empty() {
            DEFAULT_PROMPTS.iter().map(|p| p.to_string()).collect()
        } else {
            params.prompts.clone()
        };

        Self {
            prompts,
            index: 0,
            input: Vec::new(),
            pressed: HashSet::new(),
            timers: TimerQueue::new(),
            clear_delay: Duration::from_millis(params.clear_delay_ms),
            advance_delay: Duration::from_millis(params.advance_delay_ms),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompts[self.index]
    }

    pub fn prompt_index(&self) -> usize {
        self.index
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.len()
    }

    pub fn input(&self) -> String {
        self.input.iter().collect()
    }

    pub fn typed_len(&self) -> usize {
        self.input.len()
    }

    pub fn prompt_len(&self) -> usize {
        self.prompt().chars().count()
    }

    pub fn pressed(&self) -> &HashSet<String> {
        &self.pressed
    }

    pub fn is_complete(&self) -> bool {
        self.input.iter().copied().eq(self.prompt().chars())
    }

    /// Records a typed character and lights its key until `clear_delay` has passed.
    /// Input beyond the prompt's length is ignored.
    pub fn type_char(&mut self, ch: char, now: Instant) {
        if self.input.len() >= self.prompt_len() {
            return;
        }

        let identity = key_identity(ch);
        self.pressed.insert(identity.clone());
        self.timers
            .schedule(Timer::ClearKey(identity), now + self.clear_delay);

        self.input.push(ch);
        if self.is_complete() {
            debug!("Prompt {} completed", self.index + 1);
            self.timers
                .schedule(Timer::AdvancePrompt, now + self.advance_delay);
        }
    }

    pub fn backspace(&mut self) {
        if self.input.pop().is_some() {
            self.timers.cancel(&Timer::AdvancePrompt);
        }
    }

    /// Moves to the next prompt, wrapping around, and drops all pending timers.
    pub fn next_prompt(&mut self) {
        self.index = (self.index + 1) % self.prompts.len();
        self.input.clear();
        self.pressed.clear();
        self.timers.cancel_all();
    }

    /// Fires every timer due at `now`. Returns true if anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for timer in self.timers.pop_due(now) {
            match timer {
                Timer::ClearKey(identity) => {
                    changed |= self.pressed.remove(&identity);
                }
                Timer::AdvancePrompt => {
                    self.next_prompt();
                    changed = true;
                }
            }
        }
        changed
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn char_statuses(&self) -> Vec<(char, CharStatus)> {
        let typed = self.input.len();
        self.prompt()
            .chars()
            .enumerate()
            .map(|(i, ch)| {
                let status = match self.input.get(i) {
                    Some(&t) if t == ch => CharStatus::Correct,
                    Some(_) => CharStatus::Incorrect,
                    None if i == typed => CharStatus::Current,
                    None => CharStatus::Pending,
                };
                (ch, status)
            })
            .collect()
    }
}
