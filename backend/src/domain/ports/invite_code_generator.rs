//! Port for minting invite codes.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::domain::InviteCode;

/// Source of candidate invite codes.
///
/// Implementations only promise well-formed codes; uniqueness is checked by
/// the document repository.
#[cfg_attr(test, mockall::automock)]
pub trait InviteCodeGenerator: Send + Sync {
    /// Produce the next candidate code.
    fn next_code(&self) -> InviteCode;
}

/// Deterministic generator that replays a scripted list of codes.
///
/// Once the script is exhausted the last code repeats, which lets callers
/// provoke collisions on purpose.
#[derive(Debug)]
pub struct ScriptedInviteCodeGenerator {
    remaining: Mutex<VecDeque<InviteCode>>,
    last: InviteCode,
}

impl ScriptedInviteCodeGenerator {
    /// Build a generator from at least one code.
    pub fn new(first: InviteCode, rest: impl IntoIterator<Item = InviteCode>) -> Self {
        let mut remaining: VecDeque<InviteCode> = rest.into_iter().collect();
        remaining.push_front(first.clone());
        let last = remaining.back().cloned().unwrap_or(first);
        Self {
            remaining: Mutex::new(remaining),
            last,
        }
    }
}

impl InviteCodeGenerator for ScriptedInviteCodeGenerator {
    fn next_code(&self) -> InviteCode {
        let mut guard = match self.remaining.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.pop_front().unwrap_or_else(|| self.last.clone())
    }
}
