/// Position of a step in a multi-step dialog. Steps only move to a higher
/// index.
pub trait DialogStep {
    fn index(&self) -> usize;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DialogPhase<S> {
    #[default]
    Closed,
    Open(S),
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    Confirmed,
    Cancelled,
}

/// `Closed → Open(step) → {Confirmed, Cancelled} → Closed`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dialog<S> {
    phase: DialogPhase<S>,
    last_outcome: Option<DialogOutcome>,
}

impl<S: DialogStep> Default for Dialog<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DialogStep> Dialog<S> {
    pub fn new() -> Self {
        Self {
            phase: DialogPhase::Closed,
            last_outcome: None,
        }
    }

    pub fn phase(&self) -> &DialogPhase<S> {
        &self.phase
    }

    pub fn step(&self) -> Option<&S> {
        match &self.phase {
            DialogPhase::Open(step) => Some(step),
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.phase, DialogPhase::Open(_))
    }

    /// Only a closed dialog can be opened.
    pub fn open(&mut self, first: S) -> bool {
        if !matches!(self.phase, DialogPhase::Closed) {
            return false;
        }
        self.phase = DialogPhase::Open(first);
        true
    }

    /// Move to `next` if it comes after the current step.
    pub fn advance(&mut self, next: S) -> bool {
        let forward = matches!(
            &self.phase,
            DialogPhase::Open(current) if next.index() > current.index()
        );
        if forward {
            self.phase = DialogPhase::Open(next);
        }
        forward
    }

    pub fn confirm(&mut self) -> bool {
        self.settle(DialogPhase::Confirmed)
    }

    pub fn cancel(&mut self) -> bool {
        self.settle(DialogPhase::Cancelled)
    }

    fn settle(&mut self, phase: DialogPhase<S>) -> bool {
        if !self.is_open() {
            return false;
        }
        self.phase = phase;
        true
    }

    /// Return to `Closed` after a confirm or cancel.
    pub fn close(&mut self) -> Option<DialogOutcome> {
        let outcome = match self.phase {
            DialogPhase::Confirmed => DialogOutcome::Confirmed,
            DialogPhase::Cancelled => DialogOutcome::Cancelled,
            DialogPhase::Closed | DialogPhase::Open(_) => return None,
        };
        self.phase = DialogPhase::Closed;
        self.last_outcome = Some(outcome);
        Some(outcome)
    }

    /// Cancel and close in one step, e.g. on Escape.
    pub fn dismiss(&mut self) -> Option<DialogOutcome> {
        self.cancel();
        self.close()
    }

    pub fn last_outcome(&self) -> Option<DialogOutcome> {
        self.last_outcome
    }
}
