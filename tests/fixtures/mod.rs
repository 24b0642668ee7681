//! Test fixtures and mock implementations for integration testing

use oshi_ranker::session::{Notice, Presenter, SessionView};
use std::collections::VecDeque;

/// Presenter that captures every frame and notice for testing
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    frames: Vec<SessionView>,
    notices: Vec<Notice>,
    confirmations: VecDeque<bool>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue answers for upcoming reset confirmations; unanswered ones decline
    pub fn with_confirmations(mut self, answers: &[bool]) -> Self {
        self.confirmations.extend(answers.iter().copied());
        self
    }

    pub fn last_frame(&self) -> Option<&SessionView> {
        self.frames.last()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Count notices of a specific kind
    pub fn count_notices(&self, kind: &str) -> usize {
        self.notices
            .iter()
            .filter(|notice| match notice {
                Notice::DuplicateNames { .. } => kind == "DuplicateNames",
                Notice::Registered { .. } => kind == "Registered",
                Notice::Removed { .. } => kind == "Removed",
                Notice::VoteRecorded { .. } => kind == "VoteRecorded",
                Notice::NeedMoreCharacters => kind == "NeedMoreCharacters",
                Notice::ResetDone => kind == "ResetDone",
                Notice::ResetCancelled => kind == "ResetCancelled",
            })
            .count()
    }
}

impl Presenter for RecordingPresenter {
    fn render(&mut self, view: &SessionView) {
        self.frames.push(view.clone());
    }

    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }

    fn confirm_reset(&mut self) -> bool {
        self.confirmations.pop_front().unwrap_or(false)
    }
}
