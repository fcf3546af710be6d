//! Yes/no confirmation boundary for destructive operations.
//!
//! # Invariants
//! - `true` means the user explicitly affirmed; anything else cancels.
//! - A gate is asked at most once per operation.

/// Synchronous question/answer boundary owned by the front end.
pub trait ConfirmationGate {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<G: ConfirmationGate + ?Sized> ConfirmationGate for &mut G {
    fn confirm(&mut self, message: &str) -> bool {
        (**self).confirm(message)
    }
}

/// Gate that always affirms.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

impl ConfirmationGate for AutoConfirm {
    fn confirm(&mut self, _message: &str) -> bool {
        true
    }
}

/// Gate that always cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoDecline;

impl ConfirmationGate for AutoDecline {
    fn confirm(&mut self, _message: &str) -> bool {
        false
    }
}

/// Gate answering with a fixed value and recording the prompts it saw.
#[derive(Debug, Clone, Default)]
pub struct PresetAnswer {
    answer: bool,
    prompts: Vec<String>,
}

impl PresetAnswer {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            prompts: Vec::new(),
        }
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl ConfirmationGate for PresetAnswer {
    fn confirm(&mut self, message: &str) -> bool {
        self.prompts.push(message.to_string());
        self.answer
    }
}
