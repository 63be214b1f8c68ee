//! Slot providers: the last resort of slot resolution.
//!
//! When neither the context nor the knowledge base covers a slot, the engine
//! asks its [`SlotProvider`]. [`PromptProvider`] asks an operator and blocks
//! until a line is entered; [`FailUnresolved`] is the non-interactive policy.
//! Any `FnMut(&SlotRequest) -> InferResult<Filler>` closure is a provider too.

use std::io::{BufRead, BufReader, Stdin, Stdout, Write};

use crate::error::InferError;
use crate::node::Filler;

use super::InferResult;

/// What the engine needs a value for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRequest<'a> {
    /// Label of the ACT owning the slot.
    pub action: &'a str,
    pub slot: &'a str,
}

impl SlotRequest<'_> {
    pub fn unresolved(&self) -> InferError {
        InferError::UnresolvedSlot {
            action: self.action.to_string(),
            slot: self.slot.to_string(),
        }
    }
}

/// Supplies a value for a slot nothing else could fill.
pub trait SlotProvider {
    fn provide(&mut self, request: &SlotRequest<'_>) -> InferResult<Filler>;
}

impl<F> SlotProvider for F
where
    F: FnMut(&SlotRequest<'_>) -> InferResult<Filler>,
{
    fn provide(&mut self, request: &SlotRequest<'_>) -> InferResult<Filler> {
        self(request)
    }
}

/// Refuses every request with [`InferError::UnresolvedSlot`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FailUnresolved;

impl SlotProvider for FailUnresolved {
    fn provide(&mut self, request: &SlotRequest<'_>) -> InferResult<Filler> {
        Err(request.unresolved())
    }
}

/// Prompts an operator and takes the answer literally.
///
/// The answer is the line read, minus its line terminator. End of input
/// means nobody can answer and yields [`InferError::UnresolvedSlot`].
#[derive(Debug)]
pub struct PromptProvider<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptProvider<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl PromptProvider<BufReader<Stdin>, Stdout> {
    /// Prompt on stdout, read from stdin.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(std::io::stdin()), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> SlotProvider for PromptProvider<R, W> {
    fn provide(&mut self, request: &SlotRequest<'_>) -> InferResult<Filler> {
        write!(
            self.output,
            "Please provide a value for the '{}' in action '{}': ",
            request.slot, request.action
        )
        .and_then(|()| self.output.flush())
        .map_err(|source| InferError::Elicitation { source })?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|source| InferError::Elicitation { source })?;
        if read == 0 {
            tracing::warn!(
                action = request.action,
                slot = request.slot,
                "input closed while eliciting slot"
            );
            return Err(request.unresolved());
        }

        let answer = line
            .strip_suffix('\n')
            .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
            .unwrap_or(&line);
        Ok(Filler::Text(answer.to_string()))
    }
}
