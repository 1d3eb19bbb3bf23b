use crate::error::Result;

/// A stack of reversal commands, newest last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoLog<C> {
    records: Vec<C>,
}

impl<C> Default for UndoLog<C> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<C> UndoLog<C> {
    pub fn record(&mut self, command: C) {
        self.records.push(command);
    }

    pub fn pop(&mut self) -> Option<C> {
        self.records.pop()
    }

    pub fn peek(&self) -> Option<&C> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A component that records how to reverse each of its mutations.
///
/// `undo` pops the newest command and hands it to `apply_inverse`. An empty
/// log is a no-op. An inverse should never fail against a log it wrote
/// itself, so an error here means some invariant was broken upstream.
pub trait Undoable {
    type Command;

    fn undo_log(&mut self) -> &mut UndoLog<Self::Command>;

    fn apply_inverse(&mut self, command: Self::Command) -> Result<()>;

    fn undo(&mut self) -> Result<()> {
        match self.undo_log().pop() {
            Some(command) => self.apply_inverse(command),
            None => Ok(()),
        }
    }
}
