//! Bounded undo/redo history of executed edit commands.

use std::collections::VecDeque;

use crate::command::{EditCommand, EditContext};

/// Default number of undoable steps kept.
pub const DEFAULT_MAX_UNDO: usize = 20;

/// Undo stack bounded to `max_depth`, unbounded redo stack.
///
/// The undo stack is a deque so the oldest entry can be dropped from the
/// bottom once the bound is exceeded.
#[derive(Debug)]
pub struct CommandHistory {
    undo: VecDeque<Box<dyn EditCommand>>,
    redo: Vec<Box<dyn EditCommand>>,
    max_depth: usize,
}

impl CommandHistory {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo: VecDeque::with_capacity(max_depth),
            redo: Vec::new(),
            max_depth,
        }
    }

    /// Applies `cmd`, records it for undo and clears the redo branch.
    pub fn execute(&mut self, mut cmd: Box<dyn EditCommand>, ctx: &mut EditContext<'_>) {
        cmd.apply(ctx);
        self.redo.clear();
        self.push_undo(cmd);
    }

    /// Reverts the most recent command. Returns `false` if there was none.
    pub fn undo(&mut self, ctx: &mut EditContext<'_>) -> bool {
        let Some(mut cmd) = self.undo.pop_back() else {
            return false;
        };
        cmd.revert(ctx);
        self.redo.push(cmd);
        true
    }

    /// Re-applies the most recently undone command. Returns `false` if there was none.
    pub fn redo(&mut self, ctx: &mut EditContext<'_>) -> bool {
        let Some(mut cmd) = self.redo.pop() else {
            return false;
        };
        cmd.apply(ctx);
        self.push_undo(cmd);
        true
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn push_undo(&mut self, cmd: Box<dyn EditCommand>) {
        self.undo.push_back(cmd);
        while self.undo.len() > self.max_depth {
            self.undo.pop_front();
        }
    }
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UNDO)
    }
}
