//! Loop frames and the frame stack.
//!
//! Loops are not recursive: the interpreter rewinds its cursor to a frame's
//! `body_start` each time it reaches the frame's `body_end` (the index of the
//! closing `}`) and the frame says to keep going. The top of the stack is
//! always the innermost active loop.
//!
//! A frame moves through three states:
//!
//! ```text
//! Pending --enter--> Running --body end--> Running ... --> Exhausted
//!    \                                                       ^
//!     `------------------ entry fails ----------------------'
//! ```
//!
//! Only `Running` frames live on the stack.

use std::ops::Range;

use prism_ir::LoopKind;

use crate::EvalResult;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum LoopState {
    /// Built from a loop header, entry condition not checked yet.
    Pending,
    /// The body is executing.
    Running,
    /// The continuation check failed; the frame is done.
    Exhausted,
}

/// What a frame needs to decide whether to run its body again.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum LoopResume {
    /// Iterations still to run, counted down at each body end.
    Repeat { remaining: u64 },
    /// Token range of the condition, re-evaluated at each body end.
    While { condition: Range<usize> },
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct LoopFrame {
    pub resume: LoopResume,
    /// Token index the cursor rewinds to.
    pub body_start: usize,
    /// Token index of the closing `}`.
    pub body_end: usize,
    state: LoopState,
}

impl LoopFrame {
    /// A `repeat` frame; counts below one never enter.
    pub fn repeat(count: i64, body_start: usize, body_end: usize) -> Self {
        let remaining = u64::try_from(count).unwrap_or(0);
        Self::pending(LoopResume::Repeat { remaining }, body_start, body_end)
    }

    pub fn while_loop(condition: Range<usize>, body_start: usize, body_end: usize) -> Self {
        Self::pending(LoopResume::While { condition }, body_start, body_end)
    }

    fn pending(resume: LoopResume, body_start: usize, body_end: usize) -> Self {
        LoopFrame {
            resume,
            body_start,
            body_end,
            state: LoopState::Pending,
        }
    }

    pub fn kind(&self) -> LoopKind {
        match self.resume {
            LoopResume::Repeat { .. } => LoopKind::Repeat,
            LoopResume::While { .. } => LoopKind::While,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Run the entry check (from `Pending`) or the continuation check (from
    /// `Running`) and record the outcome.
    ///
    /// `condition` evaluates a `while` condition range; it is not called for
    /// `repeat` frames. An `Exhausted` frame stays exhausted.
    pub fn advance<F>(&mut self, condition: F) -> EvalResult<LoopState>
    where
        F: FnOnce(Range<usize>) -> EvalResult<bool>,
    {
        let next = match (&mut self.resume, self.state) {
            (_, LoopState::Exhausted) => LoopState::Exhausted,
            (LoopResume::Repeat { remaining }, LoopState::Pending) => running_if(*remaining > 0),
            (LoopResume::Repeat { remaining }, LoopState::Running) => {
                *remaining = remaining.saturating_sub(1);
                running_if(*remaining > 0)
            }
            (LoopResume::While { condition: range }, _) => running_if(condition(range.clone())?),
        };
        self.state = next;
        Ok(next)
    }
}

fn running_if(holds: bool) -> LoopState {
    if holds {
        LoopState::Running
    } else {
        LoopState::Exhausted
    }
}

/// Stack of active loop frames, innermost on top.
#[derive(Clone, Debug, Default)]
pub struct LoopStack {
    frames: Vec<LoopFrame>,
}

impl LoopStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: LoopFrame) {
        tracing::debug!(
            kind = frame.kind().as_str(),
            body_start = frame.body_start,
            body_end = frame.body_end,
            depth = self.frames.len() + 1,
            "loop frame pushed"
        );
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<LoopFrame> {
        let frame = self.frames.pop()?;
        tracing::debug!(
            kind = frame.kind().as_str(),
            depth = self.frames.len(),
            "loop frame popped"
        );
        Some(frame)
    }

    #[inline]
    pub fn top(&self) -> Option<&LoopFrame> {
        self.frames.last()
    }

    #[inline]
    pub fn top_mut(&mut self) -> Option<&mut LoopFrame> {
        self.frames.last_mut()
    }

    /// Whether `cursor` sits on the closing `}` of the innermost loop.
    pub fn at_body_end(&self, cursor: usize) -> bool {
        self.top().is_some_and(|frame| frame.body_end == cursor)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
