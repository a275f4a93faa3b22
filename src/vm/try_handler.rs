//! Exception routing (spec §9 resolved open question).
//!
//! The reference tracks a single process-wide `try_flag` boolean, so a
//! nested `try` silently defers to whichever is outermost. This is an
//! intentional upgrade to a stack of handler contexts: each `TRY_START`
//! pushes a [`TryHandler`] recording where its `CATCH_START` lives and how
//! deep the call stack was at the time; each `TRY_END` pops it. A
//! trappable fault routes to the innermost still-active handler and
//! unwinds the call stack back to the frame that installed it.

/// One active `try` block's recovery target.
#[derive(Debug)]
pub struct TryHandler {
    pub catch_pc: usize,
    pub frame_depth: usize,
}
