//! Self-rescheduling frame loop
//!
//! One canonical Stopped/Running state machine shared by every pattern: the
//! driver schedules a frame, the fired frame renders and schedules the next
//! one, and `stop` cancels whatever is pending.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::scheduler::{FrameScheduler, FrameToken};
use super::Pattern;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Stopped,
    Running,
}

struct DriverState {
    pattern: Box<dyn Pattern>,
    scheduler: Rc<dyn FrameScheduler>,
    phase: Phase,
    pending: Option<FrameToken>,
}

/// Drives one pattern through the host's frame scheduler. Dropping the
/// driver stops the loop.
pub struct PatternDriver {
    state: Rc<RefCell<DriverState>>,
}

impl PatternDriver {
    pub fn new(pattern: Box<dyn Pattern>, scheduler: Rc<dyn FrameScheduler>) -> Self {
        Self {
            state: Rc::new(RefCell::new(DriverState {
                pattern,
                scheduler,
                phase: Phase::Stopped,
                pending: None,
            })),
        }
    }

    /// Begin the render loop. No-op while already running.
    pub fn start(&self) {
        {
            let mut state = self.state.borrow_mut();
            if state.phase == Phase::Running {
                return;
            }
            state.phase = Phase::Running;
        }
        Self::schedule_frame(&self.state);
    }

    /// Halt the loop, cancelling any pending frame. Idempotent.
    pub fn stop(&self) {
        let (scheduler, token) = {
            let mut state = self.state.borrow_mut();
            state.phase = Phase::Stopped;
            (state.scheduler.clone(), state.pending.take())
        };
        if let Some(token) = token {
            scheduler.cancel(token);
        }
    }

    /// Render a single frame synchronously, outside the scheduled loop
    pub fn render_once(&self) {
        self.state.borrow_mut().pattern.render();
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().phase == Phase::Running
    }

    fn schedule_frame(state: &Rc<RefCell<DriverState>>) {
        let scheduler = state.borrow().scheduler.clone();
        let weak = Rc::downgrade(state);
        let token = scheduler.schedule(Box::new(move || Self::on_frame(weak)));
        state.borrow_mut().pending = Some(token);
    }

    fn on_frame(weak: Weak<RefCell<DriverState>>) {
        let Some(state) = weak.upgrade() else {
            return;
        };
        {
            let mut inner = state.borrow_mut();
            inner.pending = None;
            // A frame the scheduler failed to cancel must not render
            if inner.phase != Phase::Running {
                return;
            }
            inner.pattern.render();
        }
        Self::schedule_frame(&state);
    }
}

impl Drop for PatternDriver {
    fn drop(&mut self) {
        self.stop();
    }
}
