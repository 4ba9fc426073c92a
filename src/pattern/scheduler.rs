//! Frame-scheduling primitive
//!
//! Hosts provide a way to run a callback before the next repaint and to
//! cancel one that has not fired yet. The browser implementation lives in
//! `platform::web`; `ManualScheduler` fires frames by hand for headless
//! hosts and tests.

use std::cell::RefCell;

/// Opaque handle to a scheduled frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameToken(pub u64);

pub type FrameCallback = Box<dyn FnOnce()>;

/// Schedule a callback for the next frame; cancellable until it fires
pub trait FrameScheduler {
    fn schedule(&self, callback: FrameCallback) -> FrameToken;

    /// Cancel a pending frame. Unknown or already-fired tokens are ignored.
    fn cancel(&self, token: FrameToken);
}

/// Queue-backed scheduler fired explicitly by the caller
#[derive(Default)]
pub struct ManualScheduler {
    inner: RefCell<ManualQueue>,
}

#[derive(Default)]
struct ManualQueue {
    next_token: u64,
    pending: Vec<(FrameToken, FrameCallback)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks waiting to fire
    pub fn pending(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Fire the oldest pending callback. Returns false when none are queued.
    pub fn fire_next(&self) -> bool {
        let entry = {
            let mut inner = self.inner.borrow_mut();
            if inner.pending.is_empty() {
                None
            } else {
                Some(inner.pending.remove(0))
            }
        };
        match entry {
            Some((_, callback)) => {
                callback();
                true
            }
            None => false,
        }
    }

    /// Fire frames until the queue drains or `limit` frames have run;
    /// returns how many fired
    pub fn run(&self, limit: usize) -> usize {
        let mut fired = 0;
        while fired < limit && self.fire_next() {
            fired += 1;
        }
        fired
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule(&self, callback: FrameCallback) -> FrameToken {
        let mut inner = self.inner.borrow_mut();
        inner.next_token += 1;
        let token = FrameToken(inner.next_token);
        inner.pending.push((token, callback));
        token
    }

    fn cancel(&self, token: FrameToken) {
        self.inner.borrow_mut().pending.retain(|(t, _)| *t != token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn fires_in_schedule_order() {
        let scheduler = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for i in 0..3 {
            let log = log.clone();
            scheduler.schedule(Box::new(move || log.borrow_mut().push(i)));
        }
        assert_eq!(scheduler.pending(), 3);
        assert_eq!(scheduler.run(usize::MAX), 3);
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn cancelled_frames_never_fire() {
        let scheduler = ManualScheduler::new();
        let fired = Rc::new(Cell::new(false));

        let token = {
            let fired = fired.clone();
            scheduler.schedule(Box::new(move || fired.set(true)))
        };
        scheduler.cancel(token);

        assert_eq!(scheduler.pending(), 0);
        assert!(!scheduler.fire_next());
        assert!(!fired.get());
    }

    #[test]
    fn cancel_of_unknown_token_is_ignored() {
        let scheduler = ManualScheduler::new();
        scheduler.cancel(FrameToken(99));
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn callbacks_may_reschedule_while_firing() {
        // A frame scheduling its successor must not deadlock the queue
        let scheduler = Rc::new(ManualScheduler::new());
        let count = Rc::new(Cell::new(0));
        {
            let chained = scheduler.clone();
            let count = count.clone();
            scheduler.schedule(Box::new(move || {
                count.set(count.get() + 1);
                let count = count.clone();
                chained.schedule(Box::new(move || count.set(count.get() + 1)));
            }));
        }

        assert!(scheduler.fire_next());
        assert_eq!(scheduler.pending(), 1);
        assert!(scheduler.fire_next());
        assert_eq!(count.get(), 2);
    }
}
