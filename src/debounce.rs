//! Trailing-edge debouncing over an injected clock.
//!
//! Every call replaces the pending invocation and pushes its deadline to
//! `now + wait`. The wrapped function runs at most once per quiet period,
//! always with the arguments of the latest call.

use std::time::Duration;

/// Timing half of a debounce: tracks the latest arguments and their deadline
#[derive(Debug, Clone)]
pub struct Debouncer<A> {
    wait: Duration,
    pending: Option<(Duration, A)>,
}

impl<A> Debouncer<A> {
    pub fn new(wait: Duration) -> Self {
        Self { wait, pending: None }
    }

    /// Replaces any pending arguments and restarts the quiet period
    pub fn call(&mut self, now: Duration, args: A) {
        self.pending = Some((now + self.wait, args));
    }

    /// Takes the pending arguments once their deadline has passed
    pub fn poll(&mut self, now: Duration) -> Option<A> {
        match &self.pending {
            Some((deadline, _)) if *deadline <= now => self.pending.take().map(|(_, args)| args),
            _ => None,
        }
    }

    /// Deadline of the pending call, if any
    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }
}

/// A function wrapped in a [`Debouncer`]
pub struct Debounced<A> {
    debouncer: Debouncer<A>,
    f: Box<dyn FnMut(A)>,
}

impl<A> std::fmt::Debug for Debounced<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debounced")
            .field("wait", &self.debouncer.wait)
            .field("deadline", &self.debouncer.deadline())
            .finish_non_exhaustive()
    }
}

/// Wraps `f` so that bursts of calls collapse into one trailing call
pub fn debounce<A, F>(f: F, wait: Duration) -> Debounced<A>
where
    F: FnMut(A) + 'static,
{
    Debounced {
        debouncer: Debouncer::new(wait),
        f: Box::new(f),
    }
}

impl<A> Debounced<A> {
    pub fn call(&mut self, now: Duration, args: A) {
        self.debouncer.call(now, args);
    }

    /// Runs the function if the quiet period has elapsed.
    ///
    /// Returns true if it ran.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.debouncer.poll(now) {
            Some(args) => {
                (self.f)(args);
                true
            }
            None => false,
        }
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.debouncer.deadline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_burst_collapses_to_last_call() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let mut debounced = debounce(move |n: u32| sink.borrow_mut().push(n), ms(250));

        for (i, t) in [0, 20, 40, 60, 80].into_iter().enumerate() {
            debounced.call(ms(t), i as u32 + 1);
            assert!(!debounced.poll(ms(t)));
        }
        assert!(!debounced.poll(ms(329)));
        assert!(debounced.poll(ms(330)));
        assert!(!debounced.poll(ms(10_000)));

        assert_eq!(*calls.borrow(), vec![5]);
    }

    #[test]
    fn test_separate_quiet_periods_fire_separately() {
        let calls = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&calls);
        let mut debounced = debounce(move |_: ()| *sink.borrow_mut() += 1, ms(250));

        debounced.call(ms(0), ());
        debounced.poll(ms(250));
        debounced.call(ms(1000), ());
        debounced.poll(ms(1250));
        assert_eq!(*calls.borrow(), 2);
    }

    #[test]
    fn test_each_call_pushes_deadline() {
        let mut debouncer = Debouncer::new(ms(100));
        debouncer.call(ms(0), "a");
        assert_eq!(debouncer.deadline(), Some(ms(100)));
        debouncer.call(ms(60), "b");
        assert_eq!(debouncer.deadline(), Some(ms(160)));
        assert_eq!(debouncer.poll(ms(100)), None);
        assert_eq!(debouncer.poll(ms(160)), Some("b"));
        assert_eq!(debouncer.deadline(), None);
    }
}
