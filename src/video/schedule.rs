//! Delayed callbacks for dimension probing.

use std::rc::Rc;

/// Runs a task once after a delay on the page's event loop.
pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

/// Schedule `probe` once per entry in `delays_ms`.
///
/// Probes may run more than once for the same session, so `probe` must be
/// idempotent.
pub fn schedule_probes<S: Scheduler + ?Sized>(scheduler: &S, delays_ms: &[u32], probe: Rc<dyn Fn()>) {
    for &delay in delays_ms {
        let probe = Rc::clone(&probe);
        scheduler.schedule(delay, Box::new(move || probe()));
    }
}
