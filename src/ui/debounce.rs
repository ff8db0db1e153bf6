use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

/// Collapses bursts of calls into one, fired after `wait_ms` of quiet.
/// Dropping the pending `Timeout` cancels it.
#[derive(Clone)]
pub struct Debouncer {
    wait_ms: u32,
    action: Rc<dyn Fn()>,
    pending: Rc<RefCell<Option<Timeout>>>,
}

impl Debouncer {
    pub fn new(wait_ms: u32, action: impl Fn() + 'static) -> Self {
        Self {
            wait_ms,
            action: Rc::new(action),
            pending: Rc::new(RefCell::new(None)),
        }
    }

    pub fn call(&self) {
        let action = self.action.clone();
        let timeout = Timeout::new(self.wait_ms, move || action());
        // Replacing drops (and so clears) the previous timer.
        self.pending.borrow_mut().replace(timeout);
    }
}
