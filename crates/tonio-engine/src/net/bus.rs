//! Named-event publish/subscribe.
//!
//! Single-threaded: handlers are `Rc<dyn Fn>` and the bus uses interior
//! mutability so a handler may subscribe or unsubscribe while a dispatch is in
//! flight. Each dispatch works on a snapshot of the handler list taken when it
//! starts.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A registered callback. Identity (for `off`) is the `Rc` allocation.
pub type Handler<P> = Rc<dyn Fn(&P)>;

pub struct EventBus<P> {
    handlers: RefCell<HashMap<String, Vec<Handler<P>>>>,
}

impl<P> EventBus<P> {
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(HashMap::new()),
        }
    }

    /// Append `handler` to the list for `event`.
    /// Registering the same handler twice makes it run twice.
    pub fn on(&self, event: &str, handler: Handler<P>) {
        self.handlers
            .borrow_mut()
            .entry(event.to_string())
            .or_default()
            .push(handler);
    }

    /// Wrap a closure, register it, and return the handle needed to `off` it later.
    pub fn subscribe(&self, event: &str, f: impl Fn(&P) + 'static) -> Handler<P> {
        let handler: Handler<P> = Rc::new(f);
        self.on(event, handler.clone());
        handler
    }

    /// Remove every registration of `handler` for `event`.
    pub fn off(&self, event: &str, handler: &Handler<P>) {
        let mut handlers = self.handlers.borrow_mut();
        if let Some(list) = handlers.get_mut(event) {
            list.retain(|h| !Rc::ptr_eq(h, handler));
            if list.is_empty() {
                handlers.remove(event);
            }
        }
    }

    /// Invoke every handler registered for `event`, in registration order.
    /// Returns the number of handlers invoked.
    pub fn trigger(&self, event: &str, payload: &P) -> usize {
        let snapshot: Vec<Handler<P>> = match self.handlers.borrow().get(event) {
            Some(list) => list.clone(),
            None => return 0,
        };
        for handler in &snapshot {
            handler(payload);
        }
        snapshot.len()
    }

    /// Number of registrations for `event`.
    pub fn handler_count(&self, event: &str) -> usize {
        self.handlers.borrow().get(event).map_or(0, Vec::len)
    }

    /// Drop every registration.
    pub fn clear(&self) {
        self.handlers.borrow_mut().clear();
    }
}

impl<P> Default for EventBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Log = Rc<RefCell<Vec<&'static str>>>;

    fn recorder(log: &Log, tag: &'static str) -> Handler<u32> {
        let log = log.clone();
        Rc::new(move |_: &u32| log.borrow_mut().push(tag))
    }

    #[test]
    fn invokes_in_registration_order() {
        let bus = EventBus::new();
        let log: Log = Rc::default();
        bus.on("e", recorder(&log, "a"));
        bus.on("e", recorder(&log, "b"));
        assert_eq!(bus.trigger("e", &0), 2);
        assert_eq!(*log.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn unknown_event_invokes_nothing() {
        let bus: EventBus<u32> = EventBus::new();
        assert_eq!(bus.trigger("nobody", &1), 0);
    }

    #[test]
    fn duplicate_registration_runs_twice() {
        let bus = EventBus::new();
        let log: Log = Rc::default();
        let a = recorder(&log, "a");
        bus.on("e", a.clone());
        bus.on("e", a.clone());
        bus.trigger("e", &0);
        assert_eq!(log.borrow().len(), 2);

        // off removes every match
        bus.off("e", &a);
        assert_eq!(bus.handler_count("e"), 0);
    }

    #[test]
    fn payload_reaches_handlers() {
        let bus = EventBus::new();
        let seen = Rc::new(RefCell::new(0u32));
        let sink = seen.clone();
        bus.subscribe("n", move |v: &u32| *sink.borrow_mut() += *v);
        bus.trigger("n", &5);
        bus.trigger("n", &7);
        assert_eq!(*seen.borrow(), 12);
    }

    #[test]
    fn off_during_dispatch_does_not_affect_current_pass() {
        let bus: Rc<EventBus<u32>> = Rc::new(EventBus::new());
        let log: Log = Rc::default();

        let b = recorder(&log, "b");
        let a: Handler<u32> = {
            let bus = bus.clone();
            let log = log.clone();
            let b = b.clone();
            Rc::new(move |_: &u32| {
                log.borrow_mut().push("a");
                bus.off("e", &b);
            })
        };
        bus.on("e", a.clone());
        bus.on("e", b.clone());

        bus.trigger("e", &0);
        assert_eq!(*log.borrow(), vec!["a", "b"]);

        bus.trigger("e", &0);
        assert_eq!(*log.borrow(), vec!["a", "b", "a"]);
        bus.off("e", &a);
    }

    #[test]
    fn later_handler_removing_earlier_one_after_it_ran() {
        let bus: Rc<EventBus<u32>> = Rc::new(EventBus::new());
        let log: Log = Rc::default();

        let a = recorder(&log, "a");
        let b: Handler<u32> = {
            let bus = bus.clone();
            let log = log.clone();
            let a = a.clone();
            Rc::new(move |_: &u32| {
                log.borrow_mut().push("b");
                bus.off("e", &a);
            })
        };
        bus.on("e", a.clone());
        bus.on("e", b.clone());

        bus.trigger("e", &0);
        bus.trigger("e", &0);
        assert_eq!(*log.borrow(), vec!["a", "b", "b"]);
        bus.clear();
    }
}
