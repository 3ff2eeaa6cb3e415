//! Broadcast channel routing actions to registered stores.

use std::sync::{Arc, Mutex};

use super::{action::Action, ReduceStore};

/// Forwards every dispatched action to all registered stores. Constructed
/// once and passed by reference; there is no ambient global dispatcher.
/// Delivery order across stores is unspecified.
#[derive(Default)]
pub struct Dispatcher {
    stores: Mutex<Vec<Arc<dyn ReduceStore>>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            stores: Mutex::new(Vec::new()),
        }
    }

    pub fn register(&self, store: Arc<dyn ReduceStore>) {
        self.stores.lock().unwrap().push(store);
    }

    pub fn dispatch(&self, action: Action) {
        // release the registry lock before reducing so subscribers may
        // dispatch follow-up actions without deadlocking
        let stores = self.stores.lock().unwrap().clone();

        for store in stores.iter() {
            store.on_dispatch(&action);
        }
    }
}

#[cfg(test)]
#[path = "./dispatcher_tests.rs"]
mod tests;
