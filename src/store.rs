//! Flux state containers: the action type, the dispatcher, and one store
//! per domain.
//!
//! Every store owns exactly one piece of application state, exposes it
//! read-only via `get_state`, and mutates it only in response to dispatched
//! actions. After any mutation the store notifies its subscribers with no
//! payload; observers re-read state through the accessor.

#[cfg(test)]
use mockall::automock;

pub mod action;
pub mod app;
pub mod derived;
pub mod dispatcher;
pub mod todo;
pub mod users;

/// A store registered with the [dispatcher::Dispatcher]. Each store inspects
/// every dispatched action and ignores the kinds it does not recognize.
#[cfg_attr(test, automock)]
pub trait ReduceStore: Send + Sync {
    fn on_dispatch(&self, action: &action::Action);
}

/// Change notification callback registered via a store's `subscribe`.
pub type Subscriber = Box<dyn Fn() + Send + Sync>;
