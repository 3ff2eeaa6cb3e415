//! Store owning view-level application state.

use core::fmt;
use std::sync::Mutex;

use crate::ui::colors::{Colors, Theme};

use super::{action::Action, ReduceStore, Subscriber};

/// Identifies the currently active view.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub enum ViewID {
    Todos,
    Users,
    ViewSelect,
}

impl fmt::Display for ViewID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// View management state shared by all views.
#[derive(Debug, Clone)]
pub struct AppState {
    pub view_id: ViewID,
    pub render_view_select: bool,
    pub colors: Colors,
}

/// Sole owner and mutator of view management state.
pub struct AppStore {
    state: Mutex<AppState>,
    subscribers: Mutex<Vec<Subscriber>>,
}

impl AppStore {
    pub fn new(theme: Theme) -> Self {
        Self {
            state: Mutex::new(AppState {
                view_id: ViewID::Todos,
                render_view_select: false,
                colors: Colors::new(theme.to_palette()),
            }),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn get_state(&self) -> AppState {
        self.state.lock().unwrap().clone()
    }

    pub fn subscribe<F: Fn() + Send + Sync + 'static>(&self, f: F) {
        self.subscribers.lock().unwrap().push(Box::new(f));
    }

    fn emit_change(&self) {
        for subscriber in self.subscribers.lock().unwrap().iter() {
            subscriber();
        }
    }
}

impl ReduceStore for AppStore {
    fn on_dispatch(&self, action: &Action) {
        let recognized = {
            let mut state = self.state.lock().unwrap();
            reduce(&mut state, action)
        };

        if recognized {
            self.emit_change();
        }
    }
}

fn reduce(state: &mut AppState, action: &Action) -> bool {
    match action {
        Action::UpdateView(id) => {
            state.view_id = *id;
        }
        Action::ToggleViewSelect => {
            state.render_view_select = !state.render_view_select;
        }
        _ => return false,
    }

    true
}
