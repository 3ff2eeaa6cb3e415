//! Store owning the GitHub user search results.

use std::sync::Mutex;

use crate::github::types::{GitHubUser, Pagination};

use super::{action::Action, ReduceStore, Subscriber};

/// Search screen state: accumulated results, the active query, the page
/// cursor, and the in-flight flag guarding duplicate page fetches.
#[derive(Debug, Clone, Default)]
pub struct UsersState {
    pub users: Vec<GitHubUser>,
    pub query: Option<String>,
    pub pagination: Option<Pagination>,
    pub is_fetching: bool,
    pub selected_user: Option<GitHubUser>,
    pub error: Option<String>,
}

/// Sole owner and mutator of the search results list.
pub struct UserStore {
    state: Mutex<UsersState>,
    subscribers: Mutex<Vec<Subscriber>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(UsersState::default()),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn get_state(&self) -> UsersState {
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

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReduceStore for UserStore {
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

fn reduce(state: &mut UsersState, action: &Action) -> bool {
    match action {
        Action::SearchUsers { query, page } => {
            state.query = Some(query.clone());
            state.is_fetching = true;
            state.error = None;

            // a fresh search replaces prior results; later pages append
            if *page == 1 {
                state.users.clear();
                state.pagination = None;
            }
        }
        Action::AddUsers(users) => {
            state.users.extend(users.iter().cloned());
        }
        Action::ClearUsers => {
            state.users.clear();
            state.pagination = None;
        }
        Action::SetPagination(pagination) => {
            state.pagination = *pagination;
        }
        Action::SetFetching(value) => {
            state.is_fetching = *value;
        }
        Action::SetSelectedUser(user) => {
            state.selected_user = user.clone();
        }
        Action::SetSearchError(error) => {
            state.error = error.clone();
        }
        _ => return false,
    }

    true
}

#[cfg(test)]
#[path = "./users_tests.rs"]
mod tests;
