//! Action creator for the user search flow.

use log::*;
use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use crate::{
    github::client::GitHubApi,
    store::{action::Action, dispatcher::Dispatcher},
};

/// Builds and dispatches search actions. The HTTP request runs on a worker
/// thread so dispatching stays off the render loop; results come back as
/// further dispatched actions.
pub struct ActionCreator {
    dispatcher: Arc<Dispatcher>,
    client: Arc<dyn GitHubApi>,
}

impl ActionCreator {
    pub fn new(dispatcher: Arc<Dispatcher>, client: Arc<dyn GitHubApi>) -> Self {
        Self { dispatcher, client }
    }

    /// Dispatches `SearchUsers` then fetches the requested page, dispatching
    /// the results (or the error) when the fetch completes. The returned
    /// handle is joined in tests and ignored in production.
    pub fn search_users(&self, query: &str, page: u32) -> JoinHandle<()> {
        self.dispatcher.dispatch(Action::SearchUsers {
            query: query.to_string(),
            page,
        });

        let dispatcher = Arc::clone(&self.dispatcher);
        let client = Arc::clone(&self.client);
        let query = query.to_string();

        thread::spawn(move || {
            debug!("searching users: query={query} page={page}");

            match client.search_users(&query, page) {
                Ok(results) => {
                    dispatcher.dispatch(Action::AddUsers(results.users));
                    dispatcher
                        .dispatch(Action::SetPagination(Some(results.pagination)));
                }
                Err(e) => {
                    warn!("user search failed: {e}");
                    dispatcher.dispatch(Action::SetSearchError(Some(e.to_string())));
                }
            }

            dispatcher.dispatch(Action::SetFetching(false));
        })
    }
}

#[cfg(test)]
#[path = "./actions_tests.rs"]
mod tests;
