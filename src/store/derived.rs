//! Derived state selectors for computed values.

use super::{todo::TodoState, users::UsersState};

/// Returns the query and page number for the next search request when
/// another page may be loaded: a query is set, the cursor has both `next`
/// and `last`, and no fetch is in flight.
pub fn next_page_request(state: &UsersState) -> Option<(String, u32)> {
    if state.is_fetching {
        return None;
    }

    let query = state.query.clone()?;
    let pagination = state.pagination?;
    pagination.last?;
    let next = pagination.next?;

    Some((query, next))
}

/// Returns the number of todos not yet completed.
pub fn active_todo_count(state: &TodoState) -> usize {
    state.todos.iter().filter(|t| !t.is_completed).count()
}

#[cfg(test)]
#[path = "./derived_tests.rs"]
mod tests;
