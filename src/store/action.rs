//! Action types for state transitions.

use crate::github::types::{GitHubUser, Pagination};

use super::app::ViewID;

/// Immutable descriptions of intended state changes. The dispatcher
/// broadcasts every action to all registered stores; each store handles
/// the variants it recognizes.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // todo list
    AddTodo(String),
    DeleteCompletedTodos,
    DeleteTodo(String),
    EditTodo { id: String, text: String },
    ToggleAllTodos,
    ToggleTodo(String),

    // user search
    SearchUsers { query: String, page: u32 },
    AddUsers(Vec<GitHubUser>),
    ClearUsers,
    SetPagination(Option<Pagination>),
    SetFetching(bool),
    SetSelectedUser(Option<GitHubUser>),
    SetSearchError(Option<String>),

    // view management
    UpdateView(ViewID),
    ToggleViewSelect,
}
