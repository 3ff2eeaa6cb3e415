//! Store owning the to-do list.

use std::sync::Mutex;

use super::{action::Action, ReduceStore, Subscriber};

/// A single to-do item. Immutable value; edits produce a replacement with
/// the same `id`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Todo {
    pub id: String,
    pub is_completed: bool,
    pub text: String,
}

/// To-do list state. Insertion order is preserved and no two todos ever
/// share an `id`.
#[derive(Debug, Clone)]
pub struct TodoState {
    pub todos: Vec<Todo>,
    // ids are assigned from this counter and never reused, even after
    // deletion
    last_id: u64,
}

impl TodoState {
    fn new() -> Self {
        Self {
            todos: Vec::new(),
            last_id: 1,
        }
    }
}

/// Sole owner and mutator of the to-do list.
pub struct TodoStore {
    state: Mutex<TodoState>,
    subscribers: Mutex<Vec<Subscriber>>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(TodoState::new()),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn get_state(&self) -> TodoState {
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

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReduceStore for TodoStore {
    fn on_dispatch(&self, action: &Action) {
        let recognized = {
            let mut state = self.state.lock().unwrap();
            reduce(&mut state, action)
        };

        // recognized actions notify even when they matched no id;
        // unrecognized actions never do
        if recognized {
            self.emit_change();
        }
    }
}

fn reduce(state: &mut TodoState, action: &Action) -> bool {
    match action {
        Action::AddTodo(text) => {
            let id = format!("id-{}", state.last_id);
            state.last_id += 1;
            state.todos.push(Todo {
                id,
                is_completed: false,
                text: text.clone(),
            });
        }
        Action::DeleteCompletedTodos => {
            state.todos.retain(|t| !t.is_completed);
        }
        Action::DeleteTodo(id) => {
            state.todos.retain(|t| t.id != *id);
        }
        Action::EditTodo { id, text } => {
            if let Some(todo) = state.todos.iter_mut().find(|t| t.id == *id) {
                todo.text = text.clone();
            }
        }
        Action::ToggleAllTodos => {
            // clears completion on every todo rather than flipping it
            for todo in state.todos.iter_mut() {
                todo.is_completed = false;
            }
        }
        Action::ToggleTodo(id) => {
            if let Some(todo) = state.todos.iter_mut().find(|t| t.id == *id) {
                todo.is_completed = !todo.is_completed;
            }
        }
        _ => return false,
    }

    true
}

#[cfg(test)]
#[path = "./todo_tests.rs"]
mod tests;
