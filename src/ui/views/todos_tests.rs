use ratatui::crossterm::event::{KeyEvent, KeyModifiers};
use ratatui::layout::Rect;

use crate::store::{
    app::{AppState, AppStore},
    todo::TodoStore,
    users::UsersState,
};
use crate::ui::colors::Theme;

use super::*;

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn app_state() -> AppState {
    AppStore::new(Theme::Blue).get_state()
}

struct Fixture {
    dispatcher: Arc<Dispatcher>,
    todo_store: Arc<TodoStore>,
}

impl Fixture {
    fn new() -> Self {
        let dispatcher = Arc::new(Dispatcher::new());
        let todo_store = Arc::new(TodoStore::new());
        dispatcher.register(Arc::clone(&todo_store) as Arc<dyn crate::store::ReduceStore>);
        Self {
            dispatcher,
            todo_store,
        }
    }

    fn ctx<'a>(
        &self,
        app: &'a AppState,
        todos: &'a crate::store::todo::TodoState,
        users: &'a UsersState,
    ) -> CustomWidgetContext<'a> {
        CustomWidgetContext {
            app,
            todos,
            users,
            app_area: Rect::new(0, 0, 80, 24),
        }
    }
}

#[test]
fn adds_todo_through_input() {
    let fixture = Fixture::new();
    let view = TodosView::new(Arc::clone(&fixture.dispatcher));

    let app = app_state();
    let users = UsersState::default();
    let todos = fixture.todo_store.get_state();
    let ctx = fixture.ctx(&app, &todos, &users);

    assert!(view.process_event(&key(KeyCode::Char('a')), &ctx));
    for c in "write tests".chars() {
        assert!(view.process_event(&key(KeyCode::Char(c)), &ctx));
    }
    assert!(view.process_event(&key(KeyCode::Enter), &ctx));

    let state = fixture.todo_store.get_state();
    assert_eq!(state.todos.len(), 1);
    assert_eq!(state.todos[0].text, "write tests");
    assert!(!state.todos[0].is_completed);
}

#[test]
fn escape_cancels_input_without_dispatching() {
    let fixture = Fixture::new();
    let view = TodosView::new(Arc::clone(&fixture.dispatcher));

    let app = app_state();
    let users = UsersState::default();
    let todos = fixture.todo_store.get_state();
    let ctx = fixture.ctx(&app, &todos, &users);

    view.process_event(&key(KeyCode::Char('a')), &ctx);
    view.process_event(&key(KeyCode::Char('x')), &ctx);
    view.process_event(&key(KeyCode::Esc), &ctx);

    assert!(fixture.todo_store.get_state().todos.is_empty());
    assert!(!view.input.borrow().editing);
}

#[test]
fn empty_input_commit_is_a_noop() {
    let fixture = Fixture::new();
    let view = TodosView::new(Arc::clone(&fixture.dispatcher));

    let app = app_state();
    let users = UsersState::default();
    let todos = fixture.todo_store.get_state();
    let ctx = fixture.ctx(&app, &todos, &users);

    view.process_event(&key(KeyCode::Char('a')), &ctx);
    view.process_event(&key(KeyCode::Enter), &ctx);

    assert!(fixture.todo_store.get_state().todos.is_empty());
}

#[test]
fn toggles_selected_todo() {
    let fixture = Fixture::new();
    let view = TodosView::new(Arc::clone(&fixture.dispatcher));
    fixture.dispatcher.dispatch(Action::AddTodo("one".to_string()));
    fixture.dispatcher.dispatch(Action::AddTodo("two".to_string()));

    let app = app_state();
    let users = UsersState::default();
    let todos = fixture.todo_store.get_state();
    let ctx = fixture.ctx(&app, &todos, &users);

    // selection tracks table rows, which only exist after a render
    view.table.borrow_mut().update_items(vec![
        vec!["[ ]".to_string(), todos.todos[0].id.clone(), "one".to_string()],
        vec!["[ ]".to_string(), todos.todos[1].id.clone(), "two".to_string()],
    ]);
    view.process_event(&key(KeyCode::Char('j')), &ctx);
    view.process_event(&key(KeyCode::Char('j')), &ctx);
    view.process_event(&key(KeyCode::Char(' ')), &ctx);

    let state = fixture.todo_store.get_state();
    assert!(!state.todos[0].is_completed);
    assert!(state.todos[1].is_completed);
}

#[test]
fn edit_prefills_input_with_selected_text() {
    let fixture = Fixture::new();
    let view = TodosView::new(Arc::clone(&fixture.dispatcher));
    fixture.dispatcher.dispatch(Action::AddTodo("draft".to_string()));

    let app = app_state();
    let users = UsersState::default();
    let todos = fixture.todo_store.get_state();
    let ctx = fixture.ctx(&app, &todos, &users);

    view.table.borrow_mut().update_items(vec![vec![
        "[ ]".to_string(),
        todos.todos[0].id.clone(),
        "draft".to_string(),
    ]]);
    view.process_event(&key(KeyCode::Char('j')), &ctx);
    view.process_event(&key(KeyCode::Char('e')), &ctx);

    assert!(view.input.borrow().editing);
    assert_eq!(view.input.borrow().value, "draft");

    for c in " v2".chars() {
        view.process_event(&key(KeyCode::Char(c)), &ctx);
    }
    view.process_event(&key(KeyCode::Enter), &ctx);

    let state = fixture.todo_store.get_state();
    assert_eq!(state.todos[0].text, "draft v2");
    assert_eq!(state.todos[0].id, todos.todos[0].id);
}

#[test]
fn ignores_events_while_view_select_is_open() {
    let fixture = Fixture::new();
    let view = TodosView::new(Arc::clone(&fixture.dispatcher));

    let mut app = app_state();
    app.render_view_select = true;
    let users = UsersState::default();
    let todos = fixture.todo_store.get_state();
    let ctx = fixture.ctx(&app, &todos, &users);

    assert!(!view.process_event(&key(KeyCode::Char('a')), &ctx));
    assert!(fixture.todo_store.get_state().todos.is_empty());
}
