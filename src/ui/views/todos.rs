use std::{cell::RefCell, sync::Arc};

use itertools::Itertools;
use ratatui::{
    crossterm::event::{Event, KeyCode, KeyEventKind},
    layout::{Constraint, Layout, Rect},
};

use crate::store::{
    action::Action,
    app::ViewID,
    derived::active_todo_count,
    dispatcher::Dispatcher,
};
use crate::ui::components::{
    header::Header,
    input::{Input, InputState},
    table::Table,
};

use super::traits::{
    CustomStatefulWidget, CustomWidget, CustomWidgetContext, CustomWidgetRef, EventHandler, View,
};

const COMPLETED_MARK: &str = "[x]";
const ACTIVE_MARK: &str = "[ ]";

/// What the input line is currently editing.
#[derive(Debug, Clone, Eq, PartialEq)]
enum EditTarget {
    NewTodo,
    Existing(String),
}

pub struct TodosView {
    dispatcher: Arc<Dispatcher>,
    table: RefCell<Table>,
    input: RefCell<InputState>,
    edit_target: RefCell<Option<EditTarget>>,
}

impl TodosView {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            table: RefCell::new(Table::new(
                Vec::new(),
                Some(vec![
                    "DONE".to_string(),
                    "ID".to_string(),
                    "TODO".to_string(),
                ]),
                vec![6, 8, 40],
            )),
            input: RefCell::new(InputState::default()),
            edit_target: RefCell::new(None),
        }
    }

    fn next(&self) {
        self.table.borrow_mut().next();
    }

    fn previous(&self) {
        self.table.borrow_mut().previous();
    }

    fn selected_id(&self, ctx: &CustomWidgetContext) -> Option<String> {
        let selected = self.table.borrow().selected()?;
        ctx.todos.todos.get(selected).map(|t| t.id.clone())
    }

    fn begin_add(&self) {
        *self.edit_target.borrow_mut() = Some(EditTarget::NewTodo);
        let mut input = self.input.borrow_mut();
        input.editing = true;
        input.value.clear();
    }

    fn begin_edit(&self, ctx: &CustomWidgetContext) {
        let selected = match self.table.borrow().selected() {
            Some(i) => i,
            None => return,
        };

        if let Some(todo) = ctx.todos.todos.get(selected) {
            *self.edit_target.borrow_mut() = Some(EditTarget::Existing(todo.id.clone()));
            let mut input = self.input.borrow_mut();
            input.editing = true;
            input.value = todo.text.clone();
        }
    }

    fn cancel_editing(&self) {
        *self.edit_target.borrow_mut() = None;
        let mut input = self.input.borrow_mut();
        input.editing = false;
        input.value.clear();
    }

    fn commit_editing(&self) {
        let target = self.edit_target.borrow_mut().take();
        let mut input = self.input.borrow_mut();
        input.editing = false;
        let text = std::mem::take(&mut input.value);
        drop(input);

        if text.is_empty() {
            return;
        }

        match target {
            Some(EditTarget::NewTodo) => {
                self.dispatcher.dispatch(Action::AddTodo(text));
            }
            Some(EditTarget::Existing(id)) => {
                self.dispatcher.dispatch(Action::EditTodo { id, text });
            }
            None => {}
        }
    }

    fn handle_editing_event(&self, evt: &Event) -> bool {
        match evt {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char(c) => {
                    self.input.borrow_mut().value.push(c);
                    true
                }
                KeyCode::Backspace => {
                    self.input.borrow_mut().value.pop();
                    true
                }
                KeyCode::Esc => {
                    self.cancel_editing();
                    true
                }
                KeyCode::Enter => {
                    self.commit_editing();
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }

    fn render_table(&self, area: Rect, buf: &mut ratatui::prelude::Buffer, ctx: &CustomWidgetContext) {
        let items = ctx
            .todos
            .todos
            .iter()
            .map(|t| {
                vec![
                    if t.is_completed {
                        COMPLETED_MARK.to_string()
                    } else {
                        ACTIVE_MARK.to_string()
                    },
                    t.id.clone(),
                    t.text.clone(),
                ]
            })
            .collect_vec();

        self.table.borrow_mut().update_items(items);
        self.table.borrow().render_ref(area, buf, ctx);
    }
}

impl View for TodosView {
    fn id(&self) -> ViewID {
        ViewID::Todos
    }

    fn legend(&self, ctx: &CustomWidgetContext) -> &str {
        if self.input.borrow().editing {
            "(enter) save | (esc) cancel"
        } else if ctx.todos.todos.is_empty() {
            "(a) add todo"
        } else {
            "(a) add | (e) edit | (space) toggle | (d) delete | (c) clear done | (t) reset all"
        }
    }
}

impl CustomWidgetRef for TodosView {
    fn render_ref(&self, area: Rect, buf: &mut ratatui::prelude::Buffer, ctx: &CustomWidgetContext) {
        let [input_area, count_area, table_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(5),
        ])
        .areas(area);

        let input = Input::new("todo");
        input.render(input_area, buf, &mut self.input.borrow_mut(), ctx);

        let remaining = active_todo_count(ctx.todos);
        let header = Header::new(format!("{remaining} remaining"));
        header.render(count_area, buf, ctx);

        self.render_table(table_area, buf, ctx);
    }
}

impl EventHandler for TodosView {
    fn process_event(&self, evt: &Event, ctx: &CustomWidgetContext) -> bool {
        if ctx.app.render_view_select {
            return false;
        }

        if self.input.borrow().editing {
            return self.handle_editing_event(evt);
        }

        match evt {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('j') | KeyCode::Down => {
                    self.next();
                    true
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.previous();
                    true
                }
                KeyCode::Char('a') => {
                    self.begin_add();
                    true
                }
                KeyCode::Char('e') => {
                    self.begin_edit(ctx);
                    true
                }
                KeyCode::Char(' ') => {
                    if let Some(id) = self.selected_id(ctx) {
                        self.dispatcher.dispatch(Action::ToggleTodo(id));
                    }
                    true
                }
                KeyCode::Char('d') => {
                    if let Some(id) = self.selected_id(ctx) {
                        self.dispatcher.dispatch(Action::DeleteTodo(id));
                    }
                    true
                }
                KeyCode::Char('c') => {
                    self.dispatcher.dispatch(Action::DeleteCompletedTodos);
                    true
                }
                KeyCode::Char('t') => {
                    self.dispatcher.dispatch(Action::ToggleAllTodos);
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "./todos_tests.rs"]
mod tests;
