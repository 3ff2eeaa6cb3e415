use std::{cell::RefCell, sync::Arc};

use itertools::Itertools;
use ratatui::{
    crossterm::event::{Event, KeyCode, KeyEventKind},
    layout::{Constraint, Layout, Rect},
};

use crate::actions::ActionCreator;
use crate::store::{action::Action, app::ViewID, derived, dispatcher::Dispatcher};
use crate::ui::components::{
    header::Header,
    input::{Input, InputState},
    table::Table,
};
use crate::ui::data_source::{RowAvatar, UsersDataSource};

use super::traits::{
    CustomStatefulWidget, CustomWidget, CustomWidgetContext, CustomWidgetRef, EventHandler, View,
};

const AVATAR_LOADED_MARK: &str = "◉";
const AVATAR_PENDING_MARK: &str = "○";

pub struct UsersView {
    dispatcher: Arc<Dispatcher>,
    action_creator: Arc<ActionCreator>,
    data_source: RefCell<UsersDataSource>,
    table: RefCell<Table>,
    query: RefCell<InputState>,
}

impl UsersView {
    pub fn new(
        dispatcher: Arc<Dispatcher>,
        action_creator: Arc<ActionCreator>,
        data_source: UsersDataSource,
    ) -> Self {
        Self {
            dispatcher,
            action_creator,
            data_source: RefCell::new(data_source),
            table: RefCell::new(Table::new(
                Vec::new(),
                Some(vec!["".to_string(), "LOGIN".to_string()]),
                vec![3, 30],
            )),
            query: RefCell::new(InputState::default()),
        }
    }

    fn next(&self, ctx: &CustomWidgetContext) {
        let selected = self.table.borrow_mut().next();

        // request the following page once the selection reaches the
        // bottom of what we have
        if selected + 1 == ctx.users.users.len() {
            if let Some((query, page)) = derived::next_page_request(ctx.users) {
                self.action_creator.search_users(&query, page);
            }
        }
    }

    fn previous(&self) {
        self.table.borrow_mut().previous();
    }

    fn select_user(&self, ctx: &CustomWidgetContext) {
        let selected = match self.table.borrow().selected() {
            Some(i) => i,
            None => return,
        };

        if let Some(user) = ctx.users.users.get(selected) {
            self.dispatcher
                .dispatch(Action::SetSelectedUser(Some(user.clone())));
        }
    }

    fn begin_search(&self, ctx: &CustomWidgetContext) {
        let mut query = self.query.borrow_mut();
        query.editing = true;
        query.value = ctx.users.query.clone().unwrap_or_default();
    }

    fn commit_search(&self) {
        let mut query = self.query.borrow_mut();
        query.editing = false;
        let value = query.value.trim().to_string();
        drop(query);

        if value.is_empty() {
            self.dispatcher.dispatch(Action::ClearUsers);
            return;
        }

        self.action_creator.search_users(&value, 1);
    }

    fn handle_editing_event(&self, evt: &Event) -> bool {
        match evt {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char(c) => {
                    self.query.borrow_mut().value.push(c);
                    true
                }
                KeyCode::Backspace => {
                    self.query.borrow_mut().value.pop();
                    true
                }
                KeyCode::Esc => {
                    let mut query = self.query.borrow_mut();
                    query.editing = false;
                    query.value.clear();
                    true
                }
                KeyCode::Enter => {
                    self.commit_search();
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }

    fn status_line(&self, ctx: &CustomWidgetContext) -> String {
        if ctx.users.is_fetching {
            return "fetching…".to_string();
        }

        match &ctx.users.selected_user {
            Some(user) => format!("{} users | selected: {}", ctx.users.users.len(), user.login),
            None => format!("{} users", ctx.users.users.len()),
        }
    }

    fn render_table(&self, area: Rect, buf: &mut ratatui::prelude::Buffer, ctx: &CustomWidgetContext) {
        let mut data_source = self.data_source.borrow_mut();
        data_source.bind_rows(&ctx.users.users);

        let items = ctx
            .users
            .users
            .iter()
            .enumerate()
            .map(|(row, user)| {
                let mark = match data_source.avatar(row) {
                    RowAvatar::Loaded(_) => AVATAR_LOADED_MARK,
                    RowAvatar::Placeholder(_) => AVATAR_PENDING_MARK,
                };
                vec![mark.to_string(), user.login.clone()]
            })
            .collect_vec();

        self.table.borrow_mut().update_items(items);
        self.table.borrow().render_ref(area, buf, ctx);
    }
}

impl View for UsersView {
    fn id(&self) -> ViewID {
        ViewID::Users
    }

    fn legend(&self, ctx: &CustomWidgetContext) -> &str {
        if self.query.borrow().editing {
            "(enter) search | (esc) cancel"
        } else if ctx.users.users.is_empty() {
            "(/) search users"
        } else {
            "(/) search | (enter) select | (j/k) scroll"
        }
    }

    // finished avatar downloads arrive between input events
    fn tick(&self) -> bool {
        !self.data_source.borrow_mut().poll().is_empty()
    }
}

impl CustomWidgetRef for UsersView {
    fn render_ref(&self, area: Rect, buf: &mut ratatui::prelude::Buffer, ctx: &CustomWidgetContext) {
        let [query_area, status_area, table_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(5),
        ])
        .areas(area);

        let query = Input::new("search");
        query.render(query_area, buf, &mut self.query.borrow_mut(), ctx);

        let status = Header::new(self.status_line(ctx));
        status.render(status_area, buf, ctx);

        self.render_table(table_area, buf, ctx);
    }
}

impl EventHandler for UsersView {
    fn process_event(&self, evt: &Event, ctx: &CustomWidgetContext) -> bool {
        if ctx.app.render_view_select {
            return false;
        }

        if self.query.borrow().editing {
            return self.handle_editing_event(evt);
        }

        match evt {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('j') | KeyCode::Down => {
                    self.next(ctx);
                    true
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.previous();
                    true
                }
                KeyCode::Char('/') => {
                    self.begin_search(ctx);
                    true
                }
                KeyCode::Enter => {
                    self.select_user(ctx);
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "./users_view_tests.rs"]
mod tests;
