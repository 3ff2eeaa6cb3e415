use std::{cell::RefCell, sync::Arc};

use itertools::Itertools;
use ratatui::crossterm::event::{Event, KeyCode, KeyEventKind};

use crate::store::{action::Action, app::ViewID, dispatcher::Dispatcher};
use crate::ui::components::table::Table;

use super::traits::{CustomWidgetContext, CustomWidgetRef, EventHandler, View};

pub struct ViewSelect {
    dispatcher: Arc<Dispatcher>,
    view_ids: Vec<ViewID>,
    table: RefCell<Table>,
}

impl ViewSelect {
    pub fn new(view_ids: Vec<ViewID>, padding: usize, dispatcher: Arc<Dispatcher>) -> Self {
        let spacer = " ".repeat(padding);

        let table_items = view_ids
            .iter()
            .map(|v| vec![format!("{spacer}{v}")])
            .collect_vec();

        let mut table_select = Table::new(table_items, None, vec![15; view_ids.len()]);

        table_select.next();

        Self {
            dispatcher,
            view_ids,
            table: RefCell::new(table_select),
        }
    }

    fn next(&self) {
        self.table.borrow_mut().next();
    }

    fn previous(&self) {
        self.table.borrow_mut().previous();
    }

    fn handle_selected(&self) {
        let i = self.table.borrow().selected();
        if let Some(selected) = i {
            let id = self.view_ids[selected];
            self.dispatcher.dispatch(Action::UpdateView(id));
            self.dispatcher.dispatch(Action::ToggleViewSelect);
        }
    }
}

impl View for ViewSelect {
    fn id(&self) -> ViewID {
        ViewID::ViewSelect
    }
}

impl EventHandler for ViewSelect {
    fn process_event(&self, evt: &Event, ctx: &CustomWidgetContext) -> bool {
        if !ctx.app.render_view_select {
            return false;
        }

        let mut handled = false;

        match evt {
            Event::Key(key) => {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('j') | KeyCode::Down => {
                            self.next();
                            handled = true;
                        }
                        KeyCode::Char('k') | KeyCode::Up => {
                            self.previous();
                            handled = true;
                        }
                        KeyCode::Esc => {
                            self.dispatcher.dispatch(Action::ToggleViewSelect);
                            handled = true;
                        }
                        KeyCode::Enter => {
                            self.handle_selected();
                            handled = true;
                        }
                        _ => {}
                    }
                }
            }
            _ => {}
        }

        handled
    }
}

impl CustomWidgetRef for ViewSelect {
    fn render_ref(
        &self,
        area: ratatui::prelude::Rect,
        buf: &mut ratatui::prelude::Buffer,
        ctx: &CustomWidgetContext,
    ) {
        self.table.borrow().render_ref(area, buf, ctx);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{crossterm::event::{KeyEvent, KeyModifiers}, layout::Rect};

    use crate::store::{
        app::AppStore,
        todo::TodoStore,
        users::{UserStore, UsersState},
        ReduceStore,
    };
    use crate::ui::colors::Theme;

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn selecting_a_view_updates_app_store() {
        let dispatcher = Arc::new(Dispatcher::new());
        let app_store = Arc::new(AppStore::new(Theme::Blue));
        dispatcher.register(Arc::clone(&app_store) as Arc<dyn ReduceStore>);
        dispatcher.dispatch(Action::ToggleViewSelect);

        let view = ViewSelect::new(
            vec![ViewID::Todos, ViewID::Users],
            2,
            Arc::clone(&dispatcher),
        );

        let app = app_store.get_state();
        let todos = TodoStore::new().get_state();
        let users = UsersState::default();
        let ctx = CustomWidgetContext {
            app: &app,
            todos: &todos,
            users: &users,
            app_area: Rect::new(0, 0, 80, 24),
        };

        assert!(view.process_event(&key(KeyCode::Char('j')), &ctx));
        assert!(view.process_event(&key(KeyCode::Enter), &ctx));

        let state = app_store.get_state();
        assert_eq!(state.view_id, ViewID::Users);
        assert!(!state.render_view_select);
    }

    #[test]
    fn escape_closes_the_popover() {
        let dispatcher = Arc::new(Dispatcher::new());
        let app_store = Arc::new(AppStore::new(Theme::Blue));
        dispatcher.register(Arc::clone(&app_store) as Arc<dyn ReduceStore>);
        dispatcher.dispatch(Action::ToggleViewSelect);

        let view = ViewSelect::new(vec![ViewID::Todos], 2, Arc::clone(&dispatcher));

        let app = app_store.get_state();
        let todos = TodoStore::new().get_state();
        let users = UsersState::default();
        let ctx = CustomWidgetContext {
            app: &app,
            todos: &todos,
            users: &users,
            app_area: Rect::new(0, 0, 80, 24),
        };

        assert!(view.process_event(&key(KeyCode::Esc), &ctx));
        assert!(!app_store.get_state().render_view_select);
    }

    #[test]
    fn ignores_events_when_closed() {
        let dispatcher = Arc::new(Dispatcher::new());
        let app_store = Arc::new(AppStore::new(Theme::Blue));
        dispatcher.register(Arc::clone(&app_store) as Arc<dyn ReduceStore>);

        let view = ViewSelect::new(vec![ViewID::Todos], 2, Arc::clone(&dispatcher));

        let app = app_store.get_state();
        let todos = TodoStore::new().get_state();
        let users = UsersState::default();
        let ctx = CustomWidgetContext {
            app: &app,
            todos: &todos,
            users: &users,
            app_area: Rect::new(0, 0, 80, 24),
        };

        assert!(!view.process_event(&key(KeyCode::Enter), &ctx));
        assert_eq!(app_store.get_state().view_id, ViewID::Todos);
    }
}
