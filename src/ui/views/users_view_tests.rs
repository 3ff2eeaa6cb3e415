use std::time::{Duration, Instant};

use ratatui::crossterm::event::{KeyEvent, KeyModifiers};
use ratatui::layout::Rect;

use crate::github::client::MockGitHubApi;
use crate::github::types::{GitHubUser, Pagination, SearchResults};
use crate::store::{
    app::{AppState, AppStore},
    todo::{TodoState, TodoStore},
    users::UserStore,
};
use crate::ui::avatar::AvatarLoader;
use crate::ui::colors::Theme;

use super::*;

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn app_state() -> AppState {
    AppStore::new(Theme::Blue).get_state()
}

fn user(login: &str) -> GitHubUser {
    GitHubUser {
        login: login.to_string(),
        avatar_url: format!("https://avatars.test/{login}"),
    }
}

fn wait_until<F: Fn() -> bool>(condition: F) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !condition() {
        if Instant::now() > deadline {
            panic!("condition not met within deadline");
        }
        std::thread::sleep(Duration::from_millis(10));
    }
}

struct Fixture {
    dispatcher: Arc<Dispatcher>,
    user_store: Arc<UserStore>,
    view: UsersView,
}

impl Fixture {
    fn new(api: MockGitHubApi) -> Self {
        let api: Arc<dyn crate::github::client::GitHubApi> = Arc::new(api);
        let dispatcher = Arc::new(Dispatcher::new());
        let user_store = Arc::new(UserStore::new());
        dispatcher.register(Arc::clone(&user_store) as Arc<dyn crate::store::ReduceStore>);

        let creator = Arc::new(ActionCreator::new(
            Arc::clone(&dispatcher),
            Arc::clone(&api),
        ));
        let data_source = UsersDataSource::new(AvatarLoader::new(api));
        let view = UsersView::new(Arc::clone(&dispatcher), creator, data_source);

        Self {
            dispatcher,
            user_store,
            view,
        }
    }
}

fn ctx<'a>(
    app: &'a AppState,
    todos: &'a TodoState,
    users: &'a crate::store::users::UsersState,
) -> CustomWidgetContext<'a> {
    CustomWidgetContext {
        app,
        todos,
        users,
        app_area: Rect::new(0, 0, 80, 24),
    }
}

#[test]
fn search_commits_query_and_populates_store() {
    let mut api = MockGitHubApi::new();
    api.expect_search_users()
        .withf(|query, page| query == "octo" && *page == 1)
        .times(1)
        .returning(|_, _| {
            Ok(SearchResults {
                users: vec![user("octocat")],
                pagination: Pagination {
                    next: None,
                    last: None,
                },
            })
        });

    let fixture = Fixture::new(api);
    let app = app_state();
    let todos = TodoStore::new().get_state();
    let users = fixture.user_store.get_state();
    let ctx = ctx(&app, &todos, &users);

    assert!(fixture.view.process_event(&key(KeyCode::Char('/')), &ctx));
    for c in "octo".chars() {
        fixture.view.process_event(&key(KeyCode::Char(c)), &ctx);
    }
    fixture.view.process_event(&key(KeyCode::Enter), &ctx);

    let store = Arc::clone(&fixture.user_store);
    wait_until(move || {
        let state = store.get_state();
        !state.is_fetching && state.users.len() == 1
    });

    let state = fixture.user_store.get_state();
    assert_eq!(state.query.as_deref(), Some("octo"));
    assert_eq!(state.users[0].login, "octocat");
}

#[test]
fn empty_query_clears_results() {
    let fixture = Fixture::new(MockGitHubApi::new());
    fixture
        .dispatcher
        .dispatch(Action::AddUsers(vec![user("stale")]));

    let app = app_state();
    let todos = TodoStore::new().get_state();
    let users = fixture.user_store.get_state();
    let ctx = ctx(&app, &todos, &users);

    fixture.view.process_event(&key(KeyCode::Char('/')), &ctx);
    fixture.view.process_event(&key(KeyCode::Enter), &ctx);

    let state = fixture.user_store.get_state();
    assert!(state.users.is_empty());
    assert!(state.pagination.is_none());
}

#[test]
fn reaching_last_row_requests_next_page() {
    let mut api = MockGitHubApi::new();
    api.expect_search_users()
        .withf(|query, page| query == "octo" && *page == 2)
        .times(1)
        .returning(|_, _| {
            Ok(SearchResults {
                users: vec![user("page-two")],
                pagination: Pagination {
                    next: Some(3),
                    last: Some(5),
                },
            })
        });

    let fixture = Fixture::new(api);
    fixture.dispatcher.dispatch(Action::SearchUsers {
        query: "octo".to_string(),
        page: 1,
    });
    fixture.dispatcher.dispatch(Action::SetFetching(false));
    fixture
        .dispatcher
        .dispatch(Action::AddUsers(vec![user("a"), user("b")]));
    fixture
        .dispatcher
        .dispatch(Action::SetPagination(Some(Pagination {
            next: Some(2),
            last: Some(5),
        })));

    let app = app_state();
    let todos = TodoStore::new().get_state();
    let users = fixture.user_store.get_state();
    let ctx = ctx(&app, &todos, &users);

    fixture.view.table.borrow_mut().update_items(vec![
        vec!["○".to_string(), "a".to_string()],
        vec!["○".to_string(), "b".to_string()],
    ]);
    fixture.view.process_event(&key(KeyCode::Char('j')), &ctx);
    fixture.view.process_event(&key(KeyCode::Char('j')), &ctx);

    let store = Arc::clone(&fixture.user_store);
    wait_until(move || {
        let state = store.get_state();
        !state.is_fetching && state.users.len() == 3
    });

    let state = fixture.user_store.get_state();
    assert_eq!(state.users[2].login, "page-two");
    assert_eq!(
        state.pagination,
        Some(Pagination {
            next: Some(3),
            last: Some(5)
        })
    );
}

#[test]
fn final_page_does_not_request_more() {
    let fixture = Fixture::new(MockGitHubApi::new());
    fixture.dispatcher.dispatch(Action::SearchUsers {
        query: "octo".to_string(),
        page: 1,
    });
    fixture.dispatcher.dispatch(Action::SetFetching(false));
    fixture
        .dispatcher
        .dispatch(Action::AddUsers(vec![user("a")]));
    fixture.dispatcher.dispatch(Action::SetPagination(None));

    let app = app_state();
    let todos = TodoStore::new().get_state();
    let users = fixture.user_store.get_state();
    let ctx = ctx(&app, &todos, &users);

    fixture
        .view
        .table
        .borrow_mut()
        .update_items(vec![vec!["○".to_string(), "a".to_string()]]);

    // would panic in the mock if a request were made
    fixture.view.process_event(&key(KeyCode::Char('j')), &ctx);
    fixture.view.process_event(&key(KeyCode::Char('j')), &ctx);

    assert!(!fixture.user_store.get_state().is_fetching);
}

#[test]
fn enter_selects_highlighted_user() {
    let fixture = Fixture::new(MockGitHubApi::new());
    fixture
        .dispatcher
        .dispatch(Action::AddUsers(vec![user("a"), user("b")]));

    let app = app_state();
    let todos = TodoStore::new().get_state();
    let users = fixture.user_store.get_state();
    let ctx = ctx(&app, &todos, &users);

    fixture.view.table.borrow_mut().update_items(vec![
        vec!["○".to_string(), "a".to_string()],
        vec!["○".to_string(), "b".to_string()],
    ]);
    fixture.view.process_event(&key(KeyCode::Char('j')), &ctx);
    fixture.view.process_event(&key(KeyCode::Char('j')), &ctx);
    fixture.view.process_event(&key(KeyCode::Enter), &ctx);

    let state = fixture.user_store.get_state();
    assert_eq!(state.selected_user.map(|u| u.login), Some("b".to_string()));
}
