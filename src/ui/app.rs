use color_eyre::eyre::Report;
use core::time;
use log::*;
use ratatui::{
    crossterm::{
        event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    prelude::CrosstermBackend,
    Terminal,
};
use std::{
    io::{self, Stdout},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use crate::store::{app::AppStore, todo::TodoStore, users::UserStore};

use super::views::{
    main::MainView,
    traits::{CustomWidgetContext, CustomWidgetRef, EventHandler},
};

pub struct Stores {
    pub app: Arc<AppStore>,
    pub todos: Arc<TodoStore>,
    pub users: Arc<UserStore>,
}

struct App {
    stores: Stores,
    main_view: MainView,
    dirty: Arc<AtomicBool>,
}

/// Subscribes every store to a shared redraw flag the render loop consumes.
fn register_redraw_flag(stores: &Stores) -> Arc<AtomicBool> {
    let dirty = Arc::new(AtomicBool::new(true));

    let flag = Arc::clone(&dirty);
    stores.app.subscribe(move || flag.store(true, Ordering::Relaxed));
    let flag = Arc::clone(&dirty);
    stores.todos.subscribe(move || flag.store(true, Ordering::Relaxed));
    let flag = Arc::clone(&dirty);
    stores.users.subscribe(move || flag.store(true, Ordering::Relaxed));

    dirty
}

pub fn launch(stores: Stores, main_view: MainView) -> Result<(), Report> {
    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let dirty = register_redraw_flag(&stores);
    let mut app = App {
        stores,
        main_view,
        dirty,
    };

    // start app loop
    let res = run_app(&mut terminal, &mut app);

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        let app_state = app.stores.app.get_state();
        let todo_state = app.stores.todos.get_state();
        let users_state = app.stores.users.get_state();

        // redraw when a store notified, a background avatar arrived, or
        // view-local input state changed on the last event
        if app.dirty.swap(false, Ordering::Relaxed) | app.main_view.tick() {
            terminal.draw(|f| {
                let ctx = CustomWidgetContext {
                    app: &app_state,
                    todos: &todo_state,
                    users: &users_state,
                    app_area: f.area(),
                };

                app.main_view.render_ref(f.area(), f.buffer_mut(), &ctx);
            })?;
        }

        // Use poll here so we don't block the thread, this will allow
        // rendering of search results and avatars as they arrive
        if let Ok(has_event) = event::poll(time::Duration::from_millis(60)) {
            if has_event {
                let evt = event::read()?;

                let ctx = CustomWidgetContext {
                    app: &app_state,
                    todos: &todo_state,
                    users: &users_state,
                    app_area: terminal.get_frame().area(),
                };

                let handled = app.main_view.process_event(&evt, &ctx);

                if handled {
                    app.dirty.store(true, Ordering::Relaxed);
                } else if let Event::Key(key) = evt {
                    match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Char('c') => {
                            if key.modifiers == KeyModifiers::CONTROL {
                                return Ok(());
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
    }
}
