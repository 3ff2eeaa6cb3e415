use clap::Parser;
use color_eyre::eyre::Result;
use directories::ProjectDirs;
use log::*;
use std::{fs, sync::Arc, thread};

use config::ConfigManager;
use github::client::{GitHubApi, HttpGitHubApi};
use store::{
    app::AppStore, dispatcher::Dispatcher, todo::TodoStore, users::UserStore, ReduceStore,
};
use ui::{
    app::{self, Stores},
    avatar::AvatarLoader,
    colors::Theme,
    data_source::UsersDataSource,
    views::main::MainView,
};

mod actions;
mod config;
mod github;
mod store;
mod ui;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run in debug mode - Only prints logs foregoing UI
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Search GitHub users for this query on startup
    #[arg(short, long)]
    query: Option<String>,
}

fn initialize_logger(args: &Args) {
    let filter = if args.debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Off
    };

    simplelog::TermLogger::init(
        filter,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .unwrap();
}

fn get_project_config_path() -> Result<String> {
    let project_dir = ProjectDirs::from("", "", "fluxterm")
        .ok_or_else(|| color_eyre::eyre::eyre!("could not determine config directory"))?;
    let config_dir = project_dir.config_dir();
    fs::create_dir_all(config_dir)?;
    Ok(config_dir.join("config.yml").to_string_lossy().to_string())
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    initialize_logger(&args);

    let config_path = get_project_config_path()?;
    let config = ConfigManager::new(&config_path).get();

    info!("using config: {:?}", config);

    let dispatcher = Arc::new(Dispatcher::new());
    let app_store = Arc::new(AppStore::new(Theme::from_string(&config.theme)));
    let todo_store = Arc::new(TodoStore::new());
    let user_store = Arc::new(UserStore::new());

    dispatcher.register(Arc::clone(&app_store) as Arc<dyn ReduceStore>);
    dispatcher.register(Arc::clone(&todo_store) as Arc<dyn ReduceStore>);
    dispatcher.register(Arc::clone(&user_store) as Arc<dyn ReduceStore>);

    let api: Arc<dyn GitHubApi> =
        Arc::new(HttpGitHubApi::new(config.api_url.clone(), config.per_page)?);

    let action_creator = Arc::new(actions::ActionCreator::new(
        Arc::clone(&dispatcher),
        Arc::clone(&api),
    ));

    if let Some(query) = &args.query {
        action_creator.search_users(query, 1);
    }

    if args.debug {
        // log only, no UI. Useful for inspecting API traffic.
        let store = Arc::clone(&user_store);
        store.subscribe(move || debug!("user state changed"));
        loop {
            thread::park();
        }
    }

    let data_source = UsersDataSource::new(AvatarLoader::new(Arc::clone(&api)));
    let main_view = MainView::new(Arc::clone(&dispatcher), action_creator, data_source);

    app::launch(
        Stores {
            app: app_store,
            todos: todo_store,
            users: user_store,
        },
        main_view,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_args(debug: bool) -> Args {
        Args { debug, query: None }
    }

    #[test]
    fn test_initialize_logger() {
        let args = default_args(false);
        initialize_logger(&args);
    }

    #[test]
    fn test_get_project_config_path() {
        let p = get_project_config_path().unwrap();
        assert_ne!(p, "");
    }
}
