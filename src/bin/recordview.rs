use clap::{Parser, ValueEnum};
use color_eyre::Result;
use crossterm::event::{self, Event as CEvent};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use recordview::config::Config;
use recordview::core::{ActionConfig, SchemaFile, load_record, load_schema};
use recordview::render::{DetailsPresenter, OpenFlag, ValueFormatter};
use recordview::tui::{Action, Component, DetailsModal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info};

/// Show one record in a details modal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Record file (JSON, JSON5 or YAML mapping)
    #[arg(long = "record", value_name = "PATH")]
    record: PathBuf,
    /// Column schema file (JSON, JSON5 or YAML)
    #[arg(long = "schema", value_name = "PATH")]
    schema: PathBuf,
    /// Dialog title (overrides the schema title)
    #[arg(long = "title", value_name = "TEXT")]
    title: Option<String>,
    /// Print the details as plain text instead of opening the modal
    #[arg(long = "print", conflicts_with = "json")]
    print: bool,
    /// Print the presented view as JSON
    #[arg(long = "json")]
    json: bool,
    /// Path to a config file (overrides default config discovery)
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf>,
    /// Enable file logging at the given level (overrides RUST_LOG)
    #[arg(long = "logging", value_enum)]
    logging: Option<LogLevel>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

fn build_actions(schema: &SchemaFile) -> Vec<ActionConfig> {
    schema
        .actions
        .iter()
        .cloned()
        .map(|spec| {
            let key = spec.key.clone();
            spec.into_action(move |record| {
                let id = record
                    .get("id")
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "-".to_string());
                info!("Action '{key}' invoked for record id={id}");
            })
        })
        .collect()
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    recordview::logging::init_with(None, args.logging.map(Into::into))?;

    let cfg = match Config::from_path(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config, using defaults: {e}");
            Config::embedded()?
        }
    };

    let schema = load_schema(&args.schema)?;
    let record = load_record(&args.record)?;
    let actions = build_actions(&schema);

    let mut presenter = DetailsPresenter::new(record, schema.columns.clone())
        .with_actions(actions)
        .with_formatter(ValueFormatter::new(cfg.display.format_options()));
    if let Some(title) = args.title.or(schema.title) {
        presenter = presenter.with_title(title);
    }

    if args.print {
        println!("{}", presenter.view().to_text());
        return Ok(());
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&presenter.view())?);
        return Ok(());
    }

    let flag = OpenFlag::new(true);
    let mut modal = DetailsModal::new(presenter, Box::new(flag.clone()))
        .with_theme(cfg.theme())
        .with_keybindings(cfg.keybindings()?)
        .with_instructions(cfg.display.show_instructions);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut modal);

    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    if let Err(e) = &res {
        error!("Error: {e}");
    }
    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, modal: &mut DetailsModal) -> Result<()> {
    while modal.is_open() {
        terminal.draw(|f| {
            let size = f.area();
            modal.render(f, size);
        })?;

        if event::poll(Duration::from_millis(100))?
            && let CEvent::Key(key_event) = event::read()?
        {
            match modal.handle_key(&key_event) {
                Ok(Some(Action::Quit)) => break,
                Ok(Some(action)) => debug!("Unhandled action: {action:?}"),
                Ok(None) => {}
                Err(e) => error!("Error handling key event: {e}"),
            }
        }
        modal.update()?;
    }
    Ok(())
}
