mod app;
mod config;
mod domain;
mod generation;
mod input;
mod logging;
mod seed;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use config::{config_file, ensure_config_dir, load_config, log_file, write_default_config, AppConfig};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{status_glyph, tree_connector, visible_rows, Task, TaskStatus};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "A terminal task widget with status tabs and a guided task generator", long_about = None)]
struct Cli {
    /// Config file. Defaults to ~/.taskboard/config.json
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Read-only JSON task list to display. Defaults to a demo list.
    #[arg(short, long, global = true)]
    tasks: Option<PathBuf>,

    /// Tab to open on (todo, completed, overdue)
    #[arg(long)]
    tab: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init,
    /// Print tasks and exit
    List {
        /// Only tasks with this status (todo, completed, overdue)
        status: Option<String>,
    },
}

fn parse_status(raw: &str) -> Result<TaskStatus> {
    TaskStatus::from_tag(raw)
        .with_context(|| format!("Unknown status \"{}\" (expected todo, completed or overdue)", raw))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let path = match cli.config {
                Some(path) => path,
                None => {
                    ensure_config_dir()?;
                    config_file()?
                }
            };
            write_default_config(&path)?;
            println!("Wrote default config: {}", path.display());
            Ok(())
        }
        Some(Commands::List { status }) => {
            let filter = status.as_deref().map(parse_status).transpose()?;
            let tasks = load_task_list(cli.tasks.as_ref())?;
            print!("{}", format_task_list(&tasks, filter));
            Ok(())
        }
        None => {
            logging::init_tracing(&log_file()?, cli.verbose)?;

            let config_path = match cli.config {
                Some(path) => path,
                None => config_file()?,
            };
            let config = load_config(&config_path)?;
            info!(path = %config_path.display(), "config loaded");

            let initial_tab = match cli.tab.as_deref() {
                Some(raw) => parse_status(raw)?,
                None => config.default_status()?,
            };
            let tasks = load_task_list(cli.tasks.as_ref())?;
            info!(count = tasks.len(), "tasks loaded");

            run_tui(tasks, &config, initial_tab)
        }
    }
}

fn load_task_list(path: Option<&PathBuf>) -> Result<Vec<Task>> {
    match path {
        Some(path) => Ok(seed::load_tasks(path)?),
        None => Ok(seed::demo_tasks()),
    }
}

/// Plain-text listing: every tab in turn, or just `filter`
fn format_task_list(tasks: &[Task], filter: Option<TaskStatus>) -> String {
    let statuses: Vec<TaskStatus> = match filter {
        Some(status) => vec![status],
        None => TaskStatus::all().to_vec(),
    };

    let mut out = String::new();
    for status in statuses {
        out.push_str(&format!("{}\n", status.label()));
        let rows = visible_rows(tasks, status);
        if rows.is_empty() {
            out.push_str("  (none)\n");
        }
        for row in rows {
            let parent = &tasks[row.task_index];
            let (task, prefix) = match row.subtask_index {
                Some(st_idx) if row.depth > 0 => {
                    (&parent.subtasks[st_idx], format!("    {} ", tree_connector(row.is_last)))
                }
                Some(st_idx) => (&parent.subtasks[st_idx], String::from("  ")),
                None => (parent, String::from("  ")),
            };
            let due = task
                .due
                .map(|d| format!("  (due {})", d.format("%Y-%m-%d")))
                .unwrap_or_default();
            let context = if row.is_loose_subtask() {
                format!("  (in {})", parent.title)
            } else {
                String::new()
            };
            out.push_str(&format!(
                "{}{} {}{}{}\n",
                prefix,
                status_glyph(task),
                task.title,
                due,
                context
            ));
        }
    }
    out
}

fn run_tui(tasks: Vec<Task>, config: &AppConfig, initial_tab: TaskStatus) -> Result<()> {
    let mut app = AppState::new(tasks, config, initial_tab);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app, config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    info!(completed = app.completed.len(), "session ended");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    config: &AppConfig,
) -> Result<()> {
    let tick_rate = ticker::tick_duration(config);

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            match event::read()? {
                // Only process key press events (ignore key release)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if input::handle_key(app, key)? {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }

        // Slide-outs and pending generation
        app.tick();
    }
}
