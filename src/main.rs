pub mod app;
pub mod config;
pub mod error;
pub mod model;
pub mod seed;
pub mod service;
pub mod ui;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{fs, io, path::PathBuf, time::Duration};
use anyhow::Result;
use clap::Parser;
use service::{DirectoryService, FileCollectionService};

/// A terminal dashboard for a managed file store
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Config file to use instead of the platform default
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Storage directory, overriding the config file
    #[arg(long, value_name = "DIR")]
    storage_dir: Option<PathBuf>,

    /// Replace the stored files with generated sample files
    #[arg(long)]
    seed: bool,

    /// Delete every stored file
    #[arg(long)]
    purge: bool,
}

const SEED_FILE_COUNT: usize = 42;

/// Logs go to a file in the cache dir; the terminal belongs to the UI.
fn init_logging() {
    let Some(dirs) = directories::ProjectDirs::from("", "", "lazyfiles") else {
        return;
    };
    let log_dir = dirs.cache_dir();
    if fs::create_dir_all(log_dir).is_err() {
        return;
    }
    let Ok(file) = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("lazyfiles.log"))
    else {
        return;
    };
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("LAZYFILES_LOG", "info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging();

    let mut app_config = config::Config::load(args.config.as_deref());
    if let Some(dir) = args.storage_dir {
        app_config.storage_dir = dir;
    }
    log::info!(
        "Starting with storage '{}', page size {}",
        app_config.storage_dir.display(),
        app_config.page_size
    );
    let service = DirectoryService::new(&app_config.storage_dir);

    if args.seed || args.purge {
        let action = if args.purge { "purge" } else { "seed" };
        println!("Targeting storage {} for {}.", service.root().display(), action);
        if args.purge {
            println!("This will delete ALL FILES in {}.", service.root().display());
        } else {
            println!(
                "This will delete ALL FILES in {} and add {} sample files.",
                service.root().display(),
                SEED_FILE_COUNT
            );
        }
        println!("Are you sure you want to proceed? (yes/no)");
        let mut confirmation = String::new();
        io::stdin().read_line(&mut confirmation)?;
        if confirmation.trim().to_lowercase() != "yes" {
            println!("{} cancelled by user.", if args.purge { "Purge" } else { "Seeding" });
            return Ok(());
        }

        if args.purge {
            match purge_storage(&service).await {
                Ok(count) => println!("Purged {} files from {}.", count, service.root().display()),
                Err(e) => eprintln!("Error purging {}: {}", service.root().display(), e),
            }
        } else {
            match seed::seed_storage(&service, SEED_FILE_COUNT).await {
                Ok(_) => println!("Storage seeded successfully."),
                Err(e) => eprintln!("Error seeding {}: {}", service.root().display(), e),
            }
        }
        return Ok(());
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let storage_label = app_config.storage_dir.display().to_string();
    let app = app::App::new(service, &storage_label, app_config.page_size);

    let res = run_app(&mut terminal, app).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("Terminal loop failed: {:?}", err);
        println!("{:?}", err);
    }

    Ok(())
}

/// Deletes every stored file, routed through the same single/batch dispatch as the UI.
async fn purge_storage(service: &DirectoryService) -> Result<usize> {
    let files = service.fetch_all().await?;
    app::bulk::dispatch(service, &files).await?;
    Ok(files.len())
}

async fn run_app<B: Backend, S: FileCollectionService>(
    terminal: &mut Terminal<B>,
    mut app: app::App<S>,
) -> io::Result<()> {
    app.trigger_initial_load();
    terminal.draw(|f| ui::ui(f, &app))?;

    loop {
        // Async work runs to completion before the next key is read.
        let mut did_async_op = false;
        if let Some(operation_to_execute) = app.pending_operation.take() {
            match operation_to_execute {
                app::PendingOperation::InitialLoad | app::PendingOperation::Reload => {
                    app.execute_load().await;
                }
                app::PendingOperation::ConfirmDeleteItem => {
                    app.confirm_delete_item().await;
                }
                app::PendingOperation::SubmitAddFiles => {
                    app.submit_add_files().await;
                }
                app::PendingOperation::CopyFileNameToClipboard => {
                    app::app_clipboard::copy_selected_file_name_to_clipboard(&mut app).await;
                }
            }
            did_async_op = true;
        }
        if did_async_op {
            continue;
        }
        terminal.draw(|f| ui::ui(f, &app))?;

        if event::poll(Duration::from_millis(100))? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press || app.pending_operation.is_some() {
                    continue;
                }
                if app.delete_dialog.show_confirmation_dialog {
                    match key.code {
                        KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                            app.pending_operation = Some(app::PendingOperation::ConfirmDeleteItem);
                        }
                        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => app.cancel_delete_item(),
                        _ => {}
                    }
                } else if app.add_files.is_active {
                    match key.code {
                        KeyCode::Esc => app.close_add_files_prompt(),
                        KeyCode::Backspace => {
                            app.add_files.input_buffer.pop();
                        }
                        KeyCode::Char(c) => app.add_files.input_buffer.push(c),
                        KeyCode::Enter => {
                            app.pending_operation = Some(app::PendingOperation::SubmitAddFiles);
                        }
                        _ => {}
                    }
                } else {
                    app.status = None;
                    match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Char('j') | KeyCode::Down => app.next_row(),
                        KeyCode::Char('k') | KeyCode::Up => app.previous_row(),
                        KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown => app.next_page(),
                        KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => app.previous_page(),
                        KeyCode::Char('z') => app.cycle_page_size(),
                        KeyCode::Char('s') => app.cycle_sort_key(),
                        KeyCode::Char('r') => app.flip_sort_direction(),
                        KeyCode::Char('b') => app.toggle_bulk_mode(),
                        KeyCode::Char(' ') => app.toggle_selected_row(),
                        KeyCode::Char('a') => app.toggle_all_rows(),
                        KeyCode::Char('d') => app.initiate_delete_selected_item(),
                        KeyCode::Char('D') => app.initiate_bulk_delete(),
                        KeyCode::Char('n') => app.open_add_files_prompt(),
                        KeyCode::Char('R') => app.trigger_reload(),
                        KeyCode::Char('y') => {
                            app.pending_operation = Some(app::PendingOperation::CopyFileNameToClipboard);
                        }
                        _ => {}
                    }
                }
            }
        }
    }
}
