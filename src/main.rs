use mswp::async_preview::SyncPreviewManager;
use mswp::cli::{AppConfig, Args};
use mswp::config::UserConfig;
use mswp::domain::{CloseRequest, PurgeMode, ReviewSession, SessionStats, Snapshot};
use mswp::logging;
use mswp::open_file;
use mswp::tui::{
    content_area, handle_confirm_input, handle_help_input, handle_key_event, plan_close,
    preview_dimensions, render, render_confirm_purge_overlay, render_help_overlay,
    render_welcome_overlay, BrokenItemGuard, ClosePlan, KeyAction, Notice, ViewState,
};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, time::Duration};

/// How a review session ended
enum SessionEnd {
    /// Nothing was waiting in quarantine
    Clean,
    /// The quarantine folder was emptied
    Purged(PurgeMode),
    /// The user chose to keep the quarantine folder for later
    QuarantineKept(CloseRequest),
    /// The quarantine folder could not be inspected and was left alone
    QuarantineUnchecked(String),
}

fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Load user configuration
    let mut user_config = UserConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load user config: {}", e);
        UserConfig::default()
    });

    let config = AppConfig::resolve(args, &user_config);

    let log_guard = match logging::init_logging(config.log_file.as_deref()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Logging disabled: {}", e);
            None
        }
    };

    let result = run_app_with_config(&config, &mut user_config);

    if let Err(ref e) = result {
        tracing::error!(error = %e, "session aborted");
    }
    // Flush the log before a possible exit
    drop(log_guard);

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Runs the TUI application with configuration
fn run_app_with_config(config: &AppConfig, user_config: &mut UserConfig) -> mswp::Result<()> {
    let mut session =
        ReviewSession::open(&config.directory, &config.scan_options(), config.on_collision)?;

    if session.initial_count() == 0 && config.kinds.is_some() {
        tracing::info!("no media matched the kind filter");
    }

    let mut preview_manager = SyncPreviewManager::new()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_loop(
        &mut terminal,
        &mut session,
        &mut preview_manager,
        config,
        user_config,
    );

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let end = result?;
    print_summary(&session, &end);
    Ok(())
}

/// Main application loop
fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    session: &mut ReviewSession,
    preview_manager: &mut SyncPreviewManager,
    config: &AppConfig,
    user_config: &mut UserConfig,
) -> mswp::Result<SessionEnd> {
    let mut view_state = if config.show_welcome {
        ViewState::Welcome
    } else {
        ViewState::Reviewing
    };
    let mut notice: Option<Notice> = None;
    let mut close_request: Option<CloseRequest> = None;
    let mut broken_guard = BrokenItemGuard::new();

    loop {
        terminal.draw(|frame| {
            let (width, height) = preview_dimensions(content_area(frame.area()));
            let preview = match session.current() {
                Some(item) => Some(preview_manager.request_preview(item, width, height)),
                None => None,
            };

            render(frame, session, preview, notice.as_ref());

            // Render overlays
            match view_state {
                ViewState::Help => render_help_overlay(frame),
                ViewState::Welcome => render_welcome_overlay(frame),
                ViewState::ConfirmPurge => {
                    if let Some(ref request) = close_request {
                        render_confirm_purge_overlay(frame, request, config.purge_mode);
                    }
                }
                ViewState::Reviewing => {}
            }
        })?;

        if let Some(broken_notice) = broken_guard.check(session, preview_manager) {
            notice = Some(broken_notice);
            continue;
        }

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        // Handle overlay-specific input
        match view_state {
            ViewState::Help => {
                // Any key closes help; Ctrl+C falls through and quits
                view_state = ViewState::Reviewing;
                if handle_help_input(key) != KeyAction::Quit {
                    continue;
                }
            }
            ViewState::Welcome => {
                // Any key dismisses welcome and starts reviewing
                view_state = ViewState::Reviewing;

                // Mark welcome as shown and persist
                user_config.welcome_shown = true;
                if let Err(e) = user_config.save() {
                    tracing::warn!(error = %e, "failed to save user config");
                    notice = Some(Notice::error(format!("Failed to save settings: {}", e)));
                }
                continue;
            }
            ViewState::ConfirmPurge => {
                match handle_confirm_input(key) {
                    KeyAction::ConfirmPurge => match session.purge(config.purge_mode) {
                        Ok(()) => return Ok(SessionEnd::Purged(config.purge_mode)),
                        Err(e) => {
                            notice = Some(Notice::error(e.to_string()));
                            view_state = ViewState::Reviewing;
                        }
                    },
                    KeyAction::CancelPurge => {
                        if let Some(request) = close_request.take() {
                            return Ok(SessionEnd::QuarantineKept(request));
                        }
                        return Ok(SessionEnd::Clean);
                    }
                    _ => {}
                }
                continue;
            }
            ViewState::Reviewing => {}
        }

        let action = handle_key_event(key);
        let outcome: Option<mswp::Result<Snapshot>> = match action {
            KeyAction::Quit => {
                match plan_close(session.request_close()) {
                    ClosePlan::Confirm(request) => {
                        close_request = Some(request);
                        view_state = ViewState::ConfirmPurge;
                    }
                    ClosePlan::Exit => return Ok(SessionEnd::Clean),
                    ClosePlan::ExitUnchecked(reason) => {
                        return Ok(SessionEnd::QuarantineUnchecked(reason))
                    }
                }
                None
            }
            KeyAction::Keep => Some(session.keep()),
            KeyAction::Delete => Some(session.delete()),
            KeyAction::Undo => Some(session.undo()),
            KeyAction::Play => {
                if let Some(item) = session.current() {
                    if let Err(e) = open_file(&item.path) {
                        notice = Some(Notice::error(format!("Failed to open file: {}", e)));
                    }
                }
                None
            }
            KeyAction::Help => {
                view_state = ViewState::Help;
                None
            }
            KeyAction::ConfirmPurge | KeyAction::CancelPurge | KeyAction::None => None,
        };

        match outcome {
            Some(Ok(_)) => {
                notice = None;
                broken_guard.after_action(action, session);
                preview_manager.reset();
            }
            Some(Err(e)) if e.is_out_of_range() => notice = Some(Notice::info(e.to_string())),
            Some(Err(e)) => {
                tracing::warn!(error = %e, "action failed");
                notice = Some(Notice::error(e.to_string()));
            }
            None => {}
        }
    }
}

fn print_summary(session: &ReviewSession, end: &SessionEnd) {
    let SessionStats {
        remaining,
        kept,
        deleted,
    } = session.stats();

    println!("\nReviewed {}", session.folder().display());
    println!(
        "   Kept: {}   Deleted: {}   Not reviewed: {}",
        kept, deleted, remaining
    );

    match end {
        SessionEnd::Clean => {}
        SessionEnd::Purged(PurgeMode::Delete) => {
            println!("   _deleted was emptied permanently");
        }
        SessionEnd::Purged(PurgeMode::SystemTrash) => {
            println!("   _deleted was moved to the system trash");
        }
        SessionEnd::QuarantineUnchecked(reason) => {
            println!("   _deleted was left untouched: {}", reason);
        }
        SessionEnd::QuarantineKept(request) => {
            println!(
                "   {} file(s) left in {}",
                request.quarantined,
                request.quarantine_dir.display()
            );
        }
    }
}
