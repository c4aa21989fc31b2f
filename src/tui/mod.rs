// TUI module: the terminal presentation of a review session
pub mod colors;
pub mod flow;
pub mod helpers;
pub mod input;

// Re-exports
pub use colors::*;
pub use flow::{plan_close, BrokenItemGuard, ClosePlan};
pub use helpers::{calculate_progress, format_file_size};
pub use input::{handle_confirm_input, handle_help_input, handle_key_event, KeyAction};

use crate::async_preview::PreviewState;
use crate::domain::{CloseRequest, Item, PurgeMode, ReviewSession, SessionState};
use crate::preview::PreviewContent;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};

const HEADER_HEIGHT: u16 = 5;
const FOOTER_HEIGHT: u16 = 4;

/// UI view state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Main review view
    Reviewing,
    /// Help overlay visible
    Help,
    /// Asking whether to purge the quarantine folder before exit
    ConfirmPurge,
    /// Welcome screen shown on first launch
    Welcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// One-line message shown in the footer until the next action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

fn screen_chunks(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // Title, stats and progress
            Constraint::Min(0),                // Preview
            Constraint::Length(FOOTER_HEIGHT), // Controls and notice
        ])
        .split(area)
}

/// Area the preview is drawn into, borders included
pub fn content_area(area: Rect) -> Rect {
    screen_chunks(area)[1]
}

/// Cells available to a preview inside `content` once borders are removed
pub fn preview_dimensions(content: Rect) -> (u16, u16) {
    (
        content.width.saturating_sub(2),
        content.height.saturating_sub(2),
    )
}

/// Renders the whole review screen.
///
/// `preview` is the state of the current item's preview, if there is a current item.
pub fn render(
    frame: &mut Frame,
    session: &ReviewSession,
    preview: Option<&PreviewState>,
    notice: Option<&Notice>,
) {
    let chunks = screen_chunks(frame.area());

    render_header(frame, chunks[0], session);
    render_content(frame, chunks[1], session, preview);
    render_footer(frame, chunks[2], notice);
}

/// Renders the help overlay
pub fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();
    let help_area = centered_rect(50, 70, area);

    frame.render_widget(Clear, help_area);

    let block = overlay_block(" Help ");
    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let key = |k: &'static str, color| Span::styled(k, Style::default().fg(color));

    let help_lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            key("→  d  D            ", ACCENT_SECONDARY),
            Span::raw("Keep"),
        ]),
        Line::from(vec![
            key("←  a  A            ", ACCENT_PRIMARY),
            Span::raw("Delete (to _deleted)"),
        ]),
        Line::from(""),
        Line::from(vec![
            key("z  Z  u  Backspace ", ACCENT_HIGHLIGHT),
            Span::raw("Undo"),
        ]),
        Line::from(vec![key("Ctrl+Z             ", ACCENT_HIGHLIGHT), Span::raw("Undo")]),
        Line::from(""),
        Line::from(vec![
            key("p  P               ", TEXT_SECONDARY),
            Span::raw("Open in default player"),
        ]),
        Line::from(""),
        Line::from(vec![
            key("q  Esc  Ctrl+C     ", TEXT_SECONDARY),
            Span::raw("Quit"),
        ]),
        Line::from(vec![
            key("?                  ", TEXT_SECONDARY),
            Span::raw("Toggle help"),
        ]),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let paragraph = Paragraph::new(help_lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY));

    frame.render_widget(paragraph, inner);
}

/// Renders the welcome dialog overlay
pub fn render_welcome_overlay(frame: &mut Frame) {
    let area = centered_rect(80, 70, frame.area());

    frame.render_widget(Clear, area);

    let block = overlay_block(" Welcome ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        ))
    };

    let welcome_lines = vec![
        Line::from(""),
        heading("Welcome to mswp!"),
        Line::from(""),
        Line::from("Go through a folder of photos and videos one at a time."),
        Line::from("Deleted files are only moved to a _deleted folder until you quit."),
        Line::from(""),
        heading("Quick Start:"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  → / d  ", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("    Keep"),
        ]),
        Line::from(vec![
            Span::styled("  ← / a  ", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw("    Delete"),
        ]),
        Line::from(vec![
            Span::styled("  z      ", Style::default().fg(ACCENT_HIGHLIGHT)),
            Span::raw("    Undo, as many times as you like"),
        ]),
        Line::from(""),
        Line::from("On exit you can empty _deleted for good, or keep it for later."),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to start",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let paragraph = Paragraph::new(welcome_lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, inner);
}

/// Renders the purge confirmation dialog
pub fn render_confirm_purge_overlay(frame: &mut Frame, request: &CloseRequest, mode: PurgeMode) {
    let area = centered_rect(60, 40, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Empty _deleted? ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_PRIMARY))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let files = if request.quarantined == 1 {
        "1 file".to_string()
    } else {
        format!("{} files", request.quarantined)
    };

    let consequence = match mode {
        PurgeMode::Delete => "They will be deleted permanently.",
        PurgeMode::SystemTrash => "The folder will be moved to the system trash.",
    };

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                files,
                Style::default()
                    .fg(ACCENT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" in quarantine:"),
        ]),
        Line::from(Span::styled(
            request.quarantine_dir.display().to_string(),
            Style::default().fg(TEXT_SECONDARY),
        )),
        Line::from(""),
        Line::from(consequence),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw(" empty it and quit   "),
            Span::styled("n", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw(" keep it and quit"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, inner);
}

fn overlay_block(title: &'static str) -> Block<'static> {
    Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK))
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn render_header(frame: &mut Frame, area: Rect, session: &ReviewSession) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(2)])
        .split(area);

    let total = session.initial_count();
    let stats = session.stats();

    let title_line = match session.current() {
        Some(item) => Line::from(vec![
            Span::styled(
                format!(" Item {}/{} ", session.position(), total),
                Style::default()
                    .fg(ACCENT_HIGHLIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                item.display_name.clone(),
                Style::default()
                    .fg(TEXT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!(
                    "({} • {} • {})",
                    format_file_size(item.size),
                    item.kind.label(),
                    item.modified.format("%Y-%m-%d")
                ),
                Style::default().fg(TEXT_SECONDARY),
            ),
        ]),
        None => Line::from(Span::styled(
            " mswp ",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
    };

    let stats_line = Line::from(vec![
        Span::raw(" Remaining: "),
        Span::styled(
            stats.remaining.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  │  Kept: "),
        Span::styled(
            stats.kept.to_string(),
            Style::default()
                .fg(ACCENT_SECONDARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  │  Deleted: "),
        Span::styled(
            stats.deleted.to_string(),
            Style::default()
                .fg(ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let header = Paragraph::new(vec![title_line, stats_line])
        .block(
            Block::default()
                .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .style(Style::default().fg(TEXT_PRIMARY))
        .alignment(Alignment::Left);

    frame.render_widget(header, chunks[0]);

    let decided = stats.kept + stats.deleted;
    let progress = calculate_progress(decided, total);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM | Borders::LEFT | Borders::RIGHT)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .gauge_style(Style::default().fg(ACCENT_SECONDARY).bg(BG_DARK))
        .ratio(progress)
        .label(format!(
            "{}% ({}/{})",
            (progress * 100.0) as u16,
            decided,
            total
        ));

    frame.render_widget(gauge, chunks[1]);
}

fn content_block(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
        .title(title)
}

fn render_content(
    frame: &mut Frame,
    area: Rect,
    session: &ReviewSession,
    preview: Option<&PreviewState>,
) {
    let item = match (session.state(), session.current()) {
        (SessionState::Empty, _) => {
            let folder = session.folder().display().to_string();
            frame.render_widget(
                message_widget(
                    "No Media Found",
                    vec!["There are no images or videos in".to_string(), folder],
                ),
                area,
            );
            return;
        }
        (SessionState::Exhausted, _) | (_, None) => {
            frame.render_widget(
                message_widget(
                    "All done!",
                    vec![
                        "Every item has been reviewed.".to_string(),
                        "Press q to finish, or z to undo the last decision.".to_string(),
                    ],
                ),
                area,
            );
            return;
        }
        (SessionState::Active, Some(item)) => item,
    };

    let title = format!(" {} ", item.display_name);

    match preview {
        Some(PreviewState::Ready(PreviewContent::Image(lines))) => {
            // No wrapping: each line is exactly one row of pixels
            let paragraph = Paragraph::new(lines.clone())
                .block(content_block(title))
                .alignment(Alignment::Center);
            frame.render_widget(paragraph, area);
        }
        Some(PreviewState::Ready(PreviewContent::Info(lines))) => {
            let paragraph = Paragraph::new(lines.clone())
                .block(content_block(title))
                .style(Style::default().fg(TEXT_PRIMARY))
                .wrap(Wrap { trim: false });
            frame.render_widget(paragraph, area);
        }
        Some(PreviewState::Broken(reason)) | Some(PreviewState::Failed(reason)) => {
            render_preview_problem(frame, area, item, reason);
        }
        Some(PreviewState::Loading) | None => {
            frame.render_widget(content_block(title), area);
            render_loading_overlay(frame, area, item);
        }
    }
}

fn render_preview_problem(frame: &mut Frame, area: Rect, item: &Item, reason: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  [!] Cannot show this file",
            Style::default()
                .fg(ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("  {}", reason)),
        Line::from(""),
        Line::from(format!("  Path: {}", item.path.display())),
        Line::from(format!("  Size: {}", format_file_size(item.size))),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(ACCENT_PRIMARY))
                .title(format!(" {} [!] ", item.display_name)),
        )
        .style(Style::default().fg(TEXT_PRIMARY))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_loading_overlay(frame: &mut Frame, area: Rect, item: &Item) {
    let popup = centered_rect(50, 30, area);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Loading preview…",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            item.display_name.clone(),
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, popup);
}

fn message_widget(heading: &'static str, body: Vec<String>) -> Paragraph<'static> {
    let mut lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            heading,
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(
        body.into_iter()
            .map(|text| Line::from(Span::styled(text, Style::default().fg(TEXT_SECONDARY)))),
    );

    Paragraph::new(lines)
        .block(content_block(" mswp ".to_string()))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
}

fn render_footer(frame: &mut Frame, area: Rect, notice: Option<&Notice>) {
    let controls = Line::from(vec![
        Span::styled(
            " ← ",
            Style::default()
                .fg(ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("Delete", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled(
            "→ ",
            Style::default()
                .fg(ACCENT_SECONDARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("Keep", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("z ", Style::default().fg(ACCENT_HIGHLIGHT)),
        Span::styled("Undo", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("p ", Style::default().fg(TEXT_SECONDARY)),
        Span::styled("Play", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("? ", Style::default().fg(TEXT_SECONDARY)),
        Span::styled("Help", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("q ", Style::default().fg(TEXT_SECONDARY)),
        Span::styled("Quit", Style::default().fg(TEXT_SECONDARY)),
    ]);

    let notice_line = match notice {
        Some(notice) => {
            let color = match notice.level {
                NoticeLevel::Info => ACCENT_HIGHLIGHT,
                NoticeLevel::Error => ACCENT_PRIMARY,
            };
            Line::from(Span::styled(notice.text.clone(), Style::default().fg(color)))
        }
        None => Line::from(""),
    };

    let footer = Paragraph::new(vec![controls, notice_line])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(footer, area);
}
