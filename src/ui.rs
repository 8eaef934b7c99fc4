use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};
use crate::app::view::{self, SortDirection};
use crate::app::App;
use crate::model::{ColumnId, StoredFile};
use crate::service::FileCollectionService;

/// helper function to create a centered rect using up certain percentage of the available rect `r`
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ].as_ref())
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ].as_ref())
        .split(popup_layout[1])[1]
}

pub fn ui<S: FileCollectionService>(f: &mut Frame, app: &App<S>) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Storage header
            Constraint::Min(0),    // File table
            Constraint::Length(1), // Paginator
            Constraint::Length(1), // Footer help
            Constraint::Length(1), // Status line
        ].as_ref())
        .split(f.area());

    draw_header(f, app, main_layout[0]);
    draw_file_table(f, app, main_layout[1]);
    draw_paginator(f, app, main_layout[2]);
    draw_footer_help(f, app, main_layout[3]);
    draw_status(f, app, main_layout[4]);

    // Modals last so they sit on top
    if app.delete_dialog.show_confirmation_dialog {
        draw_delete_confirmation_dialog(f, app);
    }
    if app.add_files.is_active {
        draw_add_files_prompt(f, app);
    }
}

fn draw_header<S: FileCollectionService>(f: &mut Frame, app: &App<S>, area: Rect) {
    let mode = if app.dashboard.is_bulk_mode() {
        Span::styled(
            format!(" BULK MODE: {} selected ", app.dashboard.selection().len()),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        )
    } else {
        Span::raw("")
    };
    let line = Line::from(vec![Span::raw(format!("Storage: {}  ", app.storage_label)), mode]);
    let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("lazyfiles"));
    f.render_widget(header, area);
}

fn select_header<S: FileCollectionService>(app: &App<S>) -> &'static str {
    let selection = app.dashboard.selection();
    if selection.is_empty() {
        "[ ]"
    } else if app.dashboard.is_all_selected() {
        "[x]"
    } else {
        "[-]"
    }
}

fn cell_text<S: FileCollectionService>(app: &App<S>, column: ColumnId, file: &StoredFile) -> String {
    match column {
        ColumnId::Select => {
            let mark = if app.dashboard.selection().is_selected(file) { "[x]" } else { "[ ]" };
            mark.to_string()
        }
        ColumnId::Name => file.name.clone(),
        ColumnId::OriginalName => file.original_name.clone(),
        ColumnId::Extension => file.extension.clone(),
        ColumnId::CreatedAt => file.created_at.format("%Y-%m-%d %H:%M").to_string(),
        ColumnId::Actions => "d: delete".to_string(),
    }
}

fn column_width(column: ColumnId) -> Constraint {
    match column {
        ColumnId::Select => Constraint::Length(3),
        ColumnId::Name => Constraint::Percentage(30),
        ColumnId::OriginalName => Constraint::Percentage(30),
        ColumnId::Extension => Constraint::Length(6),
        ColumnId::CreatedAt => Constraint::Length(16),
        ColumnId::Actions => Constraint::Length(10),
    }
}

fn draw_file_table<S: FileCollectionService>(f: &mut Frame, app: &App<S>, area: Rect) {
    let columns = app.dashboard.displayed_columns();
    let state = app.dashboard.view_state();

    let header_cells = columns.iter().map(|&column| {
        let mut title = match column {
            ColumnId::Select => select_header(app).to_string(),
            other => other.title().to_string(),
        };
        let sorted_here = matches!(
            (state.sort_key, column),
            (Some(view::SortKey::Name), ColumnId::Name)
                | (Some(view::SortKey::OriginalName), ColumnId::OriginalName)
                | (Some(view::SortKey::Extension), ColumnId::Extension)
                | (Some(view::SortKey::CreatedAt), ColumnId::CreatedAt)
        );
        if sorted_here {
            title.push_str(match state.sort_direction {
                SortDirection::Ascending => " ▲",
                SortDirection::Descending => " ▼",
            });
        }
        Cell::from(title)
    });
    let header = Row::new(header_cells).style(Style::default().add_modifier(Modifier::BOLD));

    let rows = app.dashboard.rows().iter().map(|file| {
        let style = if app.dashboard.selection().is_selected(file) {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        Row::new(columns.iter().map(|&column| Cell::from(cell_text(app, column, file)))).style(style)
    });

    let widths: Vec<Constraint> = columns.iter().map(|&column| column_width(column)).collect();
    let title = if app.dashboard.total_count() == 0 {
        "Files (empty, n to add)".to_string()
    } else {
        format!("Files ({})", app.dashboard.total_count())
    };
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(
            Style::default()
                .bg(Color::Yellow)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    let mut table_state = TableState::default();
    if app.selected_row_index < app.dashboard.rows().len() {
        table_state.select(Some(app.selected_row_index));
    }
    f.render_stateful_widget(table, area, &mut table_state);
}

fn draw_paginator<S: FileCollectionService>(f: &mut Frame, app: &App<S>, area: Rect) {
    let state = app.dashboard.view_state();
    let total = app.dashboard.total_count();
    let pages = view::page_count(total, state.page_size).max(1);
    let first = if total == 0 { 0 } else { state.page_index * state.page_size + 1 };
    let last = (state.page_index * state.page_size + app.dashboard.rows().len()).min(total);
    let sort = match state.sort_key {
        Some(key) => format!(
            "{} {}",
            key.label(),
            if state.sort_direction == SortDirection::Ascending { "asc" } else { "desc" }
        ),
        None => "none".to_string(),
    };
    let text = format!(
        "Page {}/{} | {}-{} of {} | {} per page | sort: {}",
        state.page_index + 1,
        pages,
        first,
        last,
        total,
        state.page_size,
        sort
    );
    f.render_widget(Paragraph::new(text).alignment(Alignment::Right), area);
}

fn draw_footer_help<S: FileCollectionService>(f: &mut Frame, app: &App<S>, area: Rect) {
    let key = |text: &'static str| Span::styled(text, Style::default().fg(Color::Yellow));
    let mut help_spans = vec![
        key("q: quit"),
        Span::raw(" | "),
        key("j/k: row"),
        Span::raw(" | "),
        key("h/l: page"),
        Span::raw(" | "),
        key("z: page size"),
        Span::raw(" | "),
        key("s/r: sort"),
        Span::raw(" | "),
        key("n: add"),
        Span::raw(" | "),
        key("d: del"),
        Span::raw(" | "),
        key("y: copy name"),
        Span::raw(" | "),
        key("R: reload"),
        Span::raw(" | "),
        key("b: bulk"),
    ];

    if app.dashboard.is_bulk_mode() {
        help_spans.extend(vec![
            Span::raw(" | "),
            Span::styled("space: select", Style::default().fg(Color::Cyan)),
            Span::raw(" | "),
            Span::styled("a: all", Style::default().fg(Color::Cyan)),
            Span::raw(" | "),
            Span::styled("D: delete selected", Style::default().fg(Color::Cyan)),
        ]);
    }
    if app.delete_dialog.show_confirmation_dialog {
        help_spans = vec![
            Span::styled("Confirm Deletion: ", Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD)),
            Span::styled("[Y]es", Style::default().fg(Color::Green)),
            Span::raw(" / "),
            Span::styled("[N]o (Esc)", Style::default().fg(Color::Red)),
        ];
    } else if app.add_files.is_active {
        help_spans = vec![
            Span::styled("Enter: add files", Style::default().fg(Color::Green)),
            Span::raw(" | "),
            Span::styled("Esc: cancel", Style::default().fg(Color::Red)),
        ];
    }

    let footer_paragraph = Paragraph::new(Line::from(help_spans))
        .block(Block::default())
        .alignment(Alignment::Center);
    f.render_widget(footer_paragraph, area);
}

fn draw_status<S: FileCollectionService>(f: &mut Frame, app: &App<S>, area: Rect) {
    if let Some(status) = &app.status {
        let style = if status.starts_with("Failed") {
            Style::default().fg(Color::LightRed)
        } else {
            Style::default().fg(Color::LightCyan)
        };
        let status_text = Paragraph::new(status.as_str())
            .style(style)
            .alignment(Alignment::Center);
        f.render_widget(status_text, area);
    }
}

fn draw_delete_confirmation_dialog<S: FileCollectionService>(f: &mut Frame, app: &App<S>) {
    let area = centered_rect(60, 25, f.area());
    f.render_widget(Clear, area);

    let text = vec![
        Line::from(Span::styled(
            format!("Delete {}?", app.delete_dialog.display_name()),
            Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from("").alignment(Alignment::Center),
        Line::from(Span::raw("This action CANNOT be undone.")).alignment(Alignment::Center),
        Line::from("").alignment(Alignment::Center),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("[Y]es", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" or "),
            Span::styled("[N]o (Esc)", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        ])
        .alignment(Alignment::Center),
    ];

    let block = Block::default()
        .title("Confirm Deletion")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn draw_add_files_prompt<S: FileCollectionService>(f: &mut Frame, app: &App<S>) {
    let area = centered_rect(70, 20, f.area());
    f.render_widget(Clear, area);

    let mut text = vec![
        Line::from("Paths of the files to add, separated by spaces:"),
        Line::from(Span::styled(
            format!("> {}", app.add_files.input_buffer),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(result) = &app.add_files.last_result {
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(result.as_str(), Style::default().fg(Color::LightRed))));
    }

    let block = Block::default()
        .title("Add Files")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(Paragraph::new(text).block(block).wrap(Wrap { trim: false }), area);
}
