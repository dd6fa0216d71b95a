use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

use super::app::{App, Focus, FormField, Mode};
use crate::dates::{safe_format_date, DateFormat};
use crate::model::{Priority, Task};

pub fn render(frame: &mut Frame, app: &mut App) {
    if app.loading {
        render_loading(frame);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(38), Constraint::Min(0)])
        .split(chunks[1]);

    render_form(frame, app, body[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(body[1]);

    render_message(frame, app, right[0]);
    render_list(frame, app, right[1]);
    render_footer(frame, app, chunks[2]);

    if let Mode::ConfirmDelete { title, .. } = &app.mode {
        render_confirm(frame, title);
    }
}

fn render_loading(frame: &mut Frame) {
    let area = centered_rect(24, 3, frame.area());
    let paragraph = Paragraph::new("Loading todos...")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new("Clario - organize your tasks efficiently")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).bold())
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn field_label(app: &App, field: FormField, label: &'static str) -> Line<'static> {
    let style = if app.focus == Focus::Form && app.form.focused == field {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Line::styled(label, style)
}

fn field_value(app: &App, field: FormField, value: String) -> Line<'static> {
    let focused = app.focus == Focus::Form && app.form.focused == field;
    let mut spans = vec![Span::raw(value)];
    if focused {
        spans.push(Span::styled("_", Style::default().rapid_blink()));
    }
    Line::from(spans)
}

fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let title = if app.editing.is_some() {
        " Edit Task "
    } else {
        " Add New Task "
    };
    let border_style = if app.focus == Focus::Form {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style);

    let priority_value = if app.focus == Focus::Form && app.form.focused == FormField::Priority {
        format!("< {} >", app.form.priority.as_str())
    } else {
        app.form.priority.as_str().to_string()
    };

    let mut lines = vec![
        field_label(app, FormField::Title, "Title *"),
        field_value(app, FormField::Title, app.form.title.clone()),
        Line::raw(""),
        field_label(app, FormField::Description, "Description"),
        field_value(app, FormField::Description, app.form.description.clone()),
        Line::raw(""),
        field_label(app, FormField::Priority, "Priority"),
        Line::raw(priority_value),
        Line::raw(""),
        field_label(app, FormField::DueDate, "Due Date (yyyy-MM-dd)"),
        field_value(app, FormField::DueDate, app.form.due_date.clone()),
    ];
    if let Some(error) = &app.form.error {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        ));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_message(frame: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(error) = &app.error {
        Line::styled(format!(" {error} "), Style::default().fg(Color::Red).bold())
    } else if let Some(success) = &app.success {
        Line::styled(
            format!(" {success} "),
            Style::default().fg(Color::Green).bold(),
        )
    } else {
        Line::raw("")
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn priority_style(priority: Priority) -> Style {
    match priority {
        Priority::High => Style::default().fg(Color::Red).bold(),
        Priority::Medium => Style::default().fg(Color::Yellow),
        Priority::Low => Style::default().fg(Color::Cyan),
    }
}

fn task_line(task: &Task) -> Line<'static> {
    let title_style = if task.completed {
        Style::default().fg(Color::DarkGray).crossed_out()
    } else {
        Style::default().bold()
    };

    let due = task
        .due_date
        .as_deref()
        .map(|d| format!("  due: {}", safe_format_date(Some(d), DateFormat::Human)))
        .unwrap_or_default();
    let created = format!(
        "  created: {}",
        safe_format_date(Some(task.created_at.as_str()), DateFormat::Human)
    );
    let desc = if task.description.is_empty() {
        String::new()
    } else {
        format!("  {}", task.description)
    };

    Line::from(vec![
        Span::raw(format!("[{}] ", task.status_icon())),
        Span::styled(task.title.clone(), title_style),
        Span::styled(
            format!("  {}", task.priority.as_str().to_uppercase()),
            priority_style(task.priority),
        ),
        Span::styled(due, Style::default().fg(Color::DarkGray)),
        Span::styled(created, Style::default().fg(Color::DarkGray)),
        Span::raw(desc),
    ])
}

fn render_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let border_style = if app.focus == Focus::List {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let title = format!(" Your Tasks ({}) ", app.tasks.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style);

    if app.tasks.is_empty() {
        let placeholder = Paragraph::new("No tasks yet\nCreate your first task to get started!")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = app
        .sorted_tasks()
        .into_iter()
        .map(|task| ListItem::new(task_line(task)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));
    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.focus {
        Focus::Form => " Enter submit | Tab/Down next field | Esc cancel ",
        Focus::List => " Space toggle | e edit | d delete | r refresh | Tab form | q quit ",
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

/// Confirmation dialog overlay, rendered on top of everything else.
fn render_confirm(frame: &mut Frame, task_title: &str) {
    let term = frame.area();
    let width = 50.min(term.width.saturating_sub(4));
    let height = 5.min(term.height.saturating_sub(2));
    let area = centered_rect(width, height, term);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Delete todo ")
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = vec![
        Line::from(vec![
            Span::styled(task_title.to_string(), Style::default().bold()),
            Span::raw(" will be permanently deleted."),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::raw("Proceed? "),
            Span::styled("y", Style::default().fg(Color::Green).bold()),
            Span::raw("/"),
            Span::styled("n", Style::default().fg(Color::Red).bold()),
        ]),
    ];

    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), inner);
}

/// Center a rectangle within an area.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
