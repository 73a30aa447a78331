use crate::application::{
    App, AppMode, Catalog, FormFocus, FormStatus, LoadState, RegistrationForm,
};
use crate::domain::{Course, FormField, SortOrder};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(66), Constraint::Percentage(34)])
        .split(chunks[1]);

    render_header(f, app, chunks[0]);
    render_catalog(f, app, body[0]);
    render_form(f, app, body[1]);
    render_status_bar(f, app, chunks[2]);

    if app.mode == AppMode::Help {
        render_help_popup(f, app.help_scroll);
    }
}

/// Category label with its first character upper-cased.
pub fn display_category(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(format!(
        "coursedeck - Online Course Platform | {} courses",
        app.catalog.all_courses().len()
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_catalog(f: &mut Frame, app: &App, area: Rect) {
    let catalog = &app.catalog;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_controls(f, catalog, chunks[0]);

    let border_style = if app.mode == AppMode::Browse {
        Style::default().fg(Color::LightBlue)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title("Courses");

    match catalog.load_state() {
        LoadState::Loading => {
            let loading = Paragraph::new("Loading courses...")
                .style(Style::default().fg(Color::Gray))
                .block(block);
            f.render_widget(loading, chunks[1]);
        }
        LoadState::Failed(message) => {
            let error = Paragraph::new(message.as_str())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(block);
            f.render_widget(error, chunks[1]);
        }
        LoadState::Loaded => {
            let displayed = catalog.displayed_courses();
            if displayed.is_empty() {
                let empty = Paragraph::new("No courses found that match your criteria.")
                    .style(Style::default().fg(Color::Gray))
                    .block(block);
                f.render_widget(empty, chunks[1]);
            } else {
                f.render_widget(course_table(displayed).block(block), chunks[1]);
            }

            if catalog.total_pages() > 1 {
                f.render_widget(pagination(catalog), chunks[2]);
            }
        }
    }
}

fn render_controls(f: &mut Frame, catalog: &Catalog, area: Rect) {
    let arrow = match catalog.sort_order() {
        SortOrder::Asc => "↑",
        SortOrder::Desc => "↓",
    };
    let controls = Line::from(vec![
        Span::raw("Category: "),
        Span::styled(
            display_category(catalog.filter_category()),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("  |  Sort by: "),
        Span::styled(catalog.sort_key().label(), Style::default().fg(Color::Yellow)),
        Span::raw(format!(" {arrow} ({})", catalog.sort_order())),
    ]);
    let widget = Paragraph::new(controls)
        .block(Block::default().borders(Borders::ALL).title("Filter & Sort"));
    f.render_widget(widget, area);
}

fn course_table(courses: &[Course]) -> Table<'_> {
    let header = Row::new(
        ["Title", "Instructor", "Category", "Rating", "Price", "Duration", "Enrolled"]
            .into_iter()
            .map(|h| Cell::from(h).style(Style::default().fg(Color::Yellow))),
    )
    .height(1);

    let rows = courses.iter().map(|course| {
        Row::new(vec![
            Cell::from(course.title.as_str()).style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from(course.instructor.as_str()),
            Cell::from(display_category(&course.category)),
            Cell::from(format!("{}/5", course.rating)),
            Cell::from(format!("${}", course.price)).style(Style::default().fg(Color::LightBlue)),
            Cell::from(course.duration.as_str()),
            Cell::from(course.enrolled.as_str()),
        ])
    });

    let widths = [
        Constraint::Min(16),
        Constraint::Length(16),
        Constraint::Length(12),
        Constraint::Length(7),
        Constraint::Length(9),
        Constraint::Length(10),
        Constraint::Length(8),
    ];

    Table::new(rows, widths).header(header).column_spacing(1)
}

fn pagination(catalog: &Catalog) -> Paragraph<'static> {
    let disabled = Style::default().fg(Color::DarkGray);
    let enabled = Style::default();

    let mut spans = vec![Span::styled(
        "‹ Prev ",
        if catalog.has_previous_page() { enabled } else { disabled },
    )];
    for page in 1..=catalog.total_pages() {
        let style = if page == catalog.current_page() {
            Style::default().bg(Color::LightBlue).fg(Color::Black)
        } else {
            enabled
        };
        spans.push(Span::styled(format!(" {page} "), style));
    }
    spans.push(Span::styled(
        " Next ›",
        if catalog.has_next_page() { enabled } else { disabled },
    ));
    spans.push(Span::raw(format!(
        "   Page {} of {}",
        catalog.current_page(),
        catalog.total_pages()
    )));

    Paragraph::new(Line::from(spans))
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let form = &app.form;
    let active = app.mode == AppMode::Register;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if active {
            Style::default().fg(Color::LightBlue)
        } else {
            Style::default()
        })
        .title("Register for a Course");

    if form.status() == FormStatus::Success {
        let success = Paragraph::new(vec![
            Line::from(Span::styled(
                "Registration Successful!",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Thank you for signing up. We've sent a confirmation to your email."),
        ])
        .style(Style::default().fg(Color::Green))
        .wrap(Wrap { trim: true })
        .block(block);
        f.render_widget(success, area);
        return;
    }

    let course_label = form
        .selected_course(app.catalog.all_courses())
        .map(|course| course.title.clone())
        .unwrap_or_else(|| "Choose a course...".to_string());

    let mut lines = vec![
        Line::from(Span::styled("Secure your spot today!", Style::default().fg(Color::Gray))),
        Line::from(""),
    ];
    for (focus, label) in [(FormFocus::Name, "Full Name"), (FormFocus::Email, "Email Address")] {
        let value = focus
            .field()
            .map(|field| form.fields().value(field).to_string())
            .unwrap_or_default();
        push_field(&mut lines, app, form, focus, label, value);
    }
    push_field(&mut lines, app, form, FormFocus::Course, "Select Course", course_label);

    let button_text = if form.status() == FormStatus::Submitting {
        "[ Submitting... ]"
    } else {
        "[ Sign Up Now ]"
    };
    let button_style = if !form.can_submit() {
        Style::default().fg(Color::DarkGray)
    } else if active && app.focus == FormFocus::Submit {
        Style::default().bg(Color::LightBlue).fg(Color::Black)
    } else {
        Style::default().fg(Color::LightBlue)
    };
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(button_text, button_style)));

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    f.render_widget(widget, area);
}

fn push_field(
    lines: &mut Vec<Line<'static>>,
    app: &App,
    form: &RegistrationForm,
    focus: FormFocus,
    label: &'static str,
    value: String,
) {
    let focused = app.mode == AppMode::Register && app.focus == focus;
    let error = focus.field().and_then(|field: FormField| form.error_for(field));

    lines.push(Line::from(Span::styled(label, Style::default().fg(Color::Yellow))));
    let value_style = if focused {
        Style::default().bg(Color::Blue).fg(Color::White)
    } else if error.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };
    let marker = if focused { "> " } else { "  " };
    lines.push(Line::from(vec![
        Span::raw(marker),
        Span::styled(value, value_style),
    ]));
    if let Some(message) = error {
        lines.push(Line::from(Span::styled(
            format!("  {message}"),
            Style::default().fg(Color::Red),
        )));
    }
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = match app.mode {
        AppMode::Browse => app.status_message.clone().unwrap_or_else(|| {
            "c/C: category | s: sort key | o: order | ←/→: page | Tab: register | ?: help | q: quit"
                .to_string()
        }),
        AppMode::Register => app.status_message.clone().unwrap_or_else(|| {
            "Tab/Shift+Tab: next/previous field | ↑/↓: choose course | Enter: submit | Esc: back"
                .to_string()
        }),
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help"
            .to_string(),
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Browse => Style::default(),
            AppMode::Register => Style::default().fg(Color::Green),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(status, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(
                    "coursedeck Help (Line {}/{})",
                    start_line + 1,
                    help_lines.len()
                ))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

/// Number of lines in the help text, used to bound scrolling.
pub fn help_line_count() -> usize {
    HELP_TEXT.lines().count()
}

const HELP_TEXT: &str = r#"COURSEDECK KEY REFERENCE

=== BROWSING THE CATALOG ===
c               Next category filter
C               Previous category filter
s               Cycle sort key (Rating, Price, Title)
o               Toggle ascending / descending order
← / h           Previous page
→ / l           Next page
1-9             Jump to page
Tab / r         Move to the registration form
? / F1          Show this help
q               Quit

Changing the category, sort key or order returns to page 1.
Prices are compared as numbers; prices that are not numbers
are always listed last.

=== REGISTRATION FORM ===
Tab             Next field
Shift+Tab       Previous field
↑ / ↓           Choose a course (on the course field)
Space           Next course (on the course field)
Backspace       Delete the last character
Enter           Submit the registration
Esc             Back to the catalog

All three fields are required and the email address must look
like name@domain.tld. Registration takes a moment; the form
clears itself shortly after a successful sign-up.

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LoadError;
    use crate::domain::services::fixtures::numbered_courses;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_display_category() {
        assert_eq!(display_category("programming"), "Programming");
        assert_eq!(display_category("all"), "All");
        assert_eq!(display_category(""), "");
    }

    #[test]
    fn test_loading_message() {
        let app = App::default();
        assert!(render(&app).contains("Loading courses..."));
    }

    #[test]
    fn test_error_message() {
        let mut app = App::default();
        app.catalog.apply_load_result(Err(LoadError::Status { status: 500 }));
        let screen = render(&app);
        assert!(screen.contains("Failed to fetch course data."));
        assert!(!screen.contains("Loading courses..."));
    }

    #[test]
    fn test_empty_catalog_message() {
        let mut app = App::default();
        app.catalog.apply_load_result(Ok(Vec::new()));
        assert!(render(&app).contains("No courses found that match your criteria."));
    }

    #[test]
    fn test_pagination_only_with_several_pages() {
        let mut app = App::default();
        app.catalog.apply_load_result(Ok(numbered_courses(13)));
        let screen = render(&app);
        assert!(screen.contains("Page 1 of 3"));
        assert!(screen.contains("Course 01"));

        let mut single = App::default();
        single.catalog.apply_load_result(Ok(numbered_courses(3)));
        assert!(!render(&single).contains("Page 1 of"));
    }

    #[test]
    fn test_form_shows_errors_and_success() {
        let mut app = App::default();
        app.start_registration();
        app.submit_registration(std::time::Instant::now());
        let screen = render(&app);
        assert!(screen.contains("Name is required."));
        assert!(screen.contains("Please select a course."));

        let mut app = App::default();
        app.catalog.apply_load_result(Ok(numbered_courses(2)));
        app.form.set_name("Ada");
        app.form.set_email("ada@example.com");
        app.form.select_next_course(app.catalog.all_courses());
        let start = std::time::Instant::now();
        app.submit_registration(start);
        assert!(render(&app).contains("Submitting..."));
        app.tick(start + app.form.timings().submit_delay);
        assert!(render(&app).contains("Registration Successful!"));
    }

    #[test]
    fn test_help_text_line_count() {
        assert!(help_line_count() > 10);
    }
}
