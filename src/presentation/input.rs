use crate::application::{App, AppMode, FormFocus};
use crate::presentation::ui::help_line_count;
use crossterm::event::{KeyCode, KeyModifiers};
use std::time::Instant;

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Browse => Self::handle_browse_mode(app, key),
            AppMode::Register => Self::handle_register_mode(app, key, modifiers),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_browse_mode(app: &mut App, key: KeyCode) {
        app.status_message = None;

        match key {
            KeyCode::Char('c') => app.catalog.next_category(),
            KeyCode::Char('C') => app.catalog.previous_category(),
            KeyCode::Char('s') => app.catalog.cycle_sort_key(),
            KeyCode::Char('o') => app.catalog.toggle_sort_order(),
            KeyCode::Left | KeyCode::Char('h') => app.catalog.previous_page(),
            KeyCode::Right | KeyCode::Char('l') => app.catalog.next_page(),
            KeyCode::Char(c @ '1'..='9') => {
                let page = c as usize - '0' as usize;
                if !app.catalog.go_to_page(page) {
                    app.status_message = Some(format!("There is no page {page}"));
                }
            }
            KeyCode::Tab | KeyCode::Char('r') => app.start_registration(),
            KeyCode::F(1) | KeyCode::Char('?') => app.show_help(),
            _ => {}
        }
    }

    fn handle_register_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            KeyCode::Esc => app.stop_registration(),
            KeyCode::F(1) => app.show_help(),
            KeyCode::Tab if modifiers.contains(KeyModifiers::SHIFT) => {
                app.focus = app.focus.previous();
            }
            KeyCode::Tab => app.focus = app.focus.next(),
            KeyCode::BackTab => app.focus = app.focus.previous(),
            KeyCode::Enter => app.submit_registration(Instant::now()),
            KeyCode::Up if app.focus == FormFocus::Course => {
                app.form.select_previous_course(app.catalog.all_courses());
            }
            KeyCode::Down if app.focus == FormFocus::Course => {
                app.form.select_next_course(app.catalog.all_courses());
            }
            KeyCode::Up => app.focus = app.focus.previous(),
            KeyCode::Down => app.focus = app.focus.next(),
            KeyCode::Backspace => {
                if let Some(field) = app.focus.field() {
                    app.form.pop_char(field);
                }
            }
            KeyCode::Char(' ') if app.focus == FormFocus::Course => {
                app.form.select_next_course(app.catalog.all_courses());
            }
            KeyCode::Char(c) => {
                if let Some(field) = app.focus.field() {
                    app.form.push_char(field, c);
                }
            }
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        let max_scroll = help_line_count().saturating_sub(1);
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.close_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll = (app.help_scroll + 1).min(max_scroll);
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll = (app.help_scroll + 5).min(max_scroll);
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}
