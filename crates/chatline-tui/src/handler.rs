use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use crate::app::{App, FocusPane};
use crate::tui::AppEvent;

const WHEEL_ROWS: u16 = 3;

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        // Viewport is picked up on the next draw
        AppEvent::Resize => {}
        AppEvent::Tick => app.tick_animation(),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any pane
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }
    if key.code == KeyCode::Tab {
        app.toggle_focus();
        return;
    }

    match app.focus {
        FocusPane::Input => handle_input_key(app, key),
        FocusPane::Transcript => handle_transcript_key(app, key),
    }
}

fn handle_input_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            app.activate_send();
        }
        KeyCode::Esc => app.focus = FocusPane::Transcript,
        KeyCode::PageUp => app.page_up(),
        KeyCode::PageDown => app.page_down(),
        KeyCode::Up => app.scroll_up(1),
        KeyCode::Down => app.scroll_down(1),
        KeyCode::Backspace => app.controller.input_mut().backspace(),
        KeyCode::Delete => app.controller.input_mut().delete(),
        KeyCode::Left => app.controller.input_mut().move_left(),
        KeyCode::Right => app.controller.input_mut().move_right(),
        KeyCode::Home => app.controller.input_mut().move_home(),
        KeyCode::End => app.controller.input_mut().move_end(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.controller.input_mut().insert(c);
        }
        _ => {}
    }
}

fn handle_transcript_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('i') | KeyCode::Enter | KeyCode::Esc => app.focus = FocusPane::Input,
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(1),
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => app.page_down(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => app.page_up(),
        KeyCode::PageDown => app.page_down(),
        KeyCode::PageUp => app.page_up(),
        KeyCode::Char('g') | KeyCode::Home => app.scroll_up(u16::MAX),
        KeyCode::Char('G') | KeyCode::End => app.scroll_to_bottom(),
        _ => {}
    }
}

fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let x = mouse.column;
    let y = mouse.row;

    let in_transcript = app.transcript_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);
    let in_input = app.input_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);
    let in_send = app.send_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);

    match mouse.kind {
        MouseEventKind::ScrollDown if in_transcript => app.scroll_down(WHEEL_ROWS),
        MouseEventKind::ScrollUp if in_transcript => app.scroll_up(WHEEL_ROWS),
        MouseEventKind::Down(MouseButton::Left) => {
            if in_send {
                app.activate_send();
            } else if in_input {
                app.focus = FocusPane::Input;
            } else if in_transcript {
                app.focus = FocusPane::Transcript;
            }
        }
        _ => {}
    }
}
