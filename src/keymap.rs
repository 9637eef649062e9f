//! Keyboard bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::color::Color;

/// Something the user asked for from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Pause or resume the simulation
    TogglePause,
    /// Advance one generation while paused
    Step,
    /// Paint every new stroke with a random hue
    RandomHue,
    /// Paint every new stroke with this color
    Select(Color),
    /// Empty the grid
    Clear,
    Quit,
}

/// Letter keys that pick a brush color.
pub const COLOR_KEYS: [(char, Color); 14] = [
    ('r', Color::RED),
    ('o', Color::ORANGE),
    ('y', Color::YELLOW),
    ('h', Color::CHARTREUSE),
    ('g', Color::GREEN),
    ('s', Color::SPRING_GREEN),
    ('c', Color::CYAN),
    ('d', Color::DODGER_BLUE),
    ('b', Color::BLUE),
    ('p', Color::PURPLE),
    ('v', Color::VIOLET),
    ('m', Color::MAGENTA),
    ('k', Color::BLACK),
    ('w', Color::WHITE),
];

/// Looks up the command bound to a key press. Letters match in either case.
pub fn command_for(key: KeyEvent) -> Option<Command> {
    // Some platforms report releases too.
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char(' ') => Some(Command::TogglePause),
        KeyCode::Enter => Some(Command::Step),
        KeyCode::Backspace | KeyCode::Delete => Some(Command::Clear),
        KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'q' => Some(Command::Quit),
            'x' => Some(Command::RandomHue),
            c => COLOR_KEYS
                .iter()
                .find(|(key, _)| *key == c)
                .map(|&(_, color)| Command::Select(color)),
        },
        _ => None,
    }
}
