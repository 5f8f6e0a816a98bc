/// Keyboard input.
///
/// `InputState` drains every pending terminal event once per frame without
/// blocking. Only Press and Repeat events count: a held arrow key scrolls
/// through terminal auto-repeat, and Release events (sent by terminals with
/// keyboard enhancement) are dropped.
///
/// `command_for` maps a key to what it means in the current focus. It is
/// a pure function so the bindings can be tested without a terminal.

use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::contact::Field;
use crate::domain::nav::Section;
use crate::sim::site::{Focus, SiteState, Stage};
use crate::sim::step::Action;

pub struct InputState {
    /// Key presses collected during the most recent `drain_events`.
    pub keys: Vec<KeyEvent>,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            keys: Vec::with_capacity(8),
        }
    }

    /// Drain all pending terminal events. Call once per frame.
    pub fn drain_events(&mut self) {
        self.keys.clear();

        while poll(Duration::ZERO).unwrap_or(false) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                    self.keys.push(key);
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read terminal event");
                    break;
                }
            }
        }
    }

    pub fn ctrl_c_pressed(&self) -> bool {
        self.keys.iter().any(|k| {
            k.modifiers.contains(KeyModifiers::CONTROL)
                && (k.code == KeyCode::Char('c') || k.code == KeyCode::Char('C'))
        })
    }
}

// ── Bindings ──

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Quit,
    Act(Action),
}

/// What `key` does right now. `page` is the PgUp/PgDn distance in rows.
pub fn command_for(site: &SiteState, key: &KeyEvent, page: i32) -> Option<Command> {
    use Command::{Act, Quit};

    if site.stage == Stage::Intro {
        return matches!(key.code, KeyCode::Char('q') | KeyCode::Esc).then_some(Quit);
    }

    let act = |a: Action| Some(Act(a));
    match site.focus {
        Focus::Form => match key.code {
            KeyCode::Esc => act(Action::Close),
            KeyCode::Tab => act(Action::FormNextField),
            KeyCode::Enter if site.contact.focused() == Some(Field::Message) => act(Action::Submit),
            KeyCode::Enter => act(Action::FormNextField),
            KeyCode::Backspace => act(Action::FormBackspace),
            KeyCode::Up => act(Action::Scroll(-1)),
            KeyCode::Down => act(Action::Scroll(1)),
            KeyCode::Char(c) => act(Action::FormChar(c)),
            _ => None,
        },

        Focus::Lightbox => match key.code {
            KeyCode::Left | KeyCode::Char('h') => act(Action::LightboxStep(-1)),
            KeyCode::Right | KeyCode::Char('l') => act(Action::LightboxStep(1)),
            KeyCode::Esc | KeyCode::Enter => act(Action::Close),
            KeyCode::Char('q') => Some(Quit),
            _ => None,
        },

        Focus::Menu => match key.code {
            KeyCode::Up | KeyCode::Char('k') => act(Action::MenuMove(-1)),
            KeyCode::Down | KeyCode::Char('j') => act(Action::MenuMove(1)),
            KeyCode::Enter => act(Action::MenuChoose),
            KeyCode::Esc => act(Action::Close),
            KeyCode::Char('m') => act(Action::ToggleMenu),
            KeyCode::Char('q') => Some(Quit),
            _ => None,
        },

        Focus::Browse => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Quit),
            KeyCode::Up | KeyCode::Char('k') => act(Action::Scroll(-1)),
            KeyCode::Down | KeyCode::Char('j') => act(Action::Scroll(1)),
            KeyCode::PageUp => act(Action::Scroll(-page)),
            KeyCode::PageDown | KeyCode::Char(' ') => act(Action::Scroll(page)),
            KeyCode::Home => act(Action::ScrollTop),
            KeyCode::End => act(Action::ScrollEnd),
            KeyCode::Char(d @ '1'..='5') => {
                let i = d as usize - '1' as usize;
                act(Action::Jump(Section::ANCHORS[i]))
            }
            KeyCode::Char('m') => act(Action::ToggleMenu),
            KeyCode::Char('f') => act(Action::CycleFilter(1)),
            KeyCode::Char('F') => act(Action::CycleFilter(-1)),
            KeyCode::Char('0') => act(Action::SetFilter("All".into())),
            KeyCode::Left | KeyCode::Char('h') => act(Action::MoveSelection(-1)),
            KeyCode::Right | KeyCode::Char('l') => act(Action::MoveSelection(1)),
            KeyCode::Enter => act(Action::OpenSelected),
            KeyCode::Char('c') => act(Action::EditForm),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::domain::content::Catalog;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mounted() -> SiteState {
        let mut s = SiteState::new(SiteConfig::default(), Catalog::builtin());
        s.stage = Stage::Content;
        s
    }

    #[test]
    fn intro_only_listens_for_quit() {
        let s = SiteState::new(SiteConfig::default(), Catalog::builtin());
        assert_eq!(command_for(&s, &key(KeyCode::Char('q')), 10), Some(Command::Quit));
        assert_eq!(command_for(&s, &key(KeyCode::Down), 10), None);
    }

    #[test]
    fn digits_jump_to_anchors() {
        let s = mounted();
        assert_eq!(
            command_for(&s, &key(KeyCode::Char('3')), 10),
            Some(Command::Act(Action::Jump(Section::Projects)))
        );
        assert_eq!(command_for(&s, &key(KeyCode::Char('6')), 10), None);
        assert_eq!(
            command_for(&s, &key(KeyCode::Char('0')), 10),
            Some(Command::Act(Action::SetFilter("All".into())))
        );
        assert_eq!(
            command_for(&s, &key(KeyCode::PageDown), 18),
            Some(Command::Act(Action::Scroll(18)))
        );
    }

    #[test]
    fn form_captures_letters() {
        let mut s = mounted();
        s.focus = Focus::Form;
        s.contact.focus(Field::Name);
        assert_eq!(
            command_for(&s, &key(KeyCode::Char('q')), 10),
            Some(Command::Act(Action::FormChar('q')))
        );
        assert_eq!(
            command_for(&s, &key(KeyCode::Enter), 10),
            Some(Command::Act(Action::FormNextField))
        );
        s.contact.focus(Field::Message);
        assert_eq!(
            command_for(&s, &key(KeyCode::Enter), 10),
            Some(Command::Act(Action::Submit))
        );
    }

    #[test]
    fn escape_closes_before_quitting() {
        let mut s = mounted();
        s.focus = Focus::Lightbox;
        assert_eq!(command_for(&s, &key(KeyCode::Esc), 10), Some(Command::Act(Action::Close)));
        s.focus = Focus::Browse;
        assert_eq!(command_for(&s, &key(KeyCode::Esc), 10), Some(Command::Quit));
    }

    #[test]
    fn ctrl_c_is_detected() {
        let mut input = InputState::new();
        input.keys.push(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(input.ctrl_c_pressed());
    }
}
