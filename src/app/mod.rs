mod builder;
mod terminal;
mod ui;

pub use builder::TutorBuilder;
pub use terminal::restore as restore_terminal;

use crate::app::terminal::TerminalContext;
use crate::app::ui::UISystem;
use crate::config::{Config, FileConfig};
use crate::input::events::{Control, EventHandler, InputEvent};
use crate::input::normalizer::KeyNormalizer;
use crate::tutor::{Dwell, Flow, KeyResponse, Session};
use crate::ui::context::RenderContext;
use crate::ui::theme::Theme;
use anyhow::Result;
use log::{debug, info};
use std::io::Write;

/// What the host has to do after one event went through the session.
#[derive(Debug, Default, PartialEq, Eq)]
struct Effects {
    schedule: Option<Dwell>,
    cancel_dwell: bool,
    resize: Option<(usize, usize)>,
    quit: bool,
}

const MAX_PROMPT_DIGITS: usize = 4;

/// `prompt` holds the digits typed since F2 opened the go-to prompt. While it
/// is open, key presses edit it instead of reaching the session.
fn dispatch(session: &mut Session, prompt: &mut Option<String>, event: InputEvent) -> Effects {
    let mut effects = Effects::default();
    match event {
        InputEvent::Key(key) => match prompt {
            Some(digits) => {
                if edit_prompt(session, digits, &key.key, &mut effects) {
                    *prompt = None;
                }
            }
            None => match session.handle_terminal_key(key) {
                KeyResponse::Completed(dwell) | KeyResponse::Failed(dwell) => {
                    effects.schedule = Some(dwell);
                }
                KeyResponse::Advanced { .. } | KeyResponse::Ignored => {}
            },
        },
        InputEvent::Dwell(dwell) => {
            session.on_dwell(&dwell);
        }
        InputEvent::Control(control) => match control {
            Control::ToggleHint => session.toggle_hint(),
            Control::GoTo => {
                *prompt = if prompt.is_some() {
                    None
                } else {
                    Some(String::new())
                };
            }
            Control::Reset => {
                session.reset();
                effects.cancel_dwell = true;
            }
            Control::Next | Control::Previous => {
                let moved = if control == Control::Next {
                    session.next()
                } else {
                    session.previous()
                };
                match moved {
                    Ok(()) => effects.cancel_dwell = true,
                    Err(e) => debug!("{}", e),
                }
            }
            Control::Quit => effects.quit = true,
        },
        InputEvent::Resize(width, height) => {
            effects.resize = Some((width as usize, height as usize));
        }
        InputEvent::None => {}
    }
    effects
}

/// Applies one key to the open prompt. Returns whether the prompt closes.
fn edit_prompt(
    session: &mut Session,
    digits: &mut String,
    key: &str,
    effects: &mut Effects,
) -> bool {
    match key {
        "Enter" => {
            // Items are numbered from 1 on screen.
            let target = digits.parse::<usize>().ok().and_then(|n| n.checked_sub(1));
            match target.map(|index| session.jump_to(index)) {
                Some(Ok(())) => effects.cancel_dwell = true,
                Some(Err(e)) => debug!("{}", e),
                None => debug!("No item number in '{}'", digits),
            }
            true
        }
        "Escape" => true,
        "Backspace" => {
            digits.pop();
            false
        }
        _ => {
            let mut chars = key.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                if c.is_ascii_digit() && digits.len() < MAX_PROMPT_DIGITS {
                    digits.push(c);
                }
            }
            false
        }
    }
}

pub struct Tutor {
    session: Session,
    flow: Flow,
    theme: Theme,
    terminal: TerminalContext,
    ui: UISystem,
    events: EventHandler,
    prompt: Option<String>,
    running: bool,
}

impl Tutor {
    pub fn from_builder(builder: TutorBuilder) -> Result<Self> {
        let config = match builder.config {
            Some(config) => config,
            None => Config::try_from(FileConfig::default())?,
        };
        let Config {
            flow,
            layout,
            curriculum,
            policy,
        } = config;
        let session = Session::new(curriculum, KeyNormalizer::new(layout), policy);

        // Terminal last, so a bad configuration never leaves it in raw mode.
        let terminal = TerminalContext::new()?;
        let ui = UISystem::new(terminal.width, terminal.height)?;

        Ok(Self {
            session,
            flow,
            theme: Theme::default(),
            terminal,
            ui,
            events: EventHandler::new(),
            prompt: None,
            running: true,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        info!(
            "Starting {:?} flow with {} items",
            self.flow,
            self.session.curriculum().len()
        );
        while self.running {
            self.render()?;
            let event = self.events.next().await?;
            self.handle_event(event)?;
        }
        Ok(())
    }

    fn handle_event(&mut self, event: InputEvent) -> Result<()> {
        let effects = dispatch(&mut self.session, &mut self.prompt, event);
        if effects.cancel_dwell {
            self.events.cancel_dwell();
        }
        if let Some(dwell) = effects.schedule {
            self.events.schedule(dwell);
        }
        if let Some((width, height)) = effects.resize {
            self.terminal.resize(width, height)?;
            self.ui.resize(width, height);
        }
        if effects.quit {
            info!("Quit requested");
            self.running = false;
        }
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let snapshot = self.session.snapshot();
        self.ui.sync(&snapshot, self.flow)?;

        let context = RenderContext {
            snapshot: &snapshot,
            layout: self.session.normalizer().layout(),
            theme: &self.theme,
            flow: self.flow,
            prompt: self.prompt.as_deref(),
        };
        self.ui
            .compositor
            .render(&context, &mut self.terminal.stdout)?;
        self.terminal.stdout.flush()?;
        Ok(())
    }

    pub fn cleanup(self) -> Result<()> {
        self.terminal.cleanup()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curriculum::Curriculum;
    use crate::input::keys::RawKeyEvent;
    use crate::input::layout::KeyboardLayout;
    use crate::tutor::{DwellTimer, SessionPolicy, Status};
    use crossterm::event::KeyModifiers;

    fn session() -> Session {
        let source = r#"
            [[items]]
            id = "ctrl-d"
            keys = "<C-d>"
            description = "Half page down"
            category = "navigation"
            difficulty = "intermediate"

            [[items]]
            id = "gg"
            keys = "gg"
            description = "Top of file"
            category = "navigation"
            difficulty = "beginner"
        "#;
        Session::new(
            Curriculum::from_toml(source).unwrap(),
            KeyNormalizer::new(KeyboardLayout::us()),
            SessionPolicy::exercise(),
        )
    }

    fn key(c: char, modifiers: KeyModifiers) -> InputEvent {
        let code = format!("Key{}", c.to_ascii_uppercase());
        InputEvent::Key(RawKeyEvent::new(c.to_string(), code).with_modifiers(modifiers))
    }

    #[test]
    fn test_completion_schedules_dwell() {
        let mut session = session();
        let effects = dispatch(&mut session, &mut None, key('d', KeyModifiers::CONTROL));
        let dwell = effects.schedule.unwrap();
        assert_eq!(session.status(), Status::Success);

        dispatch(&mut session, &mut None, InputEvent::Dwell(dwell));
        assert_eq!(session.index(), 1);
    }

    #[test]
    fn test_controls() {
        let mut session = session();
        assert!(dispatch(&mut session, &mut None, InputEvent::Control(Control::Quit)).quit);

        let effects = dispatch(&mut session, &mut None, InputEvent::Control(Control::Next));
        assert!(effects.cancel_dwell);
        assert_eq!(session.index(), 1);

        // Already at the last item: nothing to cancel.
        let effects = dispatch(&mut session, &mut None, InputEvent::Control(Control::Next));
        assert!(!effects.cancel_dwell);

        dispatch(&mut session, &mut None, InputEvent::Control(Control::ToggleHint));
        assert!(session.snapshot().hint_visible);

        let effects = dispatch(&mut session, &mut None, InputEvent::Control(Control::Reset));
        assert!(effects.cancel_dwell);
        assert_eq!(session.index(), 0);
    }

    fn control(control: Control) -> InputEvent {
        InputEvent::Control(control)
    }

    fn typed(key: &str) -> InputEvent {
        InputEvent::Key(RawKeyEvent::new(key, key))
    }

    #[test]
    fn test_goto_prompt_jumps_to_item() {
        let mut session = session();
        let mut prompt = None;
        dispatch(&mut session, &mut prompt, control(Control::GoTo));
        assert_eq!(prompt.as_deref(), Some(""));

        // Keys edit the prompt and never reach the session.
        for key in ["9", "Backspace", "2", "x"] {
            dispatch(&mut session, &mut prompt, typed(key));
        }
        assert_eq!(prompt.as_deref(), Some("2"));
        assert_eq!(session.consumed(), 0);

        let effects = dispatch(&mut session, &mut prompt, typed("Enter"));
        assert!(effects.cancel_dwell);
        assert!(prompt.is_none());
        assert_eq!(session.index(), 1);
    }

    #[test]
    fn test_goto_prompt_rejects_out_of_range() {
        let mut session = session();
        let mut prompt = Some("7".to_string());
        let effects = dispatch(&mut session, &mut prompt, typed("Enter"));
        assert!(!effects.cancel_dwell);
        assert!(prompt.is_none());
        assert_eq!(session.index(), 0);

        let mut prompt = Some("0".to_string());
        dispatch(&mut session, &mut prompt, typed("Enter"));
        assert_eq!(session.index(), 0);

        let mut prompt = Some("2".to_string());
        dispatch(&mut session, &mut prompt, typed("Escape"));
        assert!(prompt.is_none());
        assert_eq!(session.index(), 0);
    }

    #[test]
    fn test_resize() {
        let mut session = session();
        let effects = dispatch(&mut session, &mut None, InputEvent::Resize(100, 40));
        assert_eq!(effects.resize, Some((100, 40)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_during_error_dwell() {
        let mut session = session();
        let mut timer = DwellTimer::new();
        let effects = dispatch(&mut session, &mut None, key('x', KeyModifiers::NONE));
        timer.schedule(effects.schedule.unwrap());

        // The user resets before the error dwell fires; the late dwell is stale.
        dispatch(&mut session, &mut None, InputEvent::Control(Control::Next));
        let fired = timer.wait().await;
        dispatch(&mut session, &mut None, InputEvent::Dwell(fired));
        assert_eq!(session.index(), 1);
        assert_eq!(session.status(), Status::Waiting);
    }
}
