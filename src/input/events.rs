use anyhow::anyhow;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::{FutureExt, StreamExt};

use crate::input::keys::RawKeyEvent;
use crate::tutor::{Dwell, DwellTimer};

/// Keys the host keeps for itself; they never reach the tutor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    ToggleHint,
    /// Opens the prompt for jumping to an item by number.
    GoTo,
    Reset,
    Next,
    Previous,
    Quit,
}

impl Control {
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let control = match key.code {
            KeyCode::F(1) => Control::ToggleHint,
            KeyCode::F(2) => Control::GoTo,
            KeyCode::F(5) => Control::Reset,
            KeyCode::PageDown => Control::Next,
            KeyCode::PageUp => Control::Previous,
            KeyCode::F(10) => Control::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Control::Quit,
            _ => return None,
        };
        Some(control)
    }
}

// Possible input events
#[derive(Debug)]
pub enum InputEvent {
    Key(RawKeyEvent),
    Control(Control),
    Resize(u16, u16),
    Dwell(Dwell),
    None,
}

impl InputEvent {
    pub fn from_key(key: &KeyEvent) -> Self {
        if let Some(control) = Control::from_key(key) {
            return InputEvent::Control(control);
        }
        match RawKeyEvent::from_crossterm(key) {
            Some(raw) => InputEvent::Key(raw),
            None => InputEvent::None,
        }
    }
}

// Handle input events from the terminal and the pending dwell
pub struct EventHandler {
    event_stream: EventStream,
    dwell_timer: DwellTimer,
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            event_stream: EventStream::new(),
            dwell_timer: DwellTimer::new(),
        }
    }

    pub fn schedule(&mut self, dwell: Dwell) {
        self.dwell_timer.schedule(dwell);
    }

    pub fn cancel_dwell(&mut self) {
        self.dwell_timer.cancel();
    }

    /// Waits for the next terminal event or for the pending dwell to elapse,
    /// whichever comes first.
    pub async fn next(&mut self) -> anyhow::Result<InputEvent> {
        tokio::select! {
            event = self.event_stream.next().fuse() => {
                match event {
                    Some(Ok(event)) => match event {
                        Event::Key(key_event) => Ok(InputEvent::from_key(&key_event)),
                        Event::Resize(width, height) => Ok(InputEvent::Resize(width, height)),
                        _ => Ok(InputEvent::None),
                    }
                    Some(Err(e)) => Err(anyhow!("Error reading event: {}", e)),
                    None => Err(anyhow!("Terminal event stream closed")),
                }
            }
            dwell = self.dwell_timer.wait() => {
                Ok(InputEvent::Dwell(dwell))
            }
        }
    }
}
