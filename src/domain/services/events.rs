#[cfg(test)]
#[path = "events_test.rs"]
mod tests;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use crossterm::event::KeyEventKind;
use crossterm::event::MouseEventKind;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::domain::models::Event;

/// Maps a key press to the chat view action it triggers. Anything unbound is
/// handed to the input box.
fn key_event(input: Input) -> Event {
    let event = match (input.key, input.ctrl) {
        (Key::Up, true) => Event::UIChatPrevious(),
        (Key::Down, true) => Event::UIChatNext(),
        (Key::Up, false) => Event::UIScrollUp(),
        (Key::Down, false) => Event::UIScrollDown(),
        (Key::PageUp, _) | (Key::Char('u'), true) => Event::UIScrollPageUp(),
        (Key::PageDown, _) | (Key::Char('d'), true) => Event::UIScrollPageDown(),
        (Key::Char('c'), true) => Event::KeyboardCTRLC(),
        (Key::Char('n'), true) => Event::KeyboardCTRLN(),
        (Key::Char('o'), true) => Event::KeyboardCTRLO(),
        (Key::Enter, _) => Event::KeyboardEnter(),
        _ => Event::KeyboardCharInput(input),
    };

    return event;
}

/// Merges terminal input with query responses coming back from the actions
/// service.
pub struct EventsService {
    crossterm_events: EventStream,
    events: mpsc::UnboundedReceiver<Event>,
}

impl EventsService {
    pub fn new(events: mpsc::UnboundedReceiver<Event>) -> EventsService {
        return EventsService {
            crossterm_events: EventStream::new(),
            events,
        };
    }

    fn handle_crossterm(&self, event: CrosstermEvent) -> Option<Event> {
        match event {
            CrosstermEvent::Mouse(mouseevent) => match mouseevent.kind {
                MouseEventKind::ScrollUp => {
                    return Some(Event::UIScrollUp());
                }
                MouseEventKind::ScrollDown => {
                    return Some(Event::UIScrollDown());
                }
                _ => {
                    return None;
                }
            },
            CrosstermEvent::Key(keyevent) => {
                if keyevent.kind == KeyEventKind::Release {
                    return None;
                }

                return Some(key_event(keyevent.into()));
            }
            _ => return None,
        }
    }

    pub async fn next(&mut self) -> Result<Event> {
        loop {
            let evt = tokio::select! {
                event = self.events.recv() => event,
                event = self.crossterm_events.next() => match event {
                    Some(Ok(input)) => self.handle_crossterm(input),
                    Some(Err(_)) => None,
                    None => None
                },
                _ = time::sleep(time::Duration::from_millis(500)) => Some(Event::UITick())
            };

            if let Some(event) = evt {
                return Ok(event);
            }
        }
    }
}
