use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::snake::Direction::{self, *};

use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};

const INPUT_POLL_MS: u64 = 50;

struct Shared {
    pending: Direction,
    committed: Direction,
    quit: bool,
}

/// Shared slot between the input thread and the tick loop: the input thread
/// writes the desired next direction and the quit flag, the tick loop
/// consumes one direction per tick.
pub struct InputChannel {
    shared: Mutex<Shared>,
}

impl InputChannel {
    pub fn new(direction: Direction) -> Self {
        let shared = Shared { pending: direction, committed: direction, quit: false };
        InputChannel { shared: Mutex::new(shared) }
    }

    /// Buffers a direction for the next tick. Reversals are checked against
    /// the direction the last tick actually moved in, not against whatever
    /// was buffered since then.
    pub fn set_pending_direction(&self, direction: Direction) {
        let mut shared = self.shared.lock().unwrap();

        if direction != shared.committed.opposite() {
            shared.pending = direction;
        }
    }

    /// Marks termination as requested. Idempotent; also raised by the game
    /// loop at game over so the input thread winds down with it.
    pub fn request_quit(&self) {
        self.shared.lock().unwrap().quit = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.shared.lock().unwrap().quit
    }

    /// Commits the buffered direction and returns it. With no buffered
    /// change since the last call this just re-returns the previous one.
    pub fn consume_pending(&self) -> Direction {
        let mut shared = self.shared.lock().unwrap();

        shared.committed = shared.pending;
        shared.committed
    }
}

/// Polls for key events until quit is raised, feeding the channel.
pub fn spawn_input_thread(channel: Arc<InputChannel>) -> JoinHandle<()> {
    thread::spawn(move || {
        while !channel.quit_requested() {
            if poll(Duration::from_millis(INPUT_POLL_MS)).expect("Error polling input.") {
                if let Event::Key(ev) = read().expect("Error reading input.") {
                    handle_key(&channel, &ev);
                }
            }
        }
    })
}

fn handle_key(channel: &InputChannel, ev: &KeyEvent) {
    if is_ctrl_c(ev) {
        channel.request_quit();
        return;
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => channel.set_pending_direction(Up),
        KeyCode::Char('a') | KeyCode::Left => channel.set_pending_direction(Left),
        KeyCode::Char('s') | KeyCode::Down => channel.set_pending_direction(Down),
        KeyCode::Char('d') | KeyCode::Right => channel.set_pending_direction(Right),
        KeyCode::Esc => channel.request_quit(),
        _ => {}
    }
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
