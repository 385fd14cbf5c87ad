use std::{sync::Arc, thread::sleep, time::Duration};

use crate::input::{is_ctrl_c, spawn_input_thread, InputChannel};
use crate::state::{GameState, RenderDelta, TickResult};
use crate::term::TermManager;

use crossterm::event::KeyCode;
use crossterm::style::Color;

const TICK_INTERVAL_MS: u64 = 100;

const SNAKE_CHAR: char = '●';
const FOOD_CHAR: char = '◆';
const DEAD_SNAKE_CHAR: char = 'X';

const SNAKE_COLOR: Color = Color::Green;
const FOOD_COLOR: Color = Color::Red;
const DEAD_SNAKE_COLOR: Color = Color::Red;

pub struct Game {
    term: TermManager,
}

impl Game {
    pub fn new() -> Self {
        Game { term: TermManager::new() }
    }

    pub fn initialize(&mut self) {
        self.term.setup();
    }

    pub fn shutdown(&mut self) {
        self.term.restore();
    }

    /// Plays one round to its end screen. Returns true if the player wants
    /// another round, false to quit.
    pub fn play(&mut self) -> bool {
        let mut state = GameState::new();
        let channel = Arc::new(InputChannel::new(state.direction()));

        self.draw_board(&state);

        let input_handle = spawn_input_thread(Arc::clone(&channel));

        let (score, win) = loop {
            sleep(Duration::from_millis(TICK_INTERVAL_MS));

            if channel.quit_requested() {
                break (state.score(), false);
            }

            match state.advance(&channel) {
                TickResult::Continued(delta) => self.draw_delta(&delta),
                TickResult::GameOver { score, win } => break (score, win),
            }
        };

        // Both tasks wind down on the same flag
        channel.request_quit();
        input_handle.join().expect("Input thread panicked.");

        self.show_end_screen(&state, score, win)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_board(&mut self, state: &GameState) {
        self.term.clear();
        self.term.draw_borders();

        for pos in state.snake().segments() {
            self.term.print_at(*pos, SNAKE_CHAR, SNAKE_COLOR);
        }

        if let Some(food) = state.food() {
            self.term.print_at(food, FOOD_CHAR, FOOD_COLOR);
        }

        self.draw_score(state.score());
        self.term.flush();
    }

    fn draw_delta(&mut self, delta: &RenderDelta) {
        if let Some(tail) = delta.erased_tail {
            self.term.erase_at(tail);
        }

        self.term.print_at(delta.new_head, SNAKE_CHAR, SNAKE_COLOR);

        if let Some(food) = delta.new_food {
            self.term.print_at(food, FOOD_CHAR, FOOD_COLOR);
        }

        self.draw_score(delta.score);
        self.term.flush();
    }

    fn draw_score(&mut self, score: u32) {
        self.term.print_status(&*format!(
            "Score: {} | Arrow keys or WASD to move | Esc to quit",
            score
        ));
    }

    fn show_end_screen(&mut self, state: &GameState, score: u32, win: bool) -> bool {
        if !win {
            for pos in state.snake().segments() {
                self.term.print_at(*pos, DEAD_SNAKE_CHAR, DEAD_SNAKE_COLOR);
            }
        }

        self.term.show_message(&[
            if win { "You won!" } else { "GAME OVER!" },
            &*format!("Final Score: {}", score),
            "",
            "Press R to Restart or ESC to Quit",
        ]);

        loop {
            let ev = self.term.read_key_blocking();

            if is_ctrl_c(&ev) {
                return false;
            }

            match ev.code {
                KeyCode::Char('r') | KeyCode::Char('R') => return true,
                KeyCode::Esc => return false,
                _ => {}
            }
        }
    }
}
