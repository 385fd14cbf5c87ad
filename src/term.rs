use crate::{Coords, GridInt};
use crate::state::{BOARD_HEIGHT, BOARD_WIDTH};
use std::{io::{stdout, Stdout, Write}, process::exit};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::event::{read, Event, KeyEvent};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};

const BORDER_COLOR: Color = Color::White;
const STATUS_COLOR: Color = Color::Yellow;
const MESSAGE_COLOR: Color = Color::White;

pub struct TermManager {
    stdout: Stdout,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout() }
    }

    pub fn setup(&mut self) {
        let (width, height) = terminal::size().expect("Error reading size.");
        if width < BOARD_WIDTH || height < BOARD_HEIGHT + 2 {
            println!(
                "This game needs a terminal of at least {}x{} cells.",
                BOARD_WIDTH,
                BOARD_HEIGHT + 2
            );
            exit(0);
        }

        execute!(self.stdout, EnterAlternateScreen).expect("Error entering alt screen");
        self.set_raw_mode(true);
        self.set_cursor_visibility(false);
    }

    pub fn restore(&mut self) {
        self.set_raw_mode(false);
        self.set_cursor_visibility(true);
        execute!(self.stdout, style::ResetColor, LeaveAlternateScreen)
            .expect("Error leaving alt screen");
    }

    pub fn read_key_blocking(&self) -> KeyEvent {
        loop {
            if let Event::Key(ev) = read().unwrap() {
                return ev;
            }
        }
    }

    pub fn clear(&mut self) {
        execute!(self.stdout, terminal::Clear(ClearType::All)).expect("Error clearing.");
    }

    pub fn draw_borders(&mut self) {
        let end_x = BOARD_WIDTH - 1;
        let end_y = BOARD_HEIGHT - 1;

        for x in 1..end_x {
            self.print_at((x, 0), '═', BORDER_COLOR);
            self.print_at((x, end_y), '═', BORDER_COLOR);
        }

        for y in 1..end_y {
            self.print_at((0, y), '║', BORDER_COLOR);
            self.print_at((end_x, y), '║', BORDER_COLOR);
        }

        self.print_at((0, 0), '╔', BORDER_COLOR);
        self.print_at((end_x, 0), '╗', BORDER_COLOR);
        self.print_at((0, end_y), '╚', BORDER_COLOR);
        self.print_at((end_x, end_y), '╝', BORDER_COLOR);

        self.flush();
    }

    pub fn print_at(&mut self, pos: Coords, ch: char, color: Color) {
        queue!(
            self.stdout,
            cursor::MoveTo(pos.0, pos.1),
            style::SetForegroundColor(color),
            style::Print(ch)
        )
        .unwrap();
    }

    pub fn erase_at(&mut self, pos: Coords) {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(' ')).unwrap();
    }

    /// Status text on the line below the board.
    pub fn print_status(&mut self, text: &str) {
        queue!(
            self.stdout,
            cursor::MoveTo(2, BOARD_HEIGHT + 1),
            style::SetForegroundColor(STATUS_COLOR),
            style::Print(text)
        )
        .unwrap();
    }

    /// Draws a blank-padded message box centered over the board.
    pub fn show_message(&mut self, lines: &[&str]) {
        let msg_height = (lines.len() + 2) as GridInt;
        let msg_width = (lines.iter().map(|x| x.len()).max().unwrap() + 2) as GridInt;
        let top_left = (
            BOARD_WIDTH / 2 - msg_width / 2,
            BOARD_HEIGHT / 2 - msg_height / 2,
        );

        let blank = " ".repeat(msg_width as usize);
        self.print_line_at((top_left.0, top_left.1), &blank, MESSAGE_COLOR);
        self.print_line_at((top_left.0, top_left.1 + msg_height - 1), &blank, MESSAGE_COLOR);

        for (i, line) in lines.iter().enumerate() {
            let padded = format!("{: ^width$}", line, width = msg_width as usize);
            let y = top_left.1 + i as GridInt + 1;
            self.print_line_at((top_left.0, y), &padded, MESSAGE_COLOR);
        }

        self.flush();
    }

    pub fn flush(&mut self) {
        self.stdout.flush().expect("Error flushing.");
    }

    ///////////////////////////////////////////////////////////////////////////

    fn print_line_at(&mut self, pos: Coords, text: &str, color: Color) {
        queue!(
            self.stdout,
            cursor::MoveTo(pos.0, pos.1),
            style::SetForegroundColor(color),
            style::Print(text)
        )
        .unwrap();
    }

    fn set_raw_mode(&self, option: bool) {
        let res = if option {
            terminal::enable_raw_mode()
        } else {
            terminal::disable_raw_mode()
        };

        res.expect("Error setting raw mode.");
    }

    fn set_cursor_visibility(&mut self, option: bool) {
        let res = if option {
            execute!(self.stdout, cursor::Show)
        } else {
            execute!(self.stdout, cursor::Hide)
        };

        res.expect("Error setting cursor visibility.");
    }
}
