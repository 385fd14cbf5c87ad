use crate::{Coords, GridInt};
use crate::input::InputChannel;
use crate::snake::{Direction::{self, *}, Snake};

use rand::seq::SliceRandom;

pub const BOARD_WIDTH: GridInt = 40;
pub const BOARD_HEIGHT: GridInt = 20;
pub const FOOD_POINTS: u32 = 10;

const INITIAL_SNAKE_LENGTH: GridInt = 3;

pub enum TickResult {
    Continued(RenderDelta),
    GameOver { score: u32, win: bool },
}

/// The cell and score changes of one tick, everything the display needs
/// to update without redrawing the whole board.
pub struct RenderDelta {
    pub new_head: Coords,
    pub erased_tail: Option<Coords>,
    pub new_food: Option<Coords>,
    pub score: u32,
}

pub struct GameState {
    snake: Snake,
    food: Option<Coords>,
    score: u32,
    direction: Direction,
    game_over: bool,
    interior: Vec<Coords>,
}

impl GameState {
    pub fn new() -> Self {
        let center = (BOARD_WIDTH / 2, BOARD_HEIGHT / 2);

        let mut interior = vec![];
        for y in 1..BOARD_HEIGHT - 1 {
            for x in 1..BOARD_WIDTH - 1 {
                interior.push((x, y));
            }
        }

        let mut state = GameState {
            snake: Snake::new(center, INITIAL_SNAKE_LENGTH, Right),
            food: None,
            score: 0,
            direction: Right,
            game_over: false,
            interior,
        };

        state.spawn_food();
        state
    }

    /// Runs one tick: commits the buffered direction, moves the head one
    /// cell and resolves collisions, food and score.
    pub fn advance(&mut self, input: &InputChannel) -> TickResult {
        self.direction = input.consume_pending();

        let head = self.snake.head();
        let new_head = match self.direction {
            Up => (head.0, head.1 - 1),
            Down => (head.0, head.1 + 1),
            Left => (head.0 - 1, head.1),
            Right => (head.0 + 1, head.1),
        };

        // Walls first, then the body. The body check runs before the tail
        // moves, so stepping into the cell the tail is about to vacate
        // still crashes.
        if hits_wall(new_head) || self.snake.occupies(new_head) {
            self.game_over = true;
            return TickResult::GameOver { score: self.score, win: false };
        }

        let ate = self.food == Some(new_head);
        let erased_tail = self.snake.step(new_head, ate);

        let mut new_food = None;
        if ate {
            self.score += FOOD_POINTS;
            self.spawn_food();

            if self.game_over {
                // The snake just filled the last free cell
                return TickResult::GameOver { score: self.score, win: true };
            }

            new_food = self.food;
        }

        TickResult::Continued(RenderDelta {
            new_head,
            erased_tail,
            new_food,
            score: self.score,
        })
    }

    /// Places food on a uniformly chosen free interior cell. With no free
    /// cell left the board is full: game over, food stays unset.
    fn spawn_food(&mut self) {
        let choices: Vec<&Coords> = self.interior.iter()
            .filter(|pos| !self.snake.occupies(**pos))
            .collect();

        match choices.choose(&mut rand::thread_rng()).copied().copied() {
            Some(food) => self.food = Some(food),
            None => {
                self.food = None;
                self.game_over = true;
            }
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Coords> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

fn hits_wall(pos: Coords) -> bool {
    pos.0 == 0 || pos.0 >= BOARD_WIDTH - 1 || pos.1 == 0 || pos.1 >= BOARD_HEIGHT - 1
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::Coords;
    use crate::input::InputChannel;
    use crate::snake::Snake;

    fn continued(result: TickResult) -> RenderDelta {
        match result {
            TickResult::Continued(delta) => delta,
            TickResult::GameOver { .. } => panic!("expected the game to continue"),
        }
    }

    fn is_interior(pos: Coords) -> bool {
        pos.0 >= 1 && pos.0 <= BOARD_WIDTH - 2 && pos.1 >= 1 && pos.1 <= BOARD_HEIGHT - 2
    }

    fn all_interior_cells() -> Vec<Coords> {
        let mut cells = vec![];
        for y in 1..BOARD_HEIGHT - 1 {
            for x in 1..BOARD_WIDTH - 1 {
                cells.push((x, y));
            }
        }
        cells
    }

    #[test]
    fn new_game_starts_centered_with_three_segments() {
        let state = GameState::new();

        let body: Vec<_> = state.snake().segments().copied().collect();
        assert_eq!(body, vec![(20, 10), (19, 10), (18, 10)]);
        assert_eq!(state.score(), 0);
        assert_eq!(state.direction(), Right);
        assert!(!state.game_over);
        assert!(state.food().is_some());
    }

    #[test]
    fn food_never_spawns_on_the_snake_or_the_border() {
        for _ in 0..50 {
            let state = GameState::new();
            let food = state.food().unwrap();

            assert!(is_interior(food));
            assert!(!state.snake().occupies(food));
        }
    }

    #[test]
    fn plain_move_shifts_head_and_vacates_tail() {
        let mut state = GameState::new();
        state.food = Some((1, 1)); // out of the snake's path

        let channel = InputChannel::new(state.direction());
        let delta = continued(state.advance(&channel));

        assert_eq!(delta.new_head, (21, 10));
        assert_eq!(delta.erased_tail, Some((18, 10)));
        assert_eq!(delta.new_food, None);
        assert_eq!(delta.score, 0);
        assert_eq!(state.snake().len(), 3);
        assert_eq!(state.snake().head(), (21, 10));
    }

    #[test]
    fn eating_food_grows_scores_and_respawns() {
        let mut state = GameState::new();
        state.food = Some((21, 10)); // right in front of the head

        let channel = InputChannel::new(state.direction());
        let delta = continued(state.advance(&channel));

        assert_eq!(delta.score, FOOD_POINTS);
        assert_eq!(delta.erased_tail, None);
        assert_eq!(state.snake().len(), 4);

        let respawned = delta.new_food.expect("a new food cell must be chosen");
        assert_eq!(state.food(), Some(respawned));
        assert!(is_interior(respawned));
        assert!(!state.snake().occupies(respawned));
    }

    #[test]
    fn wall_collision_ends_the_game_without_moving_the_snake() {
        let mut state = GameState::new();
        state.snake = Snake::from_segments(vec![(38, 10), (37, 10), (36, 10)]);
        state.food = Some((1, 1));

        let channel = InputChannel::new(Right);
        let result = state.advance(&channel);

        assert!(matches!(result, TickResult::GameOver { score: 0, win: false }));
        assert!(state.game_over);
        assert_eq!(state.snake().head(), (38, 10));
        assert_eq!(state.snake().len(), 3);
    }

    #[test]
    fn body_collision_ends_the_game() {
        let mut state = GameState::new();
        state.snake = Snake::from_segments(vec![
            (10, 10), (10, 11), (11, 11), (11, 10), (12, 10),
        ]);
        state.food = Some((1, 1));

        // Moving right runs the head into the (11, 10) segment
        let channel = InputChannel::new(Right);
        let result = state.advance(&channel);

        assert!(matches!(result, TickResult::GameOver { win: false, .. }));
        assert_eq!(state.snake().len(), 5);
        assert_eq!(state.snake().head(), (10, 10));
    }

    #[test]
    fn moving_into_the_vacating_tail_cell_is_fatal() {
        let mut state = GameState::new();
        state.snake = Snake::from_segments(vec![
            (10, 10), (10, 11), (11, 11), (11, 10),
        ]);
        state.food = Some((1, 1));

        // (11, 10) is the tail and would be vacated this very tick, but the
        // collision check runs against the pre-move body
        let channel = InputChannel::new(Right);
        let result = state.advance(&channel);

        assert!(matches!(result, TickResult::GameOver { win: false, .. }));
    }

    #[test]
    fn spawn_food_with_a_full_board_flags_the_win() {
        let mut state = GameState::new();
        state.snake = Snake::from_segments(all_interior_cells());

        state.spawn_food();

        assert!(state.game_over);
        assert_eq!(state.food(), None);
    }

    #[test]
    fn eating_the_last_free_cell_wins_the_game() {
        let mut state = GameState::new();

        // Every interior cell but (1, 1) is snake; the head sits next to it
        let mut body = vec![(2, 1)];
        for cell in all_interior_cells() {
            if cell != (1, 1) && cell != (2, 1) {
                body.push(cell);
            }
        }
        state.snake = Snake::from_segments(body);
        state.food = Some((1, 1));

        let channel = InputChannel::new(Left);
        let result = state.advance(&channel);

        assert!(matches!(result, TickResult::GameOver { score: FOOD_POINTS, win: true }));
        assert!(state.game_over);
        assert_eq!(state.food(), None);
        assert_eq!(state.snake().len() as GridInt, (BOARD_WIDTH - 2) * (BOARD_HEIGHT - 2));
    }

    #[test]
    fn snake_never_overlaps_itself_while_moving() {
        let mut state = GameState::new();
        state.food = Some((1, 1));

        let channel = InputChannel::new(state.direction());

        // Walk a small clockwise rectangle around the starting position
        for dir in [Right, Down, Left, Up].iter() {
            channel.set_pending_direction(*dir);
            continued(state.advance(&channel));

            let segments: HashSet<_> = state.snake().segments().copied().collect();
            assert_eq!(segments.len(), state.snake().len());
        }
    }
}
