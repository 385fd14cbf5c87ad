mod game;
mod input;
mod snake;
mod state;
mod term;

pub type GridInt = u16;
pub type Coords = (GridInt, GridInt);

fn main() {
    let mut game = game::Game::new();
    game.initialize();

    // One play() call is one full round; it keeps returning true while
    // the player picks Restart at the end screen
    while game.play() {}

    game.shutdown();
}
