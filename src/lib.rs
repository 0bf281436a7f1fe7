//! BLOCKFALL - a falling-block puzzle engine with a terminal front end
//!
//! The engine (`shape`, `board`, `piece`, `spawner`, `ticker`, `score`, `game`)
//! is single-threaded and driven entirely by `Game::update` and
//! `Game::process_command`. `input`, `ui` and `settings` connect it to a
//! terminal.

pub mod board;
pub mod game;
pub mod input;
pub mod piece;
pub mod score;
pub mod settings;
pub mod shape;
pub mod spawner;
pub mod ticker;
pub mod ui;
