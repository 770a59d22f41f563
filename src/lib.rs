pub mod types;
pub mod board;
pub mod movegen;
pub mod marked;
pub mod engine;
pub mod game;
pub mod session;
