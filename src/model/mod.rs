pub mod game;
pub mod ttm;
