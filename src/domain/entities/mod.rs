pub mod decision;
pub mod league;
pub mod player;
pub mod roster;
