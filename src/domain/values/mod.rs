pub mod availability;
pub mod chip;
pub mod execution;
pub mod game_rules;
pub mod gameweek;
pub mod lineup;
pub mod position;
pub mod score;
pub mod transfer;
pub mod validation;
