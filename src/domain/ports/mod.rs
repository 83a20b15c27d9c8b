pub mod decision_provider;
pub mod game_api;
