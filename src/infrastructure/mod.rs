pub mod fpl;
pub mod reasoning;
