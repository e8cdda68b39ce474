pub mod common;
pub mod diagnosis;
pub mod health;
pub mod planner;
