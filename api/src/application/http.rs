pub mod crop_doctor;
pub mod health;
pub mod planner;
pub mod server;
