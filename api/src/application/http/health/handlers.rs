pub mod backend_health;
