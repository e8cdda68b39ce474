pub mod backend;
pub mod geolocation;
