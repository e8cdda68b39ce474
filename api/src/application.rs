pub mod device_middleware;
pub mod http;
pub mod sessions;
