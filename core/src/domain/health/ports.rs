use std::future::Future;

use crate::domain::{common::entities::app_errors::CoreError, health::entities::BackendHealth};

#[cfg_attr(test, mockall::automock)]
pub trait HealthCheckClient: Send + Sync {
    fn health(&self) -> impl Future<Output = Result<BackendHealth, CoreError>> + Send;
}

pub trait HealthCheckService: Send + Sync {
    fn backend_health(&self) -> impl Future<Output = Result<BackendHealth, CoreError>> + Send;
}
