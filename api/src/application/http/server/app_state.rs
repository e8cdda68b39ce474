use std::{sync::Arc, time::Duration};

use terranova_core::application::TerraNovaService;

use crate::{application::sessions::SessionRegistry, args::Args};

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: TerraNovaService,
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: TerraNovaService) -> Self {
        let sessions = SessionRegistry::new(
            service.config().planner.default_soil_type,
            Duration::from_secs(args.server.session_idle_ttl_secs),
            args.server.max_sessions,
        );

        Self {
            args,
            service,
            sessions: Arc::new(sessions),
        }
    }
}
