use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

use terranova_core::domain::{
    diagnosis::session::DiagnosisSession,
    planner::{entities::SoilType, session::PlannerSession},
};
use tokio::{sync::RwLock, task::JoinHandle};

/// Transient per-device state, dropped on restart.
#[derive(Debug)]
pub struct DeviceSessions {
    pub diagnosis: DiagnosisSession,
    pub planner: PlannerSession,
}

impl DeviceSessions {
    pub fn new(soil_type: SoilType) -> Self {
        Self {
            diagnosis: DiagnosisSession::new(),
            planner: PlannerSession::new(soil_type),
        }
    }
}

#[derive(Debug)]
struct SessionEntry {
    sessions: Arc<DeviceSessions>,
    last_seen: Mutex<Instant>,
}

impl SessionEntry {
    fn last_seen(&self) -> Instant {
        *self.last_seen.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn touch(&self, now: Instant) {
        let mut last_seen = self.last_seen.lock().unwrap_or_else(PoisonError::into_inner);
        *last_seen = (*last_seen).max(now);
    }
}

/// Device sessions keyed by `x-device-id`, bounded by an idle TTL and a
/// least-recently-used cap.
#[derive(Debug)]
pub struct SessionRegistry {
    default_soil_type: SoilType,
    idle_ttl: Duration,
    max_sessions: usize,
    sessions: RwLock<HashMap<String, SessionEntry>>,
}

impl SessionRegistry {
    pub fn new(default_soil_type: SoilType, idle_ttl: Duration, max_sessions: usize) -> Self {
        Self {
            default_soil_type,
            idle_ttl,
            max_sessions: max_sessions.max(1),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get_or_create(&self, device_id: &str) -> Arc<DeviceSessions> {
        self.get_or_create_at(device_id, Instant::now()).await
    }

    async fn get_or_create_at(&self, device_id: &str, now: Instant) -> Arc<DeviceSessions> {
        if let Some(entry) = self.sessions.read().await.get(device_id) {
            entry.touch(now);
            return Arc::clone(&entry.sessions);
        }

        let mut sessions = self.sessions.write().await;
        if let Some(entry) = sessions.get(device_id) {
            entry.touch(now);
            return Arc::clone(&entry.sessions);
        }

        if sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen())
                .map(|(id, _)| id.clone());
            if let Some(oldest) = oldest {
                tracing::info!(device_id = %oldest, "Session cap reached, evicting least recently used");
                sessions.remove(&oldest);
            }
        }

        tracing::debug!(device_id, "Creating device session");
        let created = Arc::new(DeviceSessions::new(self.default_soil_type));
        sessions.insert(
            device_id.to_string(),
            SessionEntry {
                sessions: Arc::clone(&created),
                last_seen: Mutex::new(now),
            },
        );
        created
    }

    /// Drops every session idle for longer than the TTL at `now`. Returns how
    /// many were removed.
    pub async fn evict_idle(&self, now: Instant) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| now.saturating_duration_since(entry.last_seen()) <= self.idle_ttl);

        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = sessions.len(), "Evicted idle device sessions");
        }
        evicted
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// Periodically evicts idle sessions until the runtime shuts down.
pub fn spawn_idle_sweep(registry: Arc<SessionRegistry>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            registry.evict_idle(Instant::now()).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(idle_ttl: Duration, max_sessions: usize) -> SessionRegistry {
        SessionRegistry::new(SoilType::Laterite, idle_ttl, max_sessions)
    }

    #[tokio::test]
    async fn test_sessions_are_per_device() {
        let registry = registry(Duration::from_secs(60), 100);

        let first = registry.get_or_create("tablet-1").await;
        let again = registry.get_or_create("tablet-1").await;
        let other = registry.get_or_create("phone-7").await;

        assert!(Arc::ptr_eq(&first, &again));
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(first.planner.soil_type(), SoilType::Laterite);
        assert_eq!(registry.len().await, 2);
    }

    #[tokio::test]
    async fn test_idle_session_is_evicted() {
        let registry = registry(Duration::from_secs(60), 100);
        let start = Instant::now();
        let stale = registry.get_or_create_at("tablet-1", start).await;
        registry.get_or_create_at("phone-7", start).await;
        registry
            .get_or_create_at("phone-7", start + Duration::from_secs(50))
            .await;

        let evicted = registry.evict_idle(start + Duration::from_secs(90)).await;

        assert_eq!(evicted, 1);
        assert_eq!(registry.len().await, 1);
        let fresh = registry
            .get_or_create_at("tablet-1", start + Duration::from_secs(91))
            .await;
        assert!(!Arc::ptr_eq(&stale, &fresh));
    }

    #[tokio::test]
    async fn test_cap_evicts_least_recently_used() {
        let registry = registry(Duration::from_secs(3600), 2);
        let start = Instant::now();
        let kept = registry.get_or_create_at("a", start).await;
        let dropped = registry
            .get_or_create_at("b", start + Duration::from_secs(1))
            .await;
        registry
            .get_or_create_at("a", start + Duration::from_secs(2))
            .await;

        registry
            .get_or_create_at("c", start + Duration::from_secs(3))
            .await;

        assert_eq!(registry.len().await, 2);
        let a = registry
            .get_or_create_at("a", start + Duration::from_secs(4))
            .await;
        assert!(Arc::ptr_eq(&kept, &a));
        let b = registry
            .get_or_create_at("b", start + Duration::from_secs(5))
            .await;
        assert!(!Arc::ptr_eq(&dropped, &b));
    }

    #[tokio::test]
    async fn test_distinct_ids_stay_within_cap() {
        let registry = registry(Duration::from_secs(3600), 16);

        for i in 0..1_000 {
            registry.get_or_create(&format!("device-{i}")).await;
        }

        assert_eq!(registry.len().await, 16);
    }
}
