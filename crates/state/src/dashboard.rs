//! Dashboard fan-out with independent failures.
//!
//! The four aggregate reads run concurrently. A failed read logs a warning,
//! leaves its own field at the default and is listed in
//! [`DashboardSnapshot::failed_sources`]; it never blocks or clears the
//! others.

use std::sync::Arc;

use projdesk_core::dashboard::{DashboardSnapshot, DashboardSource};
use projdesk_gateway::{EntityGateway, GatewayResult};

pub struct DashboardAggregator {
    gateway: Arc<dyn EntityGateway>,
}

impl DashboardAggregator {
    pub fn new(gateway: Arc<dyn EntityGateway>) -> Self {
        Self { gateway }
    }

    /// Issue all four reads and merge whatever succeeds.
    pub async fn load(&self) -> DashboardSnapshot {
        let gateway = self.gateway.as_ref();
        let (projects, modules, by_phase, progress) = tokio::join!(
            gateway.total_projects(),
            gateway.total_modules(),
            gateway.modules_by_phase(),
            gateway.project_progress(),
        );

        let mut snapshot = DashboardSnapshot::default();

        if let Some(body) = settle(DashboardSource::TotalProjects, projects, &mut snapshot) {
            snapshot.total_projects = body.total_projects;
        }
        if let Some(body) = settle(DashboardSource::TotalModules, modules, &mut snapshot) {
            snapshot.total_modules = body.total_modules;
        }
        if let Some(entries) = settle(DashboardSource::ModulesByPhase, by_phase, &mut snapshot) {
            snapshot.modules_by_phase = entries;
        }
        if let Some(series) = settle(DashboardSource::ProjectProgress, progress, &mut snapshot) {
            snapshot.project_progress = series;
        }

        if snapshot.is_complete() {
            tracing::debug!("Dashboard loaded");
        } else {
            tracing::info!(failed = snapshot.failed_sources.len(), "Dashboard loaded partially");
        }
        snapshot
    }
}

fn settle<T>(
    source: DashboardSource,
    result: GatewayResult<T>,
    snapshot: &mut DashboardSnapshot,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(source = source.as_str(), error = %e, "Dashboard source failed");
            snapshot.failed_sources.push(source);
            None
        }
    }
}
