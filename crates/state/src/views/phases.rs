//! Phase catalog view: list, create and recolor phases.

use std::sync::Arc;

use projdesk_core::entity::Entity;
use projdesk_core::error::CoreError;
use projdesk_core::phase::{Phase, PhaseDraft};
use projdesk_core::types::DbId;
use projdesk_events::{Notification, NotificationBus};
use projdesk_gateway::EntityGateway;

use crate::cache::EntityCache;
use crate::error::ViewResult;
use crate::views::{notify_failure, ViewStatus};

pub struct PhaseCatalogView {
    gateway: Arc<dyn EntityGateway>,
    bus: Arc<NotificationBus>,
    cache: EntityCache,
    status: ViewStatus,
}

impl PhaseCatalogView {
    pub async fn activate(gateway: Arc<dyn EntityGateway>, bus: Arc<NotificationBus>) -> Self {
        let mut view = Self {
            gateway,
            bus,
            cache: EntityCache::new(),
            status: ViewStatus::Loading,
        };
        match view.gateway.list_phases().await {
            Ok(phases) => {
                view.cache.set_phases(phases);
                view.status = ViewStatus::Ready;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load phases");
                view.status = ViewStatus::Failed(e.to_string());
            }
        }
        view
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    pub fn phases(&self) -> &[Phase] {
        self.cache.phases()
    }

    /// Create a phase and append the server's copy.
    pub async fn create_phase(&mut self, draft: PhaseDraft) -> ViewResult<Phase> {
        draft.check()?;
        let created = match self.gateway.create_phase(&draft).await {
            Ok(phase) => phase,
            Err(e) => {
                notify_failure(&self.bus, "No se pudo crear la fase", &e);
                return Err(e.into());
            }
        };

        tracing::info!(phase_id = created.id, "Phase created");
        self.bus.publish(
            Notification::success(
                "Fase creada",
                format!("La fase {} ha sido creada exitosamente.", created.name),
            )
            .with_subject(Phase::KIND, created.id),
        );
        Ok(self.cache.apply_phase_create(created).clone())
    }

    /// Replace the color of phase `id`, keeping its name.
    pub async fn update_phase_color(&mut self, id: DbId, color: &str) -> ViewResult<Phase> {
        let body = match self.cache.phase(id) {
            Some(phase) => phase.recolored(color),
            None => return Err(CoreError::NotFound { entity: Phase::KIND, id }.into()),
        };
        body.check()?;

        if let Err(e) = self.gateway.update_phase(id, &body).await {
            notify_failure(&self.bus, "No se pudo actualizar el color de la fase", &e);
            return Err(e.into());
        }

        let name = body.name.clone();
        let updated = self.cache.apply_phase_update(id, body)?.clone();
        tracing::info!(phase_id = id, color, "Phase color updated");
        self.bus.publish(
            Notification::success(
                "Color actualizado",
                format!("El color de la fase {name} ha sido actualizado."),
            )
            .with_subject(Phase::KIND, id),
        );
        Ok(updated)
    }
}
