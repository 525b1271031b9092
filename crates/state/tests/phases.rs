//! Phase catalog view.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use projdesk_core::error::CoreError;
use projdesk_core::phase::PhaseDraft;
use projdesk_state::views::{PhaseCatalogView, ViewStatus};
use projdesk_state::ViewError;

use common::{bus, drain, phases, FakeGateway, Op};

fn gateway() -> Arc<FakeGateway> {
    Arc::new(FakeGateway::new().with_phases(phases()))
}

#[tokio::test]
async fn create_appends_the_server_copy() {
    let gateway = gateway();
    let (bus, mut rx) = bus();
    let mut view = PhaseCatalogView::activate(gateway.clone(), bus).await;
    assert_eq!(view.status(), &ViewStatus::Ready);

    let created = view.create_phase(PhaseDraft::new("Despliegue")).await.unwrap();

    assert_eq!(created.color, "#000000");
    assert_eq!(view.phases().last(), Some(&created));
    assert_eq!(gateway.calls(Op::ListPhases), 1);
    assert_eq!(drain(&mut rx)[0].title, "Fase creada");
}

#[tokio::test]
async fn recolor_keeps_the_name() {
    let gateway = gateway();
    let (bus, mut rx) = bus();
    let mut view = PhaseCatalogView::activate(gateway, bus).await;

    let updated = view.update_phase_color(2, "#00ff00").await.unwrap();

    assert_eq!(updated.name, "Diseño");
    assert_eq!(updated.color, "#00ff00");
    assert_eq!(view.phases()[1].color, "#00ff00");
    assert_eq!(
        drain(&mut rx)[0].text,
        "El color de la fase Diseño ha sido actualizado."
    );
}

#[tokio::test]
async fn invalid_color_is_refused_locally() {
    let gateway = gateway();
    let (bus, _rx) = bus();
    let mut view = PhaseCatalogView::activate(gateway.clone(), bus).await;

    assert_matches!(
        view.update_phase_color(2, "green").await,
        Err(ViewError::Core(CoreError::Validation(_)))
    );
    assert_eq!(gateway.calls(Op::UpdatePhase), 0);
}

#[tokio::test]
async fn failed_recolor_keeps_the_old_color() {
    let gateway = gateway();
    gateway.fail(Op::UpdatePhase);
    let (bus, mut rx) = bus();
    let mut view = PhaseCatalogView::activate(gateway, bus).await;

    assert_matches!(view.update_phase_color(2, "#00ff00").await, Err(ViewError::Gateway(_)));
    assert_eq!(view.phases()[1].color, "#222222");
    assert!(drain(&mut rx)[0].is_error());
}
