//! Project list view: local reconciliation, confirmation and pagination.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use projdesk_core::error::CoreError;
use projdesk_core::pagination::PaginationMode;
use projdesk_core::project::ProjectDraft;
use projdesk_events::NotificationLevel;
use projdesk_gateway::GatewayError;
use projdesk_state::delete::DeleteOutcome;
use projdesk_state::viewport::Viewport;
use projdesk_state::views::{ProjectListView, ViewStatus};
use projdesk_state::ViewError;

use common::{bus, drain, project, FakeGateway, Op, RecordingConfirmer};

fn four_projects() -> Arc<FakeGateway> {
    Arc::new(FakeGateway::new().with_projects(vec![
        project(1, "Pendiente"),
        project(2, "En progreso"),
        project(3, "Completado"),
        project(4, "Retrasado"),
    ]))
}

fn ids(view: &mut ProjectListView) -> Vec<i64> {
    view.visible_projects().iter().map(|p| p.id).collect()
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[tokio::test]
async fn activation_loads_projects() {
    let gateway = four_projects();
    let (bus, _rx) = bus();
    let viewport = Viewport::new(1280);

    let view = ProjectListView::activate(gateway.clone(), bus, &viewport).await;
    assert_eq!(view.status(), &ViewStatus::Ready);
    assert_eq!(view.projects().len(), 4);
    assert_eq!(gateway.calls(Op::ListProjects), 1);
}

#[tokio::test]
async fn failed_load_sets_error_state() {
    let gateway = four_projects();
    gateway.fail(Op::ListProjects);
    let (bus, _rx) = bus();
    let viewport = Viewport::new(1280);

    let view = ProjectListView::activate(gateway, bus, &viewport).await;
    assert_matches!(view.status(), ViewStatus::Failed(msg) if msg.contains("500"));
    assert!(view.projects().is_empty());
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_appends_without_refetch() {
    let gateway = four_projects();
    let (bus, mut rx) = bus();
    let viewport = Viewport::new(1280);
    let mut view = ProjectListView::activate(gateway.clone(), bus, &viewport).await;

    let draft = ProjectDraft::new("Portal", "Customer portal", "2024-01-10", "2024-03-01");
    let created = view.create_project(draft).await.unwrap();

    assert_eq!(view.projects().last().map(|p| p.id), Some(created.id));
    assert_eq!(gateway.calls(Op::ListProjects), 1);
    let notes = drain(&mut rx);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Proyecto creado");
}

#[tokio::test]
async fn invalid_draft_is_refused_before_any_request() {
    let gateway = four_projects();
    let (bus, _rx) = bus();
    let viewport = Viewport::new(1280);
    let mut view = ProjectListView::activate(gateway.clone(), bus, &viewport).await;

    let draft = ProjectDraft::new("Portal", "Customer portal", "2024-03-01", "2024-01-10");
    assert_matches!(
        view.create_project(draft).await,
        Err(ViewError::Core(CoreError::Validation(_)))
    );
    assert_eq!(gateway.calls(Op::CreateProject), 0);
}

#[tokio::test]
async fn update_applies_body_locally_without_refetch() {
    let gateway = four_projects();
    let (bus, _rx) = bus();
    let viewport = Viewport::new(1280);
    let mut view = ProjectListView::activate(gateway.clone(), bus, &viewport).await;

    let mut body = view.project(2).unwrap().to_draft();
    body.status = "Completado".into();
    let updated = view.update_project(2, body).await.unwrap();

    assert_eq!(updated.status, "Completado");
    assert_eq!(view.project(2).unwrap().status, "Completado");
    assert_eq!(view.projects().len(), 4);
    assert_eq!(gateway.calls(Op::ListProjects), 1);
}

#[tokio::test]
async fn failed_update_leaves_state_and_notifies() {
    let gateway = four_projects();
    gateway.fail(Op::UpdateProject);
    let (bus, mut rx) = bus();
    let viewport = Viewport::new(1280);
    let mut view = ProjectListView::activate(gateway, bus, &viewport).await;

    let mut body = view.project(2).unwrap().to_draft();
    body.name = "Renamed".into();
    assert_matches!(
        view.update_project(2, body).await,
        Err(ViewError::Gateway(GatewayError::Http { status: 500, .. }))
    );
    assert_eq!(view.project(2).unwrap().name, "Project 2");
    assert!(drain(&mut rx).iter().all(|n| n.level == NotificationLevel::Error));
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cancelled_delete_sends_nothing() {
    let gateway = four_projects();
    let (bus, mut rx) = bus();
    let viewport = Viewport::new(1280);
    let mut view = ProjectListView::activate(gateway.clone(), bus, &viewport).await;

    let confirmer = RecordingConfirmer::cancelling();
    let outcome = view.delete_project(3, &confirmer).await.unwrap();

    assert_matches!(outcome, DeleteOutcome::Cancelled);
    assert_eq!(confirmer.asked(), vec!["el proyecto Project 3".to_string()]);
    assert_eq!(gateway.calls(Op::DeleteProject), 0);
    assert_eq!(view.projects().len(), 4);
    assert_eq!(gateway.remote_projects().len(), 4);
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn confirmed_delete_that_fails_keeps_the_project() {
    let gateway = four_projects();
    gateway.fail(Op::DeleteProject);
    let (bus, mut rx) = bus();
    let viewport = Viewport::new(1280);
    let mut view = ProjectListView::activate(gateway.clone(), bus, &viewport).await;

    let outcome = view
        .delete_project(3, &RecordingConfirmer::confirming())
        .await
        .unwrap();

    assert_matches!(outcome, DeleteOutcome::Failed(_));
    assert!(view.project(3).is_some());
    let notes = drain(&mut rx);
    assert_eq!(notes.len(), 1);
    assert!(notes[0].is_error());
    assert_eq!(notes[0].text, "No se pudo eliminar el proyecto");
}

#[tokio::test]
async fn confirmed_delete_removes_exactly_that_id() {
    let gateway = four_projects();
    let (bus, mut rx) = bus();
    let viewport = Viewport::new(1280);
    let mut view = ProjectListView::activate(gateway.clone(), bus, &viewport).await;

    let outcome = view
        .delete_project(3, &RecordingConfirmer::confirming())
        .await
        .unwrap();

    assert!(outcome.is_deleted());
    let remaining: Vec<_> = view.projects().iter().map(|p| p.id).collect();
    assert_eq!(remaining, [1, 2, 4]);
    assert_eq!(gateway.calls(Op::DeleteProject), 1);
    assert_eq!(gateway.calls(Op::ListProjects), 1);
    assert_eq!(drain(&mut rx)[0].level, NotificationLevel::Success);
}

#[tokio::test]
async fn deleting_unknown_project_is_not_found() {
    let gateway = four_projects();
    let (bus, _rx) = bus();
    let viewport = Viewport::new(1280);
    let mut view = ProjectListView::activate(gateway.clone(), bus, &viewport).await;

    let confirmer = RecordingConfirmer::confirming();
    assert_matches!(
        view.delete_project(99, &confirmer).await,
        Err(ViewError::Core(CoreError::NotFound { id: 99, .. }))
    );
    assert!(confirmer.asked().is_empty());
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[tokio::test]
async fn small_viewport_pages_by_three() {
    let gateway = four_projects();
    let (bus, _rx) = bus();
    let viewport = Viewport::new(600);
    let mut view = ProjectListView::activate(gateway, bus, &viewport).await;

    assert_eq!(view.pagination().mode(), PaginationMode::Paged);
    assert_eq!(ids(&mut view), [1, 2, 3]);
    assert_eq!(view.total_pages(), 2);
    assert_eq!(view.page_numbers(), [1, 2]);

    assert!(!view.go_to_page(3));
    assert!(!view.go_to_page(0));
    assert!(view.next_page());
    assert_eq!(ids(&mut view), [4]);
    assert!(!view.next_page());
}

#[tokio::test]
async fn delete_on_last_page_clamps_index() {
    let gateway = four_projects();
    let (bus, _rx) = bus();
    let viewport = Viewport::new(640);
    let mut view = ProjectListView::activate(gateway, bus, &viewport).await;

    assert!(view.go_to_page(2));
    view.delete_project(1, &RecordingConfirmer::confirming())
        .await
        .unwrap();

    assert_eq!(view.total_pages(), 1);
    assert_eq!(ids(&mut view), [2, 3, 4]);
    assert_eq!(view.pagination().page_index(), 1);
}

#[tokio::test]
async fn resize_switches_mode_and_keeps_page() {
    let gateway = four_projects();
    let (bus, _rx) = bus();
    let viewport = Viewport::new(500);
    let mut view = ProjectListView::activate(gateway, bus, &viewport).await;
    assert!(view.go_to_page(2));

    viewport.resize(1024);
    assert_eq!(ids(&mut view), [1, 2, 3, 4]);
    assert_eq!(view.pagination().mode(), PaginationMode::Full);
    assert!(view.page_numbers().is_empty());

    viewport.resize(480);
    assert_eq!(ids(&mut view), [4]);
    assert_eq!(view.pagination().page_index(), 2);
}

#[tokio::test]
async fn dropping_the_view_deregisters_its_listener() {
    let gateway = four_projects();
    let (bus, _rx) = bus();
    let viewport = Viewport::new(1280);

    let view = ProjectListView::activate(gateway, bus, &viewport).await;
    assert_eq!(viewport.listener_count(), 1);
    drop(view);
    assert_eq!(viewport.listener_count(), 0);
}
