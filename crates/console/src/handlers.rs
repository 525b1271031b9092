//! Command handlers. Each one activates the view it needs, performs the
//! action and prints the result to stdout.

use std::sync::Arc;

use anyhow::{bail, Context as _};
use projdesk_core::confirm::{Confirmer, Decision, FixedDecision};
use projdesk_core::dates;
use projdesk_core::module::ModuleDraft;
use projdesk_core::phase::PhaseDraft;
use projdesk_core::project::ProjectDraft;
use projdesk_events::NotificationBus;
use projdesk_gateway::EntityGateway;
use projdesk_state::dashboard::DashboardAggregator;
use projdesk_state::delete::DeleteOutcome;
use projdesk_state::viewport::Viewport;
use projdesk_state::views::{PhaseCatalogView, ProjectDetailView, ProjectListView, ViewStatus};

use crate::cli::{
    Commands, ListArgs, ModuleEdit, ModuleFields, ModulesAction, PhasesAction, ProjectEdit,
    ProjectFields, ProjectsAction,
};
use crate::config::ConsoleConfig;
use crate::confirm::TerminalConfirmer;
use crate::render;

pub struct Context {
    pub config: ConsoleConfig,
    pub gateway: Arc<dyn EntityGateway>,
    pub bus: Arc<NotificationBus>,
}

pub async fn dispatch(command: Commands, ctx: &Context) -> anyhow::Result<()> {
    match command {
        Commands::Dashboard => cmd_dashboard(ctx).await,
        Commands::Projects(action) => match action {
            ProjectsAction::List(args) => cmd_projects_list(ctx, args).await,
            ProjectsAction::Show { id } => cmd_projects_show(ctx, id).await,
            ProjectsAction::Create(fields) => cmd_projects_create(ctx, fields).await,
            ProjectsAction::Update { id, fields } => cmd_projects_update(ctx, id, fields).await,
            ProjectsAction::Delete { id, yes } => cmd_projects_delete(ctx, id, yes).await,
        },
        Commands::Modules(action) => match action {
            ModulesAction::Create { project_id, fields } => {
                cmd_modules_create(ctx, project_id, fields).await
            }
            ModulesAction::Update {
                project_id,
                module_id,
                fields,
            } => cmd_modules_update(ctx, project_id, module_id, fields).await,
            ModulesAction::Delete {
                project_id,
                module_id,
                yes,
            } => cmd_modules_delete(ctx, project_id, module_id, yes).await,
        },
        Commands::Phases(action) => match action {
            PhasesAction::List => cmd_phases_list(ctx).await,
            PhasesAction::Create { name, color } => cmd_phases_create(ctx, name, color).await,
            PhasesAction::Color { id, color } => cmd_phases_color(ctx, id, &color).await,
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn confirmer(yes: bool) -> Box<dyn Confirmer> {
    if yes {
        Box::new(FixedDecision(Decision::Confirmed))
    } else {
        Box::new(TerminalConfirmer)
    }
}

/// Convert a `YYYY-MM-DD` argument into the persisted date form.
fn input_date(value: &str, flag: &str) -> anyhow::Result<String> {
    dates::from_input_date_local(value).with_context(|| format!("invalid --{flag}"))
}

fn ensure_ready(status: &ViewStatus, what: &str) -> anyhow::Result<()> {
    match status {
        ViewStatus::Failed(message) => bail!("Error al cargar {what}: {message}"),
        ViewStatus::Loading => bail!("{what} no encontrado"),
        ViewStatus::Ready => Ok(()),
    }
}

fn print_delete_outcome(outcome: DeleteOutcome, what: &str) -> anyhow::Result<()> {
    match outcome {
        DeleteOutcome::Deleted => println!("{what} eliminado."),
        DeleteOutcome::Cancelled => println!("Cancelado."),
        DeleteOutcome::Failed(e) => return Err(e).context(format!("no se pudo eliminar {what}")),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

async fn cmd_dashboard(ctx: &Context) -> anyhow::Result<()> {
    let snapshot = DashboardAggregator::new(Arc::clone(&ctx.gateway)).load().await;
    print!("{}", render::dashboard(&snapshot));
    Ok(())
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

async fn project_list(ctx: &Context, width: u32) -> anyhow::Result<(ProjectListView, Viewport)> {
    let viewport = Viewport::new(width);
    let view =
        ProjectListView::activate(Arc::clone(&ctx.gateway), Arc::clone(&ctx.bus), &viewport).await;
    ensure_ready(view.status(), "los proyectos")?;
    Ok((view, viewport))
}

async fn cmd_projects_list(ctx: &Context, args: ListArgs) -> anyhow::Result<()> {
    let width = args.width.unwrap_or(ctx.config.viewport_width);
    let (mut view, _viewport) = project_list(ctx, width).await?;

    if args.page != 1 && !view.go_to_page(args.page) {
        tracing::warn!(page = args.page, pages = view.total_pages(), "Page out of range");
    }
    let visible = view.visible_projects().to_vec();
    print!(
        "{}",
        render::project_list(&visible, view.pagination(), view.projects().len())
    );
    Ok(())
}

async fn cmd_projects_show(ctx: &Context, id: i64) -> anyhow::Result<()> {
    let view =
        ProjectDetailView::activate(id, Arc::clone(&ctx.gateway), Arc::clone(&ctx.bus)).await;
    ensure_ready(&view.status(), "el proyecto")?;
    if let Some(project) = view.project() {
        print!("{}", render::project_detail(project, view.modules()));
    }
    Ok(())
}

async fn cmd_projects_create(ctx: &Context, fields: ProjectFields) -> anyhow::Result<()> {
    let mut draft = ProjectDraft::new(
        fields.name,
        fields.description,
        input_date(&fields.start, "start")?,
        input_date(&fields.end, "end")?,
    );
    if let Some(status) = fields.status {
        draft.status = status;
    }

    let (mut view, _viewport) = project_list(ctx, ctx.config.viewport_width).await?;
    let created = view.create_project(draft).await?;
    println!("{}", render::project_line(&created));
    Ok(())
}

async fn cmd_projects_update(ctx: &Context, id: i64, edit: ProjectEdit) -> anyhow::Result<()> {
    let (mut view, _viewport) = project_list(ctx, ctx.config.viewport_width).await?;
    let Some(current) = view.project(id) else {
        bail!("proyecto {id} no encontrado");
    };

    let mut body = current.to_draft();
    if let Some(name) = edit.name {
        body.name = name;
    }
    if let Some(description) = edit.description {
        body.description = description;
    }
    if let Some(start) = edit.start {
        body.start_date = input_date(&start, "start")?;
    }
    if let Some(end) = edit.end {
        body.end_date = input_date(&end, "end")?;
    }
    if let Some(status) = edit.status {
        body.status = status;
    }

    let updated = view.update_project(id, body).await?;
    println!("{}", render::project_line(&updated));
    Ok(())
}

async fn cmd_projects_delete(ctx: &Context, id: i64, yes: bool) -> anyhow::Result<()> {
    let (mut view, _viewport) = project_list(ctx, ctx.config.viewport_width).await?;
    let outcome = view.delete_project(id, confirmer(yes).as_ref()).await?;
    print_delete_outcome(outcome, "Proyecto")
}

// ---------------------------------------------------------------------------
// Modules
// ---------------------------------------------------------------------------

async fn project_detail(ctx: &Context, project_id: i64) -> anyhow::Result<ProjectDetailView> {
    let view =
        ProjectDetailView::activate(project_id, Arc::clone(&ctx.gateway), Arc::clone(&ctx.bus))
            .await;
    ensure_ready(&view.status(), "el proyecto")?;
    Ok(view)
}

async fn cmd_modules_create(
    ctx: &Context,
    project_id: i64,
    fields: ModuleFields,
) -> anyhow::Result<()> {
    let mut draft = ModuleDraft::new(
        project_id,
        fields.name,
        fields.description,
        input_date(&fields.start, "start")?,
        input_date(&fields.end, "end")?,
    );
    draft.phase_id = fields.phase;
    if let Some(status) = fields.status {
        draft.status = status;
    }

    let mut view = project_detail(ctx, project_id).await?;
    let created = view.create_module(draft).await?;
    println!("{}", render::module_line(&created));
    Ok(())
}

async fn cmd_modules_update(
    ctx: &Context,
    project_id: i64,
    module_id: i64,
    edit: ModuleEdit,
) -> anyhow::Result<()> {
    let mut view = project_detail(ctx, project_id).await?;
    let Some(current) = view.module(module_id) else {
        bail!("módulo {module_id} no encontrado en el proyecto {project_id}");
    };

    let mut update = current.to_update();
    if let Some(name) = edit.name {
        update.name = name;
    }
    if let Some(description) = edit.description {
        update.description = description;
    }
    if let Some(start) = edit.start {
        update.start_date = input_date(&start, "start")?;
    }
    if let Some(end) = edit.end {
        update.end_date = input_date(&end, "end")?;
    }
    if let Some(phase) = edit.phase {
        update.phase_id = phase;
    }
    if let Some(status) = edit.status {
        update.status = status;
    }

    let updated = view.update_module(module_id, update).await?;
    // Pick up the refreshed project before exiting.
    view.settle().await;
    println!("{}", render::module_line(&updated));
    if let Some(project) = view.project() {
        println!("{}", render::project_line(project));
    }
    Ok(())
}

async fn cmd_modules_delete(
    ctx: &Context,
    project_id: i64,
    module_id: i64,
    yes: bool,
) -> anyhow::Result<()> {
    let mut view = project_detail(ctx, project_id).await?;
    let outcome = view
        .delete_module(module_id, confirmer(yes).as_ref())
        .await?;
    print_delete_outcome(outcome, "Módulo")
}

// ---------------------------------------------------------------------------
// Phases
// ---------------------------------------------------------------------------

async fn phase_catalog(ctx: &Context) -> anyhow::Result<PhaseCatalogView> {
    let view = PhaseCatalogView::activate(Arc::clone(&ctx.gateway), Arc::clone(&ctx.bus)).await;
    ensure_ready(view.status(), "las fases")?;
    Ok(view)
}

async fn cmd_phases_list(ctx: &Context) -> anyhow::Result<()> {
    let view = phase_catalog(ctx).await?;
    print!("{}", render::phase_list(view.phases()));
    Ok(())
}

async fn cmd_phases_create(
    ctx: &Context,
    name: String,
    color: Option<String>,
) -> anyhow::Result<()> {
    let mut draft = PhaseDraft::new(name);
    if let Some(color) = color {
        draft = draft.with_color(color);
    }
    let mut view = phase_catalog(ctx).await?;
    let created = view.create_phase(draft).await?;
    print!("{}", render::phase_list(std::slice::from_ref(&created)));
    Ok(())
}

async fn cmd_phases_color(ctx: &Context, id: i64, color: &str) -> anyhow::Result<()> {
    let mut view = phase_catalog(ctx).await?;
    let updated = view.update_phase_color(id, color).await?;
    print!("{}", render::phase_list(std::slice::from_ref(&updated)));
    Ok(())
}
