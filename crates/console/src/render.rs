//! Plain-text rendering of views and notifications.

use std::fmt::Write;

use chrono::Local;
use projdesk_core::dashboard::DashboardSnapshot;
use projdesk_core::dates;
use projdesk_core::module::Module;
use projdesk_core::pagination::Pagination;
use projdesk_core::phase::Phase;
use projdesk_core::project::Project;
use projdesk_core::status::status_color;
use projdesk_events::{Notification, NotificationLevel};

/// A stored date as a long calendar date, or the raw value if unparseable.
fn day(stored: &str) -> String {
    dates::display_date_local(stored).unwrap_or_else(|_| stored.to_string())
}

pub fn project_line(project: &Project) -> String {
    format!(
        "#{:<4} {:<28} [{} / {}]  {} -> {}",
        project.id,
        project.name,
        project.status,
        status_color(&project.status),
        day(&project.start_date),
        day(&project.end_date),
    )
}

pub fn project_list(projects: &[Project], pagination: &Pagination, total: usize) -> String {
    let mut out = String::new();
    if projects.is_empty() {
        out.push_str("No hay proyectos.\n");
    }
    for project in projects {
        let _ = writeln!(out, "{}", project_line(project));
    }
    if pagination.controls_visible() {
        let _ = writeln!(
            out,
            "-- página {} de {} ({} proyectos) --",
            pagination.page_index(),
            pagination.last_page(total),
            total,
        );
    }
    out
}

pub fn project_detail(project: &Project, modules: &[Module]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", project.name);
    let _ = writeln!(out, "  {}", project.description);
    let _ = writeln!(out, "  Estado: {} ({})", project.status, status_color(&project.status));
    let _ = writeln!(out, "  Inicio: {}", day(&project.start_date));
    let _ = writeln!(out, "  Fin:    {}", day(&project.end_date));
    let _ = writeln!(out);
    if modules.is_empty() {
        out.push_str("  Sin módulos.\n");
    }
    for module in modules {
        let _ = writeln!(out, "  {}", module_line(module));
    }
    out
}

pub fn module_line(module: &Module) -> String {
    let phase = match &module.phase {
        Some(phase) => format!("{} {}", phase.name, phase.color),
        None => format!("fase {}", module.phase_id),
    };
    format!(
        "#{:<4} {:<24} [{}] ({})  {} -> {}",
        module.id,
        module.name,
        module.status,
        phase,
        day(&module.start_date),
        day(&module.end_date),
    )
}

pub fn phase_list(phases: &[Phase]) -> String {
    let mut out = String::new();
    for phase in phases {
        let _ = writeln!(out, "#{:<4} {:<20} {}", phase.id, phase.name, phase.color);
    }
    out
}

pub fn dashboard(snapshot: &DashboardSnapshot) -> String {
    let mut out = String::new();
    for card in snapshot.summary_cards() {
        let trend = if card.trending_up { "↑" } else { " " };
        let _ = writeln!(out, "{:<28} {:>6} {} {}", card.title, card.total, trend, card.color);
    }

    let chart = snapshot.phase_chart();
    if let Some(series) = chart.series.first() {
        if !chart.categories.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", series.name);
            for (category, count) in chart.categories.iter().zip(&series.data) {
                let bar = "#".repeat(usize::try_from(*count).unwrap_or(0).min(60));
                let _ = writeln!(out, "  {category:<20} {count:>4} {bar}");
            }
        }
    }

    if !snapshot.failed_sources.is_empty() {
        let names: Vec<_> = snapshot.failed_sources.iter().map(|s| s.as_str()).collect();
        let _ = writeln!(out, "\n(sin datos: {})", names.join(", "));
    }
    out
}

pub fn notification(notification: &Notification) -> String {
    let marker = match notification.level {
        NotificationLevel::Success => "✔",
        NotificationLevel::Error => "✖",
        NotificationLevel::Info => "ℹ",
    };
    format!(
        "[{}] {marker} {}: {}",
        notification.timestamp.with_timezone(&Local).format("%H:%M:%S"),
        notification.title,
        notification.text,
    )
}
