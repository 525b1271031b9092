//! Dashboard view model.
//!
//! Four independent aggregate reads feed one [`DashboardSnapshot`]. Every
//! field has its own default so a failed source leaves the others intact.
//! Summary cards and the modules-by-phase chart are derived from it.

use serde::{Deserialize, Serialize};

/// Series name of the modules-by-phase chart.
pub const PHASE_CHART_SERIES_NAME: &str = "Total de Módulos";

const TOTAL_PROJECTS_CARD_COLOR: &str = "#3C50E0";
const TOTAL_MODULES_CARD_COLOR: &str = "#E07B3C";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Body of `GET /dashboard/total-projects`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalProjects {
    pub total_projects: i64,
}

/// Body of `GET /dashboard/total-modules`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalModules {
    pub total_modules: i64,
}

/// One entry of `GET /dashboard/modules-by-phase`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseModuleCount {
    pub phase: String,
    pub total_modules: i64,
    pub color: String,
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// The four aggregate reads behind the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardSource {
    TotalProjects,
    TotalModules,
    ModulesByPhase,
    ProjectProgress,
}

impl DashboardSource {
    pub const ALL: [DashboardSource; 4] = [
        DashboardSource::TotalProjects,
        DashboardSource::TotalModules,
        DashboardSource::ModulesByPhase,
        DashboardSource::ProjectProgress,
    ];

    /// Request path of the source.
    pub fn path(self) -> &'static str {
        match self {
            DashboardSource::TotalProjects => "/dashboard/total-projects",
            DashboardSource::TotalModules => "/dashboard/total-modules",
            DashboardSource::ModulesByPhase => "/dashboard/modules-by-phase",
            DashboardSource::ProjectProgress => "/dashboard/project-progress",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DashboardSource::TotalProjects => "total_projects",
            DashboardSource::TotalModules => "total_modules",
            DashboardSource::ModulesByPhase => "modules_by_phase",
            DashboardSource::ProjectProgress => "project_progress",
        }
    }
}

// ---------------------------------------------------------------------------
// View model
// ---------------------------------------------------------------------------

/// Merged dashboard data. Each field is filled by its own source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub total_projects: i64,
    pub total_modules: i64,
    pub modules_by_phase: Vec<PhaseModuleCount>,
    /// Opaque progress series, passed through to presentation.
    pub project_progress: serde_json::Value,
    /// Sources whose read failed and whose field holds its default.
    pub failed_sources: Vec<DashboardSource>,
}

impl Default for DashboardSnapshot {
    fn default() -> Self {
        Self {
            total_projects: 0,
            total_modules: 0,
            modules_by_phase: Vec::new(),
            project_progress: serde_json::Value::Array(Vec::new()),
            failed_sources: Vec::new(),
        }
    }
}

/// A summary card: title, count, accent color and trend flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryCard {
    pub title: String,
    pub total: i64,
    pub color: String,
    pub trending_up: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub data: Vec<i64>,
}

/// Bar chart of modules per phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseChart {
    pub categories: Vec<String>,
    pub series: Vec<ChartSeries>,
    pub colors: Vec<String>,
}

impl DashboardSnapshot {
    pub fn is_complete(&self) -> bool {
        self.failed_sources.is_empty()
    }

    /// Cards in display order: totals first, then one per phase.
    pub fn summary_cards(&self) -> Vec<SummaryCard> {
        let mut cards = vec![
            SummaryCard {
                title: "Total Proyecto".to_string(),
                total: self.total_projects,
                color: TOTAL_PROJECTS_CARD_COLOR.to_string(),
                trending_up: true,
            },
            SummaryCard {
                title: "Total Modulos".to_string(),
                total: self.total_modules,
                color: TOTAL_MODULES_CARD_COLOR.to_string(),
                trending_up: true,
            },
        ];
        cards.extend(self.modules_by_phase.iter().map(|entry| SummaryCard {
            title: format!("Modulos en {}", entry.phase),
            total: entry.total_modules,
            color: entry.color.clone(),
            trending_up: entry.total_modules > 0,
        }));
        cards
    }

    pub fn phase_chart(&self) -> PhaseChart {
        PhaseChart {
            categories: self.modules_by_phase.iter().map(|e| e.phase.clone()).collect(),
            series: vec![ChartSeries {
                name: PHASE_CHART_SERIES_NAME.to_string(),
                data: self.modules_by_phase.iter().map(|e| e.total_modules).collect(),
            }],
            colors: self.modules_by_phase.iter().map(|e| e.color.clone()).collect(),
        }
    }
}
