use serde::Serialize;

use crate::board::DashboardStats;
use crate::model::Project;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ProjectJson {
    pub id: String,
    pub name: String,
    pub columns: Vec<ColumnJson>,
}

#[derive(Serialize)]
pub struct ColumnJson {
    pub id: String,
    pub title: String,
    pub terminal: bool,
    pub count: usize,
}

#[derive(Serialize)]
pub struct StatsJson {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub incomplete_tasks: usize,
    pub overdue_tasks: usize,
    pub columns: Vec<ColumnCountJson>,
}

#[derive(Serialize)]
pub struct ColumnCountJson {
    pub title: String,
    pub count: usize,
}

impl From<&Project> for ProjectJson {
    fn from(p: &Project) -> ProjectJson {
        ProjectJson {
            id: p.id.clone(),
            name: p.name.clone(),
            columns: p
                .columns
                .iter()
                .map(|c| ColumnJson {
                    id: c.id.as_str().to_string(),
                    title: c.title.clone(),
                    terminal: c.terminal,
                    count: c.count,
                })
                .collect(),
        }
    }
}

impl From<&DashboardStats> for StatsJson {
    fn from(s: &DashboardStats) -> StatsJson {
        StatsJson {
            total_tasks: s.total_tasks,
            completed_tasks: s.completed_tasks,
            incomplete_tasks: s.incomplete_tasks,
            overdue_tasks: s.overdue_tasks,
            columns: s
                .columns
                .iter()
                .map(|(title, count)| ColumnCountJson {
                    title: title.clone(),
                    count: *count,
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Plain-text output
// ---------------------------------------------------------------------------

pub fn print_projects(projects: &[Project]) {
    for project in projects {
        println!("{}  {}", project.id, project.name);
        for col in &project.columns {
            let marker = if col.terminal { "*" } else { " " };
            println!("    {} {} ({})", marker, col.title, col.count);
        }
    }
}

pub fn print_stats(name: &str, stats: &DashboardStats) {
    println!("{name}");
    println!("  total:      {}", stats.total_tasks);
    println!("  completed:  {}", stats.completed_tasks);
    println!("  incomplete: {}", stats.incomplete_tasks);
    println!("  overdue:    {}", stats.overdue_tasks);
    for (title, count) in &stats.columns {
        println!("  {title}: {count}");
    }
}
