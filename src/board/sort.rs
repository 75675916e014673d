use chrono::NaiveDate;

use crate::model::Task;

/// Display-only ordering applied to a column's task sequence. Never written
/// back to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Off,
    TitleAsc,
    TitleDesc,
    Date,
    Progress,
}

impl SortMode {
    /// Cycle through the modes in menu order.
    pub fn next(self) -> SortMode {
        match self {
            SortMode::Off => SortMode::TitleAsc,
            SortMode::TitleAsc => SortMode::TitleDesc,
            SortMode::TitleDesc => SortMode::Date,
            SortMode::Date => SortMode::Progress,
            SortMode::Progress => SortMode::Off,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Off => "Off",
            SortMode::TitleAsc => "A-Z",
            SortMode::TitleDesc => "Z-A",
            SortMode::Date => "Date",
            SortMode::Progress => "Progress",
        }
    }
}

/// Re-order a column's tasks for display. Pure: the input sequence is
/// untouched and `Off` returns it as-is.
///
/// - Title modes compare case-insensitively.
/// - `Date` sorts ascending; tasks with no date sort as earliest (epoch).
/// - `Progress` sorts ascending by count of completed milestones, not by
///   percentage.
///
/// Sorting is stable, so equal keys keep their store order.
pub fn sorted_view<'a>(tasks: &[&'a Task], mode: SortMode) -> Vec<&'a Task> {
    let mut view: Vec<&Task> = tasks.to_vec();
    match mode {
        SortMode::Off => {}
        SortMode::TitleAsc => {
            view.sort_by(|a, b| title_key(a).cmp(&title_key(b)));
        }
        SortMode::TitleDesc => {
            view.sort_by(|a, b| title_key(b).cmp(&title_key(a)));
        }
        SortMode::Date => {
            view.sort_by_key(|t| t.assigned_date.unwrap_or(NaiveDate::MIN));
        }
        SortMode::Progress => {
            view.sort_by_key(|t| t.completed_milestones.len());
        }
    }
    view
}

fn title_key(task: &Task) -> String {
    task.title.to_lowercase()
}
