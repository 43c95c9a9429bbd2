//! # weekgantt-core
//!
//! Core domain model for the weekgantt chart renderer.
//!
//! This crate provides:
//! - Domain types: `Task`, `TaskTable`
//! - Year-week date resolution (`week`)
//! - Category colors and the three-band week shading (`palette`, `shade`)
//! - Chart configuration loaded from TOML (`config`)
//! - The built-in sample task list (`sample`)
//! - The `Renderer` trait and error types
//!
//! ## Example
//!
//! ```rust
//! use weekgantt_core::{resolve_year_week, Task, TaskTable, WeekConvention};
//!
//! let start = resolve_year_week("2024-06", WeekConvention::MondayFirst).unwrap();
//! let end = resolve_year_week("2024-20", WeekConvention::MondayFirst).unwrap();
//! let table = TaskTable::new(vec![Task::new("Core Module Development")
//!     .category("Implementation")
//!     .span(start, end)]);
//! assert_eq!(table.tasks()[0].duration_weeks(), 14);
//! ```

pub mod color;
pub mod config;
pub mod palette;
pub mod sample;
pub mod shade;
pub mod week;

pub use color::Rgba;
pub use config::{ChartStyle, GanttConfig, RowOrder};
pub use palette::CategoryPalette;
pub use shade::{Band, BandShader};
pub use week::{resolve_year_week, WeekConvention, YearWeek};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

// ============================================================================
// Task
// ============================================================================

/// One row of the chart
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Category used for coloring and separators
    pub category: String,
    /// Row label, expected to be unique within a table
    pub label: String,
    /// Free text drawn next to the bar
    pub description: String,
    /// First day of the first week
    pub start: NaiveDate,
    /// First day after the last week
    pub end: NaiveDate,
}

impl Task {
    /// Create a new task with the given label
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            category: String::new(),
            label: label.into(),
            description: String::new(),
            start: NaiveDate::MIN,
            end: NaiveDate::MIN,
        }
    }

    /// Set the category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set start and end dates
    pub fn span(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Whole weeks between start and end, floor-divided.
    ///
    /// Negative when `end` precedes `start`; nothing checks for that.
    pub fn duration_weeks(&self) -> i64 {
        (self.end - self.start).num_days().div_euclid(7)
    }

    /// Number of week segments drawn for this task
    pub fn week_count(&self) -> usize {
        usize::try_from(self.duration_weeks()).unwrap_or(0)
    }
}

// ============================================================================
// Task Table
// ============================================================================

/// A contiguous run of rows sharing one category
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryRun {
    pub category: String,
    /// Row index of the first task in the run
    pub first_row: usize,
    /// Number of tasks in the run
    pub len: usize,
}

/// Ordered task list; insertion order is row order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTable {
    tasks: Vec<Task>,
}

impl TaskTable {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Map each task label to its row index.
    ///
    /// A repeated label keeps the last row it appears on.
    pub fn row_positions(&self) -> HashMap<String, usize> {
        self.tasks
            .iter()
            .enumerate()
            .map(|(row, task)| (task.label.clone(), row))
            .collect()
    }

    /// Group consecutive tasks with equal categories
    pub fn category_runs(&self) -> Vec<CategoryRun> {
        let mut runs: Vec<CategoryRun> = Vec::new();
        for (row, task) in self.tasks.iter().enumerate() {
            match runs.last_mut() {
                Some(run) if run.category == task.category => run.len += 1,
                _ => runs.push(CategoryRun {
                    category: task.category.clone(),
                    first_row: row,
                    len: 1,
                }),
            }
        }
        runs
    }

    /// Rows that start a new category run (always includes row 0)
    pub fn separator_rows(&self) -> Vec<usize> {
        self.category_runs().iter().map(|run| run.first_row).collect()
    }

    /// Earliest start and latest end over all tasks
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = self.tasks.iter().map(|t| t.start).min()?;
        let end = self.tasks.iter().map(|t| t.end).max()?;
        Some((start, end))
    }
}

impl<'a> IntoIterator for &'a TaskTable {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

impl FromIterator<Task> for TaskTable {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Output backend for a task table
pub trait Renderer {
    type Output;

    /// Render the table to the output format
    fn render(&self, tasks: &TaskTable) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Year-week resolution error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeekError {
    #[error("Malformed year-week label '{0}' (expected YYYY-WW)")]
    Malformed(String),

    #[error("Week {week} is out of range for {convention} weeks (allowed {min}..={max})")]
    WeekOutOfRange {
        week: u32,
        convention: WeekConvention,
        min: u32,
        max: u32,
    },

    #[error("Year-week {0} does not map to a representable date")]
    OutOfRange(YearWeek),
}

/// Color parsing error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("Invalid color '{0}' (expected #rgb, #rrggbb or #rrggbbaa)")]
    Invalid(String),
}

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Color error: {0}")]
    Color(#[from] ColorError),

    #[error("Invalid shading: {0}")]
    InvalidShade(String),

    #[error("Invalid chart geometry: {0}")]
    InvalidChart(String),
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn task(label: &str, category: &str) -> Task {
        Task::new(label)
            .category(category)
            .span(date(2024, 1, 1), date(2024, 1, 15))
    }

    #[test]
    fn task_builder() {
        let task = Task::new("Final Review")
            .category("Closure")
            .description("Peer review and quality assurance")
            .span(date(2024, 6, 3), date(2024, 6, 24));

        assert_eq!(task.label, "Final Review");
        assert_eq!(task.category, "Closure");
        assert_eq!(task.description, "Peer review and quality assurance");
        assert_eq!(task.duration_weeks(), 3);
        assert_eq!(task.week_count(), 3);
    }

    #[test]
    fn duration_floors_partial_weeks() {
        let task = Task::new("t").span(date(2024, 1, 1), date(2024, 1, 14));
        assert_eq!(task.duration_weeks(), 1);

        let short = Task::new("t").span(date(2024, 1, 1), date(2024, 1, 4));
        assert_eq!(short.duration_weeks(), 0);
        assert_eq!(short.week_count(), 0);
    }

    #[test]
    fn reversed_span_draws_nothing() {
        let task = Task::new("t").span(date(2024, 1, 10), date(2024, 1, 7));
        // floor(-3 / 7) == -1
        assert_eq!(task.duration_weeks(), -1);
        assert_eq!(task.week_count(), 0);
    }

    #[test]
    fn row_positions_follow_insertion_order() {
        let table = TaskTable::new(vec![
            task("Kickoff", "Planning"),
            task("Design", "Planning"),
            task("Build", "Implementation"),
        ]);

        let rows = table.row_positions();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows["Kickoff"], 0);
        assert_eq!(rows["Design"], 1);
        assert_eq!(rows["Build"], 2);
    }

    #[test]
    fn duplicate_labels_collapse_in_row_mapping() {
        let table = TaskTable::new(vec![task("Same", "A"), task("Same", "B")]);
        let rows = table.row_positions();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows["Same"], 1);
    }

    #[test]
    fn category_runs_split_on_change() {
        let table: TaskTable = vec![
            task("a", "Planning"),
            task("b", "Planning"),
            task("c", "Implementation"),
            task("d", "Planning"),
        ]
        .into_iter()
        .collect();

        let runs = table.category_runs();
        assert_eq!(
            runs,
            vec![
                CategoryRun { category: "Planning".into(), first_row: 0, len: 2 },
                CategoryRun { category: "Implementation".into(), first_row: 2, len: 1 },
                CategoryRun { category: "Planning".into(), first_row: 3, len: 1 },
            ]
        );
        assert_eq!(table.separator_rows(), vec![0, 2, 3]);
    }

    #[test]
    fn empty_table() {
        let table = TaskTable::default();
        assert!(table.is_empty());
        assert!(table.separator_rows().is_empty());
        assert_eq!(table.date_span(), None);
    }

    #[test]
    fn date_span_covers_all_tasks() {
        let table = TaskTable::new(vec![
            Task::new("a").span(date(2024, 2, 5), date(2024, 3, 4)),
            Task::new("b").span(date(2024, 1, 8), date(2024, 2, 5)),
        ]);
        assert_eq!(table.date_span(), Some((date(2024, 1, 8), date(2024, 3, 4))));
    }
}
