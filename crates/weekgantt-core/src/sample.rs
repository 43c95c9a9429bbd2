//! Built-in task list
//!
//! Start and end are year-week labels resolved at table build time. Some
//! spans look like month numbers written as weeks (`2024-03` to `2024-20`),
//! and two categories have no palette entry. Both are kept as data.

use crate::{resolve_year_week, Task, TaskTable, WeekConvention, WeekError};

/// Unresolved task row: category, label, description, start week, end week
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleTask {
    pub category: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub start: &'static str,
    pub end: &'static str,
}

pub const SAMPLE_TASKS: [SampleTask; 8] = [
    SampleTask {
        category: "Planning",
        label: "Project Kickoff",
        description: "Initial planning and stakeholder alignment",
        start: "2024-01",
        end: "2024-03",
    },
    SampleTask {
        category: "Planning",
        label: "Requirement Gathering",
        description: "Identifying key features and specifications",
        start: "2024-02",
        end: "2024-06",
    },
    SampleTask {
        category: "Implementation",
        label: "Core Module Development",
        description: "Building the primary functionalities",
        start: "2024-06",
        end: "2024-20",
    },
    SampleTask {
        category: "Implementation",
        label: "UI/UX Design",
        description: "Creating user-friendly interfaces",
        start: "2024-07",
        end: "2024-15",
    },
    SampleTask {
        category: "Implementation",
        label: "Integration Testing",
        description: "Testing system-level interactions",
        start: "2024-16",
        end: "2024-25",
    },
    SampleTask {
        category: "Documentation",
        label: "User Manual Draft",
        description: "Creating user documentation for open-source use",
        start: "2024-18",
        end: "2024-22",
    },
    SampleTask {
        category: "Closure",
        label: "Final Review",
        description: "Peer review and quality assurance",
        start: "2024-23",
        end: "2024-26",
    },
    SampleTask {
        category: "Release",
        label: "Public Release",
        description: "Publishing the project on GitHub",
        start: "2024-27",
        end: "2024-30",
    },
];

impl SampleTask {
    /// Resolve both week labels into a [`Task`]
    pub fn resolve(&self, convention: WeekConvention) -> Result<Task, WeekError> {
        let start = resolve_year_week(self.start, convention)?;
        let end = resolve_year_week(self.end, convention)?;
        Ok(Task::new(self.label)
            .category(self.category)
            .description(self.description)
            .span(start, end))
    }
}

/// Resolve `rows` in order; the first bad label aborts
pub fn resolve_all(
    rows: &[SampleTask],
    convention: WeekConvention,
) -> Result<TaskTable, WeekError> {
    rows.iter().map(|row| row.resolve(convention)).collect()
}

/// The built-in table under `convention`
pub fn table(convention: WeekConvention) -> Result<TaskTable, WeekError> {
    resolve_all(&SAMPLE_TASKS, convention)
}
