//! Chart layout in data coordinates
//!
//! `GanttLayout` is everything the chart shows, expressed in rows and
//! dates rather than pixels: separators, week segments, descriptions, axis
//! ticks and the legend. The SVG backend only maps it to pixels, and the
//! CLI can dump it as JSON.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;
use weekgantt_core::{Band, BandShader, GanttConfig, RenderError, Rgba, RowOrder, TaskTable};

/// Days covered by one bar segment
pub const SEGMENT_DAYS: i64 = 7;

/// Padding added on both sides of the task span on the x axis
pub const X_PADDING_DAYS: i64 = 7;

/// Offset of a description from its task's start
pub const DESCRIPTION_OFFSET_DAYS: i64 = 1;

/// Row tick label
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RowLabel {
    pub row: usize,
    pub label: String,
    pub category: String,
}

/// Dashed line marking the start of a category run
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Separator {
    /// Row that opens the run
    pub row: usize,
    /// Line position in row units (`row - 0.5`)
    pub position: f64,
    pub category: String,
}

/// One week of a task bar
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BarSegment {
    pub row: usize,
    /// Week index within the task
    pub week: usize,
    /// Left edge
    pub start: NaiveDate,
    pub days: i64,
    pub band: Band,
    pub color: Rgba,
}

impl BarSegment {
    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(self.days)
    }
}

/// Description text next to a bar
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DescriptionLabel {
    pub row: usize,
    /// Left anchor of the text
    pub anchor: NaiveDate,
    pub text: String,
}

/// Inclusive date range of the x axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// Major x tick at the first of a month
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MonthTick {
    pub date: NaiveDate,
    /// `%b %Y`
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendEntry {
    pub category: String,
    pub color: Rgba,
}

/// Complete chart content
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GanttLayout {
    pub title: String,
    pub row_order: RowOrder,
    pub rows: Vec<RowLabel>,
    pub separators: Vec<Separator>,
    pub segments: Vec<BarSegment>,
    pub descriptions: Vec<DescriptionLabel>,
    pub x_range: DateRange,
    pub month_ticks: Vec<MonthTick>,
    pub legend_title: String,
    pub legend: Vec<LegendEntry>,
}

impl GanttLayout {
    /// Lay out `tasks` in table order
    pub fn build(tasks: &TaskTable, config: &GanttConfig) -> Result<Self, RenderError> {
        let (first_start, last_end) = tasks
            .date_span()
            .ok_or_else(|| RenderError::InvalidData("No tasks to render".into()))?;

        let palette = config.palette();
        let shader = config.shading;
        let mut unstyled: HashSet<&str> = HashSet::new();

        let mut rows = Vec::with_capacity(tasks.len());
        let mut separators = Vec::new();
        let mut segments = Vec::new();
        let mut descriptions = Vec::with_capacity(tasks.len());
        let mut previous_category: Option<&str> = None;

        for (row, task) in tasks.iter().enumerate() {
            if previous_category != Some(task.category.as_str()) {
                separators.push(Separator {
                    row,
                    position: row as f64 - 0.5,
                    category: task.category.clone(),
                });
            }
            previous_category = Some(task.category.as_str());

            if !palette.contains(&task.category) && unstyled.insert(&task.category) {
                tracing::warn!(
                    category = %task.category,
                    fallback = %palette.fallback(),
                    "category has no color; using fallback"
                );
            }

            let base = palette.color_for(&task.category);
            let weeks = task.week_count();
            tracing::debug!(row, task = %task.label, weeks, "laying out task");

            for week in 0..weeks {
                let band = BandShader::band(week, weeks);
                segments.push(BarSegment {
                    row,
                    week,
                    start: task.start + Duration::weeks(week as i64),
                    days: SEGMENT_DAYS,
                    band,
                    color: shader.color(base, band),
                });
            }

            descriptions.push(DescriptionLabel {
                row,
                anchor: task.start + Duration::days(DESCRIPTION_OFFSET_DAYS),
                text: task.description.clone(),
            });

            rows.push(RowLabel {
                row,
                label: task.label.clone(),
                category: task.category.clone(),
            });
        }

        let x_range = DateRange {
            start: first_start - Duration::days(X_PADDING_DAYS),
            end: last_end + Duration::days(X_PADDING_DAYS),
        };

        let legend = palette
            .entries()
            .iter()
            .map(|entry| LegendEntry {
                category: entry.name.clone(),
                color: entry.color,
            })
            .collect();

        Ok(Self {
            title: config.title.clone(),
            row_order: config.row_order,
            rows,
            separators,
            segments,
            descriptions,
            x_range,
            month_ticks: month_ticks(x_range),
            legend_title: config.chart.legend_title.clone(),
            legend,
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Segments of one row, in week order
    pub fn segments_in_row(&self, row: usize) -> impl Iterator<Item = &BarSegment> {
        self.segments.iter().filter(move |s| s.row == row)
    }
}

/// First day of every month inside `range`
pub fn month_ticks(range: DateRange) -> Vec<MonthTick> {
    let mut ticks = Vec::new();
    let Some(mut current) = range.start.with_day(1) else {
        return ticks;
    };
    if current < range.start {
        match current.checked_add_months(Months::new(1)) {
            Some(next) => current = next,
            None => return ticks,
        }
    }
    while current <= range.end {
        ticks.push(MonthTick {
            date: current,
            label: current.format("%b %Y").to_string(),
        });
        match current.checked_add_months(Months::new(1)) {
            Some(next) => current = next,
            None => break,
        }
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn month_ticks_inside_range() {
        let ticks = month_ticks(DateRange {
            start: date(2023, 12, 25),
            end: date(2024, 3, 1),
        });
        let labels: Vec<&str> = ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["Jan 2024", "Feb 2024", "Mar 2024"]);
        assert_eq!(ticks[0].date, date(2024, 1, 1));
    }

    #[test]
    fn month_tick_on_range_start() {
        let ticks = month_ticks(DateRange {
            start: date(2024, 5, 1),
            end: date(2024, 5, 31),
        });
        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks[0].date, date(2024, 5, 1));
    }

    #[test]
    fn no_ticks_inside_one_month() {
        let ticks = month_ticks(DateRange {
            start: date(2024, 5, 2),
            end: date(2024, 5, 30),
        });
        assert!(ticks.is_empty());
    }

    #[test]
    fn empty_table_is_rejected() {
        let err = GanttLayout::build(&TaskTable::default(), &GanttConfig::default()).unwrap_err();
        assert!(matches!(err, RenderError::InvalidData(_)));
    }

    #[test]
    fn segment_end_is_one_week_later() {
        let segment = BarSegment {
            row: 0,
            week: 0,
            start: date(2024, 2, 5),
            days: SEGMENT_DAYS,
            band: Band::Start,
            color: Rgba::from_rgb8(0, 0, 0),
        };
        assert_eq!(segment.end(), date(2024, 2, 12));
    }
}
