//! # weekgantt-render
//!
//! Rendering backend for weekgantt task tables.
//!
//! This crate provides:
//! - `GanttLayout`: the chart content in rows and dates (serializable)
//! - `SvgGanttRenderer`: the layout drawn as a standalone SVG document
//!
//! ## Example
//!
//! ```rust
//! use weekgantt_core::{sample, Renderer, WeekConvention};
//! use weekgantt_render::SvgGanttRenderer;
//!
//! let tasks = sample::table(WeekConvention::MondayFirst).unwrap();
//! let svg = SvgGanttRenderer::new().render(&tasks).unwrap();
//! assert!(svg.contains("Core Module Development"));
//! ```

pub mod layout;
pub mod svg_gantt;

pub use layout::{
    BarSegment, DateRange, DescriptionLabel, GanttLayout, LegendEntry, MonthTick, RowLabel,
    Separator,
};
pub use svg_gantt::SvgGanttRenderer;
