//! Chart configuration
//!
//! Everything has a default, so an empty file is a valid configuration:
//!
//! ```toml
//! title = "Release plan"
//! week_convention = "monday"   # monday | sunday | iso
//! row_order = "bottom-up"      # bottom-up | top-down
//! default_color = "#cccccc"
//!
//! [[categories]]
//! name = "Planning"
//! color = "#a8d5e2"
//!
//! [shading]
//! mid = 0.9
//! end = 0.8
//!
//! [chart]
//! width = 1400
//! height = 800
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::palette::CategoryColor;
use crate::{BandShader, CategoryPalette, ConfigError, Rgba, WeekConvention};

/// Direction rows are stacked in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowOrder {
    /// First task on the bottom row
    #[default]
    BottomUp,
    /// First task on the top row
    TopDown,
}

impl std::str::FromStr for RowOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bottom-up" | "bottomup" => Ok(Self::BottomUp),
            "top-down" | "topdown" => Ok(Self::TopDown),
            other => Err(format!(
                "unknown row order '{}' (expected bottom-up or top-down)",
                other
            )),
        }
    }
}

/// Complete chart configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GanttConfig {
    /// Chart title
    pub title: String,
    /// How year-week labels map to dates
    pub week_convention: WeekConvention,
    /// Row stacking direction
    pub row_order: RowOrder,
    /// Color for categories without an entry
    pub default_color: Rgba,
    /// Category colors in legend order
    pub categories: Vec<CategoryColor>,
    /// Band shade factors
    pub shading: BandShader,
    /// Geometry and typography
    pub chart: ChartStyle,
}

impl Default for GanttConfig {
    fn default() -> Self {
        let palette = CategoryPalette::default();
        Self {
            title: "Full-Width Yearly Gantt Chart".into(),
            week_convention: WeekConvention::default(),
            row_order: RowOrder::default(),
            default_color: palette.fallback(),
            categories: palette.entries().to_vec(),
            shading: BandShader::default(),
            chart: ChartStyle::default(),
        }
    }
}

impl GanttConfig {
    /// Read and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shading.validate()?;
        self.chart.validate()
    }

    /// Category lookup built from `categories` and `default_color`
    pub fn palette(&self) -> CategoryPalette {
        self.categories
            .iter()
            .fold(CategoryPalette::empty(self.default_color), |palette, entry| {
                palette.with(entry.name.clone(), entry.color)
            })
    }
}

/// Largest accepted base font size in pixels
pub const MAX_FONT_SIZE: u32 = 200;

/// Geometry, typography and neutral colors of the chart
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartStyle {
    /// Total image width in pixels
    pub width: u32,
    /// Total image height in pixels
    pub height: u32,
    /// Space left of the plot, holds the task labels
    pub margin_left: u32,
    pub margin_right: u32,
    /// Space above the plot, holds the title
    pub margin_top: u32,
    /// Space below the plot, holds month labels and the axis label
    pub margin_bottom: u32,
    /// Bar thickness as a fraction of the row height
    pub bar_height: f64,
    pub font_family: String,
    /// Base font size in pixels; other sizes derive from it
    pub font_size: u32,
    pub x_label: String,
    pub y_label: String,
    pub legend_title: String,
    pub background_color: String,
    pub text_color: String,
    pub axis_color: String,
    pub grid_color: String,
    pub grid_opacity: f64,
    pub separator_color: String,
    pub separator_width: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1400,
            height: 800,
            margin_left: 200,
            margin_right: 30,
            margin_top: 50,
            margin_bottom: 70,
            bar_height: 0.5,
            font_family: "DejaVu Sans, Helvetica, Arial, sans-serif".into(),
            font_size: 12,
            x_label: "Timeline".into(),
            y_label: "Tasks".into(),
            legend_title: "Categories".into(),
            background_color: "#ffffff".into(),
            text_color: "#000000".into(),
            axis_color: "#000000".into(),
            grid_color: "#808080".into(),
            grid_opacity: 0.7,
            separator_color: "#808080".into(),
            separator_width: 1.5,
        }
    }
}

impl ChartStyle {
    pub fn plot_width(&self) -> u32 {
        self.width.saturating_sub(self.margin_left.saturating_add(self.margin_right))
    }

    pub fn plot_height(&self) -> u32 {
        self.height.saturating_sub(self.margin_top.saturating_add(self.margin_bottom))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.plot_width() == 0 || self.plot_height() == 0 {
            return Err(ConfigError::InvalidChart(format!(
                "chart {}x{} leaves no room for the plot after margins",
                self.width, self.height
            )));
        }
        if !(self.bar_height > 0.0 && self.bar_height <= 1.0) {
            return Err(ConfigError::InvalidChart(format!(
                "bar_height must be in (0, 1], got {}",
                self.bar_height
            )));
        }
        if self.font_size == 0 || self.font_size > MAX_FONT_SIZE {
            return Err(ConfigError::InvalidChart(format!(
                "font_size must be in 1..={}, got {}",
                MAX_FONT_SIZE, self.font_size
            )));
        }
        Ok(())
    }
}
