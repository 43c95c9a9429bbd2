//! SVG Gantt chart renderer
//!
//! Draws a [`GanttLayout`] as a standalone SVG document:
//! - one filled rectangle per bar week, shaded by band
//! - dashed separators where a category run starts
//! - task labels on the y axis, month ticks on the x axis
//! - dashed monthly gridlines, title, axis labels and a category legend

use chrono::NaiveDate;
use svg::node::element::{Group, Line, Rectangle, Text};
use svg::Document;
use weekgantt_core::{ChartStyle, GanttConfig, RenderError, Renderer, RowOrder, TaskTable};

use crate::layout::GanttLayout;

/// Approximate glyph advance as a fraction of the font size
const CHAR_WIDTH: f64 = 0.6;

/// SVG Gantt chart renderer configuration
#[derive(Clone, Debug, Default)]
pub struct SvgGanttRenderer {
    pub config: GanttConfig,
}

impl SvgGanttRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GanttConfig) -> Self {
        Self { config }
    }

    /// Override the chart title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// Override the image size; checked when rendering
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.config.chart.width = width;
        self.config.chart.height = height;
        self
    }

    /// Compute the layout for `tasks` without drawing it
    pub fn layout(&self, tasks: &TaskTable) -> Result<GanttLayout, RenderError> {
        GanttLayout::build(tasks, &self.config)
    }

    /// Draw an already computed layout
    pub fn render_layout(&self, layout: &GanttLayout) -> Result<String, RenderError> {
        if layout.rows.is_empty() {
            return Err(RenderError::InvalidData("No tasks to render".into()));
        }

        let style = &self.config.chart;
        style
            .validate()
            .map_err(|e| RenderError::InvalidData(e.to_string()))?;
        let frame = Frame::new(style, layout);

        let mut document = Document::new()
            .set("width", style.width)
            .set("height", style.height)
            .set("viewBox", (0, 0, style.width, style.height))
            .set("xmlns", "http://www.w3.org/2000/svg");

        // Background
        let background = Rectangle::new()
            .set("width", "100%")
            .set("height", "100%")
            .set("fill", style.background_color.as_str());
        document = document.add(background);

        document = document
            .add(self.render_title(&layout.title, &frame))
            .add(self.render_grid(layout, &frame))
            .add(self.render_separators(layout, &frame))
            .add(self.render_bars(layout, &frame))
            .add(self.render_descriptions(layout, &frame))
            .add(self.render_axes(layout, &frame))
            .add(self.render_legend(layout, &frame));

        let mut output = Vec::new();
        svg::write(&mut output, &document)
            .map_err(|e| RenderError::Format(format!("Failed to write SVG: {}", e)))?;

        String::from_utf8(output).map_err(|e| RenderError::Format(format!("Invalid UTF-8: {}", e)))
    }

    fn render_title(&self, title: &str, frame: &Frame) -> Text {
        let style = &self.config.chart;
        Text::new(title)
            .set("x", frame.left + frame.width / 2.0)
            .set("y", frame.top / 2.0)
            .set("font-family", style.font_family.as_str())
            .set("font-size", style.font_size.saturating_add(4))
            .set("fill", style.text_color.as_str())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "middle")
    }

    /// Dashed vertical lines at month ticks
    fn render_grid(&self, layout: &GanttLayout, frame: &Frame) -> Group {
        let style = &self.config.chart;
        let mut group = Group::new().set("class", "grid");

        for tick in &layout.month_ticks {
            let x = frame.x(tick.date);
            let line = Line::new()
                .set("x1", x)
                .set("y1", frame.top)
                .set("x2", x)
                .set("y2", frame.bottom())
                .set("stroke", style.grid_color.as_str())
                .set("stroke-opacity", style.grid_opacity)
                .set("stroke-dasharray", "4 3")
                .set("stroke-width", 1);
            group = group.add(line);
        }

        group
    }

    fn render_separators(&self, layout: &GanttLayout, frame: &Frame) -> Group {
        let style = &self.config.chart;
        let mut group = Group::new().set("class", "separators");

        for separator in &layout.separators {
            let y = frame.y(separator.position);
            let line = Line::new()
                .set("x1", frame.left)
                .set("y1", y)
                .set("x2", frame.right())
                .set("y2", y)
                .set("stroke", style.separator_color.as_str())
                .set("stroke-dasharray", "6 4")
                .set("stroke-width", style.separator_width)
                .set("data-category", separator.category.as_str());
            group = group.add(line);
        }

        group
    }

    /// One rectangle per bar week
    fn render_bars(&self, layout: &GanttLayout, frame: &Frame) -> Group {
        let mut group = Group::new().set("class", "bars");
        let bar_height = frame.row_height * self.config.chart.bar_height;

        for segment in &layout.segments {
            let x_start = frame.x(segment.start);
            let x_end = frame.x(segment.end());
            let y = frame.y(segment.row as f64) - bar_height / 2.0;

            let rect = Rectangle::new()
                .set("x", x_start)
                .set("y", y)
                .set("width", x_end - x_start)
                .set("height", bar_height)
                .set("fill", segment.color.to_hex())
                .set("stroke", "none")
                .set("data-row", segment.row.to_string())
                .set("data-week", segment.week.to_string());
            group = group.add(rect);
        }

        group
    }

    fn render_descriptions(&self, layout: &GanttLayout, frame: &Frame) -> Group {
        let style = &self.config.chart;
        let mut group = Group::new().set("class", "descriptions");

        for label in &layout.descriptions {
            let text = Text::new(label.text.as_str())
                .set("x", frame.x(label.anchor))
                .set("y", frame.y(label.row as f64))
                .set("font-family", style.font_family.as_str())
                .set("font-size", style.font_size.saturating_sub(2))
                .set("fill", style.text_color.as_str())
                .set("text-anchor", "start")
                .set("dominant-baseline", "middle");
            group = group.add(text);
        }

        group
    }

    /// Plot frame, tick marks, tick labels and axis labels
    fn render_axes(&self, layout: &GanttLayout, frame: &Frame) -> Group {
        let style = &self.config.chart;
        let mut group = Group::new().set("class", "axes");

        let border = Rectangle::new()
            .set("x", frame.left)
            .set("y", frame.top)
            .set("width", frame.width)
            .set("height", frame.height)
            .set("fill", "none")
            .set("stroke", style.axis_color.as_str())
            .set("stroke-width", 1);
        group = group.add(border);

        // Task labels
        for row in &layout.rows {
            let y = frame.y(row.row as f64);
            let tick = Line::new()
                .set("x1", frame.left - 4.0)
                .set("y1", y)
                .set("x2", frame.left)
                .set("y2", y)
                .set("stroke", style.axis_color.as_str())
                .set("stroke-width", 1);
            let label = Text::new(row.label.as_str())
                .set("x", frame.left - 8.0)
                .set("y", y)
                .set("font-family", style.font_family.as_str())
                .set("font-size", style.font_size)
                .set("fill", style.text_color.as_str())
                .set("text-anchor", "end")
                .set("dominant-baseline", "middle");
            group = group.add(tick).add(label);
        }

        // Month labels
        for tick in &layout.month_ticks {
            let x = frame.x(tick.date);
            let mark = Line::new()
                .set("x1", x)
                .set("y1", frame.bottom())
                .set("x2", x)
                .set("y2", frame.bottom() + 4.0)
                .set("stroke", style.axis_color.as_str())
                .set("stroke-width", 1);
            let label = Text::new(tick.label.as_str())
                .set("x", x)
                .set("y", frame.bottom() + 8.0 + f64::from(style.font_size))
                .set("font-family", style.font_family.as_str())
                .set("font-size", style.font_size.saturating_sub(1))
                .set("fill", style.text_color.as_str())
                .set("text-anchor", "middle");
            group = group.add(mark).add(label);
        }

        let x_label = Text::new(style.x_label.as_str())
            .set("x", frame.left + frame.width / 2.0)
            .set("y", f64::from(style.height) - f64::from(style.font_size))
            .set("font-family", style.font_family.as_str())
            .set("font-size", style.font_size.saturating_add(2))
            .set("fill", style.text_color.as_str())
            .set("text-anchor", "middle");

        let y_label_x = f64::from(style.font_size.saturating_add(2));
        let y_label_y = frame.top + frame.height / 2.0;
        let y_label = Text::new(style.y_label.as_str())
            .set("x", y_label_x)
            .set("y", y_label_y)
            .set("transform", format!("rotate(-90 {} {})", y_label_x, y_label_y))
            .set("font-family", style.font_family.as_str())
            .set("font-size", style.font_size.saturating_add(2))
            .set("fill", style.text_color.as_str())
            .set("text-anchor", "middle");

        group.add(x_label).add(y_label)
    }

    /// Legend box in the upper right corner of the plot
    fn render_legend(&self, layout: &GanttLayout, frame: &Frame) -> Group {
        let style = &self.config.chart;
        let mut group = Group::new().set("class", "legend");

        let font_size = f64::from(style.font_size);
        let title_size = font_size + 2.0;
        let line_height = font_size * 1.6;
        let swatch = font_size;
        let pad = 8.0;

        let longest = layout
            .legend
            .iter()
            .map(|e| e.category.chars().count())
            .max()
            .unwrap_or(0);
        let entries_width = swatch + 6.0 + longest as f64 * font_size * CHAR_WIDTH;
        let title_width = layout.legend_title.chars().count() as f64 * title_size * CHAR_WIDTH;
        let box_width = entries_width.max(title_width) + pad * 2.0;
        let box_height = pad * 2.0 + title_size * 1.4 + layout.legend.len() as f64 * line_height;

        let x0 = frame.right() - box_width - 10.0;
        let y0 = frame.top + 10.0;

        let frame_rect = Rectangle::new()
            .set("x", x0)
            .set("y", y0)
            .set("width", box_width)
            .set("height", box_height)
            .set("rx", 3)
            .set("fill", style.background_color.as_str())
            .set("fill-opacity", 0.8)
            .set("stroke", style.grid_color.as_str())
            .set("stroke-width", 1);
        group = group.add(frame_rect);

        let title = Text::new(layout.legend_title.as_str())
            .set("x", x0 + box_width / 2.0)
            .set("y", y0 + pad + title_size)
            .set("font-family", style.font_family.as_str())
            .set("font-size", title_size)
            .set("fill", style.text_color.as_str())
            .set("text-anchor", "middle");
        group = group.add(title);

        let mut y = y0 + pad + title_size * 1.4;
        for entry in &layout.legend {
            let swatch_rect = Rectangle::new()
                .set("x", x0 + pad)
                .set("y", y + (line_height - swatch) / 2.0)
                .set("width", swatch)
                .set("height", swatch)
                .set("fill", entry.color.to_hex());
            let label = Text::new(entry.category.as_str())
                .set("x", x0 + pad + swatch + 6.0)
                .set("y", y + line_height / 2.0)
                .set("font-family", style.font_family.as_str())
                .set("font-size", style.font_size)
                .set("fill", style.text_color.as_str())
                .set("dominant-baseline", "middle");
            group = group.add(swatch_rect).add(label);
            y += line_height;
        }

        group
    }
}

impl Renderer for SvgGanttRenderer {
    type Output = String;

    fn render(&self, tasks: &TaskTable) -> Result<String, RenderError> {
        let layout = self.layout(tasks)?;
        tracing::debug!(
            rows = layout.row_count(),
            segments = layout.segments.len(),
            separators = layout.separators.len(),
            "rendering SVG"
        );
        self.render_layout(&layout)
    }
}

/// Pixel mapping of the plot area
struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    row_height: f64,
    rows: usize,
    row_order: RowOrder,
    x_origin: NaiveDate,
    px_per_day: f64,
}

impl Frame {
    fn new(style: &ChartStyle, layout: &GanttLayout) -> Self {
        let width = f64::from(style.plot_width());
        let height = f64::from(style.plot_height());
        let rows = layout.row_count().max(1);
        let days = layout.x_range.days().max(1) as f64;
        Self {
            left: f64::from(style.margin_left),
            top: f64::from(style.margin_top),
            width,
            height,
            row_height: height / rows as f64,
            rows,
            row_order: layout.row_order,
            x_origin: layout.x_range.start,
            px_per_day: width / days,
        }
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Convert a date to x position
    fn x(&self, date: NaiveDate) -> f64 {
        let days = (date - self.x_origin).num_days() as f64;
        self.left + days * self.px_per_day
    }

    /// Convert a row position (row centers at integers) to y position
    fn y(&self, position: f64) -> f64 {
        let from_first = (position + 0.5) * self.row_height;
        match self.row_order {
            RowOrder::TopDown => self.top + from_first,
            RowOrder::BottomUp => self.top + self.rows as f64 * self.row_height - from_first,
        }
    }
}
