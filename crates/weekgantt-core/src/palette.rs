//! Category to base color lookup

use serde::{Deserialize, Serialize};

use crate::Rgba;

/// Fallback for categories without an entry
pub const DEFAULT_CATEGORY_COLOR: &str = "#cccccc";

/// Built-in category colors, in legend order
pub const DEFAULT_CATEGORIES: [(&str, &str); 4] = [
    ("Planning", "#a8d5e2"),
    ("Implementation", "#f9d776"),
    ("Closure", "#c3e88d"),
    ("Review", "#f4a7b9"),
];

/// One configured category
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryColor {
    pub name: String,
    pub color: Rgba,
}

/// Ordered category colors plus a default
///
/// Entry order is legend order. Unlisted categories get the default color
/// and no legend entry.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryPalette {
    entries: Vec<CategoryColor>,
    default: Rgba,
}

impl Default for CategoryPalette {
    fn default() -> Self {
        let entries = DEFAULT_CATEGORIES
            .iter()
            .map(|(name, hex)| CategoryColor {
                name: (*name).to_string(),
                color: parse_builtin(hex),
            })
            .collect();
        Self {
            entries,
            default: parse_builtin(DEFAULT_CATEGORY_COLOR),
        }
    }
}

fn parse_builtin(hex: &str) -> Rgba {
    Rgba::from_hex(hex).unwrap_or(Rgba::new(0.8, 0.8, 0.8, 1.0))
}

impl CategoryPalette {
    /// Palette with no entries; every category gets `default`
    pub fn empty(default: Rgba) -> Self {
        Self {
            entries: Vec::new(),
            default,
        }
    }

    /// Add or replace a category color
    pub fn with(mut self, name: impl Into<String>, color: Rgba) -> Self {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == name) {
            entry.color = color;
        } else {
            self.entries.push(CategoryColor { name, color });
        }
        self
    }

    /// Replace the fallback color
    pub fn default_color(mut self, color: Rgba) -> Self {
        self.default = color;
        self
    }

    /// Base color for `category`
    pub fn color_for(&self, category: &str) -> Rgba {
        self.entries
            .iter()
            .find(|e| e.name == category)
            .map_or(self.default, |e| e.color)
    }

    /// Whether `category` has its own entry
    pub fn contains(&self, category: &str) -> bool {
        self.entries.iter().any(|e| e.name == category)
    }

    pub fn fallback(&self) -> Rgba {
        self.default
    }

    /// Configured entries in legend order
    pub fn entries(&self) -> &[CategoryColor] {
        &self.entries
    }
}
