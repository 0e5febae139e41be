//! Spending categories and their chart palette.

use std::fmt;

use serde::{de::Deserializer, ser::Serializer, Deserialize, Serialize};

/// Label attached to a transaction.
///
/// The eight known categories carry a dedicated chart color. Any other label is
/// preserved verbatim as [`Category::Uncategorized`]. The derived ordering (known
/// categories in palette order, then unrecognized labels alphabetically) is the
/// deterministic tie-break used when ranking category totals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Bills,
    Entertainment,
    Investment,
    Savings,
    Other,
    Uncategorized(String),
}

impl Category {
    /// The fixed set of recognized categories, in palette order.
    pub const KNOWN: [Category; 8] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Bills,
        Category::Entertainment,
        Category::Investment,
        Category::Savings,
        Category::Other,
    ];

    /// Maps a stored label onto a category, keeping unknown labels as-is.
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        Self::KNOWN
            .iter()
            .find(|known| known.label() == trimmed)
            .cloned()
            .unwrap_or_else(|| Category::Uncategorized(trimmed.to_string()))
    }

    pub fn label(&self) -> &str {
        match self {
            Category::Food => "Ăn uống",
            Category::Transport => "Di chuyển",
            Category::Shopping => "Mua sắm",
            Category::Bills => "Hóa đơn",
            Category::Entertainment => "Giải trí",
            Category::Investment => "Đầu tư",
            Category::Savings => "Tiết kiệm",
            Category::Other => "Khác",
            Category::Uncategorized(label) => label,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Uncategorized(_))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Category::from_label(&value))
    }
}

/// One category and the color it is drawn with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub category: Category,
    pub color: String,
}

/// Category → color configuration injected into chart-series construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryPalette {
    entries: Vec<PaletteEntry>,
}

impl CategoryPalette {
    pub fn new(entries: Vec<PaletteEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn color_for(&self, category: &Category) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| &entry.category == category)
            .map(|entry| entry.color.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CategoryPalette {
    fn default() -> Self {
        let colors = [
            "#F87171", "#FB923C", "#FBBF24", "#34D399", "#60A5FA", "#818CF8", "#A78BFA",
            "#94A3B8",
        ];
        let entries = Category::KNOWN
            .iter()
            .cloned()
            .zip(colors)
            .map(|(category, color)| PaletteEntry {
                category,
                color: color.to_string(),
            })
            .collect();
        Self { entries }
    }
}
