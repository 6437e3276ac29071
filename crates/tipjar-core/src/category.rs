//! Expense category taxonomy
//!
//! Categories are a closed set with a stable string id, a single-glyph
//! display label, and an icon token for the picker. The "main" set is shown
//! inline when recording a bill; the "extended" set lives in a picker.
//! Anything missing or unrecognized lands in [`Category::Unknown`].

use serde::{Deserialize, Serialize};

/// An expense category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    // Main
    Food,
    Clothing,
    Housing,
    Transport,
    Education,
    Entertainment,
    // Extended
    Medical,
    Gift,
    Pet,
    Beauty,
    Sport,
    Travel,
    Shopping,
    Utility,
    /// Missing or unrecognized category id
    Unknown,
}

const MAIN: &[Category] = &[
    Category::Food,
    Category::Clothing,
    Category::Housing,
    Category::Transport,
    Category::Education,
    Category::Entertainment,
];

const EXTENDED: &[Category] = &[
    Category::Medical,
    Category::Gift,
    Category::Pet,
    Category::Beauty,
    Category::Sport,
    Category::Travel,
    Category::Shopping,
    Category::Utility,
];

const DEFAULT_ORDER: &[Category] = &[
    Category::Food,
    Category::Clothing,
    Category::Housing,
    Category::Transport,
    Category::Education,
    Category::Entertainment,
    Category::Medical,
    Category::Gift,
    Category::Pet,
    Category::Beauty,
    Category::Sport,
    Category::Travel,
    Category::Shopping,
    Category::Utility,
    Category::Unknown,
];

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Clothing => "clothing",
            Self::Housing => "housing",
            Self::Transport => "transport",
            Self::Education => "education",
            Self::Entertainment => "entertainment",
            Self::Medical => "medical",
            Self::Gift => "gift",
            Self::Pet => "pet",
            Self::Beauty => "beauty",
            Self::Sport => "sport",
            Self::Travel => "travel",
            Self::Shopping => "shopping",
            Self::Utility => "utility",
            Self::Unknown => "unknown",
        }
    }

    /// Short display label. Unique across the taxonomy.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Food => "食",
            Self::Clothing => "衣",
            Self::Housing => "住",
            Self::Transport => "行",
            Self::Education => "育",
            Self::Entertainment => "樂",
            Self::Medical => "醫",
            Self::Gift => "禮",
            Self::Pet => "寵",
            Self::Beauty => "美",
            Self::Sport => "運",
            Self::Travel => "旅",
            Self::Shopping => "購",
            Self::Utility => "費",
            Self::Unknown => "無",
        }
    }

    /// Icon token for the presentation layer
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Food => "fork.knife",
            Self::Clothing => "tshirt",
            Self::Housing => "house",
            Self::Transport => "car",
            Self::Education => "book",
            Self::Entertainment => "gamecontroller",
            Self::Medical => "cross.case",
            Self::Gift => "gift",
            Self::Pet => "pawprint",
            Self::Beauty => "sparkles",
            Self::Sport => "figure.run",
            Self::Travel => "airplane",
            Self::Shopping => "bag",
            Self::Utility => "bolt",
            Self::Unknown => "questionmark",
        }
    }

    /// Categories shown inline
    pub fn main() -> &'static [Category] {
        MAIN
    }

    /// Categories shown in the picker
    pub fn extended() -> &'static [Category] {
        EXTENDED
    }

    /// Main, then extended, then `Unknown`. Chart colors are assigned in this order.
    pub fn default_order() -> &'static [Category] {
        DEFAULT_ORDER
    }

    /// Every category, `Unknown` included
    pub fn all() -> &'static [Category] {
        DEFAULT_ORDER
    }

    pub fn is_main(&self) -> bool {
        MAIN.contains(self)
    }

    /// Look up a category by its stable id
    pub fn from_id(id: &str) -> Option<Category> {
        id.parse().ok()
    }

    /// Resolve an optional record field, falling back to `Unknown`
    pub fn resolve(id: Option<&str>) -> Category {
        id.and_then(Self::from_id).unwrap_or(Self::Unknown)
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        DEFAULT_ORDER
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
