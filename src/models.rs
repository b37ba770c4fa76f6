//! Data models for weapon recipes, crafting results and persisted session rows

use std::collections::BTreeMap;
use std::fmt;

/// One required material of a recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub quantity: u32,
    pub material: String,
}

impl Requirement {
    pub fn new(quantity: u32, material: impl Into<String>) -> Self {
        Self {
            quantity,
            material: material.into(),
        }
    }
}

/// Formats as the `"<qty> <material>"` token used for display and recipe files
impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quantity, self.material)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub item: String,
    pub requirements: Vec<Requirement>,
}

impl Recipe {
    pub fn new(item: impl Into<String>, requirements: Vec<Requirement>) -> Self {
        Self {
            item: item.into(),
            requirements,
        }
    }

    /// Requirement tokens, e.g. `["2 Earth Crystal", "5 Iron Ore"]`
    pub fn requirement_strings(&self) -> Vec<String> {
        self.requirements.iter().map(ToString::to_string).collect()
    }
}

/// Material -> missing quantity, sorted by material name
pub type Shortfall = BTreeMap<String, u32>;

/// Result of checking one recipe against the ledger
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub craftable: bool,
    pub shortfall: Shortfall,
}

/// Outcome of crafting one queued item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CraftOutcome {
    Crafted {
        item: String,
        materials_used: Vec<Requirement>,
    },
    Failed {
        item: String,
        shortfall: Shortfall,
    },
    /// The queued name has no recipe
    Unknown { item: String },
}

impl CraftOutcome {
    pub fn item(&self) -> &str {
        match self {
            CraftOutcome::Crafted { item, .. }
            | CraftOutcome::Failed { item, .. }
            | CraftOutcome::Unknown { item } => item,
        }
    }

    pub fn is_crafted(&self) -> bool {
        matches!(self, CraftOutcome::Crafted { .. })
    }
}

impl fmt::Display for CraftOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CraftOutcome::Crafted {
                item,
                materials_used,
            } => {
                write!(f, "Crafted {item} (used: {})", join_requirements(materials_used))
            }
            CraftOutcome::Failed { item, shortfall } => {
                write!(f, "Not enough materials to craft {item} (Missing: {})", format_shortfall(shortfall))
            }
            CraftOutcome::Unknown { item } => write!(f, "No recipe for {item}"),
        }
    }
}

/// A crafting history row as stored by the persistence layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub item: String,
    pub crafted_at: i64, // unix seconds
}

pub fn join_requirements(requirements: &[Requirement]) -> String {
    requirements
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_shortfall(shortfall: &Shortfall) -> String {
    shortfall
        .iter()
        .map(|(material, qty)| format!("{qty} {material}"))
        .collect::<Vec<_>>()
        .join(", ")
}
