//! Craftability resolution against the material ledger
//!
//! Nothing here mutates the ledger: the same requirements and ledger
//! always give the same answer.

use std::fmt;

use crate::ledger::Ledger;
use crate::models::{Recipe, Requirement, Resolution, Shortfall, format_shortfall, join_requirements};
use crate::store::RecipeStore;

/// Check every `(quantity, material)` pair against the ledger
pub fn resolve(requirements: &[Requirement], ledger: &Ledger) -> Resolution {
    let mut shortfall = Shortfall::new();
    for req in requirements {
        let held = ledger.get(&req.material);
        if held < req.quantity {
            *shortfall.entry(req.material.clone()).or_default() += req.quantity - held;
        }
    }

    Resolution {
        craftable: shortfall.is_empty(),
        shortfall,
    }
}

/// Resolve a stored recipe by item name; `None` if there is no such recipe
pub fn resolve_item(store: &RecipeStore, item: &str, ledger: &Ledger) -> Option<Resolution> {
    store.get(item).map(|reqs| resolve(reqs, ledger))
}

/// Keep recipes with at least one material name containing `needle`
///
/// The match is case-sensitive.
pub fn filter_by_material<'a>(recipes: &'a [Recipe], needle: &str) -> Vec<&'a Recipe> {
    recipes
        .iter()
        .filter(|recipe| recipe.requirements.iter().any(|r| r.material.contains(needle)))
        .collect()
}

/// One row of the craftability report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraftableRow {
    pub recipe: Recipe,
    pub resolution: Resolution,
}

/// Resolve every recipe in item-name order, optionally filtered by material
pub fn resolve_all(store: &RecipeStore, ledger: &Ledger, material_filter: Option<&str>) -> Vec<CraftableRow> {
    let recipes = store.list_sorted();
    let selected: Vec<&Recipe> = match material_filter {
        Some(needle) if !needle.is_empty() => filter_by_material(&recipes, needle),
        _ => recipes.iter().collect(),
    };

    selected
        .into_iter()
        .map(|recipe| CraftableRow {
            resolution: resolve(&recipe.requirements, ledger),
            recipe: recipe.clone(),
        })
        .collect()
}

impl fmt::Display for CraftableRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.resolution.craftable { "Yes" } else { "No" };
        write!(
            f,
            "{:<30} {:<9} {}",
            self.recipe.item,
            status,
            join_requirements(&self.recipe.requirements)
        )?;
        if !self.resolution.craftable {
            write!(f, " (Missing: {})", format_shortfall(&self.resolution.shortfall))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn req(quantity: u32, material: &str) -> Requirement {
        Requirement::new(quantity, material)
    }

    fn sample_store() -> RecipeStore {
        let mut store = RecipeStore::new();
        store.insert("Metal Bagpipe I", vec![req(1, "Iron Ore")]);
        store.insert(
            "Metal Bagpipe III",
            vec![req(2, "Earth Crystal"), req(2, "Machalite Ore"), req(5, "Iron Ore")],
        );
        store.insert("Hidden Harmonic", vec![req(2, "Nargacuga Hardfang"), req(1, "Meldspar Ore")]);
        store
    }

    #[test]
    fn test_resolve_shortfall() {
        let store = sample_store();
        let mut ledger = Ledger::new();
        ledger.add("Iron Ore", 3).unwrap();
        ledger.add("Earth Crystal", 2).unwrap();

        let resolution = resolve_item(&store, "Metal Bagpipe III", &ledger).unwrap();
        assert!(!resolution.craftable);
        let expected: Shortfall = [("Machalite Ore".to_string(), 2), ("Iron Ore".to_string(), 2)]
            .into_iter()
            .collect();
        assert_eq!(resolution.shortfall, expected);
    }

    #[test]
    fn test_resolve_craftable() {
        let mut ledger = Ledger::new();
        ledger.add("Iron Ore", 1).unwrap();
        let resolution = resolve(&[req(1, "Iron Ore")], &ledger);
        assert!(resolution.craftable);
        assert!(resolution.shortfall.is_empty());
        // the ledger is untouched
        assert_eq!(ledger.get("Iron Ore"), 1);
    }

    #[test]
    fn test_resolve_empty_requirements() {
        let resolution = resolve(&[], &Ledger::new());
        assert!(resolution.craftable);
    }

    #[test]
    fn test_resolve_unknown_item() {
        assert_eq!(resolve_item(&sample_store(), "Bone Club", &Ledger::new()), None);
    }

    #[test]
    fn test_filter_is_case_sensitive() {
        let recipes = sample_store().list_sorted();
        let hits: Vec<&str> = filter_by_material(&recipes, "Ore")
            .into_iter()
            .map(|r| r.item.as_str())
            .collect();
        assert_eq!(hits, vec!["Hidden Harmonic", "Metal Bagpipe I", "Metal Bagpipe III"]);

        assert!(filter_by_material(&recipes, "ore").is_empty());
        assert_eq!(filter_by_material(&recipes, "Nargacuga").len(), 1);
    }

    #[test]
    fn test_resolve_all_with_filter() {
        let store = sample_store();
        let mut ledger = Ledger::new();
        ledger.add("Iron Ore", 1).unwrap();

        let rows = resolve_all(&store, &ledger, None);
        assert_eq!(rows.len(), 3);
        let craftable: Vec<&str> = rows
            .iter()
            .filter(|row| row.resolution.craftable)
            .map(|row| row.recipe.item.as_str())
            .collect();
        assert_eq!(craftable, vec!["Metal Bagpipe I"]);

        let rows = resolve_all(&store, &ledger, Some("Crystal"));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].recipe.item, "Metal Bagpipe III");

        assert_eq!(resolve_all(&store, &ledger, Some("")).len(), 3);
    }

    #[test]
    fn test_row_display() {
        let store = sample_store();
        let rows = resolve_all(&store, &Ledger::new(), Some("Iron"));
        let line = rows[0].to_string();
        assert!(line.starts_with("Metal Bagpipe I "));
        assert!(line.ends_with("1 Iron Ore (Missing: 1 Iron Ore)"));
    }

    proptest! {
        #[test]
        fn prop_resolve_matches_model(
            wanted in prop::collection::vec((0u32..10, "[a-e]"), 0..8),
            held in prop::collection::vec(("[a-e]", 1u32..12), 0..8),
        ) {
            let mut ledger = Ledger::new();
            let mut on_hand: HashMap<String, u32> = HashMap::new();
            for (material, qty) in &held {
                ledger.add(material, *qty).unwrap();
                *on_hand.entry(material.clone()).or_default() += qty;
            }
            let before = ledger.snapshot();

            let mut store = RecipeStore::new();
            store.insert("Horn", wanted.iter().map(|(qty, material)| req(*qty, material)).collect());
            let requirements = store.get("Horn").unwrap();
            let resolution = resolve(requirements, &ledger);

            let have = |material: &str| on_hand.get(material).copied().unwrap_or(0);
            let expected: Shortfall = requirements
                .iter()
                .filter(|r| have(&r.material) < r.quantity)
                .map(|r| (r.material.clone(), r.quantity - have(&r.material)))
                .collect();

            prop_assert_eq!(
                resolution.craftable,
                requirements.iter().all(|r| have(&r.material) >= r.quantity)
            );
            prop_assert_eq!(resolution.craftable, expected.is_empty());
            prop_assert_eq!(&resolution.shortfall, &expected);
            prop_assert_eq!(ledger.snapshot(), before);
        }
    }
}
