//! Recipe store: weapon recipes plus their upgrade edges

use std::collections::HashMap;

use crate::models::{Recipe, Requirement};
use crate::table::ChainedTable;

/// Upgrade chains are cut off after this many steps
const MAX_CHAIN: usize = 64;

#[derive(Debug, Clone, Default)]
pub struct RecipeStore {
    recipes: ChainedTable<String, Vec<Requirement>>,
    upgrades: HashMap<String, String>,
}

impl RecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buckets(buckets: usize) -> Self {
        Self {
            recipes: ChainedTable::with_buckets(buckets),
            upgrades: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.recipes.bucket_count()
    }

    pub fn load_factor(&self) -> f64 {
        self.recipes.load_factor()
    }

    /// Insert or overwrite the requirements for `item`
    ///
    /// Zero quantities are dropped and repeated materials are merged into
    /// their first occurrence. Merged quantities saturate at `u32::MAX`.
    pub fn insert(&mut self, item: impl Into<String>, requirements: Vec<Requirement>) {
        self.recipes.insert(item.into(), normalize(requirements));
    }

    pub fn get(&self, item: &str) -> Option<&[Requirement]> {
        self.recipes.get(item).map(Vec::as_slice)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.recipes.contains_key(item)
    }

    pub fn remove(&mut self, item: &str) -> bool {
        self.recipes.remove(item).is_some()
    }

    pub fn add_upgrade(&mut self, base_item: impl Into<String>, upgraded_item: impl Into<String>) {
        self.upgrades.insert(base_item.into(), upgraded_item.into());
    }

    pub fn get_upgrade(&self, item: &str) -> Option<&str> {
        self.upgrades.get(item).map(String::as_str)
    }

    /// Follow upgrade edges from `item`, excluding `item` itself
    ///
    /// Stops at the first repeated item so a cyclic chain terminates.
    pub fn upgrade_chain(&self, item: &str) -> Vec<String> {
        let mut chain: Vec<String> = Vec::new();
        let mut current = item;

        while let Some(next) = self.get_upgrade(current) {
            if next == item || chain.iter().any(|seen| seen == next) || chain.len() >= MAX_CHAIN {
                break;
            }
            chain.push(next.to_string());
            current = next;
        }
        chain
    }

    /// Items whose upgrade edge points at `item`
    pub fn upgraded_from(&self, item: &str) -> Vec<&str> {
        let mut bases: Vec<&str> = self
            .upgrades
            .iter()
            .filter(|(_, to)| to.as_str() == item)
            .map(|(from, _)| from.as_str())
            .collect();
        bases.sort_unstable();
        bases
    }

    /// All recipes in bucket order
    pub fn list_all(&self) -> Vec<Recipe> {
        self.recipes
            .iter()
            .map(|(item, reqs)| Recipe::new(item.clone(), reqs.clone()))
            .collect()
    }

    /// All recipes sorted by item name, the order every listing is shown in
    pub fn list_sorted(&self) -> Vec<Recipe> {
        let mut recipes = self.list_all();
        recipes.sort_by(|a, b| a.item.cmp(&b.item));
        recipes
    }

    /// Sorted `(item, ["<qty> <material>", ...])` pairs for display
    pub fn list_all_strings(&self) -> Vec<(String, Vec<String>)> {
        self.list_sorted()
            .into_iter()
            .map(|recipe| {
                let tokens = recipe.requirement_strings();
                (recipe.item, tokens)
            })
            .collect()
    }

    /// Case-insensitive search over item names
    pub fn search(&self, term: &str) -> Vec<Recipe> {
        let term = term.to_lowercase();
        self.list_sorted()
            .into_iter()
            .filter(|recipe| recipe.item.to_lowercase().contains(&term))
            .collect()
    }
}

fn normalize(requirements: Vec<Requirement>) -> Vec<Requirement> {
    let mut merged: Vec<Requirement> = Vec::with_capacity(requirements.len());
    for req in requirements.into_iter().filter(|r| r.quantity > 0) {
        match merged.iter_mut().find(|m| m.material == req.material) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(req.quantity),
            None => merged.push(req),
        }
    }
    merged
}
