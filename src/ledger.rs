//! Material inventory held by the player

use std::collections::HashMap;

use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Quantity must be positive")]
    InvalidQuantity,

    #[error("Not enough {material}: requested {requested}, have {held}")]
    InsufficientQuantity {
        material: String,
        requested: u32,
        held: u32,
    },

    #[error("Cannot hold more than {max} {material}: have {held}, adding {added}", max = u32::MAX)]
    Overflow {
        material: String,
        held: u32,
        added: u32,
    },
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Material name -> quantity on hand
///
/// A material is present only while its quantity is positive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    materials: HashMap<String, u32>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from stored rows, skipping zero quantities
    pub fn from_rows(rows: impl IntoIterator<Item = (String, u32)>) -> Self {
        let mut ledger = Self::new();
        for (material, quantity) in rows.into_iter().filter(|(_, qty)| *qty > 0) {
            if let Err(e) = ledger.add(&material, quantity) {
                warn!("skipping stored row: {}", e);
            }
        }
        ledger
    }

    pub fn add(&mut self, material: &str, quantity: u32) -> LedgerResult<u32> {
        if quantity == 0 {
            return Err(LedgerError::InvalidQuantity);
        }
        let held = self.get(material);
        let total = held.checked_add(quantity).ok_or_else(|| LedgerError::Overflow {
            material: material.to_string(),
            held,
            added: quantity,
        })?;
        self.materials.insert(material.to_string(), total);
        Ok(total)
    }

    /// Remove `quantity` of `material`, returning what is left
    pub fn remove(&mut self, material: &str, quantity: u32) -> LedgerResult<u32> {
        if quantity == 0 {
            return Err(LedgerError::InvalidQuantity);
        }
        let held = self.get(material);
        if quantity > held {
            return Err(LedgerError::InsufficientQuantity {
                material: material.to_string(),
                requested: quantity,
                held,
            });
        }

        let left = held - quantity;
        if left == 0 {
            self.materials.remove(material);
        } else {
            self.materials.insert(material.to_string(), left);
        }
        Ok(left)
    }

    pub fn get(&self, material: &str) -> u32 {
        self.materials.get(material).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Materials sorted by name
    pub fn snapshot(&self) -> Vec<(String, u32)> {
        let mut rows: Vec<(String, u32)> = self
            .materials
            .iter()
            .map(|(material, qty)| (material.clone(), *qty))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));
        rows
    }
}
