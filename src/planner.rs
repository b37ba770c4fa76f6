//! Crafting session: drains the queue against the ledger

use tracing::{info, warn};

use crate::history::CraftHistory;
use crate::ledger::{Ledger, LedgerError, LedgerResult};
use crate::models::{CraftOutcome, Requirement, Shortfall};
use crate::queue::CraftQueue;
use crate::resolver;
use crate::store::RecipeStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkshopState {
    Idle,
    Processing,
}

/// Per-session crafting state over a shared, read-only recipe store
#[derive(Debug)]
pub struct Workshop<'a> {
    store: &'a RecipeStore,
    ledger: Ledger,
    queue: CraftQueue,
    history: CraftHistory,
    state: WorkshopState,
}

impl<'a> Workshop<'a> {
    pub fn new(store: &'a RecipeStore, ledger: Ledger, queue: CraftQueue, history: CraftHistory) -> Self {
        Self {
            store,
            ledger,
            queue,
            history,
            state: WorkshopState::Idle,
        }
    }

    pub fn store(&self) -> &RecipeStore {
        self.store
    }

    pub fn state(&self) -> WorkshopState {
        self.state
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    pub fn queue(&self) -> &CraftQueue {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut CraftQueue {
        &mut self.queue
    }

    pub fn history(&self) -> &CraftHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut CraftHistory {
        &mut self.history
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (Ledger, CraftQueue, CraftHistory) {
        (self.ledger, self.queue, self.history)
    }

    /// Take the front item and try to craft it
    ///
    /// Returns `None` when the queue is empty. An item that cannot be
    /// crafted is dropped from the queue and reported, not retried.
    pub fn craft_one(&mut self) -> Option<CraftOutcome> {
        let item = self.queue.dequeue_front()?;

        let store = self.store;
        let Some(requirements) = store.get(&item) else {
            warn!(%item, "no recipe for queued item");
            return Some(CraftOutcome::Unknown { item });
        };

        let resolution = resolver::resolve(requirements, &self.ledger);
        if !resolution.craftable {
            warn!(%item, missing = resolution.shortfall.len(), "not enough materials");
            return Some(CraftOutcome::Failed {
                item,
                shortfall: resolution.shortfall,
            });
        }

        // all or nothing: the ledger is only replaced once every deduction succeeded
        match consume(&self.ledger, requirements) {
            Ok(next) => self.ledger = next,
            Err(e) => {
                warn!(%item, error = %e, "deduction failed, ledger left unchanged");
                return Some(CraftOutcome::Failed {
                    item,
                    shortfall: shortfall_of(e),
                });
            }
        }

        if let Some(evicted) = self.history.record(item.clone()) {
            info!(%evicted, "history full, dropped oldest craft");
        }
        info!(%item, "crafted");

        Some(CraftOutcome::Crafted {
            item,
            materials_used: requirements.to_vec(),
        })
    }

    /// Craft everything in the queue, in order
    ///
    /// A failed item never stops the rest of the queue, so the queue is
    /// always empty afterwards.
    pub fn drain_queue(&mut self) -> Vec<CraftOutcome> {
        self.state = WorkshopState::Processing;
        let mut outcomes = Vec::with_capacity(self.queue.len());
        while let Some(outcome) = self.craft_one() {
            outcomes.push(outcome);
        }
        self.state = WorkshopState::Idle;
        outcomes
    }
}

/// Apply every deduction to a copy of `ledger`
fn consume(ledger: &Ledger, requirements: &[Requirement]) -> LedgerResult<Ledger> {
    let mut next = ledger.clone();
    for req in requirements {
        next.remove(&req.material, req.quantity)?;
    }
    Ok(next)
}

fn shortfall_of(err: LedgerError) -> Shortfall {
    match err {
        LedgerError::InsufficientQuantity {
            material,
            requested,
            held,
        } => Shortfall::from([(material, requested - held)]),
        LedgerError::InvalidQuantity | LedgerError::Overflow { .. } => Shortfall::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RecipeStore {
        let mut store = RecipeStore::new();
        store.insert("Iron Sword", vec![Requirement::new(1, "Iron Ore")]);
        store.insert(
            "Metal Bagpipe III",
            vec![
                Requirement::new(2, "Earth Crystal"),
                Requirement::new(2, "Machalite Ore"),
                Requirement::new(5, "Iron Ore"),
            ],
        );
        store
    }

    fn workshop(store: &RecipeStore) -> Workshop<'_> {
        Workshop::new(store, Ledger::new(), CraftQueue::default(), CraftHistory::default())
    }

    #[test]
    fn test_iron_sword_end_to_end() {
        let store = store();
        let mut shop = workshop(&store);

        let resolution = resolver::resolve_item(&store, "Iron Sword", shop.ledger()).unwrap();
        assert!(!resolution.craftable);
        assert_eq!(resolution.shortfall, Shortfall::from([("Iron Ore".to_string(), 1)]));

        shop.ledger_mut().add("Iron Ore", 1).unwrap();
        let resolution = resolver::resolve_item(&store, "Iron Sword", shop.ledger()).unwrap();
        assert!(resolution.craftable);
        assert!(resolution.shortfall.is_empty());

        shop.queue_mut().enqueue("Iron Sword");
        let outcomes = shop.drain_queue();
        assert_eq!(
            outcomes,
            vec![CraftOutcome::Crafted {
                item: "Iron Sword".to_string(),
                materials_used: vec![Requirement::new(1, "Iron Ore")],
            }]
        );
        assert_eq!(shop.ledger().get("Iron Ore"), 0);
        assert!(shop.ledger().is_empty());
        assert_eq!(shop.history().peek_last(), Some("Iron Sword"));
        assert_eq!(shop.state(), WorkshopState::Idle);
    }

    #[test]
    fn test_failure_does_not_block_queue() {
        let store = store();
        let mut shop = workshop(&store);
        shop.ledger_mut().add("Iron Ore", 1).unwrap();
        shop.queue_mut().enqueue("Metal Bagpipe III");
        shop.queue_mut().enqueue("Iron Sword");

        let outcomes = shop.drain_queue();
        assert_eq!(outcomes.len(), 2);
        assert!(matches!(&outcomes[0], CraftOutcome::Failed { item, .. } if item == "Metal Bagpipe III"));
        assert!(outcomes[1].is_crafted());
        assert!(shop.queue().is_empty());
        assert_eq!(shop.history().len(), 1);
    }

    #[test]
    fn test_failed_item_keeps_materials() {
        let store = store();
        let mut shop = workshop(&store);
        shop.ledger_mut().add("Iron Ore", 5).unwrap();
        shop.ledger_mut().add("Earth Crystal", 2).unwrap();
        shop.queue_mut().enqueue("Metal Bagpipe III");

        let outcomes = shop.drain_queue();
        match &outcomes[0] {
            CraftOutcome::Failed { shortfall, .. } => {
                assert_eq!(shortfall, &Shortfall::from([("Machalite Ore".to_string(), 2)]));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(shop.ledger().get("Iron Ore"), 5);
        assert_eq!(shop.ledger().get("Earth Crystal"), 2);
    }

    #[test]
    fn test_materials_run_out_mid_queue() {
        let store = store();
        let mut shop = workshop(&store);
        shop.ledger_mut().add("Iron Ore", 1).unwrap();
        shop.queue_mut().enqueue("Iron Sword");
        shop.queue_mut().enqueue("Iron Sword");

        let outcomes = shop.drain_queue();
        assert!(outcomes[0].is_crafted());
        assert!(!outcomes[1].is_crafted());
    }

    #[test]
    fn test_unknown_item_is_dropped() {
        let store = store();
        let mut shop = workshop(&store);
        shop.queue_mut().enqueue("Bone Club");
        let outcomes = shop.drain_queue();
        assert_eq!(outcomes, vec![CraftOutcome::Unknown { item: "Bone Club".to_string() }]);
    }

    #[test]
    fn test_drain_is_reentrant() {
        let store = store();
        let mut shop = workshop(&store);
        assert!(shop.drain_queue().is_empty());
        assert_eq!(shop.craft_one(), None);

        shop.ledger_mut().add("Iron Ore", 2).unwrap();
        shop.queue_mut().enqueue("Iron Sword");
        assert_eq!(shop.drain_queue().len(), 1);
        shop.queue_mut().enqueue("Iron Sword");
        assert_eq!(shop.drain_queue().len(), 1);
        assert_eq!(shop.history().len(), 2);

        let (ledger, queue, history) = shop.into_parts();
        assert!(ledger.is_empty());
        assert!(queue.is_empty());
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_oversized_recipe_does_not_stop_the_drain() {
        let mut store = store();
        store.insert(
            "Big Horn",
            vec![Requirement::new(u32::MAX, "Iron Ore"), Requirement::new(2, "Iron Ore")],
        );
        let mut shop = workshop(&store);
        shop.ledger_mut().add("Iron Ore", 1).unwrap();
        shop.queue_mut().enqueue("Big Horn");
        shop.queue_mut().enqueue("Iron Sword");

        let outcomes = shop.drain_queue();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(
            outcomes[0],
            CraftOutcome::Failed {
                item: "Big Horn".to_string(),
                shortfall: Shortfall::from([("Iron Ore".to_string(), u32::MAX - 1)]),
            }
        );
        assert!(outcomes[1].is_crafted());
        assert!(shop.queue().is_empty());
        assert!(shop.ledger().is_empty());
    }

    #[test]
    fn test_consume_is_all_or_nothing() {
        let mut ledger = Ledger::new();
        ledger.add("Iron Ore", 1).unwrap();
        ledger.add("Earth Crystal", 3).unwrap();

        // repeated material: the second deduction fails after the first succeeded
        let err = consume(
            &ledger,
            &[
                Requirement::new(2, "Earth Crystal"),
                Requirement::new(1, "Iron Ore"),
                Requirement::new(1, "Iron Ore"),
            ],
        )
        .unwrap_err();
        assert_eq!(shortfall_of(err), Shortfall::from([("Iron Ore".to_string(), 1)]));
        assert_eq!(ledger.get("Earth Crystal"), 3);
        assert_eq!(ledger.get("Iron Ore"), 1);

        let next = consume(&ledger, &[Requirement::new(3, "Earth Crystal")]).unwrap();
        assert_eq!(next.snapshot(), vec![("Iron Ore".to_string(), 1)]);
    }
}
