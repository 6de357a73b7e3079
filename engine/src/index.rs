//! Slot table for behavior profiles
//!
//! Maps (player, infoset, action) to a position in the flat probability
//! vector. Built once per support; slots of one information set are
//! contiguous and ordered like the support.

use crate::node::{ActionId, GameTree, InfosetId};
use crate::support::Support;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileIndex {
    /// slots[player][infoset][tree action] = slot of an available action
    slots: Vec<Vec<Vec<Option<usize>>>>,
    /// ranges[player][infoset] = slots of that information set
    ranges: Vec<Vec<Range<usize>>>,
    /// slot -> action
    actions: Vec<ActionId>,
}

impl ProfileIndex {
    /// `support` must conform to `tree`.
    pub fn new<T>(tree: &GameTree<T>, support: &Support) -> Self {
        let mut slots = Vec::with_capacity(tree.num_players());
        let mut ranges = Vec::with_capacity(tree.num_players());
        let mut actions = Vec::with_capacity(support.len());
        for (pl, player) in tree.players().iter().enumerate() {
            let mut player_slots = Vec::with_capacity(player.num_infosets());
            let mut player_ranges = Vec::with_capacity(player.num_infosets());
            for (ix, iset) in player.infosets().iter().enumerate() {
                let id = InfosetId::new(pl, ix);
                let start = actions.len();
                let mut table = vec![None; iset.num_actions()];
                for &a in support.actions(id) {
                    table[a] = Some(actions.len());
                    actions.push(id.action(a));
                }
                player_slots.push(table);
                player_ranges.push(start..actions.len());
            }
            slots.push(player_slots);
            ranges.push(player_ranges);
        }
        ProfileIndex {
            slots,
            ranges,
            actions,
        }
    }

    /// Slot of `action`, None when it is unknown or outside the support
    pub fn slot(&self, action: ActionId) -> Option<usize> {
        *self
            .slots
            .get(action.infoset.player)?
            .get(action.infoset.index)?
            .get(action.index)?
    }

    /// Action stored at `slot`
    pub fn action(&self, slot: usize) -> Option<ActionId> {
        self.actions.get(slot).copied()
    }

    /// Slots of the available actions of `infoset`
    pub fn range(&self, infoset: InfosetId) -> Range<usize> {
        self.ranges
            .get(infoset.player)
            .and_then(|p| p.get(infoset.index))
            .cloned()
            .unwrap_or(0..0)
    }

    /// Slot -> action table, in (player, infoset, action) order
    pub fn actions(&self) -> &[ActionId] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_tree::build_poker_tree;

    #[test]
    fn test_full_support_slots_are_dense() {
        let tree = build_poker_tree();
        let index = ProfileIndex::new(&tree, &Support::full(&tree));
        assert_eq!(index.len(), 6);
        for (slot, action) in tree.actions().enumerate() {
            assert_eq!(index.slot(action), Some(slot));
            assert_eq!(index.action(slot), Some(action));
        }
        assert_eq!(index.range(InfosetId::new(1, 0)), 4..6);
    }

    #[test]
    fn test_restricted_support_skips_actions() {
        let tree = build_poker_tree();
        let mut support = Support::full(&tree);
        support.remove(ActionId::new(0, 0, 1)).unwrap();
        let index = ProfileIndex::new(&tree, &support);
        assert_eq!(index.len(), 5);
        assert_eq!(index.slot(ActionId::new(0, 0, 1)), None);
        assert_eq!(index.slot(ActionId::new(0, 1, 0)), Some(1));
        assert_eq!(index.range(InfosetId::new(0, 0)), 0..1);
    }

    #[test]
    fn test_unknown_lookups() {
        let tree = build_poker_tree();
        let index = ProfileIndex::new(&tree, &Support::full(&tree));
        assert_eq!(index.slot(ActionId::new(3, 0, 0)), None);
        assert_eq!(index.action(99), None);
        assert_eq!(index.range(InfosetId::new(0, 7)), 0..0);
    }
}
