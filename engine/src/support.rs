//! Action supports
//!
//! A support marks the subset of tree actions a profile may put weight on.
//! Actions outside it have no probability slot and are treated as zero.

use crate::error::ProfileError;
use crate::node::{ActionId, GameTree, InfosetId};

/// Available actions, per player and information set, as sorted tree action
/// indices. Every information set keeps at least one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Support {
    available: Vec<Vec<Vec<usize>>>,
}

impl Support {
    /// Every action of the tree
    pub fn full<T>(tree: &GameTree<T>) -> Self {
        let available = tree
            .players()
            .iter()
            .map(|player| {
                player
                    .infosets()
                    .iter()
                    .map(|iset| (0..iset.num_actions()).collect())
                    .collect()
            })
            .collect();
        Support { available }
    }

    /// Support made of exactly the listed actions
    pub fn from_actions<T>(
        tree: &GameTree<T>,
        actions: impl IntoIterator<Item = ActionId>,
    ) -> Result<Self, ProfileError> {
        let mut available: Vec<Vec<Vec<usize>>> = tree
            .players()
            .iter()
            .map(|player| vec![Vec::new(); player.num_infosets()])
            .collect();
        for action in actions {
            if !tree.contains_action(action) {
                return Err(ProfileError::UnknownAction(action));
            }
            let list = &mut available[action.infoset.player][action.infoset.index];
            if let Err(pos) = list.binary_search(&action.index) {
                list.insert(pos, action.index);
            }
        }
        let support = Support { available };
        for (id, _) in tree.infosets() {
            if support.num_actions(id) == 0 {
                return Err(ProfileError::SupportMismatch(format!(
                    "information set {} has no available action",
                    id
                )));
            }
        }
        Ok(support)
    }

    /// Drop one action; its information set must keep at least one other.
    pub fn remove(&mut self, action: ActionId) -> Result<(), ProfileError> {
        let list = self
            .available
            .get_mut(action.infoset.player)
            .and_then(|p| p.get_mut(action.infoset.index))
            .ok_or(ProfileError::UnknownAction(action))?;
        let pos = list
            .binary_search(&action.index)
            .map_err(|_| ProfileError::NotInSupport(action))?;
        if list.len() == 1 {
            return Err(ProfileError::EmptyInfoset(action));
        }
        list.remove(pos);
        Ok(())
    }

    pub fn contains(&self, action: ActionId) -> bool {
        self.find(action).is_some()
    }

    /// Position of `action` among the available actions of its information set
    pub fn find(&self, action: ActionId) -> Option<usize> {
        self.actions(action.infoset).binary_search(&action.index).ok()
    }

    /// Available tree action indices of `infoset` (empty if unknown)
    pub fn actions(&self, infoset: InfosetId) -> &[usize] {
        self.available
            .get(infoset.player)
            .and_then(|p| p.get(infoset.index))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn num_actions(&self, infoset: InfosetId) -> usize {
        self.actions(infoset).len()
    }

    pub fn num_players(&self) -> usize {
        self.available.len()
    }

    pub fn num_infosets(&self, player: usize) -> usize {
        self.available.get(player).map_or(0, Vec::len)
    }

    /// Total number of available actions
    pub fn len(&self) -> usize {
        self.available.iter().flatten().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Available actions in (player, infoset, action) order
    pub fn iter(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.available.iter().enumerate().flat_map(|(pl, isets)| {
            isets.iter().enumerate().flat_map(move |(ix, acts)| {
                acts.iter().map(move |&a| ActionId::new(pl, ix, a))
            })
        })
    }

    /// Check that this support was made for `tree`
    pub fn conforms<T>(&self, tree: &GameTree<T>) -> Result<(), ProfileError> {
        if self.available.len() != tree.num_players() {
            return Err(ProfileError::SupportMismatch(format!(
                "support has {} players, tree has {}",
                self.available.len(),
                tree.num_players()
            )));
        }
        for (pl, player) in tree.players().iter().enumerate() {
            if self.num_infosets(pl) != player.num_infosets() {
                return Err(ProfileError::SupportMismatch(format!(
                    "player {} has {} information sets in the support, {} in the tree",
                    pl,
                    self.num_infosets(pl),
                    player.num_infosets()
                )));
            }
        }
        for (id, iset) in tree.infosets() {
            let actions = self.actions(id);
            if actions.is_empty() {
                return Err(ProfileError::SupportMismatch(format!(
                    "information set {} has no available action",
                    id
                )));
            }
            if let Some(&bad) = actions.iter().find(|&&a| a >= iset.num_actions()) {
                return Err(ProfileError::UnknownAction(id.action(bad)));
            }
        }
        Ok(())
    }
}
