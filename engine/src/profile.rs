//! Behavior profiles
//!
//! A `BehavProfile` stores one probability per available action, flat and in
//! (player, infoset, action) order, and borrows the tree it was made for.
//! Derived quantities live in a lazily filled cache; every write through
//! `&mut self` drops the cache, every read of a derived quantity fills it.
//! The read-only index operators never trigger computation.

use crate::cache::Cache;
use crate::error::ProfileError;
use crate::field::Field;
use crate::index::ProfileIndex;
use crate::node::{ActionId, GameTree, InfosetId, Node, NodeId};
use crate::support::Support;
use std::cell::OnceCell;
use std::fmt;
use std::ops::{AddAssign, Index, IndexMut, MulAssign, SubAssign};

pub struct BehavProfile<'g, T> {
    tree: &'g GameTree<T>,
    support: Support,
    index: ProfileIndex,
    probs: Vec<T>,
    cache: OnceCell<Cache<T>>,
}

impl<'g, T: Field> BehavProfile<'g, T> {
    /// Centroid profile on `support`
    pub fn new(tree: &'g GameTree<T>, support: Support) -> Result<Self, ProfileError> {
        support.conforms(tree)?;
        let index = ProfileIndex::new(tree, &support);
        let mut profile = BehavProfile {
            tree,
            probs: vec![T::zero(); index.len()],
            support,
            index,
            cache: OnceCell::new(),
        };
        profile.centroid();
        Ok(profile)
    }

    /// Centroid profile on the full support
    pub fn full(tree: &'g GameTree<T>) -> Self {
        let support = Support::full(tree);
        let index = ProfileIndex::new(tree, &support);
        let mut profile = BehavProfile {
            tree,
            probs: vec![T::zero(); index.len()],
            support,
            index,
            cache: OnceCell::new(),
        };
        profile.centroid();
        profile
    }

    /// Full-support profile with explicit probabilities in slot order
    pub fn from_probs(tree: &'g GameTree<T>, probs: Vec<T>) -> Result<Self, ProfileError> {
        let mut profile = Self::full(tree);
        profile.assign(&probs)?;
        Ok(profile)
    }

    pub fn tree(&self) -> &'g GameTree<T> {
        self.tree
    }

    pub fn support(&self) -> &Support {
        &self.support
    }

    pub fn index(&self) -> &ProfileIndex {
        &self.index
    }

    /// Probabilities in slot order
    pub fn probs(&self) -> &[T] {
        &self.probs
    }

    pub fn len(&self) -> usize {
        self.probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    pub fn is_assessment(&self) -> bool {
        false
    }

    /// Slot of an action, distinguishing unknown actions from unsupported ones
    pub fn slot(&self, action: ActionId) -> Result<usize, ProfileError> {
        if !self.tree.contains_action(action) {
            return Err(ProfileError::UnknownAction(action));
        }
        self.index
            .slot(action)
            .ok_or(ProfileError::NotInSupport(action))
    }

    /// Stored probability of an available action
    pub fn get(&self, action: ActionId) -> Result<&T, ProfileError> {
        let slot = self.slot(action)?;
        Ok(&self.probs[slot])
    }

    /// Probability with which `action` is played: 0 outside the support,
    /// 1 when it is the only available action of its information set,
    /// the stored value otherwise.
    pub fn action_prob(&self, action: ActionId) -> T {
        match self.index.slot(action) {
            None => T::zero(),
            Some(_) if self.support.num_actions(action.infoset) == 1 => T::one(),
            Some(slot) => self.probs[slot].clone(),
        }
    }

    /// Weight of edge `branch` out of `node`: chance probability or action
    /// probability; terminal nodes have no edges.
    pub(crate) fn edge_prob(&self, node: NodeId, branch: usize) -> T {
        match self.tree.node(node) {
            Node::Decision { infoset, .. } => self.action_prob(infoset.action(branch)),
            Node::Chance { probs, .. } => probs[branch].clone(),
            Node::Terminal { .. } => T::zero(),
        }
    }

    /// Drop cached derived data
    pub fn invalidate(&mut self) {
        self.cache.take();
    }

    pub fn set(&mut self, action: ActionId, value: T) -> Result<(), ProfileError> {
        let slot = self.slot(action)?;
        self.invalidate();
        self.probs[slot] = value;
        Ok(())
    }

    /// Set the available actions of one information set, in support order
    pub fn set_infoset(&mut self, infoset: InfosetId, values: &[T]) -> Result<(), ProfileError> {
        if self.tree.infoset(infoset).is_none() {
            return Err(ProfileError::UnknownInfoset(infoset));
        }
        let range = self.index.range(infoset);
        if range.len() != values.len() {
            return Err(ProfileError::LengthMismatch {
                expected: range.len(),
                found: values.len(),
            });
        }
        self.invalidate();
        self.probs[range].clone_from_slice(values);
        Ok(())
    }

    /// Replace the whole probability vector
    pub fn assign(&mut self, values: &[T]) -> Result<(), ProfileError> {
        if values.len() != self.probs.len() {
            return Err(ProfileError::LengthMismatch {
                expected: self.probs.len(),
                found: values.len(),
            });
        }
        self.invalidate();
        self.probs.clone_from_slice(values);
        Ok(())
    }

    /// Set every probability to `value`
    pub fn fill(&mut self, value: T) {
        self.invalidate();
        self.probs.fill(value);
    }

    /// Uniform distribution over the available actions of every information set
    pub fn centroid(&mut self) {
        self.invalidate();
        for (id, _) in self.tree.infosets() {
            let range = self.index.range(id);
            if range.is_empty() {
                continue;
            }
            let uniform = T::one() / T::from_usize(range.len());
            self.probs[range].fill(uniform);
        }
    }

    pub(crate) fn cache(&self) -> &Cache<T> {
        self.cache.get_or_init(|| Cache::compute(self))
    }

    /// Probability that play reaches `node`
    pub fn realiz_prob(&self, node: NodeId) -> T {
        self.cache().realiz[node as usize].clone()
    }

    /// Probability of `node` given that its information set is reached
    pub fn belief_prob(&self, node: NodeId) -> T {
        self.cache().beliefs[node as usize].clone()
    }

    /// Beliefs of every node, indexed by node id
    pub fn beliefs(&self) -> &[T] {
        &self.cache().beliefs
    }

    /// Expected payoff of every player conditional on reaching `node`
    pub fn node_value(&self, node: NodeId) -> &[T] {
        assert!(
            (node as usize) < self.tree.len(),
            "node {} is not in the game tree",
            node
        );
        self.cache().node_value(node)
    }

    /// Probability that some member of `infoset` is reached
    pub fn infoset_prob(&self, infoset: InfosetId) -> T {
        self.cache().infoset_prob(infoset).clone()
    }

    /// Owner's expected payoff at `infoset`, weighted by beliefs
    pub fn infoset_value(&self, infoset: InfosetId) -> T {
        self.cache().aggregates.infoset_values[infoset.player][infoset.index].clone()
    }

    /// Owner's expected payoff from taking `action` at its information set
    pub fn action_value(&self, action: ActionId) -> T {
        let id = action.infoset;
        self.cache().aggregates.action_values[id.player][id.index][action.index].clone()
    }

    /// Best available action value minus the value of `action`; zero for
    /// actions outside the support
    pub fn regret(&self, action: ActionId) -> T {
        let id = action.infoset;
        self.cache().aggregates.regrets[id.player][id.index][action.index].clone()
    }
}

impl<'g, T: Field> Clone for BehavProfile<'g, T> {
    /// Copies probabilities and support; the copy starts without a cache.
    fn clone(&self) -> Self {
        BehavProfile {
            tree: self.tree,
            support: self.support.clone(),
            index: self.index.clone(),
            probs: self.probs.clone(),
            cache: OnceCell::new(),
        }
    }
}

impl<'g, T: Field> PartialEq for BehavProfile<'g, T> {
    fn eq(&self, other: &Self) -> bool {
        self.probs == other.probs
    }
}

impl<'g, T: Field> fmt::Debug for BehavProfile<'g, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehavProfile")
            .field("probs", &self.probs)
            .field("cached", &self.cache.get().is_some())
            .finish()
    }
}

impl<'g, T: Field> Index<ActionId> for BehavProfile<'g, T> {
    type Output = T;

    fn index(&self, action: ActionId) -> &T {
        match self.index.slot(action) {
            Some(slot) => &self.probs[slot],
            None => panic!("action {} is not in the support", action),
        }
    }
}

impl<'g, T: Field> IndexMut<ActionId> for BehavProfile<'g, T> {
    fn index_mut(&mut self, action: ActionId) -> &mut T {
        let Some(slot) = self.index.slot(action) else {
            panic!("action {} is not in the support", action)
        };
        self.invalidate();
        &mut self.probs[slot]
    }
}

impl<'g, T: Field> Index<usize> for BehavProfile<'g, T> {
    type Output = T;

    fn index(&self, slot: usize) -> &T {
        &self.probs[slot]
    }
}

impl<'g, T: Field> IndexMut<usize> for BehavProfile<'g, T> {
    fn index_mut(&mut self, slot: usize) -> &mut T {
        self.invalidate();
        &mut self.probs[slot]
    }
}

impl<'g, T: Field> AddAssign<&BehavProfile<'g, T>> for BehavProfile<'g, T> {
    fn add_assign(&mut self, other: &BehavProfile<'g, T>) {
        assert_eq!(self.len(), other.len(), "profiles of different shapes");
        self.invalidate();
        for (p, q) in self.probs.iter_mut().zip(&other.probs) {
            *p += q.clone();
        }
    }
}

impl<'g, T: Field> SubAssign<&BehavProfile<'g, T>> for BehavProfile<'g, T> {
    fn sub_assign(&mut self, other: &BehavProfile<'g, T>) {
        assert_eq!(self.len(), other.len(), "profiles of different shapes");
        self.invalidate();
        for (p, q) in self.probs.iter_mut().zip(&other.probs) {
            *p -= q.clone();
        }
    }
}

impl<'g, T: Field> MulAssign<T> for BehavProfile<'g, T> {
    fn mul_assign(&mut self, scale: T) {
        self.invalidate();
        for p in self.probs.iter_mut() {
            *p *= scale.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::tests::Frac;
    use crate::test_tree::{build_chance_tree, build_one_shot_tree, build_poker_tree, build_poker_tree_in};

    #[test]
    fn test_centroid_is_uniform() {
        let tree = build_poker_tree_in::<Frac>();
        let profile = BehavProfile::full(&tree);
        assert!(profile.probs().iter().all(|p| *p == Frac::new(1, 2)));
        for (id, _) in tree.infosets() {
            let sum = profile.index().range(id).fold(Frac::zero(), |acc, s| acc + profile[s]);
            assert_eq!(sum, Frac::one());
        }
    }

    #[test]
    fn test_centroid_on_restricted_support() {
        let tree = build_poker_tree();
        let mut support = Support::full(&tree);
        support.remove(ActionId::new(1, 0, 1)).unwrap();
        let profile = BehavProfile::new(&tree, support).unwrap();
        assert_eq!(profile.len(), 5);
        assert_eq!(profile[ActionId::new(1, 0, 0)], 1.0);
    }

    #[test]
    fn test_action_prob_special_cases() {
        let tree = build_poker_tree();
        let mut support = Support::full(&tree);
        support.remove(ActionId::new(0, 0, 1)).unwrap();
        let mut profile = BehavProfile::new(&tree, support).unwrap();
        // lone available action plays with certainty whatever is stored
        profile[ActionId::new(0, 0, 0)] = 0.25;
        assert_eq!(profile.action_prob(ActionId::new(0, 0, 0)), 1.0);
        // excluded action never plays
        assert_eq!(profile.action_prob(ActionId::new(0, 0, 1)), 0.0);
        profile[ActionId::new(0, 1, 0)] = 0.3;
        assert_eq!(profile.action_prob(ActionId::new(0, 1, 0)), 0.3);
    }

    #[test]
    fn test_index_read_does_not_compute() {
        let tree = build_poker_tree();
        let profile = BehavProfile::full(&tree);
        let _ = profile[ActionId::new(0, 0, 0)];
        let _ = profile[3];
        assert!(profile.cache.get().is_none());
        let _ = profile.payoff(0);
        assert!(profile.cache.get().is_some());
    }

    #[test]
    fn test_writes_invalidate() {
        let tree = build_poker_tree();
        let mut profile = BehavProfile::full(&tree);
        let _ = profile.payoff(0);
        profile[0] = 0.7;
        assert!(profile.cache.get().is_none());

        let _ = profile.payoff(0);
        profile *= 1.0;
        assert!(profile.cache.get().is_none());

        let _ = profile.payoff(0);
        profile.fill(0.5);
        assert!(profile.cache.get().is_none());
    }

    #[test]
    fn test_clone_starts_without_cache() {
        let tree = build_poker_tree();
        let profile = BehavProfile::full(&tree);
        let _ = profile.payoff(0);
        let copy = profile.clone();
        assert!(copy.cache.get().is_none());
        assert_eq!(copy, profile);
        assert_eq!(copy.support(), profile.support());
    }

    #[test]
    fn test_equality_is_componentwise() {
        let tree = build_poker_tree();
        let a = BehavProfile::full(&tree);
        let mut b = BehavProfile::full(&tree);
        assert_eq!(a, b);
        b[ActionId::new(1, 0, 0)] = 0.6;
        assert_ne!(a, b);
    }

    #[test]
    fn test_arithmetic_operators() {
        let tree = build_one_shot_tree();
        let mut a = BehavProfile::from_probs(&tree, vec![0.2, 0.8]).unwrap();
        let b = BehavProfile::from_probs(&tree, vec![0.4, 0.2]).unwrap();
        a += &b;
        assert!((a[0] - 0.6).abs() < 1e-12);
        assert!((a[1] - 1.0).abs() < 1e-12);
        a -= &b;
        a *= 2.0;
        assert!((a[0] - 0.4).abs() < 1e-12);
        assert!((a[1] - 1.6).abs() < 1e-12);
    }

    #[test]
    fn test_assign_length_mismatch() {
        let tree = build_one_shot_tree();
        let mut profile = BehavProfile::full(&tree);
        assert_eq!(
            profile.assign(&[1.0]),
            Err(ProfileError::LengthMismatch {
                expected: 2,
                found: 1
            })
        );
        assert!(BehavProfile::from_probs(&tree, vec![0.1, 0.2, 0.7]).is_err());
    }

    #[test]
    fn test_set_infoset_and_errors() {
        let tree = build_chance_tree();
        let mut profile = BehavProfile::full(&tree);
        profile.set_infoset(InfosetId::new(0, 1), &[0.1, 0.9]).unwrap();
        assert_eq!(profile[ActionId::new(0, 1, 1)], 0.9);
        assert!(matches!(
            profile.set_infoset(InfosetId::new(0, 1), &[1.0]),
            Err(ProfileError::LengthMismatch { .. })
        ));
        assert_eq!(
            profile.set_infoset(InfosetId::new(2, 0), &[1.0]),
            Err(ProfileError::UnknownInfoset(InfosetId::new(2, 0)))
        );
    }

    #[test]
    fn test_get_distinguishes_unknown_from_unsupported() {
        let tree = build_poker_tree();
        let mut support = Support::full(&tree);
        support.remove(ActionId::new(1, 0, 1)).unwrap();
        let profile = BehavProfile::new(&tree, support).unwrap();
        assert_eq!(
            profile.get(ActionId::new(1, 0, 1)),
            Err(ProfileError::NotInSupport(ActionId::new(1, 0, 1)))
        );
        assert_eq!(
            profile.get(ActionId::new(1, 0, 9)),
            Err(ProfileError::UnknownAction(ActionId::new(1, 0, 9)))
        );
    }

    #[test]
    fn test_nonconforming_support_rejected() {
        let tree = build_poker_tree();
        let other = build_one_shot_tree();
        let err = BehavProfile::new(&tree, Support::full(&other)).unwrap_err();
        assert!(matches!(err, ProfileError::SupportMismatch(_)));
    }

    #[test]
    #[should_panic(expected = "not in the support")]
    fn test_index_outside_support_panics() {
        let tree = build_poker_tree();
        let mut support = Support::full(&tree);
        support.remove(ActionId::new(1, 0, 1)).unwrap();
        let profile = BehavProfile::new(&tree, support).unwrap();
        let _ = profile[ActionId::new(1, 0, 1)];
    }
}
