//! Assessments: a behavior profile paired with explicit beliefs
//!
//! Beliefs set on individual nodes replace the ones derived from realization
//! probabilities. Realization probabilities and node values are untouched;
//! only the belief-weighted aggregates change.

use crate::cache::Aggregates;
use crate::error::ProfileError;
use crate::field::Field;
use crate::node::{ActionId, InfosetId, NodeId};
use crate::profile::BehavProfile;

#[derive(Debug, Clone)]
pub struct BehavAssessment<'g, T: Field> {
    profile: BehavProfile<'g, T>,
    overrides: Vec<Option<T>>,
}

/// Conditional payoffs computed under assessment beliefs
#[derive(Debug, Clone)]
pub struct CondPayoff<T> {
    infoset_probs: Vec<Vec<T>>,
    aggregates: Aggregates<T>,
}

impl<T: Field> CondPayoff<T> {
    pub fn infoset_prob(&self, id: InfosetId) -> T {
        self.infoset_probs[id.player][id.index].clone()
    }

    pub fn infoset_value(&self, id: InfosetId) -> T {
        self.aggregates.infoset_values[id.player][id.index].clone()
    }

    pub fn action_value(&self, action: ActionId) -> T {
        let id = action.infoset;
        self.aggregates.action_values[id.player][id.index][action.index].clone()
    }

    pub fn regret(&self, action: ActionId) -> T {
        let id = action.infoset;
        self.aggregates.regrets[id.player][id.index][action.index].clone()
    }
}

impl<'g, T: Field> BehavAssessment<'g, T> {
    /// Assessment without overrides; every belief is derived from `profile`.
    pub fn new(profile: BehavProfile<'g, T>) -> Self {
        let overrides = vec![None; profile.tree().len()];
        BehavAssessment { profile, overrides }
    }

    pub fn profile(&self) -> &BehavProfile<'g, T> {
        &self.profile
    }

    /// Mutable access to the profile; overrides are kept.
    pub fn profile_mut(&mut self) -> &mut BehavProfile<'g, T> {
        &mut self.profile
    }

    pub fn into_profile(self) -> BehavProfile<'g, T> {
        self.profile
    }

    pub fn is_assessment(&self) -> bool {
        true
    }

    pub fn set_belief(&mut self, node: NodeId, belief: T) -> Result<(), ProfileError> {
        let slot = self
            .overrides
            .get_mut(node as usize)
            .ok_or(ProfileError::UnknownNode(node))?;
        *slot = Some(belief);
        Ok(())
    }

    pub fn clear_belief(&mut self, node: NodeId) -> Result<(), ProfileError> {
        let slot = self
            .overrides
            .get_mut(node as usize)
            .ok_or(ProfileError::UnknownNode(node))?;
        *slot = None;
        Ok(())
    }

    pub fn is_overridden(&self, node: NodeId) -> bool {
        matches!(self.overrides.get(node as usize), Some(Some(_)))
    }

    /// Override if set, derived belief otherwise
    pub fn belief(&self, node: NodeId) -> T {
        match &self.overrides[node as usize] {
            Some(b) => b.clone(),
            None => self.profile.belief_prob(node),
        }
    }

    pub fn beliefs(&self) -> Vec<T> {
        (0..self.overrides.len() as NodeId)
            .map(|node| self.belief(node))
            .collect()
    }

    pub(crate) fn overrides(&self) -> &[Option<T>] {
        &self.overrides
    }

    /// Information-set and action values weighted by the assessment beliefs
    pub fn cond_payoff(&self) -> CondPayoff<T> {
        let cache = self.profile.cache();
        let aggregates = Aggregates::compute(
            self.profile.tree(),
            self.profile.support(),
            &cache.node_values,
            |node| self.belief(node),
        );
        CondPayoff {
            infoset_probs: cache.infoset_probs.clone(),
            aggregates,
        }
    }
}
