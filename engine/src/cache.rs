//! Derived quantities of a behavior profile
//!
//! Everything here is a pure function of (tree, support, probabilities).
//! `Cache::compute` runs two passes over the tree's precomputed preorder:
//!
//! 1. root to leaves: realization probabilities, then beliefs
//! 2. leaves to root: per-player node values, then information-set values,
//!    action values and regrets
//!
//! The profile holds the result in a `OnceCell`, so a cache is either
//! complete or absent.

use crate::field::Field;
use crate::node::{GameTree, InfosetId, Node, NodeId};
use crate::profile::BehavProfile;
use crate::support::Support;

#[derive(Debug, Clone)]
pub(crate) struct Cache<T> {
    /// Realization probability per node
    pub(crate) realiz: Vec<T>,
    /// Belief per node (realization normalized within the information set)
    pub(crate) beliefs: Vec<T>,
    /// Node values, flattened `node * num_players + player`
    pub(crate) node_values: Vec<T>,
    pub(crate) num_players: usize,
    /// Realization probability per information set, `[player][infoset]`
    pub(crate) infoset_probs: Vec<Vec<T>>,
    pub(crate) aggregates: Aggregates<T>,
}

/// Belief-weighted quantities at information sets and actions
#[derive(Debug, Clone)]
pub(crate) struct Aggregates<T> {
    /// Owner's expected value per information set, `[player][infoset]`
    pub(crate) infoset_values: Vec<Vec<T>>,
    /// Owner's expected value per tree action, `[player][infoset][action]`
    pub(crate) action_values: Vec<Vec<Vec<T>>>,
    /// Best available action value minus action value; zero off the support
    pub(crate) regrets: Vec<Vec<Vec<T>>>,
}

impl<T: Field> Cache<T> {
    pub(crate) fn compute(profile: &BehavProfile<'_, T>) -> Self {
        let tree = profile.tree();
        let n = tree.len();
        let np = tree.num_players();
        log::debug!(
            "recomputing profile cache: {} nodes, {} probabilities",
            n,
            profile.len()
        );

        // Pass 1: realization probabilities, parents before children
        let mut realiz = vec![T::zero(); n];
        realiz[tree.root() as usize] = T::one();
        for &id in tree.preorder() {
            let here = realiz[id as usize].clone();
            for (b, &child) in tree.node(id).children().iter().enumerate() {
                realiz[child as usize] = here.clone() * profile.edge_prob(id, b);
            }
        }

        let infoset_probs: Vec<Vec<T>> = tree
            .players()
            .iter()
            .map(|player| {
                player
                    .infosets()
                    .iter()
                    .map(|iset| {
                        iset.members()
                            .iter()
                            .fold(T::zero(), |acc, &m| acc + realiz[m as usize].clone())
                    })
                    .collect()
            })
            .collect();

        let beliefs = tree
            .nodes()
            .iter()
            .map(|node| {
                let own = realiz[node.id() as usize].clone();
                let total = match node.infoset() {
                    Some(id) => infoset_probs[id.player][id.index].clone(),
                    None => own.clone(),
                };
                if total.is_zero() {
                    T::zero()
                } else {
                    own / total
                }
            })
            .collect::<Vec<_>>();

        // Pass 2: node values, children before parents
        let mut node_values = vec![T::zero(); n * np];
        for &id in tree.preorder().iter().rev() {
            let base = id as usize * np;
            match tree.node(id) {
                Node::Terminal { payoffs, .. } => {
                    node_values[base..base + np].clone_from_slice(payoffs);
                }
                node => {
                    for (b, &child) in node.children().iter().enumerate() {
                        let weight = profile.edge_prob(id, b);
                        if weight.is_zero() {
                            continue;
                        }
                        let from = child as usize * np;
                        for pl in 0..np {
                            let v = node_values[from + pl].clone();
                            node_values[base + pl] += weight.clone() * v;
                        }
                    }
                }
            }
        }

        let aggregates = Aggregates::compute(tree, profile.support(), &node_values, |node| {
            beliefs[node as usize].clone()
        });

        Cache {
            realiz,
            beliefs,
            node_values,
            num_players: np,
            infoset_probs,
            aggregates,
        }
    }

    pub(crate) fn node_value(&self, node: NodeId) -> &[T] {
        let base = node as usize * self.num_players;
        &self.node_values[base..base + self.num_players]
    }

    pub(crate) fn infoset_prob(&self, id: InfosetId) -> &T {
        &self.infoset_probs[id.player][id.index]
    }
}

impl<T: Field> Aggregates<T> {
    /// Weighted sums over information-set members using `belief`.
    ///
    /// Shared by the profile cache (derived beliefs) and assessments
    /// (overridden beliefs); node values do not depend on beliefs.
    pub(crate) fn compute(
        tree: &GameTree<T>,
        support: &Support,
        node_values: &[T],
        belief: impl Fn(NodeId) -> T,
    ) -> Self {
        let np = tree.num_players();
        let value = |node: NodeId, player: usize| node_values[node as usize * np + player].clone();

        let mut infoset_values = Vec::with_capacity(np);
        let mut action_values = Vec::with_capacity(np);
        let mut regrets = Vec::with_capacity(np);
        for (pl, player) in tree.players().iter().enumerate() {
            let mut isv = Vec::with_capacity(player.num_infosets());
            let mut acv = Vec::with_capacity(player.num_infosets());
            let mut reg = Vec::with_capacity(player.num_infosets());
            for (ix, iset) in player.infosets().iter().enumerate() {
                let mut here = T::zero();
                let mut actions = vec![T::zero(); iset.num_actions()];
                for &member in iset.members() {
                    let b = belief(member);
                    if b.is_zero() {
                        continue;
                    }
                    here += b.clone() * value(member, pl);
                    for (a, &child) in tree.node(member).children().iter().enumerate() {
                        actions[a] += b.clone() * value(child, pl);
                    }
                }

                let available = support.actions(InfosetId::new(pl, ix));
                let best = available
                    .iter()
                    .map(|&a| actions[a].clone())
                    .reduce(T::max_of)
                    .unwrap_or_else(T::zero);
                let mut gaps = vec![T::zero(); iset.num_actions()];
                for &a in available {
                    gaps[a] = best.clone() - actions[a].clone();
                }
                log::trace!("infoset ({},{}) value {} best action {}", pl, ix, here, best);

                isv.push(here);
                acv.push(actions);
                reg.push(gaps);
            }
            infoset_values.push(isv);
            action_values.push(acv);
            regrets.push(reg);
        }

        Aggregates {
            infoset_values,
            action_values,
            regrets,
        }
    }
}
