//! Conversion from normal-form mixed profiles
//!
//! A pure strategy fixes one action at every information set of its player.
//! The induced behavior probability of action `a` at information set `I` is
//! the weight of strategies that can still reach `I` and pick `a`, relative
//! to the weight of all strategies that can still reach `I`.

use crate::error::MixedError;
use crate::field::Field;
use crate::node::{GameTree, InfosetId, Node, NodeId};
use crate::profile::BehavProfile;

/// Action index per information set of one player
pub type PureStrategy = Vec<usize>;

#[derive(Debug, Clone, PartialEq)]
pub struct MixedProfile<T> {
    strategies: Vec<Vec<(PureStrategy, T)>>,
}

impl<T: Field> MixedProfile<T> {
    /// One list of weighted pure strategies per player
    pub fn new(strategies: Vec<Vec<(PureStrategy, T)>>) -> Self {
        MixedProfile { strategies }
    }

    /// Every player plays a single pure strategy
    pub fn pure(choices: Vec<PureStrategy>) -> Self {
        let strategies = choices.into_iter().map(|s| vec![(s, T::one())]).collect();
        MixedProfile { strategies }
    }

    pub fn num_players(&self) -> usize {
        self.strategies.len()
    }

    pub fn strategies(&self, player: usize) -> &[(PureStrategy, T)] {
        &self.strategies[player]
    }

    fn validate(&self, tree: &GameTree<T>) -> Result<(), MixedError> {
        if self.strategies.len() != tree.num_players() {
            return Err(MixedError::PlayerCount {
                expected: tree.num_players(),
                found: self.strategies.len(),
            });
        }
        for (pl, (player, list)) in tree.players().iter().zip(&self.strategies).enumerate() {
            for (strategy, weight) in list {
                if *weight < T::zero() {
                    return Err(MixedError::NegativeWeight(pl));
                }
                if strategy.len() != player.num_infosets() {
                    return Err(MixedError::StrategyLength {
                        player: pl,
                        expected: player.num_infosets(),
                        found: strategy.len(),
                    });
                }
                for (ix, (&action, iset)) in strategy.iter().zip(player.infosets()).enumerate() {
                    if action >= iset.num_actions() {
                        return Err(MixedError::ActionOutOfRange {
                            player: pl,
                            infoset: ix,
                            action,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Whether `strategy` agrees with every move of its own player on the path
/// from the root to `node`.
fn follows<T>(tree: &GameTree<T>, player: usize, strategy: &[usize], node: NodeId) -> bool {
    let mut here = node;
    while let Some(parent) = tree.node(here).parent() {
        if let Node::Decision { infoset, .. } = tree.node(parent) {
            if infoset.player == player && tree.branch(here) != Some(strategy[infoset.index]) {
                return false;
            }
        }
        here = parent;
    }
    true
}

impl<'g, T: Field> BehavProfile<'g, T> {
    /// Behavior profile on the full support induced by a mixed profile
    pub fn from_mixed(tree: &'g GameTree<T>, mixed: &MixedProfile<T>) -> Result<Self, MixedError> {
        mixed.validate(tree)?;
        let mut profile = BehavProfile::full(tree);
        for (id, iset) in tree.infosets() {
            let InfosetId { player, index } = id;
            let mut reaching = T::zero();
            let mut chosen = vec![T::zero(); iset.num_actions()];
            for (strategy, weight) in mixed.strategies(player) {
                let reaches = iset
                    .members()
                    .iter()
                    .any(|&m| follows(tree, player, strategy, m));
                if reaches {
                    reaching += weight.clone();
                    chosen[strategy[index]] += weight.clone();
                }
            }
            if reaching.is_zero() {
                // centroid already holds the uniform distribution
                continue;
            }
            for (a, w) in chosen.into_iter().enumerate() {
                profile[id.action(a)] = w / reaching.clone();
            }
        }
        Ok(profile)
    }
}
