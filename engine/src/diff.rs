//! Sensitivities with respect to a single action probability
//!
//! All three accessors differentiate the cached quantities with respect to
//! the probability of `opp`, holding every other probability fixed. They
//! assume perfect recall: an information set occurs at most once on any
//! path from the root. An action outside the support, or the only action
//! left at its information set, has a constant probability, so every
//! derivative with respect to it is zero.

use crate::field::Field;
use crate::node::{ActionId, Node, NodeId};
use crate::profile::BehavProfile;

impl<'g, T: Field> BehavProfile<'g, T> {
    /// Whether the probability of `opp` is read from its stored slot
    fn is_free(&self, opp: ActionId) -> bool {
        self.index().slot(opp).is_some() && self.support().num_actions(opp.infoset) > 1
    }

    /// Derivative of the realization probability of `node`.
    ///
    /// The product of edge weights along the root path with the edge `opp`
    /// left out, or zero when `opp` is not on that path.
    pub fn diff_realiz_prob(&self, node: NodeId, opp: ActionId) -> T {
        if !self.is_free(opp) {
            return T::zero();
        }
        let tree = self.tree();
        let mut product = T::one();
        let mut on_path = false;
        let mut here = node;
        while let Some(parent) = tree.node(here).parent() {
            let branch = tree.branch(here).unwrap_or_default();
            if tree.node(parent).infoset() == Some(opp.infoset) && branch == opp.index {
                on_path = true;
            } else {
                product *= self.edge_prob(parent, branch);
            }
            here = parent;
        }
        if on_path {
            product
        } else {
            T::zero()
        }
    }

    /// Derivative of `player`'s expected payoff conditional on reaching `node`.
    pub fn diff_node_value(&self, node: NodeId, player: usize, opp: ActionId) -> T {
        if !self.is_free(opp) {
            return T::zero();
        }
        let tree = self.tree();
        let mut total = T::zero();
        let mut stack = vec![(node, T::one())];
        while let Some((id, weight)) = stack.pop() {
            match tree.node(id) {
                Node::Terminal { .. } => {}
                Node::Decision {
                    infoset, children, ..
                } if *infoset == opp.infoset => {
                    let child = children[opp.index];
                    total += weight * self.node_value(child)[player].clone();
                }
                node => {
                    for (b, &child) in node.children().iter().enumerate() {
                        let w = self.edge_prob(id, b);
                        if !w.is_zero() {
                            stack.push((child, weight.clone() * w));
                        }
                    }
                }
            }
        }
        total
    }

    /// Derivative of the value of `action` to its owner.
    ///
    /// Zero when the information set of `action` is reached with
    /// probability zero.
    pub fn diff_action_value(&self, action: ActionId, opp: ActionId) -> T {
        if !self.is_free(opp) {
            return T::zero();
        }
        let tree = self.tree();
        let Some(iset) = tree.infoset(action.infoset) else {
            return T::zero();
        };
        let reach = self.infoset_prob(action.infoset);
        if reach.is_zero() {
            return T::zero();
        }
        let player = action.player();
        let value = self.action_value(action);
        let mut total = T::zero();
        for &member in iset.members() {
            let child = tree.child(member, action.index);
            let child_value = self.node_value(child)[player].clone();
            total += self.diff_realiz_prob(member, opp) * (child_value - value.clone());
            total += self.realiz_prob(member) * self.diff_node_value(child, player, opp);
        }
        total / reach
    }
}

#[cfg(test)]
mod tests {
    use crate::field::tests::Frac;
    use crate::field::Field;
    use crate::node::ActionId;
    use crate::profile::BehavProfile;
    use crate::support::Support;
    use crate::test_tree::{build_poker_tree, build_poker_tree_in};

    const PROBS: [f64; 6] = [0.8, 0.2, 0.3, 0.7, 0.6, 0.4];

    /// Forward difference of `f` after moving the probability of `opp` by `h`
    fn finite_difference(opp: ActionId, h: f64, f: impl Fn(&BehavProfile<f64>) -> f64) -> f64 {
        let tree = build_poker_tree();
        let mut profile = BehavProfile::from_probs(&tree, PROBS.to_vec()).unwrap();
        let before = f(&profile);
        let p = profile[opp];
        profile.set(opp, p + h).unwrap();
        (f(&profile) - before) / h
    }

    #[test]
    fn test_diff_realiz_prob_drops_the_edge() {
        let tree = build_poker_tree();
        let profile = BehavProfile::from_probs(&tree, PROBS.to_vec()).unwrap();
        let low_bet = ActionId::new(0, 1, 0);
        let call = ActionId::new(1, 0, 0);
        // path to 9: chance 1/2, low bet 0.3, call 0.6
        assert!((profile.diff_realiz_prob(9, low_bet) - 0.5 * 0.6).abs() < 1e-12);
        assert!((profile.diff_realiz_prob(9, call) - 0.5 * 0.3).abs() < 1e-12);
        // not on the path
        assert_eq!(profile.diff_realiz_prob(7, low_bet), 0.0);
        assert_eq!(profile.diff_realiz_prob(0, call), 0.0);
    }

    #[test]
    fn test_diff_realiz_prob_matches_finite_difference() {
        let opp = ActionId::new(0, 0, 0);
        let tree = build_poker_tree();
        let profile = BehavProfile::from_probs(&tree, PROBS.to_vec()).unwrap();
        for node in [3, 7, 8, 9] {
            let numeric = finite_difference(opp, 1e-6, |p| p.realiz_prob(node));
            assert!((profile.diff_realiz_prob(node, opp) - numeric).abs() < 1e-6, "node {}", node);
        }
    }

    #[test]
    fn test_diff_node_value_matches_finite_difference() {
        let tree = build_poker_tree();
        let profile = BehavProfile::from_probs(&tree, PROBS.to_vec()).unwrap();
        for opp in tree.actions() {
            for player in 0..2 {
                let numeric = finite_difference(opp, 1e-6, |p| p.node_value(0)[player]);
                let exact = profile.diff_node_value(0, player, opp);
                assert!((exact - numeric).abs() < 1e-6, "{} player {}", opp, player);
            }
        }
    }

    #[test]
    fn test_diff_action_value_matches_finite_difference() {
        let tree = build_poker_tree();
        let profile = BehavProfile::from_probs(&tree, PROBS.to_vec()).unwrap();
        let call = ActionId::new(1, 0, 0);
        for opp in tree.actions() {
            let numeric = finite_difference(opp, 1e-7, |p| p.action_value(call));
            let exact = profile.diff_action_value(call, opp);
            assert!((exact - numeric).abs() < 1e-5, "{}: {} vs {}", opp, exact, numeric);
        }
    }

    #[test]
    fn test_diff_action_value_unreached_is_zero() {
        let tree = build_poker_tree_in::<Frac>();
        let mut profile = BehavProfile::full(&tree);
        profile.set(ActionId::new(0, 0, 0), Frac::zero()).unwrap();
        profile.set(ActionId::new(0, 1, 0), Frac::zero()).unwrap();
        let call = ActionId::new(1, 0, 0);
        assert_eq!(profile.diff_action_value(call, ActionId::new(0, 0, 0)), Frac::zero());
    }

    #[test]
    fn test_diff_action_value_exact() {
        let tree = build_poker_tree_in::<Frac>();
        let profile = BehavProfile::full(&tree);
        // Bob's call is worth (b_h * -2 + b_l * 2) / (b_h + b_l) with b = 1/2:
        // d/db_l = 4 b_h / (b_h + b_l)^2 = 2
        let call = ActionId::new(1, 0, 0);
        assert_eq!(profile.diff_action_value(call, ActionId::new(0, 1, 0)), Frac::int(2));
        assert_eq!(profile.diff_action_value(call, ActionId::new(0, 0, 0)), Frac::int(-2));
        assert_eq!(profile.diff_action_value(call, call), Frac::zero());
    }

    /// Poker with the high Check and Bob's Fold removed: high Bet is the
    /// only action left at its information set and Fold is unavailable
    fn restricted_profile(tree: &crate::node::GameTree<f64>) -> BehavProfile<'_, f64> {
        let mut support = Support::full(tree);
        support.remove(ActionId::new(0, 0, 1)).unwrap();
        support.remove(ActionId::new(1, 0, 1)).unwrap();
        BehavProfile::new(tree, support).unwrap()
    }

    #[test]
    fn test_diff_constant_actions_are_zero() {
        let tree = build_poker_tree();
        let profile = restricted_profile(&tree);
        let bet_high = ActionId::new(0, 0, 0);
        let fold = ActionId::new(1, 0, 1);
        let call = ActionId::new(1, 0, 0);
        assert_eq!(profile.diff_realiz_prob(3, bet_high), 0.0);
        assert_eq!(profile.diff_node_value(0, 0, bet_high), 0.0);
        assert_eq!(profile.diff_action_value(call, bet_high), 0.0);
        assert_eq!(profile.realiz_prob(8), 0.0);
        assert_eq!(profile.diff_realiz_prob(8, fold), 0.0);
        assert_eq!(profile.diff_node_value(0, 0, fold), 0.0);
        assert_eq!(profile.diff_action_value(call, fold), 0.0);
    }

    #[test]
    fn test_diff_restricted_support_matches_finite_difference() {
        let tree = build_poker_tree();
        let profile = restricted_profile(&tree);
        let low_bet = ActionId::new(0, 1, 0);
        // chance 1/2, Bob's lone Call weighs 1
        assert!((profile.diff_realiz_prob(9, low_bet) - 0.5).abs() < 1e-12);
        for opp in tree.actions() {
            let h = 1e-6;
            let mut moved = profile.clone();
            let p = moved.get(opp).copied().unwrap_or(0.0);
            // slots outside the support cannot be written
            if moved.set(opp, p + h).is_err() {
                assert_eq!(profile.diff_node_value(0, 0, opp), 0.0, "{}", opp);
                continue;
            }
            for node in [3, 5, 9] {
                let numeric = (moved.realiz_prob(node) - profile.realiz_prob(node)) / h;
                let exact = profile.diff_realiz_prob(node, opp);
                assert!((exact - numeric).abs() < 1e-6, "{} node {}", opp, node);
            }
            for player in 0..2 {
                let numeric = (moved.node_value(0)[player] - profile.node_value(0)[player]) / h;
                let exact = profile.diff_node_value(0, player, opp);
                assert!((exact - numeric).abs() < 1e-6, "{} player {}", opp, player);
            }
        }
    }
}
