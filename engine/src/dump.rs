//! Text output for profiles and assessments

use crate::assessment::BehavAssessment;
use crate::field::Field;
use crate::profile::BehavProfile;
use std::fmt::{self, Write};

fn list<T: fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl<'g, T: Field> fmt::Display for BehavProfile<'g, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", list(self.probs()))
    }
}

impl<'g, T: Field> BehavProfile<'g, T> {
    /// Write the probabilities followed by every cached quantity.
    ///
    /// Nodes are listed by id; information sets and actions in
    /// (player, infoset, action) order.
    pub fn dump(&self, out: &mut impl Write) -> fmt::Result {
        let tree = self.tree();
        writeln!(out, "profile {}", self)?;
        writeln!(out, "nodes:")?;
        for node in tree.nodes() {
            let id = node.id();
            writeln!(
                out,
                "  #{:<4} realiz {}  belief {}  values ({})",
                id,
                self.realiz_prob(id),
                self.belief_prob(id),
                list(self.node_value(id))
            )?;
        }
        writeln!(out, "infosets:")?;
        for (id, iset) in tree.infosets() {
            let owner = tree.players()[id.player].name();
            writeln!(
                out,
                "  {} {} [{}]  prob {}  value {}",
                id,
                owner,
                iset.label(),
                self.infoset_prob(id),
                self.infoset_value(id)
            )?;
            for (a, label) in iset.actions().iter().enumerate() {
                let action = id.action(a);
                let marker = if self.support().contains(action) { ' ' } else { '-' };
                writeln!(
                    out,
                    "    {}{:<8} prob {}  value {}  regret {}",
                    marker,
                    label,
                    self.action_prob(action),
                    self.action_value(action),
                    self.regret(action)
                )?;
            }
        }
        Ok(())
    }
}

impl<'g, T: Field> BehavAssessment<'g, T> {
    /// Profile dump followed by the belief overrides
    pub fn dump(&self, out: &mut impl Write) -> fmt::Result {
        self.profile().dump(out)?;
        writeln!(out, "belief overrides:")?;
        for (node, belief) in self.overrides().iter().enumerate() {
            if let Some(b) = belief {
                writeln!(out, "  #{:<4} {}", node, b)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::ActionId;
    use crate::support::Support;
    use crate::test_tree::{build_one_shot_tree, build_poker_tree};

    #[test]
    fn test_display_lists_probabilities() {
        let tree = build_one_shot_tree();
        let profile = BehavProfile::from_probs(&tree, vec![0.25, 0.75]).unwrap();
        assert_eq!(profile.to_string(), "(0.25, 0.75)");
    }

    #[test]
    fn test_dump_contains_cache() {
        let tree = build_one_shot_tree();
        let profile = BehavProfile::full(&tree);
        let mut out = String::new();
        profile.dump(&mut out).unwrap();
        assert!(out.starts_with("profile (0.5, 0.5)\n"));
        assert!(out.contains("values (0.5, 0.5)"));
        assert!(out.contains("(0,0) Alice [root]  prob 1  value 0.5"));
        assert!(out.contains("regret 1"));
        assert_eq!(out.lines().count(), 1 + 1 + 3 + 1 + 1 + 2);
    }

    #[test]
    fn test_dump_marks_excluded_actions() {
        let tree = build_poker_tree();
        let mut support = Support::full(&tree);
        support.remove(ActionId::new(1, 0, 1)).unwrap();
        let profile = BehavProfile::new(&tree, support).unwrap();
        let mut out = String::new();
        profile.dump(&mut out).unwrap();
        assert!(out.contains("    -Fold"));
        assert!(out.contains("     Call"));
    }

    #[test]
    fn test_assessment_dump_lists_overrides() {
        let tree = build_poker_tree();
        let mut assessment = BehavAssessment::new(BehavProfile::full(&tree));
        assessment.set_belief(5, 0.125).unwrap();
        let mut out = String::new();
        assessment.dump(&mut out).unwrap();
        let tail = out.split("belief overrides:\n").nth(1).unwrap();
        assert_eq!(tail.trim(), "#5    0.125");
    }
}
