//! Scalar equilibrium measures
//!
//! Each of these is zero at a Nash equilibrium (or at a quantal response
//! equilibrium for the QRE value) and grows with the distance from one.

use crate::error::ProfileError;
use crate::field::Field;
use crate::node::InfosetId;
use crate::profile::BehavProfile;

/// Result of a quantal response evaluation.
///
/// When `overflow` is set, an exponential could not be represented and
/// `value` holds only the terms summed before that happened.
#[derive(Debug, Clone, PartialEq)]
pub struct QreValue<T> {
    pub value: T,
    pub overflow: bool,
}

fn square<T: Field>(x: T) -> T {
    x.clone() * x
}

impl<'g, T: Field> BehavProfile<'g, T> {
    /// Expected payoff of `player` at the root
    pub fn payoff(&self, player: usize) -> T {
        self.node_value(self.tree().root())[player].clone()
    }

    /// Largest gain any player can make by switching at one information set,
    /// weighted by the probability of reaching it.
    pub fn max_regret(&self) -> T {
        let mut worst = T::zero();
        for (id, _) in self.tree().infosets() {
            let Some(best) = self.best_available_value(id) else {
                continue;
            };
            let gain = self.infoset_prob(id) * (best - self.infoset_value(id));
            worst = worst.max_of(gain);
        }
        worst
    }

    /// Least-squares distance from equilibrium: simplex violations, negative
    /// probabilities and profitable deviations, weighted 100, 10000 and 1.
    pub fn liap_value(&self) -> T {
        let hundred = T::from_usize(100);
        let ten_thousand = T::from_usize(10_000);
        let mut total = T::zero();
        for (id, _) in self.tree().infosets() {
            let range = self.index().range(id);
            let value = self.infoset_value(id);
            let mut sum = T::zero();
            for slot in range {
                let p = self.probs()[slot].clone();
                let gain = self.action_value(self.index().actions()[slot]) - value.clone();
                total += ten_thousand.clone() * square(p.clone().min_of(T::zero()));
                total += square(gain.max_of(T::zero()));
                sum += p;
            }
            total += hundred.clone() * square(sum - T::one());
        }
        total
    }

    /// Distance from the logit response at the same `lambda` for every player
    pub fn qre_value(&self, lambda: T) -> QreValue<T> {
        self.qre_with(|_| lambda.clone())
    }

    /// Distance from the logit response with one `lambda` per player
    pub fn qre_value_by_player(&self, lambdas: &[T]) -> Result<QreValue<T>, ProfileError> {
        if lambdas.len() != self.tree().num_players() {
            return Err(ProfileError::LengthMismatch {
                expected: self.tree().num_players(),
                found: lambdas.len(),
            });
        }
        Ok(self.qre_with(|player| lambdas[player].clone()))
    }

    fn qre_with(&self, lambda: impl Fn(usize) -> T) -> QreValue<T> {
        let mut value = T::zero();
        for (id, _) in self.tree().infosets() {
            let Some(best) = self.best_available_value(id) else {
                continue;
            };
            let scale = lambda(id.player);
            let range = self.index().range(id);
            let mut weights = Vec::with_capacity(range.len());
            for slot in range.clone() {
                let gap = self.action_value(self.index().actions()[slot]) - best.clone();
                let exponent = scale.clone() * gap;
                let weight = if exponent.is_zero() {
                    Some(T::one())
                } else {
                    exponent.exp()
                };
                match weight {
                    Some(w) => weights.push(w),
                    None => {
                        log::warn!(
                            "logit weight at information set {} is not representable (lambda {})",
                            id,
                            scale
                        );
                        return QreValue {
                            value,
                            overflow: true,
                        };
                    }
                }
            }
            let total = weights.iter().fold(T::zero(), |acc, w| acc + w.clone());
            for (slot, w) in range.zip(weights) {
                value += square(w / total.clone() - self.probs()[slot].clone());
            }
        }
        QreValue {
            value,
            overflow: false,
        }
    }

    fn best_available_value(&self, id: InfosetId) -> Option<T> {
        self.support()
            .actions(id)
            .iter()
            .map(|&a| self.action_value(id.action(a)))
            .reduce(T::max_of)
    }
}
