//! Parallel evaluation of independent profiles
//!
//! A profile's cache is not `Sync`, so profiles are handed to worker threads
//! by unique reference. Each worker fills only its own profile's cache.

use crate::field::Field;
use crate::profile::BehavProfile;
use rayon::prelude::*;

/// Liapunov value of every profile, in input order
pub fn liap_values<T>(profiles: &mut [BehavProfile<'_, T>]) -> Vec<T>
where
    T: Field + Send + Sync,
{
    log::debug!("evaluating {} Liapunov values", profiles.len());
    profiles
        .par_iter_mut()
        .map(|profile| profile.liap_value())
        .collect()
}

/// Maximum regret of every profile, in input order
pub fn max_regrets<T>(profiles: &mut [BehavProfile<'_, T>]) -> Vec<T>
where
    T: Field + Send + Sync,
{
    log::debug!("evaluating {} maximum regrets", profiles.len());
    profiles
        .par_iter_mut()
        .map(|profile| profile.max_regret())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_tree::{build_binary_tree, build_poker_tree, poker_equilibrium};

    #[test]
    fn test_batch_matches_sequential() {
        let tree = build_poker_tree();
        let mut profiles: Vec<_> = (0..16)
            .map(|i| {
                let p = i as f64 / 15.0;
                BehavProfile::from_probs(&tree, vec![p, 1.0 - p, 1.0 - p, p, 0.5, 0.5]).unwrap()
            })
            .collect();
        let expected: Vec<f64> = profiles.iter().map(|p| p.clone().liap_value()).collect();
        assert_eq!(liap_values(&mut profiles), expected);

        let expected: Vec<f64> = profiles.iter().map(|p| p.clone().max_regret()).collect();
        assert_eq!(max_regrets(&mut profiles), expected);
    }

    #[test]
    fn test_batch_fills_each_cache() {
        let tree = build_poker_tree();
        let mut profiles = vec![
            BehavProfile::full(&tree),
            BehavProfile::from_probs(&tree, poker_equilibrium()).unwrap(),
        ];
        let regrets = max_regrets(&mut profiles);
        assert!(regrets[0] > 0.0);
        assert!(regrets[1].abs() < 1e-10);
    }

    #[test]
    fn test_batch_on_larger_tree() {
        let tree = build_binary_tree(6);
        let mut profiles = vec![BehavProfile::full(&tree); 8];
        let values = liap_values(&mut profiles);
        assert_eq!(values.len(), 8);
        assert!(values.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_empty_batch() {
        let mut profiles: Vec<BehavProfile<f64>> = Vec::new();
        assert!(liap_values(&mut profiles).is_empty());
    }
}
