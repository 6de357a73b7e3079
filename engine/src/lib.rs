//! extform Engine - behavior profile evaluation for extensive-form games
//!
//! A `GameTree` is an arena of decision, chance and terminal nodes grouped
//! into information sets. A `BehavProfile` assigns a probability to every
//! available action and lazily derives realization probabilities, beliefs,
//! expected payoffs, regrets and equilibrium-distance measures from it.
//!
//! All arithmetic is generic over `Field`, so the same code runs in floating
//! point or in an exact number type.

mod cache;

pub mod assessment;
pub mod batch;
pub mod diff;
pub mod dump;
pub mod error;
pub mod field;
pub mod index;
pub mod mixed;
pub mod node;
pub mod profile;
pub mod scalars;
pub mod support;

#[doc(hidden)]
pub mod test_tree;

pub use assessment::{BehavAssessment, CondPayoff};
pub use error::{MixedError, ProfileError, TreeError};
pub use field::Field;
pub use index::ProfileIndex;
pub use mixed::{MixedProfile, PureStrategy};
pub use node::{ActionId, GameTree, Infoset, InfosetId, Node, NodeId, Player};
pub use profile::BehavProfile;
pub use scalars::QreValue;
pub use support::Support;
