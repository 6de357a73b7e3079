//! YAML game descriptions
//!
//! ```yaml
//! name: example
//! players: [Alice, Bob]
//! infosets:
//!   - { player: Alice, label: a, actions: [L, R] }
//! root:
//!   decision:
//!     infoset: a
//!     children:
//!       - terminal: { payoffs: [1, 0] }
//!       - terminal: { payoffs: [0, 1] }
//! profile: [0.5, 0.5]
//! ```
//!
//! Information sets are referenced by label, so labels are unique across
//! players. `profile` is optional and lists probabilities in slot order.

use crate::builder::{BuildError, TreeBuilder};
use extform_engine::{BehavProfile, GameTree, InfosetId, NodeId, ProfileError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read game file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse game file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("game has no players")]
    NoPlayers,

    #[error("player '{0}' is listed twice")]
    DuplicatePlayer(String),

    #[error("information set '{label}' belongs to unknown player '{player}'")]
    UnknownPlayer { label: String, player: String },

    #[error("information set label '{0}' is used twice")]
    DuplicateInfoset(String),

    #[error("decision node refers to unknown information set '{0}'")]
    UnknownInfoset(String),

    #[error("invalid game tree: {0}")]
    Build(#[from] BuildError),

    #[error("invalid profile: {0}")]
    Profile(#[from] ProfileError),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InfosetConfig {
    pub player: String,
    pub label: String,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum NodeConfig {
    Decision {
        infoset: String,
        children: Vec<NodeConfig>,
    },
    Chance {
        probs: Vec<f64>,
        children: Vec<NodeConfig>,
    },
    Terminal {
        payoffs: Vec<f64>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameConfig {
    #[serde(default)]
    pub name: String,
    pub players: Vec<String>,
    #[serde(default)]
    pub infosets: Vec<InfosetConfig>,
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub root: NodeConfig,
    #[serde(default)]
    pub profile: Option<Vec<f64>>,
}

impl GameConfig {
    /// Read, parse and validate a game file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&yaml)?;
        log::debug!("loaded game '{}' from {}", config.name, path.display());
        Ok(config)
    }

    /// Parse and validate a game description
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check names and references; tree shape is checked by `build_tree`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.is_empty() {
            return Err(ConfigError::NoPlayers);
        }
        let mut players = HashSet::new();
        for name in &self.players {
            if !players.insert(name.as_str()) {
                return Err(ConfigError::DuplicatePlayer(name.clone()));
            }
        }
        let mut labels = HashSet::new();
        for iset in &self.infosets {
            if !players.contains(iset.player.as_str()) {
                return Err(ConfigError::UnknownPlayer {
                    label: iset.label.clone(),
                    player: iset.player.clone(),
                });
            }
            if !labels.insert(iset.label.as_str()) {
                return Err(ConfigError::DuplicateInfoset(iset.label.clone()));
            }
        }
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                NodeConfig::Decision { infoset, children } => {
                    if !labels.contains(infoset.as_str()) {
                        return Err(ConfigError::UnknownInfoset(infoset.clone()));
                    }
                    stack.extend(children);
                }
                NodeConfig::Chance { children, .. } => stack.extend(children),
                NodeConfig::Terminal { .. } => {}
            }
        }
        Ok(())
    }

    /// Build the described tree; node ids follow a preorder walk.
    pub fn build_tree(&self) -> Result<GameTree<f64>, ConfigError> {
        self.validate()?;
        let mut builder = TreeBuilder::new();
        let mut players = HashMap::new();
        for name in &self.players {
            players.insert(name.as_str(), builder.player(name.as_str()));
        }
        let mut infosets: HashMap<&str, InfosetId> = HashMap::new();
        for iset in &self.infosets {
            let actions: Vec<&str> = iset.actions.iter().map(String::as_str).collect();
            let player = players.get(iset.player.as_str()).copied().ok_or_else(|| {
                ConfigError::UnknownPlayer {
                    label: iset.label.clone(),
                    player: iset.player.clone(),
                }
            })?;
            infosets.insert(iset.label.as_str(), builder.infoset(player, &iset.label, &actions)?);
        }

        let mut stack: Vec<(&NodeConfig, Option<NodeId>)> = vec![(&self.root, None)];
        while let Some((node, parent)) = stack.pop() {
            let (id, children) = match node {
                NodeConfig::Decision { infoset, children } => {
                    let infoset = infosets
                        .get(infoset.as_str())
                        .copied()
                        .ok_or_else(|| ConfigError::UnknownInfoset(infoset.clone()))?;
                    (builder.decision(parent, infoset)?, children.as_slice())
                }
                NodeConfig::Chance { probs, children } => {
                    (builder.chance(parent, probs.clone())?, children.as_slice())
                }
                NodeConfig::Terminal { payoffs } => {
                    (builder.terminal(parent, payoffs.clone())?, &[][..])
                }
            };
            // reversed so the first child is added first
            stack.extend(children.iter().rev().map(|child| (child, Some(id))));
        }
        Ok(builder.build()?)
    }

    /// Profile given in the file, or the centroid when none is given
    pub fn profile<'g>(&self, tree: &'g GameTree<f64>) -> Result<BehavProfile<'g, f64>, ConfigError> {
        match &self.profile {
            Some(probs) => Ok(BehavProfile::from_probs(tree, probs.clone())?),
            None => Ok(BehavProfile::full(tree)),
        }
    }
}
