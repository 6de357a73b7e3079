//! extform Tree Builder - game tree construction
//!
//! Games are built either node by node with `TreeBuilder` or from a YAML
//! description with `GameConfig`, and handed to the engine as a validated
//! `GameTree`.

pub mod builder;
pub mod config;

pub use builder::{BuildError, TreeBuilder};
pub use config::{ConfigError, GameConfig, InfosetConfig, NodeConfig};
