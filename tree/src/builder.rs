//! Incremental game tree construction
//!
//! Nodes are numbered in the order they are added, and each child is
//! appended to its parent's child list, so children must be added in action
//! (or chance outcome) order. The root is the first node and has no parent.
//! Everything the engine checks (action counts, payoff counts, chance
//! probabilities) is checked once more by `build`.

use extform_engine::{Field, GameTree, Infoset, InfosetId, Node, NodeId, Player, TreeError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("player {0} has not been added")]
    UnknownPlayer(usize),

    #[error("information set {0} has not been added")]
    UnknownInfoset(InfosetId),

    #[error("parent node {0} has not been added")]
    UnknownParent(NodeId),

    #[error("node {0} is terminal and cannot have children")]
    TerminalParent(NodeId),

    #[error("the root must be added first and only once")]
    Root,

    #[error(transparent)]
    Tree(#[from] TreeError),
}

#[derive(Debug, Clone)]
pub struct TreeBuilder<T> {
    nodes: Vec<Node<T>>,
    players: Vec<Player>,
    /// infosets[player] = (label, actions), turned into `Infoset`s on build
    infosets: Vec<Vec<(String, Vec<String>)>>,
}

impl<T: Field> Default for TreeBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Field> TreeBuilder<T> {
    pub fn new() -> Self {
        TreeBuilder {
            nodes: Vec::new(),
            players: Vec::new(),
            infosets: Vec::new(),
        }
    }

    /// Add a player and return its index
    pub fn player(&mut self, name: impl Into<String>) -> usize {
        self.players.push(Player::new(name, Vec::new()));
        self.infosets.push(Vec::new());
        self.players.len() - 1
    }

    /// Add an information set owned by `player`
    pub fn infoset(
        &mut self,
        player: usize,
        label: impl Into<String>,
        actions: &[&str],
    ) -> Result<InfosetId, BuildError> {
        let list = self
            .infosets
            .get_mut(player)
            .ok_or(BuildError::UnknownPlayer(player))?;
        list.push((label.into(), actions.iter().map(|a| a.to_string()).collect()));
        Ok(InfosetId::new(player, list.len() - 1))
    }

    pub fn decision(
        &mut self,
        parent: Option<NodeId>,
        infoset: InfosetId,
    ) -> Result<NodeId, BuildError> {
        let known = self
            .infosets
            .get(infoset.player)
            .is_some_and(|list| infoset.index < list.len());
        if !known {
            return Err(BuildError::UnknownInfoset(infoset));
        }
        self.push(parent, |id, parent| Node::Decision {
            id,
            parent,
            infoset,
            children: Vec::new(),
        })
    }

    pub fn chance(&mut self, parent: Option<NodeId>, probs: Vec<T>) -> Result<NodeId, BuildError> {
        self.push(parent, |id, parent| Node::Chance {
            id,
            parent,
            children: Vec::new(),
            probs,
        })
    }

    pub fn terminal(&mut self, parent: Option<NodeId>, payoffs: Vec<T>) -> Result<NodeId, BuildError> {
        self.push(parent, |id, parent| Node::Terminal {
            id,
            parent,
            payoffs,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Validate and freeze the tree
    pub fn build(self) -> Result<GameTree<T>, BuildError> {
        let players = self
            .players
            .into_iter()
            .zip(self.infosets)
            .map(|(player, list)| {
                let infosets = list
                    .into_iter()
                    .map(|(label, actions)| Infoset::new(label, actions))
                    .collect();
                Player::new(player.name(), infosets)
            })
            .collect();
        Ok(GameTree::new(self.nodes, players)?)
    }

    fn push(
        &mut self,
        parent: Option<NodeId>,
        make: impl FnOnce(NodeId, Option<NodeId>) -> Node<T>,
    ) -> Result<NodeId, BuildError> {
        let id = self.nodes.len() as NodeId;
        match parent {
            None if !self.nodes.is_empty() => return Err(BuildError::Root),
            Some(_) if self.nodes.is_empty() => return Err(BuildError::Root),
            None => {}
            Some(p) => {
                let node = self
                    .nodes
                    .get_mut(p as usize)
                    .ok_or(BuildError::UnknownParent(p))?;
                let children = node.children_mut().ok_or(BuildError::TerminalParent(p))?;
                children.push(id);
            }
        }
        self.nodes.push(make(id, parent));
        Ok(id)
    }
}
