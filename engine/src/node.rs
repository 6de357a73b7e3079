//! Node definitions for the game tree
//!
//! The tree is an arena: nodes live in a flat vector and refer to each other
//! by `NodeId`, the node's index in that vector. Information sets and actions
//! are addressed by `InfosetId` / `ActionId` pairs of stable indices. Trees are
//! validated once in `GameTree::new` and are immutable afterwards; profiles
//! borrow them read-only.

use crate::error::TreeError;
use crate::field::Field;
use std::fmt;

/// Node ID type (index into flat array storage)
pub type NodeId = u32;

/// Information set ID: owning player and the set's index within that player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InfosetId {
    pub player: usize,
    pub index: usize,
}

impl InfosetId {
    pub fn new(player: usize, index: usize) -> Self {
        InfosetId { player, index }
    }

    /// The action at position `index` of this information set
    pub fn action(self, index: usize) -> ActionId {
        ActionId {
            infoset: self,
            index,
        }
    }
}

impl fmt::Display for InfosetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.player, self.index)
    }
}

/// Action ID: the information set and the action's position in its action list
///
/// The position is also the child position at every member node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId {
    pub infoset: InfosetId,
    pub index: usize,
}

impl ActionId {
    pub fn new(player: usize, infoset: usize, index: usize) -> Self {
        InfosetId::new(player, infoset).action(index)
    }

    pub fn player(self) -> usize {
        self.infoset.player
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.infoset, self.index)
    }
}

/// Represents a node in the game tree
#[derive(Debug, Clone)]
pub enum Node<T> {
    /// Decision node owned by the player of `infoset`
    Decision {
        /// Unique identifier for this node (index in flat array)
        id: NodeId,
        /// Parent node ID (None for root)
        parent: Option<NodeId>,
        /// Information set this node belongs to
        infoset: InfosetId,
        /// Child node IDs indexed by action
        children: Vec<NodeId>,
    },
    /// Chance node with a fixed distribution over its children
    Chance {
        id: NodeId,
        parent: Option<NodeId>,
        children: Vec<NodeId>,
        /// Probability of each outgoing edge, aligned with `children`;
        /// non-negative and summing to 1
        probs: Vec<T>,
    },
    /// Terminal node carrying one payoff per player
    Terminal {
        id: NodeId,
        parent: Option<NodeId>,
        payoffs: Vec<T>,
    },
}

impl<T> Node<T> {
    /// Get the node ID
    pub fn id(&self) -> NodeId {
        match self {
            Node::Decision { id, .. } => *id,
            Node::Chance { id, .. } => *id,
            Node::Terminal { id, .. } => *id,
        }
    }

    /// Get the information set ID (only valid for Decision nodes)
    pub fn infoset(&self) -> Option<InfosetId> {
        match self {
            Node::Decision { infoset, .. } => Some(*infoset),
            _ => None,
        }
    }

    /// Get the parent node ID
    pub fn parent(&self) -> Option<NodeId> {
        match self {
            Node::Decision { parent, .. } => *parent,
            Node::Chance { parent, .. } => *parent,
            Node::Terminal { parent, .. } => *parent,
        }
    }

    /// Get child node IDs
    pub fn children(&self) -> &[NodeId] {
        match self {
            Node::Decision { children, .. } => children,
            Node::Chance { children, .. } => children,
            Node::Terminal { .. } => &[],
        }
    }

    /// Mutable child list, used by tree builders before validation
    pub fn children_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match self {
            Node::Decision { children, .. } => Some(children),
            Node::Chance { children, .. } => Some(children),
            Node::Terminal { .. } => None,
        }
    }

    /// Check if this is a terminal node
    pub fn is_terminal(&self) -> bool {
        matches!(self, Node::Terminal { .. })
    }

    /// Check if this is a decision node
    pub fn is_decision(&self) -> bool {
        matches!(self, Node::Decision { .. })
    }

    /// Check if this is a chance node
    pub fn is_chance(&self) -> bool {
        matches!(self, Node::Chance { .. })
    }
}

/// Information set: a label, an ordered action list, and its member nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Infoset {
    label: String,
    actions: Vec<String>,
    members: Vec<NodeId>,
}

impl Infoset {
    /// Members are filled in by `GameTree::new`.
    pub fn new(label: impl Into<String>, actions: Vec<String>) -> Self {
        Infoset {
            label: label.into(),
            actions,
            members: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    pub fn num_actions(&self) -> usize {
        self.actions.len()
    }

    /// Decision nodes in this information set, in node-id order
    pub fn members(&self) -> &[NodeId] {
        &self.members
    }
}

/// A player and the information sets it owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    infosets: Vec<Infoset>,
}

impl Player {
    pub fn new(name: impl Into<String>, infosets: Vec<Infoset>) -> Self {
        Player {
            name: name.into(),
            infosets,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn infosets(&self) -> &[Infoset] {
        &self.infosets
    }

    pub fn num_infosets(&self) -> usize {
        self.infosets.len()
    }
}

/// Game tree wrapper
///
/// Contains a flat array of nodes for efficient traversal and cache locality,
/// the players with their information sets, and a precomputed preorder so
/// that evaluation never recurses.
#[derive(Debug, Clone)]
pub struct GameTree<T> {
    nodes: Vec<Node<T>>,
    players: Vec<Player>,
    /// Root-first order; every parent precedes its children
    preorder: Vec<NodeId>,
    /// Position of each node among its parent's children (0 for the root)
    branch: Vec<usize>,
}

impl<T: Field> GameTree<T> {
    /// Validate and assemble a tree. Node 0 is the root.
    pub fn new(nodes: Vec<Node<T>>, mut players: Vec<Player>) -> Result<Self, TreeError> {
        if nodes.is_empty() {
            return Err(TreeError::Empty);
        }
        let n = nodes.len();

        for (index, node) in nodes.iter().enumerate() {
            if node.id() as usize != index {
                return Err(TreeError::IdMismatch {
                    index,
                    id: node.id(),
                });
            }
            match (index, node.parent()) {
                (0, Some(_)) => return Err(TreeError::RootHasParent),
                (0, None) => {}
                (_, None) => return Err(TreeError::ExtraRoot(node.id())),
                (_, Some(parent)) => {
                    let listed = nodes
                        .get(parent as usize)
                        .map_or(false, |p| p.children().contains(&node.id()));
                    if !listed {
                        return Err(TreeError::ParentMismatch {
                            child: node.id(),
                            parent,
                        });
                    }
                }
            }
            for &child in node.children() {
                match nodes.get(child as usize) {
                    None => {
                        return Err(TreeError::UnknownChild {
                            node: node.id(),
                            child,
                        })
                    }
                    Some(c) if c.parent() != Some(node.id()) => {
                        return Err(TreeError::ParentMismatch {
                            child,
                            parent: node.id(),
                        })
                    }
                    Some(_) => {}
                }
            }
        }

        for player in players.iter_mut() {
            for infoset in player.infosets.iter_mut() {
                infoset.members.clear();
            }
        }

        for node in &nodes {
            match node {
                Node::Decision {
                    id,
                    infoset,
                    children,
                    ..
                } => {
                    let iset = players
                        .get_mut(infoset.player)
                        .and_then(|p| p.infosets.get_mut(infoset.index))
                        .ok_or(TreeError::UnknownInfoset {
                            node: *id,
                            infoset: *infoset,
                        })?;
                    if iset.actions.is_empty() {
                        return Err(TreeError::NoActions(*infoset));
                    }
                    if children.len() != iset.actions.len() {
                        return Err(TreeError::ActionCount {
                            node: *id,
                            expected: iset.actions.len(),
                            found: children.len(),
                        });
                    }
                    iset.members.push(*id);
                }
                Node::Chance {
                    id,
                    children,
                    probs,
                    ..
                } => {
                    if children.is_empty() {
                        return Err(TreeError::Childless(*id));
                    }
                    if probs.len() != children.len() {
                        return Err(TreeError::ChanceCount {
                            node: *id,
                            expected: children.len(),
                            found: probs.len(),
                        });
                    }
                    if probs.iter().any(|p| *p < T::zero()) {
                        return Err(TreeError::NegativeChance(*id));
                    }
                    let sum = probs.iter().fold(T::zero(), |acc, p| acc + p.clone());
                    if !sum.approx_eq(&T::one()) {
                        return Err(TreeError::ChanceSum(*id));
                    }
                }
                Node::Terminal { id, payoffs, .. } => {
                    if payoffs.len() != players.len() {
                        return Err(TreeError::PayoffCount {
                            node: *id,
                            expected: players.len(),
                            found: payoffs.len(),
                        });
                    }
                }
            }
        }

        for (pl, player) in players.iter().enumerate() {
            for (ix, infoset) in player.infosets.iter().enumerate() {
                if infoset.actions.is_empty() {
                    return Err(TreeError::NoActions(InfosetId::new(pl, ix)));
                }
                if infoset.members.is_empty() {
                    return Err(TreeError::NoMembers(InfosetId::new(pl, ix)));
                }
            }
        }

        // Depth-first walk with an explicit stack; every node must be seen once.
        let mut preorder = Vec::with_capacity(n);
        let mut branch = vec![0usize; n];
        let mut seen = vec![false; n];
        let mut stack = vec![0 as NodeId];
        while let Some(id) = stack.pop() {
            if std::mem::replace(&mut seen[id as usize], true) {
                return Err(TreeError::Unreachable(id));
            }
            preorder.push(id);
            let children = nodes[id as usize].children();
            for (b, &child) in children.iter().enumerate().rev() {
                branch[child as usize] = b;
                stack.push(child);
            }
        }
        if let Some(missing) = seen.iter().position(|s| !s) {
            return Err(TreeError::Unreachable(missing as NodeId));
        }

        log::debug!(
            "validated game tree: {} nodes, {} players, {} information sets",
            n,
            players.len(),
            players.iter().map(Player::num_infosets).sum::<usize>()
        );

        Ok(GameTree {
            nodes,
            players,
            preorder,
            branch,
        })
    }
}

impl<T> GameTree<T> {
    /// The root is always node 0
    pub fn root(&self) -> NodeId {
        0
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id as usize)
    }

    /// Get a node by ID, panicking on an unknown id
    pub fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id as usize]
    }

    pub fn nodes(&self) -> &[Node<T>] {
        &self.nodes
    }

    /// Get the number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (never true for a validated tree)
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, player: usize) -> Option<&Player> {
        self.players.get(player)
    }

    pub fn infoset(&self, id: InfosetId) -> Option<&Infoset> {
        self.players.get(id.player)?.infosets.get(id.index)
    }

    /// All information sets in (player, infoset) order
    pub fn infosets(&self) -> impl Iterator<Item = (InfosetId, &Infoset)> + '_ {
        self.players.iter().enumerate().flat_map(|(pl, player)| {
            player
                .infosets
                .iter()
                .enumerate()
                .map(move |(ix, iset)| (InfosetId::new(pl, ix), iset))
        })
    }

    /// All actions of the tree in (player, infoset, action) order
    pub fn actions(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.infosets()
            .flat_map(|(id, iset)| (0..iset.num_actions()).map(move |a| id.action(a)))
    }

    pub fn contains_action(&self, action: ActionId) -> bool {
        self.infoset(action.infoset)
            .map_or(false, |iset| action.index < iset.num_actions())
    }

    /// Root-first traversal order; reversed, it visits children before parents
    pub fn preorder(&self) -> &[NodeId] {
        &self.preorder
    }

    /// Position of `node` among its parent's children, None for the root
    pub fn branch(&self, node: NodeId) -> Option<usize> {
        self.nodes[node as usize]
            .parent()
            .map(|_| self.branch[node as usize])
    }

    /// The player action that led to `node`; None for the root and for
    /// children of chance nodes
    pub fn prior_action(&self, node: NodeId) -> Option<ActionId> {
        let parent = self.nodes[node as usize].parent()?;
        let infoset = self.nodes[parent as usize].infoset()?;
        Some(infoset.action(self.branch[node as usize]))
    }

    /// Child of `node` along edge `branch`
    pub fn child(&self, node: NodeId, branch: usize) -> NodeId {
        self.nodes[node as usize].children()[branch]
    }

    /// Terminal nodes in node-id order
    pub fn terminals(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|n| n.is_terminal())
            .map(|n| n.id())
    }

    fn show(&self, f: &mut fmt::Formatter<'_>, id: NodeId, prefix: &str) -> fmt::Result
    where
        T: fmt::Display,
    {
        let children = self.node(id).children();
        let n = children.len();
        for (b, &child) in children.iter().enumerate() {
            let last = b + 1 == n;
            let stem = if last { "└" } else { "├" };
            let gaps = if last { "    " } else { "│   " };
            let edge = match self.node(id) {
                Node::Decision { infoset, .. } => self
                    .infoset(*infoset)
                    .map(|iset| iset.actions[b].clone())
                    .unwrap_or_default(),
                Node::Chance { probs, .. } => format!("p={}", probs[b]),
                Node::Terminal { .. } => unreachable!("terminal nodes have no children"),
            };
            writeln!(f, "{}{}──{} → {}", prefix, stem, edge, self.describe(child))?;
            self.show(f, child, &format!("{}{}", prefix, gaps))?;
        }
        Ok(())
    }

    fn describe(&self, id: NodeId) -> String
    where
        T: fmt::Display,
    {
        match self.node(id) {
            Node::Decision { infoset, .. } => {
                let label = self.infoset(*infoset).map(Infoset::label).unwrap_or("?");
                let player = self.players[infoset.player].name();
                format!("#{} {} [{}]", id, player, label)
            }
            Node::Chance { .. } => format!("#{} chance", id),
            Node::Terminal { payoffs, .. } => {
                let payoffs = payoffs
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("#{} ({})", id, payoffs)
            }
        }
    }
}

impl<T: fmt::Display> fmt::Display for GameTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ROOT   {}", self.describe(self.root()))?;
        self.show(f, self.root(), "")
    }
}
