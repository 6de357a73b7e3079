use crate::node::{ActionId, InfosetId, NodeId};
use thiserror::Error;

/// Errors raised while validating a game tree
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("game tree has no nodes")]
    Empty,

    #[error("node at index {index} carries id {id}")]
    IdMismatch { index: usize, id: NodeId },

    #[error("root node 0 must not have a parent")]
    RootHasParent,

    #[error("node {0} has no parent but is not the root")]
    ExtraRoot(NodeId),

    #[error("parent/child links disagree between node {parent} and node {child}")]
    ParentMismatch { child: NodeId, parent: NodeId },

    #[error("node {node} lists child {child}, which is not in the tree")]
    UnknownChild { node: NodeId, child: NodeId },

    #[error("node {0} is not reachable exactly once from the root")]
    Unreachable(NodeId),

    #[error("decision node {node} refers to unknown information set {infoset}")]
    UnknownInfoset { node: NodeId, infoset: InfosetId },

    #[error("decision node {node} has {found} children, information set offers {expected} actions")]
    ActionCount {
        node: NodeId,
        expected: usize,
        found: usize,
    },

    #[error("chance node {node} has {found} probabilities for {expected} children")]
    ChanceCount {
        node: NodeId,
        expected: usize,
        found: usize,
    },

    #[error("chance node {0} has a negative probability")]
    NegativeChance(NodeId),

    #[error("chance node {0} probabilities do not sum to 1")]
    ChanceSum(NodeId),

    #[error("non-terminal node {0} has no children")]
    Childless(NodeId),

    #[error("terminal node {node} has {found} payoffs for {expected} players")]
    PayoffCount {
        node: NodeId,
        expected: usize,
        found: usize,
    },

    #[error("information set {0} has no actions")]
    NoActions(InfosetId),

    #[error("information set {0} has no member nodes")]
    NoMembers(InfosetId),
}

/// Errors raised while constructing or addressing a behavior profile
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("support does not conform to the game tree: {0}")]
    SupportMismatch(String),

    #[error("action {0} does not exist in the game tree")]
    UnknownAction(ActionId),

    #[error("information set {0} does not exist in the game tree")]
    UnknownInfoset(InfosetId),

    #[error("action {0} is not in the support")]
    NotInSupport(ActionId),

    #[error("removing action {0} would leave its information set empty")]
    EmptyInfoset(ActionId),

    #[error("expected {expected} probabilities, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("node {0} does not exist in the game tree")]
    UnknownNode(NodeId),
}

/// Errors raised while converting a normal-form mixed profile
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MixedError {
    #[error("mixed profile has {found} players, game has {expected}")]
    PlayerCount { expected: usize, found: usize },

    #[error("pure strategy of player {player} has {found} choices for {expected} information sets")]
    StrategyLength {
        player: usize,
        expected: usize,
        found: usize,
    },

    #[error("pure strategy of player {player} picks action {action} at information set {infoset}")]
    ActionOutOfRange {
        player: usize,
        infoset: usize,
        action: usize,
    },

    #[error("pure strategy of player {0} has a negative weight")]
    NegativeWeight(usize),
}
