//! Hardcoded game trees for tests and benchmarks
//!
//! Every builder is generic over the field so the same game can be checked in
//! floating point and in exact arithmetic. Node ids equal their index.
//!
//! One-shot tree (two players, only player 0 moves):
//!   0: Decision P0 [L → 1, R → 2]
//!   1: Terminal (1, 0)
//!   2: Terminal (0, 1)
//!
//! Chance tree (one player):
//!   0: Chance 0.3 → 1, 0.7 → 4
//!   1: Decision P0 "left"  [A → 2, B → 3]    payoffs 2, 2
//!   4: Decision P0 "right" [A → 5, B → 6]    payoffs 5, 5
//!
//! One-card poker (two players, zero sum):
//!   0:  Chance 1/2 → 1 (P0 high), 1/2 → 2 (P0 low)
//!   1:  Decision P0 "high" [Bet → 3, Check → 4]
//!   2:  Decision P0 "low"  [Bet → 5, Check → 6]
//!   3:  Decision P1 "bet"  [Call → 7, Fold → 8]
//!   4:  Terminal (1, -1)
//!   5:  Decision P1 "bet"  [Call → 9, Fold → 10]
//!   6:  Terminal (-1, 1)
//!   7:  Terminal (2, -2)     8: Terminal (1, -1)
//!   9:  Terminal (-2, 2)    10: Terminal (1, -1)
//!
//! Its equilibrium: P0 always bets high, bets low with 1/3; P1 calls with 2/3.
//! P0's value is 1/3.

use crate::field::Field;
use crate::node::{GameTree, Infoset, InfosetId, Node, NodeId, Player};

fn int<T: Field>(n: i64) -> T {
    let magnitude = T::from_usize(n.unsigned_abs() as usize);
    if n < 0 {
        -magnitude
    } else {
        magnitude
    }
}

fn ratio<T: Field>(num: i64, den: i64) -> T {
    int::<T>(num) / int::<T>(den)
}

fn infoset(label: &str, actions: &[&str]) -> Infoset {
    Infoset::new(label, actions.iter().map(|a| a.to_string()).collect())
}

fn decision<T>(id: NodeId, parent: Option<NodeId>, infoset: (usize, usize), children: Vec<NodeId>) -> Node<T> {
    Node::Decision {
        id,
        parent,
        infoset: InfosetId::new(infoset.0, infoset.1),
        children,
    }
}

fn terminal<T: Field>(id: NodeId, parent: NodeId, payoffs: &[i64]) -> Node<T> {
    Node::Terminal {
        id,
        parent: Some(parent),
        payoffs: payoffs.iter().map(|&p| int(p)).collect(),
    }
}

pub fn build_one_shot_tree_in<T: Field>() -> GameTree<T> {
    let nodes = vec![
        decision(0, None, (0, 0), vec![1, 2]),
        terminal(1, 0, &[1, 0]),
        terminal(2, 0, &[0, 1]),
    ];
    let players = vec![
        Player::new("Alice", vec![infoset("root", &["L", "R"])]),
        Player::new("Bob", vec![]),
    ];
    GameTree::new(nodes, players).expect("one-shot tree is well formed")
}

pub fn build_one_shot_tree() -> GameTree<f64> {
    build_one_shot_tree_in()
}

pub fn build_chance_tree_in<T: Field>() -> GameTree<T> {
    let nodes = vec![
        Node::Chance {
            id: 0,
            parent: None,
            children: vec![1, 4],
            probs: vec![ratio(3, 10), ratio(7, 10)],
        },
        decision(1, Some(0), (0, 0), vec![2, 3]),
        terminal(2, 1, &[2]),
        terminal(3, 1, &[2]),
        decision(4, Some(0), (0, 1), vec![5, 6]),
        terminal(5, 4, &[5]),
        terminal(6, 4, &[5]),
    ];
    let players = vec![Player::new(
        "Solo",
        vec![infoset("left", &["A", "B"]), infoset("right", &["A", "B"])],
    )];
    GameTree::new(nodes, players).expect("chance tree is well formed")
}

pub fn build_chance_tree() -> GameTree<f64> {
    build_chance_tree_in()
}

pub fn build_poker_tree_in<T: Field>() -> GameTree<T> {
    let nodes = vec![
        Node::Chance {
            id: 0,
            parent: None,
            children: vec![1, 2],
            probs: vec![ratio(1, 2), ratio(1, 2)],
        },
        decision(1, Some(0), (0, 0), vec![3, 4]),
        decision(2, Some(0), (0, 1), vec![5, 6]),
        decision(3, Some(1), (1, 0), vec![7, 8]),
        terminal(4, 1, &[1, -1]),
        decision(5, Some(2), (1, 0), vec![9, 10]),
        terminal(6, 2, &[-1, 1]),
        terminal(7, 3, &[2, -2]),
        terminal(8, 3, &[1, -1]),
        terminal(9, 5, &[-2, 2]),
        terminal(10, 5, &[1, -1]),
    ];
    let players = vec![
        Player::new(
            "Alice",
            vec![infoset("high", &["Bet", "Check"]), infoset("low", &["Bet", "Check"])],
        ),
        Player::new("Bob", vec![infoset("bet", &["Call", "Fold"])]),
    ];
    GameTree::new(nodes, players).expect("poker tree is well formed")
}

pub fn build_poker_tree() -> GameTree<f64> {
    build_poker_tree_in()
}

/// Equilibrium of the one-card poker tree in slot order
/// (high: Bet, Check; low: Bet, Check; bet: Call, Fold).
pub fn poker_equilibrium<T: Field>() -> Vec<T> {
    vec![
        T::one(),
        T::zero(),
        ratio(1, 3),
        ratio(2, 3),
        ratio(2, 3),
        ratio(1, 3),
    ]
}

/// Complete binary perfect-information tree of the given depth, players
/// alternating by level, every decision node its own information set.
/// Leaf payoffs are small deterministic integers.
pub fn build_binary_tree(depth: usize) -> GameTree<f64> {
    let mut nodes: Vec<Node<f64>> = Vec::new();
    let mut infosets: [Vec<Infoset>; 2] = [Vec::new(), Vec::new()];
    // Breadth-first: level `l` starts at 2^l - 1
    for level in 0..=depth {
        let first = (1usize << level) - 1;
        for offset in 0..(1usize << level) {
            let id = (first + offset) as NodeId;
            let parent = (level > 0).then(|| ((id as usize - 1) / 2) as NodeId);
            if level == depth {
                let a = ((offset * 7 + 3) % 11) as f64;
                nodes.push(Node::Terminal {
                    id,
                    parent,
                    payoffs: vec![a, -a],
                });
            } else {
                let player = level % 2;
                let index = infosets[player].len();
                infosets[player].push(infoset(&format!("n{}", id), &["L", "R"]));
                nodes.push(Node::Decision {
                    id,
                    parent,
                    infoset: InfosetId::new(player, index),
                    children: vec![2 * id + 1, 2 * id + 2],
                });
            }
        }
    }
    let [first, second] = infosets;
    let players = vec![Player::new("Max", first), Player::new("Min", second)];
    GameTree::new(nodes, players).expect("binary tree is well formed")
}
