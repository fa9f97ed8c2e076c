//! Small instances shared by the unit tests.

use rand::Rng;

use super::instance::{Instance, Node};

/// `|i - j|` distances for `n` nodes on a line.
pub fn line_matrix(n: usize) -> Vec<Vec<f64>> {
    (0..n)
        .map(|i| (0..n).map(|j| (i as f64 - j as f64).abs()).collect())
        .collect()
}

fn euclidean(points: &[(f64, f64)]) -> Vec<Vec<f64>> {
    points
        .iter()
        .map(|&(x1, y1)| {
            points
                .iter()
                .map(|&(x2, y2)| ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt())
                .collect()
        })
        .collect()
}

/// Depot plus four stops, capacity 10.
///
/// `[0, 1, 2, 3, 4, 0]` is feasible (loads 3, 7, 4, 0) but not optimal.
/// Visiting 3 or 4 before any pickup is infeasible.
pub fn five_node() -> Instance {
    let nodes = vec![
        Node::new(0, 0, 0),
        Node::new(1, 3, 0),
        Node::new(2, 4, 0),
        Node::new(3, 0, 3),
        Node::new(4, 0, 4),
    ];
    let points = [(0.0, 0.0), (10.0, 0.0), (0.0, 1.0), (10.0, 1.0), (0.0, 2.0)];
    Instance::new(nodes, euclidean(&points), 10).expect("valid fixture")
}

/// `stops` non-depot nodes in pickup/delivery pairs with random positions.
///
/// Pair `(2k-1, 2k)` boards and alights the same 1..=3 passengers; capacity
/// is 6, so random construction never dead-ends.
pub fn paired(stops: usize, seed: u64) -> Instance {
    let mut rng = u_numflow::random::create_rng(seed);
    let points: Vec<(f64, f64)> = (0..=stops)
        .map(|_| (rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
        .collect();

    let mut nodes = vec![Node::new(0, 0, 0)];
    let mut id = 1;
    while id <= stops {
        let load = rng.random_range(1..=3);
        nodes.push(Node::new(id, load, 0));
        if id < stops {
            nodes.push(Node::new(id + 1, 0, load));
        } else {
            // odd count: the last pickup is balanced at the same stop
            nodes.last_mut().expect("just pushed").alightings = load;
        }
        id += 2;
    }

    Instance::new(nodes, euclidean(&points), 6).expect("valid fixture")
}
