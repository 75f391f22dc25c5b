use super::*;
use crate::statistic::{impl_multiplicity, SubtreeSize};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Counts the vertices of a tour range by counting representative occurrences.
#[derive(Clone, Copy, Debug, Default)]
struct VertexCount {
    count: usize,
    vertices: usize,
}

impl Statistic<Occurrence> for VertexCount {
    fn init(&mut self, key: &Occurrence) {
        self.vertices = usize::from(key.is_representative());
    }

    fn update_left(&mut self, left: &Self) {
        self.vertices += left.vertices;
    }

    fn update_right(&mut self, right: &Self) {
        self.vertices += right.vertices;
    }

    impl_multiplicity!();
}

fn reference_root(parents: &[Option<usize>], mut v: usize) -> usize {
    while let Some(p) = parents[v] {
        v = p;
    }
    v
}

fn reference_lca(parents: &[Option<usize>], u: usize, v: usize) -> Option<usize> {
    let mut ancestors = HashSet::new();
    let mut cur = Some(u);
    while let Some(c) = cur {
        ancestors.insert(c);
        cur = parents[c];
    }
    let mut cur = Some(v);
    while let Some(c) = cur {
        if ancestors.contains(&c) {
            return Some(c);
        }
        cur = parents[c];
    }
    None
}

fn reference_evert(parents: &mut [Option<usize>], v: usize) {
    let mut previous = None;
    let mut cur = Some(v);
    while let Some(c) = cur {
        cur = parents[c];
        parents[c] = previous;
        previous = Some(c);
    }
}

fn reference_subtree_size(parents: &[Option<usize>], v: usize) -> usize {
    (0..parents.len())
        .filter(|&w| {
            let mut cur = Some(w);
            while let Some(c) = cur {
                if c == v {
                    return true;
                }
                cur = parents[c];
            }
            false
        })
        .count()
}

#[test]
fn test_non_evertable_simple() {
    const N: usize = 10;
    let mut forest = EulerTourTree::<usize, Count, false>::new();
    let nodes: Vec<NodeId> = (0..N).map(|i| forest.add(i)).collect();

    // two interleaved chains: 0 <- 2 <- 4 ... and 1 <- 3 <- 5 ...
    for i in 2..N {
        forest.link(nodes[i], nodes[i - 2]).unwrap();
    }

    for i in 0..N {
        let expected = if i < 2 { None } else { Some(nodes[i - 2]) };
        assert_eq!(forest.parent(nodes[i]), expected);
        assert_eq!(forest.find_root(nodes[i]), nodes[i % 2]);
        assert_eq!(forest.is_root(nodes[i]), i < 2);
    }

    assert_eq!(forest.find_lca(nodes[4], nodes[8]), Some(nodes[4]));
    assert_eq!(forest.find_lca(nodes[3], nodes[8]), None);

    assert_eq!(forest.cut_parent(nodes[4]), Ok(nodes[2]));
    assert_eq!(forest.find_root(nodes[8]), nodes[4]);
    assert_eq!(forest.find_root(nodes[2]), nodes[0]);
    assert_eq!(forest.cut_parent(nodes[4]), Err(ForestError::IsRoot(nodes[4])));
}

#[test]
fn test_evertable_simple() {
    const N: usize = 10;
    let mut forest = EulerTourTree::<usize>::new();
    let nodes: Vec<NodeId> = (0..N).map(|i| forest.add(i)).collect();
    for i in 2..N {
        forest.link(nodes[i], nodes[i - 2]).unwrap();
    }

    forest.evert(nodes[6]);
    assert_eq!(forest.find_root(nodes[0]), nodes[6]);
    assert_eq!(forest.parent(nodes[4]), Some(nodes[6]));
    assert_eq!(forest.parent(nodes[8]), Some(nodes[6]));
    assert_eq!(forest.parent(nodes[0]), Some(nodes[2]));
    assert_eq!(forest.parent(nodes[6]), None);
    assert_eq!(forest.find_lca(nodes[0], nodes[8]), Some(nodes[6]));

    // the edge handle still names 4 as the child, although it is the parent of 2 now
    forest.cut(Edge::new(nodes[4], nodes[2])).unwrap();
    assert_eq!(forest.find_root(nodes[0]), nodes[2]);
    assert_eq!(forest.find_root(nodes[8]), nodes[6]);
    assert!(forest.is_root(nodes[2]));
}

#[test]
fn test_tour_order() {
    let mut forest = EulerTourTree::<char, Count, false>::new();
    let r = forest.add('r');
    let a = forest.add('a');
    let b = forest.add('b');
    let c = forest.add('c');
    forest.link(a, r).unwrap();
    forest.link(b, r).unwrap();
    forest.link(c, a).unwrap();

    // new children are placed first
    assert_eq!(forest.tour(c), vec![r, b, r, a, c, a, r]);
    assert_eq!(*forest.value(c), 'c');

    *forest.value_mut(c) = 'C';
    assert_eq!(*forest.value(c), 'C');
}

#[test]
fn test_evert_tour() {
    let mut forest = EulerTourTree::<()>::new();
    let r = forest.add(());
    let a = forest.add(());
    let b = forest.add(());
    forest.link(a, r).unwrap();
    forest.link(b, a).unwrap();
    assert_eq!(forest.tour(r), vec![r, a, b, a, r]);

    forest.evert(b);
    assert_eq!(forest.tour(r), vec![b, a, r, a, b]);
    assert_eq!(forest.parent(r), Some(a));
    assert_eq!(forest.parent(a), Some(b));
}

#[test]
fn test_subtree_statistic() {
    let mut forest = EulerTourTree::<(), VertexCount, false>::new();
    let nodes: Vec<NodeId> = (0..15).map(|_| forest.add(())).collect();
    for i in 1..nodes.len() {
        forest.link(nodes[i], nodes[(i - 1) / 2]).unwrap();
    }

    assert_eq!(forest.subtree_statistic(nodes[0]).vertices, 15);
    assert_eq!(forest.subtree_statistic(nodes[1]).vertices, 7);
    assert_eq!(forest.subtree_statistic(nodes[5]).vertices, 3);
    assert_eq!(forest.subtree_statistic(nodes[14]).vertices, 1);

    // a subtree of m vertices has a tour of 2m - 1 occurrences
    let mut sizes = EulerTourTree::<(), SubtreeSize, false>::new();
    let nodes: Vec<NodeId> = (0..15).map(|_| sizes.add(())).collect();
    for i in 1..nodes.len() {
        sizes.link(nodes[i], nodes[(i - 1) / 2]).unwrap();
    }
    assert_eq!(sizes.subtree_statistic(nodes[0]).size(), 29);
    assert_eq!(sizes.subtree_statistic(nodes[2]).size(), 13);
}

#[test]
fn test_precondition_errors() {
    let mut forest = EulerTourTree::<u8>::new();
    let a = forest.add(1);
    let b = forest.add(2);
    let c = forest.add(3);
    forest.link(b, a).unwrap();

    assert_eq!(forest.link(a, a), Err(ForestError::AlreadyConnected(a, a)));
    assert_eq!(forest.link(b, c), Err(ForestError::NotRoot(b)));
    assert_eq!(forest.link(a, b), Err(ForestError::AlreadyConnected(a, b)));
    assert_eq!(forest.cut(Edge::new(c, a)), Err(ForestError::NotLinked(c, a)));
    assert_eq!(forest.remove(b), Err(ForestError::StillConnected(b)));

    // failed operations leave the forest untouched
    assert_eq!(forest.tour(a), vec![a, b, a]);

    assert_eq!(forest.remove(c), Ok(3));
    forest.cut(Edge::new(b, a)).unwrap();
    assert_eq!(forest.cut(Edge::new(b, a)), Err(ForestError::NotLinked(b, a)));
    assert_eq!(forest.remove(b), Ok(2));
    assert_eq!(forest.remove(a), Ok(1));
    assert!(forest.is_empty());
}

#[test]
fn test_remove_and_reuse() {
    let mut forest = EulerTourTree::<u32, Count, false>::new();
    let a = forest.add(1);
    let b = forest.add(2);
    assert_eq!(forest.remove(a), Ok(1));
    assert_eq!(forest.size(), 1);

    let c = forest.add(3);
    forest.link(c, b).unwrap();
    assert_eq!(forest.parent(c), Some(b));
    assert_eq!(*forest.value(c), 3);
}

#[test]
fn test_star_cut_without_search() {
    const LEAVES: usize = 2000;
    let mut forest = EulerTourTree::<usize, VertexCount>::new();
    let center = forest.add(0);
    let leaves: Vec<NodeId> = (1..=LEAVES).map(|i| forest.add(i)).collect();
    let edges: Vec<Edge> = leaves
        .iter()
        .map(|&leaf| forest.link(leaf, center).unwrap())
        .collect();

    // after these, the center is a child of the last leaf and occurs once per other leaf
    forest.evert(leaves[0]);
    forest.evert(leaves[LEAVES / 2]);
    forest.evert(leaves[LEAVES - 1]);

    SEARCH_STEPS.with(|steps| steps.set(0));
    for (i, &edge) in edges.iter().enumerate().rev() {
        forest.cut(edge).unwrap();
        assert!(forest.is_root(leaves[i]));
        assert_eq!(forest.tour(leaves[i]), vec![leaves[i]]);
        if i > 0 {
            assert_eq!(forest.find_root(center), center);
            assert_eq!(forest.find_root(leaves[i - 1]), center);
        }
    }
    assert_eq!(SEARCH_STEPS.with(|steps| steps.get()), 0);
    assert_eq!(forest.tour(center), vec![center]);

    // the handles are stale now
    assert_eq!(
        forest.cut(edges[7]),
        Err(ForestError::NotLinked(leaves[7], center))
    );
}

#[test]
fn test_reversed_edge_handle() {
    let mut forest = EulerTourTree::<()>::new();
    let r = forest.add(());
    let a = forest.add(());
    let b = forest.add(());
    let ab = forest.link(b, a).unwrap();
    let ar = forest.link(a, r).unwrap();

    forest.evert(b);
    assert_eq!(forest.parent(a), Some(b));
    forest.cut(ab).unwrap();
    assert_eq!(forest.tour(b), vec![b]);
    assert_eq!(forest.tour(a), vec![a, r, a]);

    // a handle from an earlier link between the same vertices still names their edge
    forest.cut(ar).unwrap();
    forest.link(r, a).unwrap();
    forest.cut(ar).unwrap();
    assert!(forest.is_root(a));
    assert!(forest.is_root(r));
    assert_eq!(ar, Edge::new(a, r));
}

#[test]
fn randomized_evert_test() {
    const N: usize = 150;
    let mut rng = StdRng::seed_from_u64(0xe7e7);

    let mut forest = EulerTourTree::<usize, VertexCount>::with_capacity(N);
    let nodes: Vec<NodeId> = (0..N).map(|i| forest.add(i)).collect();
    let mut parents = vec![None; N];
    // handles returned by link, by unordered endpoints
    let mut edges = HashMap::new();

    for _ in 0..4000 {
        let u = rng.gen_range(0..N);
        let v = rng.gen_range(0..N);
        match rng.gen_range(0..3) {
            0 => {
                let root = reference_root(&parents, u);
                if reference_root(&parents, v) != root {
                    let edge = forest.link(nodes[root], nodes[v]).unwrap();
                    edges.insert((root.min(v), root.max(v)), edge);
                    parents[root] = Some(v);
                }
            }
            1 => {
                if let Some(p) = parents[u] {
                    let edge = edges.remove(&(u.min(p), u.max(p))).unwrap();
                    if rng.gen_bool(0.5) {
                        forest.cut(edge).unwrap();
                    } else {
                        forest.cut(Edge::new(nodes[u], nodes[p])).unwrap();
                    }
                    parents[u] = None;
                    assert!(forest.cut(edge).is_err());
                }
            }
            _ => {
                forest.evert(nodes[u]);
                reference_evert(&mut parents, u);
            }
        }

        let w = rng.gen_range(0..N);
        assert_eq!(forest.find_root(nodes[w]), nodes[reference_root(&parents, w)]);
        assert_eq!(forest.parent(nodes[w]), parents[w].map(|p| nodes[p]));
        assert_eq!(
            forest.subtree_statistic(nodes[w]).vertices,
            reference_subtree_size(&parents, w)
        );
        assert_eq!(
            forest.find_lca(nodes[u], nodes[w]),
            reference_lca(&parents, u, w).map(|l| nodes[l])
        );
    }
}

#[test]
fn randomized_lca_test() {
    const N: usize = 255;
    let mut rng = StdRng::seed_from_u64(0x1ca);

    let mut forest = EulerTourTree::<(), LcaStatistic, false>::new();
    let nodes: Vec<NodeId> = (0..N).map(|_| forest.add(())).collect();
    let mut parents = vec![None; N];
    for i in 1..N {
        forest.link(nodes[i], nodes[(i - 1) / 2]).unwrap();
        parents[i] = Some((i - 1) / 2);
    }

    for _ in 0..10_000 {
        let u = rng.gen_range(0..N);
        let v = rng.gen_range(0..N);
        let expected = reference_lca(&parents, u, v).map(|l| nodes[l]);
        assert_eq!(forest.find_lca_by_range_min(nodes[u], nodes[v]), expected);
        assert_eq!(forest.find_lca(nodes[u], nodes[v]), expected);

        // move a random subtree below a random vertex outside of it
        let c = rng.gen_range(1..N);
        if let Some(p) = parents[c] {
            assert_eq!(forest.cut_parent(nodes[c]), Ok(nodes[p]));
            parents[c] = None;

            let target = rng.gen_range(0..N);
            let new_parent = if reference_root(&parents, target) == c {
                p
            } else {
                target
            };
            forest.link(nodes[c], nodes[new_parent]).unwrap();
            parents[c] = Some(new_parent);
        }
    }
}
