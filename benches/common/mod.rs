#![allow(dead_code)]

use criterion::PlotConfiguration;
use rand::prelude::ThreadRng;
use rand::Rng;
use splay_forest::statistic::{Statistic, Sum};
use splay_forest::trees::euler::Occurrence;
use splay_forest::{DynamicForest, EulerTourTree, LinkCutTree, NodeId};

pub const SIZES: [usize; 6] = [1 << 8, 1 << 10, 1 << 12, 1 << 14, 1 << 16, 1 << 18];

/// A random recursive tree: every vertex picks a uniformly random parent among its predecessors.
pub fn random_parents(rng: &mut ThreadRng, len: usize) -> Vec<Option<usize>> {
    (0..len)
        .map(|i| (i > 0).then(|| rng.gen_range(0..i)))
        .collect()
}

/// A path of `len` vertices, the worst case for naive ancestor walks.
pub fn path_parents(len: usize) -> Vec<Option<usize>> {
    (0..len).map(|i| i.checked_sub(1)).collect()
}

pub fn construct_link_cut<const EVERTABLE: bool>(
    parents: &[Option<usize>],
) -> (LinkCutTree<u64, Sum<u64>, EVERTABLE>, Vec<NodeId>) {
    let mut forest = LinkCutTree::with_capacity(parents.len());
    let nodes = construct(&mut forest, parents, |i| i as u64);
    (forest, nodes)
}

pub fn construct_euler<S: Statistic<Occurrence>, const EVERTABLE: bool>(
    parents: &[Option<usize>],
) -> (EulerTourTree<(), S, EVERTABLE>, Vec<NodeId>) {
    let mut forest = EulerTourTree::with_capacity(parents.len());
    let nodes = construct(&mut forest, parents, |_| ());
    (forest, nodes)
}

fn construct<F: DynamicForest>(
    forest: &mut F,
    parents: &[Option<usize>],
    value: impl Fn(usize) -> F::Value,
) -> Vec<NodeId> {
    let nodes: Vec<NodeId> = (0..parents.len()).map(|i| forest.add(value(i))).collect();
    for (i, parent) in parents.iter().enumerate() {
        if let Some(p) = parent {
            forest
                .link(nodes[i], nodes[*p])
                .expect("parents describe a forest");
        }
    }
    nodes
}

pub fn plot_config() -> PlotConfiguration {
    PlotConfiguration::default().summary_scale(criterion::AxisScale::Logarithmic)
}
