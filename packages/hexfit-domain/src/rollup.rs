//! Breadth-first reduction over a graph of groups and members.
//!
//! Used to roll up group-level values (capacity quantities, skill levels, tags) from every
//! node reachable from a set of roots.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use ahash::AHashSet;

use crate::contact::Skill;

/// A graph node with a stable identity, used to visit each node once.
pub trait RollupNode {
	fn node_id(&self) -> &str;
}

/// Folds `extract` over every node reachable from `roots` through `children`.
///
/// Each node is visited once even when the graph has cycles or shared children. Nodes for
/// which `extract` returns `None` contribute nothing but are still traversed.
pub fn aggregate<'a, N, C, I, E, V, A, R>(
	roots: impl IntoIterator<Item = &'a N>,
	mut children: C,
	mut extract: E,
	init: A,
	mut reduce: R,
) -> A
where
	N: RollupNode + ?Sized + 'a,
	C: FnMut(&'a N) -> I,
	I: IntoIterator<Item = &'a N>,
	E: FnMut(&'a N) -> Option<V>,
	R: FnMut(A, V) -> A,
{
	let mut seen: AHashSet<&'a str> = AHashSet::new();
	let mut queue: VecDeque<&'a N> = VecDeque::new();
	let mut acc = init;

	for root in roots {
		if seen.insert(root.node_id()) {
			queue.push_back(root);
		}
	}

	while let Some(node) = queue.pop_front() {
		if let Some(value) = extract(node) {
			acc = reduce(acc, value);
		}

		for child in children(node) {
			if seen.insert(child.node_id()) {
				queue.push_back(child);
			}
		}
	}

	acc
}

pub fn sum(acc: f64, value: f64) -> f64 {
	acc + value
}

/// Keeps the highest level seen per skill id.
pub fn max_levels<S>(mut acc: BTreeMap<String, u32>, skills: S) -> BTreeMap<String, u32>
where
	S: IntoIterator<Item = Skill>,
{
	for skill in skills {
		let level = acc.entry(skill.id).or_insert(skill.level);

		*level = (*level).max(skill.level);
	}

	acc
}

pub fn union<T>(mut acc: BTreeSet<String>, tags: T) -> BTreeSet<String>
where
	T: IntoIterator<Item = String>,
{
	acc.extend(tags);

	acc
}
