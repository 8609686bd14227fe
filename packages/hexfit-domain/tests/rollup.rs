use std::collections::{BTreeMap, BTreeSet};

use hexfit_domain::{
	Skill,
	rollup::{self, RollupNode},
};

struct Group {
	id: &'static str,
	quantity: Option<f64>,
	skills: Vec<Skill>,
	tags: Vec<&'static str>,
	members: Vec<&'static str>,
}
impl RollupNode for Group {
	fn node_id(&self) -> &str {
		self.id
	}
}

fn skill(id: &str, level: u32) -> Skill {
	Skill { id: id.to_string(), level }
}

fn graph() -> BTreeMap<&'static str, Group> {
	let groups = [
		Group {
			id: "coop",
			quantity: None,
			skills: vec![],
			tags: vec!["food"],
			members: vec!["kitchen", "drivers"],
		},
		Group {
			id: "kitchen",
			quantity: Some(12.0),
			skills: vec![skill("cooking", 3)],
			tags: vec!["food", "indoor"],
			members: vec!["coop"],
		},
		Group {
			id: "drivers",
			quantity: Some(4.5),
			skills: vec![skill("driving", 2), skill("cooking", 5)],
			tags: vec!["outdoor"],
			members: vec!["kitchen"],
		},
		Group { id: "unrelated", quantity: Some(100.0), skills: vec![], tags: vec![], members: vec![] },
	];

	groups.into_iter().map(|group| (group.id, group)).collect()
}

fn members<'a>(graph: &'a BTreeMap<&'static str, Group>, group: &'a Group) -> Vec<&'a Group> {
	group.members.iter().filter_map(|id| graph.get(id)).collect()
}

#[test]
fn sums_each_reachable_node_once_despite_cycles() {
	let graph = graph();
	let roots = [&graph["coop"]];
	let total = rollup::aggregate(
		roots,
		|group| members(&graph, group),
		|group| group.quantity,
		0.0,
		rollup::sum,
	);

	assert_eq!(total, 16.5);
}

#[test]
fn max_levels_keeps_highest_skill() {
	let graph = graph();
	let levels = rollup::aggregate(
		[&graph["coop"]],
		|group| members(&graph, group),
		|group| Some(group.skills.clone()),
		BTreeMap::new(),
		rollup::max_levels,
	);

	assert_eq!(levels.get("cooking"), Some(&5));
	assert_eq!(levels.get("driving"), Some(&2));
}

#[test]
fn union_collects_distinct_tags() {
	let graph = graph();
	let tags = rollup::aggregate(
		[&graph["drivers"]],
		|group| members(&graph, group),
		|group| Some(group.tags.iter().map(|tag| tag.to_string()).collect::<Vec<_>>()),
		BTreeSet::new(),
		rollup::union,
	);
	let expected: BTreeSet<String> =
		["food", "indoor", "outdoor"].into_iter().map(str::to_string).collect();

	assert_eq!(tags, expected);
}

#[test]
fn duplicate_roots_are_visited_once() {
	let graph = graph();
	let leaf = &graph["unrelated"];
	let visits = rollup::aggregate(
		[leaf, leaf],
		|_| Vec::<&Group>::new(),
		|_| Some(1_u32),
		0,
		|acc, visit| acc + visit,
	);

	assert_eq!(visits, 1);
}
