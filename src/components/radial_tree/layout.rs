//! Radial placement of the senate hierarchy.
//!
//! The root sits at the origin; councils are spread evenly on the first
//! ring starting at twelve o'clock, boards fan out inside a sector around
//! their council, and clubs/committees fan out around their board (or
//! council) on the outer ring. Nodes live in a flat arena and refer to their
//! parent by index.

use std::collections::{HashMap, HashSet};
use std::f64::consts::{FRAC_PI_2, TAU};

use log::{debug, warn};

use super::config::LayoutConfig;
use super::error::LayoutIssue;
use super::types::{Edge, HierarchyData, HierarchyNode, NodeIdx, NodeKind, ProcessedNode};

/// Root, council, board, club. Ancestor walks never go further than this.
pub const MAX_DEPTH: usize = 4;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RadialLayout {
	pub nodes: Vec<ProcessedNode>,
	pub edges: Vec<Edge>,
	/// Records that were left out of the diagram, in input order.
	pub issues: Vec<LayoutIssue>,
	index: HashMap<String, NodeIdx>,
}

/// Evenly spaced angles across a sector of `width` radians centered on
/// `center`. A single child sits exactly on `center`.
pub fn sector_angles(center: f64, width: f64, count: usize) -> Vec<f64> {
	if count <= 1 {
		return vec![center; count];
	}
	let step = width / (count - 1) as f64;
	let start = center - width / 2.0;
	(0..count).map(|i| start + i as f64 * step).collect()
}

/// Keeps the first record per id; `seen` carries ids across tiers.
fn unique<'a>(
	nodes: &'a [HierarchyNode],
	seen: &mut HashSet<&'a str>,
	issues: &mut Vec<LayoutIssue>,
) -> Vec<&'a HierarchyNode> {
	nodes
		.iter()
		.filter(|node| {
			let fresh = seen.insert(node.id.as_str());
			if !fresh {
				issues.push(LayoutIssue::DuplicateId {
					id: node.id.clone(),
				});
			}
			fresh
		})
		.collect()
}

/// Groups records under the parent ids `accepts` allows, in input order.
/// Everything else becomes an issue and its id is marked as dropped.
fn group_by_parent<'a>(
	nodes: &[&'a HierarchyNode],
	accepts: impl Fn(&str) -> bool,
	seen: &HashSet<&str>,
	dropped: &mut HashSet<&'a str>,
	issues: &mut Vec<LayoutIssue>,
) -> HashMap<&'a str, Vec<&'a HierarchyNode>> {
	let mut groups: HashMap<&str, Vec<&HierarchyNode>> = HashMap::new();
	for &node in nodes {
		let issue = match node.parent_id() {
			Some(parent) if accepts(parent) => {
				groups.entry(parent).or_default().push(node);
				continue;
			}
			None => LayoutIssue::MissingParent {
				id: node.id.clone(),
			},
			Some(parent) if seen.contains(parent) && !dropped.contains(parent) => {
				LayoutIssue::MisplacedParent {
					id: node.id.clone(),
					parent: parent.to_string(),
				}
			}
			Some(parent) => LayoutIssue::DanglingParent {
				id: node.id.clone(),
				parent: parent.to_string(),
			},
		};
		dropped.insert(node.id.as_str());
		issues.push(issue);
	}
	groups
}

impl RadialLayout {
	/// Lay out the whole hierarchy. Pure: the same input always yields the
	/// same positions, and nothing is carried over between calls.
	pub fn compute(data: &HierarchyData, config: &LayoutConfig) -> Self {
		let mut layout = RadialLayout::default();
		let mut issues = Vec::new();

		let mut seen: HashSet<&str> = HashSet::new();
		seen.insert(config.root_id.as_str());
		let councils = unique(&data.main_bodies, &mut seen, &mut issues);
		let boards = unique(&data.boards, &mut seen, &mut issues);
		let clubs = unique(&data.clubs, &mut seen, &mut issues);
		let mut dropped: HashSet<&str> = HashSet::new();

		let root = layout.push(
			HierarchyNode {
				id: config.root_id.clone(),
				name: config.root_name.clone(),
				full_name: config.root_full_name.clone(),
				holder: String::new(),
				kind: NodeKind::Senate,
				parent: None,
			},
			0.0,
			0,
			None,
			config,
		);

		// Ring 1
		let step = if councils.is_empty() {
			0.0
		} else {
			TAU / councils.len() as f64
		};
		let mut council_slots: HashMap<&str, (NodeIdx, f64)> = HashMap::new();
		for (i, council) in councils.iter().enumerate() {
			if let Some(parent) = council.parent_id() {
				warn!("council {} ignores parent {}", council.id, parent);
			}
			let angle = -FRAC_PI_2 + i as f64 * step;
			let idx = layout.push((*council).clone(), angle, 1, Some(root), config);
			council_slots.insert(council.id.as_str(), (idx, angle));
		}

		// Ring 2
		let boards_by_council = group_by_parent(
			&boards,
			|parent| council_slots.contains_key(parent),
			&seen,
			&mut dropped,
			&mut issues,
		);
		let board_width = step * config.board_spread_ratio;
		let mut board_slots: Vec<(&str, NodeIdx, f64)> = Vec::new();
		for council in &councils {
			let Some(group) = boards_by_council.get(council.id.as_str()) else {
				continue;
			};
			let (council_idx, council_angle) = council_slots[council.id.as_str()];
			let angles = sector_angles(council_angle, board_width, group.len());
			for (board, angle) in group.iter().zip(angles) {
				let idx = layout.push((*board).clone(), angle, 2, Some(council_idx), config);
				board_slots.push((board.id.as_str(), idx, angle));
			}
		}

		// Ring 3
		let board_ids: HashSet<&str> = board_slots.iter().map(|(id, _, _)| *id).collect();
		let clubs_by_parent = group_by_parent(
			&clubs,
			|parent| board_ids.contains(parent) || council_slots.contains_key(parent),
			&seen,
			&mut dropped,
			&mut issues,
		);
		for &(board_id, board_idx, board_angle) in &board_slots {
			if let Some(group) = clubs_by_parent.get(board_id) {
				layout.fan_out(group, board_idx, board_angle, config.board_club_spread, config);
			}
		}
		for council in &councils {
			if let Some(group) = clubs_by_parent.get(council.id.as_str()) {
				let (council_idx, council_angle) = council_slots[council.id.as_str()];
				layout.fan_out(group, council_idx, council_angle, config.council_club_spread, config);
			}
		}

		for issue in &issues {
			warn!("dropped from diagram: {issue}");
		}
		layout.issues = issues;
		debug!(
			"radial layout: {} nodes, {} edges, {} dropped",
			layout.nodes.len(),
			layout.edges.len(),
			layout.issues.len()
		);
		layout
	}

	fn fan_out(
		&mut self,
		group: &[&HierarchyNode],
		parent: NodeIdx,
		center: f64,
		width: f64,
		config: &LayoutConfig,
	) {
		let angles = sector_angles(center, width, group.len());
		for (club, angle) in group.iter().zip(angles) {
			self.push((*club).clone(), angle, 3, Some(parent), config);
		}
	}

	fn push(
		&mut self,
		record: HierarchyNode,
		angle: f64,
		ring: u8,
		parent: Option<NodeIdx>,
		config: &LayoutConfig,
	) -> NodeIdx {
		let radius = config.rings.radius(ring);
		let (x, y) = if ring == 0 {
			(0.0, 0.0)
		} else {
			(angle.cos() * radius, angle.sin() * radius)
		};
		let idx = NodeIdx(self.nodes.len());

		if let Some(p) = parent {
			let source = &self.nodes[p.0];
			self.edges.push(Edge {
				id: format!("{}-{}", source.id(), record.id),
				source: p,
				target: idx,
				source_x: source.x,
				source_y: source.y,
				target_x: x,
				target_y: y,
				source_kind: source.kind().clone(),
				target_kind: record.kind.clone(),
			});
		}

		self.index.insert(record.id.clone(), idx);
		self.nodes.push(ProcessedNode {
			record,
			x,
			y,
			angle,
			ring,
			parent,
		});
		idx
	}

	pub fn root(&self) -> Option<NodeIdx> {
		(!self.nodes.is_empty()).then_some(NodeIdx(0))
	}

	pub fn index_of(&self, id: &str) -> Option<NodeIdx> {
		self.index.get(id).copied()
	}

	pub fn get(&self, idx: NodeIdx) -> Option<&ProcessedNode> {
		self.nodes.get(idx.0)
	}

	pub fn by_id(&self, id: &str) -> Option<&ProcessedNode> {
		self.index_of(id).and_then(|idx| self.get(idx))
	}

	pub fn parent_of(&self, idx: NodeIdx) -> Option<NodeIdx> {
		self.get(idx).and_then(|node| node.parent)
	}

	/// Parent chain of `idx`, nearest first. Stops after `MAX_DEPTH` hops so
	/// a corrupted chain cannot loop forever.
	pub fn ancestors(&self, idx: NodeIdx) -> Vec<NodeIdx> {
		let mut chain = Vec::new();
		let mut current = self.parent_of(idx);
		while let Some(parent) = current {
			if chain.len() == MAX_DEPTH {
				warn!("ancestor walk from {:?} exceeded depth {}", idx, MAX_DEPTH);
				break;
			}
			chain.push(parent);
			current = self.parent_of(parent);
		}
		chain
	}

	pub fn is_ancestor(&self, ancestor: NodeIdx, of: NodeIdx) -> bool {
		self.ancestors(of).contains(&ancestor)
	}

	/// Root first, `idx` last.
	pub fn breadcrumb(&self, idx: NodeIdx) -> Vec<NodeIdx> {
		if self.get(idx).is_none() {
			return Vec::new();
		}
		let mut path = self.ancestors(idx);
		path.reverse();
		path.push(idx);
		path
	}

	pub fn children_of(&self, idx: NodeIdx) -> impl Iterator<Item = NodeIdx> + '_ {
		self.edges
			.iter()
			.filter(move |edge| edge.source == idx)
			.map(|edge| edge.target)
	}
}
