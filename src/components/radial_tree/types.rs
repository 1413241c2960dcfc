use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

/// Position of a node in the layout arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdx(pub usize);

/// Closed set of hierarchy tags. Anything else is kept as `Unknown` so a
/// bad record degrades to a fallback style instead of failing the dataset.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
	Senate,
	Main,
	Board,
	Club,
	Committee,
	Unknown(String),
}

impl NodeKind {
	pub fn as_str(&self) -> &str {
		match self {
			NodeKind::Senate => "senate",
			NodeKind::Main => "main",
			NodeKind::Board => "board",
			NodeKind::Club => "club",
			NodeKind::Committee => "committee",
			NodeKind::Unknown(tag) => tag,
		}
	}

	/// Clubs and committees share the outer ring.
	pub fn is_leaf(&self) -> bool {
		matches!(self, NodeKind::Club | NodeKind::Committee)
	}
}

impl From<&str> for NodeKind {
	fn from(tag: &str) -> Self {
		match tag {
			"senate" => NodeKind::Senate,
			"main" => NodeKind::Main,
			"board" => NodeKind::Board,
			"club" => NodeKind::Club,
			"committee" => NodeKind::Committee,
			other => NodeKind::Unknown(other.to_string()),
		}
	}
}

impl From<String> for NodeKind {
	fn from(tag: String) -> Self {
		NodeKind::from(tag.as_str())
	}
}

impl From<NodeKind> for String {
	fn from(kind: NodeKind) -> Self {
		kind.as_str().to_string()
	}
}

impl fmt::Display for NodeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A single record of the organizational hierarchy as supplied by the host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyNode {
	pub id: String,
	pub name: String,
	pub full_name: String,
	#[serde(default)]
	pub holder: String,
	#[serde(rename = "type")]
	pub kind: NodeKind,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parent: Option<String>,
}

impl HierarchyNode {
	#[cfg(test)]
	pub fn new(id: &str, name: &str, kind: NodeKind, parent: Option<&str>) -> Self {
		Self {
			id: id.to_string(),
			name: name.to_string(),
			full_name: name.to_string(),
			holder: String::new(),
			kind,
			parent: parent.map(str::to_string),
		}
	}

	/// Parent id with empty strings treated as absent.
	pub fn parent_id(&self) -> Option<&str> {
		self.parent.as_deref().filter(|p| !p.is_empty())
	}
}

/// The three input tiers: councils, boards, clubs/committees.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyData {
	pub main_bodies: Vec<HierarchyNode>,
	pub boards: Vec<HierarchyNode>,
	pub clubs: Vec<HierarchyNode>,
}

impl HierarchyData {
	/// Split a flat record list into tiers by kind.
	///
	/// `senate` records are skipped since the root is synthesized. Records
	/// with an unknown kind land one tier below their parent; if the parent
	/// is not known (yet) they are dropped.
	pub fn from_records(records: impl IntoIterator<Item = HierarchyNode>) -> Self {
		let mut data = HierarchyData::default();
		let mut unknown = Vec::new();

		for record in records {
			match record.kind {
				NodeKind::Senate => warn!("skipping supplied senate record {}", record.id),
				NodeKind::Main => data.main_bodies.push(record),
				NodeKind::Board => data.boards.push(record),
				NodeKind::Club | NodeKind::Committee => data.clubs.push(record),
				NodeKind::Unknown(_) => unknown.push(record),
			}
		}

		for record in unknown {
			let tier = match record.parent_id() {
				None => Some(1),
				Some(parent) if data.main_bodies.iter().any(|n| n.id == parent) => Some(2),
				Some(parent) if data.boards.iter().any(|n| n.id == parent) => Some(3),
				Some(_) => None,
			};
			match tier {
				Some(1) => data.main_bodies.push(record),
				Some(2) => data.boards.push(record),
				Some(_) => data.clubs.push(record),
				None => warn!(
					"dropping {} with unknown type {}: parent unresolved",
					record.id, record.kind
				),
			}
		}
		data
	}

	pub fn iter(&self) -> impl Iterator<Item = &HierarchyNode> {
		self.main_bodies
			.iter()
			.chain(self.boards.iter())
			.chain(self.clubs.iter())
	}

	pub fn len(&self) -> usize {
		self.main_bodies.len() + self.boards.len() + self.clubs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProcessedNode {
	pub record: HierarchyNode,
	pub x: f64,
	pub y: f64,
	pub angle: f64,
	pub ring: u8,
	pub parent: Option<NodeIdx>,
}

impl ProcessedNode {
	pub fn id(&self) -> &str {
		&self.record.id
	}

	pub fn kind(&self) -> &NodeKind {
		&self.record.kind
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	pub id: String,
	pub source: NodeIdx,
	pub target: NodeIdx,
	pub source_x: f64,
	pub source_y: f64,
	pub target_x: f64,
	pub target_y: f64,
	pub source_kind: NodeKind,
	pub target_kind: NodeKind,
}
