//! Drawable description of the diagram, independent of any canvas.

use super::config::RingConfig;
use super::layout::RadialLayout;
use super::state::ViewState;
use super::style::{ACCENT, holder_caption, tooltip_title};
use super::types::{NodeIdx, NodeKind};

pub const EDGE_COLOR: &str = "rgba(255, 255, 255, 0.15)";
pub const RING_COLOR: &str = "rgba(255, 255, 255, 0.05)";
pub const RING_LABEL_COLOR: &str = "rgba(255, 255, 255, 0.2)";

const ACTIVE_SCALE: f64 = 1.05;
const TOOLTIP_WIDTH: f64 = 240.0;

#[derive(Clone, Debug, PartialEq)]
pub struct RingGuide {
	pub radius: f64,
	pub label: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeShape {
	pub id: String,
	pub from: (f64, f64),
	pub to: (f64, f64),
	pub highlighted: bool,
}

impl EdgeShape {
	pub fn stroke(&self) -> &'static str {
		if self.highlighted { ACCENT } else { EDGE_COLOR }
	}

	pub fn width(&self) -> f64 {
		if self.highlighted { 2.0 } else { 1.0 }
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeShape {
	pub idx: NodeIdx,
	pub id: String,
	pub kind: NodeKind,
	pub x: f64,
	pub y: f64,
	pub name: String,
	/// Caption under the name; never shown on the root.
	pub holder: Option<String>,
	pub active: bool,
	pub selected: bool,
}

impl NodeShape {
	pub fn scale(&self) -> f64 {
		if self.active { ACTIVE_SCALE } else { 1.0 }
	}

	/// Half extents of the drawn box.
	pub fn half_size(&self) -> (f64, f64) {
		let style = self.kind.style();
		let k = self.scale();
		(style.width * k / 2.0, style.height * k / 2.0)
	}

	pub fn border(&self) -> &'static str {
		if self.active { ACCENT } else { self.kind.style().border }
	}

	pub fn border_width(&self) -> f64 {
		if self.active { 2.0 } else { 1.5 }
	}

	pub fn contains(&self, x: f64, y: f64) -> bool {
		let (hw, hh) = self.half_size();
		(x - self.x).abs() <= hw && (y - self.y).abs() <= hh
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
	/// Top-left corner.
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
	pub title: String,
	pub holder: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	pub rings: Vec<RingGuide>,
	pub edges: Vec<EdgeShape>,
	pub nodes: Vec<NodeShape>,
	pub tooltip: Option<Tooltip>,
}

impl Scene {
	pub fn build(
		layout: &RadialLayout,
		view: &ViewState,
		highlighted: Option<&str>,
		rings: &RingConfig,
	) -> Self {
		let highlight = view.highlight(layout, highlighted);

		let edges = layout
			.edges
			.iter()
			.map(|edge| EdgeShape {
				id: edge.id.clone(),
				from: (edge.source_x, edge.source_y),
				to: (edge.target_x, edge.target_y),
				highlighted: highlight.touches(edge),
			})
			.collect();

		let nodes = layout
			.nodes
			.iter()
			.enumerate()
			.map(|(i, node)| {
				let idx = NodeIdx(i);
				let selected = view.selected.as_deref() == Some(node.id());
				let holder = (!node.record.holder.is_empty() && *node.kind() != NodeKind::Senate)
					.then(|| holder_caption(&node.record.holder).to_string());
				NodeShape {
					idx,
					id: node.id().to_string(),
					kind: node.kind().clone(),
					x: node.x,
					y: node.y,
					name: node.record.name.clone(),
					holder,
					active: selected || highlight.marks(idx, layout),
					selected,
				}
			})
			.collect();

		let tooltip = view
			.hovered
			.as_deref()
			.and_then(|id| layout.by_id(id))
			.map(|node| {
				let holder = (!node.record.holder.is_empty()).then(|| node.record.holder.clone());
				Tooltip {
					x: node.x - TOOLTIP_WIDTH / 2.0,
					y: node.y + node.kind().style().height / 2.0 + 8.0,
					width: TOOLTIP_WIDTH,
					height: if holder.is_some() { 52.0 } else { 36.0 },
					title: tooltip_title(&node.record.full_name),
					holder,
				}
			});

		Scene {
			rings: vec![
				RingGuide {
					radius: rings.councils,
					label: "Councils",
				},
				RingGuide {
					radius: rings.boards,
					label: "Boards",
				},
				RingGuide {
					radius: rings.clubs,
					label: "Clubs",
				},
			],
			edges,
			nodes,
			tooltip,
		}
	}

	/// Topmost node under a world-space point.
	pub fn node_at(&self, x: f64, y: f64) -> Option<&NodeShape> {
		self.nodes.iter().rev().find(|node| node.contains(x, y))
	}
}

#[cfg(test)]
mod tests {
	use super::super::config::{LayoutConfig, ViewConfig};
	use super::super::state::ViewEvent;
	use super::super::types::{HierarchyData, HierarchyNode};
	use super::*;

	fn layout() -> RadialLayout {
		let mut council = HierarchyNode::new("acac", "ACAC", NodeKind::Main, None);
		council.holder = "Meera Krishnamurthy".into();
		council.full_name = "Academic Affairs Council of the Student Senate".into();
		let data = HierarchyData {
			main_bodies: vec![council, HierarchyNode::new("ss", "SS", NodeKind::Main, None)],
			boards: vec![HierarchyNode::new("bos", "BoS", NodeKind::Board, Some("ss"))],
			clubs: vec![HierarchyNode::new("chess", "Chess", NodeKind::Club, Some("bos"))],
		};
		RadialLayout::compute(&data, &LayoutConfig::default())
	}

	fn build(view: &ViewState, highlighted: Option<&str>) -> (RadialLayout, Scene) {
		let layout = layout();
		let scene = Scene::build(&layout, view, highlighted, &LayoutConfig::default().rings);
		(layout, scene)
	}

	fn shape<'a>(scene: &'a Scene, id: &str) -> &'a NodeShape {
		scene.nodes.iter().find(|n| n.id == id).unwrap()
	}

	#[test]
	fn idle_scene_has_no_emphasis() {
		let (layout, scene) = build(&ViewState::default(), None);
		assert_eq!(scene.nodes.len(), layout.nodes.len());
		assert_eq!(scene.edges.len(), layout.edges.len());
		assert!(scene.nodes.iter().all(|n| !n.active && !n.selected));
		assert!(scene.edges.iter().all(|e| e.stroke() == EDGE_COLOR && e.width() == 1.0));
		assert_eq!(scene.tooltip, None);
		let radii: Vec<f64> = scene.rings.iter().map(|r| r.radius).collect();
		assert_eq!(radii, vec![140.0, 280.0, 420.0]);
	}

	#[test]
	fn selection_lights_lineage_and_marks_selected() {
		let layout = layout();
		let mut view = ViewState::default();
		view.apply(&ViewEvent::NodeClick("chess".into()), &layout, &ViewConfig::default());
		let scene = Scene::build(&layout, &view, None, &LayoutConfig::default().rings);

		let active: Vec<&str> = scene.nodes.iter().filter(|n| n.active).map(|n| n.id.as_str()).collect();
		assert_eq!(active, vec!["student-senate", "ss", "bos", "chess"]);
		assert!(shape(&scene, "chess").selected);
		assert_eq!(shape(&scene, "chess").border(), ACCENT);
		assert_eq!(shape(&scene, "acac").border(), NodeKind::Main.style().border);

		let lit: Vec<&str> = scene.edges.iter().filter(|e| e.highlighted).map(|e| e.id.as_str()).collect();
		assert_eq!(lit, vec!["bos-chess"]);
	}

	#[test]
	fn unknown_kind_is_drawn_with_club_style() {
		let data = HierarchyData {
			main_bodies: vec![HierarchyNode::new("ss", "SS", NodeKind::Main, None)],
			boards: vec![HierarchyNode::new("bos", "BoS", NodeKind::Board, Some("ss"))],
			clubs: vec![HierarchyNode::new("esports", "Esports", NodeKind::from("guild"), Some("bos"))],
		};
		let layout = RadialLayout::compute(&data, &LayoutConfig::default());
		let scene = Scene::build(&layout, &ViewState::default(), None, &LayoutConfig::default().rings);

		let guild = shape(&scene, "esports");
		assert_eq!(guild.kind.style(), NodeKind::Club.style());
		assert_eq!(guild.border(), NodeKind::Club.style().border);
		assert!(scene.edges.iter().any(|e| e.id == "bos-esports"));
		assert_eq!(layout.by_id("esports").map(|n| n.ring), Some(3));
	}

	#[test]
	fn external_highlight_activates_one_node() {
		let (_, scene) = build(&ViewState::default(), Some("acac"));
		let active: Vec<&str> = scene.nodes.iter().filter(|n| n.active).map(|n| n.id.as_str()).collect();
		assert_eq!(active, vec!["acac"]);
		assert!(scene.edges.iter().all(|e| !e.highlighted));
	}

	#[test]
	fn hovered_node_gets_tooltip() {
		let view = ViewState {
			hovered: Some("acac".into()),
			..ViewState::default()
		};
		let (layout, scene) = build(&view, None);
		let tip = scene.tooltip.as_ref().unwrap();
		let acac = layout.by_id("acac").unwrap();
		assert_eq!(tip.title, "Academic Affairs Council of the Stu...");
		assert_eq!(tip.holder.as_deref(), Some("Meera Krishnamurthy"));
		assert_eq!(tip.height, 52.0);
		assert_eq!(tip.x, acac.x - 120.0);
		assert_eq!(shape(&scene, "acac").holder.as_deref(), Some("Meera"));
	}

	#[test]
	fn hit_test_uses_box_extents() {
		let (layout, scene) = build(&ViewState::default(), None);
		let bos = layout.by_id("bos").unwrap();
		assert_eq!(scene.node_at(bos.x + 37.0, bos.y - 14.0).map(|n| n.id.as_str()), Some("bos"));
		assert_eq!(scene.node_at(bos.x + 38.0, bos.y), None);
		assert_eq!(scene.node_at(0.0, 0.0).map(|n| n.id.as_str()), Some("student-senate"));
	}
}
