//! View state of the radial diagram and the transitions driving it.
//!
//! Every DOM event is turned into a [`ViewEvent`] before it reaches this
//! module, so [`ViewState::transition`] is a plain function of the previous
//! state, the event and the current layout.

use log::{debug, warn};

use super::config::ViewConfig;
use super::error::ViewError;
use super::layout::RadialLayout;
use super::scale::ViewBox;
use super::types::{Edge, HierarchyNode, NodeIdx, ProcessedNode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
	Primary,
	Middle,
	Secondary,
	Other(i16),
}

impl From<i16> for PointerButton {
	fn from(button: i16) -> Self {
		match button {
			0 => PointerButton::Primary,
			1 => PointerButton::Middle,
			2 => PointerButton::Secondary,
			other => PointerButton::Other(other),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewEvent {
	PointerDown { button: PointerButton, x: f64, y: f64 },
	PointerMove { x: f64, y: f64 },
	PointerUp,
	PointerLeave,
	Wheel { delta_y: f64 },
	ZoomIn,
	ZoomOut,
	NodeClick(String),
	NodeEnter(String),
	NodeLeave(String),
	ClearSelection,
	ResetView,
	CenterOnSelected,
	/// The hierarchy was re-laid out; stale ids must go.
	LayoutChanged,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PointerMode {
	#[default]
	Idle,
	Panning {
		last_x: f64,
		last_y: f64,
		/// Pixels travelled since the button went down.
		travel: f64,
	},
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
	pub zoom: f64,
	pub pan_x: f64,
	pub pan_y: f64,
	pub selected: Option<String>,
	pub hovered: Option<String>,
	pub pointer: PointerMode,
}

impl Default for ViewState {
	fn default() -> Self {
		Self {
			zoom: 1.0,
			pan_x: 0.0,
			pan_y: 0.0,
			selected: None,
			hovered: None,
			pointer: PointerMode::Idle,
		}
	}
}

/// What the host is told when the selection changes.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectionNotice {
	Selected(HierarchyNode),
	Cleared,
}

impl SelectionNotice {
	pub fn into_option(self) -> Option<HierarchyNode> {
		match self {
			SelectionNotice::Selected(node) => Some(node),
			SelectionNotice::Cleared => None,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
	pub state: ViewState,
	pub notice: Option<SelectionNotice>,
}

/// Active node plus its ancestor chain and the host's highlight, resolved
/// once per frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathHighlight {
	pub active: Option<NodeIdx>,
	pub ancestors: Vec<NodeIdx>,
	pub external: Option<NodeIdx>,
}

impl PathHighlight {
	/// The active node, its ancestors or its descendants.
	pub fn in_path(&self, idx: NodeIdx, layout: &RadialLayout) -> bool {
		let Some(active) = self.active else {
			return false;
		};
		idx == active || self.ancestors.contains(&idx) || layout.is_ancestor(active, idx)
	}

	/// In the active path, or the node the host asked to highlight.
	pub fn marks(&self, idx: NodeIdx, layout: &RadialLayout) -> bool {
		self.external == Some(idx) || self.in_path(idx, layout)
	}

	pub fn touches(&self, edge: &Edge) -> bool {
		self.active
			.is_some_and(|active| edge.source == active || edge.target == active)
	}
}

impl ViewState {
	pub fn transition(
		&self,
		event: &ViewEvent,
		layout: &RadialLayout,
		config: &ViewConfig,
	) -> Transition {
		let mut next = self.clone();
		match next.step(event, layout, config) {
			Ok(notice) => Transition {
				state: next,
				notice,
			},
			Err(err) => {
				match err {
					ViewError::NonFinitePan { .. } | ViewError::NonFiniteZoom(_) => {
						warn!("ignoring {event:?}: {err}")
					}
					_ => debug!("ignoring {event:?}: {err}"),
				}
				Transition {
					state: self.clone(),
					notice: None,
				}
			}
		}
	}

	pub fn apply(
		&mut self,
		event: &ViewEvent,
		layout: &RadialLayout,
		config: &ViewConfig,
	) -> Option<SelectionNotice> {
		let Transition { state, notice } = self.transition(event, layout, config);
		*self = state;
		notice
	}

	fn step(
		&mut self,
		event: &ViewEvent,
		layout: &RadialLayout,
		config: &ViewConfig,
	) -> Result<Option<SelectionNotice>, ViewError> {
		match event {
			ViewEvent::PointerDown { button, x, y } => {
				if *button == PointerButton::Primary {
					self.pointer = PointerMode::Panning {
						last_x: *x,
						last_y: *y,
						travel: 0.0,
					};
				}
			}
			ViewEvent::PointerMove { x, y } => {
				if let PointerMode::Panning {
					last_x,
					last_y,
					travel,
				} = self.pointer
				{
					self.pan_by(x - last_x, y - last_y, config)?;
					self.pointer = PointerMode::Panning {
						last_x: *x,
						last_y: *y,
						travel: travel + (x - last_x).hypot(y - last_y),
					};
				}
			}
			ViewEvent::PointerUp => self.pointer = PointerMode::Idle,
			ViewEvent::PointerLeave => {
				self.pointer = PointerMode::Idle;
				self.hovered = None;
			}
			ViewEvent::Wheel { delta_y } => {
				let factor = if *delta_y > 0.0 {
					config.wheel_out
				} else {
					config.wheel_in
				};
				self.zoom_to(self.zoom * factor, config)?;
			}
			ViewEvent::ZoomIn => self.zoom_to(self.zoom * config.button_step, config)?,
			ViewEvent::ZoomOut => self.zoom_to(self.zoom / config.button_step, config)?,
			ViewEvent::NodeClick(id) => {
				let node = layout
					.by_id(id)
					.ok_or_else(|| ViewError::UnknownNode(id.clone()))?;
				if self.selected.as_deref() == Some(id.as_str()) {
					self.selected = None;
					return Ok(Some(SelectionNotice::Cleared));
				}
				self.selected = Some(id.clone());
				return Ok(Some(SelectionNotice::Selected(node.record.clone())));
			}
			ViewEvent::NodeEnter(id) => {
				if layout.index_of(id).is_none() {
					return Err(ViewError::UnknownNode(id.clone()));
				}
				self.hovered = Some(id.clone());
			}
			ViewEvent::NodeLeave(id) => {
				if self.hovered.as_deref() == Some(id.as_str()) {
					self.hovered = None;
				}
			}
			ViewEvent::ClearSelection => return Ok(self.clear_selection()),
			ViewEvent::ResetView => {
				self.zoom = 1.0;
				self.pan_x = 0.0;
				self.pan_y = 0.0;
				return Ok(self.clear_selection());
			}
			ViewEvent::CenterOnSelected => {
				let id = self.selected.as_deref().ok_or(ViewError::NoSelection)?;
				let node = layout
					.by_id(id)
					.ok_or_else(|| ViewError::UnknownNode(id.to_string()))?;
				self.pan_x = -node.x;
				self.pan_y = -node.y;
				self.zoom = config.clamp_zoom(config.focus_zoom);
			}
			ViewEvent::LayoutChanged => {
				self.hovered = None;
				let stale = self
					.selected
					.as_deref()
					.is_some_and(|id| layout.index_of(id).is_none());
				if stale {
					return Ok(self.clear_selection());
				}
			}
		}
		Ok(None)
	}

	fn clear_selection(&mut self) -> Option<SelectionNotice> {
		self.selected.take().map(|_| SelectionNotice::Cleared)
	}

	/// Screen-space drag of (dx, dy) pixels; divided by zoom so a drag moves
	/// the diagram the same visual distance at any zoom level.
	fn pan_by(&mut self, dx: f64, dy: f64, config: &ViewConfig) -> Result<(), ViewError> {
		let zoom = config.clamp_zoom(self.zoom);
		let (x, y) = (self.pan_x - dx / zoom, self.pan_y - dy / zoom);
		if !(x.is_finite() && y.is_finite()) {
			return Err(ViewError::NonFinitePan { dx, dy });
		}
		self.pan_x = x;
		self.pan_y = y;
		Ok(())
	}

	fn zoom_to(&mut self, zoom: f64, config: &ViewConfig) -> Result<(), ViewError> {
		if zoom.is_nan() {
			return Err(ViewError::NonFiniteZoom(zoom));
		}
		self.zoom = config.clamp_zoom(zoom);
		Ok(())
	}

	pub fn view_box(&self, config: &ViewConfig) -> ViewBox {
		ViewBox::new(
			config.clamp_zoom(self.zoom),
			self.pan_x,
			self.pan_y,
			config.base_size,
		)
	}

	pub fn is_panning(&self) -> bool {
		matches!(self.pointer, PointerMode::Panning { .. })
	}

	pub fn pan_travel(&self) -> f64 {
		match self.pointer {
			PointerMode::Panning { travel, .. } => travel,
			PointerMode::Idle => 0.0,
		}
	}

	/// Hover wins over selection.
	pub fn active_id(&self) -> Option<&str> {
		self.hovered.as_deref().or(self.selected.as_deref())
	}

	pub fn highlight(&self, layout: &RadialLayout, external: Option<&str>) -> PathHighlight {
		let active = self.active_id().and_then(|id| layout.index_of(id));
		PathHighlight {
			active,
			ancestors: active.map(|idx| layout.ancestors(idx)).unwrap_or_default(),
			external: external.and_then(|id| layout.index_of(id)),
		}
	}

	pub fn selected_node<'a>(&self, layout: &'a RadialLayout) -> Option<&'a ProcessedNode> {
		self.selected.as_deref().and_then(|id| layout.by_id(id))
	}

	/// Root first, selected node last; empty without a selection.
	pub fn breadcrumb(&self, layout: &RadialLayout) -> Vec<NodeIdx> {
		self.selected
			.as_deref()
			.and_then(|id| layout.index_of(id))
			.map(|idx| layout.breadcrumb(idx))
			.unwrap_or_default()
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::super::config::LayoutConfig;
	use super::super::types::{HierarchyData, NodeKind};
	use super::*;

	fn node(id: &str, kind: NodeKind, parent: Option<&str>) -> HierarchyNode {
		HierarchyNode::new(id, id, kind, parent)
	}

	/// root -> C -> {B, B2}; B -> {X, X2}; plus a second council C2.
	fn layout() -> RadialLayout {
		let data = HierarchyData {
			main_bodies: vec![node("C", NodeKind::Main, None), node("C2", NodeKind::Main, None)],
			boards: vec![
				node("B", NodeKind::Board, Some("C")),
				node("B2", NodeKind::Board, Some("C")),
			],
			clubs: vec![
				node("X", NodeKind::Club, Some("B")),
				node("X2", NodeKind::Committee, Some("B")),
			],
		};
		RadialLayout::compute(&data, &LayoutConfig::default())
	}

	fn run(state: &mut ViewState, events: &[ViewEvent]) -> Vec<Option<SelectionNotice>> {
		let (layout, config) = (layout(), ViewConfig::default());
		events
			.iter()
			.map(|event| state.apply(event, &layout, &config))
			.collect()
	}

	fn click(id: &str) -> ViewEvent {
		ViewEvent::NodeClick(id.to_string())
	}

	#[test]
	fn clicking_twice_clears_selection() {
		let mut state = ViewState::default();
		let notices = run(&mut state, &[click("X"), click("X")]);
		assert_eq!(state.selected, None);
		assert!(matches!(&notices[0], Some(SelectionNotice::Selected(n)) if n.id == "X"));
		assert_eq!(notices[1], Some(SelectionNotice::Cleared));
	}

	#[test]
	fn clicking_another_node_replaces_selection() {
		let mut state = ViewState::default();
		let notices = run(&mut state, &[click("X"), click("B2")]);
		assert_eq!(state.selected.as_deref(), Some("B2"));
		assert_eq!(
			notices[1].clone().and_then(SelectionNotice::into_option).map(|n| n.kind),
			Some(NodeKind::Board)
		);
	}

	#[test]
	fn clicking_unknown_node_changes_nothing() {
		let mut state = ViewState::default();
		let notices = run(&mut state, &[click("X"), click("nope")]);
		assert_eq!(state.selected.as_deref(), Some("X"));
		assert_eq!(notices[1], None);
	}

	#[test]
	fn button_zoom_compounds_and_clamps() {
		let mut state = ViewState::default();
		let mut seen = Vec::new();
		for _ in 0..5 {
			run(&mut state, &[ViewEvent::ZoomIn]);
			seen.push(state.zoom);
		}
		let expected = [1.3, 1.69, 2.197, 2.8561, 3.0];
		for (got, want) in seen.iter().zip(expected) {
			assert!((got - want).abs() < 1e-9, "{got} != {want}");
		}
	}

	#[test]
	fn wheel_direction_picks_factor() {
		let mut state = ViewState::default();
		run(&mut state, &[ViewEvent::Wheel { delta_y: 120.0 }]);
		assert!((state.zoom - 0.9).abs() < 1e-12);
		run(
			&mut state,
			&[ViewEvent::Wheel { delta_y: -120.0 }, ViewEvent::Wheel { delta_y: -1.0 }],
		);
		assert!((state.zoom - 0.9 * 1.1 * 1.1).abs() < 1e-12);
	}

	#[test]
	fn nan_zoom_input_is_rejected() {
		let mut state = ViewState::default();
		run(&mut state, &[ViewEvent::ZoomIn]);
		let before = state.clone();
		let config = ViewConfig {
			button_step: f64::NAN,
			..ViewConfig::default()
		};
		state.apply(&ViewEvent::ZoomIn, &layout(), &config);
		assert_eq!(state, before);
	}

	#[test]
	fn panning_moves_against_the_drag_scaled_by_zoom() {
		let mut state = ViewState {
			zoom: 2.0,
			..ViewState::default()
		};
		run(
			&mut state,
			&[
				ViewEvent::PointerDown {
					button: PointerButton::Primary,
					x: 100.0,
					y: 100.0,
				},
				ViewEvent::PointerMove { x: 140.0, y: 70.0 },
			],
		);
		assert_eq!((state.pan_x, state.pan_y), (-20.0, 15.0));
		assert_eq!(state.pan_travel(), 50.0);

		run(&mut state, &[ViewEvent::PointerUp, ViewEvent::PointerMove { x: 0.0, y: 0.0 }]);
		assert!(!state.is_panning());
		assert_eq!((state.pan_x, state.pan_y), (-20.0, 15.0));
	}

	#[test]
	fn secondary_button_does_not_pan() {
		let mut state = ViewState::default();
		run(
			&mut state,
			&[
				ViewEvent::PointerDown {
					button: PointerButton::from(2),
					x: 0.0,
					y: 0.0,
				},
				ViewEvent::PointerMove { x: 50.0, y: 50.0 },
			],
		);
		assert_eq!((state.pan_x, state.pan_y), (0.0, 0.0));
	}

	#[test]
	fn non_finite_pan_is_rejected() {
		let mut state = ViewState::default();
		run(
			&mut state,
			&[
				ViewEvent::PointerDown {
					button: PointerButton::Primary,
					x: 0.0,
					y: 0.0,
				},
				ViewEvent::PointerMove { x: 10.0, y: 0.0 },
			],
		);
		let before = state.clone();
		run(&mut state, &[ViewEvent::PointerMove { x: f64::INFINITY, y: 0.0 }]);
		assert_eq!(state, before);
		assert!(state.view_box(&ViewConfig::default()).is_finite());
	}

	#[test]
	fn leaving_the_surface_stops_panning_and_hover() {
		let mut state = ViewState::default();
		run(
			&mut state,
			&[
				ViewEvent::NodeEnter("B".into()),
				ViewEvent::PointerDown {
					button: PointerButton::Primary,
					x: 0.0,
					y: 0.0,
				},
				ViewEvent::PointerLeave,
			],
		);
		assert_eq!(state.pointer, PointerMode::Idle);
		assert_eq!(state.hovered, None);
	}

	#[test]
	fn hover_is_independent_of_selection() {
		let mut state = ViewState::default();
		let notices = run(
			&mut state,
			&[click("X"), ViewEvent::NodeEnter("C2".into())],
		);
		assert_eq!(notices[1], None);
		assert_eq!(state.active_id(), Some("C2"));
		run(&mut state, &[ViewEvent::NodeLeave("B".into())]);
		assert_eq!(state.hovered.as_deref(), Some("C2"));
		run(&mut state, &[ViewEvent::NodeLeave("C2".into())]);
		assert_eq!(state.active_id(), Some("X"));
	}

	#[test]
	fn reset_view_keeps_hover() {
		let mut state = ViewState::default();
		let notices = run(
			&mut state,
			&[
				click("B"),
				ViewEvent::ZoomIn,
				ViewEvent::NodeEnter("X".into()),
				ViewEvent::ResetView,
			],
		);
		assert_eq!(notices[3], Some(SelectionNotice::Cleared));
		assert_eq!(
			(state.zoom, state.pan_x, state.pan_y, state.selected.as_deref()),
			(1.0, 0.0, 0.0, None)
		);
		assert_eq!(state.hovered.as_deref(), Some("X"));
	}

	#[test]
	fn center_on_selected_negates_the_node_position() {
		let layout = layout();
		let config = ViewConfig::default();
		let mut state = ViewState::default();

		state.apply(&ViewEvent::CenterOnSelected, &layout, &config);
		assert_eq!(state, ViewState::default());

		state.apply(&click("B"), &layout, &config);
		state.apply(&ViewEvent::CenterOnSelected, &layout, &config);
		let b = layout.by_id("B").unwrap();
		assert_eq!((state.pan_x, state.pan_y, state.zoom), (-b.x, -b.y, 1.5));

		let vb = state.view_box(&config);
		assert!((vb.x + vb.size / 2.0 + b.x).abs() < 1e-9);

		// The first council sits straight up at (0, -R1).
		state.apply(&click("C"), &layout, &config);
		state.apply(&ViewEvent::CenterOnSelected, &layout, &config);
		assert!(state.pan_x.abs() < 1e-9);
		assert!((state.pan_y - 140.0).abs() < 1e-9);
	}

	#[test]
	fn transition_leaves_the_input_untouched() {
		let (layout, config) = (layout(), ViewConfig::default());
		let state = ViewState::default();
		let next = state.transition(&click("C"), &layout, &config);
		assert_eq!(state, ViewState::default());
		assert_eq!(next.state.selected.as_deref(), Some("C"));
	}

	#[test]
	fn selecting_leaf_highlights_lineage_only() {
		let layout = layout();
		let mut state = ViewState::default();
		run(&mut state, &[click("X")]);

		let highlight = state.highlight(&layout, None);
		let in_path: Vec<&str> = layout
			.nodes
			.iter()
			.enumerate()
			.filter(|(i, _)| highlight.in_path(NodeIdx(*i), &layout))
			.map(|(_, n)| n.id())
			.collect();
		assert_eq!(in_path, vec!["student-senate", "C", "B", "X"]);

		let lit: Vec<&str> = layout
			.edges
			.iter()
			.filter(|e| highlight.touches(e))
			.map(|e| e.id.as_str())
			.collect();
		assert_eq!(lit, vec!["B-X"]);
	}

	#[test]
	fn hovering_a_council_highlights_its_subtree() {
		let layout = layout();
		let mut state = ViewState::default();
		run(&mut state, &[ViewEvent::NodeEnter("C".into())]);
		let idx = |id| layout.index_of(id).unwrap();
		let highlight = state.highlight(&layout, None);
		for id in ["student-senate", "C", "B", "B2", "X", "X2"] {
			assert!(highlight.in_path(idx(id), &layout), "{id}");
		}
		assert!(!highlight.in_path(idx("C2"), &layout));
		let lit = layout
			.edges
			.iter()
			.filter(|e| highlight.touches(e))
			.count();
		assert_eq!(lit, 3);
	}

	#[test]
	fn external_highlight_marks_a_single_node() {
		let layout = layout();
		let state = ViewState::default();
		let c2 = layout.index_of("C2").unwrap();
		let root = layout.index_of("student-senate").unwrap();
		assert!(state.highlight(&layout, Some("C2")).marks(c2, &layout));
		assert!(!state.highlight(&layout, Some("C2")).marks(root, &layout));
		assert!(!state.highlight(&layout, None).marks(c2, &layout));
		assert!(!state.highlight(&layout, Some("nope")).marks(c2, &layout));
	}

	#[test]
	fn breadcrumb_runs_from_root_to_selection() {
		let layout = layout();
		let mut state = ViewState::default();
		assert!(state.breadcrumb(&layout).is_empty());
		run(&mut state, &[click("X2")]);
		let names: Vec<&str> = state
			.breadcrumb(&layout)
			.into_iter()
			.map(|idx| layout.get(idx).unwrap().id())
			.collect();
		assert_eq!(names, vec!["student-senate", "C", "B", "X2"]);
		assert_eq!(state.selected_node(&layout).map(|n| n.ring), Some(3));
	}

	#[test]
	fn layout_change_drops_stale_ids() {
		let mut state = ViewState::default();
		run(&mut state, &[click("X"), ViewEvent::NodeEnter("B".into())]);

		let shrunk = RadialLayout::compute(
			&HierarchyData {
				main_bodies: vec![node("C", NodeKind::Main, None)],
				..Default::default()
			},
			&LayoutConfig::default(),
		);
		let notice = state.apply(&ViewEvent::LayoutChanged, &shrunk, &ViewConfig::default());
		assert_eq!(notice, Some(SelectionNotice::Cleared));
		assert_eq!((state.selected.clone(), state.hovered.clone()), (None, None));
	}

	proptest! {
		#[test]
		fn zoom_never_leaves_bounds(steps in prop::collection::vec(0u8..4, 0..64)) {
			let (layout, config) = (layout(), ViewConfig::default());
			let mut state = ViewState::default();
			for step in steps {
				let event = match step {
					0 => ViewEvent::ZoomIn,
					1 => ViewEvent::ZoomOut,
					2 => ViewEvent::Wheel { delta_y: 1.0 },
					_ => ViewEvent::Wheel { delta_y: -1.0 },
				};
				state.apply(&event, &layout, &config);
				prop_assert!(state.zoom >= config.min_zoom && state.zoom <= config.max_zoom);
			}
		}

		#[test]
		fn pan_stays_finite(moves in prop::collection::vec((-1e6f64..1e6, -1e6f64..1e6), 1..32)) {
			let (layout, config) = (layout(), ViewConfig::default());
			let mut state = ViewState::default();
			state.apply(&ViewEvent::PointerDown { button: PointerButton::Primary, x: 0.0, y: 0.0 }, &layout, &config);
			for (x, y) in moves {
				state.apply(&ViewEvent::PointerMove { x, y }, &layout, &config);
				prop_assert!(state.view_box(&config).is_finite());
			}
		}
	}
}
