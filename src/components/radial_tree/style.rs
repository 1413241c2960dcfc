use super::types::NodeKind;

pub const ACCENT: &str = "#e58420";
pub const TEXT: &str = "#ffffff";
pub const HOLDER_TEXT: &str = "rgba(255, 255, 255, 0.7)";

const HOLDER_CAPTION_MAX: usize = 12;
const TOOLTIP_MAX: usize = 35;

/// Box geometry and palette for one kind of node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeStyle {
	pub width: f64,
	pub height: f64,
	pub font_size: f64,
	pub corner_radius: f64,
	pub fill: &'static str,
	pub border: &'static str,
	/// Swatch used by the legend, stats and search badges.
	pub swatch: &'static str,
}

const SENATE: NodeStyle = NodeStyle {
	width: 120.0,
	height: 50.0,
	font_size: 12.0,
	corner_radius: 8.0,
	fill: "#1e3a5f",
	border: ACCENT,
	swatch: ACCENT,
};

const COUNCIL: NodeStyle = NodeStyle {
	width: 90.0,
	height: 36.0,
	font_size: 10.0,
	corner_radius: 6.0,
	fill: "#1a365d",
	border: "#3182ce",
	swatch: "#3b82f6",
};

const BOARD: NodeStyle = NodeStyle {
	width: 75.0,
	height: 30.0,
	font_size: 9.0,
	corner_radius: 5.0,
	fill: "#1c4532",
	border: "#38a169",
	swatch: "#10b981",
};

const CLUB: NodeStyle = NodeStyle {
	width: 65.0,
	height: 26.0,
	font_size: 8.0,
	corner_radius: 4.0,
	fill: "#44337a",
	border: "#805ad5",
	swatch: "#8b5cf6",
};

const COMMITTEE: NodeStyle = NodeStyle {
	fill: "#744210",
	border: "#dd6b20",
	swatch: "#f97316",
	..CLUB
};

impl NodeKind {
	pub fn style(&self) -> &'static NodeStyle {
		match self {
			NodeKind::Senate => &SENATE,
			NodeKind::Main => &COUNCIL,
			NodeKind::Board => &BOARD,
			NodeKind::Committee => &COMMITTEE,
			NodeKind::Club | NodeKind::Unknown(_) => &CLUB,
		}
	}

	pub fn label(&self) -> &'static str {
		match self {
			NodeKind::Senate => "Senate",
			NodeKind::Main => "Council",
			NodeKind::Board => "Board",
			NodeKind::Committee => "Committee",
			NodeKind::Club | NodeKind::Unknown(_) => "Club",
		}
	}
}

/// Short holder caption drawn under a node's name.
pub fn holder_caption(holder: &str) -> &str {
	if holder.chars().count() > HOLDER_CAPTION_MAX {
		holder.split_whitespace().next().unwrap_or(holder)
	} else {
		holder
	}
}

pub fn tooltip_title(full_name: &str) -> String {
	if full_name.chars().count() > TOOLTIP_MAX {
		let head: String = full_name.chars().take(TOOLTIP_MAX).collect();
		format!("{head}...")
	} else {
		full_name.to_string()
	}
}

/// Up to two initials, e.g. "Priya Nair" -> "PN".
pub fn initials(holder: &str) -> String {
	holder
		.split_whitespace()
		.filter_map(|word| word.chars().next())
		.take(2)
		.collect()
}
