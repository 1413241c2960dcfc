use thiserror::Error;

/// Records the layout engine dropped instead of placing.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutIssue {
	#[error("node {id} references unknown parent {parent}")]
	DanglingParent { id: String, parent: String },

	#[error("node {id} cannot hang off {parent}")]
	MisplacedParent { id: String, parent: String },

	#[error("node {id} has no parent")]
	MissingParent { id: String },

	#[error("duplicate node id {id}")]
	DuplicateId { id: String },
}

impl LayoutIssue {
	pub fn node_id(&self) -> &str {
		match self {
			LayoutIssue::DanglingParent { id, .. }
			| LayoutIssue::MisplacedParent { id, .. }
			| LayoutIssue::MissingParent { id }
			| LayoutIssue::DuplicateId { id } => id,
		}
	}
}

/// Interaction events the controller refused; the view state stays as it was.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ViewError {
	#[error("pan by ({dx}, {dy}) would leave a non-finite offset")]
	NonFinitePan { dx: f64, dy: f64 },

	#[error("zoom factor {0} is not finite")]
	NonFiniteZoom(f64),

	#[error("no node is selected")]
	NoSelection,

	#[error("node {0} is not part of the diagram")]
	UnknownNode(String),
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
	#[error("ring radii must strictly increase, got {0:?}")]
	RingsNotIncreasing([f64; 4]),

	#[error("zoom range [{min}, {max}] is invalid")]
	ZoomRange { min: f64, max: f64 },

	#[error("{name} must be a positive finite number, got {value}")]
	NonPositive { name: &'static str, value: f64 },
}
