//! Bundled senate hierarchy.

use crate::components::radial_tree::HierarchyData;

const SENATE_JSON: &str = include_str!("senate.json");

/// Parses the bundled dataset and re-tiers every record by its kind, so a
/// record filed under the wrong list or with an unknown type still lands
/// one ring out from its parent.
pub fn senate_hierarchy() -> Result<HierarchyData, serde_json::Error> {
	parse_hierarchy(SENATE_JSON)
}

fn parse_hierarchy(json: &str) -> Result<HierarchyData, serde_json::Error> {
	let HierarchyData {
		main_bodies,
		boards,
		clubs,
	} = serde_json::from_str(json)?;
	Ok(HierarchyData::from_records(
		main_bodies.into_iter().chain(boards).chain(clubs),
	))
}
