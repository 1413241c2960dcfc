use leptos::prelude::*;

use crate::components::radial_tree::{HierarchyNode, NodeIdx};
use crate::components::radial_tree::layout::RadialLayout;

/// A laid-out node with its children, for the collapsible list view.
#[derive(Clone, Debug, PartialEq)]
pub struct OutlineNode {
	pub record: HierarchyNode,
	pub children: Vec<OutlineNode>,
}

/// Councils in placement order, each with its boards and then its direct
/// clubs. The synthesized root is left out.
pub fn build_outline(layout: &RadialLayout) -> Vec<OutlineNode> {
	fn subtree(layout: &RadialLayout, idx: NodeIdx) -> Option<OutlineNode> {
		let node = layout.get(idx)?;
		Some(OutlineNode {
			record: node.record.clone(),
			children: layout
				.children_of(idx)
				.filter_map(|child| subtree(layout, child))
				.collect(),
		})
	}

	let Some(root) = layout.root() else {
		return Vec::new();
	};
	layout
		.children_of(root)
		.filter_map(|council| subtree(layout, council))
		.collect()
}

fn outline_item(node: OutlineNode, open: bool) -> AnyView {
	let swatch = node.record.kind.style().swatch;
	let holder = (!node.record.holder.is_empty())
		.then(|| view! { <span class="holder">{node.record.holder.clone()}</span> });
	let label = view! {
		<span class="swatch" style:background=swatch />
		<span class="name">{node.record.name.clone()}</span>
		{holder}
	};
	if node.children.is_empty() {
		return view! { <li class="leaf">{label}</li> }.into_any();
	}
	view! {
		<li>
			<details open=open>
				<summary>{label}</summary>
				<ul>
					{node.children.into_iter().map(|child| outline_item(child, false)).collect_view()}
				</ul>
			</details>
		</li>
	}
	.into_any()
}

/// Collapsible council → board → club list shown in place of the canvas on
/// narrow screens. Councils start expanded.
#[component]
pub fn HierarchyOutline(#[prop(into)] layout: Signal<RadialLayout>) -> impl IntoView {
	view! {
		<ul class="hierarchy-outline">
			{move || {
				layout
					.with(build_outline)
					.into_iter()
					.map(|council| outline_item(council, true))
					.collect_view()
			}}
		</ul>
	}
}
