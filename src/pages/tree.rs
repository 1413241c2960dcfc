use leptos::prelude::*;
use log::{error, info, warn};

use crate::components::outline::HierarchyOutline;
use crate::components::radial_tree::config::LayoutConfig;
use crate::components::radial_tree::layout::RadialLayout;
use crate::components::radial_tree::{HierarchyData, HierarchyNode, NodeKind, RadialDiagram};
use crate::components::search::SearchBox;
use crate::components::stats::SenateStats;
use crate::data::senate_hierarchy;

const LEGEND: [NodeKind; 4] = [
	NodeKind::Senate,
	NodeKind::Main,
	NodeKind::Board,
	NodeKind::Club,
];

/// The card's node and the node the diagram is asked to emphasise.
#[derive(Clone, Debug, Default, PartialEq)]
struct PageSelection {
	card: Option<HierarchyNode>,
	highlighted: Option<String>,
}

impl PageSelection {
	fn pick(&mut self, node: HierarchyNode) {
		self.highlighted = Some(node.id.clone());
		self.card = Some(node);
	}

	/// A diagram selection fills the card; the search highlight stays and a
	/// cleared diagram selection leaves the card alone.
	fn diagram_selected(&mut self, node: Option<HierarchyNode>) {
		if let Some(node) = node {
			self.card = Some(node);
		}
	}

	fn close(&mut self) {
		*self = Self::default();
	}
}

#[component]
fn SelectedCard(selection: RwSignal<PageSelection>) -> impl IntoView {
	move || {
		selection.with(|s| s.card.clone()).map(|node| {
			let holder = (!node.holder.is_empty()).then(|| view! { <p class="holder">{node.holder.clone()}</p> });
			view! {
				<div class="selected-card" style:border-color=node.kind.style().swatch>
					<span class="badge">{node.kind.label()}</span>
					<h2>{node.name.clone()}</h2>
					<p class="muted">{node.full_name.clone()}</p>
					{holder}
					<button class="close" on:click=move |_| selection.update(PageSelection::close)>"×"</button>
				</div>
			}
		})
	}
}

#[component]
fn Legend() -> impl IntoView {
	view! {
		<div class="legend">
			{LEGEND
				.iter()
				.map(|kind| {
					view! {
						<span class="legend-item">
							<span class="swatch" style:background=kind.style().swatch />
							{kind.label()}
						</span>
					}
				})
				.collect_view()}
		</div>
	}
}

#[component]
fn Hierarchy(data: HierarchyData) -> impl IntoView {
	info!("loaded senate hierarchy with {} records", data.len());
	let outline = Signal::stored(RadialLayout::compute(&data, &LayoutConfig::default()));
	let data = Signal::stored(data);
	let selection = RwSignal::new(PageSelection::default());

	let on_pick = move |node: HierarchyNode| selection.update(|s| s.pick(node));
	let on_select = Callback::new(move |node: Option<HierarchyNode>| {
		selection.update(|s| s.diagram_selected(node));
	});

	view! {
		<SearchBox data=data on_pick=on_pick />
		<SelectedCard selection=selection />
		<SenateStats data=data />
		<section class="diagram-frame">
			<RadialDiagram
				data=data
				highlighted=Signal::derive(move || selection.with(|s| s.highlighted.clone()))
				on_select=on_select
			/>
		</section>
		<section class="mobile-tree">
			<HierarchyOutline layout=outline />
		</section>
		<Legend />
	}
}

/// Senate hierarchy page: search, stats and the radial diagram.
#[component]
pub fn TreePage() -> impl IntoView {
	let content = match senate_hierarchy() {
		Ok(data) if data.is_empty() => {
			warn!("senate hierarchy is empty");
			view! { <p class="muted">"No councils, boards or clubs to show yet."</p> }.into_any()
		}
		Ok(data) => view! { <Hierarchy data=data /> }.into_any(),
		Err(err) => {
			error!("failed to parse senate hierarchy: {err}");
			view! { <p class="error">{format!("Could not load the hierarchy: {err}")}</p> }.into_any()
		}
	};

	view! {
		<main class="tree-page">
			<header>
				<p class="eyebrow">"Organizational Structure"</p>
				<h1>"Student Senate"</h1>
				<p class="subtitle">"Councils, boards and clubs of the student body, and how they connect."</p>
			</header>
			{content}
		</main>
	}
}
