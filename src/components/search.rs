use leptos::prelude::*;

use crate::components::radial_tree::{HierarchyData, HierarchyNode};

pub const MAX_RESULTS: usize = 8;

/// Case-insensitive match on name, full name or holder; councils first,
/// then boards, then clubs, capped at [`MAX_RESULTS`].
pub fn search_nodes<'a>(data: &'a HierarchyData, term: &str) -> Vec<&'a HierarchyNode> {
	let needle = term.trim().to_lowercase();
	if needle.is_empty() {
		return Vec::new();
	}
	data.iter()
		.filter(|node| {
			[&node.name, &node.full_name, &node.holder]
				.iter()
				.any(|field| field.to_lowercase().contains(&needle))
		})
		.take(MAX_RESULTS)
		.collect()
}

/// Search input with a dropdown of matching nodes.
#[component]
pub fn SearchBox(
	#[prop(into)] data: Signal<HierarchyData>,
	#[prop(into)] on_pick: Callback<HierarchyNode>,
) -> impl IntoView {
	let term = RwSignal::new(String::new());
	let results = move || {
		data.with(|data| {
			search_nodes(data, &term.get())
				.into_iter()
				.cloned()
				.collect::<Vec<_>>()
		})
	};

	view! {
		<div class="search">
			<input
				type="text"
				placeholder="Search councils, boards, clubs..."
				prop:value=move || term.get()
				on:input=move |ev| term.set(event_target_value(&ev))
			/>
			<Show when=move || !term.with(String::is_empty)>
				<button class="search-clear" on:click=move |_| term.set(String::new())>
					"×"
				</button>
			</Show>
			<ul class="search-results">
				{move || {
					results()
						.into_iter()
						.map(|node| {
							let badge = node.kind.label();
							let swatch = node.kind.style().swatch;
							let (name, full_name) = (node.name.clone(), node.full_name.clone());
							view! {
								<li>
									<button on:click=move |_| {
										term.set(String::new());
										on_pick.run(node.clone());
									}>
										<span class="result-name">{name}</span>
										<span class="result-full">{full_name}</span>
										<span class="badge" style:border-color=swatch>
											{badge}
										</span>
									</button>
								</li>
							}
						})
						.collect_view()
				}}
			</ul>
		</div>
	}
}
