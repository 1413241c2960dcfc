use leptos::prelude::*;

use crate::components::radial_tree::{HierarchyData, NodeKind};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HierarchyStats {
	pub councils: usize,
	pub boards: usize,
	pub clubs: usize,
}

impl HierarchyStats {
	pub fn from_data(data: &HierarchyData) -> Self {
		Self {
			councils: data.main_bodies.len(),
			boards: data.boards.len(),
			clubs: data.clubs.len(),
		}
	}

	pub fn total(&self) -> usize {
		self.councils + self.boards + self.clubs
	}

	/// (title, count, description, swatch) per card.
	pub fn cards(&self) -> [(&'static str, usize, &'static str, &'static str); 4] {
		[
			(
				"Main Councils",
				self.councils,
				"Core governing bodies of the student senate",
				NodeKind::Main.style().swatch,
			),
			(
				"Boards",
				self.boards,
				"Specialized administrative boards",
				NodeKind::Board.style().swatch,
			),
			(
				"Clubs & Committees",
				self.clubs,
				"Active student organizations and committees",
				NodeKind::Club.style().swatch,
			),
			(
				"Total Positions",
				self.total(),
				"Leadership positions across all levels",
				NodeKind::Senate.style().swatch,
			),
		]
	}
}

#[component]
pub fn SenateStats(#[prop(into)] data: Signal<HierarchyData>) -> impl IntoView {
	let stats = move || data.with(HierarchyStats::from_data);

	view! {
		<div class="stats-grid">
			{move || {
				stats()
					.cards()
					.into_iter()
					.map(|(title, count, description, swatch)| {
						view! {
							<div class="stat-card" style:border-color=swatch>
								<span class="stat-count" style:color=swatch>
									{count}
								</span>
								<h3>{title}</h3>
								<p>{description}</p>
							</div>
						}
					})
					.collect_view()
			}}
		</div>
	}
}
