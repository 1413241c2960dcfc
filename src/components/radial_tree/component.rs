use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::config::{LayoutConfig, ViewConfig};
use super::layout::RadialLayout;
use super::render;
use super::scale::Viewport;
use super::scene::Scene;
use super::state::{ViewEvent, ViewState};
use super::style::initials;
use super::types::{HierarchyData, HierarchyNode};

const FALLBACK_SIZE: (f64, f64) = (800.0, 600.0);

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn parent_size(canvas: &HtmlCanvasElement) -> Option<(f64, f64)> {
	let parent = canvas.parent_element()?;
	let (w, h) = (parent.client_width() as f64, parent.client_height() as f64);
	(w > 0.0 && h > 0.0).then_some((w, h))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Pointer position relative to the canvas' top-left corner.
fn local_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn validated_layout_config(config: Option<LayoutConfig>) -> LayoutConfig {
	let config = config.unwrap_or_default();
	match config.validate() {
		Ok(()) => config,
		Err(err) => {
			warn!("invalid layout config, using defaults: {err}");
			LayoutConfig::default()
		}
	}
}

fn validated_view_config(config: Option<ViewConfig>) -> ViewConfig {
	let config = config.unwrap_or_default();
	match config.validate() {
		Ok(()) => config,
		Err(err) => {
			warn!("invalid view config, using defaults: {err}");
			ViewConfig::default()
		}
	}
}

/// Radial org chart of the senate hierarchy drawn on a canvas, with a
/// breadcrumb, zoom controls and a detail panel for the selected node.
#[component]
pub fn RadialDiagram(
	#[prop(into)] data: Signal<HierarchyData>,
	/// Node to emphasise on behalf of the host, e.g. a search hit.
	#[prop(optional, into)]
	highlighted: MaybeProp<String>,
	#[prop(optional, into)] on_select: Option<Callback<Option<HierarchyNode>>>,
	#[prop(optional)] config: Option<LayoutConfig>,
	#[prop(optional)] view_config: Option<ViewConfig>,
	#[prop(default = false)] fullscreen: bool,
) -> impl IntoView {
	let layout_config = validated_layout_config(config);
	let view_config = validated_view_config(view_config);
	let rings = layout_config.rings;

	let layout = Memo::new(move |_| data.with(|data| RadialLayout::compute(data, &layout_config)));
	let view = RwSignal::new(ViewState::default());
	let size = RwSignal::new(FALLBACK_SIZE);
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	let dispatch = move |event: ViewEvent| {
		let notice = layout.with_untracked(|layout| {
			let mut notice = None;
			view.update(|state| notice = state.apply(&event, layout, &view_config));
			notice
		});
		if let (Some(notice), Some(on_select)) = (notice, on_select) {
			on_select.run(notice.into_option());
		}
	};

	let node_under = move |canvas: &HtmlCanvasElement, ev: &MouseEvent| -> Option<String> {
		let (sx, sy) = local_point(canvas, ev);
		let state = view.get_untracked();
		let viewport = Viewport::new(
			canvas.width() as f64,
			canvas.height() as f64,
			state.view_box(&view_config),
		);
		let (wx, wy) = viewport.screen_to_world(sx, sy);
		layout.with_untracked(|layout| {
			Scene::build(layout, &state, None, &rings)
				.node_at(wx, wy)
				.map(|node| node.id.clone())
		})
	};

	Effect::new(move |prev: Option<()>| {
		layout.track();
		if prev.is_some() {
			dispatch(ViewEvent::LayoutChanged);
		}
	});

	let resize_cb_init = resize_cb.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let measure = move |canvas: &HtmlCanvasElement, window: &Window| {
			let measured = if fullscreen {
				window_size(window)
			} else {
				parent_size(canvas)
			};
			size.set(measured.unwrap_or(FALLBACK_SIZE));
		};
		measure(&canvas, &window);

		let canvas_resize = canvas.clone();
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(win) = web_sys::window() {
				measure(&canvas_resize, &win);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		info!("radial diagram mounted");
	});

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(ctx) = context_2d(&canvas) else {
			warn!("canvas has no 2d context");
			return;
		};
		let (w, h) = size.get();
		if canvas.width() != w as u32 || canvas.height() != h as u32 {
			canvas.set_width(w as u32);
			canvas.set_height(h as u32);
		}
		let state = view.get();
		let marked = highlighted.get();
		let view_box = state.view_box(&view_config);
		if !view_box.is_finite() {
			warn!("skipping frame for degenerate view box {view_box:?}");
			return;
		}
		layout.with(|layout| {
			let scene = Scene::build(layout, &state, marked.as_deref(), &rings);
			render::render(&scene, &Viewport::new(w, h, view_box), &ctx);
		});
	});

	let on_mousedown = move |ev: MouseEvent| {
		dispatch(ViewEvent::PointerDown {
			button: ev.button().into(),
			x: ev.client_x() as f64,
			y: ev.client_y() as f64,
		});
	};

	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		if view.with_untracked(ViewState::is_panning) {
			dispatch(ViewEvent::PointerMove {
				x: ev.client_x() as f64,
				y: ev.client_y() as f64,
			});
		}
		let hovered = node_under(&canvas, &ev);
		let previous = view.with_untracked(|s| s.hovered.clone());
		if hovered != previous {
			if let Some(id) = previous {
				dispatch(ViewEvent::NodeLeave(id));
			}
			if let Some(id) = hovered {
				dispatch(ViewEvent::NodeEnter(id));
			}
		}
	};

	let on_mouseup = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let clicked = view.with_untracked(|s| s.is_panning() && s.pan_travel() < view_config.click_slop);
		dispatch(ViewEvent::PointerUp);
		if clicked {
			if let Some(id) = node_under(&canvas, &ev) {
				dispatch(ViewEvent::NodeClick(id));
			}
		}
	};

	let on_mouseleave = move |_: MouseEvent| dispatch(ViewEvent::PointerLeave);

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		dispatch(ViewEvent::Wheel {
			delta_y: ev.delta_y(),
		});
	};

	let breadcrumb = move || {
		layout.with(|layout| {
			view.with(|state| {
				state
					.breadcrumb(layout)
					.into_iter()
					.filter_map(|idx| layout.get(idx))
					.map(|node| (node.id().to_string(), node.record.name.clone()))
					.collect::<Vec<_>>()
			})
		})
	};

	let selected_detail = move || {
		layout.with(|layout| {
			view.with(|state| {
				state.selected_node(layout).map(|node| {
					let parent = node
						.parent
						.and_then(|p| layout.get(p))
						.map(|p| (p.id().to_string(), p.record.name.clone()));
					(node.record.clone(), parent)
				})
			})
		})
	};

	view! {
		<div class="radial-diagram">
			<div class="diagram-header">
				<div class="diagram-title">
					<span class="dot" />
					<span>"Organizational Hierarchy"</span>
					<span class="muted">"|"</span>
					<span class="muted">{move || format!("{} entities", layout.with(|l| l.nodes.len()))}</span>
					{move || {
						let skipped = layout.with(|l| {
							l.issues.iter().map(|issue| issue.node_id().to_string()).collect::<Vec<_>>()
						});
						(!skipped.is_empty())
							.then(|| {
								view! {
									<span class="warning" title=skipped.join(", ")>
										{format!("{} skipped", skipped.len())}
									</span>
								}
							})
					}}
				</div>
				<nav class="breadcrumb">
					{move || {
						let crumbs = breadcrumb();
						let last = crumbs.len().saturating_sub(1);
						crumbs
							.into_iter()
							.enumerate()
							.map(|(i, (id, name))| {
								let current = i == last;
								view! {
									<button
										class="crumb"
										class:current=current
										on:click=move |_| dispatch(ViewEvent::NodeClick(id.clone()))
									>
										{name}
									</button>
									{(!current).then(|| view! { <span class="crumb-sep">"›"</span> })}
								}
							})
							.collect_view()
					}}
				</nav>
			</div>

			<div class="diagram-controls">
				<button title="Zoom In" on:click=move |_| dispatch(ViewEvent::ZoomIn)>"+"</button>
				<button title="Zoom Out" on:click=move |_| dispatch(ViewEvent::ZoomOut)>"−"</button>
				<Show when=move || view.with(|s| s.selected.is_some())>
					<button title="Center on Selected" on:click=move |_| dispatch(ViewEvent::CenterOnSelected)>
						"◎"
					</button>
				</Show>
				<button title="Reset View" on:click=move |_| dispatch(ViewEvent::ResetView)>"↺"</button>
			</div>

			<div class="zoom-indicator">
				{move || format!("{}%", (view.with(|s| s.zoom) * 100.0).round())}
			</div>

			<canvas
				node_ref=canvas_ref
				class="radial-diagram-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style:display="block"
				style:cursor=move || if view.with(ViewState::is_panning) { "grabbing" } else { "grab" }
			/>

			{move || {
				selected_detail()
					.map(|(node, parent)| {
						let holder = (!node.holder.is_empty())
							.then(|| {
								view! {
									<div class="holder">
										<div class="initials">{initials(&node.holder)}</div>
										<div>
											<p class="caption">"Current Holder"</p>
											<p>{node.holder.clone()}</p>
										</div>
									</div>
								}
							});
						let reports_to = parent
							.map(|(parent_id, parent_name)| {
								view! {
									<div class="reports-to">
										<p class="caption">"Reports to"</p>
										<button on:click=move |_| {
											dispatch(ViewEvent::NodeClick(parent_id.clone()))
										}>{parent_name}</button>
									</div>
								}
							});
						view! {
							<div class="detail-panel">
								<div class="detail-header">
									<span class="swatch" style:background=node.kind.style().swatch />
									<span class="kind">{node.kind.label()}</span>
									<button class="close" on:click=move |_| dispatch(ViewEvent::ClearSelection)>
										"×"
									</button>
								</div>
								<h3>{node.name.clone()}</h3>
								<p class="muted">{node.full_name.clone()}</p>
								{holder}
								{reports_to}
							</div>
						}
					})
			}}

			<div class="diagram-hint">"Scroll to zoom • Drag to pan • Click nodes for details"</div>
		</div>
	}
}
