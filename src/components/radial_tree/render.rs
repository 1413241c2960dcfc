use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scale::Viewport;
use super::scene::{NodeShape, RING_COLOR, RING_LABEL_COLOR, Scene};
use super::style::{ACCENT, HOLDER_TEXT, TEXT};

const BACKGROUND: &str = "#0a1628";
const GRID_COLOR: &str = "rgba(255, 255, 255, 0.03)";
const GRID_STEP: f64 = 50.0;
/// Enough for the widest window the zoom range allows.
const MAX_GRID_LINES: usize = 256;
const FONT: &str = "Inter, system-ui, sans-serif";

pub fn render(scene: &Scene, viewport: &Viewport, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, viewport.width, viewport.height);
	ctx.save();
	let ((ox, oy), k, vb) = (viewport.offset(), viewport.scale(), viewport.view_box);
	let _ = ctx.translate(ox, oy);
	let _ = ctx.scale(k, k);
	let _ = ctx.translate(-vb.x, -vb.y);
	draw_grid(viewport, ctx);
	draw_rings(scene, ctx);
	draw_edges(scene, ctx);
	for node in &scene.nodes {
		draw_node(node, ctx);
	}
	draw_tooltip(scene, ctx);
	ctx.restore();
}

fn set_dash(ctx: &CanvasRenderingContext2d, dash: f64, gap: f64) {
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(dash),
		&JsValue::from_f64(gap),
	));
}

fn clear_dash(ctx: &CanvasRenderingContext2d) {
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

/// Grid lines needed to cover a window of `size` world units.
fn grid_lines(size: f64) -> usize {
	((size / GRID_STEP).ceil() as usize)
		.saturating_add(1)
		.min(MAX_GRID_LINES)
}

fn draw_grid(viewport: &Viewport, ctx: &CanvasRenderingContext2d) {
	let vb = viewport.view_box;
	let (x0, y0) = (
		(vb.x / GRID_STEP).floor() * GRID_STEP,
		(vb.y / GRID_STEP).floor() * GRID_STEP,
	);
	ctx.set_stroke_style_str(GRID_COLOR);
	ctx.set_line_width(1.0);
	ctx.begin_path();
	for i in 0..grid_lines(vb.size) {
		let x = x0 + i as f64 * GRID_STEP;
		ctx.move_to(x, vb.y);
		ctx.line_to(x, vb.y + vb.size);
	}
	for i in 0..grid_lines(vb.size) {
		let y = y0 + i as f64 * GRID_STEP;
		ctx.move_to(vb.x, y);
		ctx.line_to(vb.x + vb.size, y);
	}
	ctx.stroke();
}

fn draw_rings(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(RING_COLOR);
	ctx.set_line_width(1.0);
	set_dash(ctx, 4.0, 8.0);
	for ring in &scene.rings {
		ctx.begin_path();
		let _ = ctx.arc(0.0, 0.0, ring.radius, 0.0, 2.0 * PI);
		ctx.stroke();
	}
	clear_dash(ctx);

	ctx.set_fill_style_str(RING_LABEL_COLOR);
	ctx.set_font(&format!("10px {FONT}"));
	ctx.set_text_align("left");
	ctx.set_text_baseline("alphabetic");
	for ring in &scene.rings {
		let _ = ctx.fill_text(ring.label, ring.radius + 10.0, -5.0);
	}
}

fn draw_edges(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	ctx.set_line_cap("round");
	// Highlighted edges last so they sit on top of the faint ones.
	let (lit, dim): (Vec<_>, Vec<_>) = scene.edges.iter().partition(|e| e.highlighted);
	for edge in dim.into_iter().chain(lit) {
		ctx.set_stroke_style_str(edge.stroke());
		ctx.set_line_width(edge.width());
		ctx.begin_path();
		ctx.move_to(edge.from.0, edge.from.1);
		ctx.line_to(edge.to.0, edge.to.1);
		ctx.stroke();
	}
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn draw_node(node: &NodeShape, ctx: &CanvasRenderingContext2d) {
	let style = node.kind.style();
	let (hw, hh) = node.half_size();
	let radius = style.corner_radius * node.scale();

	if node.selected {
		rounded_rect(
			ctx,
			node.x - style.width / 2.0 - 4.0,
			node.y - style.height / 2.0 - 4.0,
			style.width + 8.0,
			style.height + 8.0,
			style.corner_radius + 2.0,
		);
		ctx.set_stroke_style_str(ACCENT);
		ctx.set_line_width(2.0);
		set_dash(ctx, 4.0, 2.0);
		ctx.stroke();
		clear_dash(ctx);
	}

	rounded_rect(ctx, node.x - hw, node.y - hh, hw * 2.0, hh * 2.0, radius);
	ctx.set_fill_style_str(style.fill);
	ctx.fill();
	ctx.set_stroke_style_str(node.border());
	ctx.set_line_width(node.border_width());
	ctx.stroke();

	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_fill_style_str(TEXT);
	ctx.set_font(&format!("600 {}px {FONT}", style.font_size));
	let name_y = if node.holder.is_some() { node.y - 3.0 } else { node.y };
	let _ = ctx.fill_text(&node.name, node.x, name_y);

	if let Some(holder) = &node.holder {
		ctx.set_fill_style_str(HOLDER_TEXT);
		ctx.set_font(&format!("{}px {FONT}", style.font_size - 2.0));
		let _ = ctx.fill_text(holder, node.x, node.y + style.height / 2.0 - 8.0);
	}
}

fn draw_tooltip(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	let Some(tip) = &scene.tooltip else {
		return;
	};
	rounded_rect(ctx, tip.x, tip.y, tip.width, tip.height, 6.0);
	ctx.set_fill_style_str("rgba(10, 14, 26, 0.95)");
	ctx.fill();
	ctx.set_stroke_style_str("rgba(255, 255, 255, 0.2)");
	ctx.set_line_width(1.0);
	ctx.stroke();

	let cx = tip.x + tip.width / 2.0;
	ctx.set_text_align("center");
	ctx.set_text_baseline("alphabetic");
	ctx.set_fill_style_str(TEXT);
	ctx.set_font(&format!("600 11px {FONT}"));
	let _ = ctx.fill_text(&tip.title, cx, tip.y + 18.0);
	if let Some(holder) = &tip.holder {
		ctx.set_fill_style_str(ACCENT);
		ctx.set_font(&format!("10px {FONT}"));
		let _ = ctx.fill_text(holder, cx, tip.y + 36.0);
	}
}
