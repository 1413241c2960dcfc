//! Mapping between canvas pixels and diagram (world) coordinates.

/// The square window of world space currently on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBox {
	pub x: f64,
	pub y: f64,
	pub size: f64,
}

impl ViewBox {
	/// Window of `base_size / zoom` centered on the pan offset.
	pub fn new(zoom: f64, pan_x: f64, pan_y: f64, base_size: f64) -> Self {
		let size = base_size / zoom;
		Self {
			x: -size / 2.0 + pan_x,
			y: -size / 2.0 + pan_y,
			size,
		}
	}

	pub fn is_finite(&self) -> bool {
		self.x.is_finite() && self.y.is_finite() && self.size.is_finite() && self.size > 0.0
	}
}

/// A canvas of `width` x `height` pixels showing `view_box`, fitted
/// uniformly and centered along the longer axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
	pub view_box: ViewBox,
}

impl Viewport {
	pub fn new(width: f64, height: f64, view_box: ViewBox) -> Self {
		Self {
			width,
			height,
			view_box,
		}
	}

	/// Pixels per world unit.
	pub fn scale(&self) -> f64 {
		self.width.min(self.height).max(1.0) / self.view_box.size
	}

	/// Pixel position of the view box's top-left corner.
	pub fn offset(&self) -> (f64, f64) {
		let side = self.view_box.size * self.scale();
		((self.width - side) / 2.0, (self.height - side) / 2.0)
	}

	pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		let (k, (ox, oy)) = (self.scale(), self.offset());
		(
			self.view_box.x + (sx - ox) / k,
			self.view_box.y + (sy - oy) / k,
		)
	}

	#[cfg(test)]
	pub fn world_to_screen(&self, wx: f64, wy: f64) -> (f64, f64) {
		let (k, (ox, oy)) = (self.scale(), self.offset());
		(
			ox + (wx - self.view_box.x) * k,
			oy + (wy - self.view_box.y) * k,
		)
	}
}
