use super::error::ConfigError;

pub const ROOT_ID: &str = "student-senate";

/// Distance of each ring from the center, innermost first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingConfig {
	pub senate: f64,
	pub councils: f64,
	pub boards: f64,
	pub clubs: f64,
}

impl Default for RingConfig {
	fn default() -> Self {
		Self {
			senate: 0.0,
			councils: 140.0,
			boards: 280.0,
			clubs: 420.0,
		}
	}
}

impl RingConfig {
	pub fn radius(&self, ring: u8) -> f64 {
		match ring {
			0 => self.senate,
			1 => self.councils,
			2 => self.boards,
			_ => self.clubs,
		}
	}

	pub fn as_array(&self) -> [f64; 4] {
		[self.senate, self.councils, self.boards, self.clubs]
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
	pub rings: RingConfig,
	/// Fraction of a council's angular step its boards may spread across.
	pub board_spread_ratio: f64,
	/// Sector width in radians for clubs under a board.
	pub board_club_spread: f64,
	/// Sector width in radians for clubs directly under a council.
	pub council_club_spread: f64,
	pub root_id: String,
	pub root_name: String,
	pub root_full_name: String,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			rings: RingConfig::default(),
			board_spread_ratio: 0.85,
			board_club_spread: 0.25,
			council_club_spread: 0.35,
			root_id: ROOT_ID.to_string(),
			root_name: "Student Senate".to_string(),
			root_full_name: "Student Senate - IIT Jodhpur".to_string(),
		}
	}
}

impl LayoutConfig {
	pub fn validate(&self) -> Result<(), ConfigError> {
		let rings = self.rings.as_array();
		if !rings.iter().all(|r| r.is_finite()) || rings.windows(2).any(|w| w[0] >= w[1]) {
			return Err(ConfigError::RingsNotIncreasing(rings));
		}
		positive("board_spread_ratio", self.board_spread_ratio)?;
		positive("board_club_spread", self.board_club_spread)?;
		positive("council_club_spread", self.council_club_spread)
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewConfig {
	pub min_zoom: f64,
	pub max_zoom: f64,
	pub wheel_in: f64,
	pub wheel_out: f64,
	pub button_step: f64,
	pub focus_zoom: f64,
	/// Edge length of the visible world window at zoom 1.
	pub base_size: f64,
	/// Pointer travel in pixels below which a press/release counts as a click.
	pub click_slop: f64,
}

impl Default for ViewConfig {
	fn default() -> Self {
		Self {
			min_zoom: 0.5,
			max_zoom: 3.0,
			wheel_in: 1.1,
			wheel_out: 0.9,
			button_step: 1.3,
			focus_zoom: 1.5,
			base_size: 1000.0,
			click_slop: 4.0,
		}
	}
}

impl ViewConfig {
	pub fn validate(&self) -> Result<(), ConfigError> {
		positive("min_zoom", self.min_zoom)?;
		positive("max_zoom", self.max_zoom)?;
		if self.min_zoom > self.max_zoom {
			return Err(ConfigError::ZoomRange {
				min: self.min_zoom,
				max: self.max_zoom,
			});
		}
		positive("wheel_in", self.wheel_in)?;
		positive("wheel_out", self.wheel_out)?;
		positive("button_step", self.button_step)?;
		positive("focus_zoom", self.focus_zoom)?;
		positive("base_size", self.base_size)
	}

	/// Clamp a zoom factor into range. Non-finite input falls back to 1x.
	pub fn clamp_zoom(&self, zoom: f64) -> f64 {
		if zoom.is_nan() {
			return 1.0_f64.clamp(self.min_zoom, self.max_zoom);
		}
		zoom.clamp(self.min_zoom, self.max_zoom)
	}
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
	if value.is_finite() && value > 0.0 {
		Ok(())
	} else {
		Err(ConfigError::NonPositive { name, value })
	}
}
