//! Colour themes for the terminal interface.

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
	pub header: Style,
	pub row_highlight: Style,
	pub prompt: Style,
	pub empty: Style,
	pub highlight: Style,
	pub error: Style,
}

impl Theme {
	#[must_use]
	pub fn header_style(&self) -> Style {
		self.header
	}

	#[must_use]
	pub fn row_highlight_style(&self) -> Style {
		self.row_highlight
	}

	#[must_use]
	pub fn prompt_style(&self) -> Style {
		self.prompt
	}

	#[must_use]
	pub fn empty_style(&self) -> Style {
		self.empty
	}

	#[must_use]
	pub fn highlight_style(&self) -> Style {
		self.highlight
	}

	#[must_use]
	pub fn error_style(&self) -> Style {
		self.error
	}
}

impl Default for Theme {
	fn default() -> Self {
		SLATE
	}
}

/// A built-in theme and the names it answers to.
#[derive(Debug, Clone, Copy)]
pub struct ThemeDefinition {
	pub name: &'static str,
	pub theme: Theme,
	pub aliases: &'static [&'static str],
}

pub const SLATE: Theme = Theme {
	header: Style::new()
		.fg(Color::Rgb(226, 232, 240))
		.bg(Color::Rgb(30, 41, 59)),
	row_highlight: Style::new()
		.bg(Color::Rgb(51, 65, 85))
		.fg(Color::Rgb(253, 186, 116)),
	prompt: Style::new().fg(Color::Rgb(56, 189, 248)),
	empty: Style::new().fg(Color::Rgb(100, 116, 139)),
	highlight: Style::new()
		.fg(Color::Rgb(251, 146, 60))
		.add_modifier(Modifier::BOLD),
	error: Style::new()
		.fg(Color::Rgb(244, 63, 94))
		.add_modifier(Modifier::BOLD),
};

pub const LIGHT: Theme = Theme {
	header: Style::new()
		.fg(Color::Rgb(15, 23, 42))
		.bg(Color::Rgb(226, 232, 240)),
	row_highlight: Style::new()
		.bg(Color::Rgb(254, 243, 199))
		.fg(Color::Rgb(146, 64, 14)),
	prompt: Style::new().fg(Color::Rgb(0, 102, 153)),
	empty: Style::new().fg(Color::Rgb(100, 100, 100)),
	highlight: Style::new()
		.fg(Color::Rgb(180, 83, 9))
		.add_modifier(Modifier::BOLD),
	error: Style::new()
		.fg(Color::Rgb(190, 18, 60))
		.add_modifier(Modifier::BOLD),
};

pub const SOLARIZED: Theme = Theme {
	header: Style::new()
		.fg(Color::Rgb(253, 246, 227))
		.bg(Color::Rgb(7, 54, 66)),
	row_highlight: Style::new()
		.bg(Color::Rgb(0, 43, 54))
		.fg(Color::Rgb(203, 75, 22)),
	prompt: Style::new().fg(Color::Rgb(38, 139, 210)),
	empty: Style::new().fg(Color::Rgb(88, 110, 117)),
	highlight: Style::new()
		.fg(Color::Rgb(211, 54, 130))
		.add_modifier(Modifier::BOLD),
	error: Style::new()
		.fg(Color::Rgb(220, 50, 47))
		.add_modifier(Modifier::BOLD.union(Modifier::ITALIC)),
};

const BUILT_IN_DEFINITIONS: &[ThemeDefinition] = &[
	ThemeDefinition {
		name: "slate",
		theme: SLATE,
		aliases: &["dark", "default"],
	},
	ThemeDefinition {
		name: "light",
		theme: LIGHT,
		aliases: &[],
	},
	ThemeDefinition {
		name: "solarized",
		theme: SOLARIZED,
		aliases: &["solarized-dark"],
	},
];

fn normalize_name(name: &str) -> String {
	name.trim().to_ascii_lowercase()
}

/// Look up a built-in theme by name or alias, ignoring case.
#[must_use]
pub fn by_name(name: &str) -> Option<Theme> {
	let normalized = normalize_name(name);
	BUILT_IN_DEFINITIONS
		.iter()
		.find(|definition| {
			definition.name == normalized || definition.aliases.contains(&normalized.as_str())
		})
		.map(|definition| definition.theme)
}

/// Canonical names of the built-in themes.
#[must_use]
pub fn names() -> Vec<&'static str> {
	BUILT_IN_DEFINITIONS
		.iter()
		.map(|definition| definition.name)
		.collect()
}
