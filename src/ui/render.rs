use cinefind_catalog::{Movie, poster_url};
use ratatui::{
	Frame,
	layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
	text::{Line, Span},
	widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};
use throbber_widgets_tui::Throbber;
use unicode_width::UnicodeWidthStr;

use super::App;
use crate::query::FetchState;

const PROMPT_SEPARATOR: &str = " > ";

impl App {
	pub(crate) fn draw(&mut self, frame: &mut Frame) {
		let area = frame.area().inner(Margin {
			vertical: 0,
			horizontal: 1,
		});

		let layout = Layout::default()
			.direction(Direction::Vertical)
			.constraints([
				Constraint::Length(1),
				Constraint::Length(1),
				Constraint::Min(1),
			])
			.split(area);

		self.render_prompt(frame, layout[0]);
		self.render_status(frame, layout[1]);
		self.render_body(frame, layout[2]);
	}

	fn render_prompt(&self, frame: &mut Frame, area: Rect) {
		if area.width == 0 || area.height == 0 {
			return;
		}
		let prompt = format!("{}{PROMPT_SEPARATOR}", self.title);
		let prompt_width = u16::try_from(prompt.width()).unwrap_or(u16::MAX);
		let line = Line::from(vec![
			Span::styled(prompt, self.theme.prompt_style()),
			Span::raw(self.input.text().to_string()),
		]);
		frame.render_widget(Paragraph::new(line), area);

		let cursor_x = area
			.x
			.saturating_add(prompt_width)
			.saturating_add(self.input.cursor_column())
			.min(area.right().saturating_sub(1));
		frame.set_cursor_position((cursor_x, area.y));
	}

	fn render_status(&self, frame: &mut Frame, area: Rect) {
		let muted = self.theme.empty_style();
		let committed = self.controller.committed_query().unwrap_or("").trim();
		let mut line = Line::default();
		match self.controller.state() {
			FetchState::Loading => {
				let spinner = Throbber::default().style(muted).throbber_style(muted);
				line.spans.push(spinner.to_symbol_span(&self.throbber_state));
				let label = if committed.is_empty() {
					"Loading popular movies".to_string()
				} else {
					format!("Searching for \"{committed}\"")
				};
				line.spans.push(Span::styled(label, muted));
			}
			FetchState::Loaded(movies) => {
				let label = if committed.is_empty() {
					format!("Popular movies ({})", movies.len())
				} else {
					format!("{} results for \"{committed}\"", movies.len())
				};
				line.spans.push(Span::styled(label, muted));
			}
			FetchState::Idle | FetchState::Error(_) => {}
		}
		frame.render_widget(Paragraph::new(line), area);
	}

	fn render_body(&mut self, frame: &mut Frame, area: Rect) {
		let message = match self.controller.state() {
			FetchState::Idle => Some(("Type to search movies", self.theme.empty_style())),
			FetchState::Loading => Some(("Loading movies...", self.theme.empty_style())),
			FetchState::Error(message) => Some((message.as_str(), self.theme.error_style())),
			FetchState::Loaded(movies) if movies.is_empty() => {
				Some(("No movies found", self.theme.empty_style()))
			}
			FetchState::Loaded(_) => None,
		};

		if let Some((text, style)) = message {
			let paragraph = Paragraph::new(text.to_string())
				.style(style)
				.alignment(Alignment::Center)
				.wrap(Wrap { trim: true });
			let area = Rect {
				y: area.y.saturating_add(1).min(area.bottom()),
				height: area.height.saturating_sub(1),
				..area
			};
			frame.render_widget(paragraph, area);
			return;
		}

		let columns = Layout::default()
			.direction(Direction::Horizontal)
			.constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
			.split(area);
		self.render_table(frame, columns[0]);
		self.render_detail(frame, columns[1]);
	}

	fn render_table(&mut self, frame: &mut Frame, area: Rect) {
		let header = Row::new(["Title", "Year", "Rating", "Lang"].map(Cell::from))
			.style(self.theme.header_style());
		let rows: Vec<Row> = self
			.controller
			.state()
			.results()
			.iter()
			.map(movie_row)
			.collect();
		let widths = [
			Constraint::Min(10),
			Constraint::Length(6),
			Constraint::Length(6),
			Constraint::Length(4),
		];
		let table = Table::new(rows, widths)
			.header(header)
			.row_highlight_style(self.theme.row_highlight_style())
			.highlight_symbol("> ");
		frame.render_stateful_widget(table, area, &mut self.table_state);
	}

	fn render_detail(&self, frame: &mut Frame, area: Rect) {
		let block = Block::default()
			.borders(Borders::LEFT)
			.title(" Details ")
			.border_style(self.theme.empty_style());
		let lines = match self.selected_movie() {
			Some(movie) => detail_lines(movie, self),
			None => vec![Line::styled("No selection", self.theme.empty_style())],
		};
		let paragraph = Paragraph::new(lines)
			.block(block)
			.wrap(Wrap { trim: true });
		frame.render_widget(paragraph, area);
	}
}

fn movie_row(movie: &Movie) -> Row<'static> {
	Row::new(vec![
		Cell::from(movie.display_title().to_string()),
		Cell::from(movie.release_year().unwrap_or("-").to_string()),
		Cell::from(movie.rating_label()),
		Cell::from(movie.language_label()),
	])
}

fn detail_lines(movie: &Movie, app: &App) -> Vec<Line<'static>> {
	let muted = app.theme.empty_style();
	let mut lines = vec![Line::styled(
		movie.display_title().to_string(),
		app.theme.highlight_style(),
	)];
	let released = movie
		.release_date
		.as_deref()
		.filter(|date| !date.trim().is_empty())
		.unwrap_or("unknown");
	lines.push(Line::from(vec![
		Span::styled("Released: ", muted),
		Span::raw(released.to_string()),
	]));
	lines.push(Line::from(vec![
		Span::styled("Rating: ", muted),
		Span::raw(movie.rating_label()),
	]));
	lines.push(Line::from(vec![
		Span::styled("Language: ", muted),
		Span::raw(movie.language_label()),
	]));
	if let Some(overview) = movie.overview.as_deref().filter(|text| !text.trim().is_empty()) {
		lines.push(Line::default());
		lines.push(Line::raw(overview.to_string()));
	}
	if let Some(url) = poster_url(&app.image_base_url, movie.poster_path.as_deref()) {
		lines.push(Line::default());
		lines.push(Line::from(vec![
			Span::styled("Poster: ", muted),
			Span::raw(url),
		]));
	}
	lines
}
