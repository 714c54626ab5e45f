use super::canvas::Canvas;
use super::color::Color;
use super::layout::{HeroLayout, TextBlock};
use super::transition::CarouselPose;
use crate::config::{PageConfig, StyleConfig};
use itertools::Itertools;
use std::ops::Range;
use std::sync::Arc;
use unicode_width::UnicodeWidthStr;

/// Words fainter than this are not drawn at all.
const MIN_VISIBLE_OPACITY: f64 = 0.01;
const FOLD_POINTER_OPACITY: f64 = 0.7;
const SECTION_HEADING_OPACITY: f64 = 0.7;
const SECTION_MARGIN: u16 = 4;
const UNCLIPPED: Range<i32> = i32::MIN..i32::MAX;

/// Lays out the whole page: the hero line centered in the first screen ("the fold") and the
/// static sections underneath it.
#[derive(Debug)]
pub(crate) struct PageView {
    layout: Arc<HeroLayout>,
    style: StyleConfig,
    page: PageConfig,
}

impl PageView {
    pub(crate) fn new(layout: Arc<HeroLayout>, style: StyleConfig, page: PageConfig) -> Self {
        Self { layout, style, page }
    }

    pub(crate) fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub(crate) fn render(&self, width: u16, fold_height: u16, pose: &CarouselPose) -> Canvas {
        let sections = self.section_lines(width.saturating_sub(SECTION_MARGIN * 2));
        let section_rows = u16::try_from(sections.len()).unwrap_or(u16::MAX);
        let mut canvas = Canvas::new(width, fold_height.saturating_add(section_rows));

        self.draw_hero(&mut canvas, fold_height, pose);
        if self.page.fold_pointer && fold_height >= 4 {
            let row = i32::from(fold_height) - 3;
            self.draw_centered(&mut canvas, row, "see more", FOLD_POINTER_OPACITY);
            self.draw_centered(&mut canvas, row + 1, "v", FOLD_POINTER_OPACITY);
        }
        for (offset, (text, opacity)) in sections.iter().enumerate() {
            let row = i32::from(fold_height) + offset as i32;
            self.draw_text(&mut canvas, i32::from(SECTION_MARGIN), row, text, *opacity);
        }
        canvas
    }

    fn draw_hero(&self, canvas: &mut Canvas, fold_height: u16, pose: &CarouselPose) {
        let layout = &self.layout;
        let line_height = i32::from(layout.line_height());
        let prefix = layout.prefix().size();
        let suffix = layout.suffix().size();
        let window = pose.width.round().max(0.0) as i32;

        let total = i32::from(prefix.width) + window + i32::from(suffix.width);
        let left = (i32::from(canvas.width()) - total) / 2;
        let top = (i32::from(fold_height) - line_height) / 2;
        let centered_top = |block: &TextBlock| top + (line_height - i32::from(block.size().height)) / 2;

        self.draw_block(canvas, left, centered_top(layout.prefix()), layout.prefix(), 1.0, UNCLIPPED);

        let window_left = left + i32::from(prefix.width);
        let window_columns = window_left..window_left + window;
        // Faint words first so the active one ends up on top.
        let visible = pose
            .params
            .iter()
            .enumerate()
            .filter(|(_, params)| params.opacity > MIN_VISIBLE_OPACITY)
            .sorted_by(|(_, a), (_, b)| a.opacity.total_cmp(&b.opacity));
        for (index, params) in visible {
            let Some(block) = layout.word(index) else {
                continue;
            };
            let column = window_left + (window - i32::from(block.size().width)) / 2;
            let row = centered_top(block) + params.vertical_offset.round() as i32;
            self.draw_block(canvas, column, row, block, params.opacity, window_columns.clone());
        }

        let suffix_left = window_left + window;
        self.draw_block(canvas, suffix_left, centered_top(layout.suffix()), layout.suffix(), 1.0, UNCLIPPED);
    }

    fn draw_block(
        &self,
        canvas: &mut Canvas,
        column: i32,
        row: i32,
        block: &TextBlock,
        opacity: f64,
        columns: Range<i32>,
    ) {
        let color = self.color(opacity);
        for (offset, text) in block.rows().iter().enumerate() {
            canvas.put_str_clipped(column, row + offset as i32, text, color, columns.clone());
        }
    }

    fn draw_centered(&self, canvas: &mut Canvas, row: i32, text: &str, opacity: f64) {
        let column = (i32::from(canvas.width()) - text.width() as i32) / 2;
        self.draw_text(canvas, column, row, text, opacity);
    }

    fn draw_text(&self, canvas: &mut Canvas, column: i32, row: i32, text: &str, opacity: f64) {
        canvas.put_str(column, row, text, self.color(opacity));
    }

    fn color(&self, opacity: f64) -> Color {
        self.style.font_colour.over(self.style.background_colour, opacity)
    }

    /// The static sections as `(text, opacity)` rows wrapped to `width` columns.
    fn section_lines(&self, width: u16) -> Vec<(String, f64)> {
        let width = usize::from(width.max(1));
        let mut lines = Vec::new();

        if let Some(name) = &self.page.name {
            lines.push((name.clone(), 1.0));
            lines.push((String::new(), 1.0));
        }

        let mut about = Vec::new();
        for paragraph in &self.page.about {
            if !about.is_empty() {
                about.push(String::new());
            }
            about.extend(wrap(paragraph, width));
        }
        push_section(&mut lines, "About", about);

        let mut projects = Vec::new();
        for project in &self.page.projects {
            let summary = match &project.description {
                Some(description) => format!("{}: {description}", project.name),
                None => project.name.clone(),
            };
            projects.extend(wrap(&summary, width));
            projects.extend(project.link.iter().map(|link| format!("  {link}")));
        }
        push_section(&mut lines, "Projects", projects);

        let contacts = self.page.contacts.iter().map(|contact| format!("{}: {}", contact.label, contact.link)).collect();
        push_section(&mut lines, "Contact", contacts);
        lines
    }
}

fn push_section(lines: &mut Vec<(String, f64)>, title: &str, body: Vec<String>) {
    if body.is_empty() {
        return;
    }
    lines.push((title.to_string(), SECTION_HEADING_OPACITY));
    lines.extend(body.into_iter().map(|line| (line, 1.0)));
    lines.push((String::new(), 1.0));
}

/// Greedy word wrap by display width. Words wider than `width` get a row of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() { word.width() } else { current.width() + 1 + word.width() };
        if needed > width && !current.is_empty() {
            rows.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}
