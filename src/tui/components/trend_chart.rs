//! # TrendChart Component
//!
//! Line chart of price per liter across the collection, oldest on the left.
//! X axis is the point index; only the first, middle and last date labels
//! are drawn so they fit.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::{Axis, Block, BorderType, Chart, Dataset, GraphType, Paragraph};

use crate::core::currency::Currency;
use crate::core::stats::TrendPoint;
use crate::tui::component::Component;

pub struct TrendChart<'a> {
    pub points: &'a [TrendPoint],
    pub currency: Currency,
}

impl<'a> TrendChart<'a> {
    pub fn new(points: &'a [TrendPoint], currency: Currency) -> Self {
        Self { points, currency }
    }

    fn x_labels(&self) -> Vec<String> {
        match self.points {
            [] => Vec::new(),
            [only] => vec![only.label.clone()],
            [first, .., last] => {
                let mid = &self.points[self.points.len() / 2];
                if self.points.len() > 2 {
                    vec![first.label.clone(), mid.label.clone(), last.label.clone()]
                } else {
                    vec![first.label.clone(), last.label.clone()]
                }
            }
        }
    }

    /// Y bounds padded by 10% so the line doesn't sit on the border.
    fn y_bounds(&self) -> [f64; 2] {
        let (min, max) = self.points.iter().fold((f64::MAX, f64::MIN), |(lo, hi), p| {
            (lo.min(p.price_per_liter), hi.max(p.price_per_liter))
        });
        let pad = ((max - min) * 0.1).max(0.05);
        [(min - pad).max(0.0), max + pad]
    }
}

impl Component for TrendChart<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" Price per Liter ({}) ", self.currency.symbol()));

        if self.points.is_empty() {
            let empty = Paragraph::new("No data yet. Press n to add your first fill-up.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let data: Vec<(f64, f64)> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.price_per_liter))
            .collect();
        let [y_min, y_max] = self.y_bounds();
        let x_max = (self.points.len().saturating_sub(1)).max(1) as f64;

        let dataset = Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&data);

        let chart = Chart::new(vec![dataset])
            .block(block)
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([0.0, x_max])
                    .labels(self.x_labels()),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([y_min, y_max])
                    .labels(vec![format!("{y_min:.2}"), format!("{y_max:.2}")]),
            );
        frame.render_widget(chart, area);
    }
}
