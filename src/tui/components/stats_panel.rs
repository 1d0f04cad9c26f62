//! # StatsPanel Component
//!
//! Four summary cards across the top of the dashboard.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::currency::Currency;
use crate::core::stats::StatsSnapshot;
use crate::tui::component::Component;

pub struct StatsPanel {
    pub snapshot: StatsSnapshot,
    pub currency: Currency,
}

impl StatsPanel {
    pub fn new(snapshot: StatsSnapshot, currency: Currency) -> Self {
        Self { snapshot, currency }
    }

    fn cards(&self) -> [(&'static str, String, Color); 4] {
        let s = &self.snapshot;
        [
            (
                "Avg. Cost / Liter",
                self.currency.format(s.average_cost_per_liter),
                Color::Cyan,
            ),
            (
                "Monthly Spend",
                self.currency.format(s.monthly_spend),
                Color::Magenta,
            ),
            (
                "Total Liters",
                format!("{:.2} L", s.total_liters),
                Color::Green,
            ),
            ("Total Cost", self.currency.format(s.total_cost), Color::Yellow),
        ]
    }
}

impl Component for StatsPanel {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let areas = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);

        for ((title, value, color), card_area) in self.cards().into_iter().zip(areas.iter()) {
            let block = Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Line::from(title).style(Style::default().fg(color)));
            let value = Paragraph::new(value)
                .style(Style::default().add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(value, *card_area);
        }
    }
}
