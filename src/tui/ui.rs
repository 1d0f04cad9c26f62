//! Frame layout. Derived views (stats, visible list, chart series) are
//! recomputed from `App` on every draw.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{
    ConfirmDialog, CurrencyPicker, LogForm, LogList, LoginScreen, StatsPanel, TitleBar, TrendChart,
};
use crate::tui::{Focus, Overlay, TuiState};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let [title_area, body_area] = Layout::vertical([Length(1), Min(0)]).areas(frame.area());

    let is_busy = app.store.is_loading() || app.pending_mutation || app.session.is_loading;
    TitleBar::new(
        app.greeting(),
        app.status_message.clone(),
        is_busy,
        spinner_frame,
    )
    .render(frame, title_area);

    if !app.session.is_authenticated() {
        let hint = (app.backend.name() == "mock")
            .then_some("Demo mode: any email and password will work");
        LoginScreen::new(&mut tui.login, app.session.is_loading, hint).render(frame, body_area);
        return;
    }

    let show_search = tui.focus == Focus::Search || !app.search_term.is_empty();
    let search_height = if show_search { 3 } else { 0 };
    let [stats_area, chart_area, search_area, list_area] = Layout::vertical([
        Length(3),
        Constraint::Percentage(35),
        Length(search_height),
        Min(5),
    ])
    .areas(body_area);

    StatsPanel::new(app.stats(), app.currency).render(frame, stats_area);

    let trend = app.trend();
    TrendChart::new(&trend, app.currency).render(frame, chart_area);

    if show_search {
        tui.search.focused = tui.focus == Focus::Search && tui.overlay.is_none();
        tui.search.render(frame, search_area);
    }

    let visible = app.visible_records();
    LogList::new(
        &mut tui.log_list,
        &visible,
        app.currency,
        app.sort_order,
        app.store.len(),
    )
    .render(frame, list_area);

    match &mut tui.overlay {
        Some(Overlay::Form(state)) => LogForm::new(state, app.currency).render(frame, body_area),
        Some(Overlay::ConfirmDelete(state)) => {
            ConfirmDialog::new(state, app.currency).render(frame, body_area)
        }
        Some(Overlay::Currency(state)) => {
            CurrencyPicker::new(state, app.currency).render(frame, body_area)
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::session::{MemoryTokenStore, SessionContext};
    use crate::test_support::{record, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn loaded_app() -> App {
        let mut app = test_app();
        update(&mut app, Action::Refresh);
        let generation = app.fetch_generation;
        update(
            &mut app,
            Action::FetchCompleted {
                generation,
                result: Ok(vec![
                    record("1", "2025-04-18", 45.0, 1.35, 60.75, "Sedan"),
                    record("2", "2025-04-10", 40.0, 1.40, 56.00, "Truck"),
                ]),
            },
        );
        app
    }

    #[test]
    fn test_dashboard_shows_stats_and_rows() {
        let app = loaded_app();
        let mut tui = TuiState::new();
        let text = draw(&app, &mut tui);
        assert!(text.contains("Welcome back, Demo User!"));
        assert!(text.contains("$116.75"));
        assert!(text.contains("85.00 L"));
        assert!(text.contains("2025-04-18"));
        assert!(text.contains("Truck"));
    }

    #[test]
    fn test_search_filters_table() {
        let mut app = loaded_app();
        update(&mut app, Action::SetSearch("sedan".into()));
        let mut tui = TuiState::new();
        tui.search.set_value("sedan");
        let text = draw(&app, &mut tui);
        assert!(text.contains("Fuel Logs (1 of 2)"));
        assert!(!text.contains("2025-04-10"));
    }

    #[test]
    fn test_signed_out_shows_login() {
        let mut app = test_app();
        app.session = SessionContext::init(Box::new(MemoryTokenStore::default()));
        let mut tui = TuiState::new();
        let text = draw(&app, &mut tui);
        assert!(text.contains("Sign In"));
        assert!(text.contains("Demo mode"));
        assert!(!text.contains("Total Cost"));
    }

    #[test]
    fn test_form_overlay_renders_over_dashboard() {
        let app = loaded_app();
        let mut tui = TuiState::new();
        tui.overlay = Some(Overlay::Form(
            crate::tui::components::LogFormState::new(app.clock.today()),
        ));
        let text = draw(&app, &mut tui);
        assert!(text.contains("Add Fuel Log"));
    }
}
