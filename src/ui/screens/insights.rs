use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Wrap},
    Frame,
};
use rust_decimal::Decimal;

use crate::models::Category;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::bar_value;

/// Most recent months shown in the trend chart.
const TREND_MONTHS: usize = 12;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Summary cards
            Constraint::Min(10),   // Charts
            Constraint::Length(7), // Top categories + insight
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    render_trend_chart(f, charts[0], app);
    render_category_chart(f, charts[1], app);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[2]);
    render_top_categories(f, bottom[0], app);
    render_insight(f, bottom[1], app);
}

fn block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style(false))
        .title(Span::styled(format!(" {title} "), theme::title_style()))
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let overview = &app.overview;
    render_card(f, cards[0], "Total Spent", app.money(overview.total), theme::PEACH);
    render_card(
        f,
        cards[1],
        "Monthly Average",
        app.money(overview.monthly_average),
        theme::ACCENT,
    );
    match overview.prediction {
        Some(p) => render_card(f, cards[2], "Predicted Next Month", app.money(p), theme::YELLOW),
        None => render_card(
            f,
            cards[2],
            "Predicted Next Month",
            "Not enough data".into(),
            theme::TEXT_DIM,
        ),
    }
    render_card(
        f,
        cards[3],
        "Transactions",
        overview.transactions.len().to_string(),
        theme::TEXT,
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, value: String, color: Color) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(block(title));

    f.render_widget(text, area);
}

fn render_empty(f: &mut Frame, area: Rect, title: &str) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("No spending recorded yet", theme::dim_style())),
    ])
    .centered()
    .block(block(title));
    f.render_widget(msg, area);
}

fn render_trend_chart(f: &mut Frame, area: Rect, app: &App) {
    const TITLE: &str = "Monthly Spending Trend";
    let monthly = &app.overview.monthly_totals;
    if monthly.is_empty() {
        render_empty(f, area, TITLE);
        return;
    }

    let bars: Vec<Bar> = monthly
        .iter()
        .skip(monthly.len().saturating_sub(TREND_MONTHS))
        .map(|m| {
            Bar::default()
                .value(bar_value(m.amount))
                .text_value(app.money(m.amount))
                .label(Line::from(m.month.to_string()))
                .style(Style::default().fg(theme::ACCENT))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(block(TITLE))
        .data(BarGroup::default().bars(&bars))
        .bar_width(9)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme::ACCENT));

    f.render_widget(chart, area);
}

fn render_category_chart(f: &mut Frame, area: Rect, app: &App) {
    const TITLE: &str = "Spending by Category";
    let totals = &app.overview.category_totals;
    if totals.is_empty() {
        render_empty(f, area, TITLE);
        return;
    }

    // Largest first, ties by name, as in the top categories list.
    let mut ranked: Vec<(&Category, &Decimal)> = totals.iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));

    let bars: Vec<Bar> = ranked
        .into_iter()
        .map(|(category, amount)| {
            Bar::default()
                .value(bar_value(*amount))
                .text_value(app.money(*amount))
                .label(Line::from(category.as_str()))
                .style(Style::default().fg(theme::PEACH))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(theme::PEACH)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(block(TITLE))
        .data(BarGroup::default().bars(&bars))
        .bar_width(13)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme::PEACH));

    f.render_widget(chart, area);
}

fn render_top_categories(f: &mut Frame, area: Rect, app: &App) {
    const TITLE: &str = "Top Categories";
    let top = &app.overview.top_categories;
    if top.is_empty() {
        render_empty(f, area, TITLE);
        return;
    }

    let lines: Vec<Line> = top
        .iter()
        .enumerate()
        .map(|(rank, c)| {
            Line::from(vec![
                Span::styled(format!(" {}. ", rank + 1), theme::dim_style()),
                Span::styled(format!("{:<14}", c.category.as_str()), theme::normal_style()),
                Span::styled(app.money(c.amount), theme::amount_style()),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block(TITLE)), area);
}

fn render_insight(f: &mut Frame, area: Rect, app: &App) {
    let insight = &app.overview.insight;
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            insight.to_string(),
            Style::default()
                .fg(theme::insight_color(insight))
                .add_modifier(Modifier::BOLD),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(block("Insight"));

    f.render_widget(text, area);
}
