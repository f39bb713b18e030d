use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::{App, FormField, InputMode};
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Entry form
            Constraint::Length(1), // KPI line
            Constraint::Min(3),    // Table
        ])
        .split(area);

    render_form(f, chunks[0], app);
    render_kpis(f, chunks[1], app);
    render_table(f, chunks[2], app);
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(16),
            Constraint::Length(14),
            Constraint::Length(18),
            Constraint::Min(20),
        ])
        .split(area);

    let editing = app.input_mode == InputMode::Editing;

    for (field, cell) in FormField::all().iter().zip(cells.iter()) {
        let focused = editing && app.form_field == *field;
        let value = app.form_value(*field);
        let text = if *field == FormField::Category {
            format!("< {value} >")
        } else {
            value.to_string()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_style(focused))
            .title(Span::styled(format!(" {} ", field.label()), theme::title_style()));
        let style = if focused {
            theme::normal_style().add_modifier(Modifier::BOLD)
        } else {
            theme::normal_style()
        };
        f.render_widget(Paragraph::new(Span::styled(text, style)).block(block), *cell);

        if focused && *field != FormField::Category {
            let width = value.chars().count() as u16;
            let max_x = cell.x + cell.width.saturating_sub(2);
            f.set_cursor_position(((cell.x + 1 + width).min(max_x), cell.y + 1));
        }
    }
}

fn render_kpis(f: &mut Frame, area: Rect, app: &App) {
    let overview = &app.overview;
    let prediction = overview
        .prediction
        .map(|p| app.money(p))
        .unwrap_or_else(|| "not enough data".into());

    let line = Line::from(vec![
        Span::styled(" Total ", theme::dim_style()),
        Span::styled(app.money(overview.total), theme::amount_style()),
        Span::styled("  │  Monthly avg ", theme::dim_style()),
        Span::styled(app.money(overview.monthly_average), theme::amount_style()),
        Span::styled("  │  Predicted next month ", theme::dim_style()),
        Span::styled(prediction, Style::default().fg(theme::YELLOW)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_table(f: &mut Frame, area: Rect, app: &App) {
    let txns = &app.overview.transactions;
    let title = Span::styled(format!(" Transactions ({}) ", txns.len()), theme::title_style());

    if txns.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No transactions yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Press a to fill in the form, or :add 2025-07-01 4.50 Drinks Coffee",
                theme::dim_style(),
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_style(false))
            .title(title);
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["#", "Date", "Category", "Description", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = txns
        .iter()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let style = if i == app.transaction_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(txn.id.to_string()),
                Cell::from(txn.date_iso()),
                Cell::from(txn.category.as_str()),
                Cell::from(truncate(&txn.description, 40)),
                Cell::from(Span::styled(app.money(txn.amount), theme::amount_style())),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Length(12),
        Constraint::Length(15),
        Constraint::Min(20),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_style(false))
            .title(title),
    );

    f.render_widget(table, area);
}
