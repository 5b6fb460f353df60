use crate::aggregation::{CategoryTotal, Dashboard, Metrics, MonthlyPoint, Period, TrendOrder};
use crate::error::{Error, Result};
use crate::models::transaction::{Transaction, TransactionType};
use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::{
    prelude::{Alignment, Color, Constraint, Direction, Layout, Rect, Style},
    style::Stylize,
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table},
};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::io;

/// Colours handed out to categories by position, wrapping around.
pub const CATEGORY_PALETTE: [Color; 6] = [
    Color::Rgb(0x3b, 0x82, 0xf6),
    Color::Rgb(0xef, 0x44, 0x44),
    Color::Rgb(0x10, 0xb9, 0x81),
    Color::Rgb(0xf5, 0x9e, 0x0b),
    Color::Rgb(0x8b, 0x5c, 0xf6),
    Color::Rgb(0x06, 0xb6, 0xd4),
];

const INCOME_COLOR: Color = Color::Rgb(0x10, 0xb9, 0x81);
const EXPENSE_COLOR: Color = Color::Rgb(0xef, 0x44, 0x44);
const MARGIN_COLOR: Color = Color::Rgb(0x3b, 0x82, 0xf6);

pub fn category_color(index: usize) -> Color {
    CATEGORY_PALETTE[index % CATEGORY_PALETTE.len()]
}

struct DashboardView<'a> {
    transactions: &'a [Transaction],
    today: NaiveDate,
    period: Period,
    order: TrendOrder,
    dashboard: Dashboard,
}

impl<'a> DashboardView<'a> {
    fn new(transactions: &'a [Transaction], today: NaiveDate, period: Period, order: TrendOrder) -> Self {
        let dashboard = Dashboard::compute(transactions, period, today, order);
        Self {
            transactions,
            today,
            period,
            order,
            dashboard,
        }
    }

    fn recompute(&mut self) {
        self.dashboard = Dashboard::compute(self.transactions, self.period, self.today, self.order);
    }

    fn cycle_period(&mut self) {
        self.period = self.period.cycle();
        self.recompute();
    }

    fn toggle_order(&mut self) {
        self.order = self.order.toggle();
        self.recompute();
    }

    fn visible_transactions(&self) -> impl Iterator<Item = &'a Transaction> + '_ {
        self.transactions
            .iter()
            .filter(|t| self.period.contains(t.date, self.today))
    }
}

/// Opens the full-screen dashboard until the user presses `q` or `Esc`.
pub fn run_dashboard(
    transactions: &[Transaction],
    today: NaiveDate,
    period: Period,
    order: TrendOrder,
) -> Result<()> {
    enable_raw_mode().map_err(|e| Error::Terminal(format!("Failed to enable raw mode: {}", e)))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| Error::Terminal(format!("Failed to enter alternate screen: {}", e)))?;

    let result = (|| -> Result<()> {
        let backend = ratatui::backend::CrosstermBackend::new(stdout);
        let mut terminal = ratatui::Terminal::new(backend)
            .map_err(|e| Error::Terminal(format!("Failed to initialize terminal: {}", e)))?;

        let mut view = DashboardView::new(transactions, today, period, order);

        loop {
            terminal
                .draw(|frame| render(frame, &view))
                .map_err(|e| Error::Terminal(format!("Failed to draw terminal UI: {}", e)))?;

            if event::poll(std::time::Duration::from_millis(250))
                .map_err(|e| Error::Terminal(format!("Failed to poll input: {}", e)))?
            {
                match event::read().map_err(|e| Error::Terminal(format!("Failed to read input: {}", e)))? {
                    Event::Key(key) if key.kind == KeyEventKind::Release => {}
                    Event::Key(key) => match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Char('p') => view.cycle_period(),
                        KeyCode::Char('o') => view.toggle_order(),
                        _ => {}
                    },
                    _ => {}
                }
            }
        }

        Ok(())
    })();

    disable_raw_mode().map_err(|e| Error::Terminal(format!("Failed to disable raw mode: {}", e)))?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen)
        .map_err(|e| Error::Terminal(format!("Failed to leave alternate screen: {}", e)))?;

    result
}

fn render(frame: &mut ratatui::Frame, view: &DashboardView) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Percentage(45),
            Constraint::Min(5),
        ])
        .split(frame.area());

    let header = Line::from(vec![
        Span::styled("Financial Dashboard", Style::default().fg(Color::Cyan).bold()),
        Span::raw(format!(
            "  {} ({} transactions)  |  trend: {}  |  p period  o order  q/Esc exit",
            view.period.label(),
            view.dashboard.transaction_count,
            view.order.label(),
        )),
    ]);
    frame.render_widget(Paragraph::new(header), layout[0]);

    render_cards(frame, layout[1], &view.dashboard.metrics);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(layout[2]);

    render_trend_chart(frame, charts[0], &view.dashboard.monthly_trend);
    render_pie_chart(frame, charts[1], &view.dashboard.categories);
    render_category_legend(frame, charts[2], &view.dashboard.categories);

    let visible: Vec<&Transaction> = view.visible_transactions().collect();
    render_transaction_table(frame, layout[3], &visible);
}

fn render_cards(frame: &mut ratatui::Frame, area: Rect, metrics: &Metrics) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let (profit_color, profit_subtitle) = if metrics.is_loss() {
        (EXPENSE_COLOR, "Loss")
    } else {
        (INCOME_COLOR, "Profit")
    };

    let cards = [
        ("Total Income", format_money(metrics.income), INCOME_COLOR, "This period"),
        ("Total Expenses", format_money(metrics.expense), EXPENSE_COLOR, "This period"),
        ("Net Profit", format_money(metrics.net_profit), profit_color, profit_subtitle),
        ("Profit Margin", format!("{}%", metrics.margin_percent), MARGIN_COLOR, "Profitability"),
    ];

    for ((title, value, color, subtitle), area) in cards.into_iter().zip(columns.iter()) {
        let lines = vec![
            Line::from(Span::styled(value, Style::default().fg(color).bold())),
            Line::from(Span::styled(subtitle, Style::default().fg(Color::DarkGray))),
        ];
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        frame.render_widget(Paragraph::new(lines).block(block), *area);
    }
}

fn render_trend_chart(frame: &mut ratatui::Frame, area: Rect, trend: &[MonthlyPoint]) {
    let block = Block::default().title("Monthly Trend").borders(Borders::ALL);

    if trend.is_empty() {
        let empty = Paragraph::new("No transactions in this period")
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let (income, expense) = trend_points(trend);
    let max_y = income
        .iter()
        .chain(expense.iter())
        .map(|(_, y)| *y)
        .fold(0.0_f64, f64::max)
        .max(1.0);
    let max_x = (trend.len().saturating_sub(1) as f64).max(1.0);

    let datasets = vec![
        Dataset::default()
            .name("Income")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(INCOME_COLOR))
            .data(&income),
        Dataset::default()
            .name("Expenses")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(EXPENSE_COLOR))
            .data(&expense),
    ];

    let x_labels: Vec<String> = trend.iter().map(|p| p.period.clone()).collect();
    let y_labels = vec!["0".to_string(), format!("{:.0}", max_y / 2.0), format!("{:.0}", max_y)];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(Axis::default().bounds([0.0, max_x]).labels(x_labels))
        .y_axis(Axis::default().bounds([0.0, max_y]).labels(y_labels));

    frame.render_widget(chart, area);
}

/// One point per month for each series, x being the position in the series.
fn trend_points(trend: &[MonthlyPoint]) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    trend
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let x = i as f64;
            (
                (x, p.income.to_f64().unwrap_or(0.0)),
                (x, p.expense.to_f64().unwrap_or(0.0)),
            )
        })
        .unzip()
}

/// Start and end angle of each category's slice, in radians.
fn slice_angles(categories: &[CategoryTotal]) -> Vec<(f64, f64)> {
    let total: f64 = categories
        .iter()
        .map(|c| c.total.to_f64().unwrap_or(0.0))
        .sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut start_angle = 0.0_f64;
    categories
        .iter()
        .map(|c| {
            let sweep = c.total.to_f64().unwrap_or(0.0) / total * std::f64::consts::TAU;
            let slice = (start_angle, start_angle + sweep);
            start_angle += sweep;
            slice
        })
        .collect()
}

/// Whole-number percentage of `part` in `total`, for the legend.
fn share_percent(part: Decimal, total: Decimal) -> Decimal {
    if total <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(total)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|percent| percent.round())
        .unwrap_or(Decimal::ZERO)
}

fn render_pie_chart(frame: &mut ratatui::Frame, area: Rect, categories: &[CategoryTotal]) {
    let block = Block::default().title("By Category").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let slices = slice_angles(categories);
    if slices.is_empty() {
        let empty = Paragraph::new("No data").alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let canvas = Canvas::default()
        .x_bounds([-1.0, 1.0])
        .y_bounds([-1.0, 1.0])
        .paint(|ctx| {
            for (index, (start, end)) in slices.iter().enumerate() {
                let mut points = Vec::new();
                let mut r = 0.0;
                while r <= 1.0 {
                    let mut angle = *start;
                    while angle <= *end {
                        points.push((r * angle.cos(), r * angle.sin()));
                        angle += 0.05;
                    }
                    r += 0.04;
                }
                if !points.is_empty() {
                    ctx.draw(&Points {
                        coords: &points,
                        color: category_color(index),
                    });
                }
            }
        });

    frame.render_widget(canvas, inner);
}

fn render_category_legend(frame: &mut ratatui::Frame, area: Rect, categories: &[CategoryTotal]) {
    let block = Block::default().title("Categories").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let total = categories
        .iter()
        .fold(Decimal::ZERO, |sum, c| sum.saturating_add(c.total));
    let lines: Vec<Line> = categories
        .iter()
        .enumerate()
        .map(|(index, c)| {
            let share = share_percent(c.total, total);
            let color = category_color(index);
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(color)),
                Span::styled(format!("{:15}", c.category), Style::default().fg(color)),
                Span::raw(format!(" {:>12} {:>3}%", format_money(c.total), share)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Left), inner);
}

fn render_transaction_table(frame: &mut ratatui::Frame, area: Rect, transactions: &[&Transaction]) {
    let block = Block::default().title("Transactions").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if transactions.is_empty() {
        let empty = Paragraph::new("No transactions in this period")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    let header = Row::new([
        Cell::from("Type").style(Style::default().bold()),
        Cell::from("Description").style(Style::default().bold()),
        Cell::from("Category").style(Style::default().bold()),
        Cell::from("Amount").style(Style::default().bold()),
        Cell::from("Date").style(Style::default().bold()),
        Cell::from("Id").style(Style::default().bold()),
    ]);

    let rows = transactions.iter().map(|tx| {
        let color = match tx.transaction_type {
            TransactionType::Income => INCOME_COLOR,
            TransactionType::Expense => EXPENSE_COLOR,
        };
        Row::new([
            Cell::from(tx.transaction_type.label()).style(Style::default().fg(color)),
            Cell::from(tx.description.clone()),
            Cell::from(tx.category.clone()),
            Cell::from(format_signed(tx.signed_amount())).style(Style::default().fg(color)),
            Cell::from(tx.date.format("%Y-%m-%d").to_string()),
            Cell::from(tx.id.short()),
        ])
    });

    let widths = [
        Constraint::Length(8),
        Constraint::Percentage(35),
        Constraint::Length(16),
        Constraint::Length(14),
        Constraint::Length(10),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths).header(header).column_spacing(1);
    frame.render_widget(table, inner);
}

fn format_money(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

fn format_signed(amount: Decimal) -> String {
    if amount < Decimal::ZERO {
        format!("-{:.2}", amount.abs())
    } else {
        format!("+{:.2}", amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_category(category: &str, total: i64) -> CategoryTotal {
        CategoryTotal {
            category: category.to_string(),
            total: Decimal::new(total, 0),
        }
    }

    #[test]
    fn test_category_color_wraps_around_palette() {
        assert_eq!(category_color(0), CATEGORY_PALETTE[0]);
        assert_eq!(category_color(5), CATEGORY_PALETTE[5]);
        assert_eq!(category_color(6), CATEGORY_PALETTE[0]);
        assert_eq!(category_color(13), CATEGORY_PALETTE[1]);
    }

    #[test]
    fn test_slice_angles_cover_full_circle() {
        let categories = vec![create_category("Vendas", 75), create_category("Fixos", 25)];

        let slices = slice_angles(&categories);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].0, 0.0);
        assert!((slices[0].1 - std::f64::consts::TAU * 0.75).abs() < 1e-9);
        assert!((slices[1].1 - std::f64::consts::TAU).abs() < 1e-9);
    }

    #[test]
    fn test_slice_angles_empty_when_no_volume() {
        assert!(slice_angles(&[]).is_empty());
        assert!(slice_angles(&[create_category("Vendas", 0)]).is_empty());
    }

    #[test]
    fn test_trend_points_follow_series_order() {
        let trend = vec![
            MonthlyPoint {
                period: "2025-02".to_string(),
                income: Decimal::new(100, 0),
                expense: Decimal::new(40, 0),
            },
            MonthlyPoint {
                period: "2025-01".to_string(),
                income: Decimal::ZERO,
                expense: Decimal::new(5, 1),
            },
        ];

        let (income, expense) = trend_points(&trend);
        assert_eq!(income, vec![(0.0, 100.0), (1.0, 0.0)]);
        assert_eq!(expense, vec![(0.0, 40.0), (1.0, 0.5)]);
    }

    #[test]
    fn test_format_signed() {
        assert_eq!(format_signed(Decimal::new(5000, 0)), "+5000.00");
        assert_eq!(format_signed(Decimal::new(-2050, 1)), "-205.00");
    }

    #[test]
    fn test_share_percent() {
        assert_eq!(share_percent(Decimal::new(75, 0), Decimal::new(100, 0)), Decimal::new(75, 0));
        assert_eq!(share_percent(Decimal::new(1, 0), Decimal::new(3, 0)), Decimal::new(33, 0));
        assert_eq!(share_percent(Decimal::new(5, 0), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(share_percent(Decimal::MAX, Decimal::MAX), Decimal::ONE_HUNDRED);
    }
}
