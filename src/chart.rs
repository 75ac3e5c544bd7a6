// Terminal charts for the dashboard.
//
// Each panel is a ratatui `BarChart` drawn into an off-screen `Buffer` and
// flattened to text, so the caller decides where it goes.

use crate::types::{DailyTotal, MonthlyTotals, Season, SeasonYearTotal};
use crate::util::{format_int, month_label};
use ratatui::buffer::Buffer;
use ratatui::layout::{Direction, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Widget};
use std::collections::BTreeSet;

const DAILY_TITLE: &str = "Daily Bike Sharing Counts";
const SEASON_TITLE: &str = "Bike Sharing Count by Season and Year";
const MONTHLY_TITLE: &str = "Bike Sharing Count by Month";

// Season panel geometry. Bars are wide enough for a seven-digit total.
const SEASON_BAR_WIDTH: u16 = 10;
const SEASON_PLOT_HEIGHT: u16 = 12;
const SEASON_GROUP_GAP: u16 = 2;

fn bar(label: String, value: u64) -> Bar<'static> {
    Bar::default()
        .label(Line::from(label))
        .value(value)
        .text_value(format_int(value))
}

fn empty_panel(title: &str) -> String {
    format!("{}\n(no rows)\n", title)
}

/// Wide enough that the border title is never clipped.
fn panel_width(title: &str, content: usize) -> u16 {
    let min = title.chars().count() + 4;
    u16::try_from(content.max(min)).unwrap_or(u16::MAX)
}

/// Draw `chart` into a `width` x `height` buffer and return its rows.
fn draw(chart: BarChart<'_>, width: u16, height: u16) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    chart.render(area, &mut buf);

    let mut out = String::new();
    for y in 0..height {
        let line: String = (0..width)
            .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
            .collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// One horizontal bar per day, in date order.
pub fn render_daily(daily: &[DailyTotal], width: usize) -> String {
    if daily.is_empty() {
        return empty_panel(DAILY_TITLE);
    }
    let bars: Vec<Bar> = daily
        .iter()
        .map(|d| bar(d.date.to_string(), d.total_count))
        .collect();

    let label_width = 10;
    let chart = BarChart::default()
        .block(Block::bordered().title(format!(" {} ", DAILY_TITLE)))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars));

    let height = u16::try_from(daily.len() + 2).unwrap_or(u16::MAX);
    draw(chart, panel_width(DAILY_TITLE, label_width + 1 + width + 2), height)
}

/// Clustered bars: one group per season, one bar per year inside it.
pub fn render_season_year(seasons: &[SeasonYearTotal], base_year: i32) -> String {
    if seasons.is_empty() {
        return empty_panel(SEASON_TITLE);
    }
    let years: BTreeSet<u8> = seasons.iter().map(|s| s.year).collect();

    let mut chart = BarChart::default()
        .block(Block::bordered().title(format!(" {} ", SEASON_TITLE)))
        .bar_width(SEASON_BAR_WIDTH)
        .bar_gap(1)
        .group_gap(SEASON_GROUP_GAP);

    for season in Season::ALL {
        let bars: Vec<Bar> = years
            .iter()
            .map(|year| {
                let total = seasons
                    .iter()
                    .find(|s| s.season == season && s.year == *year)
                    .map(|s| s.total_count)
                    .unwrap_or(0);
                bar((base_year + i32::from(*year)).to_string(), total)
            })
            .collect();
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(season.label()))
                .bars(&bars),
        );
    }

    let per_group = years.len() * (SEASON_BAR_WIDTH as usize + 1) - 1;
    let groups = Season::ALL.len();
    let content = groups * per_group + (groups - 1) * SEASON_GROUP_GAP as usize + 2;
    // plot area, bar label row, group label row, borders
    let height = SEASON_PLOT_HEIGHT + 2 + 2;
    draw(chart, panel_width(SEASON_TITLE, content), height)
}

/// One group per year, twelve month bars inside it, on a shared scale.
pub fn render_monthly(monthly: &MonthlyTotals, base_year: i32, width: usize) -> String {
    if monthly.is_empty() {
        return empty_panel(MONTHLY_TITLE);
    }

    let mut chart = BarChart::default()
        .block(Block::bordered().title(format!(" {} ", MONTHLY_TITLE)))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .group_gap(1)
        .max(monthly.max_cell().max(1));

    let mut years = 0usize;
    for year in monthly.years() {
        let Some(cells) = monthly.row(year) else {
            continue;
        };
        let bars: Vec<Bar> = (1..=12u8)
            .zip(cells.iter())
            .map(|(month, total)| bar(month_label(month).to_string(), *total))
            .collect();
        chart = chart.data(
            BarGroup::default()
                .label(Line::from((base_year + i32::from(year)).to_string()))
                .bars(&bars),
        );
        years += 1;
    }

    let label_width = 3;
    let height = u16::try_from(years * 13 + 2).unwrap_or(u16::MAX);
    draw(chart, panel_width(MONTHLY_TITLE, label_width + 1 + width + 2), height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::compute_monthly_totals;
    use crate::types::Record;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(d: NaiveDate, year: u8, month: u8, count: u32) -> Record {
        Record {
            date: d,
            season: Season::Spring,
            year,
            month,
            count,
        }
    }

    #[test]
    fn test_render_daily() {
        let daily = vec![
            DailyTotal { date: date(2011, 1, 1), total_count: 1000 },
            DailyTotal { date: date(2011, 1, 2), total_count: 500 },
        ];
        let out = render_daily(&daily, 20);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains(DAILY_TITLE));
        assert!(lines[1].contains("2011-01-01"));
        assert!(lines[1].contains("1,000"));
        assert!(lines[2].contains("2011-01-02"));
        assert!(lines[2].contains("500"));
    }

    #[test]
    fn test_daily_bars_scale_to_largest_day() {
        let daily = vec![
            DailyTotal { date: date(2011, 1, 1), total_count: 1000 },
            DailyTotal { date: date(2011, 1, 2), total_count: 500 },
        ];
        let out = render_daily(&daily, 20);
        let lines: Vec<&str> = out.lines().collect();
        let filled = |l: &str| l.chars().filter(|c| *c == '█').count();
        assert!(filled(lines[1]) > filled(lines[2]));
        assert!(filled(lines[2]) > 0);
    }

    #[test]
    fn test_render_empty_charts() {
        assert_eq!(render_daily(&[], 10), format!("{}\n(no rows)\n", DAILY_TITLE));
        assert!(render_season_year(&[], 2011).ends_with("(no rows)\n"));
        assert!(render_monthly(&MonthlyTotals::default(), 2011, 10).ends_with("(no rows)\n"));
    }

    #[test]
    fn test_render_season_year_groups_every_season() {
        let seasons = vec![
            SeasonYearTotal { season: Season::Fall, year: 1, total_count: 2000 },
            SeasonYearTotal { season: Season::Fall, year: 0, total_count: 1000 },
        ];
        let out = render_season_year(&seasons, 2011);
        assert!(out.lines().next().unwrap().contains(SEASON_TITLE));
        for label in ["Spring", "Summer", "Fall", "Winter"] {
            assert!(out.contains(label), "missing {label} in\n{out}");
        }
        assert_eq!(out.matches("2011").count(), 4);
        assert_eq!(out.matches("2012").count(), 4);
        assert!(out.contains("2,000"));
        assert!(out.contains("1,000"));
    }

    #[test]
    fn test_render_monthly_lists_twelve_months_per_year() {
        let records = vec![
            record(date(2011, 3, 1), 0, 3, 42),
            record(date(2012, 3, 1), 1, 3, 4200),
        ];
        let out = render_monthly(&compute_monthly_totals(&records), 2011, 20);
        assert!(out.lines().next().unwrap().contains(MONTHLY_TITLE));
        for month in ["Jan", "Jun", "Dec"] {
            assert_eq!(out.matches(month).count(), 2);
        }
        assert!(out.contains("4,200"));
    }

    #[test]
    fn test_narrow_width_keeps_title() {
        let daily = vec![DailyTotal { date: date(2011, 1, 1), total_count: 7 }];
        let out = render_daily(&daily, 0);
        assert!(out.contains(DAILY_TITLE));
    }
}
