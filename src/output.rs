use crate::error::Result;
use crate::types::{
    DailyTotal, DailyTotalRow, DashboardSummary, MonthlyRow, MonthlyTotals, SeasonYearRow,
    SeasonYearTotal,
};
use crate::util::format_int;
use serde::Serialize;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};
use tracing::info;

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Render the first `max_rows` rows as a markdown table.
pub fn table_preview<T>(rows: &[T], max_rows: usize) -> String
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        return "(no rows)\n".to_string();
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    format!("{}\n", table_str)
}

pub fn daily_rows(daily: &[DailyTotal]) -> Vec<DailyTotalRow> {
    daily
        .iter()
        .map(|d| DailyTotalRow {
            date: d.date,
            total_count: d.total_count,
        })
        .collect()
}

pub fn season_year_rows(seasons: &[SeasonYearTotal], base_year: i32) -> Vec<SeasonYearRow> {
    seasons
        .iter()
        .map(|s| SeasonYearRow {
            season: s.season.label().to_string(),
            year: base_year + i32::from(s.year),
            total_count: format_int(s.total_count),
        })
        .collect()
}

pub fn monthly_rows(monthly: &MonthlyTotals, base_year: i32) -> Vec<MonthlyRow> {
    monthly
        .years()
        .filter_map(|year| {
            monthly
                .row(year)
                .map(|cells| MonthlyRow::new(base_year + i32::from(year), cells))
        })
        .collect()
}

/// Write every derived table plus `summary.json` into `dir`, creating it if
/// needed.
pub fn export_all(
    dir: &Path,
    daily: &[DailyTotal],
    seasons: &[SeasonYearTotal],
    monthly: &MonthlyTotals,
    summary: &DashboardSummary,
    base_year: i32,
) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    write_csv(&dir.join("daily_totals.csv"), &daily_rows(daily))?;
    write_csv(
        &dir.join("season_year_totals.csv"),
        &season_year_rows(seasons, base_year),
    )?;
    write_csv(&dir.join("monthly_totals.csv"), &monthly_rows(monthly, base_year))?;
    write_json(&dir.join("summary.json"), summary)?;
    info!("Exported dashboard tables to {}", dir.display());
    Ok(())
}
