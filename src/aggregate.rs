// The three dashboard aggregations.
//
// Each one is a pure transform over an already-filtered slice of records:
// partition by key, reduce each group by sum, then (monthly only) densify
// over the full month domain. Empty input yields empty output.
use crate::dataset::DateRange;
use crate::types::{
    BusiestDay, DailyTotal, DashboardSummary, MonthlyTotals, Record, Season, SeasonYearTotal,
};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Group by calendar date and sum counts, ascending by date. Dates with no
/// records are not emitted.
pub fn compute_daily_totals(records: &[Record]) -> Vec<DailyTotal> {
    let mut groups: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for r in records {
        *groups.entry(r.date).or_default() += u64::from(r.count);
    }
    groups
        .into_iter()
        .map(|(date, total_count)| DailyTotal { date, total_count })
        .collect()
}

/// Group by `(season, year)` and sum counts, largest total first.
///
/// Groups are emitted in ascending key order and the sort is stable, so equal
/// totals keep that order.
pub fn compute_season_year_totals(records: &[Record]) -> Vec<SeasonYearTotal> {
    let mut groups: BTreeMap<(Season, u8), u64> = BTreeMap::new();
    for r in records {
        *groups.entry((r.season, r.year)).or_default() += u64::from(r.count);
    }
    let mut rows: Vec<SeasonYearTotal> = groups
        .into_iter()
        .map(|((season, year), total_count)| SeasonYearTotal {
            season,
            year,
            total_count,
        })
        .collect();
    rows.sort_by(|a, b| b.total_count.cmp(&a.total_count));
    rows
}

/// Group by `(year, month)`, sum counts, then fill every month of every year
/// present so each row has exactly twelve cells.
pub fn compute_monthly_totals(records: &[Record]) -> MonthlyTotals {
    let mut sparse: BTreeMap<(u8, u8), u64> = BTreeMap::new();
    for r in records {
        *sparse.entry((r.year, r.month)).or_default() += u64::from(r.count);
    }
    densify_months(&sparse)
}

fn densify_months(sparse: &BTreeMap<(u8, u8), u64>) -> MonthlyTotals {
    let mut dense: BTreeMap<u8, [u64; 12]> = BTreeMap::new();
    for &(year, _) in sparse.keys() {
        dense.entry(year).or_insert([0; 12]);
    }
    for (year, row) in dense.iter_mut() {
        for month in 1..=12u8 {
            row[(month - 1) as usize] = sparse.get(&(*year, month)).copied().unwrap_or(0);
        }
    }
    MonthlyTotals::from_rows(dense)
}

/// The "Total rent" metric.
pub fn total_rent(daily: &[DailyTotal]) -> u64 {
    daily.iter().map(|d| d.total_count).sum()
}

pub fn summarize(
    range: &DateRange,
    daily: &[DailyTotal],
    seasons: &[SeasonYearTotal],
    base_year: i32,
) -> DashboardSummary {
    // First maximum wins so ties resolve to the earliest date.
    let busiest_day = daily
        .iter()
        .fold(None::<&DailyTotal>, |best, d| match best {
            Some(b) if b.total_count >= d.total_count => Some(b),
            _ => Some(d),
        })
        .map(|d| BusiestDay {
            date: d.date,
            total_count: d.total_count,
        });
    let top = seasons.first();
    DashboardSummary {
        start_date: range.start(),
        end_date: range.end(),
        total_rent: total_rent(daily),
        days: daily.len(),
        busiest_day,
        top_season: top.map(|s| s.season.label().to_string()),
        top_season_year: top.map(|s| base_year + i32::from(s.year)),
    }
}
