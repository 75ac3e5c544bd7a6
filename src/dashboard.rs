// One render pass: filter, aggregate, draw, export.

use crate::aggregate::{
    compute_daily_totals, compute_monthly_totals, compute_season_year_totals, summarize,
};
use crate::chart;
use crate::config::Config;
use crate::dataset::{Dataset, DateRange};
use crate::error::Result;
use crate::output;
use crate::types::{DailyTotal, DashboardSummary, MonthlyTotals, SeasonYearTotal};
use crate::util::format_int;
use std::fmt::Write;
use tracing::debug;

/// Snapshot of everything derived from one date range.
#[derive(Debug, Clone)]
pub struct Pass {
    pub range: DateRange,
    pub daily: Vec<DailyTotal>,
    pub seasons: Vec<SeasonYearTotal>,
    pub monthly: MonthlyTotals,
    pub summary: DashboardSummary,
}

/// Owns the loaded dataset for the lifetime of the process.
pub struct Dashboard {
    dataset: Dataset,
    config: Config,
}

impl Dashboard {
    pub fn new(dataset: Dataset, config: Config) -> Self {
        Self { dataset, config }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn compute(&self, range: &DateRange) -> Pass {
        let records = self.dataset.filter(range);
        debug!(
            "Filtered {} of {} records to {}..={}",
            records.len(),
            self.dataset.records().len(),
            range.start(),
            range.end()
        );
        let daily = compute_daily_totals(records);
        let seasons = compute_season_year_totals(records);
        let monthly = compute_monthly_totals(records);
        let summary = summarize(range, &daily, &seasons, self.config.data.base_year);
        Pass {
            range: *range,
            daily,
            seasons,
            monthly,
            summary,
        }
    }

    pub fn render(&self, pass: &Pass) -> String {
        let base_year = self.config.data.base_year;
        let width = self.config.display.chart_width;
        let rows = self.config.display.preview_rows;

        let mut out = String::new();
        let _ = writeln!(out, "Bike Sharing Dashboard");
        let _ = writeln!(out, "({} to {})\n", pass.range.start(), pass.range.end());
        let _ = writeln!(out, "Rent Amount");
        let _ = writeln!(out, "Total rent: {}\n", format_int(pass.summary.total_rent));

        out.push_str(&chart::render_daily(&pass.daily, width));
        out.push('\n');

        out.push_str(&chart::render_season_year(&pass.seasons, base_year));
        out.push('\n');
        out.push_str(&output::table_preview(
            &output::season_year_rows(&pass.seasons, base_year),
            rows,
        ));
        out.push('\n');

        out.push_str(&chart::render_monthly(&pass.monthly, base_year, width));
        out.push('\n');
        out.push_str(&output::table_preview(
            &output::monthly_rows(&pass.monthly, base_year),
            rows,
        ));
        out
    }

    /// Write exports for `pass` if an export directory is configured.
    pub fn export(&self, pass: &Pass) -> Result<()> {
        let Some(dir) = self.config.data.export_dir.as_deref() else {
            return Ok(());
        };
        output::export_all(
            dir,
            &pass.daily,
            &pass.seasons,
            &pass.monthly,
            &pass.summary,
            self.config.data.base_year,
        )
    }

    /// Compute, print and export one range.
    pub fn run_pass(&self, range: &DateRange) -> Result<Pass> {
        let pass = self.compute(range);
        println!("{}", self.render(&pass));
        self.export(&pass)?;
        Ok(pass)
    }
}
