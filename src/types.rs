use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tabled::Tabled;

/// A row as it appears in `day.csv`. Every field is read as text so the
/// loader can report exactly which value was malformed; columns we do not
/// use (`instant`, `temp`, `casual`, ...) are ignored by serde.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "dteday")]
    pub dteday: Option<String>,
    #[serde(rename = "season")]
    pub season: Option<String>,
    #[serde(rename = "yr")]
    pub yr: Option<String>,
    #[serde(rename = "mnth")]
    pub mnth: Option<String>,
    #[serde(rename = "cnt")]
    pub cnt: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    pub fn from_code(code: u8) -> Option<Season> {
        match code {
            1 => Some(Season::Spring),
            2 => Some(Season::Summer),
            3 => Some(Season::Fall),
            4 => Some(Season::Winter),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

/// One validated daily observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub date: NaiveDate,
    pub season: Season,
    /// Offset from the configured base year (0 = 2011 in the stock dataset).
    pub year: u8,
    /// 1..=12
    pub month: u8,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonYearTotal {
    pub season: Season,
    pub year: u8,
    pub total_count: u64,
}

/// Year x month table. Every year present has all twelve months.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlyTotals {
    rows: BTreeMap<u8, [u64; 12]>,
}

impl MonthlyTotals {
    pub(crate) fn from_rows(rows: BTreeMap<u8, [u64; 12]>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn years(&self) -> impl Iterator<Item = u8> + '_ {
        self.rows.keys().copied()
    }

    pub fn row(&self, year: u8) -> Option<&[u64; 12]> {
        self.rows.get(&year)
    }

    /// `month` is 1-based. Absent years and out-of-range months read as 0.
    pub fn get(&self, year: u8, month: u8) -> u64 {
        if !(1..=12).contains(&month) {
            return 0;
        }
        self.rows
            .get(&year)
            .map(|r| r[(month - 1) as usize])
            .unwrap_or(0)
    }

    pub fn max_cell(&self) -> u64 {
        self.rows
            .values()
            .flat_map(|r| r.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct DailyTotalRow {
    #[serde(rename = "Date")]
    #[tabled(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "TotalCount")]
    #[tabled(rename = "TotalCount")]
    pub total_count: u64,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct SeasonYearRow {
    #[serde(rename = "Season")]
    #[tabled(rename = "Season")]
    pub season: String,
    #[serde(rename = "Year")]
    #[tabled(rename = "Year")]
    pub year: i32,
    #[serde(rename = "TotalCount")]
    #[tabled(rename = "TotalCount")]
    pub total_count: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct MonthlyRow {
    #[serde(rename = "Year")]
    #[tabled(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Jan")]
    #[tabled(rename = "Jan")]
    pub jan: u64,
    #[serde(rename = "Feb")]
    #[tabled(rename = "Feb")]
    pub feb: u64,
    #[serde(rename = "Mar")]
    #[tabled(rename = "Mar")]
    pub mar: u64,
    #[serde(rename = "Apr")]
    #[tabled(rename = "Apr")]
    pub apr: u64,
    #[serde(rename = "May")]
    #[tabled(rename = "May")]
    pub may: u64,
    #[serde(rename = "Jun")]
    #[tabled(rename = "Jun")]
    pub jun: u64,
    #[serde(rename = "Jul")]
    #[tabled(rename = "Jul")]
    pub jul: u64,
    #[serde(rename = "Aug")]
    #[tabled(rename = "Aug")]
    pub aug: u64,
    #[serde(rename = "Sep")]
    #[tabled(rename = "Sep")]
    pub sep: u64,
    #[serde(rename = "Oct")]
    #[tabled(rename = "Oct")]
    pub oct: u64,
    #[serde(rename = "Nov")]
    #[tabled(rename = "Nov")]
    pub nov: u64,
    #[serde(rename = "Dec")]
    #[tabled(rename = "Dec")]
    pub dec: u64,
}

impl MonthlyRow {
    pub fn new(year: i32, cells: &[u64; 12]) -> Self {
        Self {
            year,
            jan: cells[0],
            feb: cells[1],
            mar: cells[2],
            apr: cells[3],
            may: cells[4],
            jun: cells[5],
            jul: cells[6],
            aug: cells[7],
            sep: cells[8],
            oct: cells[9],
            nov: cells[10],
            dec: cells[11],
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct BusiestDay {
    pub date: NaiveDate,
    pub total_count: u64,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DashboardSummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_rent: u64,
    pub days: usize,
    pub busiest_day: Option<BusiestDay>,
    pub top_season: Option<String>,
    pub top_season_year: Option<i32>,
}
