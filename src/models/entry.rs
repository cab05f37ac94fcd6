// file: src/models/entry.rs
// description: corpus entry model with categories and tagged metric values
// reference: internal data structures

use crate::error::{ResumeError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Summary,
    Experience,
    Skills,
    Education,
    Metrics,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Summary => "summary",
            Category::Experience => "experience",
            Category::Skills => "skills",
            Category::Education => "education",
            Category::Metrics => "metrics",
        }
    }

    /// Parse an externally supplied category string. Unknown categories are a
    /// caller error, not a missing entry.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "summary" => Ok(Category::Summary),
            "experience" => Ok(Category::Experience),
            "skills" => Ok(Category::Skills),
            "education" => Ok(Category::Education),
            "metrics" => Ok(Category::Metrics),
            other => Err(ResumeError::InvalidQuery(format!(
                "unknown category: {other}"
            ))),
        }
    }

    pub fn all() -> [Category; 5] {
        [
            Category::Summary,
            Category::Experience,
            Category::Skills,
            Category::Education,
            Category::Metrics,
        ]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricUnit {
    Usd,
    Percent,
    Count,
}

/// A numeric value tagged during corpus load. Only tagged values are eligible
/// for aggregation; numbers appearing in prose are never re-derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricValue {
    pub label: String,
    pub value: f64,
    pub unit: MetricUnit,
}

lazy_static! {
    // "06/2015 - 12/2018" or "01/2019 - Present"
    static ref DATE_RANGE: Regex =
        Regex::new(r"(?i)^\s*(\d{1,2})/(\d{4})\s*-\s*(?:(\d{1,2})/(\d{4})|present)\s*$")
            .expect("DATE_RANGE regex is valid");
}

/// Month/year span for an experience entry. `end = None` means the role is
/// current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start_month: u32,
    pub start_year: i32,
    pub end: Option<(u32, i32)>,
}

impl DateRange {
    pub fn parse(s: &str) -> Option<Self> {
        let captures = DATE_RANGE.captures(s)?;
        let start_month: u32 = captures.get(1)?.as_str().parse().ok()?;
        let start_year: i32 = captures.get(2)?.as_str().parse().ok()?;
        if !(1..=12).contains(&start_month) {
            return None;
        }

        let end = match (captures.get(3), captures.get(4)) {
            (Some(month), Some(year)) => {
                let month: u32 = month.as_str().parse().ok()?;
                let year: i32 = year.as_str().parse().ok()?;
                if !(1..=12).contains(&month) {
                    return None;
                }
                Some((month, year))
            }
            _ => None,
        };

        Some(Self {
            start_month,
            start_year,
            end,
        })
    }

    pub fn is_current(&self) -> bool {
        self.end.is_none()
    }

    /// Closed year of the range, falling back to the supplied current year
    /// for ongoing roles.
    pub fn end_year_or(&self, current_year: i32) -> i32 {
        self.end.map(|(_, year)| year).unwrap_or(current_year)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some((month, year)) => write!(
                f,
                "{:02}/{} - {:02}/{}",
                self.start_month, self.start_year, month, year
            ),
            None => write!(f, "{:02}/{} - Present", self.start_month, self.start_year),
        }
    }
}

/// One retrievable unit of the corpus. Immutable after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub category: Category,
    pub title: String,
    pub organization: Option<String>,
    pub body: String,
    pub highlights: Vec<String>,
    pub metrics: Vec<MetricValue>,
    pub date_range: Option<DateRange>,
}

impl Entry {
    /// Identifier plus title, the highest-weighted match field.
    pub fn heading(&self) -> String {
        match &self.organization {
            Some(org) => format!("{} {} {}", self.id, self.title, org),
            None => format!("{} {}", self.id, self.title),
        }
    }
}
