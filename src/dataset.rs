//! CQ4 2025 earnings records for the security & edge sector.

use clap::ValueEnum;
use serde::Serialize;

/// Whether a quarter has been reported or is still an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Actual,
    Consensus,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Actual => "Actual",
            Status::Consensus => "Consensus",
        }
    }
}

/// One company's quarter.
#[derive(Debug, Clone, PartialEq)]
pub struct EarningsRecord {
    pub name: &'static str,
    /// Quarterly revenue, USD millions.
    pub revenue: f64,
    /// Year-over-year revenue growth, percent.
    pub growth: f64,
    /// EBIT margin, percent.
    pub margin: f64,
    pub status: Status,
    /// Report date as `YYYY-MM-DD`.
    pub date: &'static str,
    pub explanation: &'static str,
}

impl EarningsRecord {
    /// Growth plus margin, rounded to one decimal.
    pub fn rule_of_40(&self) -> f64 {
        ((self.growth + self.margin) * 10.0).round() / 10.0
    }

    /// Ticker from the parenthesised suffix, e.g. `FFIV` for `F5 (FFIV)`.
    pub fn ticker(&self) -> &'static str {
        self.name
            .rsplit_once('(')
            .and_then(|(_, rest)| rest.strip_suffix(')'))
            .unwrap_or(self.name)
    }

    /// Date as shown to people, e.g. `Jan 27, 2026`.
    pub fn display_date(&self) -> String {
        const MONTHS: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        let mut parts = self.date.splitn(3, '-');
        let (Some(year), Some(month), Some(day)) = (parts.next(), parts.next(), parts.next())
        else {
            return self.date.to_string();
        };
        let month = month
            .parse::<usize>()
            .ok()
            .and_then(|m| MONTHS.get(m.wrapping_sub(1)));
        let day = day.parse::<u8>().ok();
        match (month, day) {
            (Some(month), Some(day)) => format!("{month} {day}, {year}"),
            _ => self.date.to_string(),
        }
    }

    /// JSON handed to the model as data context.
    pub fn context_json(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "revenue": self.revenue,
            "growth": self.growth,
            "margin": self.margin,
            "sum": self.rule_of_40(),
            "status": self.status,
            "date": self.display_date(),
            "explanation": self.explanation,
        })
    }
}

/// Column to order the matrix by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortKey {
    Name,
    Date,
    Revenue,
    Growth,
    Margin,
    #[default]
    Sum,
}

impl SortKey {
    pub fn parse(input: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(input.trim(), true).ok()
    }
}

static RECORDS: [EarningsRecord; 7] = [
    EarningsRecord {
        name: "F5 (FFIV)",
        revenue: 822.5,
        growth: 7.3,
        margin: 26.0,
        status: Status::Actual,
        date: "2026-01-27",
        explanation: "Software-first pivot successful; significant systems revenue surge (37%). Beat consensus by $56M.",
    },
    EarningsRecord {
        name: "Palo Alto (PANW)",
        revenue: 2470.0,
        growth: 13.8,
        margin: 13.5,
        status: Status::Consensus,
        date: "2026-02-12",
        explanation: "Guidance reflects initial CyberArk integration costs. NG Security ARR targeting $7B+ in FY26.",
    },
    EarningsRecord {
        name: "Cloudflare (NET)",
        revenue: 591.4,
        growth: 28.6,
        margin: -4.4,
        status: Status::Consensus,
        date: "2026-02-10",
        explanation: "High demand for Workers AI and agentic security. GAAP profitability remains the core focus.",
    },
    EarningsRecord {
        name: "CrowdStrike (CRWD)",
        revenue: 1100.0,
        growth: 25.1,
        margin: -7.0,
        status: Status::Consensus,
        date: "2026-03-03",
        explanation: "Consolidation on Falcon platform offset by \"Commitment Packages\" following 2024 outage.",
    },
    EarningsRecord {
        name: "Akamai (AKAM)",
        revenue: 1015.0,
        growth: 4.2,
        margin: 14.0,
        status: Status::Consensus,
        date: "2026-02-19",
        explanation: "Security & Compute now >70% of mix, offsetting 18% decline in legacy CDN delivery.",
    },
    EarningsRecord {
        name: "Okta (OKTA)",
        revenue: 682.0,
        growth: 13.0,
        margin: 1.2,
        status: Status::Consensus,
        date: "2026-03-02",
        explanation: "Competitive pressure from Microsoft Entra and PANW/CyberArk integration impacting net adds.",
    },
    EarningsRecord {
        name: "Yubico (YUBCF)",
        revenue: 56.5,
        growth: 16.8,
        margin: 14.5,
        status: Status::Consensus,
        date: "2026-02-11",
        explanation: "Phishing-resistant hardware mandate driving high-margin enterprise renewals.",
    },
];

/// All records, in their canonical order.
pub fn records() -> &'static [EarningsRecord] {
    &RECORDS
}

/// JSON array of every record, used as prompt context.
pub fn context_json() -> serde_json::Value {
    serde_json::Value::Array(RECORDS.iter().map(EarningsRecord::context_json).collect())
}

/// Resolve a company by 1-based position, ticker, or name prefix
/// (case-insensitive). Returns its index into [`records`].
pub fn find(query: &str) -> Option<usize> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    if let Ok(n) = query.parse::<usize>() {
        return (1..=RECORDS.len()).contains(&n).then(|| n - 1);
    }
    let lower = query.to_lowercase();
    RECORDS
        .iter()
        .position(|r| r.ticker().eq_ignore_ascii_case(query))
        .or_else(|| {
            RECORDS
                .iter()
                .position(|r| r.name.to_lowercase().starts_with(&lower))
        })
}

/// Records ordered by `key`. Numbers descend; name and date ascend.
pub fn sorted_by(key: SortKey) -> Vec<&'static EarningsRecord> {
    let mut rows: Vec<&'static EarningsRecord> = RECORDS.iter().collect();
    match key {
        SortKey::Name => rows.sort_by(|a, b| a.name.cmp(b.name)),
        SortKey::Date => rows.sort_by(|a, b| a.date.cmp(b.date)),
        SortKey::Revenue => rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue)),
        SortKey::Growth => rows.sort_by(|a, b| b.growth.total_cmp(&a.growth)),
        SortKey::Margin => rows.sort_by(|a, b| b.margin.total_cmp(&a.margin)),
        SortKey::Sum => rows.sort_by(|a, b| b.rule_of_40().total_cmp(&a.rule_of_40())),
    }
    rows
}
