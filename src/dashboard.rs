//! Plain-text renderings of the dataset and the analysis panel.
//!
//! Every function returns a `String`; callers decide where it goes.

use crate::consts::format_revenue;
use crate::dataset::{self, SortKey, Status};
use crate::session::{AnalysisSession, CallState};

/// Width of the longest scorecard bar, in cells.
const BAR_WIDTH: usize = 40;

/// The comprehensive matrix, ordered by `key`.
pub fn render_matrix(key: SortKey) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "  {:<20} {:<13} {:>9} {:>9} {:>8} {:>8}  {}\n",
        "Company", "Date", "Rev", "Growth", "EBIT", "R40", "Status"
    ));
    out.push_str(&format!("  {}\n", "─".repeat(82)));
    for r in dataset::sorted_by(key) {
        out.push_str(&format!(
            "  {:<20} {:<13} {:>9} {:>8.1}% {:>7.1}% {:>7.1}%  {}\n",
            r.name,
            r.display_date(),
            format_revenue(r.revenue),
            r.growth,
            r.margin,
            r.rule_of_40(),
            r.status.label(),
        ));
    }
    out
}

/// Rule of 40 scorecard: one bar per company, scaled to the best score.
/// Actual results use `█`, consensus estimates `░`.
pub fn render_scorecard() -> String {
    let rows = dataset::sorted_by(SortKey::Sum);
    let best = rows
        .iter()
        .map(|r| r.rule_of_40())
        .fold(0.0_f64, f64::max);

    let mut out = String::from("  Efficiency Scorecard (Rule of 40)\n\n");
    for r in rows {
        let cells = if best > 0.0 {
            ((r.rule_of_40().max(0.0) / best) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let glyph = match r.status {
            Status::Actual => "█",
            Status::Consensus => "░",
        };
        out.push_str(&format!(
            "  {:<20} {:<width$} {:>5.1}\n",
            r.name,
            glyph.repeat(cells),
            r.rule_of_40(),
            width = BAR_WIDTH,
        ));
    }
    out
}

/// Earnings calendar in report order.
pub fn render_calendar() -> String {
    let mut out = String::from("  Earnings Calendar\n\n");
    for r in dataset::sorted_by(SortKey::Date) {
        out.push_str(&format!(
            "  {:<13} {:<20} [{}]\n",
            r.display_date(),
            r.name,
            r.status.label()
        ));
    }
    out
}

/// Card for one company, or `None` for an unknown index.
pub fn render_company(index: usize) -> Option<String> {
    let r = dataset::records().get(index)?;
    Some(format!(
        "  {}\n  {} · {} · R40 {:.1}%\n\n  {}\n",
        r.name,
        r.display_date(),
        r.status.label(),
        r.rule_of_40(),
        r.explanation
    ))
}

/// The analysis panel. Empty while idle.
pub fn render_analysis(session: &AnalysisSession) -> String {
    let heading = session.heading().unwrap_or_default().to_uppercase();
    match session.state() {
        CallState::Idle => String::new(),
        CallState::InFlight => format!("  {heading}\n\n  (analysis in progress)\n"),
        CallState::Succeeded(text) => format!("  {heading}\n\n{text}\n"),
        CallState::Failed(failure) => format!("  {heading}\n\n  ✗ {}\n", failure.message),
    }
}
