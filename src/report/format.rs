//! Formatted terminal output.
//!
//! Kept apart from the pipeline so output changes stay local.

use crate::app::pipeline::PageReport;
use crate::chrome::ChromeBindings;

/// One line per dataset plus the calendar/modal wiring.
pub fn format_page_report(report: &PageReport) -> String {
    let mut out = String::new();

    if report.outcomes.is_empty() {
        out.push_str("No data containers found on the page.\n");
    } else {
        out.push_str(&format!("{:<10} {}\n", "dataset", "result"));
        out.push_str(&format!("{:-<10} {:-<30}\n", "", ""));
    }
    for outcome in &report.outcomes {
        let result = match &outcome.result {
            Ok(1) => "1 card".to_string(),
            Ok(n) => format!("{n} cards"),
            Err(err) => format!("FAILED ({err})"),
        };
        out.push_str(&format!("{:<10} {result}\n", outcome.dataset.name()));
    }

    if let Some(n) = report.calendar_events {
        out.push_str(&format!("calendar: {n} events\n"));
    }
    if report.news_modal_bound {
        out.push_str("news modal: bound\n");
    }
    let chrome = &report.chrome;
    if *chrome != ChromeBindings::default() {
        out.push_str(&format!(
            "chrome: {} counters, {} tooltips, {} popovers, {} forms, {} anchors, {} reveal{}{}{}\n",
            chrome.counters,
            chrome.tooltips,
            chrome.popovers,
            chrome.forms,
            chrome.anchors,
            chrome.reveal,
            if chrome.navbar { ", navbar" } else { "" },
            if chrome.back_to_top { ", back-to-top" } else { "" },
            if chrome.video { ", video" } else { "" },
        ));
    }
    if report.has_failures() {
        out.push_str("Every data container shows the loading error banner.\n");
    }

    out
}
