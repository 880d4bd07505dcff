//! Simple Output and Reporting
//!
//! This module provides human-readable reporting for query matches and runs.

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::VerbosityLevel;
use crate::tree::{Document, NodeId};

/// What a run did, for the closing summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub node_count: usize,
    pub edits: usize,
    pub matches: usize,
    pub destination: Option<PathBuf>,
    pub duration: Duration,
}

/// Simple output formatter for human-readable results
pub struct Output {
    verbosity: VerbosityLevel,
    show_colors: bool,
}

impl Output {
    pub fn new(verbosity: VerbosityLevel) -> Self {
        Self {
            verbosity,
            show_colors: atty::is(atty::Stream::Stderr),
        }
    }

    pub fn with_colors(mut self, show_colors: bool) -> Self {
        self.show_colors = show_colors;
        self
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if self.show_colors {
            format!("\x1b[{}m{}\x1b[0m", color, text)
        } else {
            text.to_string()
        }
    }

    /// One line per match. Quiet mode prints only the count.
    pub fn format_query_results(&self, doc: &Document, query: &str, matches: &[NodeId]) -> String {
        let mut output = String::new();

        if self.verbosity == VerbosityLevel::Quiet {
            output.push_str(&format!("{}: {}\n", query, matches.len()));
            return output;
        }

        output.push_str(&format!(
            "{} {} ({} match{})\n",
            self.colorize("Query:", "36"),
            query,
            matches.len(),
            if matches.len() == 1 { "" } else { "es" }
        ));
        for &id in matches {
            output.push_str(&format!("  {}\n", self.format_match(doc, id)));
        }
        output
    }

    fn format_match(&self, doc: &Document, id: NodeId) -> String {
        let node = doc.node(id);
        let mut line = self.colorize(&format!("<{}>", node.tag()), "32");
        for attribute in node.attributes() {
            line.push(' ');
            line.push_str(&attribute.to_string());
        }
        if let Some(text) = node.text() {
            line.push_str(&format!(" {:?}", text));
        }
        if self.verbosity >= VerbosityLevel::Verbose {
            line.push_str(&format!(" [{}]", id));
        }
        line
    }

    pub fn format_summary(&self, summary: &RunSummary) -> String {
        let mut output = String::new();
        if self.verbosity == VerbosityLevel::Quiet {
            return output;
        }

        let destination = summary
            .destination
            .as_ref()
            .map_or_else(|| "stdout".to_string(), |path| path.display().to_string());
        output.push_str(&format!(
            "{} {} nodes written to {}",
            self.colorize("Done:", "32"),
            summary.node_count,
            destination
        ));
        if summary.edits > 0 {
            output.push_str(&format!(", {} edits", summary.edits));
        }
        if summary.matches > 0 {
            output.push_str(&format!(", {} query matches", summary.matches));
        }
        output.push_str(&format!(" ({})\n", format_duration(summary.duration)));
        output
    }
}

fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs_f64();
    if total_secs < 1.0 {
        format!("{:.0}ms", duration.as_millis())
    } else if total_secs < 60.0 {
        format!("{:.2}s", total_secs)
    } else {
        let mins = (total_secs / 60.0) as u64;
        let secs = total_secs % 60.0;
        format!("{}m{:.1}s", mins, secs)
    }
}
