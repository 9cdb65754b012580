//! A depth-indented, pluggable trace sink used by all engines.
//!
//! Per the Design Notes in spec.md §9, engines never branch on a textual trace mode
//! themselves. They only call [`Trace::enter`] with a recursion depth and a message;
//! the chosen [`TraceFormat`] decides how that is rendered. This also means a test can
//! assert on the number and depth of trace entries without parsing rendered text.
//!
//! The trace is assembled in memory and only rendered to a `String` once the run
//! finishes ([`Trace::finish`]), so a slow consumer of the final string never blocks
//! the engine (spec.md §5).
use crate::stats::Stats;

/// How [`Trace`] entries are rendered into the final string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceFormat {
    /// Indentation via literal spaces, one line per entry.
    Plain,
    /// `<div>` per entry with a `margin-left` proportional to depth, for embedding in a
    /// host page. HTML-escapes message text.
    Html,
    /// Indentation via spaces plus ANSI dimming on the indentation itself, for
    /// terminal consumers.
    Console,
}

/// A single recorded trace entry.
#[derive(Debug, Clone)]
struct Entry {
    depth: usize,
    message: String,
}

/// A depth-indented, pluggable message stream.
///
/// Construct with [`Trace::new`]; pass `enabled: false` to make [`Trace::enter`] a
/// no-op without requiring call sites to branch on whether tracing is wanted.
pub struct Trace {
    format: TraceFormat,
    enabled: bool,
    entries: Vec<Entry>,
    /// Run counters. Engines update this directly as they work; [`Trace::finish`]
    /// renders it as the closing statistics line (spec.md §6: "trace always ends with
    /// a one-line statistics record").
    pub stats: Stats,
}

impl Trace {
    /// Create a trace sink. When `enabled` is `false`, [`Trace::enter`] does nothing
    /// and [`Trace::finish`] only emits the statistics line.
    pub fn new(format: TraceFormat, enabled: bool) -> Trace {
        Trace {
            format,
            enabled,
            entries: Vec::new(),
            stats: Stats::default(),
        }
    }

    /// Whether this sink actually records entries.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record a message at the given recursion depth.
    ///
    /// `message` is only formatted when the sink is enabled.
    pub fn enter(&mut self, depth: usize, message: impl FnOnce() -> String) {
        if self.enabled {
            self.entries.push(Entry {
                depth,
                message: message(),
            });
        }
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether any entries were recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the trace, appending a closing statistics line built from [`Trace::stats`].
    pub fn finish(mut self) -> String {
        let stats_line = self.stats.to_string();
        self.entries.push(Entry {
            depth: 0,
            message: stats_line,
        });

        let mut out = String::new();
        for entry in &self.entries {
            render_line(&mut out, self.format, entry.depth, &entry.message);
        }
        out
    }
}

fn render_line(out: &mut String, format: TraceFormat, depth: usize, message: &str) {
    match format {
        TraceFormat::Plain => {
            for _ in 0..depth {
                out.push_str("  ");
            }
            out.push_str(message);
            out.push('\n');
        }
        TraceFormat::Html => {
            out.push_str(&format!("<div style=\"margin-left: {}em\">", depth * 2));
            out.push_str(&html_escape(message));
            out.push_str("</div>\n");
        }
        TraceFormat::Console => {
            if depth > 0 {
                out.push_str("\x1b[2m");
                for _ in 0..depth {
                    out.push_str("| ");
                }
                out.push_str("\x1b[0m");
            }
            out.push_str(message);
            out.push('\n');
        }
    }
}

fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_trace_only_emits_stats() {
        let mut trace = Trace::new(TraceFormat::Plain, false);
        trace.enter(0, || panic!("message should not be formatted when disabled"));
        let out = trace.finish();
        assert!(out.contains("selected=0"));
    }

    #[test]
    fn plain_indentation_tracks_depth() {
        let mut trace = Trace::new(TraceFormat::Plain, true);
        trace.enter(0, || "root".into());
        trace.enter(2, || "nested".into());
        let out = trace.finish();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "root");
        assert_eq!(lines[1], "    nested");
    }

    #[test]
    fn html_escapes_message() {
        let mut trace = Trace::new(TraceFormat::Html, true);
        trace.enter(0, || "a < b & c".into());
        let out = trace.finish();
        assert!(out.contains("a &lt; b &amp; c"));
    }
}
