//! Text rendering of tick and summary statistics.

use crate::aggregator::{Summary, TickReport};
use std::io::{self, Write};
use std::time::Duration;

/// Column header above tick lines.
pub const TICK_HEADER: &str =
    "_time______ops/s(inst)__ops/s(cum)__p50(ms)__p95(ms)__p99(ms)_pMax(ms)";

/// Column header above the final summary.
pub const SUMMARY_HEADER: &str =
    "_elapsed___________ops_____ops/s(cum)__avg(ms)__p50(ms)__p95(ms)__p99(ms)__pMax(ms)";

/// Name printed on the ns/op line.
pub const BENCH_NAME: &str = "storebench";

/// Writes reports to any output, repeating the header periodically.
pub struct Reporter<W: Write> {
    out: W,
    lines: usize,
    header_every: usize,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, header_every: usize) -> Self {
        Self {
            out,
            lines: 0,
            header_every: header_every.max(1),
        }
    }

    /// Tick lines written so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn write_tick(&mut self, report: &TickReport) -> io::Result<()> {
        if self.lines % self.header_every == 0 {
            writeln!(self.out, "{TICK_HEADER}")?;
        }
        self.lines += 1;
        writeln!(self.out, "{}", format_tick(report))?;
        self.out.flush()
    }

    pub fn write_summary(&mut self, summary: &Summary) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{SUMMARY_HEADER}")?;
        writeln!(self.out, "{}", format_summary(summary))?;
        writeln!(self.out)?;
        writeln!(self.out, "{BENCH_NAME}\t{:12.1} ns/op", summary.ns_per_op)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// One tick line, time rounded to whole seconds.
pub fn format_tick(r: &TickReport) -> String {
    format!(
        "{:>5} {:12.1} {:11.1} {:8.1} {:8.1} {:8.1} {:8.1}",
        whole_seconds(r.elapsed),
        r.ops_per_sec,
        r.cumulative_ops_per_sec,
        r.p50_ms,
        r.p95_ms,
        r.p99_ms,
        r.max_ms,
    )
}

pub fn format_summary(s: &Summary) -> String {
    format!(
        "{:7.1}s {:11} {:15.1} {:8.1} {:8.1} {:8.1} {:8.1} {:8.1}",
        s.elapsed.as_secs_f64(),
        s.total_ops,
        s.ops_per_sec,
        s.mean_ms,
        s.p50_ms,
        s.p95_ms,
        s.p99_ms,
        s.max_ms,
    )
}

/// `3s`, `1m5s`, `2h0m7s`.
fn whole_seconds(d: Duration) -> String {
    let total = d.as_secs_f64().round() as u64;
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{h}h{m}m{s}s")
    } else if m > 0 {
        format!("{m}m{s}s")
    } else {
        format!("{s}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(secs: f64) -> TickReport {
        TickReport {
            elapsed: Duration::from_secs_f64(secs),
            ops: 1200,
            ops_per_sec: 1200.0,
            cumulative_ops_per_sec: 1100.3,
            p50_ms: 0.4,
            p95_ms: 1.26,
            p99_ms: 3.0,
            max_ms: 12.76,
        }
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(
            format_tick(&tick(2.6)),
            "   3s       1200.0      1100.3      0.4      1.3      3.0     12.8"
        );
    }

    #[test]
    fn test_whole_seconds() {
        assert_eq!(whole_seconds(Duration::from_millis(400)), "0s");
        assert_eq!(whole_seconds(Duration::from_millis(59_600)), "1m0s");
        assert_eq!(whole_seconds(Duration::from_secs(65)), "1m5s");
        assert_eq!(whole_seconds(Duration::from_secs(7207)), "2h0m7s");
    }

    #[test]
    fn test_header_repeats() {
        let mut reporter = Reporter::new(Vec::new(), 20);
        for i in 1..=45 {
            reporter.write_tick(&tick(i as f64)).unwrap();
        }
        assert_eq!(reporter.lines(), 45);

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        let headers: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, l)| **l == TICK_HEADER)
            .map(|(i, _)| i)
            .collect();
        // before ticks 1, 21 and 41
        assert_eq!(headers, vec![0, 21, 42]);
        assert_eq!(lines.len(), 48);
    }

    #[test]
    fn test_write_summary() {
        let summary = Summary {
            elapsed: Duration::from_millis(2_040),
            total_ops: 4000,
            samples: 4000,
            ops_per_sec: 1951.2,
            ns_per_op: 512_500.0,
            mean_ms: 0.5,
            p50_ms: 0.4,
            p95_ms: 1.0,
            p99_ms: 2.0,
            max_ms: 9.0,
        };
        let mut reporter = Reporter::new(Vec::new(), 20);
        reporter.write_summary(&summary).unwrap();

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], SUMMARY_HEADER);
        assert_eq!(
            lines[2],
            "    2.0s        4000          1951.2      0.5      0.4      1.0      2.0      9.0"
        );
        assert_eq!(lines[4], "storebench\t    512500.0 ns/op");
    }
}
