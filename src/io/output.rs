use anyhow::Context;
use crate::comparison::{ComplexityDiff, Regression, Severity, Trend};
use crate::core::Report;
use colored::*;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()>;
    fn write_diff(&mut self, diff: &ComplexityDiff) -> anyhow::Result<()>;
    /// Push buffered output to the sink. Must be called before the writer
    /// is dropped, since a buffered sink discards errors on drop.
    fn flush(&mut self) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, report)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_diff(&mut self, diff: &ComplexityDiff) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, diff)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush().context("Failed to flush JSON output")
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        writeln!(self.writer, "# Complexity Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Snapshot: `{}` ({})",
            report.snapshot.id,
            report.snapshot.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;

        let summary = &report.summary;
        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        self.write_row("Packages", &summary.total_packages.to_string())?;
        self.write_row("Functions", &summary.total_functions.to_string())?;
        self.write_row("Structs", &summary.total_structs.to_string())?;
        self.write_row("Interfaces", &summary.total_interfaces.to_string())?;
        self.write_row(
            "Average Cyclomatic",
            &format!("{:.1}", summary.average_cyclomatic),
        )?;
        self.write_row("Max Cyclomatic", &summary.max_cyclomatic.to_string())?;
        self.write_row(
            "Documentation Coverage",
            &format!("{:.0}%", summary.documentation_coverage * 100.0),
        )?;
        writeln!(self.writer)?;

        if report.functions.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "## Most Complex Functions")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| File:Line | Function | Cyclomatic | Cognitive | Nesting |"
        )?;
        writeln!(
            self.writer,
            "|-----------|----------|------------|-----------|---------|"
        )?;
        for func in top_functions(report, 10) {
            writeln!(
                self.writer,
                "| {}:{} | {} | {} | {} | {} |",
                func.file.display(),
                func.line,
                func.key(),
                func.complexity.cyclomatic,
                func.complexity.cognitive,
                func.complexity.nesting_depth
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_diff(&mut self, diff: &ComplexityDiff) -> anyhow::Result<()> {
        writeln!(self.writer, "# Complexity Diff")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Baseline `{}` → current `{}`",
            diff.baseline.id, diff.current.id
        )?;
        writeln!(self.writer)?;

        let summary = &diff.summary;
        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        self.write_row("Total Changes", &summary.total_changes.to_string())?;
        self.write_row("Regressions", &summary.regression_count.to_string())?;
        self.write_row("Improvements", &summary.improvement_count.to_string())?;
        self.write_row("Neutral", &summary.neutral_change_count.to_string())?;
        self.write_row("Critical Issues", &summary.critical_issues.to_string())?;
        self.write_row("Trend", trend_label(summary.overall_trend))?;
        self.write_row("Quality Score", &format!("{:.1}", summary.quality_score))?;
        writeln!(self.writer)?;

        if !diff.regressions.is_empty() {
            writeln!(self.writer, "## Regressions")?;
            writeln!(self.writer)?;
            writeln!(self.writer, "| Priority | Severity | Location | Change | Suggestion |")?;
            writeln!(self.writer, "|----------|----------|----------|--------|------------|")?;
            for regression in &diff.regressions {
                let change = &regression.change;
                writeln!(
                    self.writer,
                    "| {} | {} | {} | {} | {} |",
                    regression.priority,
                    change.severity.as_str(),
                    location(regression),
                    change.description,
                    change.suggestion
                )?;
            }
            writeln!(self.writer)?;
        }

        if !diff.improvements.is_empty() {
            writeln!(self.writer, "## Improvements")?;
            writeln!(self.writer)?;
            for improvement in &diff.improvements {
                writeln!(
                    self.writer,
                    "- {} ({})",
                    improvement.change.description, improvement.benefit
                )?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush().context("Failed to flush markdown output")
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_row(&mut self, metric: &str, value: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "| {metric} | {value} |")?;
        Ok(())
    }
}

/// Colored, table-based output for interactive use.
pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Complexity Report".bold().blue())?;
        writeln!(self.writer, "{}", "=================".blue())?;
        writeln!(self.writer)?;

        let summary = &report.summary;
        writeln!(self.writer, "{}:", "Summary".bold())?;
        writeln!(
            self.writer,
            "  Packages: {}  Functions: {}  Structs: {}  Interfaces: {}",
            summary.total_packages,
            summary.total_functions,
            summary.total_structs,
            summary.total_interfaces
        )?;
        writeln!(
            self.writer,
            "  Average cyclomatic: {}  Max: {}",
            complexity_color(summary.average_cyclomatic),
            summary.max_cyclomatic
        )?;
        writeln!(
            self.writer,
            "  Documentation coverage: {:.0}%",
            summary.documentation_coverage * 100.0
        )?;
        writeln!(self.writer)?;

        if report.functions.is_empty() {
            return Ok(());
        }

        let mut table = new_table();
        table.set_header(vec!["Location", "Function", "Cyclomatic", "Cognitive", "Nesting"]);
        for func in top_functions(report, 10) {
            table.add_row(vec![
                format!("{}:{}", func.file.display(), func.line),
                func.key(),
                func.complexity.cyclomatic.to_string(),
                func.complexity.cognitive.to_string(),
                func.complexity.nesting_depth.to_string(),
            ]);
        }
        writeln!(self.writer, "{}", "Most complex functions:".bold())?;
        writeln!(self.writer, "{table}")?;
        Ok(())
    }

    fn write_diff(&mut self, diff: &ComplexityDiff) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{} {} → {}",
            "Complexity Diff".bold().blue(),
            diff.baseline.id,
            diff.current.id
        )?;
        writeln!(self.writer)?;

        let summary = &diff.summary;
        let trend = match summary.overall_trend {
            Trend::Improving => "improving".green(),
            Trend::Degrading => "degrading".red(),
            Trend::Stable => "stable".normal(),
        };
        writeln!(
            self.writer,
            "  Changes: {}  Regressions: {}  Improvements: {}  Neutral: {}",
            summary.total_changes,
            summary.regression_count.to_string().red(),
            summary.improvement_count.to_string().green(),
            summary.neutral_change_count
        )?;
        writeln!(
            self.writer,
            "  Trend: {}  Quality score: {:.1}  Critical issues: {}",
            trend, summary.quality_score, summary.critical_issues
        )?;
        writeln!(self.writer)?;

        if !diff.regressions.is_empty() {
            let mut table = new_table();
            table.set_header(vec!["Priority", "Severity", "Location", "Change", "Suggestion"]);
            for regression in &diff.regressions {
                let change = &regression.change;
                table.add_row(vec![
                    regression.priority.to_string(),
                    change.severity.as_str().to_string(),
                    location(regression),
                    change.description.clone(),
                    change.suggestion.clone(),
                ]);
            }
            writeln!(self.writer, "{}", "Regressions:".bold().red())?;
            writeln!(self.writer, "{table}")?;
            writeln!(self.writer)?;
        }

        if !diff.improvements.is_empty() {
            writeln!(self.writer, "{}", "Improvements:".bold().green())?;
            for improvement in &diff.improvements {
                writeln!(
                    self.writer,
                    "  {} {} ({})",
                    "✓".green(),
                    improvement.change.description,
                    improvement.benefit
                )?;
            }
            writeln!(self.writer)?;
        }

        let (symbol, status) = if diff.has_critical_issues() {
            ("✗".red(), "FAIL".color(Severity::Critical.color()).bold())
        } else {
            ("✓".green(), "PASS".green().bold())
        };
        writeln!(self.writer, "{symbol} Status: {status}")?;
        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush().context("Failed to flush terminal output")
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn top_functions(report: &Report, limit: usize) -> Vec<&crate::core::FunctionMetrics> {
    let mut functions: Vec<_> = report.functions.iter().collect();
    functions.sort_by(|a, b| b.complexity.cyclomatic.cmp(&a.complexity.cyclomatic));
    functions.truncate(limit);
    functions
}

fn location(regression: &Regression) -> String {
    let change = &regression.change;
    if change.line == 0 {
        change.path.clone()
    } else {
        format!("{}:{}", change.file.display(), change.line)
    }
}

fn trend_label(trend: Trend) -> &'static str {
    match trend {
        Trend::Improving => "Improving",
        Trend::Degrading => "Degrading",
        Trend::Stable => "Stable",
    }
}

fn complexity_color(avg: f64) -> ColoredString {
    let text = format!("{avg:.1}");
    match avg {
        x if x < 5.0 => text.green(),
        x if x < 10.0 => text.yellow(),
        _ => text.red(),
    }
}

pub fn create_writer<'a>(format: OutputFormat, writer: Box<dyn Write + 'a>) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}
