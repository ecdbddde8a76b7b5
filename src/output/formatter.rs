//! Output formatters for ranking reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::{RankedEntry, RankingReport};
use crate::processing::record::Candidate;
use crate::processing::scorer::ScoreBreakdown;
use colored::{Color, Colorize};
use std::path::{Path, PathBuf};

/// Trait for formatting ranking reports
pub trait OutputFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String>;
}

/// Console formatter with colors and score badges
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for handing results to other systems
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown table formatter
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// CSV shortlist export
pub struct CsvFormatter;

/// Report generator that routes to the formatter for a format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    csv_formatter: CsvFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: f64) -> String {
        let (badge, color) = match score {
            s if s >= 85.0 => ("EXCELLENT", Color::Green),
            s if s >= 70.0 => ("STRONG", Color::BrightGreen),
            s if s >= 55.0 => ("MODERATE", Color::Yellow),
            s if s >= 40.0 => ("WEAK", Color::Red),
            _ => ("POOR", Color::BrightRed),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_entry(&self, entry: &RankedEntry) -> String {
        let candidate = &entry.candidate;
        let mut output = format!(
            "{:>3}. {} ({}) {:>6.2} {}\n",
            entry.rank,
            self.colorize(candidate.display_name(), Color::Cyan),
            candidate.id,
            entry.fit_score,
            self.format_score_badge(entry.fit_score)
        );
        output.push_str(&format!(
            "     Skills: {:.2} | Qualification: {} | Category: {}\n",
            entry.skill_score, candidate.qualification, candidate.category
        ));

        if self.detailed {
            if let Some(details) = &entry.details {
                output.push_str(&format!(
                    "     Qualification score: {:.2} | Category score: {:.0}\n",
                    details.qualification_score, details.category_score
                ));
                if !details.matched_skills.is_empty() {
                    output.push_str(&format!(
                        "     {} {}\n",
                        self.colorize("Matched:", Color::Green),
                        details.matched_skills.join(", ")
                    ));
                }
                if !details.partial_skills.is_empty() {
                    let partial: Vec<String> = details
                        .partial_skills
                        .iter()
                        .map(|p| format!("{} ~ {}", p.required, p.candidate))
                        .collect();
                    output.push_str(&format!(
                        "     {} {}\n",
                        self.colorize("Partial:", Color::Yellow),
                        partial.join(", ")
                    ));
                }
                if !details.missing_skills.is_empty() {
                    output.push_str(&format!(
                        "     {} {}\n",
                        self.colorize("Missing:", Color::Red),
                        details.missing_skills.join(", ")
                    ));
                }
            }
        }
        output
    }

    /// Single-candidate breakdown for the `score` command
    pub fn format_breakdown(&self, candidate: &Candidate, breakdown: &ScoreBreakdown) -> String {
        let mut output = String::new();
        output.push_str(&self.format_header(
            &format!("FIT SCORE: {} ({})", candidate.display_name(), candidate.id),
            1,
        ));
        output.push_str(&format!(
            "Fit score: {:.2} {}\n",
            breakdown.fit_score,
            self.format_score_badge(breakdown.fit_score)
        ));
        output.push_str(&self.format_header("Sub-scores", 2));
        output.push_str(&format!("Skill match:   {:>6.2} (weight 50%)\n", breakdown.skill_score));
        output.push_str(&format!(
            "Qualification: {:>6.2} (weight 30%)\n",
            breakdown.qualification_score
        ));
        output.push_str(&format!(
            "Category:      {:>6.2} (weight 20%)\n",
            breakdown.category_score
        ));

        output.push_str(&self.format_header("Skills", 3));
        let skills = &breakdown.skills;
        output.push_str(&format!("Exact:   {}\n", list_or_dash(&skills.exact)));
        let partial: Vec<String> = skills
            .partial
            .iter()
            .map(|p| format!("{} ~ {}", p.required, p.candidate))
            .collect();
        output.push_str(&format!("Partial: {}\n", list_or_dash(&partial)));
        output.push_str(&format!("Missing: {}\n", list_or_dash(&skills.missing)));
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::new();

        let title = if report.is_shortlist() {
            "SHORTLIST"
        } else {
            "CANDIDATE RANKING"
        };
        output.push_str(&self.format_header(
            &format!("{}: {}", title, report.requirement.title()),
            1,
        ));
        output.push_str(&format!(
            "Generated: {}\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        output.push_str(&self.format_header("Requirement", 2));
        output.push_str(&format!(
            "Required skills: {}\n",
            if report.requirement.required_skills.trim().is_empty() {
                "(none)"
            } else {
                report.requirement.required_skills.as_str()
            }
        ));
        output.push_str(&format!(
            "Minimum qualification: {}\n",
            report.requirement.min_qualification
        ));
        output.push_str(&format!(
            "Preferred category: {}\n",
            report.requirement.category_preference().unwrap_or("(no preference)")
        ));

        output.push_str(&self.format_header("Results", 2));
        if report.entries.is_empty() {
            output.push_str(&self.colorize("No candidates matched.\n", Color::Yellow));
        }
        for entry in &report.entries {
            output.push_str(&self.format_entry(entry));
        }

        output.push_str(&format!(
            "\n{} listed of {} scored",
            report.entries.len(),
            report.metadata.candidates_scored
        ));
        if let Some(policy) = &report.metadata.shortlist {
            output.push_str(&format!(" (skill score > {})", policy.min_skill_score));
        }
        output.push('\n');

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut md = String::new();

        let title = if report.is_shortlist() {
            "Shortlist"
        } else {
            "Candidate Ranking"
        };
        md.push_str(&format!("# {}: {}\n\n", title, report.requirement.title()));

        md.push_str(&format!(
            "- **Required skills:** {}\n",
            report.requirement.required_skills
        ));
        md.push_str(&format!(
            "- **Minimum qualification:** {}\n",
            report.requirement.min_qualification
        ));
        md.push_str(&format!(
            "- **Preferred category:** {}\n\n",
            report.requirement.category_preference().unwrap_or("no preference")
        ));

        md.push_str("| Rank | Candidate | Category | Qualification | Skill Score | Fit Score |\n");
        md.push_str("|---:|---|---|---:|---:|---:|\n");
        for entry in &report.entries {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {:.2} | {:.2} |\n",
                entry.rank,
                escape_markdown_cell(entry.candidate.display_name()),
                escape_markdown_cell(&entry.candidate.category),
                entry.candidate.qualification,
                entry.skill_score,
                entry.fit_score
            ));
        }

        if self.include_metadata {
            md.push_str(&format!(
                "\n---\n*Generated {} by candidate-ranker v{}. {} of {} candidates listed.*\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.ranker_version,
                report.entries.len(),
                report.metadata.candidates_scored
            ));
        }

        Ok(md)
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut csv = String::from("Name,Email,Phone,Category,Qualification,Skills,Fit Score\n");
        for entry in &report.entries {
            let c = &entry.candidate;
            let row = [
                escape_csv_field(c.display_name()),
                escape_csv_field(c.email.as_deref().unwrap_or("")),
                escape_csv_field(c.phone.as_deref().unwrap_or("")),
                escape_csv_field(&c.category),
                c.qualification.to_string(),
                escape_csv_field(&c.skills),
                format!("{:.2}", entry.fit_score),
            ];
            csv.push_str(&row.join(","));
            csv.push('\n');
        }
        Ok(csv)
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            csv_formatter: CsvFormatter,
        }
    }

    pub fn generate_report(&self, report: &RankingReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Csv => self.csv_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// Utility functions for saving reports
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

/// Resolves a `--save` target. A directory gets a file name derived from the
/// requirement and the output format.
pub fn resolve_save_path(target: &Path, format: &OutputFormat, requirement_name: &str) -> PathBuf {
    if target.is_dir() {
        target.join(suggest_filename(format, requirement_name))
    } else {
        target.to_path_buf()
    }
}

pub fn suggest_filename(format: &OutputFormat, requirement_name: &str) -> String {
    let base_name: String = requirement_name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    match format {
        OutputFormat::Console => format!("{}_ranking.txt", base_name),
        OutputFormat::Json => format!("{}_ranking.json", base_name),
        OutputFormat::Markdown => format!("{}_ranking.md", base_name),
        OutputFormat::Csv => format!("{}_shortlist.csv", base_name),
    }
}

fn list_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

fn escape_csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn escape_markdown_cell(cell: &str) -> String {
    cell.replace('|', "\\|")
}
