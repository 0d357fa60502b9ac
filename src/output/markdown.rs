//! Markdown summary generation
//!
//! This module renders a scrape run as a human-readable markdown document:
//! run metadata, the lectures of each category and their session plans.

use crate::output::traits::{OutputResult, SyllabusSummary};
use crate::syllabus::LectureDetail;
use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the markdown rendering of `summary` to `output_path`
pub fn generate_markdown_summary(summary: &SyllabusSummary, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(summary);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a syllabus summary as markdown
pub fn format_markdown_summary(summary: &SyllabusSummary) -> String {
    let mut md = String::new();

    md.push_str("# NAIST Syllabus\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Run ID**: {}\n", summary.run_id));
    md.push_str(&format!("- **Source**: {}\n", summary.listing_url));
    md.push_str(&format!("- **Started**: {}\n", summary.started_at));
    if let Some(finished) = &summary.finished_at {
        md.push_str(&format!("- **Finished**: {}\n", finished));
    }
    md.push_str(&format!("- **Status**: {}\n", summary.status));
    md.push_str(&format!("- **Config Hash**: {}\n", summary.config_hash));
    md.push_str(&format!("- **Lectures**: {}\n", summary.total_lectures()));
    md.push_str(&format!("- **Sessions**: {}\n\n", summary.total_sessions()));

    for (category, lectures) in &summary.lectures {
        md.push_str(&format!(
            "## {} ({})\n\n",
            category.title(),
            lectures.len()
        ));

        if lectures.is_empty() {
            md.push_str("_No lectures listed._\n\n");
            continue;
        }

        for lecture in lectures {
            md.push_str(&format!("### [{}]({})\n\n", lecture.name, lecture.url));

            match summary.details.get(&lecture.name) {
                Some(sessions) if !sessions.is_empty() => push_session_table(&mut md, sessions),
                Some(_) => md.push_str("_No sessions listed._\n\n"),
                None => md.push_str("_Session plan not scraped._\n\n"),
            }
        }
    }

    // Sessions scraped for lectures that the listing does not name
    let listed: HashSet<&str> = summary
        .lectures
        .values()
        .flatten()
        .map(|lecture| lecture.name.as_str())
        .collect();
    let mut unlisted: Vec<(&String, &Vec<LectureDetail>)> = summary
        .details
        .iter()
        .filter(|(name, _)| !listed.contains(name.as_str()))
        .collect();
    unlisted.sort_by(|a, b| a.0.cmp(b.0));

    if !unlisted.is_empty() {
        md.push_str(&format!("## Other Lectures ({})\n\n", unlisted.len()));
        for (name, sessions) in unlisted {
            md.push_str(&format!("### {}\n\n", name));
            if sessions.is_empty() {
                md.push_str("_No sessions listed._\n\n");
            } else {
                push_session_table(&mut md, sessions);
            }
        }
    }

    md
}

fn push_session_table(md: &mut String, sessions: &[LectureDetail]) {
    md.push_str("| # | Date | Theme | Content |\n");
    md.push_str("|---|------|-------|---------|\n");
    for session in sessions {
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            session.number,
            escape_cell(&session.date),
            escape_cell(&session.theme),
            escape_cell(&session.content)
        ));
    }
    md.push('\n');
}

/// Makes text safe to place in a markdown table cell
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', "<br>")
}
