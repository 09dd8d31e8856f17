//! Seed document validation.

use eualt_core::Language;
use serde::Serialize;

use crate::Session;

#[derive(Debug, Default, Serialize)]
struct CheckReport {
    malformed: Vec<String>,
    duplicates: Vec<String>,
    skipped_languages: Vec<String>,
    taxonomy: Vec<String>,
    missing_labels: Vec<String>,
}

impl CheckReport {
    fn is_clean(&self) -> bool {
        self.malformed.is_empty()
            && self.duplicates.is_empty()
            && self.skipped_languages.is_empty()
            && self.taxonomy.is_empty()
    }
}

fn build_report(session: &Session) -> anyhow::Result<CheckReport> {
    let catalog = &session.catalog;
    let load = catalog.report();

    let mut report = CheckReport {
        malformed: load.malformed.iter().map(ToString::to_string).collect(),
        duplicates: load.duplicates.clone(),
        skipped_languages: load.skipped_languages.clone(),
        taxonomy: catalog
            .check_taxonomy()
            .iter()
            .map(ToString::to_string)
            .collect(),
        missing_labels: Vec::new(),
    };

    for language in Language::ALL {
        if !catalog.languages().contains(&language) {
            report
                .taxonomy
                .push(format!("no catalog table for language {language}"));
            continue;
        }
        for entry in catalog.flattened(language)? {
            if session
                .translations
                .subcategory_label(language, entry.category, entry.subcategory)
                .is_none()
            {
                report.missing_labels.push(format!(
                    "{language}/{}/{}",
                    entry.category, entry.subcategory
                ));
            }
        }
    }

    Ok(report)
}

/// Validate the loaded documents and print what ingestion dropped.
///
/// Missing labels are reported but do not fail the check.
///
/// # Errors
///
/// Returns an error if malformed entries, duplicate keys, unsupported
/// languages or taxonomy gaps were found.
pub(crate) fn run_check(session: &Session) -> anyhow::Result<()> {
    let report = build_report(session)?;

    if session.json {
        crate::print_json(&report)?;
    } else {
        for (title, lines) in [
            ("malformed entries", &report.malformed),
            ("duplicate keys", &report.duplicates),
            ("unsupported languages", &report.skipped_languages),
            ("taxonomy gaps", &report.taxonomy),
            ("missing labels", &report.missing_labels),
        ] {
            if lines.is_empty() {
                continue;
            }
            println!("{title} ({}):", lines.len());
            for line in lines {
                println!("  {line}");
            }
        }
    }

    if report.is_clean() {
        if !session.json {
            println!("catalog ok");
        }
        Ok(())
    } else {
        anyhow::bail!("catalog check failed")
    }
}
