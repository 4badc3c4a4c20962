use crate::models::{trim_text, LicenseRecord};

pub const TITLE: &str = "# Acknowledgments";

/// Two-line HTML comment carrying the copyright and SPDX identifier.
///
/// The year is a range (`2021-2024`) unless `current_year` equals `start_year`.
pub fn license_comment(holder: &str, start_year: i32, current_year: i32, spdx: &str) -> String {
    let year_range = if start_year == current_year {
        start_year.to_string()
    } else {
        format!("{}-{}", start_year, current_year)
    };

    [
        format!("<!-- Copyright {} {} -->", year_range, holder),
        format!("<!-- SPDX-License-Identifier: {} -->", spdx),
    ]
    .join("\n")
}

/// `## <name>`, a blank line, then the license text indented as a code block.
///
/// Every line is trimmed; non-blank lines get four spaces so Markdown keeps
/// the text literal, blank lines stay empty.
pub fn render_section(record: &LicenseRecord) -> String {
    let mut lines = vec![format!("## {}", record.name), String::new()];
    lines.extend(record.text.lines().map(|line| {
        let trimmed = trim_text(line);
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("    {}", trimmed)
        }
    }));
    lines.join("\n")
}

/// Assemble the unformatted document.
pub fn render_document(header: &str, product_name: &str, records: &[LicenseRecord]) -> String {
    let sections: Vec<String> = records.iter().map(render_section).collect();

    [
        header.to_string(),
        TITLE.to_string(),
        String::new(),
        format!(
            "{} makes use of the following open source projects.",
            product_name
        ),
        String::new(),
        sections.join("\n\n"),
    ]
    .join("\n")
}
