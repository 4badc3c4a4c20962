//! Markdown canonicalization driven by the project's Prettier configuration.
//!
//! Only the block structure the acknowledgments document uses is understood:
//! ATX headings, HTML comments, indented and fenced code, and paragraphs.
//! Lists, quotes and tables are passed through untouched.
//!
//! The rules applied:
//! - trailing whitespace is stripped from every line
//! - blocks are separated by exactly one blank line; adjacent HTML comment
//!   lines stay together
//! - blank lines inside code blocks are kept
//! - paragraphs are re-wrapped according to `proseWrap`
//! - the output ends with a single newline in the configured `endOfLine`

pub mod options;

pub use options::{resolve_options, FormatOptions, ProseWrap};

#[derive(Debug, PartialEq)]
enum Block<'a> {
    Heading(&'a str),
    Html(&'a [&'a str]),
    Code(&'a [&'a str]),
    Verbatim(&'a [&'a str]),
    Paragraph(&'a [&'a str]),
}

/// Format `text` as Markdown. Formatting an already formatted text is a no-op.
pub fn format_markdown(text: &str, options: &FormatOptions) -> String {
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    let blocks = parse_blocks(&lines);
    if blocks.is_empty() {
        return String::new();
    }

    let mut out = blocks
        .iter()
        .map(|block| render_block(block, options))
        .collect::<Vec<_>>()
        .join("\n\n");
    out.push('\n');

    match options.end_of_line.as_str() {
        "\n" => out,
        eol => out.replace('\n', eol),
    }
}

fn parse_blocks<'a>(lines: &'a [&'a str]) -> Vec<Block<'a>> {
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if line.is_empty() {
            i += 1;
        } else if is_heading(line) {
            blocks.push(Block::Heading(line));
            i += 1;
        } else if is_comment_start(line) {
            let start = i;
            loop {
                while i < lines.len() && !lines[i].contains("-->") {
                    i += 1;
                }
                i = (i + 1).min(lines.len());
                if i >= lines.len() || !is_comment_start(lines[i]) {
                    break;
                }
            }
            blocks.push(Block::Html(&lines[start..i]));
        } else if let Some(fence) = fence_marker(line) {
            let start = i;
            i += 1;
            while i < lines.len() && !lines[i].trim_start().starts_with(fence) {
                i += 1;
            }
            i = (i + 1).min(lines.len());
            blocks.push(Block::Verbatim(&lines[start..i]));
        } else if is_indented(line) {
            let start = i;
            while i < lines.len() && (lines[i].is_empty() || is_indented(lines[i])) {
                i += 1;
            }
            let mut end = i;
            while end > start && lines[end - 1].is_empty() {
                end -= 1;
            }
            blocks.push(Block::Code(&lines[start..end]));
        } else {
            let start = i;
            i += 1;
            while i < lines.len()
                && !lines[i].is_empty()
                && !is_heading(lines[i])
                && !is_comment_start(lines[i])
                && fence_marker(lines[i]).is_none()
            {
                i += 1;
            }
            let block = &lines[start..i];
            if is_structural(line) {
                blocks.push(Block::Verbatim(block));
            } else {
                blocks.push(Block::Paragraph(block));
            }
        }
    }

    blocks
}

fn render_block(block: &Block<'_>, options: &FormatOptions) -> String {
    match block {
        Block::Heading(line) => {
            let line = line.trim_start();
            let level = line.chars().take_while(|&c| c == '#').count();
            let title = line[level..].trim();
            if title.is_empty() {
                line[..level].to_string()
            } else {
                format!("{} {}", &line[..level], title)
            }
        }
        Block::Html(lines) | Block::Code(lines) | Block::Verbatim(lines) => lines.join("\n"),
        Block::Paragraph(lines) => render_paragraph(lines, options),
    }
}

fn render_paragraph(lines: &[&str], options: &FormatOptions) -> String {
    match options.prose_wrap {
        ProseWrap::Preserve => lines
            .iter()
            .map(|l| l.trim_start())
            .collect::<Vec<_>>()
            .join("\n"),
        ProseWrap::Never => words(lines).collect::<Vec<_>>().join(" "),
        ProseWrap::Always => {
            let mut wrapped: Vec<String> = Vec::new();
            let mut current = String::new();
            // Width in characters, not bytes.
            let mut width = 0;
            for word in words(lines) {
                let word_width = word.chars().count();
                if !current.is_empty() && width + 1 + word_width > options.print_width {
                    wrapped.push(std::mem::take(&mut current));
                    width = 0;
                }
                if !current.is_empty() {
                    current.push(' ');
                    width += 1;
                }
                current.push_str(word);
                width += word_width;
            }
            if !current.is_empty() {
                wrapped.push(current);
            }
            wrapped.join("\n")
        }
    }
}

fn words<'a>(lines: &'a [&'a str]) -> impl Iterator<Item = &'a str> + 'a {
    lines.iter().flat_map(|l| l.split_whitespace())
}

/// Strip up to three spaces of indentation; `None` if the line is indented code.
fn block_start(line: &str) -> Option<&str> {
    let spaces = line.len() - line.trim_start_matches(' ').len();
    if spaces > 3 || line.starts_with('\t') {
        None
    } else {
        Some(&line[spaces..])
    }
}

fn is_indented(line: &str) -> bool {
    !line.is_empty() && block_start(line).is_none()
}

fn is_heading(line: &str) -> bool {
    let Some(rest) = block_start(line) else {
        return false;
    };
    let level = rest.chars().take_while(|&c| c == '#').count();
    (1..=6).contains(&level)
        && rest[level..]
            .chars()
            .next()
            .map_or(true, char::is_whitespace)
}

fn is_comment_start(line: &str) -> bool {
    block_start(line).is_some_and(|rest| rest.starts_with("<!--"))
}

fn fence_marker(line: &str) -> Option<&'static str> {
    let rest = block_start(line)?;
    if rest.starts_with("```") {
        Some("```")
    } else if rest.starts_with("~~~") {
        Some("~~~")
    } else {
        None
    }
}

/// Lists, block quotes and tables: left exactly as written.
fn is_structural(line: &str) -> bool {
    let Some(rest) = block_start(line) else {
        return false;
    };
    if rest.starts_with("- ") || rest.starts_with("* ") || rest.starts_with("+ ") {
        return true;
    }
    if rest.starts_with('>') || rest.starts_with('|') {
        return true;
    }
    let digits = rest.chars().take_while(char::is_ascii_digit).count();
    digits > 0 && (rest[digits..].starts_with(". ") || rest[digits..].starts_with(") "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(text: &str) -> String {
        format_markdown(text, &FormatOptions::default())
    }

    fn with_wrap(prose_wrap: ProseWrap, print_width: usize) -> FormatOptions {
        FormatOptions {
            print_width,
            prose_wrap,
            ..FormatOptions::default()
        }
    }

    const RAW: &str = concat!(
        "<!-- Copyright 2021 de arco -->\n",
        "<!-- SPDX-License-Identifier: WTFPL -->\n",
        "# Acknowledgments\n",
        "\n",
        "de arco makes use of the following open source projects.\n",
        "\n",
        "## alpha\n",
        "\n",
        "    MIT License\n",
        "\n",
        "\n",
        "    Permission...\n",
        "\n",
        "## beta\n",
        "\n",
        "    License: ISC",
    );

    const FORMATTED: &str = concat!(
        "<!-- Copyright 2021 de arco -->\n",
        "<!-- SPDX-License-Identifier: WTFPL -->\n",
        "\n",
        "# Acknowledgments\n",
        "\n",
        "de arco makes use of the following open source projects.\n",
        "\n",
        "## alpha\n",
        "\n",
        "    MIT License\n",
        "\n",
        "\n",
        "    Permission...\n",
        "\n",
        "## beta\n",
        "\n",
        "    License: ISC\n",
    );

    #[test]
    fn test_acknowledgments_document() {
        assert_eq!(fmt(RAW), FORMATTED);
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(fmt(FORMATTED), FORMATTED);
        let wrapped = format_markdown(RAW, &with_wrap(ProseWrap::Always, 20));
        assert_eq!(
            format_markdown(&wrapped, &with_wrap(ProseWrap::Always, 20)),
            wrapped
        );
    }

    #[test]
    fn test_collapses_blank_lines_and_trailing_space() {
        assert_eq!(fmt("\n\n# Title   \n\n\n\ntext  \n\n\n"), "# Title\n\ntext\n");
    }

    #[test]
    fn test_heading_gets_separated_from_paragraph() {
        assert_eq!(fmt("intro\n## next\nbody"), "intro\n\n## next\n\nbody\n");
    }

    #[test]
    fn test_indented_lines_continue_a_paragraph() {
        assert_eq!(fmt("first\n    second"), "first\nsecond\n");
    }

    #[test]
    fn test_prose_wrap_always() {
        let out = format_markdown(
            "one two three four five six",
            &with_wrap(ProseWrap::Always, 10),
        );
        assert_eq!(out, "one two\nthree four\nfive six\n");
    }

    #[test]
    fn test_prose_wrap_counts_characters() {
        // Each word is 4 characters but 8 bytes.
        let out = format_markdown("éééé üüüü", &with_wrap(ProseWrap::Always, 9));
        assert_eq!(out, "éééé üüüü\n");
    }

    #[test]
    fn test_prose_wrap_never() {
        let out = format_markdown("one\ntwo\nthree", &with_wrap(ProseWrap::Never, 80));
        assert_eq!(out, "one two three\n");
    }

    #[test]
    fn test_code_is_never_wrapped() {
        let text = "    a very long line of license text that goes past the width";
        let out = format_markdown(text, &with_wrap(ProseWrap::Always, 10));
        assert_eq!(out, format!("{}\n", text));
    }

    #[test]
    fn test_lists_pass_through() {
        let text = "- one two three\n- four five six";
        let out = format_markdown(text, &with_wrap(ProseWrap::Never, 80));
        assert_eq!(out, format!("{}\n", text));
    }

    #[test]
    fn test_fenced_code_keeps_blank_lines() {
        let text = "```\na\n\n\nb\n```";
        assert_eq!(fmt(text), format!("{}\n", text));
    }

    #[test]
    fn test_crlf_output() {
        let options = FormatOptions {
            end_of_line: options::EndOfLine::Crlf,
            ..FormatOptions::default()
        };
        assert_eq!(
            format_markdown("# A\r\n\r\ntext\r\n", &options),
            "# A\r\n\r\ntext\r\n"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(fmt("\n\n  \n"), "");
    }
}
