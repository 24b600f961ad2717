use std::fs;
use std::path::Path;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use openingbook::OpeningBook;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::OutputFormat;

#[derive(Debug, Serialize)]
pub struct TeraInfo {
    pub generated_at: String,
    pub white: Vec<String>,
    pub black: Vec<String>,
}

// The JavaScript book module as a static template.
static TEMPLATE: &str = r#"// Master Opening Book - Generated from Lichess Database
// Generated by opening-book-builder at {{ generated_at }}
// {{ white | length }} white lines, {{ black | length }} black lines

const MASTER_OPENING_BOOK = {
    white: [
{%- for line in white %}
        "{{ line }}",
{%- endfor %}
    ],
    black: [
{%- for line in black %}
        "{{ line }}",
{%- endfor %}
    ]
};
"#;

pub fn render_js(info: &TeraInfo) -> anyhow::Result<String> {
    let mut tera = Tera::default();
    tera.add_raw_template("js_template", TEMPLATE)
        .context("Failed to add template")?;

    let mut context = Context::new();
    context.insert("generated_at", &info.generated_at);
    context.insert("white", &info.white);
    context.insert("black", &info.black);

    tera.render("js_template", &context)
        .context("Template rendering failed")
}

pub fn render_book(
    book: &OpeningBook,
    format: OutputFormat,
    generated_at: DateTime<Utc>,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(book.write()?),
        OutputFormat::Js => {
            let info = TeraInfo {
                generated_at: generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
                white: book.white.iter().map(|line| escape(line)).collect(),
                black: book.black.iter().map(|line| escape(line)).collect(),
            };
            render_js(&info)
        }
    }
}

pub fn write_book(path: &Path, content: &str) -> anyhow::Result<()> {
    fs::write(path, content)
        .with_context(|| format!("Could not write opening book to {}", path.display()))
}

fn escape(line: &str) -> String {
    // Replace \ with \\, " with \" and newline with \n.
    line.replace('\\', r"\\")
        .replace('"', r#"\""#)
        .replace('\n', r"\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn book() -> OpeningBook {
        OpeningBook {
            white: vec!["e4 e5 Nf3".to_string(), "d4 d5 c4".to_string()],
            black: vec!["e4 e5".to_string()],
        }
    }

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2016, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn renders_javascript_module() {
        let js = render_book(&book(), OutputFormat::Js, timestamp()).unwrap();

        assert!(js.starts_with("// Master Opening Book"));
        assert!(js.contains("at 2016-03-01 12:00:00 UTC"));
        assert!(js.contains("// 2 white lines, 1 black lines"));
        assert!(js.contains(
            "    white: [\n        \"e4 e5 Nf3\",\n        \"d4 d5 c4\",\n    ],\n"
        ));
        assert!(js.contains("    black: [\n        \"e4 e5\",\n    ]\n};"));
    }

    #[test]
    fn renders_empty_book() {
        let js = render_book(&OpeningBook::default(), OutputFormat::Js, timestamp()).unwrap();
        assert!(js.contains("    white: [\n    ],\n    black: [\n    ]\n};"));
    }

    #[test]
    fn json_can_be_read_back() {
        let json = render_book(&book(), OutputFormat::Json, timestamp()).unwrap();
        assert_eq!(OpeningBook::parse(&json).unwrap(), book());
    }

    #[test]
    fn quotes_are_escaped() {
        let odd = OpeningBook {
            white: vec![r#"e4 "e5"\"#.to_string()],
            black: vec![],
        };
        let js = render_book(&odd, OutputFormat::Js, timestamp()).unwrap();
        assert!(js.contains(r#""e4 \"e5\"\\","#));
    }
}
