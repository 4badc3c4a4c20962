//! The generation pipeline: list → resolve → assemble → format → write.
//!
//! Everything a run depends on comes in through [`Config`], the project root,
//! the [`Resolver`] (and its [`PackageFs`]) and the current year, so runs can
//! be reproduced against fixture trees.

use std::path::{Path, PathBuf};

use indicatif::ProgressBar;

use crate::analyzer::{list_dependencies, node::read_manifest};
use crate::config::Config;
use crate::error::Result;
use crate::format::{format_markdown, resolve_options};
use crate::license::fs::PackageFs;
use crate::license::Resolver;
use crate::models::LicenseRecord;
use crate::report::markdown::{license_comment, render_document};
use crate::writer::write_atomic;

/// A formatted document ready to be written.
#[derive(Debug)]
pub struct Acknowledgments {
    pub destination: PathBuf,
    pub records: Vec<LicenseRecord>,
    pub contents: String,
}

/// Build the formatted document for the project at `root` without writing it.
pub async fn build<F: PackageFs>(
    root: &Path,
    config: &Config,
    resolver: &Resolver<F>,
    current_year: i32,
    progress: Option<&ProgressBar>,
) -> Result<Acknowledgments> {
    let manifest = read_manifest(&root.join("package.json"))?;
    let names = list_dependencies(&manifest.dependencies, &config.skip);
    tracing::info!(dependencies = names.len(), "listed dependencies");

    if let Some(pb) = progress {
        pb.set_length(names.len() as u64);
    }
    let records = resolver.resolve_all(&names, progress).await?;
    tracing::info!(records = records.len(), "resolved licenses");

    let header = license_comment(
        &config.copyright_holder,
        config.copyright_start_year,
        current_year,
        &config.spdx_identifier,
    );
    let product_name = manifest
        .product_name
        .as_deref()
        .unwrap_or(&config.default_product_name);
    let unformatted = render_document(&header, product_name, &records);

    let destination = root.join(&config.output);
    let options = resolve_options(&destination)?;
    let contents = format_markdown(&unformatted, &options);

    Ok(Acknowledgments {
        destination,
        records,
        contents,
    })
}

/// Build the document and replace the destination file with it.
pub async fn generate<F: PackageFs>(
    root: &Path,
    config: &Config,
    resolver: &Resolver<F>,
    current_year: i32,
    progress: Option<&ProgressBar>,
) -> Result<Acknowledgments> {
    let acknowledgments = build(root, config, resolver, current_year, progress).await?;
    write_atomic(&acknowledgments.destination, &acknowledgments.contents)?;
    Ok(acknowledgments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AckError;
    use crate::license::LocalFs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(
            root,
            "package.json",
            r#"{ "dependencies": { "beta": "^2.0.0", "alpha": "^1.0.0" } }"#,
        );
        write(root, "node_modules/alpha/LICENSE", "MIT License\n\nPermission...\n");
        write(root, "node_modules/alpha/package.json", r#"{"license":"MIT"}"#);
        write(root, "node_modules/beta/index.js", "");
        write(root, "node_modules/beta/package.json", r#"{"license":"ISC"}"#);
        dir
    }

    async fn run(root: &Path, config: &Config, year: i32) -> Result<Acknowledgments> {
        let resolver = Resolver::from_config(LocalFs, root, config);
        generate(root, config, &resolver, year, None).await
    }

    #[tokio::test]
    async fn test_concrete_scenario() {
        let dir = fixture();
        let config = Config::default();
        let ack = run(dir.path(), &config, 2021).await.unwrap();

        let written = std::fs::read_to_string(dir.path().join("ACKNOWLEDGMENTS.md")).unwrap();
        assert_eq!(written, ack.contents);
        assert_eq!(
            written,
            "<!-- Copyright 2021 de arco -->\n\
             <!-- SPDX-License-Identifier: WTFPL -->\n\
             \n\
             # Acknowledgments\n\
             \n\
             de arco makes use of the following open source projects.\n\
             \n\
             ## alpha\n\
             \n\
             \x20   MIT License\n\
             \n\
             \x20   Permission...\n\
             \n\
             ## beta\n\
             \n\
             \x20   License: ISC\n"
        );
    }

    #[tokio::test]
    async fn test_rerun_is_byte_identical() {
        let dir = fixture();
        let config = Config::default();
        let first = run(dir.path(), &config, 2030).await.unwrap().contents;
        let second = run(dir.path(), &config, 2030).await.unwrap().contents;
        assert_eq!(first, second);
        assert!(first.starts_with("<!-- Copyright 2021-2030 de arco -->"));
    }

    #[tokio::test]
    async fn test_product_name_and_skip() {
        let dir = fixture();
        write(
            dir.path(),
            "package.json",
            r#"{ "productName": "Viewer", "dependencies": { "beta": "^2", "alpha": "^1" } }"#,
        );
        let mut config = Config::default();
        config.skip.insert("alpha".to_string());

        let ack = run(dir.path(), &config, 2021).await.unwrap();
        assert!(ack
            .contents
            .contains("Viewer makes use of the following open source projects."));
        assert!(!ack.contents.contains("## alpha"));
        assert_eq!(ack.records.len(), 1);
    }

    #[tokio::test]
    async fn test_failure_leaves_destination_untouched() {
        let dir = fixture();
        write(dir.path(), "node_modules/beta/package.json", r#"{"name":"beta"}"#);
        std::fs::write(dir.path().join("ACKNOWLEDGMENTS.md"), "previous\n").unwrap();

        let err = run(dir.path(), &Config::default(), 2021).await.unwrap_err();
        assert!(matches!(err, AckError::NotFound { ref name } if name == "beta"));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("ACKNOWLEDGMENTS.md")).unwrap(),
            "previous\n"
        );
    }

    #[tokio::test]
    async fn test_byte_order_mark_never_reaches_document() {
        let dir = fixture();
        write(dir.path(), "node_modules/alpha/LICENSE", "\u{feff}MIT License\n");
        let config = Config::default();
        let resolver = Resolver::from_config(LocalFs, dir.path(), &config);
        let ack = build(dir.path(), &config, &resolver, 2021, None).await.unwrap();
        assert!(ack.contents.contains("## alpha\n\n    MIT License\n"));
        assert!(!ack.contents.contains('\u{feff}'));
    }

    #[tokio::test]
    async fn test_build_does_not_write() {
        let dir = fixture();
        let config = Config::default();
        let resolver = Resolver::from_config(LocalFs, dir.path(), &config);
        let ack = build(dir.path(), &config, &resolver, 2021, None).await.unwrap();
        assert_eq!(ack.records.len(), 2);
        assert!(!dir.path().join("ACKNOWLEDGMENTS.md").exists());
    }

    #[tokio::test]
    async fn test_prose_wrap_from_project_config() {
        let dir = fixture();
        write(dir.path(), ".prettierrc", r#"{ "proseWrap": "always", "printWidth": 30 }"#);
        let ack = run(dir.path(), &Config::default(), 2021).await.unwrap();
        assert!(ack
            .contents
            .contains("de arco makes use of the\nfollowing open source\nprojects."));
    }
}
