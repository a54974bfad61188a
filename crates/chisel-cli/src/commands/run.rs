//! `chisel run <transform>` - apply one transform across a project.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use ignore::overrides::OverrideBuilder;
use miette::{IntoDiagnostic, Result, miette};
use owo_colors::OwoColorize;

use chisel_morph::SourceUnit;
use chisel_transforms::{
    CamelCaseIdentifiers, ErrorMessageContext, ErrorObjectToArgs, RelativeJsExtension,
    StripUnusedImport, TildeImports, Transform, UnrollIfChains, registry,
};

use crate::cli::RunArgs;
use crate::config::ProjectConfig;

pub fn run_execute(args: RunArgs) -> Result<()> {
    let mut config = ProjectConfig::load(args.config.as_deref()).into_diagnostic()?;
    if let Some(project_root) = args.project_root {
        config.project_root = project_root;
    }
    if !args.globs.is_empty() {
        config.files = args.globs.clone();
    }

    let transform = build_transform(&args.transform, &config).ok_or_else(|| {
        let known = registry()
            .iter()
            .map(|transform| transform.name())
            .collect::<Vec<_>>()
            .join(", ");
        miette!("unknown transform '{}'; available: {known}", args.transform)
    })?;

    let files = discover_files(&config.project_root, &config.files)?;
    tracing::info!(
        transform = transform.name(),
        root = %config.project_root.display(),
        files = files.len(),
        "starting run"
    );

    let mut changed = 0usize;
    for path in &files {
        let relative = path.strip_prefix(&config.project_root).unwrap_or(path);
        println!("\n• {}", relative.display());

        let mut unit = SourceUnit::read(path)?;
        let outcome = transform.apply(&mut unit)?;

        for note in &outcome.notes {
            for line in note.lines() {
                if let Some(rest) = line.strip_prefix("- ") {
                    println!("- {}", rest.red());
                } else if let Some(rest) = line.strip_prefix("+ ") {
                    println!("+ {}", rest.green());
                } else {
                    println!("{line}");
                }
            }
        }

        if outcome.modified {
            changed += 1;
            if args.dry_run {
                tracing::info!(path = %relative.display(), "would rewrite (dry run)");
            } else {
                unit.save()?;
            }
        }
    }

    println!(
        "\n{} file(s) scanned, {} changed{}",
        files.len(),
        changed,
        if args.dry_run { " (dry run)" } else { "" }
    );
    Ok(())
}

/// Resolve a transform name against the project configuration.
fn build_transform(name: &str, config: &ProjectConfig) -> Option<Box<dyn Transform>> {
    match name {
        "unroll-if-chains" => Some(Box::new(UnrollIfChains::new(config.chain.clone()))),
        "relative-js-extension" => Some(Box::new(RelativeJsExtension)),
        "tilde-imports" => Some(Box::new(TildeImports::new(
            config.project_root.join(&config.source_root),
        ))),
        "camel-case-identifiers" => Some(Box::new(CamelCaseIdentifiers)),
        "error-object-to-args" => Some(Box::new(ErrorObjectToArgs)),
        "error-message-context" => Some(Box::new(ErrorMessageContext)),
        "strip-unused-import" => Some(Box::new(StripUnusedImport::new(
            config.unused_import.clone(),
        ))),
        _ => None,
    }
}

/// Walk the project root collecting files matched by the configured globs.
fn discover_files(root: &Path, globs: &[String]) -> Result<Vec<PathBuf>> {
    let mut overrides = OverrideBuilder::new(root);
    for glob in globs {
        // Globs are written project-root-relative, "./"-prefixed or not.
        let glob = glob.strip_prefix("./").unwrap_or(glob);
        overrides.add(glob).into_diagnostic()?;
    }
    let overrides = overrides.build().into_diagnostic()?;

    let mut files = Vec::new();
    for entry in WalkBuilder::new(root).overrides(overrides).build() {
        let entry = entry.into_diagnostic()?;
        if entry.file_type().is_some_and(|kind| kind.is_file()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}
