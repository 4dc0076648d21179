//! Source file discovery for `generate` and `check`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::Config;
use crate::errors::{tool_error, ErrorKind, StyleGenError};

/// Collects the source files under `roots`.
///
/// A root that is a file is taken as is. Directories are walked recursively
/// for files with the configured extension, skipping files this tool
/// generated. The result is sorted and free of duplicates.
pub fn discover_sources<P: AsRef<Path>>(
    roots: &[P],
    config: &Config,
) -> Result<Vec<PathBuf>, StyleGenError> {
    let mut files = Vec::new();

    for root in roots {
        let root = root.as_ref();
        if root.is_file() {
            files.push(root.to_path_buf());
            continue;
        }
        if !root.exists() {
            return Err(tool_error(ErrorKind::Io {
                path: root.display().to_string(),
                message: "no such file or directory".to_string(),
            }));
        }

        for entry in WalkDir::new(root) {
            let entry = entry.map_err(|e| {
                tool_error(ErrorKind::Io {
                    path: root.display().to_string(),
                    message: format!("failed to walk directory: {}", e),
                })
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !has_extension(path, &config.file_extension) || config.is_generated_file(path) {
                continue;
            }

            files.push(path.to_path_buf());
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Pairs every source with its output path.
///
/// Fails before anything is written when two sources would share one
/// output, which happens with `--out-dir` and equal file stems.
pub fn plan_outputs(
    sources: Vec<PathBuf>,
    config: &Config,
    out_dir: Option<&Path>,
) -> Result<Vec<(PathBuf, PathBuf)>, StyleGenError> {
    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
    let mut plan = Vec::with_capacity(sources.len());

    for source in sources {
        let target = config.output_path(&source, out_dir);
        if let Some(first) = claimed.get(&target) {
            return Err(tool_error(ErrorKind::Io {
                path: target.display().to_string(),
                message: format!(
                    "would be generated from both `{}` and `{}`",
                    first.display(),
                    source.display()
                ),
            }));
        }
        claimed.insert(target.clone(), source.clone());
        plan.push((source, target));
    }

    Ok(plan)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .map(|ext| ext == extension)
        .unwrap_or(false)
}
