//! Project scaffolding for `spec-agent init`.

use include_dir::{include_dir, Dir, DirEntry};
use std::{
    fs::{create_dir_all, write},
    path::{Path, PathBuf},
};

use crate::{
    config::{config_path, SpecConfig, CHANGES_DIR, CONFIG_DIR},
    error::SpecError,
};

/// README, example specs and prompts, extracted into `.spec_agent/`.
static ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets");

/// What [`init_project`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    pub config_dir: PathBuf,
    /// Files written, in write order
    pub written: Vec<PathBuf>,
    /// True when an existing `config.yaml` was left untouched
    pub kept_config: bool,
}

/// Scaffold `.spec_agent/` and `spec_changes/` under `project_dir`.
///
/// An existing `config.yaml` is kept unless `force` is set. Bundled assets are always
/// rewritten.
pub fn init_project(project_dir: &Path, force: bool) -> Result<InitReport, SpecError> {
    let config_dir = project_dir.join(CONFIG_DIR);
    create_dir(&config_dir)?;
    create_dir(&project_dir.join(CHANGES_DIR))?;

    let mut report = InitReport {
        config_dir: config_dir.clone(),
        ..Default::default()
    };

    let config = config_path(project_dir);
    if config.exists() && !force {
        tracing::info!("Keeping existing {:?}", config);
        report.kept_config = true;
    } else {
        write_file(&config, SpecConfig::default_yaml().as_bytes())?;
        report.written.push(config);
    }

    extract(&ASSETS, &config_dir, &mut report.written)?;
    tracing::info!(
        "Initialized {:?} ({} files written)",
        config_dir,
        report.written.len()
    );
    Ok(report)
}

/// Paths of the bundled assets, relative to `.spec_agent/`.
pub fn asset_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    collect_files(&ASSETS, &mut paths);
    paths
}

fn collect_files(dir: &Dir<'_>, paths: &mut Vec<PathBuf>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::Dir(sub) => collect_files(sub, paths),
            DirEntry::File(file) => paths.push(file.path().to_path_buf()),
        }
    }
}

fn extract(dir: &Dir<'_>, dest: &Path, written: &mut Vec<PathBuf>) -> Result<(), SpecError> {
    for entry in dir.entries() {
        match entry {
            DirEntry::Dir(sub) => {
                create_dir(&dest.join(sub.path()))?;
                extract(sub, dest, written)?;
            }
            DirEntry::File(file) => {
                let target = dest.join(file.path());
                if let Some(parent) = target.parent() {
                    create_dir(parent)?;
                }
                write_file(&target, file.contents())?;
                written.push(target);
            }
        }
    }
    Ok(())
}

fn create_dir(path: &Path) -> Result<(), SpecError> {
    create_dir_all(path)
        .map_err(|e| SpecError::Io(format!("could not create {}: {e}", path.display())))
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), SpecError> {
    tracing::debug!("Writing {:?}", path);
    write(path, contents)
        .map_err(|e| SpecError::Io(format!("could not write {}: {e}", path.display())))
}
