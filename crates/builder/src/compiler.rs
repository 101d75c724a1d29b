//! The batch pipeline orchestrating all the steps.
//!
//! Parse every file, run the per-file scope pass sequentially against one
//! shared model, then resolve cross-file references once. A file that fails
//! to read or parse is warned about and contributes nothing beyond its
//! synthetic root occurrence; the run itself never aborts.

use crate::ast::Node;
use crate::config::Config;
use crate::parsing::{SourceParser, TreeSitterParser};
use crate::phases::{BuildInheritance, BuildScopes};
use model::Model;
use std::path::PathBuf;
use tracing::{debug, warn};
use walkdir::WalkDir;

pub struct Compiler {
    config: Config,
    parser: TreeSitterParser,
}

impl Compiler {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            parser: TreeSitterParser::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Builds the model for a set of files. Every file is parsed first;
    /// local passes then run in input order, and the global pass exactly
    /// once at the end.
    pub fn compile_files(&self, files: &[PathBuf]) -> Model {
        let mut model = Model::new();
        let trees: Vec<(String, Option<Node>)> = files
            .iter()
            .map(|file| {
                let tree = match self.parser.parse_file(file) {
                    Ok(tree) => Some(tree),
                    Err(err) => {
                        warn!("skipping `{}`: {err}", file.display());
                        None
                    }
                };
                (file.display().to_string(), tree)
            })
            .collect();
        for (file, tree) in &trees {
            debug!("building scopes for `{file}`");
            BuildScopes::run(&mut model, Some(file), tree.as_ref());
        }
        BuildInheritance::run(&mut model);
        model
    }

    /// Builds the model for one in-memory source with no file identity.
    pub fn compile_code(&self, code: &str) -> Model {
        let mut model = Model::new();
        let tree = match self.parser.parse_string(code) {
            Ok(tree) => Some(tree),
            Err(err) => {
                warn!("skipping source: {err}");
                None
            }
        };
        BuildScopes::run(&mut model, None, tree.as_ref());
        BuildInheritance::run(&mut model);
        model
    }

    /// Expands a mix of files and directories into the sorted, deduplicated
    /// list of Ruby files to compile. Missing paths warn and are skipped.
    pub fn list_files(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for path in paths {
            if !path.exists() {
                warn!("can't find `{}`", path.display());
                continue;
            }
            if path.is_dir() {
                for entry in WalkDir::new(path).into_iter().filter_map(|entry| entry.ok()) {
                    if entry.file_type().is_file()
                        && entry.path().extension().is_some_and(|ext| ext == "rb")
                    {
                        files.push(entry.into_path());
                    }
                }
            } else {
                files.push(path.clone());
            }
        }
        files.sort();
        files.dedup();
        files
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
