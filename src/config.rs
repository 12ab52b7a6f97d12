use std::{env, path::PathBuf};

use color_eyre::{Result, eyre::Context};
use directories::ProjectDirs;
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Where logs (and nothing else) end up
    #[serde(default)]
    pub data_dir: PathBuf,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GalleryConfig {
    /// Suggestion list offered by both lookup widgets
    #[serde(default = "default_candidates")]
    pub candidates: Vec<String>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            candidates: default_candidates(),
        }
    }
}

fn default_candidates() -> Vec<String> {
    [
        "React Native",
        "React",
        "Redux",
        "TypeScript",
        "JavaScript",
        "Node.js",
        "Express",
        "MongoDB",
        "SQL",
        "GraphQL",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub gallery: GalleryConfig,
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
}

impl Config {
    pub fn new(cli_source: Option<crate::cli::ClapSource>) -> Result<Self> {
        let data_dir = get_data_dir();
        let mut builder = config::Config::builder()
            .set_default("data_dir", data_dir.to_str().unwrap())?
            .set_default("gallery.candidates", default_candidates())?;

        // Add CLI source last (highest priority)
        if let Some(cli_source) = cli_source {
            builder = builder.add_source(cli_source);
        }

        let cfg: Self = builder
            .build()
            .context("Error building config")?
            .try_deserialize()
            .context("Error deserialize config")?;

        Ok(cfg)
    }
}

pub fn get_data_dir() -> PathBuf {
    if let Some(s) = env::var(format!("{}_DATA", PROJECT_NAME.clone()))
        .ok()
        .map(PathBuf::from)
    {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "yy4382", env!("CARGO_PKG_NAME"))
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tempfile::tempdir_in;

    use crate::cli::{ClapSource, Cli};

    use super::*;

    #[test]
    fn data_dir_from_env() {
        let temp_data = tempdir_in(".").unwrap();

        temp_env::with_vars(
            [(
                format!("{}_DATA", PROJECT_NAME.clone()).as_str(),
                Some(temp_data.path().to_str().unwrap()),
            )],
            || {
                let config = Config::new(None).unwrap();
                assert_eq!(config.config.data_dir, temp_data.path());
            },
        );
    }

    #[test]
    fn data_dir_from_cli() {
        let args = Cli::parse_from(["test-config", "--data-dir", ".cli-data"]);
        let config = Config::new(Some(ClapSource::new(&args))).expect("Failed to load config");

        assert_eq!(config.config.data_dir, PathBuf::from(".cli-data"));
    }

    #[test]
    fn default_candidates_are_offered() {
        let config = Config::new(None).unwrap();
        assert!(!config.gallery.candidates.is_empty());
        assert!(
            config
                .gallery
                .candidates
                .contains(&"React Native".to_string())
        );
    }
}
