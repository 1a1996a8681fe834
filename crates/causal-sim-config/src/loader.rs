//! Configuration loader with multi-source merging

use crate::{Paths, SimConfig};
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader with builder pattern
pub struct ConfigLoader {
    project_dir: PathBuf,
    env_prefix: String,
    include_user_config: bool,
}

impl ConfigLoader {
    /// Create a new config loader with default project directory (current dir)
    pub fn new() -> Self {
        Self {
            project_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            env_prefix: "CSIM".to_string(),
            include_user_config: true,
        }
    }

    /// Set the project directory
    pub fn with_project_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.project_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the environment variable prefix (default: "CSIM")
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Skip ~/.config/causal-sim/config.toml
    pub fn without_user_config(mut self) -> Self {
        self.include_user_config = false;
        self
    }

    /// Load configuration from all sources with proper precedence
    pub fn load(self) -> Result<SimConfig> {
        let mut builder = config::Config::builder();

        // 1. Start with built-in defaults
        let defaults = SimConfig::default();
        builder = builder.add_source(config::Config::try_from(&defaults)?);

        // 2. User config (~/.config/causal-sim/config.toml)
        if self.include_user_config {
            let paths = Paths::new();
            if let Ok(user_config_file) = paths.user_config_file() {
                if user_config_file.exists() {
                    builder = builder.add_source(
                        config::File::from(user_config_file)
                            .required(false)
                            .format(config::FileFormat::Toml),
                    );
                }
            }
        }

        // 3. Project config (causal-sim.toml)
        let project_config_file = Paths::project_config_file(&self.project_dir);
        if project_config_file.exists() {
            builder = builder.add_source(
                config::File::from(project_config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // 4. Local config (causal-sim.local.toml, gitignored)
        let local_config_file = Paths::local_config_file(&self.project_dir);
        if local_config_file.exists() {
            builder = builder.add_source(
                config::File::from(local_config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // 5. Environment variables (CSIM_GENERATION__SEED=7)
        builder = builder.add_source(
            config::Environment::with_prefix(&self.env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // Build and deserialize
        let config = builder.build().context("Failed to build configuration")?;

        let sim_config: SimConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        sim_config
            .validate()
            .context("Configuration failed validation")?;

        Ok(sim_config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OutputFormat;
    use causal_sim::SweepKind;
    use std::fs;
    use tempfile::tempdir;

    fn loader(dir: &Path) -> ConfigLoader {
        ConfigLoader::new()
            .with_project_dir(dir)
            .with_env_prefix("CSIM_TEST_UNSET")
            .without_user_config()
    }

    #[test]
    fn test_load_defaults() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config = loader(temp_dir.path()).load().expect("Failed to load config");

        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn test_load_project_config() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let project_dir = temp_dir.path();

        // Write project config
        let config_content = r#"
[generation]
n = 250
treatment_effect = 3.5
seed = 7

[sweep]
kind = "selection"
seeds = 5

[output]
format = "json"
"#;
        fs::write(project_dir.join("causal-sim.toml"), config_content)
            .expect("Failed to write config");

        let config = loader(project_dir).load().expect("Failed to load config");

        assert_eq!(config.generation.n, 250);
        assert_eq!(config.generation.treatment_effect, 3.5);
        assert_eq!(config.generation.seed, Some(7));
        assert_eq!(config.generation.noise, 10.0);
        assert_eq!(config.sweep.kind, SweepKind::Selection);
        assert_eq!(config.sweep.seeds, 5);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_local_overrides() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let project_dir = temp_dir.path();

        // Write project config
        fs::write(
            project_dir.join("causal-sim.toml"),
            r"
[bias]
confounding_strength = 0.4
",
        )
        .expect("Failed to write project config");

        // Write local override
        fs::write(
            project_dir.join("causal-sim.local.toml"),
            r"
[bias]
confounding_strength = 0.9
",
        )
        .expect("Failed to write local config");

        let config = loader(project_dir).load().expect("Failed to load config");

        // Local config should override project config
        assert_eq!(config.bias.confounding_strength, 0.9);
        assert_eq!(
            config.bias.selection_strength,
            causal_sim::DEFAULT_SELECTION_STRENGTH
        );
    }

    #[test]
    fn test_invalid_project_config_is_rejected() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let project_dir = temp_dir.path();

        fs::write(
            project_dir.join("causal-sim.toml"),
            r"
[generation]
noise = -2.0
",
        )
        .expect("Failed to write config");

        assert!(loader(project_dir).load().is_err());
    }

    // Note: Environment variable testing is tricky in unit tests due to how the config
    // crate caches values and because tests share one process environment. Variables
    // work as expected in actual usage:
    //
    // CSIM_GENERATION__SEED=7
    // CSIM_BIAS__CONFOUNDING_STRENGTH=0.5
    // CSIM_OUTPUT__FORMAT=json
    //
    // The CLI integration tests exercise this path.
}
