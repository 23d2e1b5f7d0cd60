use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    cli::{AppContext, InitArgs},
    core::{
        error::{CueError, CueResult},
        typicality::{Distance, Kernel},
    },
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// Default ignore patterns (in addition to .gitignore)
    pub ignore_patterns: Vec<String>,

    /// File extensions collected into a corpus
    pub extensions: Vec<String>,

    /// Analysis parameters
    pub analysis: AnalysisConfig,
}

/// Tunable policy constants of the analysis engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig
{
    /// Kernel bandwidth `h` for typicality
    pub bandwidth: f64,

    /// Similarity two terms must exceed to count as one concept
    pub merge_threshold: f64,

    /// Shortest term kept after normalization
    pub min_term_length: usize,

    /// Weight of one comment word (identifier words weigh 1.0)
    pub comment_weight: f64,

    /// Multiplier for dimensions matching a relevant term
    pub relevance_boost: f64,

    /// Weight a term needs to be reported as a concept
    pub min_concept_weight: f64,

    /// Density kernel
    pub kernel: Kernel,

    /// Distance between term vectors
    pub distance: Distance,
}

impl Default for AnalysisConfig
{
    fn default() -> Self
    {
        Self {
            bandwidth: 0.3,
            merge_threshold: 0.8,
            min_term_length: 3,
            comment_weight: 0.5,
            relevance_boost: 2.0,
            min_concept_weight: 1.0,
            kernel: Kernel::Gaussian,
            distance: Distance::Cosine,
        }
    }
}

impl AnalysisConfig
{
    /// Reject settings the engine cannot work with
    pub fn validate(&self) -> CueResult<()>
    {
        fn positive(
            name: &str,
            v: f64,
        ) -> CueResult<()>
        {
            if v.is_finite() && v > 0.0
            {
                Ok(())
            }
            else
            {
                Err(CueError::invalid(format!("{name} must be a positive number, got {v}")))
            }
        }

        positive("bandwidth", self.bandwidth)?;
        positive("comment_weight", self.comment_weight)?;
        positive("relevance_boost", self.relevance_boost)?;
        positive("min_concept_weight", self.min_concept_weight)?;

        if !(self.merge_threshold > 0.0 && self.merge_threshold <= 1.0)
        {
            return Err(CueError::invalid(format!(
                "merge_threshold must be within (0, 1], got {}",
                self.merge_threshold
            )));
        }

        if self.min_term_length == 0
        {
            return Err(CueError::invalid("min_term_length must be at least 1"));
        }

        Ok(())
    }
}

impl Default for Config
{
    fn default() -> Self
    {
        Self {
            ignore_patterns: vec![
                "target/**".to_string(),
                "node_modules/**".to_string(),
                "build/**".to_string(),
                ".git/**".to_string(),
                "__pycache__/**".to_string(),
            ],
            extensions: vec!["java".to_string()],
            analysis: AnalysisConfig::default(),
        }
    }
}

pub fn load_config() -> Result<Config>
{
    let mut builder = config::Config::builder();

    // Load from config files in priority order
    let config_paths = ["cue.toml", "cue.yaml", "cue.json", ".cue.toml"];

    for path in &config_paths
    {
        if Path::new(path).exists()
        {
            builder = builder.add_source(config::File::with_name(path));
            break;
        }
    }

    // Environment overrides, e.g. CUE__ANALYSIS__BANDWIDTH=0.5
    builder = builder.add_source(
        config::Environment::with_prefix("CUE")
            .prefix_separator("__")
            .separator("__"),
    );

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    parsed
        .analysis
        .validate()?;

    Ok(parsed)
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join("cue.toml");

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn defaults_are_valid()
    {
        assert!(
            AnalysisConfig::default()
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn rejects_nonsense()
    {
        let bad = AnalysisConfig { bandwidth: 0.0, ..Default::default() };
        assert!(matches!(bad.validate(), Err(CueError::InvalidArgument(_))));

        let bad = AnalysisConfig { merge_threshold: 1.5, ..Default::default() };
        assert!(bad.validate().is_err());

        let bad = AnalysisConfig { min_term_length: 0, ..Default::default() };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_defaults()
    {
        let cfg: Config = toml::from_str("[analysis]\nbandwidth = 0.7\nkernel = \"epanechnikov\"\n")
            .expect("parse");

        assert_eq!(cfg.analysis.bandwidth, 0.7);
        assert_eq!(cfg.analysis.kernel, Kernel::Epanechnikov);
        assert_eq!(cfg.analysis.merge_threshold, 0.8);
        assert_eq!(cfg.extensions, vec!["java".to_string()]);
    }

    #[test]
    fn default_config_round_trips_through_toml()
    {
        let text = toml::to_string_pretty(&Config::default()).expect("serialize");
        let back: Config = toml::from_str(&text).expect("parse");
        assert_eq!(back.analysis, AnalysisConfig::default());
    }

    #[test]
    fn init_writes_and_refuses_overwrite() -> Result<()>
    {
        let dir = tempfile::TempDir::new()?;
        let ctx = AppContext { quiet: true, no_color: true, verbose: false };

        init(InitArgs { path: dir.path().to_path_buf(), force: false }, &ctx)?;
        assert!(dir.path().join("cue.toml").exists());

        let again = init(InitArgs { path: dir.path().to_path_buf(), force: false }, &ctx);
        assert!(again.is_err());

        init(InitArgs { path: dir.path().to_path_buf(), force: true }, &ctx)?;
        Ok(())
    }
}
