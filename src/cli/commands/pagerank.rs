//! PageRank command - rank the pages of an HTML corpus

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;
use tracing::info;

use crate::{
    cli::{
        config::PagerankConfig,
        output::{print_section, print_subsection},
    },
    pagerank::{self, Ranks},
};

#[derive(Parser, Debug)]
#[command(about = "Rank the pages of an HTML corpus")]
pub struct PagerankArgs {
    /// Directory containing the .html pages
    pub corpus: PathBuf,

    /// JSON file with default settings (damping, samples, tolerance, seed)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Probability of following a link instead of jumping to a random page
    #[arg(long)]
    pub damping: Option<f64>,

    /// Random surfer steps for the sampling estimate
    #[arg(long)]
    pub samples: Option<usize>,

    /// Convergence threshold for the iterative estimate
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Random seed for reproducible sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

impl PagerankArgs {
    /// Settings from the config file (or defaults) with explicit flags on top
    pub fn resolve_config(&self) -> crate::Result<PagerankConfig> {
        let mut config = match &self.config {
            Some(path) => PagerankConfig::load(path)?,
            None => PagerankConfig::default(),
        };
        if let Some(damping) = self.damping {
            config.damping = damping;
        }
        if let Some(samples) = self.samples {
            config.samples = samples;
        }
        if let Some(tolerance) = self.tolerance {
            config.tolerance = tolerance;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Serialize)]
struct PagerankReport {
    samples: usize,
    sampled: Ranks,
    iterated: Ranks,
}

pub fn execute(args: PagerankArgs) -> Result<()> {
    let config = args.resolve_config()?;
    let corpus = pagerank::crawl(&args.corpus)
        .with_context(|| format!("failed to crawl {}", args.corpus.display()))?;
    info!(pages = corpus.len(), "corpus loaded");

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let sampled = pagerank::sample_pagerank(&corpus, config.damping, config.samples, &mut rng)?;
    let iterated = pagerank::iterate_pagerank(&corpus, config.damping, config.tolerance)?;

    if args.json {
        let report = PagerankReport {
            samples: config.samples,
            sampled,
            iterated,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_section(&format!("PageRank for {}", args.corpus.display()));
    print_subsection(&format!("Results from sampling (n = {})", config.samples));
    print_ranks(&sampled);
    print_subsection("Results from iteration");
    print_ranks(&iterated);
    Ok(())
}

fn print_ranks(ranks: &Ranks) {
    for (page, rank) in ranks {
        println!("  {page}: {rank:.4}");
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: PagerankArgs,
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"damping": 0.5, "samples": 100, "seed": 9}"#).unwrap();

        let harness = Harness::parse_from([
            "pagerank",
            "corpus",
            "--config",
            path.to_str().unwrap(),
            "--samples",
            "250",
        ]);
        let config = harness.args.resolve_config().unwrap();
        assert_eq!(config.damping, 0.5);
        assert_eq!(config.samples, 250);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.tolerance, pagerank::TOLERANCE);
    }

    #[test]
    fn test_invalid_flag_is_rejected() {
        let harness = Harness::parse_from(["pagerank", "corpus", "--damping", "1.2"]);
        assert!(harness.args.resolve_config().is_err());
    }
}
