use std::path::{Path, PathBuf};

use anyhow::{ensure, Context};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};
use yarrow_core::Confidence;

#[derive(Debug, Serialize)]
/// Actual run parameters - may include overrides or default values not set by user
pub struct Search {
    pub version: String,
    pub msf_paths: Vec<PathBuf>,
    pub min_confidence: Option<Confidence>,
    pub ratios: Option<RatioSettings>,
    pub output_paths: Vec<String>,

    #[serde(skip_serializing)]
    pub output_directory: PathBuf,
}

#[derive(Deserialize)]
/// Input run parameters deserialized from JSON file
pub struct Input {
    msf_directory: Option<String>,
    msf_paths: Option<Vec<String>>,
    output_directory: Option<String>,
    min_confidence: Option<String>,
    ratios: Option<RatioOptions>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RatioOptions {
    numerator: Option<Vec<String>>,
    denominator: Option<Vec<String>>,
}

/// Channel groups for per-row ratio statistics, named by the tags from the
/// store's quantification method.
#[derive(Clone, Debug, Serialize)]
pub struct RatioSettings {
    pub numerator: Vec<String>,
    pub denominator: Vec<String>,
}

impl From<RatioOptions> for RatioSettings {
    fn from(value: RatioOptions) -> RatioSettings {
        let settings = RatioSettings {
            numerator: value.numerator.unwrap_or_default(),
            denominator: value.denominator.unwrap_or_default(),
        };
        for name in &settings.numerator {
            if settings.denominator.contains(name) {
                log::warn!("channel `{}` appears in both ratio groups", name);
            }
        }
        settings
    }
}

impl Input {
    pub fn from_arguments(matches: ArgMatches) -> anyhow::Result<Self> {
        let path = matches
            .get_one::<String>("parameters")
            .expect("required parameters");
        let mut input = Input::load(path)
            .with_context(|| format!("Failed to read parameters from `{path}`"))?;

        // Handle JSON configuration overrides
        if let Some(output_directory) = matches.get_one::<String>("output_directory") {
            log::trace!("overriding `output_directory` parameter.");
            input.output_directory = Some(output_directory.into());
        }
        if let Some(msf_paths) = matches.get_many::<String>("msf_paths") {
            log::trace!("overriding `msf_paths` parameter.");
            input.msf_paths = Some(msf_paths.into_iter().map(|p| p.into()).collect());
        }

        ensure!(
            input.msf_paths.is_some(),
            "`msf_paths` must be set. For more information try '--help'"
        );

        Ok(input)
    }

    pub fn load<S: AsRef<str>>(path: S) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        serde_json::from_reader(file).map_err(anyhow::Error::from)
    }

    pub fn build(self) -> anyhow::Result<Search> {
        let msf_directory = self.msf_directory.map(PathBuf::from);
        let msf_paths = self
            .msf_paths
            .unwrap_or_default()
            .iter()
            .map(|entry| resolve_msf_path(msf_directory.as_deref(), entry))
            .collect::<Vec<_>>();
        ensure!(!msf_paths.is_empty(), "`msf_paths` must name at least one file");

        let min_confidence = match self.min_confidence {
            Some(raw) => {
                let level = raw
                    .parse::<Confidence>()
                    .map_err(anyhow::Error::from)
                    .context("`min_confidence` must be one of: low, medium, high")?;
                Some(level)
            }
            None => None,
        };

        let ratios = self.ratios.map(RatioSettings::from);
        if let Some(ratios) = &ratios {
            ensure!(
                !ratios.numerator.is_empty(),
                "`ratios.numerator` must name at least one channel"
            );
            ensure!(
                !ratios.denominator.is_empty(),
                "`ratios.denominator` must name at least one channel"
            );
        }

        let output_directory = match self.output_directory {
            Some(path) => {
                let path = PathBuf::from(path);
                std::fs::create_dir_all(&path)?;
                path
            }
            None => std::env::current_dir()?,
        };

        Ok(Search {
            version: clap::crate_version!().into(),
            msf_paths,
            min_confidence,
            ratios,
            output_paths: Vec::new(),
            output_directory,
        })
    }
}

/// Locate one configured store. Bare base names resolve against the search
/// directory and pick up the `.msf` extension; explicit paths pass through.
fn resolve_msf_path(msf_directory: Option<&Path>, entry: &str) -> PathBuf {
    let mut path = PathBuf::from(entry);
    let has_extension = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("msf"))
        .unwrap_or(false);
    if !has_extension {
        let mut raw = path.into_os_string();
        raw.push(".msf");
        path = PathBuf::from(raw);
    }
    match msf_directory {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path,
    }
}
