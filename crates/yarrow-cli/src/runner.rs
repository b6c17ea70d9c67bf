use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use log::info;
use rayon::prelude::*;
use yarrow_core::{math, Dataset};
use yarrow_msf::read_msf;

use crate::input::Search;

pub struct Runner {
    pub parameters: Search,
    start: Instant,
}

impl Runner {
    pub fn new(parameters: Search) -> Self {
        Runner {
            parameters,
            start: Instant::now(),
        }
    }

    // Create a path for `file_name` in the specified output directory
    pub(crate) fn make_path<S: AsRef<str>>(&self, file_name: S) -> PathBuf {
        self.parameters.output_directory.join(file_name.as_ref())
    }

    fn file_label(path: &Path) -> String {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }

    /// Resolve the configured ratio channel names against one dataset's
    /// quantification method. `None` when ratios are not configured or the
    /// store carries no quantification.
    fn channel_groups(
        &self,
        label: &str,
        data: &Dataset,
    ) -> anyhow::Result<Option<(Vec<usize>, Vec<usize>)>> {
        let ratios = match &self.parameters.ratios {
            Some(ratios) => ratios,
            None => return Ok(None),
        };
        if data.channels.is_none() {
            log::warn!(
                "{}: ratios configured but the store carries no quantification",
                label
            );
            return Ok(None);
        }
        let resolve = |names: &[String]| {
            names
                .iter()
                .map(|name| {
                    data.channel_index(name).with_context(|| {
                        format!("channel `{name}` is not part of the quantification method")
                    })
                })
                .collect::<anyhow::Result<Vec<usize>>>()
        };
        Ok(Some((
            resolve(&ratios.numerator)?,
            resolve(&ratios.denominator)?,
        )))
    }

    pub fn run(mut self) -> anyhow::Result<()> {
        let paths = self.parameters.msf_paths.clone();
        let datasets = paths
            .par_iter()
            .map(|path| {
                read_msf(path).with_context(|| format!("failed to read `{}`", path.display()))
            })
            .collect::<anyhow::Result<Vec<Dataset>>>()?;

        for (path, mut data) in paths.iter().zip(datasets) {
            let label = Self::file_label(path);

            if let Some(level) = self.parameters.min_confidence {
                let before = data.len();
                data.psms.retain(|psm| psm.confidence >= level);
                info!(
                    "{}: {} of {} peptides at {} confidence or better",
                    label,
                    data.len(),
                    before,
                    level
                );
            } else {
                info!("{}: {} peptides", label, data.len());
            }

            if let Some(channels) = &data.channels {
                let measured = data
                    .channel_variability()
                    .into_iter()
                    .filter(|v| v.is_finite())
                    .collect::<Vec<_>>();
                info!(
                    "{}: {} channels, mean channel variability {:.4}",
                    label,
                    channels.len(),
                    math::mean(&measured)
                );
            }

            let comparisons = match self.channel_groups(&label, &data)? {
                Some((numerator, denominator)) => {
                    Some(data.compare_groups(&numerator, &denominator))
                }
                None => None,
            };

            let written = self.write_psms(&label, &data, comparisons.as_deref())?;
            self.parameters.output_paths.push(written);
        }

        let path = self.make_path("results.json");
        self.parameters.output_paths.push(path.display().to_string());
        println!("{}", serde_json::to_string_pretty(&self.parameters)?);

        std::fs::write(&path, serde_json::to_vec_pretty(&self.parameters)?)?;

        let run_time = (Instant::now() - self.start).as_secs();
        info!("finished in {}s", run_time);

        Ok(())
    }
}
