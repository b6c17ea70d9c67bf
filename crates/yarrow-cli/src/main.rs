use anyhow::Context;
use clap::{value_parser, Arg, Command, ValueHint};
use rayon::ThreadPoolBuilder;
use yarrow_cli::input::Input;
use yarrow_cli::Runner;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::default()
        .filter_level(log::LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or(
            "YARROW_LOG",
            "error,yarrow_core=info,yarrow_msf=info,yarrow_cli=info",
        ))
        .init();

    let matches = Command::new("yarrow")
        .version(clap::crate_version!())
        .about("Export Proteome Discoverer .msf search results to peptide tables")
        .arg(
            Arg::new("parameters")
                .required(true)
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .help("Path to configuration parameters (JSON file)")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("msf_paths")
                .num_args(1..)
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .help(
                    "Paths to .msf files to read. Overrides msf files listed in the \
                     configuration file.",
                )
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("output_directory")
                .short('o')
                .long("output_directory")
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .help(
                    "Path where peptide tables and the run manifest will be written. \
                     Overrides the directory specified in the configuration file.",
                )
                .value_hint(ValueHint::DirPath),
        )
        .arg(
            Arg::new("batch-size")
                .long("batch-size")
                .value_parser(value_parser!(u16).range(1..))
                .help("Number of files to read in parallel (default = # of CPUs/2)")
                .value_hint(ValueHint::Other),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    let parallel = matches
        .get_one::<u16>("batch-size")
        .copied()
        .unwrap_or_else(|| num_cpus::get() as u16 / 2) as usize;

    ThreadPoolBuilder::new()
        .num_threads(parallel)
        .build_global()
        .context("failed to build the thread pool")?;

    let input = Input::from_arguments(matches)?;
    let runner = Runner::new(input.build()?);
    runner.run()?;

    Ok(())
}
