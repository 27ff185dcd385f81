//! Queueing process simulation application.
#![warn(
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::default_trait_access)]

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use eyre::WrapErr;

use qsim::{Job, SampleConfig, ServiceModel, SimulationConfig, Timeline};

/// Output format of the timeline.
#[derive(Debug, Clone, Copy, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
enum Format {
    Csv,
    Json,
    MsgPack,
}

/// Runs a queueing process simulation and writes the event timeline.
#[derive(Parser)]
#[clap(version, author)]
struct Opt {
    /// Number of jobs to simulate.
    #[clap(short, long)]
    num_jobs: usize,

    /// Service regime: single_server or no_wait.
    #[clap(short, long, default_value = "single_server")]
    model: ServiceModel,

    /// Seed to use for random number generator.
    #[clap(short, long)]
    seed: Option<u64>,

    /// Expected number of arrivals per unit of time.
    #[clap(long, default_value = "1.0")]
    arrival_rate: f64,

    /// Alpha shape parameter of the Beta service distribution.
    #[clap(long, default_value = "2.0")]
    service_alpha: f64,

    /// Beta shape parameter of the Beta service distribution.
    #[clap(long, default_value = "5.0")]
    service_beta: f64,

    /// Factor scaling Beta service draws to durations.
    #[clap(long, default_value = "3.5")]
    service_scale: f64,

    /// Recompute the service scale so the mean service duration matches the
    /// mean inter-arrival duration under the configured arrival rate.
    #[clap(long)]
    balanced: bool,

    /// Output format: csv, json, or msgpack.
    #[clap(short, long, default_value = "csv")]
    format: Format,

    /// Write the timeline to this file instead of the standard output.
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Write the per-job records to this CSV file.
    #[clap(long)]
    jobs_output: Option<PathBuf>,

    /// Verbosity.
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Store the logs in this file.
    #[clap(long)]
    log_output: Option<PathBuf>,

    /// Do not log to the stderr.
    #[clap(long)]
    no_stderr: bool,
}

impl Opt {
    fn sample_config(&self) -> SampleConfig {
        let config = SampleConfig {
            arrival_rate: self.arrival_rate,
            service_shape: (self.service_alpha, self.service_beta),
            service_scale: self.service_scale,
        };
        if self.balanced {
            config.balanced()
        } else {
            config
        }
    }

    fn simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            num_jobs: self.num_jobs,
            model: self.model,
            samples: self.sample_config(),
            seed: self.seed,
        }
    }
}

/// Set up a logger based on the given user options.
fn set_up_logger(opt: &Opt) -> Result<(), fern::InitError> {
    let log_level = match opt.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let dispatch = fern::Dispatch::new()
        .format(|out, message, record| out.finish(format_args!("[{}] {}", record.level(), message)))
        .level(log_level);
    let dispatch = if let Some(path) = &opt.log_output {
        let _ = std::fs::remove_file(path);
        dispatch.chain(
            std::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .append(false)
                .open(path)?,
        )
    } else {
        dispatch
    };
    let dispatch = if opt.no_stderr {
        dispatch
    } else {
        dispatch.chain(std::io::stderr())
    };
    dispatch.apply()?;
    Ok(())
}

fn write_timeline<W: Write>(timeline: &Timeline, format: Format, mut writer: W) -> eyre::Result<()> {
    match format {
        Format::Csv => {
            let mut writer = csv::Writer::from_writer(writer);
            for entry in timeline.iter() {
                writer.serialize(entry)?;
            }
            writer.flush()?;
        }
        Format::Json => {
            serde_json::to_writer(writer, timeline.entries())
                .wrap_err("unable to serialize timeline to JSON")?;
        }
        Format::MsgPack => {
            rmp_serde::encode::write(&mut writer, timeline.entries())
                .wrap_err("unable to serialize timeline to MsgPack")?;
        }
    }
    Ok(())
}

fn write_jobs<W: Write>(jobs: &[Job], writer: W) -> eyre::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for job in jobs {
        writer.serialize(job)?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let opt = Opt::parse();
    set_up_logger(&opt).wrap_err("unable to set up logger")?;

    let config = opt.simulation_config();
    let jobs = config.run_jobs()?;
    let timeline = Timeline::from_jobs(&jobs);
    log::info!(
        "simulated {} jobs: {} timeline events, max queue size {}",
        jobs.len(),
        timeline.len(),
        timeline.max_queue_size()
    );

    if let Some(path) = &opt.jobs_output {
        let file = File::create(path)
            .wrap_err_with(|| format!("unable to create jobs output file: {}", path.display()))?;
        write_jobs(&jobs, file)?;
    }
    match &opt.output {
        Some(path) => {
            let file = File::create(path)
                .wrap_err_with(|| format!("unable to create output file: {}", path.display()))?;
            write_timeline(&timeline, opt.format, file)?;
        }
        None => {
            let stdout = io::stdout();
            write_timeline(&timeline, opt.format, stdout.lock())?;
        }
    }
    Ok(())
}
