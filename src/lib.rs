use anyhow::Result;
use tracing::info;

pub mod cli;
pub mod config;
pub mod error;
pub mod filename;
pub mod fs_ops;
pub mod generator;
pub mod group;
pub mod logging;
pub mod material;
pub mod placeholder;
pub mod scene_object;
pub mod template;

use cli::Cli;
use config::{RunConfiguration, executable_dir};
use generator::Generator;
use group::groups_from_paths;
use template::TemplateSet;

const USAGE_HINT: &str = "no .nl2mat files given. Drop .nl2mat files or directories holding \
.nl2mat files (and optionally one .nl2sco file) onto the executable, or run with -h for options.";

pub fn run(cli: Cli) -> Result<()> {
    let base_dir = match &cli.base_dir {
        Some(dir) => dir.clone(),
        None => executable_dir()?,
    };
    let log_dir = if cli.no_log_file {
        None
    } else {
        Some(
            cli.log_dir
                .as_ref()
                .map(|d| base_dir.join(d))
                .unwrap_or_else(|| base_dir.clone()),
        )
    };
    if let Some(log_file) = logging::init(log_dir.as_deref()) {
        info!("logging to {}", log_file.display());
    }

    let config = RunConfiguration::from_cli(&cli, &base_dir);
    let groups = groups_from_paths(&cli.files, cli.sco.as_deref());
    if groups.is_empty() {
        info!("{USAGE_HINT}");
        return Ok(());
    }

    config.ensure_output_roots()?;
    let templates = TemplateSet::discover(&config.template_dir);
    let report = Generator::new(&config, &templates).run(&groups);

    info!(
        "done: {} materials, {} scene objects, {} files copied, {} skipped",
        report.materials_generated.len(),
        report.scene_objects_generated.len(),
        report.files_copied.len(),
        report.skipped.len()
    );
    if cli.report {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}
