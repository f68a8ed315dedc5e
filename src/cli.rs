use crate::config::{
    DEFAULT_NL2MAT_OUT, DEFAULT_NL2SCO_OUT, DEFAULT_PREVIEW_OUT, DEFAULT_TEMPLATE_DIR,
};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "buildshapeify")]
#[command(about = "Generate scaleable build shape materials and scene objects from .nl2mat files")]
pub struct Cli {
    /// .nl2mat files and/or directories holding .nl2mat files and an optional .nl2sco file
    pub files: Vec<PathBuf>,
    /// Source .nl2sco file for the loose .nl2mat files given on the command line
    #[arg(long)]
    pub sco: Option<PathBuf>,
    /// Scale written into the {scale_settings} placeholder
    #[arg(long)]
    pub scale: Option<f32>,
    #[arg(long = "nl2mat-out", alias = "nl2mat_out", default_value = DEFAULT_NL2MAT_OUT)]
    pub nl2mat_out: PathBuf,
    #[arg(long = "nl2sco-out", alias = "nl2sco_out", default_value = DEFAULT_NL2SCO_OUT)]
    pub nl2sco_out: PathBuf,
    #[arg(long = "preview-out", alias = "preview_out", default_value = DEFAULT_PREVIEW_OUT)]
    pub preview_out: PathBuf,
    #[arg(long, default_value = DEFAULT_TEMPLATE_DIR)]
    pub templates: PathBuf,
    /// Directory relative paths are resolved against [default: the executable's directory]
    #[arg(long)]
    pub base_dir: Option<PathBuf>,
    /// Directory for the run log file [default: the base directory]
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
    #[arg(long)]
    pub no_log_file: bool,
    /// Print a JSON report of everything generated, copied and skipped
    #[arg(long)]
    pub report: bool,
}
