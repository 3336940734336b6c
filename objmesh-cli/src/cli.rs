use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueHint};
use nalgebra::Vector3;

#[derive(Debug, Parser)]
#[command(name = "objmesh", author, version, about = "Inspect and transform Wavefront OBJ meshes")]
pub struct Cli {
    /// Logging output filters; comma-separated
    #[arg(
        short,
        long,
        global = true,
        default_value = "warn,objmesh_core=info,objmesh=info",
        env = "OBJMESH_LOG"
    )]
    pub log_filter: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print how many records of each kind a file holds.
    Info(LoadArgs),
    /// Load a file, optionally transform it, and list its faces.
    Dump(DumpArgs),
}

#[derive(Debug, Args)]
pub struct LoadArgs {
    /// OBJ file to load
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: PathBuf,
    /// Fail on malformed records instead of reading them as zero
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct DumpArgs {
    #[command(flatten)]
    pub load: LoadArgs,
    /// Recompute vertex normals from the faces
    #[arg(long)]
    pub normals: bool,
    /// Leave faces with fewer than three points out of the normals
    #[arg(long, requires = "normals")]
    pub skip_degenerate: bool,
    /// Euler angles in radians
    #[arg(long, value_parser = parse_vec3::<f32>, value_name = "A,B,G", allow_hyphen_values = true)]
    pub rotate: Option<Vector3<f32>>,
    /// Offset added to every vertex
    #[arg(long, value_parser = parse_vec3::<f32>, value_name = "X,Y,Z", allow_hyphen_values = true)]
    pub translate: Option<Vector3<f32>>,
    /// Uniform scale factor
    #[arg(long, allow_hyphen_values = true)]
    pub scale: Option<f32>,
}

fn parse_vec3<R: FromStr>(
    s: &str,
) -> Result<Vector3<R>, Box<dyn std::error::Error + Send + Sync + 'static>>
where
    <R as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    let parts: Vec<&str> = s.trim().split(',').collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected three comma-separated values, found {:?}", s).into());
    };
    Ok(nalgebra::vector![
        R::from_str(x.trim())?,
        R::from_str(y.trim())?,
        R::from_str(z.trim())?
    ])
}

/// Send log output to stderr so stdout only carries command output
pub fn initialize_tracing(log_filter: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter)
        .compact()
        .init();
}
