//! `schemasync export LOCATION [--output FILE]`

use std::path::PathBuf;

use clap::Args;
use schemasync_store::errors::io_error;
use schemasync_store::snapshot_file::render_snapshot;
use schemasync_store::FileFormat;

use crate::endpoint::Endpoint;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Schema directory or snapshot file to read
    pub location: PathBuf,

    /// Output file (.yaml/.yml/.json); default: YAML on stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Database name recorded in the document
    #[arg(long)]
    pub database: Option<String>,
}

pub async fn execute(args: ExportArgs) -> anyhow::Result<()> {
    let format = match &args.output {
        Some(path) => FileFormat::from_path(path)?,
        None => FileFormat::Yaml,
    };

    let endpoint = Endpoint::open(&args.location).await?;
    let snapshot = endpoint.provider().load_snapshot().await?;
    let document = render_snapshot(&snapshot, args.database, format)?;

    match args.output {
        Some(path) => {
            tokio::fs::write(&path, document)
                .await
                .map_err(|e| io_error("export", &path, e))?;
            println!("Exported {} objects to {}", snapshot.len(), path.display());
        }
        None => print!("{}", document),
    }
    Ok(())
}
