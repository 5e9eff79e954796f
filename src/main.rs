use clap::Parser;
use color_eyre::eyre::eyre;
use media_inspector::{Encoding, ReportFormat, Session, inspect_file_with_timeout};
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Print technical metadata of media files.
#[derive(Parser, Debug)]
#[command(name = "media_inspector", version, about, long_about = None)]
struct Cli {
    /// Report layout: Text, JSON, or a template such as 'General;%Duration%\n'
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// List every field instead of the curated set
    #[arg(short, long)]
    full: bool,

    /// Encoding of printed text; defaults to the locale's codeset
    #[arg(short, long)]
    encoding: Option<Encoding>,

    /// Give up on a file after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// List every known field with its description and exit
    #[arg(long)]
    info_parameters: bool,

    #[arg(required_unless_present = "info_parameters")]
    files: Vec<PathBuf>,
}

/// The codeset of the first locale variable that is set, like the C library
/// resolves `LC_CTYPE`.
fn locale_encoding() -> Encoding {
    ["LC_ALL", "LC_CTYPE", "LANG"]
        .into_iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.is_empty())
        .and_then(|locale| Encoding::from_locale(&locale))
        .unwrap_or_default()
}

impl Cli {
    fn session(&self, encoding: Encoding) -> Session {
        Session::builder()
            .encoding(encoding)
            .complete(self.full)
            .report_format(self.output.clone().unwrap_or_default())
            .build()
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let encoding = cli.encoding.unwrap_or_else(locale_encoding);

    if cli.info_parameters {
        let parameters = cli.session(encoding).available_parameters()?;
        io::stdout().write_all(parameters.as_bytes())?;
        return Ok(());
    }

    let mut failed = 0;
    for path in &cli.files {
        let session = cli.session(encoding);
        let opened = match cli.timeout_secs {
            Some(secs) => inspect_file_with_timeout(session, path, Duration::from_secs(secs)).await,
            None => {
                let mut session = session;
                session.open_path(path).map(|()| session)
            }
        };
        match opened {
            Ok(session) => match session.full_report() {
                Ok(report) => {
                    let mut stdout = io::stdout().lock();
                    stdout.write_all(report.as_bytes())?;
                    if !report.as_bytes().ends_with(b"\n") {
                        stdout.write_all(b"\n")?;
                    }
                }
                Err(e) => {
                    error!(path = %path.display(), "Report failed: {e}");
                    failed += 1;
                }
            },
            Err(e) => {
                error!(path = %path.display(), "{e}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(eyre!("{failed} of {} files could not be inspected", cli.files.len()));
    }
    Ok(())
}
