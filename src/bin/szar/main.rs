mod config;
mod error;
mod logger;
mod table;

use self::config::*;
use self::error::*;
use self::logger::*;
use self::table::*;

use std::io::stdout;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use clap::Subcommand;
use log::LevelFilter;
use sevenzip_archive::SevenZipArchive;

#[derive(Parser)]
#[command(about = "Inspect and modify 7-Zip archives through the 7zr/7z/7za tool.")]
struct Args {
    /// Configuration file with archive options.
    #[arg(
        short = 'c',
        long = "config",
        env = "SZAR_CONFIG",
        default_value = "/etc/szar.toml"
    )]
    config_file: PathBuf,
    /// Path to the 7-Zip executable.
    #[arg(short = 'b', long = "binary", env = "SZAR_BINARY")]
    binary: Option<PathBuf>,
    /// Console charset of the tool (e.g. UTF-8).
    #[arg(long = "encoding")]
    text_encoding: Option<String>,
    /// Kill the tool after this many seconds.
    #[arg(long = "timeout", value_name = "SECONDS")]
    timeout: Option<f64>,
    /// Print commands and their output.
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
    /// Archive file.
    #[arg(value_name = "ARCHIVE")]
    archive: PathBuf,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List entries.
    List(OutputArgs),
    /// Show archive properties.
    Meta(OutputArgs),
    /// Extract all or selected entries.
    Extract(ExtractArgs),
    /// Add an entry from a file or standard input.
    Add(AddArgs),
    /// Add the contents of a directory.
    AddDir(AddDirArgs),
    /// Test archive integrity.
    Test,
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Print JSON.
    #[clap(long = "json")]
    json: bool,
}

#[derive(clap::Args)]
struct ExtractArgs {
    /// Destination directory.
    #[clap(value_name = "DIR")]
    destination: PathBuf,
    /// Entries to extract.
    #[clap(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "NAME"
    )]
    names: Vec<String>,
}

#[derive(clap::Args)]
struct AddArgs {
    /// Entry name inside the archive.
    #[clap(value_name = "NAME")]
    name: String,
    /// File with the contents; standard input if omitted or `-`.
    #[clap(value_name = "FILE")]
    file: Option<PathBuf>,
}

#[derive(clap::Args)]
struct AddDirArgs {
    /// Directory whose contents are added.
    #[clap(value_name = "DIR")]
    dir: PathBuf,
}

fn main() -> ExitCode {
    match do_main() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn do_main() -> Result<ExitCode, Error> {
    let args = Args::parse();
    Logger::init(if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    })?;
    let mut options = read_options(&args.config_file)?;
    options.debug |= args.verbose;
    if args.binary.is_some() {
        options.binary = args.binary;
    }
    if args.text_encoding.is_some() {
        options.text_encoding = args.text_encoding;
    }
    if let Some(secs) = args.timeout {
        options.timeout = Some(
            Duration::try_from_secs_f64(secs)
                .map_err(|e| sevenzip_archive::Error::InvalidArgument(e.to_string()))?,
        );
    }
    let mut archive = SevenZipArchive::open(args.archive, options)?;
    match args.command {
        Command::List(more_args) => {
            let entries = archive.entries()?;
            if more_args.json {
                serde_json::to_writer_pretty(stdout().lock(), entries)?;
                println!();
            } else {
                print_entries(entries, stdout().lock())?;
            }
        }
        Command::Meta(more_args) => {
            let metadata = archive.metadata()?;
            if more_args.json {
                serde_json::to_writer_pretty(stdout().lock(), metadata)?;
                println!();
            } else {
                print_metadata(metadata, stdout().lock())?;
            }
        }
        Command::Extract(more_args) => {
            archive.extract_to(&more_args.destination, more_args.names.as_slice())?;
        }
        Command::Add(more_args) => {
            let contents = match more_args.file {
                Some(file) if file.as_os_str() != "-" => fs_err::read(file)?,
                _ => {
                    let mut contents = Vec::new();
                    std::io::stdin().lock().read_to_end(&mut contents)?;
                    contents
                }
            };
            archive.add_bytes(&more_args.name, &contents)?;
        }
        Command::AddDir(more_args) => {
            archive.add_dir(&more_args.dir)?;
        }
        Command::Test => {
            if !archive.test()? {
                eprintln!("{}: archive is corrupt or unreadable", archive.path().display());
                return Ok(ExitCode::from(2));
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
