use std::path::PathBuf;

use facet::Facet;
use figue as args;
use snapfold_aggregate::flatten;
use snapfold_view::ProfilerWindow;
use tracing::info;

mod file_source;
mod text_host;

use file_source::{JsonFileSource, parse_snapshot};
use text_host::{Expand, TextHost};

#[derive(Facet, Debug)]
struct Cli {
    #[facet(flatten)]
    builtins: args::FigueBuiltins,
    #[facet(args::subcommand)]
    command: Command,
}

#[derive(Facet, Debug)]
#[repr(u8)]
enum Command {
    /// Capture `previous` (if given) then `current`, and print the native object view.
    Show {
        #[facet(args::named)]
        current: String,
        #[facet(args::named, default)]
        previous: Option<String>,
        #[facet(args::named, default)]
        expand: Option<String>,
        #[facet(args::named, default)]
        expand_all: bool,
        #[facet(args::named, default)]
        tab: Option<u32>,
    },
    /// Print the flattened managed types of a snapshot as JSON.
    Managed {
        #[facet(args::named)]
        snapshot: String,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let figue_config = args::builder::<Cli>()
        .map_err(|e| format!("failed to build CLI schema: {e}"))?
        .cli(|cli| cli.strict())
        .help(|h| {
            h.program_name("snapfold")
                .description("Aggregate heap snapshots by native type and diff them")
                .version(option_env!("CARGO_PKG_VERSION").unwrap_or("dev"))
        })
        .build();
    let cli = args::Driver::new(figue_config)
        .run()
        .into_result()
        .map_err(|e| e.to_string())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.value.command {
        Command::Show {
            current,
            previous,
            expand,
            expand_all,
            tab,
        } => {
            let expand = match (expand_all, expand) {
                (true, _) => Expand::All,
                (false, Some(name)) => Expand::Only(name),
                (false, None) => Expand::Nothing,
            };
            let paths: Vec<PathBuf> = previous
                .into_iter()
                .chain(std::iter::once(current))
                .map(PathBuf::from)
                .collect();
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| format!("failed to build tokio runtime: {e}"))?;
            let frame = runtime.block_on(run_show(paths, expand, tab.map(|tab| tab as usize)))?;
            print!("{frame}");
            Ok(())
        }
        Command::Managed { snapshot } => run_managed(&snapshot),
    }
}

async fn run_show(
    paths: Vec<PathBuf>,
    expand: Expand,
    tab: Option<usize>,
) -> Result<String, String> {
    let captures = paths.len();
    let mut window = ProfilerWindow::new(JsonFileSource::new(paths));
    for _ in 0..captures {
        window
            .request_capture()
            .map_err(|e| format!("request snapshot: {e}"))?;
        window
            .finish_capture()
            .await
            .map_err(|e| format!("capture snapshot: {e}"))?;
    }

    let mut host = TextHost::new(expand, tab);
    window.on_gui(&mut host);
    window.teardown();
    Ok(host.finish())
}

fn run_managed(path: &str) -> Result<(), String> {
    let json = std::fs::read_to_string(path).map_err(|e| format!("read {path}: {e}"))?;
    let snapshot = parse_snapshot(&json).map_err(|e| format!("{path}: {e}"))?;
    let records = flatten(&snapshot.type_descriptions);
    info!(managed_types = records.len(), "flattened managed types");
    let pretty = facet_json::to_string_pretty(&records)
        .map_err(|e| format!("encode managed types: {e}"))?;
    println!("{pretty}");
    Ok(())
}
