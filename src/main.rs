use clap::Parser;
use termcolor::{Color, ColorChoice};
use tracing_subscriber::EnvFilter;

use rawtext::pattern::DEFAULT_SEARCH;
use rawtext::report::{DumpFormat, Report};
use rawtext::{cprint, cprintln, term};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Text to run the regex examples against.
    #[arg(long)]
    search: Option<String>,

    /// Dump the report to JSON, TOML or YAML.
    #[arg(long)]
    dump: Option<DumpFormat>,

    /// Only print the regex examples.
    #[arg(long, short)]
    quiet: bool,

    /// Disable colored output.
    #[arg(long)]
    no_color: bool,

    /// Verbose logging.
    #[arg(long, short)]
    verbose: bool,
}

fn init_logging(args: &Args) {
    let default = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!args.no_color)
        .with_target(false)
        .without_time()
        .init();
}

fn main() {
    term::ensure_panic_hook();

    let args = Args::parse();
    if args.no_color {
        term::set_color_choice(ColorChoice::Never);
    }
    init_logging(&args);

    let search = args.search.as_deref().unwrap_or(DEFAULT_SEARCH);
    let report = match Report::build(search) {
        Ok(report) => report,
        Err(e) => {
            cprint!(fg = Color::Red, "Error: ");
            cprintln!("{e}");
            std::process::exit(1);
        }
    };

    if let Some(format) = args.dump {
        match report.dump(format) {
            Ok(dump) => println!("{}", dump.trim_end()),
            Err(e) => {
                cprint!(fg = Color::Red, "Error: ");
                cprintln!("{e}");
                std::process::exit(1);
            }
        }
        return;
    }

    report.render(&mut *term::stdout(), args.quiet);
}
