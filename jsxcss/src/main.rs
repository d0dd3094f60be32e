use clap::Parser;
use jsxcss_lib::config::Config;
use jsxcss_lib::jsxcss_generate;
use log::debug;
use std::path::PathBuf;

const JSXCSS_INTRO: &str = r#"
       _______  __  _____________ _____
      / / ___/ |/ / / ___/ ___/ ___/
 __  / /\__ \|   / / /   \__ \\__ \
/ /_/ /___/ /   | / /___ ___/ /__/ /
\____//____/_/|_| \____//____/____/

    jsxcss - inline JSX styles to deduplicated CSS classes
"#;

#[derive(Parser)]
#[command(name = "jsxcss")]
#[command(about = "Move inline JSX styles into a generated stylesheet")]
struct Args {
    /// Input JSX file.
    #[arg(default_value = "minimal.jsx")]
    input: PathBuf,

    /// Directory the generated files are written to.
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Minify the generated stylesheet.
    #[arg(long)]
    minify: bool,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    print_config: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    // parse the args given in terminal
    let args: Args = Args::parse();

    if !args.print_config {
        println!("{}", JSXCSS_INTRO);
    }

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut config = match Config::load_or_default(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if args.minify {
        config.output.minify = true;
    }
    debug!("Using configuration: {:?}", config);

    if args.print_config {
        match config.to_toml() {
            Ok(text) => print!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    match jsxcss_generate::run(&args.input, &args.out_dir, &config) {
        Ok(written) => {
            println!("Conversion complete!");
            println!("Generated files in {}:", args.out_dir.display());
            for path in written {
                if let Some(name) = path.file_name() {
                    println!("- {}", name.to_string_lossy());
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
