mod commands;
mod logging;

use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "prerender-kit")]
#[command(
    version,
    about = "Pre-render a single-page marketing site for crawlers",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Scaffold site.toml in an existing directory
    Init {
        /// Site directory
        path: PathBuf,

        /// Site name
        #[arg(long)]
        name: Option<String>,

        /// Canonical origin, e.g. https://www.example.com
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Check configuration, base template and the last build
    Validate {
        /// Site directory
        path: PathBuf,
    },

    /// Fetch content and write the pre-rendered site
    ///
    /// Requires CMS_API_ENDPOINT; CMS_ACCESS_TOKEN is sent when set.
    Build {
        /// Site directory
        path: PathBuf,

        /// Output directory (defaults to build.output in site.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve the generated site locally
    Preview {
        /// Site directory
        path: PathBuf,

        /// Port to serve on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging();

    match cli.command {
        Command::Init {
            path,
            name,
            base_url,
        } => commands::init::run(path, name, base_url).await,
        Command::Validate { path } => commands::validate::run(path).await,
        Command::Build { path, output } => commands::build::run(path, output).await,
        Command::Preview { path, port } => commands::preview::run(path, port).await,
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "prerender-kit", &mut io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_output_is_optional() {
        let cli = Cli::try_parse_from(["prerender-kit", "build", "site"]).unwrap();
        assert!(matches!(cli.command, Command::Build { output: None, .. }));

        let cli = Cli::try_parse_from(["prerender-kit", "build", "site", "-o", "public"]).unwrap();
        assert!(matches!(cli.command, Command::Build { output: Some(_), .. }));
    }

    #[test]
    fn test_preview_default_port() {
        let cli = Cli::try_parse_from(["prerender-kit", "preview", "site"]).unwrap();
        assert!(matches!(cli.command, Command::Preview { port: 8080, .. }));
    }
}
