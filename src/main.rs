use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use catalogue_answers::config::{default_bind_addr, DEFAULT_DATA_DIR};
use catalogue_answers::upstream::DEFAULT_BASE_URL;
use catalogue_answers::{build_transcript, logging, server, tui, Settings};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding the credential file, logs and saved transcripts
    #[arg(long, env = "CATALOGUE_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Base URL of the catalogue service
    #[arg(long, env = "CATALOGUE_UPSTREAM", default_value = DEFAULT_BASE_URL)]
    upstream: String,

    /// Password for the credential editor
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    admin_password: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse the catalogue in the terminal (default)
    Tui,
    /// Serve the JSON API
    Serve {
        /// Address to listen on
        #[arg(long, default_value_t = default_bind_addr())]
        bind: SocketAddr,
    },
    /// Search the catalogue and print matching tests
    Search {
        query: String,
    },
    /// Print the question/answer transcript of a test
    Show {
        test_id: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings =
        Settings::new(args.data_dir, args.upstream).with_admin_password(args.admin_password);

    match args.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            logging::init_file(&settings.log_file())
                .with_context(|| format!("cannot open {}", settings.log_file().display()))?;
            tui::run(&settings).await?;
        }
        Command::Serve { bind } => {
            logging::init_stderr();
            server::run(&settings, bind).await?;
        }
        Command::Search { query } => {
            logging::init_stderr();
            let client = settings.upstream_client()?;
            let credentials = settings.credential_store().read();
            let items = client.search(&credentials, &query).await?;

            if items.is_empty() {
                println!("No tests found for \"{}\"", query);
            }
            for item in items {
                println!(
                    "{}  {}  {}",
                    item.id_text(),
                    item.kind.as_deref().unwrap_or("-"),
                    item.display_name()
                );
            }
        }
        Command::Show { test_id } => {
            logging::init_stderr();
            let client = settings.upstream_client()?;
            let credentials = settings.credential_store().read();
            let test = client.fetch_test(&credentials, test_id).await?;

            if test.is_empty() {
                anyhow::bail!("test {} could not be loaded", test_id);
            }
            println!("{}\n", test.name);
            println!("{}", build_transcript(&test));
        }
    }

    Ok(())
}
