use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use traffic_canvas::feed::{FeedClient, FeedState};
use traffic_canvas::SceneConfig;

#[derive(Parser)]
#[command(name = "repo-feed")]
#[command(about = "Prints an account's profile and most-starred repositories")]
struct Args {
    /// Scene configuration file (TOML); only the [feed] section is used
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Account to show instead of the configured one
    #[arg(short, long)]
    username: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info })
        .init();

    let mut feed = match &args.config {
        Some(path) => SceneConfig::load_from_file(path)?.feed,
        None => SceneConfig::default().feed,
    };
    if let Some(username) = &args.username {
        feed.username = username.clone();
    }

    info!("Loading repositories for {}", feed.username);
    let client = FeedClient::new(feed).context("failed to build HTTP client")?;

    match client.load().await {
        FeedState::Ready { profile, repositories } => {
            if args.json {
                let document = serde_json::json!({
                    "profile": profile,
                    "repositories": repositories,
                });
                let pretty = serde_json::to_string_pretty(&document)
                    .context("failed to serialize feed")?;
                println!("{pretty}");
                return Ok(());
            }

            println!("{} (@{})", profile.name, profile.login);
            if let Some(bio) = &profile.bio {
                println!("{bio}");
            }
            println!("{} followers, {} public repositories", profile.followers, profile.public_repos);
            println!();

            for repo in &repositories {
                let language = repo.language.as_deref().unwrap_or("-");
                println!("{:>6}  {:<32} {:<12} {}", repo.stars, repo.name, language, repo.url);
                if let Some(description) = &repo.description {
                    println!("        {description}");
                }
            }
            Ok(())
        }
        FeedState::Failed(message) => bail!("repository feed unavailable: {message}"),
        FeedState::Loading => bail!("repository feed did not finish loading"),
    }
}
