//! PoseStudio - browse photo poses and keep favorites from the terminal
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::future_not_send)]

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use posestudio::api::{self, Source};
use posestudio::catalog::{self, CategoryListing, PoseListing};
use posestudio::favorites::{FavoritesStore, ToggleAction};
use posestudio::images::ImageDownloader;
use posestudio::{Category, Config, Pose, SqliteStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (RUST_LOG=debug for verbose output)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let (command, demo) = parse_args(std::env::args().skip(1).collect())?;

    match command {
        Command::Help => {
            print_help();
            return Ok(());
        }
        Command::Version => {
            println!("posestudio {}", posestudio::VERSION);
            return Ok(());
        }
        Command::Init => return init_config(),
        _ => {}
    }

    let mut config = Config::load()?;
    config.demo |= demo;

    let app = App::open(config).await?;

    match command {
        Command::Categories => app.categories().await,
        Command::Poses { category } => app.poses(&category).await,
        Command::Pose { category, id } => app.pose(&category, &id).await,
        Command::Favorites => app.favorites().await,
        Command::Favorite { category, id } => app.toggle(&category, &id).await,
        Command::Download { category, id, dir } => app.download(&category, &id, dir).await,
        Command::Help | Command::Version | Command::Init => Ok(()),
    }
}

/// CLI commands
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Categories,
    Poses {
        category: String,
    },
    Pose {
        category: String,
        id: String,
    },
    Favorites,
    Favorite {
        category: String,
        id: String,
    },
    Download {
        category: String,
        id: String,
        dir: Option<PathBuf>,
    },
    Init,
    Help,
    Version,
}

/// Parse arguments (without the program name). Returns the command and
/// whether `--demo` was given.
fn parse_args(args: Vec<String>) -> Result<(Command, bool)> {
    let demo = args.iter().any(|a| a == "--demo");
    let args: Vec<String> = args.into_iter().filter(|a| a != "--demo").collect();

    let Some(first) = args.first() else {
        return Ok((Command::Help, demo));
    };

    let arg = |i: usize, what: &str| -> Result<String> {
        args.get(i)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Missing {what}\nRun 'posestudio --help' for usage"))
    };

    let command = match first.as_str() {
        "-h" | "--help" | "help" => Command::Help,
        "-v" | "--version" | "version" => Command::Version,
        "init" => Command::Init,
        "categories" | "cats" => Command::Categories,
        "poses" | "ls" => Command::Poses {
            category: arg(1, "category")?,
        },
        "pose" | "show" => Command::Pose {
            category: arg(1, "category")?,
            id: arg(2, "pose id")?,
        },
        "favorites" | "favs" => Command::Favorites,
        "favorite" | "fav" => Command::Favorite {
            category: arg(1, "category")?,
            id: arg(2, "pose id")?,
        },
        "download" | "dl" => Command::Download {
            category: arg(1, "category")?,
            id: arg(2, "pose id")?,
            dir: args.get(3).map(PathBuf::from),
        },
        other => {
            return Err(anyhow::anyhow!(
                "Unknown command: {other}\nRun 'posestudio --help' for usage"
            ));
        }
    };

    Ok((command, demo))
}

fn print_help() {
    let config_path = Config::default_path()
        .map_or_else(|_| "Unknown".to_string(), |p| p.display().to_string());

    println!(
        r#"📸 PoseStudio - photo pose gallery

USAGE:
    posestudio [--demo] <COMMAND>

COMMANDS:
    categories                         List categories with pose counts
    poses <category>                   List poses in a category
    pose <category> <id>               Show pose details
    favorites                          List your favorite poses
    favorite <category> <id>           Add or remove a favorite
    download <category> <id> [dir]     Save a pose image
    init                               Write a default config file

    Examples:
        posestudio categories
        posestudio poses couples
        posestudio favorite couples 8f14e45f

OPTIONS:
    --demo                             Use the bundled demo catalog
    -h, --help                         Show this help message
    -v, --version                      Show version information

CONFIG:
    {}
    Env: POSESTUDIO_SUPABASE_URL, POSESTUDIO_SUPABASE_ANON_KEY
"#,
        config_path
    );
}

/// Write the default config unless one already exists
fn init_config() -> Result<()> {
    let path = Config::default_path()?;
    if path.exists() {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }

    Config::default().save()?;
    println!("✓ Wrote default config to {}", path.display());
    Ok(())
}

/// Everything a command needs: config, pose source and favorites
struct App {
    config: Config,
    source: Source,
    favorites: FavoritesStore<SqliteStore>,
}

impl App {
    async fn open(config: Config) -> Result<Self> {
        let source = api::get_source(&config)?;
        let favorites = FavoritesStore::open(SqliteStore::open()?, config.favorites_key.clone()).await;

        if let Some(err) = favorites.snapshot().error {
            eprintln!("⚠ {}", err);
        }

        Ok(Self {
            config,
            source,
            favorites,
        })
    }

    fn heart(&self, pose_id: &str) -> &'static str {
        if self.favorites.is_favorite(pose_id) { "♥" } else { " " }
    }

    /// Look a pose up, preferring the stored favorite copy over the source
    async fn resolve(&self, category: &str, id: &str) -> Result<Pose> {
        let stored = self.favorites.get(id);
        Ok(catalog::resolve_pose(&self.source, id, category, stored).await?)
    }

    async fn categories(&self) -> Result<()> {
        let mut listing = CategoryListing::default();
        listing.load(&self.source).await;

        println!("Categories ({} poses)\n", listing.total());
        for summary in &listing.categories {
            println!(
                "  {:<32} {:>5}  {}",
                summary.category.name(),
                summary.count,
                summary.category.id()
            );
        }
        Ok(())
    }

    async fn poses(&self, category: &str) -> Result<()> {
        let known = known_category(category)?;

        let mut listing = PoseListing::new(known.id());
        listing.load(&self.source).await;

        if let Some(err) = listing.error {
            anyhow::bail!("Error loading poses: {err}");
        }

        println!("{} ({})", known.name(), listing.poses.len());
        println!("{}", "─".repeat(60));

        if listing.poses.is_empty() {
            println!("No poses in this category yet.");
        }
        for pose in &listing.poses {
            println!("{} {}  [{}]", self.heart(&pose.id), pose.title, pose.id);
            println!("    {}", pose.preview(70));
        }
        Ok(())
    }

    async fn pose(&self, category: &str, id: &str) -> Result<()> {
        let pose = self.resolve(category, id).await?;

        let category_name = pose.category().map_or(pose.category.as_str(), |c| c.name());
        println!("{} {}", self.heart(&pose.id), pose.title);
        println!("{}", category_name);
        println!("{}", "─".repeat(60));
        println!("{}", textwrap::fill(&pose.description, 72));
        println!("\nImage: {}", pose.image_url);
        Ok(())
    }

    async fn favorites(&self) -> Result<()> {
        if self.favorites.is_empty() {
            println!("No favorites yet.");
            println!("\nAdd one with:");
            println!("  posestudio favorite <category> <id>");
            return Ok(());
        }

        println!("Favorites ({})\n", self.favorites.len());
        for pose in &self.favorites.items() {
            let category = pose.category().map_or(pose.category.as_str(), |c| c.name());
            println!("  ♥ {}  [{}]\n    {}", pose.title, pose.id, category);
        }

        let key = self.favorites.storage_key();
        if let Ok(Some(saved)) = self.favorites.storage().updated_at(key).await {
            println!("\nLast saved: {}", saved.format("%Y-%m-%d %H:%M UTC"));
        }
        Ok(())
    }

    async fn toggle(&self, category: &str, id: &str) -> Result<()> {
        let pose = self.resolve(category, id).await?;

        match self
            .favorites
            .toggle_favorite(&pose)
            .await
            .context("Could not update favorites")?
        {
            ToggleAction::Added => println!("♥ Added \"{}\" to favorites", pose.title),
            ToggleAction::Removed => println!("♡ Removed \"{}\" from favorites", pose.title),
        }
        Ok(())
    }

    async fn download(&self, category: &str, id: &str, dir: Option<PathBuf>) -> Result<()> {
        let pose = self.resolve(category, id).await?;
        let dir = match dir {
            Some(dir) => dir,
            None => self.config.download_dir()?,
        };

        let downloader = ImageDownloader::new(Duration::from_secs(self.config.request_timeout_secs));
        println!("⬇ Downloading \"{}\"...", pose.title);
        let path = downloader.download(&pose, &dir).await?;
        println!("✓ Saved to {}", path.display());
        Ok(())
    }
}

fn known_category(id: &str) -> Result<Category> {
    Category::from_id(id).ok_or_else(|| {
        anyhow::anyhow!("Unknown category: {id}\nRun 'posestudio categories' to list them")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_no_args_shows_help() {
        assert_eq!(parse_args(Vec::new()).unwrap(), (Command::Help, false));
    }

    #[test]
    fn test_demo_flag_anywhere() {
        let (command, demo) = parse_args(args(&["poses", "--demo", "couples"])).unwrap();
        assert!(demo);
        assert_eq!(
            command,
            Command::Poses {
                category: "couples".to_string()
            }
        );
    }

    #[test]
    fn test_favorite_requires_id() {
        assert!(parse_args(args(&["favorite", "couples"])).is_err());
        let (command, _) = parse_args(args(&["fav", "couples", "p1"])).unwrap();
        assert_eq!(
            command,
            Command::Favorite {
                category: "couples".to_string(),
                id: "p1".to_string()
            }
        );
    }

    #[test]
    fn test_download_optional_dir() {
        let (command, _) = parse_args(args(&["download", "couples", "p1", "/tmp/poses"])).unwrap();
        assert!(matches!(command, Command::Download { dir: Some(_), .. }));
    }

    #[test]
    fn test_init_command() {
        assert_eq!(parse_args(args(&["init"])).unwrap(), (Command::Init, false));
    }

    #[test]
    fn test_unknown_command() {
        assert!(parse_args(args(&["paywall"])).is_err());
    }
}
