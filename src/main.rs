mod api;
mod app;
mod cli;
mod event;
mod feed;
mod help;
mod keys;
mod logging;
mod prefetch;
mod settings;
mod theme;
mod tui;
mod views;
mod virtual_list;
mod widgets;

#[cfg(test)]
mod test_utils;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use api::{DEFAULT_API_BASE, Page, PostClient};
use app::{App, Message};
use cli::{Cli, Commands, OutputFormat, PageArgs};
use event::Event;
use settings::Settings;
use theme::{
    ResolvedTheme, ThemeVariant, all_themes, by_name, default_for_variant, detect_terminal_theme,
    load_theme_file,
};
use tui::EventHandler;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_dir = settings::config_dir(cli.config_dir.as_ref());
    let settings = load_settings(config_dir.as_deref());

    if let Some(command) = &cli.command {
        return match command {
            Commands::Page(args) => print_page(&cli, &settings, args).await,
            Commands::Init { force } => init_settings(&cli, config_dir.as_deref(), *force),
        };
    }
    run_tui(cli, settings, config_dir).await
}

fn load_settings(config_dir: Option<&Path>) -> Settings {
    config_dir
        .map(|dir| {
            let path = settings::settings_path(dir);
            Settings::load(&path).unwrap_or_else(|e| {
                eprintln!("Warning: {:#}", e);
                Settings::default()
            })
        })
        .unwrap_or_default()
}

/// CLI flag > settings file > built-in default.
fn resolve_api_base<'a>(cli: &'a Cli, settings: &'a Settings) -> &'a str {
    cli.api_base
        .as_deref()
        .or(settings.api_base.as_deref())
        .unwrap_or(DEFAULT_API_BASE)
}

async fn print_page(cli: &Cli, settings: &Settings, args: &PageArgs) -> Result<()> {
    let client = PostClient::new(resolve_api_base(cli, settings))?;
    let page = client
        .fetch_page(args.index)
        .await
        .with_context(|| format!("Failed to fetch page {}", args.index))?;

    match args.format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&page).context("Failed to serialize page to JSON")?;
            println!("{}", json);
        }
        OutputFormat::Text => print!("{}", format_page_text(&page)),
    }
    Ok(())
}

fn format_page_text(page: &Page) -> String {
    let mut out = String::new();
    for post in &page.items {
        out.push_str(&format!("{}\n", post.title));
        for line in post.body.lines() {
            out.push_str(&format!("    {}\n", line));
        }
        out.push_str(&format!("    -- {}\n\n", post.byline()));
    }
    if page.is_empty() {
        out.push_str("No more posts\n");
    } else {
        out.push_str(&format!("next page: {}\n", page.next_page_index));
    }
    out
}

fn init_settings(cli: &Cli, config_dir: Option<&Path>, force: bool) -> Result<()> {
    let config_dir = config_dir.context("Could not determine config directory")?;
    let path = settings::settings_path(config_dir);
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        );
    }
    let settings = Settings {
        theme: cli.theme.clone(),
        api_base: cli.api_base.clone(),
        ..Settings::default()
    };
    settings.save(&path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn resolve_theme(
    cli: &Cli,
    settings: &Settings,
    config_dir: Option<&PathBuf>,
) -> Result<ResolvedTheme> {
    let variant = if cli.dark {
        ThemeVariant::Dark
    } else if cli.light {
        ThemeVariant::Light
    } else {
        detect_terminal_theme()
    };

    // Priority: CLI --theme > settings file > default
    let theme_name = cli.theme.as_ref().or(settings.theme.as_ref());

    if let Some(theme_arg) = theme_name {
        let path = Path::new(theme_arg);
        if path.exists() && path.extension().is_some_and(|e| e == "toml") {
            let theme = load_theme_file(path)?;
            return Ok(theme.into());
        }

        if let Some(theme) = by_name(theme_arg) {
            return Ok(theme.into());
        }

        if let Some(config_dir) = config_dir {
            let custom_path = settings::themes_dir(config_dir).join(format!("{}.toml", theme_arg));
            if custom_path.exists() {
                let theme = load_theme_file(&custom_path)?;
                return Ok(theme.into());
            }
        }

        let available: Vec<String> = all_themes().into_iter().map(|t| t.name).collect();
        anyhow::bail!(
            "Theme '{}' not found. Built-in themes: {}",
            theme_arg,
            available.join(", ")
        );
    }

    Ok(default_for_variant(variant))
}

async fn run_tui(cli: Cli, settings: Settings, config_dir: Option<PathBuf>) -> Result<()> {
    if let Some(dir) = &config_dir {
        let log_file = settings::log_path(dir);
        match logging::init(&log_file, cli.verbose) {
            Ok(()) if cli.verbose => eprintln!("Logging to {}", log_file.display()),
            Ok(()) => {}
            Err(e) => eprintln!("Logging disabled: {}", e),
        }
    }

    let client = PostClient::new(resolve_api_base(&cli, &settings))?;
    let resolved_theme = resolve_theme(&cli, &settings, config_dir.as_ref())?;
    info!(api_base = client.base_url(), theme = %resolved_theme.name, "starting");

    let mut terminal = tui::init()?;
    let mut app = App::new(resolved_theme, client);
    let mut events = EventHandler::new(250);
    let mut last_size = None;

    app.load_initial();

    let outcome = loop {
        // Track size changes so the window is laid out before drawing
        let size = terminal.size()?;
        if last_size != Some(size) {
            last_size = Some(size);
            app.update(Message::Resize {
                width: size.width,
                height: size.height,
            });
        }

        // Poll async results (non-blocking)
        while let Ok(result) = app.result_rx.try_recv() {
            app.handle_async_result(result);
        }

        terminal.draw(|frame| views::render(frame, &app))?;

        if app.should_quit {
            break Ok(());
        }

        match events.next().await {
            Ok(Event::Key(key)) => {
                if let Some(msg) = keys::handle_key(key) {
                    app.update(msg);
                }
            }
            Ok(Event::Scroll(lines)) => app.update(Message::ScrollLines(lines)),
            Ok(Event::Resize(width, height)) => app.update(Message::Resize { width, height }),
            Ok(Event::Tick) => {}
            Err(e) => break Err(e),
        }
    };

    tui::restore()?;
    if let Err(e) = &outcome {
        warn!(error = %e, "event loop ended with an error");
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{PostBuilder, page_of};
    use std::io::Write;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn api_base_prefers_cli_over_settings() {
        let settings = Settings {
            api_base: Some("http://settings.local".into()),
            ..Settings::default()
        };
        let cli = parse(&["postfeed", "--api-base", "http://cli.local"]);
        assert_eq!(resolve_api_base(&cli, &settings), "http://cli.local");

        let cli = parse(&["postfeed"]);
        assert_eq!(resolve_api_base(&cli, &settings), "http://settings.local");
        assert_eq!(resolve_api_base(&cli, &Settings::default()), DEFAULT_API_BASE);
    }

    #[test]
    fn theme_resolves_builtin_name_and_forced_variant() {
        let cli = parse(&["postfeed", "--theme", "dracula"]);
        let theme = resolve_theme(&cli, &Settings::default(), None).unwrap();
        assert_eq!(theme.name, "dracula");

        let cli = parse(&["postfeed", "--light"]);
        let theme = resolve_theme(&cli, &Settings::default(), None).unwrap();
        assert_eq!(theme.variant, ThemeVariant::Light);
    }

    #[test]
    fn theme_from_settings_when_flag_absent() {
        let settings = Settings {
            theme: Some("monokai".into()),
            ..Settings::default()
        };
        let theme = resolve_theme(&parse(&["postfeed", "--dark"]), &settings, None).unwrap();
        assert_eq!(theme.name, "monokai");
    }

    #[test]
    fn unknown_theme_is_an_error() {
        let cli = parse(&["postfeed", "--theme", "no-such-theme"]);
        let err = resolve_theme(&cli, &Settings::default(), None).unwrap_err();
        assert!(err.to_string().contains("no-such-theme"));
        assert!(err.to_string().contains("default-dark"));
    }

    #[test]
    fn custom_theme_from_themes_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().to_path_buf();
        let themes = settings::themes_dir(&dir);
        std::fs::create_dir_all(&themes).unwrap();
        let theme = by_name("default-dark").unwrap();
        let mut file = std::fs::File::create(themes.join("mine.toml")).unwrap();
        let mut custom = theme.clone();
        custom.name = "mine".into();
        file.write_all(toml::to_string(&custom).unwrap().as_bytes())
            .unwrap();

        let cli = parse(&["postfeed", "--theme", "mine"]);
        let resolved = resolve_theme(&cli, &Settings::default(), Some(&dir)).unwrap();
        assert_eq!(resolved.name, "mine");
    }

    #[test]
    fn init_writes_settings_once() {
        let temp = TempDir::new().unwrap();
        let cli = parse(&["postfeed", "--theme", "dracula", "init"]);

        init_settings(&cli, Some(temp.path()), false).unwrap();
        let saved = Settings::load(&settings::settings_path(temp.path())).unwrap();
        assert_eq!(saved.theme.as_deref(), Some("dracula"));
        assert!(saved.api_base.is_none());

        assert!(init_settings(&cli, Some(temp.path()), false).is_err());
        assert!(init_settings(&cli, Some(temp.path()), true).is_ok());
    }

    #[test]
    fn text_output_lists_posts_and_next_page() {
        let page = Page {
            items: vec![
                PostBuilder::new()
                    .id(1)
                    .user(7)
                    .title("hello")
                    .body("line one\nline two")
                    .build(),
            ],
            next_page_index: 1,
        };
        assert_eq!(
            format_page_text(&page),
            "hello\n    line one\n    line two\n    -- #1 by user 7\n\nnext page: 1\n"
        );
    }

    #[test]
    fn text_output_for_empty_page() {
        let page = page_of(3, 0);
        assert_eq!(format_page_text(&page), "No more posts\n");
    }
}
