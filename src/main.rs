//! Remarkable trees of Paris - Entry Point

use arbres::config::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
    ResolvedConfig,
};
use arbres::model::AppError;
use arbres::source::{fetch_all, HttpSource};
use arbres::state::{NavKey, PageState};
use arbres::view::{render_page, ViewOptions};
use clap::Parser;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

/// Remarkable trees of Paris - search the open-data collection from the terminal
#[derive(Parser, Debug)]
#[command(name = "arbres")]
#[command(version)]
#[command(about = "Browse and search the remarkable trees of Paris")]
pub struct Args {
    /// Search query (accent and case insensitive); lists every tree if omitted
    pub query: Option<String>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Records endpoint to fetch from
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Records requested per page (must be positive)
    #[arg(long)]
    pub page_size: Option<NonZeroUsize>,

    /// Press "load more" this many times before printing
    #[arg(short, long, default_value = "0")]
    pub more: usize,

    /// Select the Nth suggestion (1-based) for the query
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub pick: Option<u32>,

    /// Print descriptions in full
    #[arg(short, long)]
    pub expand: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("arbres: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode, AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config = resolve_config(&args)?;

    arbres::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let mut page = PageState::new(config.reveal());
    let source = HttpSource::new(config.endpoint.clone());

    info!(endpoint = source.endpoint(), "Fetching dataset");
    let ticket = page.begin_load();
    let result = futures_lite::future::block_on(fetch_all(
        &source,
        &config.paginator(),
        ticket.token(),
    ));
    let failed = result.is_err();
    page.finish_load(&ticket, result);

    apply_interactions(&mut page, &args);

    let options = ViewOptions {
        expand_descriptions: args.expand,
        ..ViewOptions::from_config(&config)
    };
    let rendered = render_page(&page, &options);
    std::io::stdout().lock().write_all(rendered.as_bytes())?;

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn resolve_config(args: &Args) -> Result<ResolvedConfig, AppError> {
    let config_file = load_config_with_precedence(args.config.clone())?;
    let merged = merge_config(config_file);
    let with_env = apply_env_overrides(merged);
    Ok(apply_cli_overrides(
        with_env,
        args.endpoint.clone(),
        args.page_size,
    ))
}

/// Replay the command-line "user session" against the page.
fn apply_interactions(page: &mut PageState, args: &Args) {
    if let Some(query) = &args.query {
        page.input(query);
    }

    if let Some(pick) = args.pick {
        let offered = page.suggestions().items().len();
        let pick = pick as usize;
        if pick <= offered {
            for _ in 0..pick {
                page.handle_key(NavKey::Down);
            }
            page.handle_key(NavKey::Enter);
        } else {
            warn!(pick, offered, "Requested suggestion does not exist");
            page.blur();
        }
    }

    for _ in 0..args.more {
        if !page.load_more() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbres::model::Record;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["arbres", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["arbres", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["arbres"]);
        assert_eq!(args.query, None);
        assert_eq!(args.config, None);
        assert_eq!(args.endpoint, None);
        assert_eq!(args.page_size, None);
        assert_eq!(args.more, 0);
        assert_eq!(args.pick, None);
        assert!(!args.expand);
    }

    #[test]
    fn test_query_positional() {
        let args = Args::parse_from(["arbres", "chêne"]);
        assert_eq!(args.query, Some("chêne".to_string()));
    }

    #[test]
    fn test_page_size_rejects_zero() {
        let result = Args::try_parse_from(["arbres", "--page-size", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_pick_rejects_zero() {
        let result = Args::try_parse_from(["arbres", "chene", "--pick", "0"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_combined_flags() {
        let args = Args::parse_from([
            "arbres",
            "platane",
            "--endpoint",
            "https://example.org/records",
            "--page-size",
            "20",
            "-m",
            "3",
            "-p",
            "2",
            "--expand",
        ]);
        assert_eq!(args.query, Some("platane".to_string()));
        assert_eq!(args.endpoint.as_deref(), Some("https://example.org/records"));
        assert_eq!(args.page_size, NonZeroUsize::new(20));
        assert_eq!(args.more, 3);
        assert_eq!(args.pick, Some(2));
        assert!(args.expand);
    }

    fn loaded_page() -> PageState {
        let mut page = PageState::default();
        let ticket = page.begin_load();
        let records = [
            ("Chêne", "Rue A"),
            ("Chêne vert", "Rue B"),
            ("Platane", "Rue C"),
        ]
        .into_iter()
        .map(|(species, address)| Record {
            species: Some(species.to_string()),
            address: Some(address.to_string()),
            ..Record::default()
        })
        .collect();
        page.finish_load(&ticket, Ok(records));
        page
    }

    #[test]
    fn test_pick_selects_nth_suggestion_species() {
        let mut page = loaded_page();
        let args = Args::parse_from(["arbres", "chene", "--pick", "2"]);

        apply_interactions(&mut page, &args);

        assert_eq!(page.query().raw(), "Chêne vert");
        assert_eq!(page.match_count(), 1);
        assert!(page.suggestions().is_empty());
    }

    #[test]
    fn test_pick_out_of_range_keeps_query() {
        let mut page = loaded_page();
        let args = Args::parse_from(["arbres", "chene", "--pick", "5"]);

        apply_interactions(&mut page, &args);

        assert_eq!(page.query().raw(), "chene");
        assert_eq!(page.match_count(), 2);
        assert!(page.suggestions().is_empty());
    }

    #[test]
    fn test_cli_overrides_flow_through_precedence_chain() {
        let args = Args::parse_from([
            "arbres",
            "--config",
            "/nonexistent/arbres/config.toml",
            "--endpoint",
            "https://cli/records",
        ]);

        let config = resolve_config(&args).expect("missing config file is not an error");

        assert_eq!(config.endpoint, "https://cli/records");
    }
}
