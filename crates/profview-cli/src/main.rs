//! profview: named profile views and shareable view URLs.
//!
//! This binary manages the view settings of a profile viewer from the
//! command line.  It can print the URL that reproduces a view, apply a
//! bookmarked URL, save and remove named views, and render the view menu the
//! web UI shows.
//!
//! # Usage
//!
//! ```text
//! profview [OPTIONS] <COMMAND>
//!
//! Commands:
//!   show              Print every view option and its value
//!   url               Print the page URL for the current view
//!   apply <URL>       Apply a view URL, then print the resulting options
//!   save <URL>        Save the view at URL under its `config=` name
//!   remove <NAME>     Delete a named view
//!   list              List named views with their URLs
//!   menu              Print the view menu as JSON
//!   fields [PREFIX]   List option names, or complete a prefix
//!
//! Options:
//!   -o, --option <NAME[=VALUE]>  Set a view option before running (repeatable)
//!       --settings <PATH>        Settings file [env: PROFVIEW_SETTINGS]
//!       --tool-config <PATH>     Tool config file [env: PROFVIEW_CONFIG]
//! ```
//!
//! A bare `-o NAME` is shorthand for `-o NAME=true` and is only accepted for
//! boolean options and multi-choice values (`-o cum` selects cumulative
//! sort).
//!
//! # Settings file resolution
//!
//! 1. `--settings` / `PROFVIEW_SETTINGS`
//! 2. `[general] settings_file` in the tool config
//! 3. `<platform config dir>/profview/settings.json`
//!
//! Logs go to stderr; `RUST_LOG` overrides the tool config's `log_level`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use url::Url;

use profview_cli::application::current_config::CurrentConfig;
use profview_cli::application::named_configs::NamedConfigs;
use profview_cli::infrastructure::storage::app_config::{
    app_config_file_path, load_app_config, AppConfig,
};
use profview_cli::infrastructure::storage::settings_file::JsonSettingsFile;
use profview_core::{decode_from_url, encode_to_url, FieldRegistry, QueryParams};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Named profile views and shareable view URLs.
#[derive(Debug, Parser)]
#[command(name = "profview", about = "Manage profile viewer views and view URLs", version)]
struct Cli {
    /// Path of the JSON settings file holding named views.
    #[arg(long, env = "PROFVIEW_SETTINGS")]
    settings: Option<PathBuf>,

    /// Path of the TOML file configuring this tool.
    #[arg(long, env = "PROFVIEW_CONFIG")]
    tool_config: Option<PathBuf>,

    /// Set a view option, e.g. `-o nodecount=40` or `-o cum`.
    #[arg(short = 'o', long = "option", value_name = "NAME[=VALUE]")]
    options: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every view option and its value.
    Show,
    /// Print the page URL for the current view.
    Url {
        /// Page URL to encode against; defaults to `[web] base_url`.
        #[arg(long)]
        base: Option<String>,
    },
    /// Apply a view URL, then print the resulting options.
    Apply { url: String },
    /// Save the view at URL under the name given by its `config` parameter.
    Save { url: String },
    /// Delete a named view.
    Remove { name: String },
    /// List named views with their URLs.
    List,
    /// Print the view menu for a page as JSON.
    Menu {
        /// Page URL the menu is built for; defaults to `[web] base_url`.
        #[arg(long)]
        url: Option<String>,
    },
    /// List option names, or the names completing PREFIX.
    Fields { prefix: Option<String> },
}

/// Splits a `-o` argument into option name and value.
///
/// A bare name means `name=true` and is only valid for names that can act as
/// a flag.
fn parse_assignment<'a>(
    registry: &FieldRegistry,
    raw: &'a str,
) -> anyhow::Result<(&'a str, &'a str)> {
    if let Some((name, value)) = raw.split_once('=') {
        return Ok((name.trim(), value.trim()));
    }
    let name = raw.trim();
    if registry.is_bool_config(name) {
        Ok((name, "true"))
    } else if registry.is_configurable(name) {
        bail!("option {name:?} needs a value: -o {name}=VALUE")
    } else {
        bail!("unknown option {name:?}")
    }
}

fn parse_url(raw: &str) -> anyhow::Result<Url> {
    Url::parse(raw).with_context(|| format!("invalid URL: '{raw}'"))
}

fn print_options(current: &CurrentConfig) {
    let cfg = current.read();
    for field in current.registry().fields() {
        println!("{} = {}", field.name(), field.get(&cfg));
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ── Tool configuration ────────────────────────────────────────────────────
    let app_config = match cli.tool_config.clone().or_else(app_config_file_path) {
        Some(path) => load_app_config(&path)
            .with_context(|| format!("failed to load tool config {}", path.display()))?,
        None => AppConfig::default(),
    };

    // ── Logging setup ─────────────────────────────────────────────────────────
    //
    // `RUST_LOG` wins over the configured level.  Output goes to stderr so
    // that stdout carries only command results.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&app_config.general.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // ── Shared state ──────────────────────────────────────────────────────────
    let registry = Arc::new(FieldRegistry::new());
    let current = Arc::new(CurrentConfig::new(Arc::clone(&registry)));
    for raw in &cli.options {
        let (name, value) = parse_assignment(&registry, raw)?;
        current
            .configure(name, value)
            .with_context(|| format!("invalid option -o {raw}"))?;
    }

    let settings_path = match cli.settings.clone().or(app_config.general.settings_file.clone()) {
        Some(path) => path,
        None => JsonSettingsFile::at_default_location()
            .context("no settings file given and no platform config directory")?
            .path()
            .to_path_buf(),
    };
    debug!(settings = %settings_path.display(), "using settings file");
    let named = NamedConfigs::new(JsonSettingsFile::new(&settings_path), Arc::clone(&current));
    let base_url = || parse_url(&app_config.web.base_url);

    // ── Commands ──────────────────────────────────────────────────────────────
    match cli.command {
        Command::Show => print_options(&current),
        Command::Url { base } => {
            let base = match base {
                Some(raw) => parse_url(&raw)?,
                None => base_url()?,
            };
            let (url, _) = encode_to_url(&current.read(), &registry, &base);
            println!("{url}");
        }
        Command::Apply { url } => {
            let url = parse_url(&url)?;
            let mut cfg = current.read();
            decode_from_url(&mut cfg, &registry, &QueryParams::from_url(&url))?;
            current.replace(cfg);
            print_options(&current);
        }
        Command::Save { url } => {
            named
                .save_from_request(&parse_url(&url)?)
                .with_context(|| format!("failed to save view from {url}"))?;
        }
        Command::Remove { name } => {
            named
                .remove(&name)
                .with_context(|| format!("failed to remove view {name:?}"))?;
        }
        Command::List => {
            let base = base_url()?;
            for entry in named.list().context("failed to read named views")? {
                let (url, _) = encode_to_url(&entry.config, &registry, &base);
                println!("{}\t{url}", entry.name);
            }
        }
        Command::Menu { url } => {
            let page = match url {
                Some(raw) => parse_url(&raw)?,
                None => base_url()?,
            };
            let menu = named.menu(&page);
            println!("{}", serde_json::to_string_pretty(&menu)?);
        }
        Command::Fields { prefix: Some(prefix) } => {
            for name in registry.complete(&prefix) {
                println!("{name}");
            }
        }
        Command::Fields { prefix: None } => {
            for field in registry.fields() {
                let param = field.url_param().unwrap_or("-");
                let kind = if field.is_saved() { "saved" } else { "transient" };
                println!("{}\t{param}\t{kind}\t{}", field.name(), field.kind());
            }
        }
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
