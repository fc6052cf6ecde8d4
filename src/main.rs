//! Command-line lookup of translation strings.

use std::path::PathBuf;

use anyhow::{
    Context,
    Result,
};
use clap::Parser;
use json_i18n::config::load_settings;
use json_i18n::{
    FormatArg,
    FormatArgs,
    Settings,
    TranslationStore,
};
use serde_json::Value;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(author, version, about = "Look up a translation in JSON i18n resources", long_about = None)]
struct Arguments {
    /// Resource file to load (repeatable)
    #[arg(short, long = "resource", value_name = "FILE")]
    resources: Vec<PathBuf>,

    /// Inline JSON resource to load after the files (repeatable)
    #[arg(long = "json", value_name = "TEXT")]
    json: Vec<String>,

    /// Output locale (defaults to the default locale)
    #[arg(short, long)]
    locale: Option<String>,

    /// Default locale of the store (defaults to --locale)
    #[arg(long)]
    default_locale: Option<String>,

    /// Settings file (`{"strict": false}`)
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Return the key itself for missing keys
    #[arg(long)]
    lenient: bool,

    /// Key to translate
    key: String,

    /// Values substituted into the translation; JSON numbers stay numeric
    args: Vec<String>,
}

impl Arguments {
    /// Positional values shaped as format arguments.
    fn format_args(&self) -> FormatArgs {
        let mut args: Vec<FormatArg> = self.args.iter().map(|arg| parse_arg(arg)).collect();
        match args.len() {
            0 => FormatArgs::None,
            1 => args.pop().map_or(FormatArgs::None, FormatArgs::One),
            _ => FormatArgs::Many(args),
        }
    }
}

/// JSON numbers become numeric arguments, anything else text.
fn parse_arg(arg: &str) -> FormatArg {
    serde_json::from_str::<Value>(arg)
        .ok()
        .filter(Value::is_number)
        .and_then(|value| FormatArg::try_from(&value).ok())
        .unwrap_or_else(|| FormatArg::from(arg))
}

/// Store with the requested settings and every resource loaded.
fn build_store(args: &Arguments) -> Result<TranslationStore> {
    let language = args
        .default_locale
        .as_deref()
        .or(args.locale.as_deref())
        .context("either --locale or --default-locale is required")?;
    let mut store = TranslationStore::new(language)?;

    let mut settings = match &args.settings {
        Some(path) => load_settings(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?
            .unwrap_or_default(),
        None => Settings::default(),
    };
    if args.lenient {
        settings = Settings::lenient();
    }
    store.set_settings(settings);

    for path in &args.resources {
        store
            .add_resource(path.clone())
            .with_context(|| format!("failed to load resource {}", path.display()))?;
    }
    for text in &args.json {
        store.add_resource_str(text, "json").context("failed to load inline resource")?;
    }
    Ok(store)
}

/// Looks up one key and prints its translation.
#[allow(clippy::print_stdout)]
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Arguments::parse();
    let store = build_store(&args)?;
    let locale = args.locale.as_deref();

    let text = if args.args.is_empty() {
        store.translate(&args.key, locale)?.to_string()
    } else {
        store.translate_formatted(&args.key, args.format_args(), locale)?
    };
    println!("{text}");
    Ok(())
}
