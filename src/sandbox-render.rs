use anyhow::{Context, Result};
use cryptodash::{
    env_locale, ContainerId, ContentCatalog, Dashboard, DashboardConfig, Language, MemoryDocument, PreferenceStore,
    StaticSignals, Theme,
};
use std::env;
use std::path::PathBuf;

#[derive(Default)]
struct Config {
    language: Option<Language>,
    theme: Option<Theme>,
    topic: Option<usize>,
    catalog_file: Option<PathBuf>,
    output_file: Option<String>,
}

fn next_value<'a>(args: &'a [String], i: &mut usize, flag: &str, what: &str) -> Result<&'a str> {
    *i += 1;
    match args.get(*i) {
        Some(value) => Ok(value),
        None => anyhow::bail!("{} requires {}", flag, what),
    }
}

fn parse_args(args: &[String]) -> Result<Config> {
    let mut config = Config::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-lang" => {
                let token = next_value(args, &mut i, "-lang", "es or en")?;
                config.language =
                    Some(Language::from_token(token).with_context(|| format!("unknown language: {}", token))?);
            }
            "-theme" => {
                let token = next_value(args, &mut i, "-theme", "claro or oscuro")?;
                config.theme = Some(Theme::from_token(token).with_context(|| format!("unknown theme: {}", token))?);
            }
            "-topic" => {
                config.topic = Some(next_value(args, &mut i, "-topic", "a topic index")?.parse()?);
            }
            "-catalog" => {
                config.catalog_file = Some(PathBuf::from(next_value(args, &mut i, "-catalog", "a file path")?));
            }
            "-out" => {
                config.output_file = Some(next_value(args, &mut i, "-out", "a file path")?.to_string());
            }
            "-h" | "-help" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {
                eprintln!("Warning: Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    Ok(config)
}

fn print_help() {
    println!("Educational Sandbox Renderer");
    println!("Usage: sandbox-render [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -lang <es|en>            Display language (default: from LANG, else es)");
    println!("  -theme <claro|oscuro>    Theme palette (default: oscuro)");
    println!("  -topic <N>               Expand topic N below the topic grid");
    println!("  -catalog <FILE>          Load topics from a JSON file instead of the built-in ones");
    println!("  -out <FILE>              Output file path (default: sandbox.html)");
    println!("  -h, -help, --help        Show this help message");
}

fn main() -> Result<()> {
    cryptodash::logging::init();

    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args)?;

    let document = render_document(&config)?;
    let output_path = config.output_file.clone().unwrap_or_else(|| "sandbox.html".to_string());
    std::fs::write(&output_path, render_page(&document))
        .with_context(|| format!("Failed to write {}", output_path))?;

    println!("Sandbox written to: {}", output_path);
    Ok(())
}

/// Runs the dashboard against an in-memory document with the requested preferences
fn render_document(config: &Config) -> Result<MemoryDocument> {
    let mut preferences = PreferenceStore::in_memory(&StaticSignals::new(false, env_locale()));
    if let Some(theme) = config.theme {
        preferences.persist_theme(theme);
    }
    if let Some(language) = config.language {
        preferences.persist_language(language);
    }

    let catalog = match &config.catalog_file {
        Some(path) => ContentCatalog::from_file(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => ContentCatalog::builtin(),
    };

    let mut dashboard = Dashboard::new(MemoryDocument::new(), preferences, DashboardConfig::default())
        .with_catalog(catalog);
    dashboard.start();

    if let Some(index) = config.topic {
        let count = dashboard.catalog().topics().len();
        if dashboard.select_topic(index).is_none() {
            anyhow::bail!("topic {} does not exist (catalog has {} topics)", index, count);
        }
    }

    Ok(dashboard.surface().clone())
}

/// Standalone HTML page holding the document's style variables and containers
fn render_page(doc: &MemoryDocument) -> String {
    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str(&format!("<title>{}</title>\n", cryptodash::formatting::escape_html(doc.title())));
    page.push_str("<style>\n:root {\n");
    for (name, value) in doc.style_properties() {
        page.push_str(&format!("  {}: {};\n", name, value));
    }
    page.push_str("}\nbody { background: var(--bg-dark); color: var(--text-primary); }\n</style>\n");
    page.push_str("</head>\n<body>\n");

    for container in [ContainerId::SandboxTopics, ContainerId::SandboxContent] {
        let display = if container == ContainerId::SandboxTopics || doc.is_container_visible(container) {
            "block"
        } else {
            "none"
        };
        page.push_str(&format!(
            "<div id=\"{}\" style=\"display: {}\">\n{}\n</div>\n",
            container.element_id(),
            display,
            doc.container_html(container)
        ));
    }

    page.push_str("</body>\n</html>\n");
    page
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("sandbox-render").chain(list.iter().copied()).map(String::from).collect()
    }

    #[test]
    fn test_parse_args() {
        let config = parse_args(&args(&["-lang", "en", "-theme", "claro", "-topic", "2", "-out", "x.html"])).unwrap();
        assert_eq!(config.language, Some(Language::En));
        assert_eq!(config.theme, Some(Theme::Light));
        assert_eq!(config.topic, Some(2));
        assert_eq!(config.output_file.as_deref(), Some("x.html"));
    }

    #[test]
    fn test_parse_args_rejects_unknown_tokens() {
        assert!(parse_args(&args(&["-theme", "sepia"])).is_err());
        assert!(parse_args(&args(&["-lang"])).is_err());
    }

    #[test]
    fn test_render_selected_topic() {
        let config = Config {
            language: Some(Language::En),
            theme: Some(Theme::Light),
            topic: Some(0),
            ..Config::default()
        };
        let page = render_page(&render_document(&config).unwrap());

        assert!(page.contains("<title>Crypto Analyzer Pro</title>"));
        assert!(page.contains("--bg-dark: #ffffff;"));
        assert!(page.contains("<div id=\"sandbox-content\" style=\"display: block\">"));
        assert!(page.contains("Practical example"));
    }

    #[test]
    fn test_unknown_topic_is_an_error() {
        let config = Config {
            topic: Some(99),
            ..Config::default()
        };
        assert!(render_document(&config).is_err());
    }
}
