use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use folio_cli::Cli;
use folio_lib::markdown::Markdown;
use folio_lib::markdown::highlighting::{ColorMode, ThemePair, detect_theme};
use folio_lib::markdown::meta::BlockMeta;
use folio_lib::markdown::output::{HeadingEntry, wrap_document};
use folio_lib::markdown::slug::slugify;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber based on verbosity level.
///
/// Verbosity levels:
/// - 0 (default): no subscriber
/// - 1 (-v): INFO
/// - 2 (-vv): DEBUG (one event per code block)
/// - 3 (-vvv): TRACE (tokenizer detail)
/// - 4+ (-vvvv): TRACE with file/line numbers
fn init_tracing(verbose: u8) {
    if verbose == 0 {
        return;
    }

    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            1 => "warn,folio=info,folio_lib=info".to_string(),
            2 => "info,folio=debug,folio_lib=debug".to_string(),
            _ => "debug,folio=trace,folio_lib=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_file(verbose >= 4)
                .with_line_number(verbose >= 4)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Modes that need no input
    if cli.list_themes {
        list_themes();
        return Ok(());
    }

    if let Some(ref text) = cli.slug {
        println!("{}", slugify(text));
        return Ok(());
    }

    let md = load_markdown(cli.input.as_ref())?;
    tracing::info!(bytes = md.content().len(), "Loaded document");

    if cli.headings {
        if cli.json {
            println!("{}", md.headings_json()?);
        } else {
            print_headings(&md.headings());
        }
        return Ok(());
    }

    if cli.blocks {
        if cli.json {
            println!("{}", md.code_blocks_json()?);
        } else {
            print_blocks(&md.code_blocks());
        }
        return Ok(());
    }

    let options = cli.html_options(detect_theme());
    let mut html = String::new();
    md.write_html(&mut html, &options)
        .context("Failed to render HTML")?;

    if cli.show_html {
        let doc = wrap_document(&document_title(&md, cli.input.as_deref()), &html);
        let temp_path = std::env::temp_dir().join("folio-preview.html");
        std::fs::write(&temp_path, &doc).wrap_err("Failed to write temp HTML file")?;

        // Non-blocking open, graceful error handling
        if let Err(e) = open::that(&temp_path) {
            eprintln!("Failed to open browser: {}", e);
            eprintln!("Preview available at: {}", temp_path.display());
        }
        return Ok(());
    }

    let output = if cli.standalone {
        wrap_document(&document_title(&md, cli.input.as_deref()), &html)
    } else {
        html
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(output.as_bytes())
        .wrap_err("Failed to write to stdout")?;

    Ok(())
}

/// Loads markdown from a file path or stdin.
fn load_markdown(path: Option<&PathBuf>) -> Result<Markdown> {
    if let Some(p) = path {
        if p.to_str() == Some("-") {
            // Explicit stdin marker
            read_from_stdin()
        } else {
            Markdown::try_from(p.as_path()).wrap_err_with(|| format!("Failed to read file: {:?}", p))
        }
    } else if atty::is(atty::Stream::Stdin) {
        // Interactive terminal - no input available
        Err(eyre!("No input file provided. Use `folio --help` for usage."))
    } else {
        read_from_stdin()
    }
}

/// Reads markdown content from stdin.
fn read_from_stdin() -> Result<Markdown> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .wrap_err("Failed to read from stdin")?;
    Ok(buffer.into())
}

/// Title for standalone output: first heading, then file stem.
fn document_title(md: &Markdown, path: Option<&Path>) -> String {
    md.headings()
        .into_iter()
        .next()
        .map(|h| h.text)
        .or_else(|| {
            path.and_then(|p| p.file_stem())
                .map(|stem| stem.to_string_lossy().into_owned())
                .filter(|stem| stem != "-")
        })
        .unwrap_or_else(|| "folio".to_string())
}

/// Lists all available themes with descriptions.
fn list_themes() {
    println!("Available themes:\n");
    for theme_pair in ThemePair::all() {
        println!(
            "  {:14} {} / {}",
            theme_pair.kebab_name(),
            theme_pair.description(ColorMode::Dark),
            theme_pair.description(ColorMode::Light)
        );
    }
    println!("\nUse --theme <name> or set FOLIO_THEME to pick one");
}

fn print_headings(headings: &[HeadingEntry]) {
    for heading in headings {
        let indent = "  ".repeat(usize::from(heading.level.saturating_sub(1)));
        println!("{indent}{} #{}", heading.text, heading.slug);
    }
}

fn print_blocks(blocks: &[BlockMeta]) {
    for (idx, block) in blocks.iter().enumerate() {
        let flag = |value: Option<bool>| match value {
            Some(true) => "yes",
            Some(false) => "no",
            None => "default",
        };
        println!(
            "{}. {} [{}] lines={} line-numbers={} copy={}",
            idx + 1,
            block.label(),
            block.resolved_lang(),
            block.raw_code().lines().count(),
            flag(block.display_line_numbers),
            flag(block.allow_copy)
        );
    }
}
