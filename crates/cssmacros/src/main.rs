//! cssmacros - expand CSS macro blocks from the command line
//!
//! Usage: cssmacros [OPTIONS] <SHEET>...

use std::process::ExitCode;

use clap::Parser;
use log::error;
use serde::Serialize;
use url::Url;

use cssmacros_core::{MacroContext, MacroMap, MemorySheet, StyleTarget, StylesheetList};
use cssmacros_net::{ClientConfig, SourceLoader};

#[derive(Parser, Debug)]
#[command(name = "cssmacros")]
#[command(version)]
#[command(about = "Expand @macros and @global-macros blocks in stylesheets", long_about = None)]
struct Cli {
    /// Stylesheet URLs or paths, in cascade order
    #[arg(required = true, value_name = "SHEET")]
    sheets: Vec<String>,

    /// Redefine a macro after loading (repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    assignments: Vec<(String, String)>,

    /// Apply --set to this sheet only, addressed by file name
    #[arg(long, value_name = "NAME")]
    sheet: Option<String>,

    /// Print the value of a macro (repeatable)
    #[arg(long = "get", value_name = "NAME")]
    lookups: Vec<String>,

    /// Base URL for relative sheet identifiers
    #[arg(long)]
    base: Option<Url>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = ClientConfig::default().timeout_secs)]
    timeout: u64,

    /// Print a JSON report instead of CSS
    #[arg(long)]
    json: bool,
}

/// Parse a `NAME=VALUE` macro assignment
fn parse_assignment(arg: &str) -> Result<(String, String), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", arg))?;
    let name = name.trim();
    if name.is_empty() {
        return Err("macro name must not be empty".to_string());
    }
    Ok((name.to_string(), value.trim().to_string()))
}

#[derive(Serialize)]
struct SheetReport<'a> {
    href: Option<&'a str>,
    processed: bool,
    macros: Option<&'a MacroMap>,
    rules: &'a [String],
}

#[derive(Serialize)]
struct Report<'a> {
    globals: MacroMap,
    sheets: Vec<SheetReport<'a>>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = ClientConfig {
        timeout_secs: cli.timeout,
        ..ClientConfig::default()
    };
    let mut loader = SourceLoader::with_config(config)?;
    if let Some(base) = cli.base.clone() {
        loader = loader.with_base(base);
    }

    let context = MacroContext::new();
    let sources = loader.load_all(&cli.sheets).await;
    let mut sheets = StylesheetList::new(cli.sheets.iter().map(MemorySheet::new).collect());
    let summary = sheets.process_sources(&context, sources);

    if summary.processed == 0 {
        error!("No stylesheet could be loaded");
        return Ok(ExitCode::FAILURE);
    }

    for (name, value) in &cli.assignments {
        match &cli.sheet {
            Some(sheet) => sheets.set_macro(sheet, name, value)?,
            None => {
                sheets.set_macro_for_all(name, value);
            }
        }
    }

    for name in &cli.lookups {
        let value = match &cli.sheet {
            Some(sheet) => sheets.get_macro(sheet, name),
            None => sheets.find_macro(name),
        };
        match value {
            Some(value) => println!("{}: {}", name, value),
            None => println!("{}: (undefined)", name),
        }
    }

    if cli.json {
        println!("{}", render_json(&context, &sheets)?);
    } else if cli.lookups.is_empty() {
        print!("{}", render_css(&sheets));
    }

    Ok(ExitCode::SUCCESS)
}

/// Expanded rules of every sheet, one rule per line
fn render_css(sheets: &StylesheetList<MemorySheet>) -> String {
    let mut out = String::new();
    for sheet in sheets.targets() {
        if sheet.state().is_none() {
            continue;
        }
        out.push_str(&format!("/* {} */\n", sheet.href().unwrap_or("<inline>")));
        for rule in sheet.rules() {
            out.push_str(rule);
            out.push('\n');
        }
    }
    out
}

fn render_json(
    context: &MacroContext,
    sheets: &StylesheetList<MemorySheet>,
) -> serde_json::Result<String> {
    let report = Report {
        globals: context.globals().snapshot(),
        sheets: sheets
            .targets()
            .iter()
            .map(|sheet| SheetReport {
                href: sheet.href(),
                processed: sheet.state().is_some(),
                macros: sheet.macros(),
                rules: sheet.rules(),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&report)
}
