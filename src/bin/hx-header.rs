//! CLI tool to show the CSRF header a page would send for a cookie string.
//!
//! Usage:
//!   hx-header '<cookie string>'
//!   hx-header --file cookies.txt
//!   pbpaste | hx-header
//!
//! Prints `X-CSRF-Token: <value>`, or a note when the header is omitted.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use hx_assist::{Config, CookieJar, CsrfInjector, Error, Result};
use log::{LevelFilter, debug};

#[derive(Parser, Debug)]
#[command(name = "hx-header", version, about = "Preview the CSRF header injected into htmx requests")]
struct Args {
    /// Raw cookie string, e.g. "theme=dark; _csrf=abc". Read from stdin if absent.
    cookie: Option<String>,

    /// Read the cookie string from a file instead.
    #[arg(short, long, conflicts_with = "cookie")]
    file: Option<PathBuf>,

    /// Cookie holding the token.
    #[arg(long, default_value = hx_assist::DEFAULT_CSRF_COOKIE)]
    cookie_name: String,

    /// Header to set.
    #[arg(long, default_value = hx_assist::DEFAULT_CSRF_HEADER)]
    header_name: String,

    /// Omit the header when the cookie is missing instead of sending it empty.
    #[arg(long)]
    omit_missing: bool,

    /// Print every parsed cookie as well.
    #[arg(long)]
    dump: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> Result<Config> {
        let mut config = Config::default();
        config.set("csrf-cookie", &self.cookie_name)?;
        config.set("csrf-header", &self.header_name)?;
        if self.omit_missing {
            config.set("csrf-missing", "omit")?;
        }
        if self.verbose {
            config.log_level = LevelFilter::Debug;
        }
        Ok(config)
    }
}

/// Cookie string from the argument, the file, or stdin.
fn read_cookie_source(args: &Args) -> Result<String> {
    if let Some(cookie) = &args.cookie {
        return Ok(cookie.clone());
    }
    if let Some(path) = &args.file {
        debug!("reading cookies from {}", path.display());
        return Ok(fs::read_to_string(path)?.trim_end().to_string());
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf.trim_end().to_string())
}

/// Lines to print for a parsed jar.
fn render(jar: CookieJar, config: &Config, dump: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if dump {
        for (name, value) in jar.iter() {
            match value {
                Some(v) => lines.push(format!("{name} = {v:?}")),
                None => lines.push(format!("{name} (no value)")),
            }
        }
    }

    let injector = CsrfInjector::new(jar, config.csrf.clone());
    let csrf = injector.config();
    match injector.header_value() {
        Some(value) => lines.push(format!("{}: {}", csrf.header_name, value)),
        None => lines.push(format!(
            "{} omitted (cookie '{}' missing)",
            csrf.header_name, csrf.cookie_name
        )),
    }
    lines
}

fn run(args: &Args) -> Result<Vec<String>> {
    let config = args.config()?;
    env_logger::Builder::new()
        .filter_level(config.log_level)
        .try_init()
        .map_err(|e| Error::Config(e.to_string()))?;

    let raw = read_cookie_source(args)?;
    let jar = CookieJar::parse(&raw);
    debug!("parsed {} cookies", jar.len());
    Ok(render(jar, &config, args.dump))
}

fn main() {
    let args = Args::parse();
    match run(&args) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
