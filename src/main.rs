use std::io::Read;

use anyhow::{bail, Context, Result};
use clap::Parser as _;
use sqltools::{Parser, Scanner, Stmt};
use tracing::{debug, trace, Level};
use tracing_subscriber::FmtSubscriber;

/// Parse SELECT and ALTER TABLE statements and print them back
#[derive(clap::Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// The input file (- is interpreted as stdin)
    #[arg(default_value = "-")]
    input: String,

    /// Parse every `;`-separated statement instead of only the first
    #[arg(long)]
    all: bool,

    /// Print the token stream instead of the statements
    #[arg(long, conflicts_with = "ast")]
    tokens: bool,

    /// Print the syntax tree instead of SQL
    #[arg(long)]
    ast: bool,

    /// Raise the log level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

fn init_subscriber(level: Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .finish();
    // Only fails when a subscriber is already installed.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        debug!("reading from stdin");
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("read stdin")?;
        Ok(buffer)
    } else {
        debug!(path = input, "reading from file");
        std::fs::read_to_string(input).with_context(|| format!("read {input}"))
    }
}

fn render(stmt: &Stmt, ast: bool) -> String {
    if ast {
        format!("{stmt:#?}")
    } else {
        format!("{stmt};")
    }
}

fn run(cli: &Cli, src: &str) -> Result<String> {
    if cli.tokens {
        let lines: Vec<String> = Scanner::new(src)
            .tokens()
            .inspect(|token| trace!(%token, "scanned"))
            .map(|token| token.to_string())
            .collect();
        return Ok(lines.join("\n"));
    }

    let mut parser = Parser::new(src);
    let stmts = if cli.all {
        parser.parse_all().context("parse statements")?
    } else {
        vec![parser.parse().context("parse statement")?]
    };
    if stmts.is_empty() {
        bail!("no statements in {}", cli.input);
    }
    debug!(count = stmts.len(), "parsed");

    let rendered: Vec<String> = stmts.iter().map(|stmt| render(stmt, cli.ast)).collect();
    Ok(rendered.join("\n"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_subscriber(cli.level());

    let src = read_input(&cli.input)?;
    let output = run(&cli, &src)?;
    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser as _;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sqltools").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = cli(&[]);
        assert_eq!(cli.input, "-");
        assert!(!cli.all);
        assert_eq!(cli.level(), Level::WARN);
        assert_eq!(self::cli(&["-vv"]).level(), Level::TRACE);
    }

    #[test]
    fn test_tokens_conflicts_with_ast() {
        let args = ["sqltools", "--tokens", "--ast"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_run_single_statement() {
        let output = run(&cli(&[]), "select a from t; garbage").unwrap();
        assert_eq!(output, "SELECT a FROM t;");
    }

    #[test]
    fn test_run_all() {
        let src = "select a from t;\nalter table t drop column a";
        let output = run(&cli(&["--all"]), src).unwrap();
        assert_eq!(output, "SELECT a FROM t;\nALTER TABLE t DROP COLUMN a;");
        assert!(run(&cli(&["--all"]), " ; ").is_err());
    }

    #[test]
    fn test_run_tokens() {
        let output = run(&cli(&["--tokens"]), "SELECT *").unwrap();
        assert_eq!(output, "SELECT \"SELECT\"\nWS \" \"\n* \"*\"");
    }

    #[test]
    fn test_run_reports_parse_error() {
        let err = run(&cli(&[]), "SELECT !").unwrap_err();
        assert_eq!(err.to_string(), "parse statement");
        assert_eq!(err.root_cause().to_string(), r#"found "!", expected field"#);
    }
}
