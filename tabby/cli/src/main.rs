//! Table rendering CLI.
//!
//! Reads rows from a file or stdin and prints them as a text table:
//! - Tab (or any single character) delimited text, one row per line
//! - A JSON array of arrays with `--json`
//!
//! Settings come from an optional YAML/JSON config file, then the flags.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use color_eyre::eyre::{Context, eyre};
use tabby::{ColumnType, HorizontalAlign, StyleSpec, Table, TableConfig, Value, VerticalAlign};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Width used when stdout is not a terminal.
const FALLBACK_WIDTH: usize = 80;

/// Render delimited or JSON rows as a text table
#[derive(Parser, Debug)]
#[command(name = "tabby")]
#[command(author, version, about = "Render delimited or JSON rows as a text table")]
#[command(after_help = "\
EXAMPLES:
  ps aux | tr -s ' ' '\\t' | tabby --style round
  tabby --delimiter , --align l,r,r data.csv
  tabby --json --dtype t,f --precision 2 rows.json
  tabby --style '-,|,+,=' data.tsv
  tabby --list-styles
")]
struct Args {
    /// Input file (reads stdin when omitted or `-`)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Field delimiter for text input
    #[arg(short, long, default_value = "\t", hide_default_value = true)]
    delimiter: char,

    /// Input is a JSON array of arrays
    #[arg(long)]
    json: bool,

    /// Treat the first row as data instead of a header
    #[arg(long)]
    no_header: bool,

    /// Border style name (see --list-styles) or a comma separated list of 4 or 15 glyphs
    #[arg(short, long, value_parser = parse_style, allow_hyphen_values = true)]
    style: Option<StyleSpec>,

    /// Maximum table width; 0 is unbounded [default: terminal width]
    #[arg(short = 'w', long)]
    max_width: Option<usize>,

    /// Spaces between cell content and lines
    #[arg(short, long)]
    padding: Option<usize>,

    /// Digits after the decimal point for numeric columns
    #[arg(long)]
    precision: Option<usize>,

    /// Per-column alignment, comma separated (l, c, r)
    #[arg(long, value_delimiter = ',')]
    align: Vec<HorizontalAlign>,

    /// Per-column header alignment, comma separated (l, c, r)
    #[arg(long, value_delimiter = ',')]
    header_align: Vec<HorizontalAlign>,

    /// Per-column vertical alignment, comma separated (t, m, b)
    #[arg(long, value_delimiter = ',')]
    valign: Vec<VerticalAlign>,

    /// Per-column format, comma separated (t, i, I, f, e, a)
    #[arg(long, value_delimiter = ',')]
    dtype: Vec<ColumnType>,

    /// YAML or JSON file with table settings
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log layout decisions to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Print a sample table in every built-in style and exit
    #[arg(long)]
    list_styles: bool,

    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_tracing(args.verbose);

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "tabby", &mut std::io::stdout());
        return Ok(());
    }
    if args.list_styles {
        println!("{}", tabby::gallery::style_gallery()?);
        return Ok(());
    }

    let config = resolve_config(&args)?;
    let input = read_input(args.file.as_deref())?;
    let rows = if args.json {
        parse_json(&input)?
    } else {
        parse_delimited(&input, args.delimiter)
    };
    debug!(rows = rows.len(), "parsed input");

    let mut table = Table::new();
    table.apply_config(&config)?;
    table
        .add_rows(rows, !args.no_header)
        .wrap_err("input rows must all have the same number of fields")?;

    if let Some(out) = table.draw()? {
        println!("{out}");
    }
    Ok(())
}

/// Logs to stderr when `--verbose` or `RUST_LOG` asks for it.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("tabby=debug")
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Config file settings with the command line flags layered on top.
fn resolve_config(args: &Args) -> color_eyre::Result<TableConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => TableConfig::default(),
    };

    if let Some(style) = &args.style {
        config.style = Some(style.clone());
    }
    if args.max_width.is_some() {
        config.max_width = args.max_width;
    }
    if config.max_width.is_none() {
        config.max_width = Some(terminal_width());
    }
    if args.padding.is_some() {
        config.padding = args.padding;
    }
    if args.precision.is_some() {
        config.precision = args.precision;
    }
    if !args.align.is_empty() {
        config.align = Some(args.align.clone());
    }
    if !args.header_align.is_empty() {
        config.header_align = Some(args.header_align.clone());
    }
    if !args.valign.is_empty() {
        config.valign = Some(args.valign.clone());
    }
    if !args.dtype.is_empty() {
        config.dtype = Some(args.dtype.clone());
    }

    debug!(?config, "resolved table settings");
    Ok(config)
}

/// A glyph list when the value has commas, a style name otherwise.
///
/// The glyph count is checked when the style is applied, so a bad count
/// reports the same error as a config file would.
fn parse_style(value: &str) -> Result<StyleSpec, String> {
    if value.is_empty() {
        return Err("style must not be empty".to_string());
    }
    if value.contains(',') {
        Ok(StyleSpec::Glyphs(value.split(',').map(str::to_string).collect()))
    } else {
        Ok(StyleSpec::Named(value.to_string()))
    }
}

fn load_config(path: &Path) -> color_eyre::Result<TableConfig> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;

    let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        serde_json::from_str(&text).map_err(|e| eyre!(e))
    } else {
        serde_yaml::from_str(&text).map_err(|e| eyre!(e))
    };
    config.wrap_err_with(|| format!("invalid config file {}", path.display()))
}

fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| usize::from(w))
        .unwrap_or(FALLBACK_WIDTH)
}

fn read_input(file: Option<&Path>) -> color_eyre::Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display())),
        _ => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .wrap_err("failed to read stdin")?;
            Ok(input)
        }
    }
}

/// One row per non-empty line, split on `delimiter`.
fn parse_delimited(input: &str, delimiter: char) -> Vec<Vec<Value>> {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split(delimiter).map(Value::from).collect())
        .collect()
}

fn parse_json(input: &str) -> color_eyre::Result<Vec<Vec<Value>>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(input).wrap_err("JSON input must be an array of arrays")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delimited_skips_blank_lines() {
        let rows = parse_delimited("a\tb\n\n1\t2\n", '\t');
        assert_eq!(
            rows,
            vec![
                vec![Value::from("a"), Value::from("b")],
                vec![Value::from("1"), Value::from("2")],
            ]
        );
    }

    #[test]
    fn test_parse_delimited_custom_delimiter() {
        let rows = parse_delimited("x,y,z", ',');
        assert_eq!(rows[0].len(), 3);
    }

    #[test]
    fn test_parse_json_values() {
        let rows = parse_json(r#"[["n", "v"], ["a", 1.5], ["b", null]]"#).unwrap();
        assert_eq!(rows[1][1], Value::Float(1.5));
        assert_eq!(rows[2][1], Value::Null);
        assert!(parse_json("{}").is_err());
        assert!(parse_json("  ").unwrap().is_empty());
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from(["tabby", "--style", "ascii", "--max-width", "0", "--align", "l,r"]);
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.style, Some("ascii".into()));
        assert_eq!(config.max_width, Some(0));
        assert_eq!(config.align, Some(vec![HorizontalAlign::Left, HorizontalAlign::Right]));
    }

    #[test]
    fn test_style_accepts_glyph_lists() {
        assert_eq!(parse_style("round"), Ok(StyleSpec::from("round")));
        assert_eq!(parse_style("-,|,+,="), Ok(StyleSpec::from(["-", "|", "+", "="])));

        let light2 = "─,│,┌,┐,└,┘,├,┤,┬,┴,┼,═,╞,╡,╪";
        let Ok(StyleSpec::Glyphs(glyphs)) = parse_style(light2) else {
            panic!("expected a glyph list");
        };
        assert_eq!(glyphs.len(), 15);
        assert_eq!(glyphs[8], "┬");
        assert!(parse_style("").is_err());
    }

    #[test]
    fn test_args_are_well_formed() {
        Args::command().debug_assert();
    }
}
