use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use level_core::config::{AnalyzerConfig, DictionaryRegistry};
use level_core::core::universe::LevelUniverse;
use level_core::export::SummaryRow;
use level_core::persistence::{save_snapshot, save_text};
use level_core::prep::{clean_tokens, parse_segmented, render_segmented, PosOverrides};
use level_core::{
    Document, DocumentReport, LevelAnalyzer, LevelDictionary, LevelError, SelectedLevels,
    WordListFamily,
};
use std::error::Error;
use std::fs;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "level_stats",
    about = "Counts HSK/YCT vocabulary levels in segmented Chinese text"
)]
struct Args {
    /// JSON config file (word-list paths, POS overrides, output separator).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze pre-tagged documents (`word_pos` or `word/pos` items).
    Analyze {
        /// Word list: new_hsk, old_hsk or yct.
        #[arg(short, long, default_value = "new_hsk")]
        list: WordListFamily,

        /// Comma-separated levels to count. Defaults to every level of the list.
        #[arg(short = 'L', long, value_delimiter = ',')]
        levels: Vec<String>,

        /// Also write each document's tagged tokens to `<DIR>/<stem>_seg.txt`.
        #[arg(long, value_name = "DIR")]
        segmented_out: Option<PathBuf>,

        /// Styled terminal summary instead of JSON Lines.
        #[arg(long)]
        pretty: bool,

        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// List the levels a word list uses, in display order.
    Levels {
        #[arg(short, long, default_value = "new_hsk")]
        list: WordListFamily,
    },
    /// Validate a JSON word list and write it as a binary snapshot.
    Compile {
        #[arg(short, long)]
        list: WordListFamily,

        /// Source word list. Defaults to the configured path.
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(short, long)]
        out: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let config = AnalyzerConfig::load_or_default(args.config.as_deref())?;

    match args.command {
        Command::Analyze {
            list,
            levels,
            segmented_out,
            pretty,
            files,
        } => analyze(&config, list, &levels, segmented_out.as_deref(), pretty, &files)?,
        Command::Levels { list } => {
            let registry = DictionaryRegistry::load(&config, &[list])?;
            let dictionary = registry
                .get(list)
                .ok_or_else(|| LevelError::Config(format!("{list} was not loaded")))?;
            println!("{}", list.title());
            for level in dictionary.levels(&LevelUniverse::standard()) {
                println!("{level}");
            }
        }
        Command::Compile { list, input, out } => {
            let input = input.unwrap_or_else(|| config.word_lists.path(list).to_path_buf());
            let dictionary = LevelDictionary::from_path(list, &input)?;
            save_snapshot(&dictionary, &out)?;
            eprintln!("Compiled {} words into '{}'", dictionary.len(), out.display());
        }
    }
    Ok(())
}

fn analyze(
    config: &AnalyzerConfig,
    list: WordListFamily,
    levels: &[String],
    segmented_out: Option<&Path>,
    pretty: bool,
    files: &[PathBuf],
) -> Result<(), Box<dyn Error>> {
    let registry = DictionaryRegistry::load(config, &[list])?;
    let dictionary = registry
        .get(list)
        .ok_or_else(|| LevelError::Config(format!("{list} was not loaded")))?;

    let overrides = match config.pos_override_path() {
        Some(path) => PosOverrides::from_path(&path)?,
        None => PosOverrides::default(),
    };

    let universe = LevelUniverse::standard();
    let analyzer = if levels.is_empty() {
        LevelAnalyzer::with_all_levels(dictionary, &universe)
    } else {
        let known = dictionary.levels(&universe);
        for level in levels.iter().filter(|l| !known.contains(l)) {
            tracing::warn!(%level, list = %list, "level does not occur in the word list");
        }
        LevelAnalyzer::new(dictionary, SelectedLevels::ordered_by(&universe, levels.iter().cloned()))
    };

    let mut documents = Vec::with_capacity(files.len());
    for path in files {
        let text = fs::read_to_string(path)?;
        let mut tokens = parse_segmented(&text);
        overrides.apply(&mut tokens);

        if let Some(dir) = segmented_out {
            save_text(&dir.join(segmented_name(path)), &render_segmented(&tokens))?;
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        documents.push(Document::new(name, clean_tokens(tokens, &config.punctuation_tag)));
    }

    // An inconsistent document aborts here, before any row is printed.
    let reports = analyzer.analyze_batch(&documents)?;

    let out = stdout();
    let mut out = BufWriter::new(out.lock());
    for report in &reports {
        if pretty {
            print_pretty(&mut out, report, &config.sequence_separator)?;
        } else {
            let row = SummaryRow::from_report(report, &config.sequence_separator);
            serde_json::to_writer(&mut out, &row)?;
            out.write_all(b"\n")?;
        }
    }
    out.flush()?;
    Ok(())
}

fn segmented_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    format!("{stem}_seg.txt")
}

fn print_pretty<W: Write>(out: &mut W, report: &DocumentReport, separator: &str) -> std::io::Result<()> {
    let result = &report.result;
    writeln!(out, "{}", report.name.as_str().bold().underlined())?;
    for tally in &result.levels {
        writeln!(
            out,
            "  {} {:>5}  {}",
            format!("{:<12}", tally.level).green(),
            tally.count,
            tally.sequence.join(separator)
        )?;
    }
    writeln!(
        out,
        "  {} {:>5}  {}",
        format!("{:<12}", "leftover").yellow(),
        result.leftover_count,
        result.leftover_sequence.join(separator)
    )?;
    writeln!(
        out,
        "  tokens {}  types {}  diversity {}\n",
        result.total_tokens.to_string().bold(),
        result.distinct_types.to_string().bold(),
        format!("{:.4}", result.diversity).cyan()
    )?;
    Ok(())
}
