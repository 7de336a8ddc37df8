use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use gumdrop::Options;
use serde::Serialize;

use affixexpand::corpus::{expand_corpus, CorpusReport};
use affixexpand::expand::{classify, Annotation, Expander};
use affixexpand::vfs::Fs;
use affixexpand::wordlist::{self, WordLengthStats};
use affixexpand::ExpandConfig;

trait OutputWriter {
    fn write_forms(&mut self, forms: &[String]) -> io::Result<()>;
    fn write_classification(&mut self, word: &str, annotation: Annotation) -> io::Result<()>;
    fn write_report(&mut self, report: &CorpusReport) -> io::Result<()>;
    fn finish(&mut self) -> io::Result<()>;
}

struct StdoutWriter<W: Write>(W);

impl<W: Write> OutputWriter for StdoutWriter<W> {
    fn write_forms(&mut self, forms: &[String]) -> io::Result<()> {
        for form in forms {
            writeln!(self.0, "{}", form)?;
        }
        Ok(())
    }

    fn write_classification(&mut self, word: &str, annotation: Annotation) -> io::Result<()> {
        writeln!(self.0, "{}\t\t[{}]", word, annotation)
    }

    fn write_report(&mut self, report: &CorpusReport) -> io::Result<()> {
        writeln!(
            self.0,
            "{:<24}{:>10}{:>10}{:>8}{:>8}{:>8}",
            "name", "before", "after", "short", "long", "avg"
        )?;
        for file in &report.files {
            write!(self.0, "{:<24}{:>10}{:>10}", file.name, file.words_before, file.words_after)?;
            match file.lengths {
                Some(l) => writeln!(self.0, "{:>8}{:>8}{:>8.2}", l.short, l.long, l.avg)?,
                None => writeln!(self.0, "{:>8}{:>8}{:>8}", "-", "-", "-")?,
            }
        }
        for failure in &report.failures {
            writeln!(self.0, "FAILED {}: {}", failure.path.display(), failure.error)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

#[derive(Serialize)]
struct ClassificationResult {
    word: String,
    annotation: Annotation,
}

#[derive(Default, Serialize)]
struct JsonWriter {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    forms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lengths: Option<WordLengthStats>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    classify: Vec<ClassificationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<serde_json::Value>,
}

impl OutputWriter for JsonWriter {
    fn write_forms(&mut self, forms: &[String]) -> io::Result<()> {
        self.forms.extend_from_slice(forms);
        Ok(())
    }

    fn write_classification(&mut self, word: &str, annotation: Annotation) -> io::Result<()> {
        self.classify.push(ClassificationResult {
            word: word.to_string(),
            annotation,
        });
        Ok(())
    }

    fn write_report(&mut self, report: &CorpusReport) -> io::Result<()> {
        self.report = Some(serde_json::to_value(report)?);
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.lengths = WordLengthStats::from_words(&self.forms);
        let stdout = io::stdout();
        let mut out = stdout.lock();
        serde_json::to_writer_pretty(&mut out, self)?;
        writeln!(out)
    }
}

#[derive(Debug, Options)]
struct Args {
    #[options(help = "print help message")]
    help: bool,

    #[options(command)]
    command: Option<Command>,
}

#[derive(Debug, Options)]
enum Command {
    #[options(help = "expand annotated word lists into word forms")]
    Expand(ExpandArgs),

    #[options(help = "print the annotation kind of each word")]
    Classify(ClassifyArgs),

    #[options(help = "expand every word list in a directory and report counts")]
    Corpus(CorpusArgs),
}

#[derive(Debug, Options)]
struct ExpandArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "affix file to be used", required)]
    affixes: PathBuf,

    #[options(help = "JSON config file overriding the defaults")]
    config: Option<PathBuf>,

    #[options(no_short, help = "expand words on all cores")]
    parallel: bool,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(free, help = "word list files to be processed (stdin if none)")]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, Options)]
struct ClassifyArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(free, help = "words to be classified (stdin if none)")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct CorpusArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "affix file to be used", required)]
    affixes: PathBuf,

    #[options(help = "JSON config file overriding the defaults")]
    config: Option<PathBuf>,

    #[options(help = "directory holding the word lists", required)]
    input: PathBuf,

    #[options(help = "directory receiving the expanded lists", required)]
    output: PathBuf,

    #[options(no_short, help = "expand words on all cores")]
    parallel: bool,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,
}

fn read_stdin() -> anyhow::Result<String> {
    eprintln!("Reading from stdin...");
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("reading stdin")?;
    Ok(buffer)
}

fn writer(use_json: bool) -> Box<dyn OutputWriter> {
    if use_json {
        Box::new(JsonWriter::default())
    } else {
        Box::new(StdoutWriter(BufWriter::new(io::stdout())))
    }
}

fn load_expander(affixes: &Path, config: Option<&Path>, parallel: bool) -> anyhow::Result<Expander> {
    let mut config = match config {
        Some(path) => ExpandConfig::from_path(path)?,
        None => ExpandConfig::default(),
    };
    config.parallel |= parallel;

    let text = std::fs::read_to_string(affixes)
        .with_context(|| format!("reading affix file '{}'", affixes.display()))?;
    let expander = Expander::from_affix_text(&text, config)
        .with_context(|| format!("parsing affix file '{}'", affixes.display()))?;
    log::debug!("Loaded {} affix blocks", expander.table().len());
    Ok(expander)
}

fn expand(args: ExpandArgs) -> anyhow::Result<()> {
    let expander = load_expander(&args.affixes, args.config.as_deref(), args.parallel)?;
    let mut writer = writer(args.use_json);

    if args.inputs.is_empty() {
        let text = read_stdin()?;
        let words: Vec<&str> = wordlist::words(&text).collect();
        writer.write_forms(&expander.expand(&words))?;
    } else {
        for path in &args.inputs {
            let text = match std::fs::read_to_string(path) {
                Ok(v) => v,
                Err(e) => {
                    log::error!("File not found: {}: {}", path.display(), e);
                    continue;
                }
            };
            let words: Vec<&str> = wordlist::words(&text).collect();
            writer.write_forms(&expander.expand(&words))?;
        }
    }

    writer.finish()?;
    Ok(())
}

fn classify_words(args: ClassifyArgs) -> anyhow::Result<()> {
    let inputs = if args.inputs.is_empty() {
        wordlist::words(&read_stdin()?).map(str::to_string).collect()
    } else {
        args.inputs
    };

    let mut writer = writer(args.use_json);
    for word in &inputs {
        writer.write_classification(word, classify(word))?;
    }
    writer.finish()?;
    Ok(())
}

fn corpus(args: CorpusArgs) -> anyhow::Result<()> {
    let expander = load_expander(&args.affixes, args.config.as_deref(), args.parallel)?;
    let report = expand_corpus(&Fs, &expander, &args.input, &args.output)?;

    let mut writer = writer(args.use_json);
    writer.write_report(&report)?;
    writer.finish()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args = Args::parse_args_default_or_exit();

    match args.command {
        None => Ok(()),
        Some(Command::Expand(args)) => expand(args),
        Some(Command::Classify(args)) => classify_words(args),
        Some(Command::Corpus(args)) => corpus(args),
    }
}
