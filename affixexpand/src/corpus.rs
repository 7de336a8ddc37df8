//! Expansion of a whole directory of word lists.
//!
//! Every file in the input directory with the configured extension is
//! expanded and written under the same name into the output directory. A
//! file that cannot be read or written is reported and skipped; the
//! remaining files are still processed.
use std::io::Write;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use serde::{Serialize, Serializer};

use crate::expand::Expander;
use crate::vfs::Filesystem;
use crate::wordlist::{self, WordLengthStats};

/// Errors of a corpus run.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CorpusError {
    /// A file or directory could not be read or written
    #[error("I/O error on '{}'", .path.display())]
    IoUnavailable {
        /// path that failed
        path: PathBuf,
        /// underlying error
        #[source]
        source: std::io::Error,
    },
}

impl CorpusError {
    fn io(path: &Path) -> impl FnOnce(std::io::Error) -> CorpusError + '_ {
        move |source| CorpusError::IoUnavailable {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Counts for one expanded word list.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// File name without extension
    pub name: String,
    /// Entries in the input list
    pub words_before: usize,
    /// Word forms written to the output list
    pub words_after: usize,
    /// Length statistics of the output list; `None` when it is empty
    pub lengths: Option<WordLengthStats>,
}

/// A word list that could not be processed.
#[derive(Debug, Serialize)]
pub struct FileFailure {
    /// Input file
    pub path: PathBuf,
    /// What went wrong
    #[serde(serialize_with = "serialize_error")]
    pub error: CorpusError,
}

fn serialize_error<S: Serializer>(error: &CorpusError, serializer: S) -> Result<S::Ok, S::Error> {
    match std::error::Error::source(error) {
        Some(source) => serializer.collect_str(&format_args!("{}: {}", error, source)),
        None => serializer.collect_str(error),
    }
}

/// Outcome of [`expand_corpus`].
#[derive(Debug, Default, Serialize)]
pub struct CorpusReport {
    /// Processed files, sorted by path
    pub files: Vec<FileReport>,
    /// Files that failed, sorted by path
    pub failures: Vec<FileFailure>,
}

impl CorpusReport {
    /// `(name, words_before, words_after)` rows.
    pub fn counts(&self) -> impl Iterator<Item = (&str, usize, usize)> {
        self.files
            .iter()
            .map(|f| (f.name.as_str(), f.words_before, f.words_after))
    }
}

/// Expands every matching word list in `input_dir` into `output_dir`.
///
/// Only failing to list `input_dir` or to create `output_dir` aborts the
/// run.
pub fn expand_corpus<FS, P, Q>(
    fs: &FS,
    expander: &Expander,
    input_dir: P,
    output_dir: Q,
) -> Result<CorpusReport, CorpusError>
where
    FS: Filesystem,
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input_dir = input_dir.as_ref();
    let output_dir = output_dir.as_ref();
    let extension = expander.config().input_extension.as_str();

    let inputs = fs
        .list_files(input_dir)
        .map_err(CorpusError::io(input_dir))?
        .into_iter()
        .filter(|p| p.extension().map(|e| e == extension).unwrap_or(false))
        .sorted()
        .collect::<Vec<_>>();

    fs.create_dir_all(output_dir)
        .map_err(CorpusError::io(output_dir))?;

    let mut report = CorpusReport::default();

    for path in inputs {
        log::info!("Working with file: {}", path.display());
        match expand_file(fs, expander, &path, output_dir) {
            Ok(file) => report.files.push(file),
            Err(error) => {
                log::error!("{}: {:?}", error, std::error::Error::source(&error));
                report.failures.push(FileFailure { path, error });
            }
        }
    }

    Ok(report)
}

fn expand_file<FS: Filesystem>(
    fs: &FS,
    expander: &Expander,
    path: &Path,
    output_dir: &Path,
) -> Result<FileReport, CorpusError> {
    let text = fs.read_to_string(path).map_err(CorpusError::io(path))?;
    let words: Vec<&str> = wordlist::words(&text).collect();
    let forms = expander.expand(&words);

    let file_name = path.file_name().unwrap_or(path.as_os_str());
    let out_path = output_dir.join(file_name);
    log::info!("Saving file: {}", out_path.display());
    write_lines(fs, &out_path, &forms).map_err(CorpusError::io(&out_path))?;

    Ok(FileReport {
        name: path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
        words_before: words.len(),
        words_after: forms.len(),
        lengths: WordLengthStats::from_words(&forms),
    })
}

fn write_lines<FS: Filesystem>(fs: &FS, path: &Path, lines: &[String]) -> std::io::Result<()> {
    let mut writer = fs.create(path)?;
    for line in lines {
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExpandConfig;
    use crate::vfs::{Fs, MemoryFs};

    const AFFIXES: &str = "banner\nbanner\n\nPFX A Y 1\nPFX A 0 un .\n\nSFX B Y 1\nSFX B 0 s .\n";

    fn expander() -> Expander {
        Expander::from_affix_text(AFFIXES, ExpandConfig::default()).unwrap()
    }

    #[test]
    fn expands_matching_files() {
        let fs = MemoryFs::new();
        fs.insert("cat/nouns.cat", "dog/B\n{cat,rat}/B\n");
        fs.insert("cat/adj.cat", "happy/A lucky/A\nred\n");
        fs.insert("cat/readme.txt", "not a word list");

        let report = expand_corpus(&fs, &expander(), "cat", "out").unwrap();

        assert!(report.failures.is_empty());
        let counts: Vec<_> = report.counts().collect();
        assert_eq!(counts, vec![("adj", 3, 5), ("nouns", 2, 6)]);

        let adj = String::from_utf8(fs.get("out/adj.cat").unwrap()).unwrap();
        assert_eq!(adj, "happy\nunhappy\nlucky\nunlucky\nred\n");
        let nouns = String::from_utf8(fs.get("out/nouns.cat").unwrap()).unwrap();
        assert_eq!(nouns, "dog\ndogs\ncat\ncats\nrat\nrats\n");
        assert!(fs.get("out/readme.txt").is_none());

        let lengths = report.files[0].lengths.unwrap();
        assert_eq!((lengths.short, lengths.long), (3, 7));
    }

    #[test]
    fn unreadable_file_does_not_stop_the_run() {
        let fs = MemoryFs::new();
        fs.insert("cat/a.cat", vec![0xff, 0xfe]);
        fs.insert("cat/b.cat", "x/B\n");

        let report = expand_corpus(&fs, &expander(), "cat", "out").unwrap();

        assert_eq!(report.files.len(), 1);
        assert_eq!(report.files[0].name, "b");
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, PathBuf::from("cat/a.cat"));

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["failures"][0]["error"].as_str().unwrap().contains("cat/a.cat"));
    }

    #[test]
    fn missing_input_dir_aborts() {
        let fs = MemoryFs::new();
        match expand_corpus(&fs, &expander(), "nowhere", "out") {
            Err(CorpusError::IoUnavailable { path, .. }) => assert_eq!(path, PathBuf::from("nowhere")),
            Ok(_) => panic!("expected an error"),
        }
    }

    #[test]
    fn repeated_spaces_keep_empty_words() {
        let fs = MemoryFs::new();
        fs.insert("cat/gap.cat", "dog/B  red\n");
        let report = expand_corpus(&fs, &expander(), "cat", "out").unwrap();

        assert_eq!(report.files[0].words_before, 3);
        assert_eq!(report.files[0].words_after, 4);
        let out = String::from_utf8(fs.get("out/gap.cat").unwrap()).unwrap();
        assert_eq!(out, "dog\ndogs\n\nred\n");
        assert_eq!(report.files[0].lengths.unwrap().short, 0);
    }

    #[test]
    fn empty_list_has_no_lengths() {
        let fs = MemoryFs::new();
        fs.insert("cat/empty.cat", "\n\n");
        let report = expand_corpus(&fs, &expander(), "cat", "out").unwrap();
        assert_eq!(report.files[0].words_after, 0);
        assert!(report.files[0].lengths.is_none());
    }

    #[test]
    fn custom_extension_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("lists");
        std::fs::create_dir_all(&input).unwrap();
        std::fs::write(input.join("a.dic"), "walk/B\n").unwrap();
        std::fs::write(input.join("b.cat"), "run/B\n").unwrap();

        let mut config = ExpandConfig::default();
        config.input_extension = "dic".into();
        let expander = Expander::from_affix_text(AFFIXES, config).unwrap();

        let output = dir.path().join("out");
        let report = expand_corpus(&Fs, &expander, &input, &output).unwrap();

        assert_eq!(report.files.len(), 1);
        assert_eq!(std::fs::read_to_string(output.join("a.dic")).unwrap(), "walk\nwalks\n");
        assert!(!output.join("b.cat").exists());
    }
}
