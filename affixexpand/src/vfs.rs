//! Filesystem seam for the corpus run.
//!
//! Expansion itself works on text; only [`crate::corpus`] touches files, and
//! it does so through [`Filesystem`] so it can run against [`Fs`] or an
//! in-memory [`MemoryFs`].
use std::io::{Cursor, Error, ErrorKind, Read, Result, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use hashbrown::{HashMap, HashSet};
use parking_lot::Mutex;

/// Files and directories the corpus run reads from and writes to.
pub trait Filesystem {
    /// Readable handle returned by [`Filesystem::open`].
    type File: Read;
    /// Writable handle returned by [`Filesystem::create`].
    type Writer: Write;

    /// Opens an existing file for reading.
    fn open<P: AsRef<Path>>(&self, path: P) -> Result<Self::File>;
    /// Creates or truncates a file for writing.
    fn create<P: AsRef<Path>>(&self, path: P) -> Result<Self::Writer>;
    /// Creates a directory and its missing parents.
    fn create_dir_all<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Regular files directly inside `path`, in no particular order.
    fn list_files<P: AsRef<Path>>(&self, path: P) -> Result<Vec<PathBuf>>;

    /// Reads a whole file as UTF-8.
    fn read_to_string<P: AsRef<Path>>(&self, path: P) -> Result<String> {
        let mut buf = String::new();
        self.open(path)?.read_to_string(&mut buf)?;
        Ok(buf)
    }
}

/// The local filesystem.
pub struct Fs;

impl Filesystem for Fs {
    type File = std::fs::File;
    type Writer = std::io::BufWriter<std::fs::File>;

    #[inline(always)]
    fn open<P: AsRef<Path>>(&self, path: P) -> Result<Self::File> {
        std::fs::File::open(path)
    }

    #[inline(always)]
    fn create<P: AsRef<Path>>(&self, path: P) -> Result<Self::Writer> {
        std::fs::File::create(path).map(std::io::BufWriter::new)
    }

    #[inline(always)]
    fn create_dir_all<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::create_dir_all(path)
    }

    fn list_files<P: AsRef<Path>>(&self, path: P) -> Result<Vec<PathBuf>> {
        let mut files = vec![];
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        Ok(files)
    }
}

#[derive(Default)]
struct MemoryTree {
    files: HashMap<PathBuf, Vec<u8>>,
    dirs: HashSet<PathBuf>,
}

impl MemoryTree {
    fn has_dir(&self, path: &Path) -> bool {
        path.as_os_str().is_empty() || self.dirs.contains(path)
    }
}

/// In-memory filesystem. Clones share the same tree.
#[derive(Clone, Default)]
pub struct MemoryFs(Arc<Mutex<MemoryTree>>);

impl MemoryFs {
    /// Empty filesystem.
    pub fn new() -> MemoryFs {
        MemoryFs::default()
    }

    /// Stores `contents` at `path`, creating its parent directories.
    pub fn insert<P: AsRef<Path>, C: Into<Vec<u8>>>(&self, path: P, contents: C) {
        let path = path.as_ref();
        let mut tree = self.0.lock();
        if let Some(parent) = path.parent() {
            for dir in parent.ancestors().filter(|d| !d.as_os_str().is_empty()) {
                tree.dirs.insert(dir.to_path_buf());
            }
        }
        tree.files.insert(path.to_path_buf(), contents.into());
    }

    /// Contents of the file at `path`, if any.
    pub fn get<P: AsRef<Path>>(&self, path: P) -> Option<Vec<u8>> {
        self.0.lock().files.get(path.as_ref()).cloned()
    }
}

/// Writer appending to a [`MemoryFs`] file.
pub struct MemoryWriter {
    tree: Arc<Mutex<MemoryTree>>,
    path: PathBuf,
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.tree
            .lock()
            .files
            .entry(self.path.clone())
            .or_default()
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

fn not_found(path: &Path) -> Error {
    Error::new(ErrorKind::NotFound, format!("{}: not found", path.display()))
}

impl Filesystem for MemoryFs {
    type File = Cursor<Vec<u8>>;
    type Writer = MemoryWriter;

    fn open<P: AsRef<Path>>(&self, path: P) -> Result<Self::File> {
        let path = path.as_ref();
        self.get(path).map(Cursor::new).ok_or_else(|| not_found(path))
    }

    fn create<P: AsRef<Path>>(&self, path: P) -> Result<Self::Writer> {
        let path = path.as_ref();
        let mut tree = self.0.lock();
        if !tree.has_dir(path.parent().unwrap_or_else(|| Path::new(""))) {
            return Err(not_found(path));
        }
        tree.files.insert(path.to_path_buf(), vec![]);
        Ok(MemoryWriter {
            tree: Arc::clone(&self.0),
            path: path.to_path_buf(),
        })
    }

    fn create_dir_all<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut tree = self.0.lock();
        for dir in path.as_ref().ancestors().filter(|d| !d.as_os_str().is_empty()) {
            tree.dirs.insert(dir.to_path_buf());
        }
        Ok(())
    }

    fn list_files<P: AsRef<Path>>(&self, path: P) -> Result<Vec<PathBuf>> {
        let path = path.as_ref();
        let tree = self.0.lock();
        if !tree.has_dir(path) {
            return Err(not_found(path));
        }
        Ok(tree
            .files
            .keys()
            .filter(|f| f.parent() == Some(path))
            .cloned()
            .collect())
    }
}
