//! Where the sequence files of a run come from.
//!
//! Explicit files win; otherwise a list file (one path per line); otherwise
//! every `*.fa`, `*.dna` or `*.seq` file of a directory, in name order.

use std::fs;
use std::path::{Path, PathBuf};

use crate::common::PssmScanError;

/// File extensions picked up by a directory scan.
pub const SEQUENCE_EXTENSIONS: [&str; 3] = ["fa", "dna", "seq"];

/// One way of naming the sequence files to search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SequenceSource {
    Files(Vec<PathBuf>),
    List(PathBuf),
    Directory(PathBuf),
}

impl SequenceSource {
    /// Pick a source from command-line style choices.
    pub fn choose(files: Vec<PathBuf>, list: Option<PathBuf>, dir: PathBuf) -> Self {
        if !files.is_empty() {
            SequenceSource::Files(files)
        } else if let Some(list) = list {
            SequenceSource::List(list)
        } else {
            SequenceSource::Directory(dir)
        }
    }

    /// The concrete file paths, in search order.
    pub fn resolve(&self) -> Result<Vec<PathBuf>, PssmScanError> {
        match self {
            SequenceSource::Files(files) => Ok(files.clone()),
            SequenceSource::List(list) => read_list_file(list),
            SequenceSource::Directory(dir) => discover_sequence_files(dir),
        }
    }
}

/// Read a file naming one sequence file per line. Blank lines are skipped;
/// relative paths are kept as written.
pub fn read_list_file(path: &Path) -> Result<Vec<PathBuf>, PssmScanError> {
    let text = fs::read_to_string(path)
        .map_err(|source| PssmScanError::Io { path: path.to_path_buf(), source })?;
    Ok(text.lines().map(str::trim).filter(|l| !l.is_empty()).map(PathBuf::from).collect())
}

/// Regular files in `dir` with a sequence extension, sorted by name.
pub fn discover_sequence_files(dir: &Path) -> Result<Vec<PathBuf>, PssmScanError> {
    let io_err = |source| PssmScanError::Io { path: dir.to_path_buf(), source };
    let mut found = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let wanted = path.extension()
            .and_then(|e| e.to_str())
            .map_or(false, |e| SEQUENCE_EXTENSIONS.contains(&e));
        if wanted && path.is_file() {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choose_prefers_files_then_list() {
        let dir = PathBuf::from(".");
        assert_eq!(SequenceSource::choose(vec!["a.fa".into()], Some("l".into()), dir.clone()),
            SequenceSource::Files(vec!["a.fa".into()]));
        assert_eq!(SequenceSource::choose(vec![], Some("l".into()), dir.clone()), SequenceSource::List("l".into()));
        assert_eq!(SequenceSource::choose(vec![], None, dir.clone()), SequenceSource::Directory(dir));
    }

    #[test]
    fn list_file_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("genomes.txt");
        fs::write(&list, "one.fa\n\n  two.dna  \n").unwrap();
        let files = SequenceSource::List(list).resolve().unwrap();
        assert_eq!(files, vec![PathBuf::from("one.fa"), PathBuf::from("two.dna")]);
    }

    #[test]
    fn directory_scan_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.seq", "a.fa", "c.dna", "notes.txt", "fa", "d.fasta"] {
            fs::write(dir.path().join(name), ">x\nA\n").unwrap();
        }
        fs::create_dir(dir.path().join("sub.fa")).unwrap();
        let files = discover_sequence_files(dir.path()).unwrap();
        let names: Vec<_> = files.iter().map(|p| p.file_name().unwrap().to_str().unwrap().to_string()).collect();
        assert_eq!(names, vec!["a.fa", "b.seq", "c.dna"]);
    }

    #[test]
    fn missing_inputs_are_io_errors() {
        assert!(matches!(read_list_file(Path::new("/no/list")), Err(PssmScanError::Io { .. })));
        assert!(matches!(discover_sequence_files(Path::new("/no/dir")), Err(PssmScanError::Io { .. })));
    }
}
