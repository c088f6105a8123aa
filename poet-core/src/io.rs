use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

/// Reads a corpus file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Splits a line into word tokens.
///
/// - Splits on Unicode whitespace; runs of whitespace never yield empty tokens
/// - Lowercases every token when `lowercase` is set
pub(crate) fn tokenize(line: &str, lowercase: bool) -> impl Iterator<Item = String> + '_ {
	line.split_whitespace().map(move |word| {
		if lowercase {
			word.to_lowercase()
		} else {
			word.to_owned()
		}
	})
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub(crate) fn normalize_folder(input: &str) -> PathBuf {
	if input == "." || input == "./" {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		PathBuf::from(input)
	}
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths), sorted.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let dir = match dir.as_ref().to_str() {
		Some(s) => normalize_folder(s),
		None => dir.as_ref().to_path_buf(),
	};

	let mut files = Vec::new();
	for entry in fs::read_dir(dir)? {
		let path = entry?.path();

		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}
	files.sort();

	Ok(files)
}
