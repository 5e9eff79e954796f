use media_inspector::inspect_many;
use std::env;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|s| s.starts_with('.'))
}

/// Every non-hidden file below `dir`.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>, walkdir::Error> {
    WalkDir::new(dir)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
        .filter_map(|entry| match entry {
            Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.into_path())),
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        })
        .collect()
}

/// Inspects every file in a folder in parallel and prints one line per file.
fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let dir = env::args().nth(1).unwrap_or_else(|| "assets".to_owned());
    let files = list_files(Path::new(&dir))?;
    println!("Found {} files.", files.len());

    for (path, result) in files.iter().zip(inspect_many(&files)) {
        match result {
            Ok(session) => println!(
                "{}\t{}\t{}",
                path.display(),
                session.format()?,
                session.get("Duration/String3")?
            ),
            Err(e) => println!("{}\t-\t{e}", path.display()),
        }
    }

    Ok(())
}
