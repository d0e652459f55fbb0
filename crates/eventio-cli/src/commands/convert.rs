//! Convert command implementation.

use eventio_store::{create_writer, BackendKind, EventStore, StoreError, WriteOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Resolves `path` to an absolute path without `.`, `..` or symlinks.
///
/// A file that does not exist yet resolves through its parent directory.
fn resolve(path: &Path) -> io::Result<PathBuf> {
    match path.canonicalize() {
        Ok(resolved) => Ok(resolved),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let name = path.file_name().ok_or(e)?;
            let parent = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p,
                _ => Path::new("."),
            };
            Ok(parent.canonicalize()?.join(name))
        }
        Err(e) => Err(e),
    }
}

/// Fails if `output` names the same file as one of `inputs`.
fn ensure_distinct(output: &Path, inputs: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let target = resolve(output)
        .map_err(|e| format!("{}: cannot resolve output path: {}", output.display(), e))?;
    for input in inputs {
        if resolve(Path::new(input))? == target {
            return Err(format!(
                "output {} is the same file as input {}",
                output.display(),
                input
            )
            .into());
        }
    }
    Ok(())
}

pub fn run(
    inputs: Vec<String>,
    output: String,
    backend: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_path = Path::new(&output);
    let kind = match backend {
        Some(name) => name.parse::<BackendKind>()?,
        None => BackendKind::from_path(output_path).ok_or_else(|| {
            StoreError::InvalidArgument(format!(
                "{}: cannot determine backend from file extension, pass --backend",
                output
            ))
        })?,
    };

    let mut store = EventStore::open(&inputs)?;
    ensure_distinct(output_path, &inputs)?;
    let options = WriteOptions {
        append: false,
        ..WriteOptions::default()
    };
    let mut writer = create_writer(output_path, kind, options)?;

    let mut written = 0usize;
    while let Some(event) = store.next_event()? {
        writer.write_event(&event)?;
        written += 1;
    }
    writer.finish()?;
    store.close();

    info!(events = written, output = %output, %kind, "conversion finished");
    println!("Converted {} events to {} ({})", written, output, kind);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn aliases_of_an_input_are_rejected() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("data");
        fs::create_dir(&sub).unwrap();
        let input = sub.join("events.jsonl");
        fs::write(&input, "").unwrap();
        let inputs = vec![input.to_string_lossy().to_string()];

        let alias = sub.join("..").join("data").join(".").join("events.jsonl");
        assert!(ensure_distinct(&alias, &inputs).is_err());
        assert!(ensure_distinct(&sub.join("other.jsonl"), &inputs).is_ok());
    }

    #[test]
    fn missing_output_resolves_through_parent() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("new.sio");
        assert_eq!(
            resolve(&output).unwrap(),
            dir.path().canonicalize().unwrap().join("new.sio")
        );
        assert!(resolve(&dir.path().join("missing").join("new.sio")).is_err());
    }
}
