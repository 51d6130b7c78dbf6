use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::Cli;

/// Resolve the raw label text from the CLI invocation.
///
/// Priority: positional argument → `--file` → stdin read to EOF.
pub fn read_input(cli: &Cli) -> Result<String> {
    if let Some(text) = &cli.ingredients {
        return Ok(text.clone());
    }

    if let Some(path) = &cli.file {
        return read_file(path);
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read ingredient list from stdin")?;
    Ok(buffer)
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read ingredient list from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_file() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "Water, Glycerin\nFragrance").unwrap();
        let text = read_file(f.path()).unwrap();
        assert_eq!(text, "Water, Glycerin\nFragrance");
    }

    #[test]
    fn test_read_file_missing_carries_path_in_error() {
        let err = read_file(Path::new("/nonexistent/label.txt")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/label.txt"));
    }
}
