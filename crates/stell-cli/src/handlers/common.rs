//! Helpers shared by the one-shot editing commands.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use stell_core::{
    CoreError, Draft, ExportedFile, FixedConfirmation, Reconciled, SettingKey, SettingRecord,
};

use crate::bootstrap::CliContext;

/// Open `key`, apply `edit` to its draft and save it through the Save Gate.
///
/// Nothing is written when `edit` fails.
pub async fn edit_and_save<F>(ctx: &CliContext, key: SettingKey, edit: F) -> Result<SettingRecord>
where
    F: FnOnce(&mut Draft) -> Result<()>,
{
    // A one-shot editor never holds another draft, so there is nothing to confirm.
    let mut editor = ctx.editor(Arc::new(FixedConfirmation(true)));
    editor.open(key).await?;
    edit(editor.draft_mut()?)?;
    Ok(editor.save().await?)
}

/// The effective value of `key`.
pub async fn effective(ctx: &CliContext, key: &SettingKey) -> Result<Reconciled, CoreError> {
    ctx.app().reconciler().reconcile(key).await
}

/// Write an exported file to `out`, or to stdout when `out` is `None`.
pub fn write_export(file: &ExportedFile, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, &file.content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("✓ Wrote {} to {}", file.file_name, path.display());
        }
        None => print!("{}", file.content),
    }
    Ok(())
}

/// Read a text file given on the command line.
pub fn read_input_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn print_saved(record: &SettingRecord) {
    println!(
        "✓ Saved {} at {}",
        record.key,
        record.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("robots.txt");
        let file = ExportedFile {
            file_name: "robots.txt".to_string(),
            content: "User-agent: *\nAllow: /\n".to_string(),
        };
        write_export(&file, Some(&path)).unwrap();
        assert_eq!(read_input_file(&path).unwrap(), file.content);
    }

    #[test]
    fn test_read_missing_file_names_path() {
        let err = read_input_file(Path::new("/definitely/missing/sitemap.xml")).unwrap_err();
        assert!(err.to_string().contains("/definitely/missing/sitemap.xml"));
    }
}
