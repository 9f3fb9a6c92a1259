use std::fs;
use std::path::{Path, PathBuf};

use crate::docx::write::{build_document_xml, write_docx};
use crate::error::PipelineError;

/// Writes the `<stem>_translated.txt` / `<stem>_translated.docx` pair into
/// `output_dir`, creating the directory if absent. Either both files land
/// or neither survives; re-running overwrites deterministically.
pub fn write_outputs(
    text: &str,
    output_dir: &Path,
    stem: &str,
) -> Result<(PathBuf, PathBuf), PipelineError> {
    fs::create_dir_all(output_dir)
        .map_err(|e| PipelineError::Write(format!("create {}: {e}", output_dir.display())))?;
    let txt_path = output_dir.join(format!("{stem}_translated.txt"));
    let docx_path = output_dir.join(format!("{stem}_translated.docx"));

    // Assemble the docx payload before touching the filesystem so a
    // serialization failure cannot strand a lone txt file.
    let document_xml = build_document_xml(text)
        .map_err(|e| PipelineError::Write(format!("build {}: {e:#}", docx_path.display())))?;

    fs::write(&txt_path, text)
        .map_err(|e| PipelineError::Write(format!("write {}: {e}", txt_path.display())))?;
    if let Err(e) = write_docx(&docx_path, &document_xml) {
        let _ = fs::remove_file(&txt_path);
        let _ = fs::remove_file(&docx_path);
        return Err(PipelineError::Write(format!(
            "write {}: {e:#}",
            docx_path.display()
        )));
    }
    Ok((txt_path, docx_path))
}
