//! Text Extractor — turns uploaded coursework files into one concatenated
//! string for the analysis prompts.
//!
//! A file that cannot be read produces a warning naming that file; the
//! remaining files are still processed. Extraction only fails as a whole when
//! nothing could be read at all, and that decision belongs to the caller.

use bytes::Bytes;
use docx_rs::{
    read_docx, DocumentChild, Paragraph, ParagraphChild, Run, RunChild, Table, TableCellContent,
    TableChild, TableRowChild,
};
use pdf_extract::extract_text_from_mem;
use tracing::warn;

/// One uploaded file as received from the multipart request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub data: Bytes,
}

/// Concatenated text of all readable files plus per-file warnings.
#[derive(Debug, Default)]
pub struct ExtractionResult {
    pub text: String,
    pub warnings: Vec<String>,
}

/// Extracts text from each file in upload order. Supported: `.pdf`, `.docx`,
/// `.txt`; anything else is sniffed by magic bytes before being rejected.
pub fn extract_text(files: &[UploadedFile]) -> ExtractionResult {
    let mut result = ExtractionResult::default();

    for file in files {
        match extract_one(file, &mut result.warnings) {
            Ok(text) => {
                if !text.is_empty() {
                    if !result.text.is_empty() {
                        result.text.push_str("\n\n");
                    }
                    result.text.push_str(&text);
                }
            }
            Err(reason) => {
                warn!("Failed to read '{}': {reason}", file.name);
                result
                    .warnings
                    .push(format!("Error reading file {}: {reason}", file.name));
            }
        }
    }

    result
}

fn extract_one(file: &UploadedFile, warnings: &mut Vec<String>) -> Result<String, String> {
    let extension = file
        .name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    let raw = match extension.as_deref() {
        Some("pdf") => extract_pdf_text(&file.data)?,
        Some("docx") => extract_docx_text(&file.data)?,
        Some("txt") => decode_text_bytes(&file.name, &file.data, warnings),
        _ => sniff_and_extract(&file.name, &file.data, warnings)?,
    };

    Ok(normalize_text(&raw))
}

/// Extension didn't match; fall back to magic bytes before giving up.
fn sniff_and_extract(
    name: &str,
    data: &[u8],
    warnings: &mut Vec<String>,
) -> Result<String, String> {
    if data.starts_with(b"%PDF-") {
        return extract_pdf_text(data);
    }
    // DOCX is a zip container
    if data.starts_with(b"PK") {
        return extract_docx_text(data);
    }
    if std::str::from_utf8(data).is_ok() {
        return Ok(decode_text_bytes(name, data, warnings));
    }
    Err("unsupported file type (expected .pdf, .docx or .txt)".to_string())
}

fn extract_pdf_text(data: &[u8]) -> Result<String, String> {
    extract_text_from_mem(data)
        .map(|text| text.trim().to_string())
        .map_err(|err| format!("unable to extract PDF text: {err}"))
}

fn extract_docx_text(data: &[u8]) -> Result<String, String> {
    let package = read_docx(data).map_err(|err| format!("unable to read DOCX: {err}"))?;
    let mut segments = Vec::new();

    for child in &package.document.children {
        match child {
            DocumentChild::Paragraph(paragraph) => {
                if let Some(text) = paragraph_text(paragraph.as_ref()) {
                    segments.push(text);
                }
            }
            DocumentChild::Table(table) => collect_table_text(table.as_ref(), &mut segments),
            _ => {}
        }
    }

    Ok(segments.join("\n"))
}

fn paragraph_text(paragraph: &Paragraph) -> Option<String> {
    let mut buffer = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            append_run_text(run.as_ref(), &mut buffer);
        }
    }

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn append_run_text(run: &Run, buffer: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(text) => buffer.push_str(&text.text),
            RunChild::Tab(_) => buffer.push('\t'),
            RunChild::Break(_) => buffer.push('\n'),
            _ => {}
        }
    }
}

fn collect_table_text(table: &Table, segments: &mut Vec<String>) {
    for row in &table.rows {
        let TableChild::TableRow(row) = row;
        for cell in &row.cells {
            let TableRowChild::TableCell(cell) = cell;
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(paragraph) => {
                        if let Some(text) = paragraph_text(paragraph) {
                            segments.push(text);
                        }
                    }
                    TableCellContent::Table(inner) => collect_table_text(inner, segments),
                    _ => {}
                }
            }
        }
    }
}

fn decode_text_bytes(name: &str, data: &[u8], warnings: &mut Vec<String>) -> String {
    match std::str::from_utf8(data) {
        Ok(text) => text.to_string(),
        Err(_) => {
            warnings.push(format!(
                "File {name} contained invalid UTF-8; some characters were replaced"
            ));
            String::from_utf8_lossy(data).into_owned()
        }
    }
}

/// Normalizes line endings, strips NUL and BOM, trims trailing whitespace.
fn normalize_text(text: &str) -> String {
    let cleaned = text
        .replace('\u{0000}', "")
        .trim_start_matches('\u{FEFF}')
        .replace("\r\n", "\n")
        .replace('\r', "\n");

    let lines: Vec<&str> = cleaned.lines().map(|line| line.trim_end()).collect();
    lines.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, data: &[u8]) -> UploadedFile {
        UploadedFile {
            name: name.to_string(),
            data: Bytes::copy_from_slice(data),
        }
    }

    #[test]
    fn test_txt_extraction_normalizes_line_endings() {
        let result = extract_text(&[file("notes.txt", b"line one\r\nline two  \r\n")]);
        assert_eq!(result.text, "line one\nline two");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_multiple_txt_files_concatenated_in_order() {
        let result = extract_text(&[file("a.txt", b"first"), file("b.txt", b"second")]);
        assert_eq!(result.text, "first\n\nsecond");
    }

    #[test]
    fn test_bad_file_warns_and_processing_continues() {
        let result = extract_text(&[
            file("broken.pdf", b"%PDF-not really a pdf"),
            file("good.txt", b"still here"),
        ]);
        assert_eq!(result.text, "still here");
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("broken.pdf"));
    }

    #[test]
    fn test_unknown_extension_with_text_content_is_accepted() {
        let result = extract_text(&[file("README", b"plain text body")]);
        assert_eq!(result.text, "plain text body");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_unknown_binary_is_rejected_with_warning() {
        let result = extract_text(&[file("image.bin", &[0xFF, 0xD8, 0xFF, 0x00])]);
        assert!(result.text.is_empty());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("image.bin"));
    }

    #[test]
    fn test_invalid_utf8_txt_is_lossy_decoded_with_warning() {
        let result = extract_text(&[file("notes.txt", &[b'h', b'i', 0xC3, 0x28])]);
        assert!(result.text.starts_with("hi"));
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("invalid UTF-8"));
    }

    #[test]
    fn test_nul_and_bom_stripped() {
        let result = extract_text(&[file("odd.txt", "\u{FEFF}abc\u{0000}def".as_bytes())]);
        assert_eq!(result.text, "abcdef");
    }
}
