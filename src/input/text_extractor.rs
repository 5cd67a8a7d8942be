//! Text extraction from document formats

use crate::error::{AnalyzerError, Result};
use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::panic::{self, AssertUnwindSafe};

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        // pdf-extract panics on some malformed inputs instead of returning an error
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(bytes)
        }));

        match outcome {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(AnalyzerError::PdfExtraction(format!(
                "Failed to extract text from PDF: {}",
                e
            ))),
            Err(_) => Err(AnalyzerError::PdfExtraction(
                "PDF parser aborted on malformed input".to_string(),
            )),
        }
    }
}

/// Reads body paragraph text out of `word/document.xml`
pub struct DocxExtractor;

impl DocxExtractor {
    const DOCUMENT_PART: &'static str = "word/document.xml";

    /// Top-level paragraph texts in document order. Paragraphs nested inside
    /// text boxes (`w:txbxContent`) are skipped; table cell paragraphs are kept.
    pub fn paragraphs(&self, document_xml: &str) -> Result<Vec<String>> {
        let mut reader = Reader::from_str(document_xml);
        let mut buf = Vec::new();
        let mut paragraphs = Vec::new();
        let mut current = String::new();
        let mut paragraph_depth = 0usize;
        let mut text_box_depth = 0usize;
        let mut in_text = false;

        loop {
            let event = reader.read_event_into(&mut buf).map_err(|e| {
                AnalyzerError::DocxExtraction(format!("Malformed {}: {}", Self::DOCUMENT_PART, e))
            })?;

            match event {
                Event::Start(ref e) => match e.name().as_ref() {
                    b"w:txbxContent" => text_box_depth += 1,
                    _ if text_box_depth > 0 => {}
                    b"w:p" => {
                        if paragraph_depth == 0 {
                            current.clear();
                        }
                        paragraph_depth += 1;
                    }
                    b"w:t" => in_text = true,
                    _ => {}
                },
                Event::End(ref e) => match e.name().as_ref() {
                    b"w:txbxContent" => text_box_depth = text_box_depth.saturating_sub(1),
                    _ if text_box_depth > 0 => {}
                    b"w:p" => {
                        paragraph_depth = paragraph_depth.saturating_sub(1);
                        if paragraph_depth == 0 {
                            paragraphs.push(std::mem::take(&mut current));
                        }
                    }
                    b"w:t" => in_text = false,
                    _ => {}
                },
                Event::Empty(ref e) if text_box_depth == 0 => match e.name().as_ref() {
                    b"w:p" if paragraph_depth == 0 => paragraphs.push(String::new()),
                    b"w:tab" | b"w:br" | b"w:cr" if paragraph_depth > 0 => current.push(' '),
                    _ => {}
                },
                Event::Text(ref e) if in_text && paragraph_depth > 0 && text_box_depth == 0 => {
                    let text = e.unescape().map_err(|err| {
                        AnalyzerError::DocxExtraction(format!("Bad text run: {}", err))
                    })?;
                    current.push_str(&text);
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(paragraphs)
    }
}

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
        let mut document_xml = String::new();
        archive
            .by_name(Self::DOCUMENT_PART)?
            .read_to_string(&mut document_xml)
            .map_err(|e| {
                AnalyzerError::DocxExtraction(format!("Failed to read {}: {}", Self::DOCUMENT_PART, e))
            })?;

        let paragraphs = self.paragraphs(&document_xml)?;
        debug!("DOCX contains {} paragraphs", paragraphs.len());
        let non_empty: Vec<String> = paragraphs.into_iter().filter(|p| !p.is_empty()).collect();
        Ok(non_empty.join(" "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Latin1,
    Windows1252,
}

/// Code points for bytes 0x80..=0x9F; `None` marks bytes Windows-1252 leaves undefined
const WINDOWS_1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'), None, Some('\u{201A}'), Some('\u{0192}'),
    Some('\u{201E}'), Some('\u{2026}'), Some('\u{2020}'), Some('\u{2021}'),
    Some('\u{02C6}'), Some('\u{2030}'), Some('\u{0160}'), Some('\u{2039}'),
    Some('\u{0152}'), None, Some('\u{017D}'), None,
    None, Some('\u{2018}'), Some('\u{2019}'), Some('\u{201C}'),
    Some('\u{201D}'), Some('\u{2022}'), Some('\u{2013}'), Some('\u{2014}'),
    Some('\u{02DC}'), Some('\u{2122}'), Some('\u{0161}'), Some('\u{203A}'),
    Some('\u{0153}'), None, Some('\u{017E}'), Some('\u{0178}'),
];

impl TextEncoding {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().replace('_', "-").as_str() {
            "utf-8" | "utf8" => Some(TextEncoding::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" => Some(TextEncoding::Latin1),
            "windows-1252" | "cp1252" => Some(TextEncoding::Windows1252),
            _ => None,
        }
    }

    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => {
                let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
                std::str::from_utf8(bytes).ok().map(str::to_string)
            }
            TextEncoding::Latin1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
            TextEncoding::Windows1252 => bytes
                .iter()
                .map(|&b| match b {
                    0x80..=0x9F => WINDOWS_1252_HIGH[usize::from(b - 0x80)],
                    _ => Some(char::from(b)),
                })
                .collect(),
        }
    }
}

pub struct PlainTextExtractor {
    encodings: Vec<TextEncoding>,
}

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self::new(vec![
            TextEncoding::Utf8,
            TextEncoding::Latin1,
            TextEncoding::Windows1252,
        ])
    }
}

impl PlainTextExtractor {
    pub fn new(encodings: Vec<TextEncoding>) -> Self {
        Self { encodings }
    }

    /// Build from configured labels, rejecting unknown encodings
    pub fn from_labels(labels: &[String]) -> Result<Self> {
        let encodings = labels
            .iter()
            .map(|label| {
                TextEncoding::from_label(label).ok_or_else(|| {
                    AnalyzerError::Configuration(format!("Unknown text encoding: {}", label))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(encodings))
    }
}

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        for encoding in &self.encodings {
            if let Some(text) = encoding.decode(bytes) {
                debug!("Decoded plain text as {:?}", encoding);
                return Ok(text);
            }
        }

        Err(AnalyzerError::TextDecoding(format!(
            "None of the encodings {:?} could decode the input",
            self.encodings
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn build_docx(document_xml: &str) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            let options = zip::write::FileOptions::default();
            writer.start_file("[Content_Types].xml", options).unwrap();
            writer.write_all(b"<Types/>").unwrap();
            writer.start_file("word/document.xml", options).unwrap();
            writer.write_all(document_xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buffer.into_inner()
    }

    #[test]
    fn test_docx_paragraphs_joined_with_spaces() {
        let xml = r#"<w:document><w:body>
            <w:p><w:pPr><w:pStyle w:val="Title"/></w:pPr><w:r><w:t>Weekly sync</w:t></w:r></w:p>
            <w:p><w:r><w:t xml:space="preserve">Task: update </w:t></w:r><w:r><w:t>the roadmap</w:t></w:r></w:p>
            <w:p/>
            <w:p><w:r><w:t>Q&amp;A &lt;later&gt;</w:t></w:r></w:p>
        </w:body></w:document>"#;

        let text = DocxExtractor.extract(&build_docx(xml)).unwrap();
        assert_eq!(text, "Weekly sync Task: update the roadmap Q&A <later>");
    }

    #[test]
    fn test_docx_tabs_and_numeric_entities() {
        let xml = "<w:p><w:r><w:t>a</w:t><w:tab/><w:t>b&#233;&#x263A;</w:t></w:r></w:p>";

        assert_eq!(DocxExtractor.paragraphs(xml).unwrap(), vec!["a b\u{e9}\u{263a}".to_string()]);
    }

    #[test]
    fn test_docx_text_box_does_not_swallow_paragraph() {
        let xml = r#"<w:document><w:body>
            <w:p>
                <w:r><w:t>Agenda:</w:t></w:r>
                <w:r><w:pict><v:shape><v:textbox><w:txbxContent>
                    <w:p><w:r><w:t>Boxed note</w:t></w:r></w:p>
                </w:txbxContent></v:textbox></v:shape></w:pict></w:r>
                <w:r><w:t xml:space="preserve"> Task: submit the budget sheet</w:t></w:r>
            </w:p>
            <w:p><w:r><w:t>Next paragraph</w:t></w:r></w:p>
        </w:body></w:document>"#;

        assert_eq!(
            DocxExtractor.paragraphs(xml).unwrap(),
            vec!["Agenda: Task: submit the budget sheet", "Next paragraph"]
        );
    }

    #[test]
    fn test_docx_table_cells_are_paragraphs() {
        let xml = r#"<w:body><w:tbl><w:tr>
            <w:tc><w:p><w:r><w:t>Owner</w:t></w:r></w:p></w:tc>
            <w:tc><w:p><w:r><w:t>Due</w:t><w:br/><w:t>Friday</w:t></w:r></w:p></w:tc>
        </w:tr></w:tbl></w:body>"#;

        assert_eq!(DocxExtractor.paragraphs(xml).unwrap(), vec!["Owner", "Due Friday"]);
    }

    #[test]
    fn test_docx_malformed_xml() {
        let result = DocxExtractor.extract(&build_docx("<w:body><w:p><w:t>open</w:p></w:body>"));
        assert!(matches!(result, Err(AnalyzerError::DocxExtraction(_))));
    }

    #[test]
    fn test_docx_malformed_bytes() {
        let result = DocxExtractor.extract(b"definitely not a zip archive");
        assert!(matches!(result, Err(AnalyzerError::DocxExtraction(_))));
    }

    #[test]
    fn test_docx_missing_document_part() {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            writer
                .start_file("other.xml", zip::write::FileOptions::default())
                .unwrap();
            writer.write_all(b"<x/>").unwrap();
            writer.finish().unwrap();
        }

        let result = DocxExtractor.extract(&buffer.into_inner());
        assert!(result.is_err());
    }

    #[test]
    fn test_pdf_malformed_bytes() {
        let result = PdfExtractor.extract(b"%PDF-1.4 truncated garbage");
        assert!(matches!(result, Err(AnalyzerError::PdfExtraction(_))));
    }

    #[test]
    fn test_plain_text_utf8() {
        let extractor = PlainTextExtractor::default();
        assert_eq!(extractor.extract("caf\u{e9}".as_bytes()).unwrap(), "caf\u{e9}");
    }

    #[test]
    fn test_plain_text_strips_bom() {
        let extractor = PlainTextExtractor::default();
        assert_eq!(extractor.extract(b"\xEF\xBB\xBFhello").unwrap(), "hello");
    }

    #[test]
    fn test_plain_text_falls_back_to_latin1() {
        let extractor = PlainTextExtractor::default();
        // 0xE9 alone is invalid UTF-8
        assert_eq!(extractor.extract(b"caf\xE9").unwrap(), "caf\u{e9}");
    }

    #[test]
    fn test_windows_1252_mapping_and_undefined_bytes() {
        assert_eq!(
            TextEncoding::Windows1252.decode(b"\x93quoted\x94 \x80"),
            Some("\u{201C}quoted\u{201D} \u{20AC}".to_string())
        );
        assert_eq!(TextEncoding::Windows1252.decode(b"\x81"), None);
    }

    #[test]
    fn test_plain_text_all_encodings_fail() {
        let extractor = PlainTextExtractor::new(vec![TextEncoding::Utf8, TextEncoding::Windows1252]);
        let result = extractor.extract(b"\xFF\x8D");
        assert!(matches!(result, Err(AnalyzerError::TextDecoding(_))));
    }

    #[test]
    fn test_encoding_labels() {
        assert_eq!(TextEncoding::from_label("UTF8"), Some(TextEncoding::Utf8));
        assert_eq!(TextEncoding::from_label("cp1252"), Some(TextEncoding::Windows1252));
        assert_eq!(TextEncoding::from_label("iso_8859-1"), Some(TextEncoding::Latin1));
        assert!(PlainTextExtractor::from_labels(&["ebcdic".to_string()]).is_err());
    }
}
