use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

/// Paragraph texts from `word/document.xml`, in document order. Runs inside
/// a paragraph are concatenated; tabs and soft breaks become `\t` / `\n`.
pub fn read_paragraphs(path: &Path) -> anyhow::Result<Vec<String>> {
    let data = read_part(path, "word/document.xml")?;
    parse_paragraphs(&data).context("parse word/document.xml")
}

/// Tolerant fallback when structured parsing fails: every `w:t` run across
/// all `word/*.xml` parts, joined with newlines. Loses paragraph grouping
/// but survives documents whose main part is missing or mangled.
pub fn read_all_text_runs(path: &Path) -> anyhow::Result<String> {
    let f = File::open(path).with_context(|| format!("open docx: {}", path.display()))?;
    let mut zip = ZipArchive::new(f).context("read zip")?;
    let mut runs: Vec<String> = Vec::new();
    for i in 0..zip.len() {
        let mut file = zip.by_index(i).context("zip entry")?;
        let name = file.name().to_string();
        if !(name.starts_with("word/") && name.ends_with(".xml")) {
            continue;
        }
        let mut data = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut data)
            .with_context(|| format!("read zip entry: {name}"))?;
        collect_text_runs(&data, &mut runs);
    }
    if runs.is_empty() {
        anyhow::bail!("no text runs found in {}", path.display());
    }
    Ok(runs.join("\n"))
}

fn read_part(path: &Path, name: &str) -> anyhow::Result<Vec<u8>> {
    let f = File::open(path).with_context(|| format!("open docx: {}", path.display()))?;
    let mut zip = ZipArchive::new(f).context("read zip")?;
    let mut file = zip
        .by_name(name)
        .with_context(|| format!("zip entry: {name}"))?;
    let mut data = Vec::with_capacity(file.size() as usize);
    file.read_to_end(&mut data)
        .with_context(|| format!("read zip entry: {name}"))?;
    Ok(data)
}

pub(crate) fn parse_paragraphs(xml: &[u8]) -> anyhow::Result<Vec<String>> {
    let mut reader = Reader::from_reader(xml);
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text = false;
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf).context("xml event")? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => {
                    current = Some(String::new());
                    in_text = false;
                }
                b"w:t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => {
                if let Some(p) = current.as_mut() {
                    match e.name().as_ref() {
                        b"w:tab" => p.push('\t'),
                        b"w:br" => p.push('\n'),
                        _ => {}
                    }
                }
            }
            Event::Text(t) => {
                if in_text {
                    if let Some(p) = current.as_mut() {
                        p.push_str(&t.unescape().context("unescape text run")?);
                    }
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:p" => {
                    if let Some(p) = current.take() {
                        paragraphs.push(p);
                    }
                }
                b"w:t" => in_text = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(paragraphs)
}

/// Best-effort run collection; malformed XML ends the scan for that part
/// instead of failing the whole extraction.
fn collect_text_runs(xml: &[u8], runs: &mut Vec<String>) {
    let mut reader = Reader::from_reader(xml);
    let mut in_text = false;
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text = true,
            Ok(Event::End(e)) if e.name().as_ref() == b"w:t" => in_text = false,
            Ok(Event::Text(t)) if in_text => {
                if let Ok(text) = t.unescape() {
                    runs.push(text.into_owned());
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            Ok(_) => {}
        }
        buf.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{collect_text_runs, parse_paragraphs};

    #[test]
    fn paragraphs_in_order_with_breaks() {
        let xml = br#"<?xml version="1.0"?><w:document xmlns:w="ns"><w:body>
            <w:p><w:r><w:t>Hello </w:t></w:r><w:r><w:t>world</w:t></w:r></w:p>
            <w:p><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t></w:r></w:p>
            <w:p/>
        </w:body></w:document>"#;
        let got = parse_paragraphs(xml).expect("parse");
        assert_eq!(got, vec!["Hello world".to_string(), "a\tb".to_string()]);
    }

    #[test]
    fn entities_are_unescaped() {
        let xml = br#"<w:document xmlns:w="ns"><w:p><w:r><w:t>a &amp; b</w:t></w:r></w:p></w:document>"#;
        assert_eq!(parse_paragraphs(xml).expect("parse"), vec!["a & b".to_string()]);
    }

    #[test]
    fn run_scan_ignores_non_text_elements() {
        let xml = br#"<w:hdr xmlns:w="ns"><w:p><w:pPr><w:ind/></w:pPr><w:r><w:t>header</w:t></w:r></w:p></w:hdr>"#;
        let mut runs = Vec::new();
        collect_text_runs(xml, &mut runs);
        assert_eq!(runs, vec!["header".to_string()]);
    }
}
