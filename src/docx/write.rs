use std::fs::File;
use std::io::Write as _;
use std::path::Path;

use anyhow::Context;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
    r#"</Types>"#,
);

const ROOT_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
    r#"</Relationships>"#,
);

/// Serializes `text` as a minimal `word/document.xml`: one `w:p` per
/// newline-delimited segment, in order.
pub fn build_document_xml(text: &str) -> anyhow::Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
        .context("write xml decl")?;

    let mut doc = BytesStart::new("w:document");
    doc.push_attribute(("xmlns:w", W_NS));
    writer.write_event(Event::Start(doc)).context("write w:document")?;
    writer
        .write_event(Event::Start(BytesStart::new("w:body")))
        .context("write w:body")?;

    for line in text.split('\n') {
        writer
            .write_event(Event::Start(BytesStart::new("w:p")))
            .context("write w:p")?;
        writer
            .write_event(Event::Start(BytesStart::new("w:r")))
            .context("write w:r")?;
        let mut t = BytesStart::new("w:t");
        t.push_attribute(("xml:space", "preserve"));
        writer.write_event(Event::Start(t)).context("write w:t")?;
        writer
            .write_event(Event::Text(BytesText::new(line)))
            .context("write text run")?;
        writer
            .write_event(Event::End(BytesEnd::new("w:t")))
            .context("close w:t")?;
        writer
            .write_event(Event::End(BytesEnd::new("w:r")))
            .context("close w:r")?;
        writer
            .write_event(Event::End(BytesEnd::new("w:p")))
            .context("close w:p")?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("w:body")))
        .context("close w:body")?;
    writer
        .write_event(Event::End(BytesEnd::new("w:document")))
        .context("close w:document")?;
    Ok(writer.into_inner())
}

/// Packages a prepared `word/document.xml` into a fresh docx at `path`.
pub fn write_docx(path: &Path, document_xml: &[u8]) -> anyhow::Result<()> {
    let f = File::create(path)
        .with_context(|| format!("create docx: {}", path.display()))?;
    let mut zout = ZipWriter::new(f);
    let opts = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let parts: [(&str, &[u8]); 3] = [
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
        ("_rels/.rels", ROOT_RELS.as_bytes()),
        ("word/document.xml", document_xml),
    ];
    for (name, data) in parts {
        zout.start_file(name, opts)
            .with_context(|| format!("start zip file: {name}"))?;
        zout.write_all(data)
            .with_context(|| format!("write zip file: {name}"))?;
    }
    zout.finish().context("finish zip")?;
    Ok(())
}
