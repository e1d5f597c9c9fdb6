//! Fixtures shared by unit and integration tests.

/// Builds a small PDF with one page per entry, each drawing its text in Helvetica.
///
/// An empty entry produces a page with an empty content stream (no extractable text).
pub fn minimal_pdf(pages: &[&str]) -> Vec<u8> {
    minimal_pdf_with_font(pages, "Helvetica")
}

/// Same as [`minimal_pdf`] with a caller-chosen `/BaseFont`.
///
/// A name outside the standard 14 fonts (with no `/Widths`) makes the extractor print
/// diagnostics while still recovering the text.
pub fn minimal_pdf_with_font(pages: &[&str], base_font: &str) -> Vec<u8> {
    const FONT_ID: usize = 3;
    let page_count = pages.len();
    // 1: catalog, 2: pages, 3: font, then (page, contents) pairs.
    let page_ids: Vec<usize> = (0..page_count).map(|idx| 4 + idx * 2).collect();

    let mut objects: Vec<String> = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!(
            "<< /Type /Pages /Kids [{}] /Count {page_count} >>",
            page_ids
                .iter()
                .map(|id| format!("{id} 0 R"))
                .collect::<Vec<_>>()
                .join(" ")
        ),
        format!(
            "<< /Type /Font /Subtype /Type1 /BaseFont /{base_font} /Encoding /WinAnsiEncoding >>"
        ),
    ];

    for (idx, text) in pages.iter().enumerate() {
        let contents_id = page_ids[idx] + 1;
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents {contents_id} 0 R \
             /Resources << /Font << /F1 {FONT_ID} 0 R >> >> >>"
        ));
        let stream = if text.is_empty() {
            String::new()
        } else {
            format!("BT /F1 24 Tf 72 720 Td ({}) Tj ET", escape_pdf_string(text))
        };
        objects.push(format!(
            "<< /Length {} >>\nstream\n{stream}\nendstream",
            stream.len()
        ));
    }

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (idx, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", idx + 1).as_bytes());
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );
    out
}

fn escape_pdf_string(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}
