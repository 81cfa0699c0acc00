//! End-to-end conversions of BDF sources.

use bdf_converter::{ConvertError, ConvertOptions, bdf::ValidationErrorKind, convert_bdf};
use gfx_font::{glyph::CodeRange, layout::FontDescriptor};

const SAMPLE: &[u8] = include_bytes!("fonts/fixed-sample.bdf");

fn convert(font: &[u8], options: &ConvertOptions) -> String {
    let mut output = Vec::new();
    convert_bdf(font, options, &mut output).unwrap();
    String::from_utf8(output).unwrap()
}

fn sample() -> String {
    String::from_utf8(SAMPLE.to_vec()).unwrap()
}

#[test]
fn converts_sample_font() {
    let expected = concat!(
        "const uint8_t Fixed9ptLat1Bitmaps[] PROGMEM = {\n",
        "\n",
        "  0x00, 0x80, 0x80, 0x80, 0x80, 0x80, 0x00, 0x80, 0x20, 0x50, 0x88, 0x88, \n",
        "  0xF8, 0x88, 0x88\n",
        "};\n",
        "\n",
        "const GFXglyph Fixed9ptLat1Glyphs[] PROGMEM = {\n",
        "  { 0, 1, 1, 6, 0, 0 },\n",
        "  { 1, 1, 7, 6, 2, 0 },\n",
        "  { 8, 5, 7, 6, 0, 0 }\n",
        "};\n",
        "\n",
        "const GFXfont Fixed9ptLat1 PROGMEM = {\n",
        "  (uint8_t  *)Fixed9ptLat1Bitmaps,\n",
        "  (GFXglyph *)Fixed9ptLat1Glyphs,\n",
        "  32, 65, 9 };\n",
    );

    assert_eq!(convert(SAMPLE, &ConvertOptions::default()), expected);
}

#[test]
fn strict_accepts_well_formed_font() {
    let strict = ConvertOptions {
        strict: true,
        ..ConvertOptions::default()
    };

    assert_eq!(
        convert(SAMPLE, &strict),
        convert(SAMPLE, &ConvertOptions::default())
    );
}

#[test]
fn offsets_follow_packed_bytes() {
    let options = ConvertOptions {
        range: CodeRange::new(0, 1000).unwrap(),
        strict: false,
    };

    let layout = convert_bdf(SAMPLE, &options, Vec::new()).unwrap();

    let mut expected_offset = 0;
    for entry in &layout.glyphs {
        assert_eq!(entry.bitmap_offset, expected_offset);
        expected_offset += usize::try_from(entry.height * entry.width.div_ceil(8)).unwrap();
    }
    assert_eq!(layout.bitmaps.len(), expected_offset);
    assert_eq!(layout.glyphs.len(), 4);
    assert_eq!(layout.descriptor.first_code, 32);
    assert_eq!(layout.descriptor.last_code, 256);
}

#[test]
fn range_restricts_every_block() {
    let options = ConvertOptions {
        range: CodeRange::new(65, 256).unwrap(),
        strict: false,
    };

    let output = convert(SAMPLE, &options);

    assert!(output.contains("  { 0, 5, 7, 6, 0, 0 },\n  { 7, 5, 8, 6, 0, 0 }\n};"));
    assert!(output.ends_with("  65, 256, 9 };\n"));
    assert!(!output.contains("0x80"));
}

#[test]
fn empty_range() {
    let options = ConvertOptions {
        range: CodeRange::new(128, 200).unwrap(),
        strict: false,
    };

    let layout = convert_bdf(SAMPLE, &options, Vec::new()).unwrap();

    assert!(layout.glyphs.is_empty());
    assert!(layout.bitmaps.is_empty());
    assert_eq!(layout.descriptor.first_code, FontDescriptor::EMPTY_FIRST_CODE);
    assert_eq!(layout.descriptor.last_code, FontDescriptor::EMPTY_LAST_CODE);
}

#[test]
fn crlf_line_endings() {
    let crlf = sample().replace('\n', "\r\n");

    assert_eq!(
        convert(crlf.as_bytes(), &ConvertOptions::default()),
        convert(SAMPLE, &ConvertOptions::default())
    );
}

#[test]
fn non_utf8_comments_are_tolerated() {
    let mut font = b"STARTFONT 2.1\nCOMMENT Copyright \xA9 1988\n".to_vec();
    font.extend_from_slice(&SAMPLE[b"STARTFONT 2.1\n".len()..]);

    assert_eq!(
        convert(&font, &ConvertOptions::default()),
        convert(SAMPLE, &ConvertOptions::default())
    );
}

#[test]
fn odd_length_row_drops_trailing_digit() {
    let font = sample().replace(
        "F8\n88\n88\nENDCHAR\nSTARTCHAR Amacron",
        "F8A\n88\n88\nENDCHAR\nSTARTCHAR Amacron",
    );

    let layout = convert_bdf(font.as_bytes(), &ConvertOptions::default(), Vec::new()).unwrap();

    assert_eq!(layout.bitmaps.len(), 15);
    assert_eq!(layout.bitmaps[12], 0xF8);
}

#[test]
fn non_ascii_single_character_row_adds_no_byte() {
    let font = sample().replacen("BITMAP\n00\n", "BITMAP\n\u{C9}\n", 1);

    let layout = convert_bdf(font.as_bytes(), &ConvertOptions::default(), Vec::new()).unwrap();

    assert_eq!(layout.bitmaps.len(), 14);
    assert_eq!(layout.bitmaps[..7], [0x80, 0x80, 0x80, 0x80, 0x80, 0x00, 0x80]);
}

#[test]
fn strict_rejects_malformed_font_without_output() {
    let font = sample().replace("BBX 5 7 0 0", "BBX 5 8 0 0");
    let strict = ConvertOptions {
        strict: true,
        ..ConvertOptions::default()
    };

    let mut output = Vec::new();
    let error = match convert_bdf(font.as_bytes(), &strict, &mut output) {
        Err(ConvertError::Validation(error)) => error,
        other => panic!("expected a validation error, got {other:?}"),
    };
    assert_eq!(error.glyph.as_deref(), Some("A"));
    assert_eq!(
        error.kind,
        ValidationErrorKind::RowCount {
            expected: 8,
            actual: 7
        }
    );
    assert!(output.is_empty());

    assert!(convert_bdf(font.as_bytes(), &ConvertOptions::default(), Vec::new()).is_ok());
}
