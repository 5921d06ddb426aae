//! Expiry report rendering
//!
//! Produces CSV and PDF documents for a pre-sorted collection of lots.
//! The caller decides the ordering; the renderer never re-sorts, so CSV
//! and PDF stay consistent with whatever was requested. Arabic output
//! shapes and reorders each cell before layout and embeds a Naskh font
//! family; when the font files are missing the renderer degrades to the
//! built-in Latin fonts with a warning instead of failing.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use ar_reshaper::ArabicReshaper;
use chrono::NaiveDate;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use thiserror::Error;
use ttf_parser::{Face, GlyphId};
use unicode_bidi::BidiInfo;

use shared::format::format_optional_date_dmy;
use shared::i18n::{column_headers, translate, MessageKey};
use shared::models::{Lot, LotStatus};
use shared::types::{ExportFormat, Language};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("CSV rendering failed: {0}")]
    Csv(String),
    #[error("PDF rendering failed: {0}")]
    Pdf(String),
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// Landscape A4 geometry in points
const PAGE_WIDTH: f32 = 841.89;
const PAGE_HEIGHT: f32 = 595.28;
const MARGIN_X: f32 = 20.0;
const MARGIN_TOP: f32 = 30.0;
const MARGIN_BOTTOM: f32 = 20.0;
const TITLE_SIZE: f32 = 16.0;
const TITLE_SPACER: f32 = 12.0;
const HEADER_SIZE: f32 = 10.0;
const BODY_SIZE: f32 = 9.0;
const HEADER_ROW_HEIGHT: f32 = 22.0;
const ROW_HEIGHT: f32 = 18.0;
const CELL_PADDING: f32 = 6.0;
const GRID_WIDTH: f32 = 0.5;

/// Column widths before scaling to the printable width; wider for product
/// names, narrower for dates and status
const BASE_COLUMN_WIDTHS: [f32; 6] = [160.0, 90.0, 110.0, 100.0, 110.0, 90.0];

type Rgb = (f32, f32, f32);

const BLACK: Rgb = (0.0, 0.0, 0.0);
const WHITE: Rgb = (1.0, 1.0, 1.0);
const HEADER_FILL: Rgb = (0.2, 0.4, 0.8);
const GRID_GREY: Rgb = (0.5, 0.5, 0.5);

fn status_tint(status: LotStatus) -> Option<Rgb> {
    match status {
        LotStatus::Expired => Some((1.0, 0.8, 0.8)),
        LotStatus::Warning => Some((1.0, 1.0, 0.8)),
        LotStatus::Valid => Some((0.8, 1.0, 0.8)),
        LotStatus::Unknown => None,
    }
}

fn column_widths() -> [f32; 6] {
    let total: f32 = BASE_COLUMN_WIDTHS.iter().sum();
    let scale = (PAGE_WIDTH - 2.0 * MARGIN_X) / total;
    BASE_COLUMN_WIDTHS.map(|w| w * scale)
}

/// Report rendering service
#[derive(Clone)]
pub struct ReportService {
    font_dir: PathBuf,
}

impl ReportService {
    /// Create a new ReportService instance probing `font_dir` for the
    /// Arabic font family at render time
    pub fn new(font_dir: impl Into<PathBuf>) -> Self {
        Self {
            font_dir: font_dir.into(),
        }
    }

    /// Render the expiry report in the requested format
    pub fn render(
        &self,
        lots: &[Lot],
        language: Language,
        format: ExportFormat,
        reference: NaiveDate,
    ) -> Result<Vec<u8>, RenderError> {
        match format {
            ExportFormat::Csv => self.render_csv(lots, language, reference),
            ExportFormat::Pdf => self.render_pdf(lots, language, reference),
        }
    }

    /// Semicolon-delimited CSV with a UTF-8 BOM for spreadsheet imports
    pub fn render_csv(
        &self,
        lots: &[Lot],
        language: Language,
        reference: NaiveDate,
    ) -> Result<Vec<u8>, RenderError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .from_writer(vec![]);

        writer
            .write_record(column_headers(language))
            .map_err(|e| RenderError::Csv(e.to_string()))?;

        for lot in lots {
            let expiry = format_optional_date_dmy(lot.expiry_date);
            let status = lot.status(reference);
            writer
                .write_record([
                    lot.product_name.as_str(),
                    lot.part_number.as_str(),
                    lot.lot_number.as_str(),
                    expiry.as_str(),
                    lot.product_type.as_str(),
                    status.label(language),
                ])
                .map_err(|e| RenderError::Csv(e.to_string()))?;
        }

        let body = writer
            .into_inner()
            .map_err(|e| RenderError::Csv(e.to_string()))?;

        let mut bytes = Vec::with_capacity(UTF8_BOM.len() + body.len());
        bytes.extend_from_slice(UTF8_BOM);
        bytes.extend_from_slice(&body);
        Ok(bytes)
    }

    /// Landscape table PDF with a repeated header row and status row tints
    pub fn render_pdf(
        &self,
        lots: &[Lot],
        language: Language,
        reference: NaiveDate,
    ) -> Result<Vec<u8>, RenderError> {
        let kit = if language.is_rtl() {
            match self.load_arabic_fonts() {
                Ok(kit) => Some(kit),
                Err(e) => {
                    tracing::warn!(
                        "Arabic font kit unavailable, rendering with built-in fonts: {:#}",
                        e
                    );
                    None
                }
            }
        } else {
            None
        };

        let shaper = match &kit {
            Some(kit) => match (Face::parse(&kit.regular, 0), Face::parse(&kit.bold, 0)) {
                (Ok(regular), Ok(bold)) => Some(ArabicShaper::new(regular, bold)),
                _ => {
                    tracing::warn!("Arabic font faces failed to parse, rendering with built-in fonts");
                    None
                }
            },
            None => None,
        };

        let mut writer = PdfWriter::new(shaper, language);
        writer.title();
        writer.header_row();
        for lot in lots {
            writer.lot_row(lot, reference);
        }
        let (pages, shaper) = writer.finish();

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let f1_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let f2_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });

        let mut font_dict = dictionary! { "F1" => f1_id, "F2" => f2_id };
        if let (Some(shaper), Some(kit)) = (&shaper, &kit) {
            let f3_id = add_embedded_font(
                &mut doc,
                "NotoNaskhArabic",
                &shaper.regular,
                &kit.regular,
                &shaper.regular_used,
            );
            let f4_id = add_embedded_font(
                &mut doc,
                "NotoNaskhArabic-Bold",
                &shaper.bold,
                &kit.bold,
                &shaper.bold_used,
            );
            font_dict.set("F3", f3_id);
            font_dict.set("F4", f4_id);
        }
        let resources_id = doc.add_object(dictionary! { "Font" => font_dict });

        let mut kids: Vec<Object> = Vec::new();
        for operations in pages {
            let content = Content { operations };
            let encoded = content
                .encode()
                .map_err(|e| RenderError::Pdf(e.to_string()))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(PAGE_WIDTH),
                    Object::Real(PAGE_HEIGHT),
                ],
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => Object::Integer(page_count),
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        Ok(bytes)
    }

    fn load_arabic_fonts(&self) -> anyhow::Result<ArabicFontData> {
        Ok(ArabicFontData {
            regular: read_font(&self.font_dir.join("NotoNaskhArabic-Regular.ttf"))?,
            bold: read_font(&self.font_dir.join("NotoNaskhArabic-Bold.ttf"))?,
        })
    }
}

struct ArabicFontData {
    regular: Vec<u8>,
    bold: Vec<u8>,
}

fn read_font(path: &Path) -> anyhow::Result<Vec<u8>> {
    let data =
        std::fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
    Face::parse(&data, 0)
        .map_err(|e| anyhow::anyhow!("parsing font {}: {}", path.display(), e))?;
    Ok(data)
}

/// Shapes Arabic presentation forms, reorders bidirectional text into
/// visual order and maps characters to glyph ids of the embedded faces,
/// tracking which glyphs each face actually uses
struct ArabicShaper<'a> {
    regular: Face<'a>,
    bold: Face<'a>,
    reshaper: ArabicReshaper,
    regular_used: BTreeMap<u16, (char, u16)>,
    bold_used: BTreeMap<u16, (char, u16)>,
}

impl<'a> ArabicShaper<'a> {
    fn new(regular: Face<'a>, bold: Face<'a>) -> Self {
        Self {
            regular,
            bold,
            reshaper: ArabicReshaper::default(),
            regular_used: BTreeMap::new(),
            bold_used: BTreeMap::new(),
        }
    }

    fn shape(&self, text: &str) -> String {
        let reshaped = self.reshaper.reshape(text);
        let bidi = BidiInfo::new(&reshaped, None);
        match bidi.paragraphs.first() {
            Some(para) => {
                let line = para.range.clone();
                bidi.reorder_line(para, line).into_owned()
            }
            None => reshaped,
        }
    }

    /// Glyph-id bytes for an Identity-H encoded string plus its advance
    /// width in em units. Unmapped characters fall back to the question
    /// mark glyph so they stay visible.
    fn encode(&mut self, text: &str, bold: bool) -> (Vec<u8>, f32) {
        let (face, used) = if bold {
            (&self.bold, &mut self.bold_used)
        } else {
            (&self.regular, &mut self.regular_used)
        };

        let units_per_em = face.units_per_em() as f32;
        let mut bytes = Vec::with_capacity(text.len() * 2);
        let mut advance_units: u32 = 0;
        for c in text.chars() {
            let glyph = face
                .glyph_index(c)
                .or_else(|| face.glyph_index('?'))
                .unwrap_or(GlyphId(0));
            let advance = face.glyph_hor_advance(glyph).unwrap_or(0);
            used.entry(glyph.0).or_insert((c, advance));
            bytes.extend_from_slice(&glyph.0.to_be_bytes());
            advance_units += u32::from(advance);
        }
        (bytes, advance_units as f32 / units_per_em)
    }
}

/// Builds page content streams, breaking to a new page with a repeated
/// header row when the cursor reaches the bottom margin
struct PdfWriter<'a> {
    shaper: Option<ArabicShaper<'a>>,
    language: Language,
    widths: [f32; 6],
    pages: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    y: f32,
}

impl<'a> PdfWriter<'a> {
    fn new(shaper: Option<ArabicShaper<'a>>, language: Language) -> Self {
        Self {
            shaper,
            language,
            widths: column_widths(),
            pages: Vec::new(),
            current: Vec::new(),
            y: PAGE_HEIGHT - MARGIN_TOP,
        }
    }

    fn title(&mut self) {
        let text = translate(MessageKey::ReportTitle, self.language);
        self.y -= TITLE_SIZE;
        let (bytes, width, font) = self.prepare(text, TITLE_SIZE, true);
        let x = (PAGE_WIDTH - width) / 2.0;
        Self::text_op(&mut self.current, font, TITLE_SIZE, x, self.y, bytes, BLACK);
        self.y -= TITLE_SPACER;
    }

    fn header_row(&mut self) {
        let headers = column_headers(self.language);
        self.row(&headers, HEADER_ROW_HEIGHT, HEADER_SIZE, true, WHITE, Some(HEADER_FILL));
    }

    fn lot_row(&mut self, lot: &Lot, reference: NaiveDate) {
        if self.y - ROW_HEIGHT < MARGIN_BOTTOM {
            self.break_page();
        }
        let status = lot.status(reference);
        let expiry = format_optional_date_dmy(lot.expiry_date);
        let cells = [
            lot.product_name.as_str(),
            lot.part_number.as_str(),
            lot.lot_number.as_str(),
            expiry.as_str(),
            lot.product_type.as_str(),
            status.label(self.language),
        ];
        self.row(&cells, ROW_HEIGHT, BODY_SIZE, false, BLACK, status_tint(status));
    }

    fn break_page(&mut self) {
        let ops = std::mem::take(&mut self.current);
        self.pages.push(ops);
        self.y = PAGE_HEIGHT - MARGIN_TOP;
        self.header_row();
    }

    fn finish(mut self) -> (Vec<Vec<Operation>>, Option<ArabicShaper<'a>>) {
        self.pages.push(self.current);
        (self.pages, self.shaper)
    }

    fn row(
        &mut self,
        cells: &[&str; 6],
        height: f32,
        size: f32,
        bold: bool,
        text_color: Rgb,
        fill: Option<Rgb>,
    ) {
        self.y -= height;
        let y = self.y;
        let table_width: f32 = self.widths.iter().sum();
        if let Some(color) = fill {
            Self::fill_rect(&mut self.current, MARGIN_X, y, table_width, height, color);
        }
        Self::grid_row(&mut self.current, MARGIN_X, y, &self.widths, height);

        let baseline = y + (height - size) / 2.0 + 1.0;
        let widths = self.widths;
        let mut x = MARGIN_X;
        for (text, width) in cells.iter().zip(widths) {
            self.cell(text, x, width, baseline, size, bold, text_color);
            x += width;
        }
    }

    fn cell(
        &mut self,
        text: &str,
        x: f32,
        width: f32,
        baseline: f32,
        size: f32,
        bold: bool,
        color: Rgb,
    ) {
        let max_width = width - 2.0 * CELL_PADDING;
        let (bytes, text_width, font) = if self.shaper.is_some() {
            self.prepare(text, size, bold)
        } else {
            let fitted = truncate_latin(text, size, max_width);
            self.prepare(&fitted, size, bold)
        };
        if bytes.is_empty() {
            return;
        }

        // Arabic cells are right-aligned, Latin cells centered
        let text_x = if self.shaper.is_some() {
            (x + width - CELL_PADDING - text_width).max(x + CELL_PADDING)
        } else {
            x + ((width - text_width) / 2.0).max(CELL_PADDING)
        };
        Self::text_op(&mut self.current, font, size, text_x, baseline, bytes, color);
    }

    fn prepare(&mut self, text: &str, size: f32, bold: bool) -> (Vec<u8>, f32, &'static str) {
        match self.shaper.as_mut() {
            Some(shaper) => {
                let shaped = shaper.shape(text);
                let (bytes, em_width) = shaper.encode(&shaped, bold);
                let font = if bold { "F4" } else { "F3" };
                (bytes, em_width * size, font)
            }
            None => {
                let font = if bold { "F2" } else { "F1" };
                (winansi_bytes(text), latin_width(text) * size, font)
            }
        }
    }

    fn fill_rect(ops: &mut Vec<Operation>, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        ops.push(Operation::new(
            "rg",
            vec![
                Object::Real(color.0),
                Object::Real(color.1),
                Object::Real(color.2),
            ],
        ));
        ops.push(Operation::new(
            "re",
            vec![
                Object::Real(x),
                Object::Real(y),
                Object::Real(width),
                Object::Real(height),
            ],
        ));
        ops.push(Operation::new("f", vec![]));
    }

    fn grid_row(ops: &mut Vec<Operation>, x: f32, y: f32, widths: &[f32; 6], height: f32) {
        ops.push(Operation::new("w", vec![Object::Real(GRID_WIDTH)]));
        ops.push(Operation::new(
            "RG",
            vec![
                Object::Real(GRID_GREY.0),
                Object::Real(GRID_GREY.1),
                Object::Real(GRID_GREY.2),
            ],
        ));
        let mut cx = x;
        for width in widths {
            ops.push(Operation::new(
                "re",
                vec![
                    Object::Real(cx),
                    Object::Real(y),
                    Object::Real(*width),
                    Object::Real(height),
                ],
            ));
            cx += width;
        }
        ops.push(Operation::new("S", vec![]));
    }

    fn text_op(
        ops: &mut Vec<Operation>,
        font: &str,
        size: f32,
        x: f32,
        y: f32,
        bytes: Vec<u8>,
        color: Rgb,
    ) {
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![Object::Name(font.as_bytes().to_vec()), Object::Real(size)],
        ));
        ops.push(Operation::new(
            "rg",
            vec![
                Object::Real(color.0),
                Object::Real(color.1),
                Object::Real(color.2),
            ],
        ));
        ops.push(Operation::new(
            "Td",
            vec![Object::Real(x), Object::Real(y)],
        ));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(bytes, StringFormat::Hexadecimal)],
        ));
        ops.push(Operation::new("ET", vec![]));
    }
}

/// Embed a TrueType face as a Type0/Identity-H font, subsetting the
/// width and ToUnicode tables to the glyphs the document used
fn add_embedded_font(
    doc: &mut Document,
    base_name: &str,
    face: &Face,
    data: &[u8],
    used: &BTreeMap<u16, (char, u16)>,
) -> ObjectId {
    let scale = 1000.0 / face.units_per_em() as f32;

    let font_file_id = doc.add_object(Stream::new(
        dictionary! { "Length1" => Object::Integer(data.len() as i64) },
        data.to_vec(),
    ));

    let bbox = face.global_bounding_box();
    let descriptor_id = doc.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => base_name,
        "Flags" => Object::Integer(4),
        "FontBBox" => vec![
            Object::Integer((bbox.x_min as f32 * scale) as i64),
            Object::Integer((bbox.y_min as f32 * scale) as i64),
            Object::Integer((bbox.x_max as f32 * scale) as i64),
            Object::Integer((bbox.y_max as f32 * scale) as i64),
        ],
        "ItalicAngle" => Object::Integer(0),
        "Ascent" => Object::Integer((face.ascender() as f32 * scale) as i64),
        "Descent" => Object::Integer((face.descender() as f32 * scale) as i64),
        "CapHeight" => Object::Integer((face.ascender() as f32 * scale) as i64),
        "StemV" => Object::Integer(80),
        "FontFile2" => font_file_id,
    });

    let mut w_array: Vec<Object> = Vec::with_capacity(used.len() * 2);
    for (gid, (_, advance)) in used {
        w_array.push(Object::Integer(*gid as i64));
        w_array.push(Object::Array(vec![Object::Integer(
            (*advance as f32 * scale) as i64,
        )]));
    }

    let cid_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType2",
        "BaseFont" => base_name,
        "CIDSystemInfo" => dictionary! {
            "Registry" => Object::string_literal("Adobe"),
            "Ordering" => Object::string_literal("Identity"),
            "Supplement" => Object::Integer(0),
        },
        "FontDescriptor" => descriptor_id,
        "DW" => Object::Integer(1000),
        "W" => w_array,
        "CIDToGIDMap" => "Identity",
    });

    let to_unicode_id = doc.add_object(Stream::new(
        dictionary! {},
        to_unicode_cmap(used).into_bytes(),
    ));

    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => base_name,
        "Encoding" => "Identity-H",
        "DescendantFonts" => vec![Object::Reference(cid_font_id)],
        "ToUnicode" => to_unicode_id,
    })
}

/// ToUnicode CMap so text extraction and copy/paste recover the original
/// characters from glyph ids
fn to_unicode_cmap(used: &BTreeMap<u16, (char, u16)>) -> String {
    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n",
    );

    // bfchar groups are capped at 100 entries by the CMap format
    let entries: Vec<_> = used.iter().collect();
    for chunk in entries.chunks(100) {
        cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
        for (gid, (c, _)) in chunk {
            let mut units = [0u16; 2];
            let encoded = c.encode_utf16(&mut units);
            let target: String = encoded.iter().map(|u| format!("{:04X}", u)).collect();
            cmap.push_str(&format!("<{:04X}> <{}>\n", gid, target));
        }
        cmap.push_str("endbfchar\n");
    }

    cmap.push_str("endcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n");
    cmap
}

/// Encode text for the built-in WinAnsi fonts. Characters outside the
/// encoding render as a question mark so degraded cells stay visible
/// instead of disappearing.
fn winansi_bytes(text: &str) -> Vec<u8> {
    text.chars().map(winansi_byte).collect()
}

fn winansi_byte(c: char) -> u8 {
    match c as u32 {
        code @ 0x20..=0x7E => code as u8,
        code @ 0xA0..=0xFF => code as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95,
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => b'?',
    }
}

/// Approximate Helvetica advance width in em units, close enough for
/// centering and truncation decisions
fn helvetica_width(c: char) -> f32 {
    let milli_em = match c {
        'i' | 'j' | 'l' | '\'' | '|' | '.' | ',' | ':' | ';' | ' ' => 278.0,
        'f' | 't' | 'r' | '-' | '(' | ')' | '[' | ']' | '/' | '!' => 333.0,
        'm' | 'M' | 'W' => 889.0,
        'w' => 722.0,
        '…' => 1000.0,
        c if c.is_ascii_uppercase() => 667.0,
        _ => 556.0,
    };
    milli_em / 1000.0
}

fn latin_width(text: &str) -> f32 {
    text.chars().map(helvetica_width).sum()
}

/// Cut text to the column width, appending an ellipsis when anything was
/// dropped
fn truncate_latin(text: &str, size: f32, max_width: f32) -> String {
    if latin_width(text) * size <= max_width {
        return text.to_string();
    }

    let ellipsis_width = helvetica_width('…') * size;
    let mut out = String::new();
    let mut used = 0.0;
    for c in text.chars() {
        let advance = helvetica_width(c) * size;
        if used + advance + ellipsis_width > max_width {
            break;
        }
        out.push(c);
        used += advance;
    }
    out.push('…');
    out
}
