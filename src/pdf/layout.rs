//! Page layout for the practice and answer sheets
//!
//! Layout is pure: it turns a [`RenderRequest`] into positioned draw
//! operations, measured through [`TextMeasure`], without touching printpdf.
//! Coordinates are millimetres from the top-left corner of the page.

use crate::worksheet::{RenderRequest, Reveal, WordPair};
use chrono::NaiveDate;

// ============================================================================
// Page geometry
// ============================================================================

/// A4 portrait
pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 15.0;

/// Width of the sequence-number column
pub const INDEX_COL_MM: f32 = 20.0;

pub const PT_TO_MM: f32 = 25.4 / 72.0;

const TITLE_FONT_SIZE: f32 = 14.0;
const TITLE_LINE_MM: f32 = 10.0;
const INFO_FONT_SIZE: f32 = 11.0;
const INFO_LINE_MM: f32 = 8.0;
const PRACTICE_FONT_SIZE: f32 = 11.0;
const ANSWER_FONT_SIZE: f32 = 9.0;
/// Smallest size an answer cell shrinks to before it is shortened
const MIN_ANSWER_FONT_SIZE: f32 = 4.0;
const HEADER_ROW_MM: f32 = 10.0;
const DATA_ROW_MM: f32 = 9.0;
const CELL_PADDING_MM: f32 = 1.0;

pub const PRACTICE_TITLE: &str = "영단어 연습지";
pub const ANSWER_TITLE: &str = "정답지";
pub const COLUMN_LABELS: [&str; 3] = ["번호", "영단어", "뜻"];
const NAME_PLACEHOLDER: &str = "__________________";
const ELLIPSIS: &str = "...";

/// Advance-width measurement for a single font face
pub trait TextMeasure {
    fn text_width_mm(&self, text: &str, size_pt: f32) -> f32;
}

// ============================================================================
// Layout output
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sheet {
    Practice,
    Answer,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Text whose baseline sits at `y`
    Text {
        x: f32,
        y: f32,
        size: f32,
        text: String,
    },
    /// Bordered cell with its top-left corner at (`x`, `y`); `filled` cells
    /// carry the header shade
    Cell {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        filled: bool,
    },
}

/// One table row as printed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub index: usize,
    pub front: String,
    pub back: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub sheet: Sheet,
    pub ops: Vec<DrawOp>,
    pub rows: Vec<TableRow>,
}

impl PageLayout {
    fn new(sheet: Sheet) -> Self {
        Self {
            sheet,
            ops: Vec::new(),
            rows: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorksheetLayout {
    pub pages: Vec<PageLayout>,
}

impl WorksheetLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Data rows of one sheet in print order, across page breaks
    pub fn rows(&self, sheet: Sheet) -> Vec<&TableRow> {
        self.pages
            .iter()
            .filter(|page| page.sheet == sheet)
            .flat_map(|page| page.rows.iter())
            .collect()
    }
}

// ============================================================================
// Page flow
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum Align {
    Left,
    Center,
}

/// What a table cell does with text wider than the cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Overflow {
    /// Cut the text short with an ellipsis
    Shorten,
    /// Reduce the font size, down to [`MIN_ANSWER_FONT_SIZE`]
    Shrink,
}

struct Column {
    x: f32,
    width: f32,
    align: Align,
}

/// Index column plus two equal term columns across the printable width
fn table_columns() -> [Column; 3] {
    let term_width = (PAGE_WIDTH_MM - 2.0 * MARGIN_MM - INDEX_COL_MM) / 2.0;
    let front_x = MARGIN_MM + INDEX_COL_MM;
    [
        Column {
            x: MARGIN_MM,
            width: INDEX_COL_MM,
            align: Align::Center,
        },
        Column {
            x: front_x,
            width: term_width,
            align: Align::Left,
        },
        Column {
            x: front_x + term_width,
            width: term_width,
            align: Align::Left,
        },
    ]
}

/// Cursor over a growing list of pages with break-on-overflow
struct PageFlow<'m, M: TextMeasure + ?Sized> {
    measure: &'m M,
    finished: Vec<PageLayout>,
    page: PageLayout,
    y: f32,
}

impl<'m, M: TextMeasure + ?Sized> PageFlow<'m, M> {
    fn new(sheet: Sheet, measure: &'m M) -> Self {
        Self {
            measure,
            finished: Vec::new(),
            page: PageLayout::new(sheet),
            y: MARGIN_MM,
        }
    }

    fn new_page(&mut self, sheet: Sheet) {
        let done = std::mem::replace(&mut self.page, PageLayout::new(sheet));
        self.finished.push(done);
        self.y = MARGIN_MM;
    }

    /// Start a new page of the same sheet if `height` does not fit
    fn ensure_room(&mut self, height: f32) {
        if self.y + height > PAGE_HEIGHT_MM - MARGIN_MM {
            let sheet = self.page.sheet;
            self.new_page(sheet);
        }
    }

    fn gap(&mut self, height: f32) {
        self.y += height;
    }

    fn baseline(&self, top: f32, height: f32, size: f32) -> f32 {
        top + height / 2.0 + 0.35 * size * PT_TO_MM
    }

    fn push_text(&mut self, x: f32, y: f32, size: f32, text: String) {
        if !text.is_empty() {
            self.page.ops.push(DrawOp::Text { x, y, size, text });
        }
    }

    fn centered_line(&mut self, text: &str, size: f32, height: f32) {
        self.ensure_room(height);
        let content_width = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
        let width = self.measure.text_width_mm(text, size);
        let x = MARGIN_MM + ((content_width - width) / 2.0).max(0.0);
        let y = self.baseline(self.y, height, size);
        self.push_text(x, y, size, text.to_string());
        self.y += height;
    }

    fn text_line(&mut self, text: &str, size: f32, height: f32) {
        self.ensure_room(height);
        let max_width = PAGE_WIDTH_MM - 2.0 * MARGIN_MM - 2.0 * CELL_PADDING_MM;
        let text = fit_text(self.measure, text, size, max_width);
        let y = self.baseline(self.y, height, size);
        self.push_text(MARGIN_MM + CELL_PADDING_MM, y, size, text);
        self.y += height;
    }

    /// Draw one bordered table row and return the texts as printed
    fn table_row(
        &mut self,
        cells: [&str; 3],
        height: f32,
        size: f32,
        filled: bool,
        overflow: Overflow,
    ) -> [String; 3] {
        self.ensure_room(height);
        let top = self.y;
        let mut printed: [String; 3] = Default::default();

        for (i, column) in table_columns().iter().enumerate() {
            self.page.ops.push(DrawOp::Cell {
                x: column.x,
                y: top,
                width: column.width,
                height,
                filled,
            });

            let max_width = column.width - 2.0 * CELL_PADDING_MM;
            let size = match overflow {
                Overflow::Shorten => size,
                Overflow::Shrink => shrink_to_fit(self.measure, cells[i], size, max_width),
            };
            let text = fit_text(self.measure, cells[i], size, max_width);
            let x = match column.align {
                Align::Left => column.x + CELL_PADDING_MM,
                Align::Center => {
                    let width = self.measure.text_width_mm(&text, size);
                    column.x + ((column.width - width) / 2.0).max(CELL_PADDING_MM)
                }
            };
            let baseline = self.baseline(top, height, size);
            self.push_text(x, baseline, size, text.clone());
            printed[i] = text;
        }

        self.y += height;
        printed
    }

    fn finish(mut self) -> Vec<PageLayout> {
        self.finished.push(self.page);
        self.finished
    }
}

/// Largest size up to `size` at which `text` fits `max_width`, floored at
/// [`MIN_ANSWER_FONT_SIZE`]
fn shrink_to_fit<M: TextMeasure + ?Sized>(measure: &M, text: &str, size: f32, max_width: f32) -> f32 {
    let width = measure.text_width_mm(text, size);
    if width <= max_width {
        return size;
    }
    // Advance widths scale linearly with size; round down to a tenth of a
    // point so the result never lands a hair over the limit
    let scaled = (size * max_width / width * 10.0).floor() / 10.0;
    scaled.max(MIN_ANSWER_FONT_SIZE)
}

/// Shorten `text` with a trailing ellipsis until it fits `max_width`
fn fit_text<M: TextMeasure + ?Sized>(measure: &M, text: &str, size: f32, max_width: f32) -> String {
    if measure.text_width_mm(text, size) <= max_width {
        return text.to_string();
    }

    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate = format!("{}{}", chars.iter().collect::<String>(), ELLIPSIS);
        if measure.text_width_mm(&candidate, size) <= max_width {
            return candidate;
        }
    }
    String::new()
}

// ============================================================================
// Sheets
// ============================================================================

/// `이름: ... / 날짜: YYYY-MM-DD` line under the practice title
pub fn header_line(display_name: Option<&str>, date: NaiveDate) -> String {
    format!(
        "이름: {}    /    날짜: {}",
        display_name.unwrap_or(NAME_PLACEHOLDER),
        date.format("%Y-%m-%d")
    )
}

/// Shaded header row followed by one row per pair, cells chosen by `reveal`
fn draw_table<M: TextMeasure + ?Sized>(
    flow: &mut PageFlow<'_, M>,
    pairs: &[WordPair],
    reveal: Reveal,
    size: f32,
    overflow: Overflow,
) {
    flow.table_row(COLUMN_LABELS, HEADER_ROW_MM, size, true, overflow);

    for (i, pair) in pairs.iter().enumerate() {
        let index = (i + 1).to_string();
        let (front, back) = reveal.cells(pair);
        let [_, front, back] = flow.table_row(
            [index.as_str(), front, back],
            DATA_ROW_MM,
            size,
            false,
            overflow,
        );
        flow.page.rows.push(TableRow {
            index: i + 1,
            front,
            back,
        });
    }
}

/// Lay out the practice sheet followed by the answer sheet
pub fn layout_worksheet<M: TextMeasure + ?Sized>(
    request: &RenderRequest,
    measure: &M,
) -> WorksheetLayout {
    let mut flow = PageFlow::new(Sheet::Practice, measure);

    flow.centered_line(PRACTICE_TITLE, TITLE_FONT_SIZE, TITLE_LINE_MM);
    flow.gap(2.0);
    flow.text_line(
        &header_line(request.display_name.as_deref(), request.date),
        INFO_FONT_SIZE,
        INFO_LINE_MM,
    );
    flow.gap(6.0);
    draw_table(
        &mut flow,
        &request.pairs,
        Reveal::from(request.hide_mode),
        PRACTICE_FONT_SIZE,
        Overflow::Shorten,
    );

    flow.new_page(Sheet::Answer);
    flow.centered_line(ANSWER_TITLE, TITLE_FONT_SIZE, TITLE_LINE_MM);
    flow.gap(4.0);
    // The answer key prints every term in full
    draw_table(
        &mut flow,
        &request.pairs,
        Reveal::Both,
        ANSWER_FONT_SIZE,
        Overflow::Shrink,
    );

    WorksheetLayout {
        pages: flow.finish(),
    }
}
