//! Page and grid geometry, measured in PostScript points.
//!
//! Everything in here is a pure function of the page size, the margins and the number
//! of rows/columns, so it can be checked without producing a document.

use static_assertions::const_assert;

/// Points per inch.
pub const INCH: f32 = 72.0;
/// Points per millimetre.
pub const MM: f32 = INCH / 25.4;

/// Height of the time-block (day sheet) or category (week sheet) header row.
pub const HEADER_HEIGHT: f32 = 16.0;
/// Height of the sub-bucket header row.
pub const SUBHEADER_HEIGHT: f32 = 16.0;
/// Height of the notes box below the day grid, room for 8 lines at 12pt.
pub const NOTES_HEIGHT: f32 = 8.0 * 12.0;
/// Vertical gap between the day grid and the notes box.
pub const NOTES_GAP: f32 = 5.0 * MM;
/// Vertical space left free on a day page, so the grid never spills onto a second page.
pub const PAGE_SLACK: f32 = 20.0 * MM;

/// Minimum width of the category column of the day sheet.
pub const DAY_LABEL_WIDTH: f32 = 30.0 * MM;
/// Approximate advance of a single character of a bold 9pt label.
pub const LABEL_CHAR_WIDTH: f32 = 5.0;
/// Horizontal padding around a label.
pub const LABEL_PADDING: f32 = 6.0;

/// Width of the time-block column of the week sheet.
pub const WEEK_LABEL_WIDTH: f32 = 18.0 * MM;
/// Width of every tick column of the week sheet.
pub const WEEK_COLUMN_WIDTH: f32 = 10.0 * MM;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    width: f32,
    height: f32,
}

impl PageSize {
    /// US Letter in portrait orientation.
    pub const LETTER: Self = Self::new(8.5 * INCH, 11.0 * INCH);

    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    #[must_use]
    pub const fn landscape(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Margins {
    /// The top margin is large enough to hold the running header.
    pub const SHEET: Self = Self {
        left: 0.25 * INCH,
        right: 0.25 * INCH,
        top: 1.0 * INCH,
        bottom: 0.25 * INCH,
    };
}

const_assert!(DAY_LABEL_WIDTH < PageSize::LETTER.width - Margins::SHEET.left - Margins::SHEET.right);
const_assert!(
    HEADER_HEIGHT + SUBHEADER_HEIGHT + NOTES_HEIGHT + PAGE_SLACK
        < PageSize::LETTER.height - Margins::SHEET.top - Margins::SHEET.bottom
);

#[must_use]
pub fn usable_width(page: PageSize, margins: Margins) -> f32 {
    page.width() - margins.left - margins.right
}

#[must_use]
pub fn usable_height(page: PageSize, margins: Margins) -> f32 {
    page.height() - margins.top - margins.bottom
}

/// Number of rows and columns of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCounts {
    /// Number of top-level column groups (time blocks or categories).
    pub groups: usize,
    /// Number of sub-bucket columns in every group.
    pub sub_buckets: usize,
    /// Number of body rows.
    pub body_rows: usize,
}

impl GridCounts {
    #[must_use]
    pub const fn data_columns(&self) -> usize {
        self.groups * self.sub_buckets
    }
}

/// Column widths and row heights of a day sheet, filling the usable page area.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGeometry {
    column_widths: Vec<f32>,
    row_heights: Vec<f32>,
    notes_width: f32,
}

impl DayGeometry {
    /// `label_chars` is the length of the longest category label, the label column is
    /// widened beyond [`DAY_LABEL_WIDTH`] if the label would not fit.
    #[must_use]
    pub fn compute(
        page: PageSize,
        margins: Margins,
        counts: GridCounts,
        label_chars: usize,
    ) -> Self {
        let width = usable_width(page, margins);
        let label_width = DAY_LABEL_WIDTH
            .max(label_chars as f32 * LABEL_CHAR_WIDTH + LABEL_PADDING)
            .min(width);

        let data_columns = counts.data_columns();
        let mut column_widths = Vec::with_capacity(data_columns + 1);
        column_widths.push(label_width);
        if data_columns > 0 {
            let column_width = (width - label_width) / data_columns as f32;
            column_widths.extend(std::iter::repeat(column_width).take(data_columns));
        }

        let body_height = usable_height(page, margins)
            - HEADER_HEIGHT
            - SUBHEADER_HEIGHT
            - NOTES_HEIGHT
            - PAGE_SLACK;

        let mut row_heights = Vec::with_capacity(counts.body_rows + 2);
        row_heights.extend([HEADER_HEIGHT, SUBHEADER_HEIGHT]);
        if counts.body_rows > 0 {
            let row_height = (body_height / counts.body_rows as f32).max(0.0);
            row_heights.extend(std::iter::repeat(row_height).take(counts.body_rows));
        }

        Self {
            column_widths,
            row_heights,
            notes_width: width,
        }
    }

    /// The label column followed by all tick columns.
    #[must_use]
    pub fn column_widths(&self) -> &[f32] {
        &self.column_widths
    }

    /// The two header rows followed by all body rows.
    #[must_use]
    pub fn row_heights(&self) -> &[f32] {
        &self.row_heights
    }

    #[must_use]
    pub fn notes_width(&self) -> f32 {
        self.notes_width
    }
}

/// Column widths of a week sheet, those do not depend on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekGeometry {
    column_widths: Vec<f32>,
}

impl WeekGeometry {
    #[must_use]
    pub fn compute(counts: GridCounts) -> Self {
        let mut column_widths = Vec::with_capacity(counts.data_columns() + 1);
        column_widths.push(WEEK_LABEL_WIDTH);
        column_widths.extend(std::iter::repeat(WEEK_COLUMN_WIDTH).take(counts.data_columns()));

        Self { column_widths }
    }

    #[must_use]
    pub fn column_widths(&self) -> &[f32] {
        &self.column_widths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    const COUNTS: GridCounts = GridCounts {
        groups: 6,
        sub_buckets: 3,
        body_rows: 8,
    };

    fn assert_close(left: f32, right: f32) {
        assert!((left - right).abs() < 0.01, "{} != {}", left, right);
    }

    #[test]
    fn test_letter() {
        assert_eq!(PageSize::LETTER.width(), 612.0);
        assert_eq!(PageSize::LETTER.height(), 792.0);
        assert_eq!(PageSize::LETTER.landscape(), PageSize::new(792.0, 612.0));
        assert_eq!(usable_width(PageSize::LETTER, Margins::SHEET), 576.0);
        assert_eq!(usable_height(PageSize::LETTER, Margins::SHEET), 702.0);
    }

    #[test]
    fn test_day_columns_fill_page() {
        let geometry = DayGeometry::compute(PageSize::LETTER, Margins::SHEET, COUNTS, 15);

        assert_eq!(geometry.column_widths().len(), 1 + 18);
        assert_close(geometry.column_widths()[0], DAY_LABEL_WIDTH);
        assert_close(
            geometry.column_widths().iter().sum::<f32>(),
            usable_width(PageSize::LETTER, Margins::SHEET),
        );

        // all tick columns share the same width
        let data = &geometry.column_widths()[1..];
        assert!(data.iter().all(|width| *width == data[0]));
        assert_close(data[0], (576.0 - DAY_LABEL_WIDTH) / 18.0);
    }

    #[test]
    fn test_day_label_column_grows() {
        let geometry = DayGeometry::compute(PageSize::LETTER, Margins::SHEET, COUNTS, 40);

        assert_close(
            geometry.column_widths()[0],
            40.0 * LABEL_CHAR_WIDTH + LABEL_PADDING,
        );
        assert_close(geometry.column_widths().iter().sum::<f32>(), 576.0);
    }

    #[test]
    fn test_day_rows() {
        let geometry = DayGeometry::compute(PageSize::LETTER, Margins::SHEET, COUNTS, 15);

        assert_eq!(geometry.row_heights().len(), 2 + 8);
        assert_eq!(&geometry.row_heights()[..2], &[HEADER_HEIGHT, SUBHEADER_HEIGHT]);

        let body = &geometry.row_heights()[2..];
        assert!(body.iter().all(|height| *height == body[0]));
        assert_close(
            body.iter().sum::<f32>(),
            792.0 - 72.0 - 18.0 - 16.0 - 16.0 - 96.0 - 20.0 * MM,
        );
        assert_eq!(geometry.notes_width(), 576.0);
    }

    #[test]
    fn test_week_columns() {
        let geometry = WeekGeometry::compute(COUNTS);

        assert_eq!(geometry.column_widths().len(), 19);
        assert_eq!(geometry.column_widths()[0], WEEK_LABEL_WIDTH);
        assert!(geometry.column_widths()[1..]
            .iter()
            .all(|width| *width == WEEK_COLUMN_WIDTH));
    }
}
