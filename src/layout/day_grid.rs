use log::trace;

use crate::layout::{Align, Cell, DayGeometry, Fill, GridCounts, Margins, PageSize, Row, Table};
use crate::taxonomy::Taxonomy;

/// Font size of the day grid.
pub const DAY_FONT_SIZE: f32 = 9.0;

/// Title of the category column.
const CATEGORY_TITLE: &str = "Interaction Type";

/// Computes the geometry of a day grid for the taxonomy on a portrait letter page.
#[must_use]
pub fn day_geometry(taxonomy: &Taxonomy) -> DayGeometry {
    DayGeometry::compute(
        PageSize::LETTER,
        Margins::SHEET,
        GridCounts {
            groups: taxonomy.time_blocks().len(),
            sub_buckets: taxonomy.durations().len(),
            body_rows: taxonomy.categories().len(),
        },
        taxonomy.categories().longest(),
    )
}

/// Builds the grid of a single day.
///
/// The columns are the time blocks, each split into one column per duration. The first
/// two rows label those columns, followed by one row per category. Every other time
/// block is shaded in the body, so the columns are easier to follow on paper.
#[must_use]
pub fn build_day_table(taxonomy: &Taxonomy, geometry: &DayGeometry) -> Table {
    let durations = taxonomy.durations();
    let heights = geometry.row_heights();

    let mut table = Table::new(geometry.column_widths().to_vec(), DAY_FONT_SIZE);

    let header = core::iter::once(Cell::new(CATEGORY_TITLE))
        .chain(
            taxonomy
                .time_blocks()
                .iter()
                .map(|block| Cell::new(block.as_str()).span(durations.len())),
        )
        .map(|cell| cell.bold().fill(Fill::WhiteSmoke))
        .collect();
    table.push(Row::new(header).with_height(heights[0]));

    let sub_header = core::iter::once(Cell::new(" "))
        .chain(
            taxonomy
                .time_blocks()
                .iter()
                .flat_map(|_| durations.iter().map(|duration| Cell::new(duration.as_str()))),
        )
        .map(|cell| cell.bold().fill(Fill::LightGrey))
        .collect();
    table.push(Row::new(sub_header).with_height(heights[1]));

    for (category, height) in taxonomy.categories().iter().zip(&heights[2..]) {
        let mut cells = vec![Cell::new(category.as_str()).align(Align::Left)];

        for (block, _) in taxonomy.time_blocks().iter().enumerate() {
            let fill = (block % 2 == 1).then_some(Fill::LightGrey);
            cells.extend(durations.iter().map(|_| Cell::tick().fill(fill)));
        }

        table.push(Row::new(cells).with_height(*height));
    }

    trace!(
        "built day table with {} rows and {} columns",
        table.rows().len(),
        table.columns()
    );

    table
}
