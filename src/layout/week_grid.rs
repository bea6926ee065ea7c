use ::time::Date;
use log::trace;

use crate::calendar::{DateUnit, DayLabel};
use crate::layout::{Align, Cell, Fill, GridCounts, Row, Table, WeekGeometry};
use crate::taxonomy::Taxonomy;

/// The week grid has to fit on one page, so it is printed in a tiny font.
pub const WEEK_FONT_SIZE: f32 = 6.0;

const TIME_BLOCK_TITLE: &str = "Time";

#[must_use]
pub fn week_geometry(taxonomy: &Taxonomy) -> WeekGeometry {
    WeekGeometry::compute(GridCounts {
        groups: taxonomy.categories().len(),
        sub_buckets: taxonomy.durations().len(),
        body_rows: 7 * (taxonomy.time_blocks().len() + 1),
    })
}

/// Builds the grid of the week starting at `week_start`.
///
/// The columns are the categories, each split into one column per duration. Every day
/// starts with a separator row holding its name and date, followed by one row per
/// time block.
#[must_use]
pub fn build_week_table(
    taxonomy: &Taxonomy,
    week_start: Date,
    geometry: &WeekGeometry,
) -> Table {
    let durations = taxonomy.durations();
    let mut table = Table::new(geometry.column_widths().to_vec(), WEEK_FONT_SIZE);
    let columns = table.columns();

    let header = core::iter::once(Cell::new(TIME_BLOCK_TITLE))
        .chain(
            taxonomy
                .categories()
                .iter()
                .map(|category| Cell::new(category.as_str()).span(durations.len())),
        )
        .map(|cell| cell.bold().fill(Fill::WhiteSmoke))
        .collect();
    table.push(Row::new(header));

    let sub_header = core::iter::once(Cell::new(" "))
        .chain(
            taxonomy
                .categories()
                .iter()
                .flat_map(|_| durations.iter().map(|duration| Cell::new(duration.as_str()))),
        )
        .map(|cell| cell.bold().fill(Fill::LightGrey))
        .collect();
    table.push(Row::new(sub_header));

    for day in DateUnit::Week(week_start).days() {
        table.push(Row::new(vec![Cell::new(DayLabel(day).to_string())
            .span(columns)
            .bold()
            .fill(Fill::LightGrey)
            .align(Align::Left)]));

        for block in taxonomy.time_blocks().iter() {
            let mut cells = Vec::with_capacity(columns);
            cells.push(Cell::new(block.as_str()).align(Align::Left));
            cells.extend((1..columns).map(|_| Cell::tick()));

            table.push(Row::new(cells));
        }
    }

    trace!(
        "built week table for {} with {} rows and {} columns",
        week_start,
        table.rows().len(),
        columns
    );

    table
}
