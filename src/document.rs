use ::time::PrimitiveDateTime;
use log::{debug, warn};

use crate::calendar::{format_timestamp, DateUnit, SheetKind};
use crate::config::Config;
use crate::layout::{
    build_day_table, build_week_table, day_geometry, week_geometry, Margins, PageSize, Table,
    NOTES_GAP, NOTES_HEIGHT,
};

/// The box for free-form notes below the grid of a day page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Notes {
    pub width: f32,
    pub height: f32,
    /// Space between the grid and the box.
    pub gap: f32,
}

impl Notes {
    pub const TITLE: &'static str = "Notes:";
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    unit: DateUnit,
    table: Table,
    notes: Option<Notes>,
}

impl Page {
    #[must_use]
    pub fn unit(&self) -> DateUnit {
        self.unit
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    #[must_use]
    pub fn notes(&self) -> Option<&Notes> {
        self.notes.as_ref()
    }
}

/// Produces the running header and footer of every physical page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDecorator {
    name: String,
    kind: SheetKind,
    units: Vec<DateUnit>,
    generated: String,
    version: String,
}

impl PageDecorator {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: SheetKind,
        units: Vec<DateUnit>,
        generated: PrimitiveDateTime,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            units,
            generated: format_timestamp(generated),
            version: version.into(),
        }
    }

    /// Returns the unit printed on the 1-indexed `page`.
    ///
    /// There is exactly one page per unit, if the page number exceeds the number of
    /// units anyway, the last unit is used so the page still gets a label. Debug builds
    /// treat that case as a bug and panic, except in unit tests.
    #[must_use]
    pub fn unit_for_page(&self, page: usize) -> Option<DateUnit> {
        let index = page.saturating_sub(1);

        if let Some(unit) = self.units.get(index) {
            return Some(*unit);
        }

        let last = self.units.last().copied();
        if let Some(unit) = last {
            debug_assert!(
                cfg!(test),
                "page {} exceeds the {} known date unit(s)",
                page,
                self.units.len()
            );
            warn!(
                "page {} exceeds the {} known date unit(s), labelling it with {}",
                page,
                self.units.len(),
                unit
            );
        }

        last
    }

    /// The header of the 1-indexed `page`, `None` if there are no units at all.
    #[must_use]
    pub fn header(&self, page: usize) -> Option<String> {
        self.unit_for_page(page)
            .map(|unit| format!("{} – {} – {}", self.name, self.kind.title(), unit))
    }

    /// The footer is the same on every page.
    #[must_use]
    pub fn footer(&self) -> String {
        format!("Generated: {} | version: {}", self.generated, self.version)
    }

    #[must_use]
    pub fn units(&self) -> &[DateUnit] {
        &self.units
    }
}

/// All pages of a sheet, one per date unit, in chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    paper: PageSize,
    margins: Margins,
    pages: Vec<Page>,
    decorator: PageDecorator,
}

impl Document {
    #[must_use]
    pub fn assemble(config: &Config, units: Vec<DateUnit>) -> Self {
        let kind = config.kind();
        let taxonomy = config.taxonomy();

        let pages = match kind {
            SheetKind::Daily => {
                // every day looks the same, only the header differs
                let geometry = day_geometry(taxonomy);
                let table = build_day_table(taxonomy, &geometry);
                let notes = Notes {
                    width: geometry.notes_width(),
                    height: NOTES_HEIGHT,
                    gap: NOTES_GAP,
                };

                units
                    .iter()
                    .map(|unit| Page {
                        unit: *unit,
                        table: table.clone(),
                        notes: Some(notes),
                    })
                    .collect::<Vec<_>>()
            }
            SheetKind::Weekly => {
                let geometry = week_geometry(taxonomy);

                units
                    .iter()
                    .map(|unit| Page {
                        unit: *unit,
                        table: build_week_table(taxonomy, unit.date(), &geometry),
                        notes: None,
                    })
                    .collect::<Vec<_>>()
            }
        };

        debug!("assembled {} page(s)", pages.len());

        Self {
            paper: page_size(kind),
            margins: Margins::SHEET,
            pages,
            decorator: PageDecorator::new(
                config.name(),
                kind,
                units,
                config.generated(),
                config.version(),
            ),
        }
    }

    #[must_use]
    pub fn paper(&self) -> PageSize {
        self.paper
    }

    #[must_use]
    pub fn margins(&self) -> Margins {
        self.margins
    }

    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    #[must_use]
    pub fn decorator(&self) -> &PageDecorator {
        &self.decorator
    }

    /// Explicit page breaks are only placed between pages.
    #[must_use]
    pub fn page_breaks(&self) -> usize {
        self.pages.len().saturating_sub(1)
    }
}

/// Day sheets are printed in portrait, the wide week sheets in landscape.
#[must_use]
pub const fn page_size(kind: SheetKind) -> PageSize {
    match kind {
        SheetKind::Daily => PageSize::LETTER,
        SheetKind::Weekly => PageSize::LETTER.landscape(),
    }
}
