use core::fmt::{self, Write as _};
use std::path::Path;

use log::{debug, info};

use crate::config::Config;
use crate::document::{Document, Notes};
use crate::latex_string::LatexString;
use crate::layout::{Align, Cell, Fill, Margins, PageSize, Row, Table};
use crate::tex_render::TexRender;
use crate::utils::{self, Resources};

const PREAMBLE: &str = "preamble.tex";

/// Distance of the footer baseline from the bottom of the page.
const FOOTER_OFFSET: f32 = 32.0;

fn pt(value: f32) -> String {
    format!("{:.2}pt", value)
}

/// Width of the content of a cell spanning columns with a total width of `width`.
///
/// Every column carries its right rule, the first one also carries the left rule of
/// the table.
fn cell_width(width: f32, first: bool) -> String {
    format!(
        "\\dimexpr{}-2\\tabcolsep-{}\\arrayrulewidth\\relax",
        pt(width),
        if first { "2" } else { "" }
    )
}

#[must_use]
fn fill_preamble(preamble: &str, paper: PageSize, margins: Margins) -> String {
    preamble
        .replace("%%PAPER_WIDTH%%", &pt(paper.width()))
        .replace("%%PAPER_HEIGHT%%", &pt(paper.height()))
        .replace("%%MARGIN_LEFT%%", &pt(margins.left))
        .replace("%%MARGIN_RIGHT%%", &pt(margins.right))
        .replace("%%MARGIN_TOP%%", &pt(margins.top))
        .replace("%%MARGIN_BOTTOM%%", &pt(margins.bottom))
        // a negative footskip places the footer above the bottom margin
        .replace("%%FOOTSKIP%%", &pt(margins.bottom - FOOTER_OFFSET))
}

fn write_cell(
    out: &mut String,
    cell: &Cell,
    width: f32,
    first: bool,
    strut: Option<(f32, f32)>,
) -> fmt::Result {
    let align = match cell.alignment() {
        Align::Left => "\\raggedright",
        Align::Center => "\\centering",
    };

    write!(
        out,
        "\\multicolumn{{{}}}{{{}>{{{}\\arraybackslash}}p{{{}}}|}}{{",
        cell.columns(),
        if first { "|" } else { "" },
        align,
        cell_width(width, first),
    )?;

    match cell.background() {
        Some(Fill::WhiteSmoke) => out.push_str("\\cellcolor{whitesmoke}"),
        Some(Fill::LightGrey) => out.push_str("\\cellcolor{lightgrey}"),
        None => {}
    }

    if let Some((height, depth)) = strut {
        write!(out, "\\rule[-{}]{{0pt}}{{{}}}", pt(depth), pt(height))?;
    }

    let text = LatexString::from(cell.text());
    if cell.is_bold() && !text.is_empty() {
        write!(out, "\\textbf{{{}}}", text)?;
    } else {
        out.push_str(&text);
    }

    out.push('}');

    Ok(())
}

fn write_row(out: &mut String, table: &Table, row: &Row) -> fmt::Result {
    // a zero width rule forces the height of the row, the depth roughly centers the text
    let strut = row
        .height()
        .map(|height| (height, (height / 2.0 - table.font_size() / 3.0).max(0.0)));

    for (i, (cell, span)) in row.cells().iter().zip(row.spans()).enumerate() {
        if i > 0 {
            out.push_str(" & ");
        }

        let width: f32 = table.column_widths()[span].iter().sum();
        write_cell(out, cell, width, i == 0, if i == 0 { strut } else { None })?;
    }

    out.push_str(" \\\\ \\hline\n");

    Ok(())
}

fn write_table(out: &mut String, table: &Table) -> fmt::Result {
    writeln!(
        out,
        "\\begingroup\\fontsize{{{}}}{{{}}}\\selectfont",
        pt(table.font_size()),
        pt(table.font_size() * 1.3)
    )?;

    out.push_str("\\begin{tabular}{|");
    for (i, width) in table.column_widths().iter().enumerate() {
        write!(out, "p{{{}}}|", cell_width(*width, i == 0))?;
    }
    out.push_str("}\n\\hline\n");

    for row in table.rows() {
        write_row(out, table, row)?;
    }

    out.push_str("\\end{tabular}\\par\n\\endgroup\n");

    Ok(())
}

fn write_notes(out: &mut String, notes: &Notes) -> fmt::Result {
    writeln!(out, "\\vspace{{{}}}", pt(notes.gap))?;
    writeln!(
        out,
        "\\fbox{{\\parbox[t][\\dimexpr{}-2\\fboxsep-2\\fboxrule\\relax][t]{{\\dimexpr{}-2\\fboxsep-2\\fboxrule\\relax}}{{\\fontsize{{9pt}}{{11pt}}\\selectfont {}}}}}\\par",
        pt(notes.height),
        pt(notes.width),
        LatexString::from(Notes::TITLE),
    )
}

/// The running header as a lookup of the current page number.
fn write_header(out: &mut String, document: &Document) -> fmt::Result {
    let decorator = document.decorator();
    let units = decorator.units().len();

    out.push_str("\\newcommand{\\sheetheader}{%\n\\ifcase\\value{page}%\n");
    for page in 1..=units {
        if let Some(header) = decorator.header(page) {
            writeln!(out, "\\or {}%", LatexString::from(header.as_str()))?;
        }
    }

    // pages beyond the known units are labelled with the last unit
    if let Some(header) = decorator.header(units) {
        writeln!(out, "\\else {}%", LatexString::from(header.as_str()))?;
    }
    out.push_str("\\fi}\n");

    writeln!(
        out,
        "\\newcommand{{\\sheetfooter}}{{{}}}",
        LatexString::from(decorator.footer().as_str())
    )
}

pub struct LatexGenerator<'a> {
    config: &'a Config,
    document: &'a Document,
}

impl<'a> LatexGenerator<'a> {
    pub fn new(config: &'a Config, document: &'a Document) -> Self {
        Self { config, document }
    }

    /// Renders the whole document as LaTeX source.
    pub fn source(&self) -> anyhow::Result<String> {
        let preamble = Resources::get(PREAMBLE)
            .ok_or_else(|| anyhow::anyhow!("`{}` should be embedded in the binary", PREAMBLE))?;
        let preamble = std::str::from_utf8(preamble.data.as_ref())?;

        let mut out = fill_preamble(preamble, self.document.paper(), self.document.margins());
        out.push('\n');

        write_header(&mut out, self.document)?;

        out.push_str("\n\\begin{document}\n");

        let pages = self.document.pages();
        if pages.is_empty() {
            // LaTeX does not produce a file without any page
            out.push_str("\\null\n");
        }

        for (i, page) in pages.iter().enumerate() {
            debug!("writing page {} for {}", i + 1, page.unit());

            write_table(&mut out, page.table())?;

            if let Some(notes) = page.notes() {
                write_notes(&mut out, notes)?;
            }

            if i + 1 != pages.len() {
                out.push_str("\\newpage\n");
            }
        }

        out.push_str("\\end{document}\n");

        Ok(out)
    }

    pub fn generate(self, outpath: impl AsRef<Path>) -> anyhow::Result<()> {
        let source = self.source()?;

        if self.config.tex_only() {
            info!("Writing latex file");
            utils::write(outpath, source)?;
            return Ok(());
        }

        info!("Compiling latex file to pdf");

        let mut renderer = TexRender::from_bytes(source.into_bytes())?;

        if let Some(path) = self.config.latex_mk_path() {
            renderer.latex_mk_path(path);
        }

        if let Some(dir) = self.config.preserve_dir() {
            renderer.preserve_dir(dir);
        }

        utils::write(outpath, renderer.render()?)?;

        info!("Done");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ::time::macros::{date, datetime};
    use pretty_assertions::assert_eq;

    use crate::calendar::{resolve_units, SheetKind};

    fn source(kind: SheetKind, weeks: usize) -> String {
        let mut builder = Config::builder(kind, date!(2024 - 06 - 12));
        builder
            .weeks(weeks)
            .name("R&D Lab")
            .generated(datetime!(2024-06-01 08:00:00));
        let config = builder.build();

        let units = resolve_units(kind, config.start(), config.weeks()).unwrap();
        let document = Document::assemble(&config, units);

        LatexGenerator::new(&config, &document)
            .source()
            .expect("source should render")
    }

    #[test]
    fn test_page_breaks() {
        assert_eq!(source(SheetKind::Daily, 2).matches("\\newpage").count(), 13);
        assert_eq!(source(SheetKind::Weekly, 3).matches("\\newpage").count(), 2);
        assert_eq!(source(SheetKind::Weekly, 1).matches("\\newpage").count(), 0);
        assert!(source(SheetKind::Daily, 1).trim_end().ends_with("\\par\n\\end{document}"));
    }

    #[test]
    fn test_header_lookup() {
        let source = source(SheetKind::Daily, 1);

        assert!(source.contains("\\or R\\&D Lab – Daily Stats Sheet – Date 2024-06-10%"));
        assert!(source.contains("\\or R\\&D Lab – Daily Stats Sheet – Date 2024-06-16%"));
        assert!(source.contains("\\else R\\&D Lab – Daily Stats Sheet – Date 2024-06-16%"));
        assert_eq!(source.matches("\\or ").count(), 7);
        assert!(source.contains(
            "\\newcommand{\\sheetfooter}{Generated: 2024-06-01 08:00:00 | version: "
        ));
    }

    #[test]
    fn test_paper() {
        let daily = source(SheetKind::Daily, 1);
        assert!(daily.contains("paperwidth=612.00pt"));
        assert!(daily.contains("paperheight=792.00pt"));
        assert!(daily.contains("footskip=-14.00pt"));
        assert!(!daily.contains("%%"));

        let weekly = source(SheetKind::Weekly, 1);
        assert!(weekly.contains("paperwidth=792.00pt"));
        assert!(weekly.contains("paperheight=612.00pt"));
    }

    #[test]
    fn test_week_separators() {
        let source = source(SheetKind::Weekly, 1);

        let positions = [
            "Monday 2024-06-10",
            "Tuesday 2024-06-11",
            "Wednesday 2024-06-12",
            "Thursday 2024-06-13",
            "Friday 2024-06-14",
            "Saturday 2024-06-15",
            "Sunday 2024-06-16",
        ]
        .iter()
        .map(|label| {
            source
                .find(&format!("\\textbf{{{}}}", label))
                .unwrap_or_else(|| panic!("missing {}", label))
        })
        .collect::<Vec<_>>();

        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(source.contains("\\multicolumn{9}{|>{\\raggedright\\arraybackslash}p{"));
    }

    #[test]
    fn test_notes_only_on_day_pages() {
        assert_eq!(source(SheetKind::Daily, 1).matches("Notes:").count(), 7);
        assert_eq!(source(SheetKind::Weekly, 1).matches("Notes:").count(), 0);
    }

    #[test]
    fn test_empty_document() {
        let source = source(SheetKind::Daily, 0);

        assert!(source.contains("\\begin{document}\n\\null\n\\end{document}"));
        assert!(source.contains("\\ifcase\\value{page}%\n\\fi}"));
    }

    #[test]
    fn test_cell() {
        let mut out = String::new();
        write_cell(
            &mut out,
            &Cell::new("8a-10a").span(2).bold().fill(Fill::WhiteSmoke),
            100.0,
            false,
            Some((16.0, 5.0)),
        )
        .unwrap();

        assert_eq!(
            out,
            concat!(
                "\\multicolumn{2}{>{\\centering\\arraybackslash}",
                "p{\\dimexpr100.00pt-2\\tabcolsep-\\arrayrulewidth\\relax}|}",
                "{\\cellcolor{whitesmoke}\\rule[-5.00pt]{0pt}{16.00pt}\\textbf{8a-10a}}"
            )
        );
    }

    #[test]
    fn test_first_cell_carries_left_rule() {
        let mut out = String::new();
        write_cell(
            &mut out,
            &Cell::new("crafts").align(Align::Left),
            85.0,
            true,
            None,
        )
        .unwrap();

        assert_eq!(
            out,
            concat!(
                "\\multicolumn{1}{|>{\\raggedright\\arraybackslash}",
                "p{\\dimexpr85.00pt-2\\tabcolsep-2\\arrayrulewidth\\relax}|}",
                "{crafts}"
            )
        );
    }

    #[test]
    fn test_column_spec_matches_table_width() {
        let mut out = String::new();
        write_table(&mut out, &Table::new(vec![50.0, 25.0, 25.0], 9.0)).unwrap();

        assert!(out.contains(concat!(
            "\\begin{tabular}{|",
            "p{\\dimexpr50.00pt-2\\tabcolsep-2\\arrayrulewidth\\relax}|",
            "p{\\dimexpr25.00pt-2\\tabcolsep-\\arrayrulewidth\\relax}|",
            "p{\\dimexpr25.00pt-2\\tabcolsep-\\arrayrulewidth\\relax}|}\n"
        )));
        assert_eq!(out.matches("-2\\arrayrulewidth").count(), 1);
    }
}
