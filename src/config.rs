use std::fs::File;
use std::path::{Path, PathBuf};

use ::time::{Date, OffsetDateTime, PrimitiveDateTime};
use anyhow::Context;
use log::debug;
use serde::Deserialize;

use crate::calendar::{parse_date, SheetKind};
use crate::taxonomy::Taxonomy;
use crate::utils;

pub const DEFAULT_OUTPUT: &str = "stats_sheets.pdf";
pub const DEFAULT_NAME: &str = "Library";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderSettings {
    latex_mk_path: Option<PathBuf>,
}

/// The optional settings file.
///
/// ```toml
/// [taxonomy]
/// categories = ["crafts", "other"]
/// durations = [" "]
/// time_blocks = ["8a-12p", "12p-4p"]
///
/// [render]
/// latex_mk_path = "/usr/bin/latexmk"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    taxonomy: Option<Taxonomy>,
    #[serde(default)]
    render: RenderSettings,
}

impl Settings {
    pub fn try_from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open `{}`", path.display()))?;

        utils::toml_from_reader(file).with_context(|| format!("failed to parse `{}`", path.display()))
    }

    #[must_use]
    pub fn taxonomy(&self) -> Option<&Taxonomy> {
        self.taxonomy.as_ref()
    }

    #[must_use]
    pub fn latex_mk_path(&self) -> Option<&Path> {
        self.render.latex_mk_path.as_deref()
    }
}

/// The flags of a generator command, as they were passed on the command line.
#[derive(Debug, Clone, Default)]
pub struct SheetArgs {
    pub start: Option<String>,
    pub weeks: Option<isize>,
    pub outfile: Option<PathBuf>,
    pub name: Option<String>,
    pub settings: Option<PathBuf>,
    pub preserve_dir: Option<PathBuf>,
    pub tex: bool,
}

pub struct Config {
    kind: SheetKind,
    start: Date,
    weeks: usize,
    output: PathBuf,
    name: String,
    taxonomy: Taxonomy,
    latex_mk_path: Option<PathBuf>,
    preserve_dir: Option<PathBuf>,
    tex_only: bool,
    generated: PrimitiveDateTime,
}

pub struct ConfigBuilder {
    kind: SheetKind,
    start: Date,
    weeks: usize,
    output: Option<PathBuf>,
    name: Option<String>,
    taxonomy: Option<Taxonomy>,
    latex_mk_path: Option<PathBuf>,
    preserve_dir: Option<PathBuf>,
    tex_only: bool,
    generated: Option<PrimitiveDateTime>,
}

impl ConfigBuilder {
    fn new(kind: SheetKind, start: Date) -> Self {
        Self {
            kind,
            start,
            weeks: 1,
            output: None,
            name: None,
            taxonomy: None,
            latex_mk_path: None,
            preserve_dir: None,
            tex_only: false,
            generated: None,
        }
    }

    pub fn weeks(&mut self, weeks: usize) -> &mut Self {
        self.weeks = weeks;
        self
    }

    pub fn output(&mut self, output: impl Into<PathBuf>) -> &mut Self {
        self.output = Some(output.into());
        self
    }

    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn taxonomy(&mut self, taxonomy: Taxonomy) -> &mut Self {
        self.taxonomy = Some(taxonomy);
        self
    }

    pub fn latex_mk_path(&mut self, latex_mk_path: impl Into<PathBuf>) -> &mut Self {
        self.latex_mk_path = Some(latex_mk_path.into());
        self
    }

    pub fn preserve_dir(&mut self, preserve_dir: impl Into<PathBuf>) -> &mut Self {
        self.preserve_dir = Some(preserve_dir.into());
        self
    }

    /// Write the LaTeX source instead of compiling it to a pdf.
    pub fn tex_only(&mut self, tex_only: bool) -> &mut Self {
        self.tex_only = tex_only;
        self
    }

    pub fn generated(&mut self, generated: PrimitiveDateTime) -> &mut Self {
        self.generated = Some(generated);
        self
    }

    pub fn settings(&mut self, settings: Settings) -> &mut Self {
        if let Some(path) = settings.latex_mk_path() {
            self.latex_mk_path(path);
        }

        if let Some(taxonomy) = settings.taxonomy {
            self.taxonomy(taxonomy);
        }

        self
    }

    #[must_use]
    pub fn build(self) -> Config {
        Config {
            kind: self.kind,
            start: self.start,
            weeks: self.weeks,
            output: self
                .output
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            name: self.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            taxonomy: self.taxonomy.unwrap_or_default(),
            latex_mk_path: self.latex_mk_path,
            preserve_dir: self.preserve_dir,
            tex_only: self.tex_only,
            generated: self.generated.unwrap_or_else(now),
        }
    }
}

/// The current local time, or UTC if the local offset can not be determined.
fn now() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    PrimitiveDateTime::new(now.date(), now.time())
}

impl Config {
    #[must_use]
    pub fn builder(kind: SheetKind, start: Date) -> ConfigBuilder {
        ConfigBuilder::new(kind, start)
    }

    /// Validates the command line flags and loads the settings file.
    ///
    /// Nothing is written by this function, so a bad flag never leaves a partial output.
    pub fn try_from_args(kind: SheetKind, args: &SheetArgs) -> anyhow::Result<Self> {
        let start = match &args.start {
            Some(start) => parse_date(start)?,
            None => now().date(),
        };

        let mut builder = Self::builder(kind, start);

        // a negative number of weeks is an empty range
        builder.weeks(
            args.weeks
                .map_or(1, |weeks| usize::try_from(weeks).unwrap_or_default()),
        );

        if let Some(outfile) = &args.outfile {
            builder.output(outfile);
        }

        if let Some(name) = &args.name {
            builder.name(name);
        }

        if let Some(path) = &args.settings {
            debug!("loading settings from {}", path.display());
            builder.settings(Settings::try_from_file(path)?);
        }

        if let Some(dir) = &args.preserve_dir {
            builder.preserve_dir(dir);
        }

        builder.tex_only(args.tex);

        Ok(builder.build())
    }

    #[must_use]
    pub fn kind(&self) -> SheetKind {
        self.kind
    }

    /// The reference date, any day of the first week.
    #[must_use]
    pub fn start(&self) -> Date {
        self.start
    }

    #[must_use]
    pub fn weeks(&self) -> usize {
        self.weeks
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn latex_mk_path(&self) -> Option<&Path> {
        self.latex_mk_path.as_deref()
    }

    pub fn preserve_dir(&self) -> Option<&Path> {
        self.preserve_dir.as_deref()
    }

    #[must_use]
    pub fn tex_only(&self) -> bool {
        self.tex_only
    }

    #[must_use]
    pub fn generated(&self) -> PrimitiveDateTime {
        self.generated
    }

    #[must_use]
    pub fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
