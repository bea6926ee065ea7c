use std::fs;
use std::path::Path;

use stats_sheet::calendar::SheetKind;
use stats_sheet::{generate_stats_sheets, Config, SheetArgs};

/// Flags of a run that writes the latex source, so no TeX installation is needed.
#[must_use]
pub fn tex_args(start: &str, weeks: isize, outfile: &Path) -> SheetArgs {
    SheetArgs {
        start: Some(start.to_string()),
        weeks: Some(weeks),
        outfile: Some(outfile.to_path_buf()),
        tex: true,
        ..Default::default()
    }
}

/// Runs the generator and returns the written latex source.
#[allow(dead_code)]
pub fn generate(kind: SheetKind, args: &SheetArgs) -> String {
    let config = Config::try_from_args(kind, args).expect("args should be valid");
    generate_stats_sheets(&config).expect("generating should succeed");

    fs::read_to_string(config.output()).expect("output should have been written")
}

/// The page headers in the order of their page numbers.
#[must_use]
#[allow(dead_code)]
pub fn headers(source: &str) -> Vec<&str> {
    source
        .lines()
        .filter_map(|line| line.strip_prefix("\\or "))
        .map(|line| line.trim_end_matches('%'))
        .collect()
}

#[allow(dead_code)]
pub fn debug_setup() {
    std::env::set_var("RUST_BACKTRACE", "1");
    std::env::set_var("RUST_APP_LOG", "trace");
    color_backtrace::install();
    pretty_env_logger::init_custom_env("RUST_APP_LOG");
}
