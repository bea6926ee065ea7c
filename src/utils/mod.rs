use std::fs;
use std::io;
use std::io::{BufReader, Read};
use std::path::Path;

use log::trace;
use rust_embed::RustEmbed;
use serde::de::DeserializeOwned;

#[derive(RustEmbed)]
#[folder = "resources/"]
pub struct Resources;

pub fn toml_from_reader<R, T>(reader: R) -> anyhow::Result<T>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut reader = BufReader::new(reader);
    let mut data = String::with_capacity(4 * 1024);
    reader.read_to_string(&mut data)?;
    Ok(toml::from_str(&data)?)
}

pub fn read(path: impl AsRef<Path>) -> io::Result<Vec<u8>> {
    trace!("reading from: {}", path.as_ref().display());
    fs::read(path)
}

pub fn write(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> io::Result<()> {
    trace!("writing to: {}", path.as_ref().display());
    fs::write(path, contents)
}

pub fn create_dir_all(path: impl AsRef<Path>) -> io::Result<()> {
    trace!("creating directory: {}", path.as_ref().display());
    fs::create_dir_all(path)
}
