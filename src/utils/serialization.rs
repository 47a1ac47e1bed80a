use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

fn options() -> impl Options {
    bincode::DefaultOptions::new().with_no_limit()
}

pub fn serialize_bytes<T: Serialize>(data: &T) -> Result<Vec<u8>> {
    Ok(options().serialize(data)?)
}

pub fn deserialize_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(options().deserialize(bytes)?)
}

pub fn save_to_disk<T: Serialize, TPath: AsRef<Path>>(data: &T, path: TPath) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    options().serialize_into(writer, data)?;
    Ok(())
}

pub fn load_from_disk<T: DeserializeOwned, TPath: AsRef<Path>>(path: TPath) -> Result<T> {
    let reader = BufReader::new(File::open(path)?);
    Ok(options().deserialize_from(reader)?)
}

pub fn save_json<T: Serialize, TPath: AsRef<Path>>(data: &T, path: TPath) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, data)?;
    Ok(())
}

pub fn load_json<T: DeserializeOwned, TPath: AsRef<Path>>(path: TPath) -> Result<T> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
