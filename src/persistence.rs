//! Opaque-blob persistence for trained forecasters
//!
//! The durable store itself (disk, object storage, cache) is a collaborator
//! outside the core; this module only defines the blob format. The format is
//! plain serde_json over the forecaster's full state, so a load of a save
//! reproduces `predict_path` output exactly.

use crate::error::Result;
use crate::forecaster::Forecaster;
use crate::models::Regressor;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Serialize a forecaster to an opaque blob
pub fn to_bytes<M>(forecaster: &Forecaster<M>) -> Result<Vec<u8>>
where
    M: Regressor + Serialize,
{
    Ok(serde_json::to_vec(forecaster)?)
}

/// Restore a forecaster from an opaque blob
pub fn from_bytes<M>(bytes: &[u8]) -> Result<Forecaster<M>>
where
    M: Regressor + DeserializeOwned,
{
    Ok(serde_json::from_slice(bytes)?)
}

/// Save a forecaster to a file
pub fn save_to_file<M, P>(forecaster: &Forecaster<M>, path: P) -> Result<()>
where
    M: Regressor + Serialize,
    P: AsRef<Path>,
{
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer(writer, forecaster)?;
    Ok(())
}

/// Load a forecaster from a file
pub fn load_from_file<M, P>(path: P) -> Result<Forecaster<M>>
where
    M: Regressor + DeserializeOwned,
    P: AsRef<Path>,
{
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}
