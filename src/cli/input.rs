//! Reading JSON records from a file or stdin.

use std::path::Path;

use serde::de::DeserializeOwned;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::{Error, Result};

/// Read all of `reader` as UTF-8, rejecting blank input
pub async fn read_from<R>(mut reader: R) -> Result<String>
where
    R: AsyncRead + Unpin,
{
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer).await?;

    if buffer.trim().is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(buffer)
}

/// Read input from `path`, or from stdin when no path is given
pub async fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => read_from(tokio::fs::File::open(path).await?).await,
        None => read_from(tokio::io::stdin()).await,
    }
}

/// Decode a JSON document into a record type
pub fn parse_json<T: DeserializeOwned>(input: &str) -> Result<T> {
    Ok(serde_json::from_str(input)?)
}
