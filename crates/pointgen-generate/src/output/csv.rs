use std::path::Path;

use pointgen_core::{HEADER, OutputRow};

use crate::encoding::OutputEncoding;
use crate::errors::GenerationError;
use crate::output::atomic::write_bytes_atomic;

/// Render header and rows as CSV text.
///
/// Comma delimiter, quoting only where needed, CRLF record terminator.
pub fn render_csv(rows: &[OutputRow]) -> Result<String, GenerationError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for row in rows {
        writer.write_record(row.fields())?;
    }

    writer.flush()?;
    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    // Every field went in as `str`, so the buffer is valid UTF-8.
    String::from_utf8(bytes).map_err(|err| {
        GenerationError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    })
}

/// Write a point table to `path`, returning the number of bytes written.
pub fn write_point_table_csv(
    path: &Path,
    rows: &[OutputRow],
    encoding: OutputEncoding,
) -> Result<u64, GenerationError> {
    let text = render_csv(rows)?;
    let bytes = encoding.encode(&text)?;
    write_bytes_atomic(path, &bytes)?;
    Ok(bytes.len() as u64)
}
