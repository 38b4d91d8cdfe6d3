//! Small shared filesystem helpers.

use std::io::Read;
use std::path::Path;

use log::warn;

/// Reads a file as UTF-8, recovering from invalid byte sequences.
///
/// Mailbox exports and hand-edited ledger files occasionally carry stray
/// non-UTF-8 bytes (headers copied from legacy encodings). Try a straight
/// UTF-8 read first; on failure, re-read the raw bytes and run them through
/// an explicit lossy decode. Callers map the io error into their own
/// module's error type.
pub(crate) fn read_file_as_utf8(path: &Path) -> std::io::Result<String> {
    match std::fs::read_to_string(path) {
        Ok(s) => Ok(s),
        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
            warn!(
                "File {} is not valid UTF-8, falling back to lossy decode",
                path.display()
            );
            let mut file = std::fs::File::open(path)?;
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)?;

            let (decoded, _, _) = encoding_rs::UTF_8.decode(&bytes);
            Ok(decoded.into_owned())
        }
        Err(e) => Err(e),
    }
}
