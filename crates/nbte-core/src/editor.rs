use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use zip::CompressionMethod;
use zip::write::FileOptions;

// Zip backup of a document file (non-destructive)
pub fn zip_backup_file(path: &Path) -> io::Result<PathBuf> {
    if !path.is_file() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a file"));
    }
    let parent = path.parent().unwrap_or(Path::new("."));
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    let ts = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let zip_name = format!("{}_{}.zip", name, ts);
    let dest = parent.join(zip_name);

    let file = fs::File::create(&dest)?;
    let mut zip = zip::ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);
    zip.start_file(name, options)?;
    let data = fs::read(path)?;
    zip.write_all(&data)?;
    zip.finish()?;
    Ok(dest)
}
