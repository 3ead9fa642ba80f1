use std::path::Path;

use super::{check_root, walk, ScanError};

/// Recreates every directory of `input_root` under `output_root`.
///
/// Existing directories are left alone, so mirroring twice is harmless.
/// Returns the number of directories visited, the root included.
pub fn mirror(input_root: &Path, output_root: &Path) -> Result<usize, ScanError> {
    check_root(input_root)?;

    create_dir(output_root)?;

    let mut count = 0;
    for entry in walk(input_root, Some(output_root)).filter(|e| e.file_type().is_dir()) {
        let Ok(relative) = entry.path().strip_prefix(input_root) else {
            continue;
        };
        create_dir(&output_root.join(relative))?;
        count += 1;
    }

    tracing::debug!(
        input = %input_root.display(),
        output = %output_root.display(),
        directories = count,
        "Mirrored directory structure"
    );
    Ok(count)
}

fn create_dir(path: &Path) -> Result<(), ScanError> {
    std::fs::create_dir_all(path).map_err(|source| ScanError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}
