use crate::config;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Create a directory (and all parents) if it doesn't exist, and return the path.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    let p = path.as_ref();
    fs::create_dir_all(p)?;
    Ok(p.to_path_buf())
}

/// Ensure the parent directory of a *file path* exists (no-op if none).
pub fn ensure_parent_dir<P: AsRef<Path>>(file_path: P) -> io::Result<()> {
    if let Some(parent) = file_path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Global storage root (absolute), from `config::storage_root()`.
/// If relative in env, resolve against current_dir().
pub fn storage_root() -> PathBuf {
    let p = PathBuf::from(config::storage_root());
    if p.is_absolute() {
        p
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(p)
    }
}

/// Folder for one student's uploads: {STORAGE_ROOT}/students/student_{student_id}
pub fn student_dir(student_id: i64) -> PathBuf {
    storage_root()
        .join("students")
        .join(format!("student_{student_id}"))
}

/// Build a path for a stored profile photo (does not create).
/// Example: profile_photo_path(42, "photo_1700000000000.jpg") → .../students/student_42/photo_1700000000000.jpg
pub fn profile_photo_path(student_id: i64, filename: &str) -> PathBuf {
    student_dir(student_id).join(filename)
}
