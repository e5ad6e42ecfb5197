/*!
 * Tests for file system utilities
 */

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use submerger::file_utils::FileManager;
use crate::common;

#[test]
fn test_generate_output_path_shouldInsertSuffixBeforeExtension() {
    let output = FileManager::generate_output_path("/videos/movie.en.srt", "merged");
    assert_eq!(output, PathBuf::from("/videos/movie.en.merged.srt"));

    let relative = FileManager::generate_output_path("movie.srt", "dual");
    assert_eq!(relative, PathBuf::from("movie.dual.srt"));
}

#[test]
fn test_read_to_string_withMissingFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let result = FileManager::read_to_string(temp_dir.path().join("absent.srt"));

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("does not exist"));
    Ok(())
}

#[test]
fn test_read_to_string_withDirectory_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    assert!(FileManager::read_to_string(temp_dir.path()).is_err());
    Ok(())
}

#[test]
fn test_write_to_file_shouldCreateParentDirectories() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested").join("out.srt");

    FileManager::write_to_file(&path, "content", false)?;

    assert_eq!(fs::read_to_string(&path)?, "content");
    Ok(())
}

#[test]
fn test_write_to_file_withExistingFile_shouldRespectForceFlag() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "out.srt", "old")?;

    assert!(FileManager::write_to_file(&path, "new", false).is_err());
    assert_eq!(fs::read_to_string(&path)?, "old");

    FileManager::write_to_file(&path, "new", true)?;
    assert_eq!(fs::read_to_string(&path)?, "new");
    Ok(())
}

#[test]
fn test_file_exists_shouldDistinguishFilesFromDirectories() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "a.srt", "")?;

    assert!(FileManager::file_exists(&file));
    assert!(!FileManager::file_exists(temp_dir.path()));
    assert!(!FileManager::file_exists(temp_dir.path().join("b.srt")));
    Ok(())
}
