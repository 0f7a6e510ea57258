//! A module which contains some utility functions
use serde::{de::DeserializeOwned, Serialize};
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use super::SegResult;

/// Write something which can be serialized to a json file at the specified path.
/// Returns an Error if the file can't be written or the directory can't be created.
pub fn write_serializable_to_json<P: AsRef<Path>>(
    output: &impl Serialize,
    path: P,
) -> SegResult<()> {
    let json_string = serde_json::to_string(output)?;

    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file_handle = File::create(path)?;
    file_handle.write_all(json_string.as_bytes())?;

    Ok(())
}

/// Reads all records of a header-less csv file at `path`.
/// Each row is deserialized into one `R`, e.g. a tuple `(i64, i64)`.
pub fn read_csv_records<R, P>(path: P) -> SegResult<Vec<R>>
where
    R: DeserializeOwned,
    P: AsRef<Path>,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)?;
    let mut records = Vec::new();
    for record in reader.deserialize() {
        records.push(record?);
    }
    Ok(records)
}

/// Finds the project root, that is the root of the git repo.
/// In particular, this will return the path to the closest ancestor to the current working directory,
/// which contains a `.git` folder.
/// If no such ancestor is found, the current working directory is retuned.
pub fn find_project_root() -> SegResult<PathBuf> {
    let cwd = env::current_dir()?;

    #[allow(clippy::redundant_closure)]
    Ok(cwd
        .ancestors()
        .find(|ancestor| has_git_directory(ancestor))
        .map(PathBuf::from)
        .unwrap_or_else(|| cwd))
}

fn has_git_directory<P>(path: P) -> bool
where
    P: AsRef<Path>,
{
    let mut path_buf = path.as_ref().to_path_buf();
    path_buf.push(".git");
    // This also checks if the path exists.
    path_buf.is_dir()
}

/// Gives you either the given path or a your specified relative path on the project root
/// If `path = Some(path_buf)` returns cloned `path_buf`, else `project_root/{relative_path}`
/// If the parent folder does not exist yet, it will be created.
pub fn path_or_relative_to_project_root(
    path: Option<&PathBuf>,
    relative_path: &str,
) -> SegResult<PathBuf> {
    match path {
        Some(path) => Ok(path.clone()),
        None => {
            let mut result = find_project_root()?;
            result.push(relative_path);

            if let Some(parent) = result.parent() {
                fs::create_dir_all(parent)?;
            }
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_is_returned_unchanged() -> SegResult<()> {
        let path = PathBuf::from("/tmp/somewhere/out.json");
        assert_eq!(
            path_or_relative_to_project_root(Some(&path), "data/ignored.json")?,
            path
        );
        Ok(())
    }

    #[test]
    fn csv_and_json_round_trip_through_files() -> SegResult<()> {
        let dir = env::temp_dir().join(format!("common_util_test_{}", std::process::id()));
        let csv_path = dir.join("bookings.csv");
        fs::create_dir_all(&dir)?;
        fs::write(&csv_path, "10, 20\n50,60\n")?;

        let records: Vec<(i64, i64)> = read_csv_records(&csv_path)?;
        assert_eq!(records, vec![(10, 20), (50, 60)]);

        let json_path = dir.join("nested").join("out.json");
        write_serializable_to_json(&records, &json_path)?;
        assert_eq!(fs::read_to_string(&json_path)?, "[[10,20],[50,60]]");

        fs::remove_dir_all(&dir)?;
        Ok(())
    }
}
