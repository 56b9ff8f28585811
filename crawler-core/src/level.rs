//! Plaintext level loading.
//!
//! A level file is a list of rows separated by `\n`. A `*` marks a walkable
//! cell, every other byte is a solid cell. There is no header; the map is
//! always [`MAP_WIDTH`] by [`MAP_HEIGHT`].

use std::path::{Path, PathBuf};

use crate::map::{Grid, MAP_HEIGHT, MAP_WIDTH};

/// Errors that can occur while loading a level.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("Failed to read level file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Map width exceeded on row {row}")]
    WidthExceeded { row: usize },

    #[error("Map height exceeded")]
    HeightExceeded,
}

/// Parses level data into the grid.
///
/// The grid is cleared first. Parsing stops at the first row or column that
/// does not fit the map; cells marked up to that point stay marked and the
/// classifier is not run. On success every walkable cell is classified.
pub fn parse_level(grid: &mut Grid, data: &[u8]) -> Result<(), LevelError> {
    grid.clear();

    let (mut x, mut y) = (0usize, 0usize);

    for &byte in data {
        match byte {
            b'*' => {
                if x >= MAP_WIDTH {
                    return Err(LevelError::WidthExceeded { row: y });
                }
                if y >= MAP_HEIGHT {
                    return Err(LevelError::HeightExceeded);
                }
                if let Some(cell) = grid.get_mut(x as i32, y as i32) {
                    cell.is_path = true;
                }
                x += 1;
            }
            b'\n' => {
                x = 0;
                y += 1;
            }
            _ => x += 1,
        }

        if x > MAP_WIDTH {
            return Err(LevelError::WidthExceeded { row: y });
        }
        if y > MAP_HEIGHT {
            return Err(LevelError::HeightExceeded);
        }
    }

    grid.classify();
    Ok(())
}

/// Loads a level file into the grid.
///
/// If the file cannot be read the grid is left cleared. Failures are logged
/// here so callers may simply keep going with whatever the grid holds.
pub fn load_level(grid: &mut Grid, path: impl AsRef<Path>) -> Result<(), LevelError> {
    let path = path.as_ref();
    grid.clear();

    let result = std::fs::read(path)
        .map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })
        .and_then(|data| parse_level(grid, &data));

    match &result {
        Ok(()) => log::info!(
            "Loaded level {} with {} path cells",
            path.display(),
            grid.path_cells().count()
        ),
        Err(e) => log::error!("{e}"),
    }

    result
}

/// Renders the walkable cells of the grid back to level text.
///
/// Solid cells are written as `.`, and trailing solid cells and empty trailing
/// rows are dropped.
pub fn level_to_string(grid: &Grid) -> String {
    let mut rows: Vec<String> = (0..MAP_HEIGHT as i32)
        .map(|y| {
            let row: String = (0..MAP_WIDTH as i32)
                .map(|x| if grid.is_path(x, y) { '*' } else { '.' })
                .collect();
            row.trim_end_matches('.').to_string()
        })
        .collect();

    while rows.last().is_some_and(|r| r.is_empty()) {
        rows.pop();
    }

    let mut out = rows.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}
