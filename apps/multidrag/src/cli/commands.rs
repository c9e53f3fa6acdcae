//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::script::{parse_script, replay};
use multidrag_core::{
    BoardError, BoardSession, EntityStore, Platform,
    primitives::{MAX_BOARD_COLUMNS, MAX_BOARD_ITEMS},
    seed,
};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum board file size (16 MB).
const MAX_BOARD_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Maximum script file size (4 MB).
const MAX_SCRIPT_FILE_SIZE: u64 = 4 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), BoardError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| BoardError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(BoardError::SerializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Resolve an input path, requiring an existing regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, BoardError> {
    let canonical = path.canonicalize().map_err(|e| {
        BoardError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(BoardError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Resolve an output path, requiring an existing parent directory.
fn validate_output_path(path: &Path) -> Result<PathBuf, BoardError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        BoardError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(BoardError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| BoardError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Write the demo board to `output`.
pub fn cmd_init(output: &Path, force: bool, json_mode: bool) -> Result<(), BoardError> {
    if output.exists() && !force {
        return Err(BoardError::IoError(format!(
            "Board file '{}' already exists. Use --force to overwrite.",
            output.display()
        )));
    }

    let board = seed::demo_board();
    let written = save_board(&board, output)?;

    if json_mode {
        print_json(&serde_json::json!({
            "path": written.to_string_lossy(),
            "columns": board.column_order.len(),
            "items": board.items.len()
        }));
        return Ok(());
    }

    println!(
        "Initialized demo board at {:?} ({} columns, {} items)",
        written,
        board.column_order.len(),
        board.items.len()
    );
    Ok(())
}

// =============================================================================
// SHOW COMMAND
// =============================================================================

/// Print the board.
pub fn cmd_show(
    board_path: Option<&Path>,
    platform: Platform,
    json_mode: bool,
) -> Result<(), BoardError> {
    let session = BoardSession::with_platform(load_board(board_path)?, platform);
    print_session(&session, json_mode)
}

// =============================================================================
// VALIDATE COMMAND
// =============================================================================

/// Check board invariants. Loading already validates; this reports the result.
pub fn cmd_validate(board_path: Option<&Path>, json_mode: bool) -> Result<(), BoardError> {
    let board = load_board(board_path)?;
    let unplaced = board.items.len().saturating_sub(board.placed_count());

    if json_mode {
        print_json(&serde_json::json!({
            "valid": true,
            "columns": board.column_order.len(),
            "items": board.items.len(),
            "placed": board.placed_count(),
            "unplaced": unplaced
        }));
        return Ok(());
    }

    println!("Board is valid");
    println!("  Columns:  {}", board.column_order.len());
    println!("  Items:    {}", board.items.len());
    println!("  Placed:   {}", board.placed_count());
    if unplaced > 0 {
        println!("  Unplaced: {}", unplaced);
    }
    Ok(())
}

// =============================================================================
// REPLAY COMMAND
// =============================================================================

/// Replay a script of host events.
pub fn cmd_replay(
    board_path: Option<&Path>,
    platform: Platform,
    json_mode: bool,
    script: &Path,
    save: bool,
) -> Result<(), BoardError> {
    // Fail before replaying if there is nowhere to save.
    let save_to = match (save, board_path) {
        (true, Some(path)) => Some(path),
        (true, None) => {
            return Err(BoardError::IoError(
                "--save requires a board file (--board or config)".to_string(),
            ));
        }
        (false, _) => None,
    };

    let session = BoardSession::with_platform(load_board(board_path)?, platform);

    tracing::info!("Replaying {:?}", script);
    let validated = validate_file_path(script)?;
    validate_file_size(&validated, MAX_SCRIPT_FILE_SIZE)?;
    let data = std::fs::read(&validated)
        .map_err(|e| BoardError::IoError(format!("Read script: {}", e)))?;
    let events = parse_script(&data)?;

    let (session, report) = replay(session, &events)?;
    session.entities().validate()?;

    if let Some(path) = save_to {
        save_board(session.entities(), path)?;
    }

    if json_mode {
        let mut output = session_json(&session)?;
        output["report"] = serde_json::json!(report);
        print_json(&output);
        return Ok(());
    }

    println!(
        "Replayed {} events ({} drops, {} cancelled)",
        report.events, report.drops, report.cancelled
    );
    if let Some(path) = save_to {
        println!("Saved board to {:?}", path);
    }
    println!();
    print_session(&session, false)
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Load a board file, or the demo board when no path is given.
///
/// The board is checked against size limits and invariants before use.
pub fn load_board(board_path: Option<&Path>) -> Result<EntityStore, BoardError> {
    let Some(path) = board_path else {
        tracing::debug!("no board file given, using demo board");
        return Ok(seed::demo_board());
    };

    let validated = validate_file_path(path)?;
    validate_file_size(&validated, MAX_BOARD_FILE_SIZE)?;

    let data = std::fs::read(&validated)
        .map_err(|e| BoardError::IoError(format!("Read board: {}", e)))?;
    let board: EntityStore = serde_json::from_slice(&data)
        .map_err(|e| BoardError::SerializationError(format!("board: {}", e)))?;

    if board.items.len() > MAX_BOARD_ITEMS {
        return Err(BoardError::SerializationError(format!(
            "Item count {} exceeds maximum allowed {}",
            board.items.len(),
            MAX_BOARD_ITEMS
        )));
    }
    if board.columns.len() > MAX_BOARD_COLUMNS {
        return Err(BoardError::SerializationError(format!(
            "Column count {} exceeds maximum allowed {}",
            board.columns.len(),
            MAX_BOARD_COLUMNS
        )));
    }

    board.validate()?;
    tracing::debug!(
        columns = board.column_order.len(),
        items = board.items.len(),
        "board loaded"
    );
    Ok(board)
}

/// Save a board as pretty JSON. Returns the resolved path.
pub fn save_board(board: &EntityStore, path: &Path) -> Result<PathBuf, BoardError> {
    let validated = validate_output_path(path)?;
    let data = serde_json::to_vec_pretty(board)
        .map_err(|e| BoardError::SerializationError(e.to_string()))?;

    std::fs::write(&validated, &data)
        .map_err(|e| BoardError::IoError(format!("Write board: {}", e)))?;
    Ok(validated)
}

/// JSON rendering of a session: columns with per-item hints plus the selection.
pub fn session_json(session: &BoardSession) -> Result<serde_json::Value, BoardError> {
    let columns: Vec<serde_json::Value> = session
        .board_view()?
        .iter()
        .map(|view| {
            let items: Vec<serde_json::Value> = view
                .items
                .iter()
                .map(|item| {
                    serde_json::json!({
                        "id": item.item.id,
                        "content": item.item.content,
                        "selected": item.is_selected
                    })
                })
                .collect();
            serde_json::json!({
                "id": view.column.id,
                "title": view.column.title,
                "items": items
            })
        })
        .collect();

    Ok(serde_json::json!({
        "platform": session.platform(),
        "columns": columns,
        "selection": session.selection()
    }))
}

fn print_session(session: &BoardSession, json_mode: bool) -> Result<(), BoardError> {
    if json_mode {
        print_json(&session_json(session)?);
        return Ok(());
    }

    for view in session.board_view()? {
        println!(
            "{} [{}] ({})",
            view.column.title,
            view.column.id,
            view.items.len()
        );
        for item in &view.items {
            let marker = if item.is_selected { '*' } else { ' ' };
            println!("  {} {:<10} {}", marker, item.item.id.as_str(), item.item.content);
        }
        println!();
    }

    let selection = session.selection();
    match &selection.anchor_id {
        Some(anchor) => println!("Selected: {} (anchor {})", selection.len(), anchor),
        None => println!("Selected: {}", selection.len()),
    }
    Ok(())
}

fn print_json(value: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}
