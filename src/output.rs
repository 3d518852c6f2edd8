//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Albums are shown by positional index and name, with their photo count.
//! Images are shown by their stored path; a filter other than `none` is
//! appended in brackets so a listing doubles as an inventory of edits.
//!
//! # Output Format
//!
//! ## Album list
//!
//! ```text
//! Albums
//! 001 default (2 photos) *
//! 002 Trips (1 photos)
//! ```
//!
//! The `*` marks the current album.
//!
//! ## Album contents
//!
//! ```text
//! Trips (2 photos)
//!     001 /photos/rome.jpg
//!     002 /photos/paris.jpg [sepia]
//! ```
//!
//! ## Transform
//!
//! ```text
//! /photos/rome.jpg → 150x150, sepia
//!     Saved: rome-small.png
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::imaging::{Dimensions, Filter};
use crate::registry::AlbumRegistry;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// ```text
/// 001 Landscapes (5 photos)
/// ```
fn album_header(index: usize, name: &str, count: usize) -> String {
    format!("{} {} ({} photos)", format_index(index), name, count)
}

/// ```text
/// 001 /photos/rome.jpg
/// 002 /photos/paris.jpg [sepia]
/// ```
fn image_line(index: usize, path: &str, filter: Filter) -> String {
    match filter {
        Filter::None => format!("{} {}", format_index(index), path),
        other => format!("{} {} [{}]", format_index(index), path, other),
    }
}

// ============================================================================
// Album list
// ============================================================================

pub fn format_album_list(registry: &AlbumRegistry, current: &str) -> Vec<String> {
    let mut lines = vec!["Albums".to_string()];
    for (i, name) in registry.list_albums().into_iter().enumerate() {
        let header = album_header(i + 1, name, registry.images_in(name).len());
        if name == current {
            lines.push(format!("{} *", header));
        } else {
            lines.push(header);
        }
    }
    lines
}

pub fn print_album_list(registry: &AlbumRegistry, current: &str) {
    for line in format_album_list(registry, current) {
        println!("{}", line);
    }
}

// ============================================================================
// Album contents
// ============================================================================

/// List the images of `album` in insertion order with their filters.
pub fn format_album_images(registry: &AlbumRegistry, album: &str) -> Vec<String> {
    if !registry.contains_album(album) {
        return vec![format!("{} (no such album)", album)];
    }
    let images = registry.images_in(album);
    let mut lines = vec![format!("{} ({} photos)", album, images.len())];
    for (i, path) in images.iter().enumerate() {
        lines.push(format!(
            "{}{}",
            indent(1),
            image_line(i + 1, path, registry.filter_for(path))
        ));
    }
    lines
}

pub fn print_album_images(registry: &AlbumRegistry, album: &str) {
    for line in format_album_images(registry, album) {
        println!("{}", line);
    }
}

// ============================================================================
// Transforms
// ============================================================================

/// Summarize a rendered image: its display size, filter and export target.
pub fn format_transform_result(
    path: &str,
    size: Dimensions,
    filter: Filter,
    saved_to: Option<&Path>,
) -> Vec<String> {
    let mut lines = vec![format!("{} → {}, {}", path, size, filter)];
    if let Some(out) = saved_to {
        lines.push(format!("{}Saved: {}", indent(1), out.display()));
    }
    lines
}

pub fn print_transform_result(
    path: &str,
    size: Dimensions,
    filter: Filter,
    saved_to: Option<&Path>,
) {
    for line in format_transform_result(path, size, filter, saved_to) {
        println!("{}", line);
    }
}
