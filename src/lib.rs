//! # Picshelf
//!
//! A small photo organizer core. Image paths are grouped into named albums,
//! each image can carry one color filter, and the whole arrangement is kept in
//! a single JSON file that is rewritten after every change.
//!
//! # Architecture
//!
//! ```text
//! UI / CLI  →  Gallery  →  AlbumRegistry   (albums + filters, in memory)
//!                       →  SnapshotStore   (gallery.json on disk)
//!                       →  ImageBackend    (decode / save pixels)
//!                       →  imaging ops     (resize, filter)
//! ```
//!
//! The registry never touches the disk and the store never sees the live
//! registry: they exchange [`types::GallerySnapshot`] values. The coordinator
//! in [`gallery`] glues them together and writes through on every mutation.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`gallery`] | Coordinator: write-through mutations, display state per image |
//! | [`registry`] | Ordered album → image map and per-image filter assignments |
//! | [`store`] | Atomic JSON snapshot persistence with tolerant loading |
//! | [`types`] | The serialized snapshot shape (`albumData`, `imageFilters`) |
//! | [`imaging`] | Pure-Rust decode, resize and color filters over any channel depth |
//! | [`config`] | `config.toml` loading, stock defaults, validation |
//! | [`output`] | CLI output formatting for album listings and transforms |
//!
//! # Design Decisions
//!
//! ## Render From Source
//!
//! Filters and resizes are never stacked on top of each other. The gallery
//! keeps the decoded source of every displayed image and recomputes
//!
//! ```text
//! displayed = filter(resize(source, size?), filter)
//! ```
//!
//! after each change. Sepia applied twice looks like sepia applied once, and
//! `none` always restores the original pixels.
//!
//! ## One Snapshot File
//!
//! The gallery is small enough to rewrite as a whole. Every save replaces
//! `gallery.json` atomically through a temp file in the same directory, so a
//! crash never leaves a half-written snapshot. A save that fails is logged and
//! reported through [`gallery::Gallery::last_save_error`]; the in-memory state
//! stays authoritative.
//!
//! ## Insertion Order Everywhere
//!
//! Album order is creation order and image order is insertion order, both in
//! memory and on disk. The maps are `IndexMap`s so a load/save cycle leaves the
//! file byte-identical.

pub mod config;
pub mod gallery;
pub mod imaging;
pub mod output;
pub mod registry;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
