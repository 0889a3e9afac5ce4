//! Domain types for plotseed.
//!
//! This module contains the core data structures:
//! - Piece: One normalized content item parsed from a front-matter file
//! - Tree: The nested plot/section/item mapping built by the walker

pub mod piece;
pub mod tree;

// Re-export commonly used types
pub use piece::{Piece, PieceField, PieceValue};
pub use tree::{ContentTree, DirTree, FileEntry, FileLeaf, TreeStats};
