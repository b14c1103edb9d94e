//! Pipeline stages for markdown-to-Tana conversion.
//!
//! Each submodule implements exactly one step, so each can be tested on its
//! own and the depth rules can be swapped without touching the others.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ prepare ──▶ classify ──▶ hierarchy ──▶ depth ──▶ render ──▶ chunk
//! (text)    (cleanup)   (Line)       (parents)     (levels)  (bullets)  (paste units)
//!                                                               │
//!                                                           transform
//!                                          (vault → fields → dates → inline → restore)
//! ```
//!
//! 1. [`input`]     read the document from a file or stdin
//! 2. [`prepare`]   line endings, invisible characters, timestamp splitting
//! 3. [`classify`]  one [`classify::Line`] per raw line
//! 4. [`hierarchy`] parent pointers from headings and indentation
//! 5. [`depth`]     output depth per line, through a pluggable strategy
//! 6. [`render`]    indented bullets; [`transform`] rewrites each line's text
//! 7. [`chunk`]     marker-prefixed chunks under the size limit
//!
//! [`transcript`] detects voice-memo exports before rendering.

pub mod chunk;
pub mod classify;
pub mod dates;
pub mod depth;
pub mod fields;
pub mod hierarchy;
pub mod inline;
pub mod input;
pub mod prepare;
pub mod render;
pub mod transcript;
pub mod transform;
pub mod vault;
