//! Output generation modules for downloaded images and the workbook.
//!
//! # Submodules
//!
//! - [`images`]: downloads each record's figure to a collision-safe filename
//! - [`workbook`]: appends the record set as a new sheet in the persistent
//!   multi-sheet workbook
//!
//! # Output Structure
//!
//! ```text
//! output/
//! ├── images/
//! │   └── <sanitized figure name>.jpg
//! └── news.xlsx        # one sheet per run: {phrase}_{category}_{timestamp}
//! ```

pub mod images;
pub mod workbook;
