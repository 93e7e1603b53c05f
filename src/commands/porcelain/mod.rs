//! Porcelain commands (user-facing history queries)
//!
//! ## Commands
//!
//! - `log`: Show the commits selected by a filter tree
//! - `count`: Count the commits selected by a filter tree
//!
//! Both share `rev_options`, which turns command-line flags into walk roots
//! and a filter tree.

pub mod count;
pub mod log;
pub mod rev_options;
