//! Request handlers.

pub mod download;
pub mod health;
pub mod pages;
pub mod process;
pub mod status;
pub mod upload;

pub use download::*;
pub use health::*;
pub use pages::*;
pub use process::*;
pub use status::*;
pub use upload::*;
