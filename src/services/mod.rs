//! Service layer separating I/O and format concerns from the geometry pipeline

mod format;
mod io;

pub use format::OutputFormatHandler;
pub use io::ImageIOService;
