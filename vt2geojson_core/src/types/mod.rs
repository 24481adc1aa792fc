mod blob;
mod tile_compression;
mod tile_coord;

pub use blob::*;
pub use tile_compression::*;
pub use tile_coord::*;
