mod density;
mod pipeline;
mod tools;

pub use density::Density;
pub use pipeline::{icon_path, IconPipeline, ICON_FILE, ROUND_ICON_FILE, TEMP_ICON_FILE};
pub use tools::{Rasterizer, Resizer};
