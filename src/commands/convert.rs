use crate::cli::ConvertArgs;
use crate::icons::{IconPipeline, Rasterizer, Resizer};
use crate::utils::Result;
use std::env;

pub fn convert(args: ConvertArgs) -> Result<()> {
    let work_dir = env::current_dir().map_err(|e| format!("Working directory: {}", e))?;
    let pipeline = IconPipeline::new(
        Rasterizer::new(&args.rasterizer),
        Resizer::new(&args.resizer),
        args.source,
        args.res_root,
        work_dir,
        args.thumb_size,
    );
    pipeline.run()
}
