use crate::utils::Result;
use std::{
    path::{Path, PathBuf},
    process::Command,
};

/// External rasterizer, invoked with qlmanage argument conventions:
/// `<tool> -t -s <size> -o <out_dir> <source>`.
#[derive(Debug)]
pub struct Rasterizer {
    program: String,
}

impl Rasterizer {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }

    /// Renders `source` as a square thumbnail of `size` pixels into
    /// `out_dir` and returns the path the tool writes to, which is the
    /// source filename with an extra `.png` extension.
    pub fn rasterize(&self, source: &Path, size: u32, out_dir: &Path) -> Result<PathBuf> {
        run_checked(
            Command::new(&self.program)
                .arg("-t")
                .arg("-s")
                .arg(size.to_string())
                .arg("-o")
                .arg(out_dir)
                .arg(source),
        )?;
        let mut file_name = source
            .file_name()
            .ok_or(format!("No filename in path: {}", source.display()))?
            .to_os_string();
        file_name.push(".png");
        Ok(out_dir.join(file_name))
    }
}

/// External resizer, invoked with sips argument conventions:
/// `<tool> -z <height> <width> <input> --out <output>`.
#[derive(Debug)]
pub struct Resizer {
    program: String,
}

impl Resizer {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }

    pub fn resize(&self, input: &Path, output: &Path, size: u32) -> Result<()> {
        run_checked(
            Command::new(&self.program)
                .arg("-z")
                .arg(size.to_string())
                .arg(size.to_string())
                .arg(input)
                .arg("--out")
                .arg(output),
        )
    }
}

fn run_checked(command: &mut Command) -> Result<()> {
    let program = command.get_program().to_string_lossy().into_owned();
    let status = command
        .status()
        .map_err(|e| format!("Failed to run {}: {}", program, e))?;
    if !status.success() {
        return Err(format!("{} exited with {}", program, status));
    }
    Ok(())
}
