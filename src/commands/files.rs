use anyhow::Result;

use crate::Context;
use crate::ui;

pub fn run(ctx: &Context) -> Result<()> {
    if !ctx.quiet {
        ui::header("Deployment Files");
        ui::kv("Working directory", &ctx.workdir.display().to_string());
        println!();
    }
    super::up::write_files(ctx)
}
