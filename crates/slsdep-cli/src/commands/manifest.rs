//! Handler for `slsdep manifest`.

use std::path::Path;

use miette::Result;

pub fn exec(project_root: &Path) -> Result<()> {
    let json = slsdep_ops::ops_manifest::manifest(project_root)?;
    println!("{json}");
    Ok(())
}
