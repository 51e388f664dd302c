//! Handler for `slsdep lock`.

use std::path::Path;

use miette::Result;

pub fn exec(project_root: &Path) -> Result<()> {
    slsdep_ops::ops_lock::lock(project_root).map(|_| ())
}
