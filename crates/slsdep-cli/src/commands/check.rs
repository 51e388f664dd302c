//! Check command implementation.

use std::path::Path;

use miette::Result;

pub fn exec(project_root: &Path) -> Result<()> {
    slsdep_ops::ops_check::check(project_root)
}
