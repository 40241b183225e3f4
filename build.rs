//! Emits `VERGEN_GIT_DESCRIBE` and `VERGEN_BUILD_DATE`, both end up in the
//! boot banner of the firmware.

use std::error::Error;
use vergen::EmitBuilder;

fn main() -> Result<(), Box<dyn Error>> {
    EmitBuilder::builder()
        .build_date()
        .git_describe(true, true, None)
        .emit()?;
    Ok(())
}
