//! Stage banners
//!
//! Short-circuiting stages announce themselves with a `#` box around a
//! centred message so the reason stands out in long build logs.

/// Columns of a banner unless configured otherwise
pub const DEFAULT_WIDTH: usize = 40;

pub const NO_DRIVER: &str = "NO build.sh FOUND";
pub const DRIVER_OBSOLETE: &str = "build.sh is obsolete";
pub const BUILD_FAILED: &str = "FAILED TO BUILD";
pub const UPLOAD_FAILED: &str = "FAILED TO UPLOAD FILESYSTEM";
pub const NO_CONFIG: &str = "NO CONFIG FOUND";
pub const PATCH_FAILED: &str = "PATCH DOES NOT APPLY";

/// Render a banner: rule, centred message, rule
pub fn banner(width: usize, message: &str) -> String {
    let rule = "#".repeat(width);
    format!("{rule}\n{message:^width$}\n{rule}")
}

/// Print a banner to stdout, preceded by a blank line
pub fn print_banner(width: usize, message: &str) {
    println!();
    println!("{}", banner(width, message));
}
