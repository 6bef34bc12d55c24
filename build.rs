#![forbid(unsafe_code)]

// Capture build provenance so the server can log it at startup.  Builds from
// a source tarball have no git metadata, so every value falls back to
// "unknown" instead of failing the build.
fn main() {
    set("GIT_BRANCH",
        build_data::get_git_branch().unwrap_or_else(|_| "unknown".to_string()));
    set("GIT_COMMIT_SHORT",
        build_data::get_git_commit_short().unwrap_or_else(|_| "unknown".to_string()));
    set("GIT_DIRTY",
        build_data::get_git_dirty().map(|d| d.to_string()).unwrap_or_else(|_| "unknown".to_string()));
    // Honor SOURCE_DATE_EPOCH for reproducible builds.
    set("SOURCE_TIMESTAMP",
        std::env::var("SOURCE_DATE_EPOCH").unwrap_or_else(|_| "unknown".to_string()));
    set("RUSTC_VERSION",
        build_data::get_rustc_version().unwrap_or_else(|_| "unknown".to_string()));
}

fn set(var: &str, value: String) {
    println!("cargo:rustc-env={}={}", var, value);
}
