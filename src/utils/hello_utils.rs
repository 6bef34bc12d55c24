#![forbid(unsafe_code)]

use std::ops::Deref;
use std::path::Path;

use path_absolutize::Absolutize;

// ***************************************************************************
// GENERAL PUBLIC FUNCTIONS
// ***************************************************************************
// ---------------------------------------------------------------------------
// get_absolute_path:
// ---------------------------------------------------------------------------
/** Replace tilde (~) and environment variable values in a path name and
 * then construct the absolute path name.  Unlike std's canonicalize,
 * absolutize does not require the file to exist, which lets us resolve the
 * default configuration path before knowing whether a file is there.
 */
pub fn get_absolute_path(path: &str) -> String {
    // Replace ~ and environment variable values if possible.
    // On error, return the string version of the original path.
    let s = match shellexpand::full(path) {
        Ok(x) => x,
        Err(_) => return path.to_owned(),
    };

    // Convert to absolute path if necessary.
    // Return original input on error.
    let p = Path::new(s.deref());
    let p1 = match p.absolutize() {
        Ok(x) => x,
        Err(_) => return path.to_owned(),
    };
    let p2 = match p1.to_str() {
        Some(x) => x,
        None => return path.to_owned(),
    };

    p2.to_owned()
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::get_absolute_path;

    #[test]
    fn absolute_paths_pass_through() {
        assert_eq!(get_absolute_path("/etc/hello.toml"), "/etc/hello.toml");
    }

    #[test]
    fn tilde_is_expanded() {
        let p = get_absolute_path("~/hello.toml");
        assert!(!p.starts_with('~'));
        assert!(p.ends_with("/hello.toml"));
    }
}
