use std::path::Path;
#[cfg(unix)]
use {
    percent_encoding::{percent_encode, CONTROLS, NON_ALPHANUMERIC},
    std::{os::unix::ffi::OsStrExt, path::Component},
};

/// Produce a printable name for `path`. Plain names are returned as-is;
/// absolute paths with unusual bytes become `file:` URLs, and relative ones
/// get a `./` prefix so they can't be mistaken for URLs.
#[cfg(unix)]
pub(crate) fn path_url(path: &Path) -> String {
    if path.is_absolute() {
        let mut result = String::new();
        // The first component of an absolute path is the root.
        for component in path.components() {
            if component == Component::RootDir {
                continue;
            }
            result += "/";
            result +=
                &percent_encode(component.as_os_str().as_bytes(), NON_ALPHANUMERIC).to_string();
        }
        if result.is_empty() {
            result += "/";
        }
        if result == path.display().to_string() {
            result
        } else {
            format!("file://{}", result)
        }
    } else {
        let result = percent_encode(path.as_os_str().as_bytes(), CONTROLS).to_string();
        let display = path.display().to_string();
        if result == display && !result.contains(':') {
            result
        } else {
            format!("./{}", display)
        }
    }
}

#[cfg(not(unix))]
pub(crate) fn path_url(path: &Path) -> String {
    if path.is_absolute() {
        url::Url::from_file_path(path)
            .map(String::from)
            .unwrap_or_else(|()| path.display().to_string())
    } else {
        path.display().to_string()
    }
}

#[test]
#[cfg(unix)]
fn path_urls() {
    use std::ffi::OsStr;
    assert_eq!(path_url(Path::new("/")), "/");
    assert_eq!(path_url(Path::new("/foo")), "/foo");
    assert_eq!(path_url(Path::new("/foo:bar")), "file:///foo%3Abar");
    assert_eq!(path_url(Path::new("foo")), "foo");
    assert_eq!(path_url(Path::new("foo:bar")), "./foo:bar");
    assert_eq!(path_url(Path::new("./foo")), "./foo");
    assert_eq!(path_url(OsStr::from_bytes(b"f\xffoo").as_ref()), "./f\u{fffd}oo");
}
