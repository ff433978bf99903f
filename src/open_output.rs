use crate::{open_input::file_url_path, path_url::path_url, CopyError, Role};
use std::{
    ffi::OsStr,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};
use url::Url;

pub(crate) struct Output {
    pub(crate) name: String,
    pub(crate) writer: Box<dyn Write>,
}

/// Where output for a name would go, worked out without creating anything.
#[derive(Debug)]
pub(crate) enum Target {
    Stdout,
    Path(PathBuf),
}

pub(crate) fn resolve_output(os: &OsStr) -> Result<Target, CopyError> {
    // Special-case "-" to mean stdout. "./-" names the file.
    if os == OsStr::new("-") {
        return Ok(Target::Stdout);
    }

    // An existing file under the literal name is overwritten as-is, even if
    // the name also parses as a URL.
    let path = PathBuf::from(os);
    if fs::symlink_metadata(&path).is_ok() {
        return Ok(Target::Path(path));
    }

    if let Some(s) = os.to_str() {
        if let Ok(url) = Url::parse(s) {
            match url.scheme() {
                "file" => {
                    return file_url_path(&url)
                        .map(Target::Path)
                        .map_err(|reason| CopyError::unsupported(Role::Destination, s, reason))
                }
                "data" => {
                    return Err(CopyError::unsupported(
                        Role::Destination,
                        s,
                        "output to data URL isn't possible",
                    ))
                }
                // Other schemes, like the `notes` in `notes:v2.txt`, are
                // just part of a file name.
                _ => {}
            }
        }
    }

    Ok(Target::Path(path))
}

pub(crate) fn open_output(target: Target) -> Result<Output, CopyError> {
    match target {
        Target::Stdout => Ok(acquire_stdout()),
        Target::Path(path) => open_path(&path),
    }
}

fn acquire_stdout() -> Output {
    log::debug!("writing to standard output");
    Output {
        name: "-".to_owned(),
        writer: Box::new(io::stdout()),
    }
}

fn open_path(path: &Path) -> Result<Output, CopyError> {
    let name = path_url(path);
    let file = File::create(path).map_err(|err| CopyError::open(Role::Destination, &name, err))?;
    log::debug!("opened {} for writing", name);
    Ok(Output {
        name,
        writer: Box::new(file),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dash_is_stdout() {
        assert!(matches!(
            resolve_output("-".as_ref()).ok(),
            Some(Target::Stdout)
        ));
    }

    #[test]
    fn unknown_scheme_is_a_path() {
        match resolve_output("notes:v2.txt".as_ref()) {
            Ok(Target::Path(path)) => assert_eq!(path, Path::new("notes:v2.txt")),
            other => panic!("unexpected resolution: {:?}", other),
        }
    }

    #[test]
    fn dot_slash_dash_is_a_path() {
        assert!(matches!(
            resolve_output("./-".as_ref()).ok(),
            Some(Target::Path(_))
        ));
    }

    #[test]
    fn data_url_is_rejected() {
        let err = resolve_output("data:,nope".as_ref()).err().unwrap();
        assert!(matches!(
            err,
            CopyError::Unsupported {
                role: Role::Destination,
                ..
            }
        ));
    }

    #[test]
    #[cfg(unix)]
    fn file_url_is_a_path() {
        match resolve_output("file:///tmp/out.txt".as_ref()) {
            Ok(Target::Path(path)) => assert_eq!(path, Path::new("/tmp/out.txt")),
            _ => panic!("file URL didn't resolve to a path"),
        }
    }

    #[test]
    fn missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = Target::Path(dir.path().join("no/such/dir/out.txt"));
        let err = open_output(target).err().unwrap();
        assert_eq!(err.kind(), Some(io::ErrorKind::NotFound));
    }
}
