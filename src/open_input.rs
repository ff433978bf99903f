use crate::{path_url::path_url, CopyError, Role};
use data_url::DataUrl;
use std::{
    ffi::OsStr,
    fs::{self, File},
    io::{self, Cursor, Read},
    path::{Path, PathBuf},
};
use url::Url;

pub(crate) struct Input {
    pub(crate) name: String,
    pub(crate) reader: Box<dyn Read>,
    pub(crate) path: Option<PathBuf>,
    pub(crate) initial_size: Option<u64>,
}

pub(crate) fn open_input(os: &OsStr) -> Result<Input, CopyError> {
    // Special-case "-" to mean stdin. "./-" names the file.
    if os == OsStr::new("-") {
        return Ok(acquire_stdin());
    }

    // A file that exists under the literal name is always opened as a file,
    // even if the name also parses as a URL.
    let path = Path::new(os);
    if fs::symlink_metadata(path).is_err() {
        if let Some(s) = os.to_str() {
            if let Ok(url) = Url::parse(s) {
                if let Some(input) = open_url(s, &url)? {
                    return Ok(input);
                }
            }
        }
    }

    // Otherwise try opening it as a path in the filesystem namespace.
    open_path(path)
}

fn acquire_stdin() -> Input {
    log::debug!("reading from standard input");
    Input {
        name: "-".to_owned(),
        reader: Box::new(io::stdin()),
        path: None,
        initial_size: None,
    }
}

/// Open a `data:` or `file:` URL. Any other scheme, such as the `notes` in
/// `notes:v2.txt` or a Windows drive letter, is left for `open_path`.
fn open_url(s: &str, url: &Url) -> Result<Option<Input>, CopyError> {
    match url.scheme() {
        "data" => open_data_url_str(s).map(Some),
        "file" => {
            let path = file_url_path(url)
                .map_err(|reason| CopyError::unsupported(Role::Source, s, reason))?;
            open_path(&path).map(Some)
        }
        _ => Ok(None),
    }
}

/// Extract the local path named by a `file:` URL.
pub(crate) fn file_url_path(url: &Url) -> Result<PathBuf, &'static str> {
    if !url.username().is_empty()
        || url.password().is_some()
        || (url.has_host() && url.host_str() != Some(""))
        || url.port().is_some()
        || url.query().is_some()
        || url.fragment().is_some()
    {
        return Err("file URL should only contain a path");
    }
    url.to_file_path()
        .map_err(|()| "file URL does not name a local path")
}

fn open_data_url_str(data_url_str: &str) -> Result<Input, CopyError> {
    let data_url = DataUrl::process(data_url_str).map_err(|e| {
        CopyError::unsupported(
            Role::Source,
            data_url_str,
            format!("invalid data URL syntax: {:?}", e),
        )
    })?;
    let (body, fragment) = data_url.decode_to_vec().map_err(|_| {
        CopyError::unsupported(Role::Source, data_url_str, "invalid base64 encoding")
    })?;

    if fragment.is_some() {
        return Err(CopyError::unsupported(
            Role::Source,
            data_url_str,
            "data urls with fragments are unsupported",
        ));
    }

    log::debug!("reading {} bytes from a data URL", body.len());
    let initial_size = Some(body.len() as u64);
    Ok(Input {
        name: data_url_str.to_owned(),
        reader: Box::new(Cursor::new(body)),
        path: None,
        initial_size,
    })
}

fn open_path(path: &Path) -> Result<Input, CopyError> {
    let name = path_url(path);
    let file = File::open(path).map_err(|err| CopyError::open(Role::Source, &name, err))?;
    let metadata = file
        .metadata()
        .map_err(|err| CopyError::open(Role::Source, &name, err))?;
    if metadata.is_dir() {
        return Err(CopyError::open(
            Role::Source,
            &name,
            io::Error::new(io::ErrorKind::Other, "is a directory"),
        ));
    }

    log::debug!("opened {} for reading", name);
    Ok(Input {
        name,
        reader: Box::new(file),
        path: Some(path.to_owned()),
        initial_size: Some(metadata.len()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(os: &str) -> Vec<u8> {
        let mut input = open_input(os.as_ref()).unwrap();
        let mut buf = Vec::new();
        input.reader.read_to_end(&mut buf).unwrap();
        buf
    }

    #[test]
    fn data_url_plain() {
        assert_eq!(read_all("data:,Hello%2C%20World!"), b"Hello, World!");
    }

    #[test]
    fn data_url_base64() {
        assert_eq!(
            read_all("data:text/plain;base64,SGVsbG8sIFdvcmxkIQ=="),
            b"Hello, World!"
        );
    }

    #[test]
    fn data_url_with_fragment() {
        let err = open_input("data:,abc#frag".as_ref()).err().unwrap();
        assert!(matches!(err, CopyError::Unsupported { .. }));
    }

    #[test]
    fn missing_path() {
        let err = open_input("definitely/not/here.txt".as_ref()).err().unwrap();
        assert_eq!(err.kind(), Some(io::ErrorKind::NotFound));
        assert!(matches!(
            err,
            CopyError::Open {
                role: Role::Source,
                ..
            }
        ));
    }

    #[test]
    fn unknown_scheme_is_a_path() {
        let err = open_input("notes:v2.txt".as_ref()).err().unwrap();
        assert_eq!(err.kind(), Some(io::ErrorKind::NotFound));
        assert!(matches!(err, CopyError::Open { .. }));
    }

    #[test]
    fn dot_slash_dash_is_a_path() {
        let err = open_input("./-".as_ref()).err().unwrap();
        assert_eq!(err.kind(), Some(io::ErrorKind::NotFound));
    }

    #[test]
    #[cfg(unix)]
    fn file_url_with_host() {
        let err = open_input("file://example.com/etc/hosts".as_ref())
            .err()
            .unwrap();
        assert!(matches!(err, CopyError::Unsupported { .. }));
    }

    #[test]
    fn directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_input(dir.path().as_os_str()).err().unwrap();
        assert!(matches!(err, CopyError::Open { .. }));
    }
}
