//! Lexical resolution of reference targets to absolute paths.
//!
//! Resolution never touches the filesystem: `.` and `..` segments are
//! collapsed textually and symlinks are left alone. Whether the resulting
//! path exists is a separate question answered by a
//! [`crate::probe::ExistenceProbe`].

use linkgraph_core::{Error, Result};
use std::path::{Component, Path, PathBuf};

const FILE_SCHEME: &str = "file://";
const LOCAL_HOST: &str = "localhost";

/// Drop a `#fragment` suffix, if any.
pub fn strip_fragment(target: &str) -> &str {
    target.split_once('#').map_or(target, |(path, _)| path)
}

/// Drop a case-insensitive `file://` prefix.
///
/// `file://localhost/x` names the local host and becomes `/x`. Any other
/// host names a remote machine and cannot be resolved locally. With
/// `windows` set, the leading slash of `file:///C:/x` is dropped as well
/// so the drive letter starts the path.
pub fn strip_file_scheme(target: &str, windows: bool) -> Result<&str> {
    let Some(rest) = target
        .get(..FILE_SCHEME.len())
        .filter(|head| head.eq_ignore_ascii_case(FILE_SCHEME))
        .map(|_| &target[FILE_SCHEME.len()..])
    else {
        return Ok(target);
    };

    let (host, path) = match rest.find('/') {
        Some(slash) => rest.split_at(slash),
        None => (rest, ""),
    };
    let rest = if host.is_empty() || host.eq_ignore_ascii_case(LOCAL_HOST) {
        path
    } else if has_drive(host) {
        rest
    } else {
        return Err(Error::resolution(target, format!("non-local host '{host}'")));
    };

    if windows && has_slashed_drive(rest) {
        Ok(&rest[1..])
    } else {
        Ok(rest)
    }
}

/// `C:` as the whole authority, as in `file://C:/x`
fn has_drive(host: &str) -> bool {
    let bytes = host.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// `/C:` style prefix
fn has_slashed_drive(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 3 && bytes[0] == b'/' && bytes[1].is_ascii_alphabetic() && bytes[2] == b':'
}

/// Collapse `.` and `..` without consulting the filesystem.
///
/// A `..` at the filesystem root stays at the root, so `/../a` is `/a`.
/// A relative path keeps its leading `..` segments.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                normalized.push(component.as_os_str())
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() && !normalized.has_root() {
                    normalized.push(component.as_os_str());
                }
            }
        }
    }

    normalized
}

/// Resolve a raw reference target found in `source` to an absolute path.
///
/// Steps, in order: strip the fragment, strip a `file://` scheme (a remote
/// host is an error), reject empty or NUL-containing paths, join relative paths onto the source's
/// directory, collapse dot segments.
///
/// ```
/// use linkgraph_corpus::resolve_reference;
/// use std::path::{Path, PathBuf};
///
/// let source = Path::new("/corpus/docs/guide.md");
/// assert_eq!(
///     resolve_reference("../api/index.md#auth", source).unwrap(),
///     PathBuf::from("/corpus/api/index.md")
/// );
/// ```
pub fn resolve_reference(target: &str, source: &Path) -> Result<PathBuf> {
    let path = strip_file_scheme(strip_fragment(target), cfg!(windows))?;

    if path.is_empty() {
        return Err(Error::resolution(target, "empty path"));
    }
    if path.contains('\0') {
        return Err(Error::resolution(target, "path contains a NUL byte"));
    }

    let candidate = Path::new(path);
    let joined = if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        let base = source
            .parent()
            .ok_or_else(|| Error::resolution(target, "source document has no parent directory"))?;
        base.join(candidate)
    };

    Ok(normalize_lexically(&joined))
}
