// SPDX-License-Identifier: CC0-1.0

//! Filename derivation for generated stub and model files.
//!
//! Paths here are IDL import paths, always `/`-separated regardless of the host OS,
//! so they are handled as strings rather than `std::path::Path`.

/// Extensions stripped from an input file name before the generated suffix is appended.
///
/// Any other extension is kept verbatim, so `foo.txt` becomes `foo.txt.twirp.<ext>`.
pub const RECOGNIZED_EXTENSIONS: &[&str] = &[".proto", ".protodevel"];

/// Infix marking generated RPC stub files
pub const STUB_INFIX: &str = "twirp";

/// Infix marking generated model files
pub const MODEL_INFIX: &str = "model";

/// Extension of the last path component, including the dot (`"a/b.proto"` → `".proto"`).
///
/// Returns an empty string when the last component has no dot.
pub fn extension(path: &str) -> &str {
    let base_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[base_start..].rfind('.') {
        Some(dot) => &path[base_start + dot..],
        None => "",
    }
}

/// Drop a recognized IDL extension from `path`; other extensions are left in place.
pub fn strip_idl_extension(path: &str) -> &str {
    let ext = extension(path);
    if RECOGNIZED_EXTENSIONS.contains(&ext) {
        &path[..path.len() - ext.len()]
    } else {
        path
    }
}

/// Split `path` after its last `/` into directory and last component.
///
/// The directory keeps its trailing slash, so concatenating the two halves gives back
/// `path` and a root directory stays `/`.
pub fn split_dir(path: &str) -> (&str, &str) {
    let at = path.rfind('/').map_or(0, |i| i + 1);
    path.split_at(at)
}

/// Path of the generated stub file for the IDL file at `full_path`.
///
/// The new base name is `prefix.base.twirp.target_ext`, where `base` is the original
/// base name with a recognized IDL extension removed. The directory is kept as is.
/// An empty `prefix` (root package) contributes no leading dot.
///
/// # Examples
///
/// ```
/// use twirpgen_path::twirp_filename;
/// assert_eq!(twirp_filename("svc", "pkg/foo.proto", "swift"), "pkg/svc.foo.twirp.swift");
/// assert_eq!(twirp_filename("svc", "pkg/foo.txt", "swift"), "pkg/svc.foo.txt.twirp.swift");
/// assert_eq!(twirp_filename("svc", "foo.protodevel", "swift"), "svc.foo.twirp.swift");
/// ```
pub fn twirp_filename(prefix: &str, full_path: &str, target_ext: &str) -> String {
    let (dir, base) = split_dir(full_path);
    let base = strip_idl_extension(base);
    let file_name = if prefix.is_empty() {
        format!("{base}.{STUB_INFIX}.{target_ext}")
    } else {
        format!("{prefix}.{base}.{STUB_INFIX}.{target_ext}")
    };
    format!("{dir}{file_name}")
}

/// Path of the generated model file for the IDL file at `full_path`.
///
/// The recognized IDL extension is removed from the whole path and `.model.target_ext`
/// appended; there is no package prefix.
///
/// # Examples
///
/// ```
/// use twirpgen_path::model_filename;
/// assert_eq!(model_filename("pkg/foo.proto", "swift"), "pkg/foo.model.swift");
/// assert_eq!(model_filename("foo.txt", "swift"), "foo.txt.model.swift");
/// ```
pub fn model_filename(full_path: &str, target_ext: &str) -> String {
    format!("{}.{MODEL_INFIX}.{target_ext}", strip_idl_extension(full_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension() {
        assert_eq!(extension("pkg/foo.proto"), ".proto");
        assert_eq!(extension("pkg/foo"), "");
        assert_eq!(extension("pkg.v1/foo"), "");
        assert_eq!(extension("foo.tar.gz"), ".gz");
        assert_eq!(extension(""), "");
    }

    #[test]
    fn test_strip_idl_extension() {
        assert_eq!(strip_idl_extension("foo.proto"), "foo");
        assert_eq!(strip_idl_extension("a/b/foo.protodevel"), "a/b/foo");
        assert_eq!(strip_idl_extension("foo.txt"), "foo.txt");
        assert_eq!(strip_idl_extension("foo"), "foo");
        // Only the final extension is considered
        assert_eq!(strip_idl_extension("foo.proto.bak"), "foo.proto.bak");
    }

    #[test]
    fn test_split_dir() {
        assert_eq!(split_dir("pkg/sub/foo.proto"), ("pkg/sub/", "foo.proto"));
        assert_eq!(split_dir("foo.proto"), ("", "foo.proto"));
        assert_eq!(split_dir("/foo.proto"), ("/", "foo.proto"));
        assert_eq!(split_dir("pkg/"), ("pkg/", ""));
    }

    #[test]
    fn test_twirp_filename() {
        assert_eq!(twirp_filename("svc", "pkg/foo.proto", "swift"), "pkg/svc.foo.twirp.swift");
        assert_eq!(
            twirp_filename("stream.video.sfu.signal", "video/sfu/signal_rpc/signal.proto", "swift"),
            "video/sfu/signal_rpc/stream.video.sfu.signal.signal.twirp.swift"
        );
        assert_eq!(twirp_filename("svc", "foo.proto", "dart"), "svc.foo.twirp.dart");
        assert_eq!(twirp_filename("", "pkg/foo.proto", "swift"), "pkg/foo.twirp.swift");
    }

    #[test]
    fn test_twirp_filename_absolute_path() {
        assert_eq!(twirp_filename("svc", "/foo.proto", "swift"), "/svc.foo.twirp.swift");
        assert_eq!(twirp_filename("svc", "/a/foo.proto", "swift"), "/a/svc.foo.twirp.swift");
        assert_eq!(twirp_filename("", "/foo.proto", "swift"), "/foo.twirp.swift");
    }

    #[test]
    fn test_twirp_filename_keeps_unrecognized_extension() {
        // Unrecognized extensions are kept, yielding two concatenated extensions
        assert_eq!(twirp_filename("svc", "pkg/foo.txt", "swift"), "pkg/svc.foo.txt.twirp.swift");
        assert_eq!(twirp_filename("svc", "pkg/foo", "swift"), "pkg/svc.foo.twirp.swift");
    }

    #[test]
    fn test_model_filename() {
        assert_eq!(model_filename("pkg/foo.proto", "swift"), "pkg/foo.model.swift");
        assert_eq!(model_filename("pkg/foo.protodevel", "dart"), "pkg/foo.model.dart");
        assert_eq!(model_filename("pkg/foo.txt", "swift"), "pkg/foo.txt.model.swift");
    }
}
