//! Path normalization for archive entry names and file-system sources.
//!
//! Entry names inside the package always use forward slashes and never carry
//! `.` or `..` segments. The same reduction is applied to file-system paths so
//! that Windows (`C:\x\..\y`) and Unix (`/x/../y`) inputs resolve identically.

/// Canonical separator for archive entry names.
pub const SEPARATOR: char = '/';

/// Leading marker of an absolute path, kept verbatim across normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prefix<'a> {
    /// `C:\` or `C:/`
    Drive(&'a str),
    /// `/` or `\`
    Root,
    None,
}

impl<'a> Prefix<'a> {
    /// Split a path into its prefix and the remainder to be reduced.
    fn split(path: &'a str) -> (Self, &'a str) {
        let bytes = path.as_bytes();
        if bytes.len() >= 3
            && bytes[0].is_ascii_alphabetic()
            && bytes[1] == b':'
            && is_separator(bytes[2] as char)
        {
            (Prefix::Drive(&path[..2]), &path[3..])
        } else if bytes.first().is_some_and(|&b| is_separator(b as char)) {
            (Prefix::Root, &path[1..])
        } else {
            (Prefix::None, path)
        }
    }

    fn render(self, out: &mut String) {
        match self {
            Prefix::Drive(drive) => {
                out.push_str(drive);
                out.push(SEPARATOR);
            }
            Prefix::Root => out.push(SEPARATOR),
            Prefix::None => {}
        }
    }
}

#[inline]
fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Normalize a path into forward-slash form, resolving `.` and `..`.
///
/// Both `\` and `/` are accepted as separators. A drive specifier (`C:\`) or a
/// root marker (`/`) is preserved as an opaque prefix and never escaped.
/// Empty segments are dropped. A `..` with nothing left to pop is ignored, so
/// the result can never climb above its prefix.
///
/// # Examples
///
/// ```
/// use nupack::opc::packuri::normalize_path;
///
/// assert_eq!(normalize_path(r"lib\net45\..\net46\a.dll"), "lib/net46/a.dll");
/// assert_eq!(normalize_path(r"C:\work\.\bin"), "C:/work/bin");
/// assert_eq!(normalize_path("/../etc"), "/etc");
/// ```
pub fn normalize_path(path: &str) -> String {
    let (prefix, rest) = Prefix::split(path);

    let mut stack: Vec<&str> = Vec::new();
    for segment in rest.split(is_separator) {
        match segment {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            _ => stack.push(segment),
        }
    }

    let mut normalized = String::with_capacity(path.len());
    prefix.render(&mut normalized);
    for (i, segment) in stack.iter().enumerate() {
        if i > 0 {
            normalized.push(SEPARATOR);
        }
        normalized.push_str(segment);
    }
    normalized
}

/// Escape a target name so every segment is safe inside the archive.
///
/// Each segment is percent-encoded (everything except ASCII alphanumerics and
/// `-_.~`). `@` is exempt because it shows up in real folder names such as
/// scoped package directories, and NuGet clients read it back verbatim.
pub fn ensure_valid_name(target: &str) -> String {
    let escaped = target
        .split(is_separator)
        .map(|segment| {
            segment
                .split('@')
                .map(urlencoding::encode)
                .collect::<Vec<_>>()
                .join("@")
        })
        .collect::<Vec<_>>()
        .join("/");

    canonicalize_escapes(&escaped)
}

/// Escape a directory target and terminate it with a separator.
///
/// The empty target and the `.` placeholder both mean the package root and
/// map to the empty string.
pub fn ensure_valid_target_name(target: &str) -> String {
    let mut escaped = ensure_valid_name(target);
    if escaped == "." {
        escaped.clear();
    } else if !escaped.is_empty() && !escaped.ends_with(SEPARATOR) {
        escaped.push(SEPARATOR);
    }
    escaped
}

/// Join a directory target (as returned by [`ensure_valid_target_name`]) with
/// an already escaped file name and normalize the result.
///
/// Entry names are relative to the package root, so a leading separator on
/// the target is dropped.
pub fn join_target(prefix: &str, name: &str) -> String {
    let mut joined = String::with_capacity(prefix.len() + name.len());
    joined.push_str(prefix);
    joined.push_str(name);
    normalize_path(&joined)
        .trim_start_matches(SEPARATOR)
        .to_string()
}

/// Lower-cased extension of the final segment, without the leading dot.
///
/// Returns an empty string when the file name has no dot.
pub fn extension(path: &str) -> String {
    let filename = path.rsplit(is_separator).next().unwrap_or(path);
    match filename.rfind('.') {
        Some(pos) => filename[pos + 1..].to_ascii_lowercase(),
        None => String::new(),
    }
}

/// Upper-case the hex digits of every `%XX` escape.
fn canonicalize_escapes(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && i + 2 < bytes.len()
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit()
        {
            out.push('%');
            out.push(bytes[i + 1].to_ascii_uppercase() as char);
            out.push(bytes[i + 2].to_ascii_uppercase() as char);
            i += 3;
        } else {
            let ch = s[i..].chars().next().unwrap_or_default();
            out.push(ch);
            i += ch.len_utf8().max(1);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_relative() {
        assert_eq!(normalize_path("lib/net45/a.dll"), "lib/net45/a.dll");
        assert_eq!(normalize_path(r"lib\net45\a.dll"), "lib/net45/a.dll");
        assert_eq!(normalize_path(r"lib/./net45\..\a.dll"), "lib/a.dll");
    }

    #[test]
    fn test_normalize_keeps_drive_prefix() {
        assert_eq!(normalize_path(r"C:\work\bin\..\obj"), "C:/work/obj");
        assert_eq!(normalize_path("d:/x/./y"), "d:/x/y");
    }

    #[test]
    fn test_normalize_keeps_root_prefix() {
        assert_eq!(normalize_path("/work/bin/../obj"), "/work/obj");
        assert_eq!(normalize_path(r"\work\bin"), "/work/bin");
    }

    #[test]
    fn test_normalize_pop_past_empty_is_noop() {
        assert_eq!(normalize_path(".."), "");
        assert_eq!(normalize_path("../../a"), "a");
        assert_eq!(normalize_path("/../a"), "/a");
        assert_eq!(normalize_path(r"C:\..\..\a"), "C:/a");
        assert_eq!(normalize_path("a/../../b"), "b");
    }

    #[test]
    fn test_normalize_drops_dot_and_empty_segments() {
        assert_eq!(normalize_path("."), "");
        assert_eq!(normalize_path("a//b/"), "a/b");
        assert_eq!(normalize_path("./a/."), "a");
    }

    #[test]
    fn test_ensure_valid_name_escapes_segments() {
        assert_eq!(ensure_valid_name("my file.txt"), "my%20file.txt");
        assert_eq!(ensure_valid_name(r"a b\c+d"), "a%20b/c%2Bd");
        assert_eq!(ensure_valid_name("100%"), "100%25");
    }

    #[test]
    fn test_ensure_valid_name_keeps_at_sign() {
        assert_eq!(ensure_valid_name("@scope/pkg@1.0.0"), "@scope/pkg@1.0.0");
        assert_eq!(ensure_valid_name("a@b c"), "a@b%20c");
    }

    #[test]
    fn test_literal_tilde_text_is_not_an_at_sign() {
        assert_eq!(ensure_valid_name("a~~at~~b"), "a~~at~~b");
        assert_ne!(ensure_valid_name("a~~at~~b"), ensure_valid_name("a@b"));
    }

    #[test]
    fn test_ensure_valid_target_name() {
        assert_eq!(ensure_valid_target_name(""), "");
        assert_eq!(ensure_valid_target_name("."), "");
        assert_eq!(ensure_valid_target_name("lib"), "lib/");
        assert_eq!(ensure_valid_target_name("lib/"), "lib/");
        assert_eq!(ensure_valid_target_name(r"lib\net45"), "lib/net45/");
    }

    #[test]
    fn test_join_target() {
        assert_eq!(join_target("", "a.dll"), "a.dll");
        assert_eq!(join_target("lib/", "a.dll"), "lib/a.dll");
        assert_eq!(join_target("lib/../tools/", "x.ps1"), "tools/x.ps1");
    }

    #[test]
    fn test_join_target_drops_leading_separator() {
        assert_eq!(join_target(&ensure_valid_target_name("/lib"), "a.dll"), "lib/a.dll");
        assert_eq!(join_target(&ensure_valid_target_name(r"\lib"), "a.dll"), "lib/a.dll");
        assert_eq!(join_target(&ensure_valid_target_name("/"), "a.dll"), "a.dll");
    }

    #[test]
    fn test_extension() {
        assert_eq!(extension("lib/a.DLL"), "dll");
        assert_eq!(extension("_rels/.rels"), "rels");
        assert_eq!(extension("readme"), "");
        assert_eq!(extension("dir.d/readme"), "");
        assert_eq!(extension("a.tar.gz"), "gz");
    }

    #[test]
    fn test_canonicalize_escapes() {
        assert_eq!(canonicalize_escapes("a%2fb%c3%a9"), "a%2Fb%C3%A9");
        assert_eq!(canonicalize_escapes("50%"), "50%");
        assert_eq!(canonicalize_escapes("é%zz"), "é%zz");
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(path in r"[a-zA-Z0-9./\\]{0,40}") {
            let once = normalize_path(&path);
            prop_assert_eq!(normalize_path(&once), once.clone());
        }

        #[test]
        fn prop_normalized_has_no_dot_segments(path in r"(\.{1,2}|[a-z]{1,3})([/\\](\.{1,2}|[a-z]{1,3})){0,8}") {
            let normalized = normalize_path(&path);
            prop_assert!(!normalized.contains('\\'));
            prop_assert!(normalized.split('/').all(|s| s != "." && s != ".."));
        }

        #[test]
        fn prop_plain_names_survive_escaping(name in r"[a-zA-Z0-9_\-@~]{1,20}(\.[a-z]{1,4})?") {
            prop_assert_eq!(ensure_valid_name(&name), name);
        }
    }
}
