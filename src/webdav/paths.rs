//! Path arithmetic for the three addressing conventions in play: the
//! host-visible virtual path, the WebDAV collection path, and the optional
//! server-side prefix. Pure string logic, no I/O.
//!
//! Servers are inconsistent about trailing slashes and about whether hrefs
//! come back prefixed, so every comparison here accepts both slash forms.

/// Builds the server-side request path for a virtual path. The prefix was
/// stripped of its trailing slash at configuration time, so this is plain
/// concatenation with no further normalization.
pub fn to_server_path(virtual_path: &str, prefix: &str) -> String {
    format!("{}{}", prefix, virtual_path)
}

/// True when `entry_href` denotes the queried directory itself rather than
/// one of its children. Matches `prefix + virtual_path` with and without a
/// trailing slash, and for the root listing also the bare prefix forms some
/// servers answer with.
pub fn is_self_entry(entry_href: &str, virtual_path: &str, prefix: &str) -> bool {
    let own = to_server_path(virtual_path, prefix);
    if entry_href == own || entry_href == format!("{}/", own) {
        return true;
    }

    if virtual_path == "/" && !prefix.is_empty() {
        return entry_href == prefix || entry_href == format!("{}/", prefix);
    }

    false
}

/// Display name of an entry: the last `/`-delimited segment of its href,
/// with a single trailing slash stripped first and percent-encoding decoded.
pub fn child_name(entry_href: &str) -> String {
    let trimmed = entry_href.strip_suffix('/').unwrap_or(entry_href);
    let segment = trimmed.rsplit('/').next().unwrap_or(trimmed);

    urlencoding::decode(segment)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_server_path_concatenates() {
        assert_eq!(to_server_path("/docs/a.txt", "/webdav"), "/webdav/docs/a.txt");
        assert_eq!(to_server_path("/docs/a.txt", ""), "/docs/a.txt");
        assert_eq!(to_server_path("/", "/webdav"), "/webdav/");
    }

    #[test]
    fn test_stripping_prefix_recovers_virtual_path() {
        let prefix = "/remote.php/webdav";
        let virtual_path = "/Photos/image.jpg";
        let server_path = to_server_path(virtual_path, prefix);
        assert_eq!(&server_path[prefix.len()..], virtual_path);
    }

    #[test]
    fn test_self_entry_all_slash_forms() {
        // with prefix
        assert!(is_self_entry("/webdav/docs", "/docs", "/webdav"));
        assert!(is_self_entry("/webdav/docs/", "/docs", "/webdav"));
        // without prefix
        assert!(is_self_entry("/docs", "/docs", ""));
        assert!(is_self_entry("/docs/", "/docs", ""));
    }

    #[test]
    fn test_self_entry_bare_prefix_forms_at_root() {
        assert!(is_self_entry("/webdav", "/", "/webdav"));
        assert!(is_self_entry("/webdav/", "/", "/webdav"));
        // bare prefix only matches when listing the root
        assert!(!is_self_entry("/webdav", "/docs", "/webdav"));
    }

    #[test]
    fn test_siblings_and_children_are_not_self() {
        assert!(!is_self_entry("/webdav/docs/a.txt", "/docs", "/webdav"));
        assert!(!is_self_entry("/webdav/docs2", "/docs", "/webdav"));
        assert!(!is_self_entry("/webdav/doc", "/docs", "/webdav"));
    }

    #[test]
    fn test_root_self_entry_without_prefix() {
        assert!(is_self_entry("/", "/", ""));
        assert!(!is_self_entry("/a.txt", "/", ""));
    }

    #[test]
    fn test_child_name_strips_trailing_slash() {
        assert_eq!(child_name("/webdav/docs/"), "docs");
        assert_eq!(child_name("/webdav/docs/a.txt"), "a.txt");
        assert_eq!(child_name("plain"), "plain");
    }

    #[test]
    fn test_child_name_decodes_percent_encoding() {
        assert_eq!(child_name("/webdav/File%20with%20spaces.pdf"), "File with spaces.pdf");
    }
}
