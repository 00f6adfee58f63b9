use std::fmt;

const REPOSITORY_PREFIX: &str = "/repository/";

/// Where the app is. The repository route carries the `owner/repo` name,
/// URL-encoded as a single path segment in its string form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Bookmarks,
    Repository(String),
}

impl Route {
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.trim();
        if path.is_empty() || path == "/" {
            return Some(Route::Bookmarks);
        }

        let segment = path.strip_prefix(REPOSITORY_PREFIX)?;
        if segment.is_empty() || segment.contains('/') {
            return None;
        }
        let name = urlencoding::decode(segment).ok()?.into_owned();
        is_full_name(&name).then_some(Route::Repository(name))
    }

    /// Accept either a route path or a bare `owner/repo` name.
    pub fn from_target(target: &str) -> Option<Route> {
        let target = target.trim();
        if target.starts_with('/') {
            Route::parse(target)
        } else if is_full_name(target) {
            Some(Route::Repository(target.to_string()))
        } else {
            None
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Bookmarks => "/".to_string(),
            Route::Repository(name) => format!("{}{}", REPOSITORY_PREFIX, urlencoding::encode(name)),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// `owner/repo` with both halves non-empty.
fn is_full_name(name: &str) -> bool {
    match name.split_once('/') {
        Some((owner, repo)) => !owner.is_empty() && !repo.is_empty() && !repo.contains('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_bookmarks() {
        assert_eq!(Route::parse("/"), Some(Route::Bookmarks));
        assert_eq!(Route::parse(""), Some(Route::Bookmarks));
    }

    #[test]
    fn repository_path_is_encoded() {
        let route = Route::Repository("facebook/react".to_string());
        assert_eq!(route.path(), "/repository/facebook%2Freact");
    }

    #[test]
    fn parse_decodes_segment() {
        assert_eq!(
            Route::parse("/repository/facebook%2Freact"),
            Some(Route::Repository("facebook/react".to_string()))
        );
    }

    #[test]
    fn parse_rejects_unencoded_slash() {
        assert_eq!(Route::parse("/repository/facebook/react"), None);
    }

    #[test]
    fn parse_rejects_unknown_paths() {
        assert_eq!(Route::parse("/issues"), None);
        assert_eq!(Route::parse("/repository/"), None);
        assert_eq!(Route::parse("/repository/justaname"), None);
    }

    #[test]
    fn target_accepts_bare_name() {
        assert_eq!(
            Route::from_target("rust-lang/rust"),
            Some(Route::Repository("rust-lang/rust".to_string()))
        );
        assert_eq!(Route::from_target("rust"), None);
        assert_eq!(Route::from_target("/"), Some(Route::Bookmarks));
    }
}
