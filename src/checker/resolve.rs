// src/checker/resolve.rs
// =============================================================================
// Maps an internal href to the file on disk that a static host would serve.
//
// Candidates are tried in a fixed order and the first regular file wins:
//
//   1. /blog/post.html       exact path, only when the href names the file
//   2. /blog/post  -> blog/post.html        clean URL
//   3. /blog/post  -> blog/post/index.html  directory index
//   4. /blog/post  -> blog/post             exact path as-is (assets)
//
// The order matters when both `post.html` and `post/index.html` exist: the
// clean-URL file always wins, so results never depend on directory order.
// =============================================================================

use std::path::{Path, PathBuf};

/// Site-root-relative page path with `/` separators, e.g. `blog/post.html`
pub type PageId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    ExplicitFile,
    CleanUrl,
    DirectoryIndex,
    AsIs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub page: PageId,
    pub strategy: Strategy,
}

/// Drops `?query` and `#fragment`; neither affects which file exists
pub fn strip_query_and_fragment(href: &str) -> &str {
    let end = href.find(['?', '#']).unwrap_or(href.len());
    &href[..end]
}

// Resolves an internal href against the site root
//
// Parameters:
//   href: root-relative ("/a") or document-relative ("a", "../a")
//   current_page: PageId of the page containing the link
//   site_root: directory the site is served from
//   extension: page-file extension without the dot ("html")
//
// Returns: Some(target) for the first candidate that exists, None for a dead link
pub fn resolve(
    href: &str,
    current_page: &str,
    site_root: &Path,
    extension: &str,
) -> Option<ResolvedTarget> {
    let clean = strip_query_and_fragment(href);

    let segments = if let Some(rooted) = clean.strip_prefix('/') {
        normalize(Vec::new(), rooted)
    } else {
        let mut base: Vec<String> = current_page.split('/').map(str::to_string).collect();
        base.pop(); // the page's own file name
        normalize(base, clean)
    };

    candidates(&segments, clean, extension)
        .into_iter()
        .find(|(rel, _)| site_root.join(rel).is_file())
        .map(|(rel, strategy)| ResolvedTarget {
            page: to_page_id(&rel),
            strategy,
        })
}

// Applies `.` and `..` segments lexically. `..` at the root is dropped, so a
// link can never resolve to a file outside the site.
fn normalize(mut base: Vec<String>, path: &str) -> Vec<String> {
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                base.pop();
            }
            other => base.push(other.to_string()),
        }
    }
    base
}

fn candidates(segments: &[String], clean: &str, extension: &str) -> Vec<(PathBuf, Strategy)> {
    let suffix = format!(".{}", extension);
    let exact: PathBuf = segments.iter().collect();
    let names_file = clean.ends_with(&suffix);

    let mut list = Vec::with_capacity(4);

    if names_file {
        list.push((exact.clone(), Strategy::ExplicitFile));
    }

    if let Some(last) = segments.last() {
        if !clean.ends_with('/') {
            let mut clean_url = exact.clone();
            clean_url.set_file_name(format!("{}{}", last, suffix));
            list.push((clean_url, Strategy::CleanUrl));
        }
    }

    list.push((exact.join(format!("index{}", suffix)), Strategy::DirectoryIndex));

    if !names_file && !segments.is_empty() {
        list.push((exact, Strategy::AsIs));
    }

    list
}

fn to_page_id(rel: &Path) -> PageId {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why normalize paths by hand instead of fs::canonicalize?
//    - canonicalize fails for paths that don't exist, and dead links are
//      exactly the paths that don't exist
//    - It would also follow symlinks, which a static host usually doesn't
//
// 2. What does Option<ResolvedTarget> mean here?
//    - Some(target): the link works, and we know which rule matched
//    - None: a dead link; the caller turns it into an issue
// -----------------------------------------------------------------------------
