use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Result, ScopeError};
use crate::util::natsort::natural_sort;

/// Match one path component against a segment with `*` and `?` wildcards.
fn match_segment(pat: &str, name: &str) -> bool {
    let p: Vec<char> = pat.chars().collect();
    let n: Vec<char> = name.chars().collect();
    let (mut pi, mut ni) = (0, 0);
    let mut star: Option<(usize, usize)> = None;
    while ni < n.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == n[ni]) {
            pi += 1;
            ni += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some((pi, ni));
            pi += 1;
        } else if let Some((sp, sn)) = star {
            pi = sp + 1;
            ni = sn + 1;
            star = Some((sp, sn + 1));
        } else {
            return false;
        }
    }
    p[pi..].iter().all(|&c| c == '*')
}

fn match_components(pat: &[&str], comps: &[&str]) -> bool {
    match pat.split_first() {
        None => comps.is_empty(),
        Some((&"**", rest)) => (0..=comps.len()).any(|i| match_components(rest, &comps[i..])),
        Some((seg, rest)) => match comps.split_first() {
            Some((comp, tail)) => match_segment(seg, comp) && match_components(rest, tail),
            None => false,
        },
    }
}

/// Glob-style match of a `/`-separated relative path. `**` spans any number of directories.
pub fn glob_match(pattern: &str, rel: &str) -> bool {
    let pat: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let comps: Vec<&str> = rel.split('/').filter(|s| !s.is_empty()).collect();
    match_components(&pat, &comps)
}

/// Files under `root` whose root-relative path matches `pattern`, naturally sorted.
pub fn find_files(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(ScopeError::NotFound(format!(
            "folder '{}' does not exist",
            root.display()
        )));
    }
    let mut out = Vec::new();
    for e in WalkDir::new(root).follow_links(true) {
        let e = e.map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        if !e.file_type().is_file() {
            continue;
        }
        let Ok(rel) = e.path().strip_prefix(root) else {
            continue;
        };
        let rel = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if glob_match(pattern, &rel) {
            out.push(e.path().to_path_buf());
        }
    }
    natural_sort(&mut out);
    debug!(root = %root.display(), pattern, matched = out.len(), "pattern scan");
    Ok(out)
}

/// Like [`find_files`], but `pattern` may start at any depth below `root`.
pub fn find_files_recursive(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    find_files(root, &format!("**/{pattern}"))
}
