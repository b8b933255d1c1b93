//! The note index: workspace scanning and name resolution.
//!
//! Resolution is deliberately forgiving, in this order:
//! 1. exact workspace-relative path (with or without extension)
//! 2. file stem
//! 3. note title
//! 4. trailing path match (`folder/Note` against `sub/folder/Note.md`)
//!
//! All matching is case-insensitive. Needles may carry a `#fragment` suffix,
//! which is stripped before resolution. A needle that itself starts with `#`
//! (tag-shaped) is matched against literal stems and titles only.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use foamview_core::{Error, Resource, Result, Section, WorkspaceConfig, WorkspaceIndex};

use crate::note::{parse_note, slugify};

/// In-memory index over the notes of one workspace.
pub struct NoteIndex {
    resources: Vec<Arc<Resource>>,
    /// Lowercased relative path, with and without extension
    by_path: HashMap<String, usize>,
    /// Lowercased file stem, first note wins
    by_stem: HashMap<String, usize>,
    /// Lowercased title, first note wins
    by_title: HashMap<String, usize>,
}

impl NoteIndex {
    /// Scan a workspace directory and index every note in it.
    ///
    /// Unreadable or oversized files are logged and skipped; only a broken
    /// workspace root is a hard error.
    pub fn open(config: &WorkspaceConfig) -> Result<Self> {
        config.validate()?;

        let mut files = scan_files(config)?;
        files.sort();
        log::info!(
            "Indexing {} notes under {}",
            files.len(),
            config.root.display()
        );

        let mut index = Self::empty();
        for path in files {
            let text = match fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) => {
                    log::warn!("Failed to read {}: {}", path.display(), e);
                    continue;
                }
            };
            let relative = path
                .strip_prefix(&config.root)
                .map_err(|_| Error::invalid_path(format!("{} escapes workspace", path.display())))?
                .to_path_buf();
            index.insert(relative, &text);
        }

        Ok(index)
    }

    /// Build an index from in-memory documents, without touching the
    /// filesystem. Paths are workspace-relative identifiers.
    pub fn from_documents<P, S>(documents: impl IntoIterator<Item = (P, S)>) -> Self
    where
        P: Into<PathBuf>,
        S: AsRef<str>,
    {
        let mut index = Self::empty();
        for (path, text) in documents {
            index.insert(path.into(), text.as_ref());
        }
        index
    }

    fn empty() -> Self {
        Self {
            resources: Vec::new(),
            by_path: HashMap::new(),
            by_stem: HashMap::new(),
            by_title: HashMap::new(),
        }
    }

    fn insert(&mut self, relative: PathBuf, text: &str) {
        let resource = Arc::new(parse_note(relative, text));
        let slot = self.resources.len();

        let identifier = resource.identifier();
        self.by_path.entry(identifier.clone()).or_insert(slot);
        if let Some(without_ext) = strip_extension(&identifier) {
            self.by_path.entry(without_ext).or_insert(slot);
        }
        self.by_stem.entry(resource.stem()).or_insert(slot);
        self.by_title
            .entry(resource.title.to_lowercase())
            .or_insert(slot);

        self.resources.push(resource);
    }

    /// Number of indexed notes
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// True when no notes are indexed
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// All indexed notes, in scan order
    pub fn resources(&self) -> impl Iterator<Item = &Arc<Resource>> {
        self.resources.iter()
    }

    fn get(&self, slot: usize) -> Option<Arc<Resource>> {
        self.resources.get(slot).cloned()
    }

    fn lookup_name(&self, lower: &str) -> Option<Arc<Resource>> {
        if let Some(&slot) = self.by_path.get(lower) {
            return self.get(slot);
        }
        if let Some(&slot) = self.by_stem.get(lower) {
            return self.get(slot);
        }
        if let Some(&slot) = self.by_title.get(lower) {
            return self.get(slot);
        }
        None
    }

    fn lookup_trailing_path(&self, lower: &str) -> Option<Arc<Resource>> {
        if !lower.contains('/') {
            return None;
        }
        let suffix = format!("/{lower}");
        self.resources
            .iter()
            .find(|r| {
                let id = r.identifier();
                if id.ends_with(&suffix) {
                    return true;
                }
                match strip_extension(&id) {
                    Some(no_ext) => no_ext.ends_with(&suffix),
                    None => false,
                }
            })
            .cloned()
    }
}

impl WorkspaceIndex for NoteIndex {
    fn find(&self, needle: &str) -> Result<Option<Arc<Resource>>> {
        let needle = needle.trim();
        if needle.is_empty() {
            return Ok(None);
        }

        // Tag-shaped needles resolve against literal stems/titles only;
        // the leading # is not a fragment marker here.
        if let Some(rest) = needle.strip_prefix('#') {
            if rest.is_empty() {
                return Ok(None);
            }
            let lower = needle.to_lowercase();
            return Ok(self
                .by_stem
                .get(&lower)
                .or_else(|| self.by_title.get(&lower))
                .and_then(|&slot| self.get(slot)));
        }

        // Strip a #fragment suffix; resolution only sees the name part.
        let name = match needle.find('#') {
            Some(pos) => needle[..pos].trim_end(),
            None => needle,
        };
        if name.is_empty() {
            return Ok(None);
        }

        let lower = name.replace('\\', "/").to_lowercase();
        Ok(self
            .lookup_name(&lower)
            .or_else(|| self.lookup_trailing_path(&lower)))
    }

    fn find_section(&self, resource: &Resource, fragment: &str) -> Result<Option<Section>> {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return Ok(None);
        }

        let slug = slugify(fragment);
        Ok(resource
            .sections
            .iter()
            .find(|s| s.label.eq_ignore_ascii_case(fragment) || s.slug == slug)
            .cloned())
    }
}

/// Strip the extension from a lowercased identifier's final component.
fn strip_extension(identifier: &str) -> Option<String> {
    let dot = identifier.rfind('.')?;
    let component_start = identifier.rfind('/').map(|i| i + 1).unwrap_or(0);
    if dot <= component_start {
        return None;
    }
    Some(identifier[..dot].to_string())
}

/// Collect note files under the workspace root, honoring the config's
/// excluded directories, allowed extensions, and size limit.
fn scan_files(config: &WorkspaceConfig) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut stack = vec![config.root.clone()];

    while let Some(dir) = stack.pop() {
        let entries = fs::read_dir(&dir).map_err(Error::io)?;

        for entry in entries {
            let entry = entry.map_err(Error::io)?;
            let path = entry.path();

            if path.is_dir() {
                if is_excluded(&path, config) {
                    log::debug!("Skipping excluded directory: {}", path.display());
                    continue;
                }
                stack.push(path);
            } else if is_note_file(&path, config) {
                match entry.metadata() {
                    Ok(meta) if meta.len() > config.max_file_size => {
                        log::warn!(
                            "{}",
                            Error::file_too_large(&path, meta.len(), config.max_file_size)
                        );
                    }
                    Ok(_) => files.push(path),
                    Err(e) => log::warn!("Failed to stat {}: {}", path.display(), e),
                }
            }
        }
    }

    Ok(files)
}

fn is_excluded(path: &Path, config: &WorkspaceConfig) -> bool {
    path.file_name()
        .map(|name| config.excluded_paths.contains(&name.to_string_lossy().to_string()))
        .unwrap_or(false)
}

fn is_note_file(path: &Path, config: &WorkspaceConfig) -> bool {
    path.extension()
        .map(|ext| {
            config
                .allowed_extensions
                .contains(&ext.to_string_lossy().to_lowercase())
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> NoteIndex {
        NoteIndex::from_documents([
            ("inbox.md", "# Inbox\n\ncapture everything"),
            (
                "projects/roadmap.md",
                "---\ntitle: Product Roadmap\n---\n\n# Roadmap\n\n## Q3\nship it\n",
            ),
            ("projects/archive/roadmap.md", "# Old Roadmap\n"),
        ])
    }

    #[test]
    fn test_find_by_stem() {
        let index = sample_index();
        let found = index.find("Inbox").unwrap().unwrap();
        assert_eq!(found.path, PathBuf::from("inbox.md"));
    }

    #[test]
    fn test_find_by_relative_path() {
        let index = sample_index();
        let found = index.find("projects/roadmap.md").unwrap().unwrap();
        assert_eq!(found.title, "Product Roadmap");
        let found = index.find("projects/roadmap").unwrap().unwrap();
        assert_eq!(found.title, "Product Roadmap");
    }

    #[test]
    fn test_find_by_title() {
        let index = sample_index();
        let found = index.find("product roadmap").unwrap().unwrap();
        assert_eq!(found.path, PathBuf::from("projects/roadmap.md"));
    }

    #[test]
    fn test_find_trailing_path() {
        let index = sample_index();
        let found = index.find("archive/roadmap").unwrap().unwrap();
        assert_eq!(found.path, PathBuf::from("projects/archive/roadmap.md"));
    }

    #[test]
    fn test_find_strips_fragment() {
        let index = sample_index();
        let found = index.find("roadmap#Q3").unwrap().unwrap();
        assert_eq!(found.title, "Product Roadmap");
    }

    #[test]
    fn test_find_stem_collision_is_deterministic() {
        let index = sample_index();
        // Both roadmap notes share a stem; scan order decides.
        let found = index.find("roadmap").unwrap().unwrap();
        assert_eq!(found.path, PathBuf::from("projects/roadmap.md"));
    }

    #[test]
    fn test_find_missing() {
        let index = sample_index();
        assert!(index.find("nope").unwrap().is_none());
        assert!(index.find("").unwrap().is_none());
        assert!(index.find("#").unwrap().is_none());
    }

    #[test]
    fn test_tag_needle_does_not_match_plain_notes() {
        let index = sample_index();
        assert!(index.find("#inbox").unwrap().is_none());
    }

    #[test]
    fn test_tag_needle_matches_literal_stem() {
        let index = NoteIndex::from_documents([("#daily.md", "tag landing page")]);
        let found = index.find("#daily").unwrap().unwrap();
        assert_eq!(found.path, PathBuf::from("#daily.md"));
    }

    #[test]
    fn test_find_section_by_label_and_slug() {
        let index = sample_index();
        let resource = index.find("roadmap").unwrap().unwrap();

        let by_label = index.find_section(&resource, "q3").unwrap().unwrap();
        assert_eq!(by_label.label, "Q3");

        let by_slug = index.find_section(&resource, "Q3").unwrap().unwrap();
        assert_eq!(by_slug.range, by_label.range);

        assert!(index.find_section(&resource, "missing").unwrap().is_none());
        assert!(index.find_section(&resource, "").unwrap().is_none());
    }
}
