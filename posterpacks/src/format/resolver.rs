//! Format resolution by priority-ordered probes.

use std::fmt;
use std::path::Path;

use tracing::debug;

use super::archive::ZipPackFormat;
use super::local::LocalPackFormat;
use super::traits::PackFormat;

/// A probe inspects a path (and its extension, without the dot) and returns
/// a format when it recognises the source.
pub type FormatProbe = Box<dyn Fn(&Path, &str) -> Option<Box<dyn PackFormat>>>;

/// Resolves a pack source path into a [`PackFormat`].
///
/// Probes are tried in registration order and the first one that produces a
/// format wins; later probes are not consulted. The default resolver knows
/// directories and `.zip` archives, in that order.
pub struct FormatResolver {
    probes: Vec<(String, FormatProbe)>,
}

impl FormatResolver {
    /// A resolver with no probes.
    pub fn empty() -> Self {
        Self { probes: Vec::new() }
    }

    /// A resolver with the directory and zip probes.
    pub fn builtin() -> Self {
        Self::empty()
            .with_probe("directory", directory_probe)
            .with_probe("zip", zip_probe)
    }

    /// Append a probe. It runs after every probe registered before it.
    pub fn with_probe<F>(mut self, name: impl Into<String>, probe: F) -> Self
    where
        F: Fn(&Path, &str) -> Option<Box<dyn PackFormat>> + 'static,
    {
        self.probes.push((name.into(), Box::new(probe)));
        self
    }

    /// Names of the registered probes in priority order.
    pub fn probe_names(&self) -> impl Iterator<Item = &str> {
        self.probes.iter().map(|(name, _)| name.as_str())
    }

    /// Resolve `path`, using its own extension.
    pub fn resolve(&self, path: &Path) -> Option<Box<dyn PackFormat>> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        self.resolve_with_extension(path, extension)
    }

    /// Resolve `path` as if it had the given extension.
    pub fn resolve_with_extension(
        &self,
        path: &Path,
        extension: &str,
    ) -> Option<Box<dyn PackFormat>> {
        for (name, probe) in &self.probes {
            if let Some(format) = probe(path, extension) {
                debug!(path = %path.display(), probe = %name, kind = %format.kind(), "Resolved pack format");
                return Some(format);
            }
        }

        None
    }
}

impl Default for FormatResolver {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for FormatResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatResolver")
            .field("probes", &self.probe_names().collect::<Vec<_>>())
            .finish()
    }
}

/// Matches existing directories.
pub fn directory_probe(path: &Path, _extension: &str) -> Option<Box<dyn PackFormat>> {
    if !path.is_dir() {
        return None;
    }
    Some(Box::new(LocalPackFormat::new(path)))
}

/// Matches `.zip` files that open as valid archives.
///
/// Open failures mean "not a match", never an error.
pub fn zip_probe(path: &Path, extension: &str) -> Option<Box<dyn PackFormat>> {
    if !extension.eq_ignore_ascii_case("zip") || !path.is_file() {
        return None;
    }

    match ZipPackFormat::open(path) {
        Ok(format) => Some(Box::new(format)),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Zip probe could not open archive");
            None
        }
    }
}
