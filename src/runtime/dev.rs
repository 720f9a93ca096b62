//! Disk-backed asset access for development.
//!
//! Every call goes back to the filesystem: nothing is cached, compressed or
//! pre-hashed, so edited files are visible immediately.

use super::{AssetSource, Error, Result, checksum::sha256_hex, compile_pattern, serve};
use crate::bundler::glob_matches;
use std::{
    fs::{self, File},
    io,
    path::{Component, Path, PathBuf},
    time::SystemTime,
};
use walkdir::WalkDir;

/// Serves assets straight from a directory on disk.
#[derive(Clone, Debug)]
pub struct DevAssets {
    root: PathBuf,
}

impl DevAssets {
    /// Creates an accessor rooted at `root` (the directory the bundler would compile).
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Returns the asset root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a relative id onto the root. `None` for ids that would escape it
    /// or that pass through a hidden entry, which the bundler never compiles.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        let name = name.trim_start_matches('/');
        let rel = Path::new(name);
        let visible = rel.components().all(|c| match c {
            Component::Normal(segment) => !segment.as_encoded_bytes().starts_with(b"."),
            _ => false,
        });
        if !visible {
            return None;
        }
        Some(self.root.join(rel))
    }

    /// Like [`AssetSource::mod_time`] but reports why the time is unavailable.
    pub fn try_mod_time(&self, name: &str) -> Result<SystemTime> {
        let path = self
            .resolve(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        fs::metadata(&path)
            .and_then(|m| m.modified())
            .map_err(|e| lookup_error(name, e))
    }

    /// Relative ids of every non-hidden file below the root, sorted.
    pub fn names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let walker = WalkDir::new(&self.root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !e.file_name().as_encoded_bytes().starts_with(b"."));

        for entry in walker {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let segments: Option<Vec<&str>> = rel.components().map(|c| c.as_os_str().to_str()).collect();
            match segments {
                Some(segments) => names.push(segments.join("/")),
                None => log::warn!("skipping non UTF-8 asset path {}", entry.path().display()),
            }
        }

        names.sort();
        Ok(names)
    }
}

fn lookup_error(name: &str, error: io::Error) -> Error {
    if error.kind() == io::ErrorKind::NotFound {
        Error::NotFound(name.to_string())
    } else {
        Error::Io(error)
    }
}

impl AssetSource for DevAssets {
    type Reader = File;

    fn open(&self, name: &str) -> Result<File> {
        let path = self
            .resolve(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        let file = File::open(&path).map_err(|e| lookup_error(name, e))?;
        if file.metadata()?.is_dir() {
            return Err(Error::NotFound(name.to_string()));
        }
        Ok(file)
    }

    /// Falls back to `UNIX_EPOCH` when the file cannot be stat'ed; use
    /// [`DevAssets::try_mod_time`] to see the error.
    fn mod_time(&self, name: &str) -> SystemTime {
        self.try_mod_time(name).unwrap_or_else(|e| {
            log::debug!("mod_time({}): {}", name, e);
            SystemTime::UNIX_EPOCH
        })
    }

    fn hash(&self, name: &str) -> String {
        self.open(name)
            .and_then(|f| Ok(sha256_hex(f)?))
            .unwrap_or_default()
    }

    fn open_glob(&self, pattern: &str) -> Result<Vec<File>> {
        let compiled = compile_pattern(pattern)?;
        let readers: Vec<File> = self
            .names()?
            .into_iter()
            .filter(|name| glob_matches(&compiled, name))
            .filter_map(|name| self.open(&name).ok())
            .collect();

        if readers.is_empty() {
            return Err(Error::NoMatches(pattern.to_string()));
        }
        Ok(readers)
    }

    fn serve(&self, request: tiny_http::Request) -> io::Result<()> {
        serve::respond_dev(self, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::{Digest, Sha256};
    use std::io::Read;

    fn site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("css")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join("index.html"), "<h1>home</h1>").unwrap();
        fs::write(root.join("css/a.css"), "a{}").unwrap();
        fs::write(root.join("css/b.css"), "b{}").unwrap();
        fs::write(root.join(".git/config"), "secret").unwrap();
        dir
    }

    fn read_all(mut r: impl Read) -> String {
        let mut s = String::new();
        r.read_to_string(&mut s).unwrap();
        s
    }

    #[test]
    fn open_reads_current_contents() {
        let dir = site();
        let assets = DevAssets::new(dir.path());
        assert_eq!(read_all(assets.open("index.html").unwrap()), "<h1>home</h1>");

        fs::write(dir.path().join("index.html"), "<h1>edited</h1>").unwrap();
        assert_eq!(read_all(assets.open("/index.html").unwrap()), "<h1>edited</h1>");
    }

    #[test]
    fn missing_and_escaping_names_are_not_found() {
        let dir = site();
        let assets = DevAssets::new(dir.path().join("css"));
        assert!(assets.open("nope.css").unwrap_err().is_not_found());
        assert!(assets.open("../index.html").unwrap_err().is_not_found());
        assert!(assets.open("").unwrap_err().is_not_found());
    }

    #[test]
    fn hidden_entries_are_not_found() {
        let dir = site();
        fs::write(dir.path().join(".env"), "SECRET=1").unwrap();
        let assets = DevAssets::new(dir.path());
        assert!(assets.open(".env").unwrap_err().is_not_found());
        assert!(assets.open(".git/config").unwrap_err().is_not_found());
        assert!(assets.open("/.git/config").unwrap_err().is_not_found());
        assert_eq!(assets.hash(".env"), "");
        assert_eq!(assets.mod_time(".env"), SystemTime::UNIX_EPOCH);
        assert!(assets.resolve("css/a.css").is_some());
    }

    #[test]
    fn directories_are_not_assets() {
        let dir = site();
        let assets = DevAssets::new(dir.path());
        assert!(assets.open("css").unwrap_err().is_not_found());
    }

    #[test]
    fn mod_time_uses_stat_on_success_and_epoch_on_failure() {
        let dir = site();
        let assets = DevAssets::new(dir.path());
        let expected = fs::metadata(dir.path().join("index.html"))
            .unwrap()
            .modified()
            .unwrap();
        assert_eq!(assets.mod_time("index.html"), expected);
        assert_eq!(assets.mod_time("missing.html"), SystemTime::UNIX_EPOCH);
        assert!(assets.try_mod_time("missing.html").unwrap_err().is_not_found());
    }

    #[test]
    fn hash_is_hex_sha256_or_empty() {
        let dir = site();
        let assets = DevAssets::new(dir.path());
        assert_eq!(assets.hash("css/a.css"), hex::encode(Sha256::digest(b"a{}")));
        assert_eq!(assets.hash("css/zzz.css"), "");
    }

    #[test]
    fn glob_opens_matches_in_name_order() {
        let dir = site();
        let assets = DevAssets::new(dir.path());
        let readers = assets.open_glob("css/*.css").unwrap();
        let bodies: Vec<_> = readers.into_iter().map(read_all).collect();
        assert_eq!(bodies, vec!["a{}", "b{}"]);
    }

    #[test]
    fn glob_without_matches_is_an_error() {
        let dir = site();
        let assets = DevAssets::new(dir.path());
        assert!(assets.open_glob("*.png").unwrap_err().is_no_matches());
        assert!(assets.open_glob(".git/*").unwrap_err().is_no_matches());
        assert!(matches!(
            assets.open_glob("[oops"),
            Err(Error::InvalidPattern { .. })
        ));
    }

    #[test]
    fn names_skip_hidden_entries() {
        let dir = site();
        let assets = DevAssets::new(dir.path());
        assert_eq!(
            assets.names().unwrap(),
            vec!["css/a.css", "css/b.css", "index.html"]
        );
    }
}
