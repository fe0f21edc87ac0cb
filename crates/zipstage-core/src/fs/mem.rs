//! In-memory filesystem.

use std::collections::BTreeMap;
use std::io;
use std::io::Cursor;
use std::io::Write;
use std::ops::Bound;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

use super::Filesystem;
use super::NodeKind;
use super::NodeMetadata;
use super::ReadSeek;
use super::Walk;
use super::WalkEntry;

#[derive(Debug, Clone)]
enum MemNode {
    Directory,
    File { data: Vec<u8>, mode: u32 },
    Symlink { target: PathBuf },
}

impl MemNode {
    fn kind(&self) -> NodeKind {
        match self {
            Self::Directory => NodeKind::Directory,
            Self::File { .. } => NodeKind::File,
            Self::Symlink { .. } => NodeKind::Symlink,
        }
    }
}

type Nodes = BTreeMap<PathBuf, MemNode>;

/// Filesystem held entirely in memory.
///
/// Keys are ordered by path components, so a node's descendants are stored
/// contiguously right after it and iteration order is a name-sorted
/// pre-order walk. The filesystem root and the empty path always exist as
/// directories. Symlinks are stored as opaque nodes and never followed.
/// Clones share the same tree.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use zipstage_core::fs::Filesystem;
/// use zipstage_core::fs::MemFs;
///
/// let fs = MemFs::new();
/// fs.insert_file("/out/notes.txt", b"hello").unwrap();
/// assert!(fs.metadata(Path::new("/out")).unwrap().is_dir());
/// assert_eq!(fs.read(Path::new("/out/notes.txt")).unwrap(), b"hello");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemFs {
    nodes: Arc<Mutex<Nodes>>,
}

fn key(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn is_top(path: &Path) -> bool {
    path.as_os_str().is_empty() || path.parent().is_none()
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such file or directory: {}", path.display()),
    )
}

fn not_a_directory(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotADirectory,
        format!("not a directory: {}", path.display()),
    )
}

fn is_a_symlink(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("symlinks are not followed: {}", path.display()),
    )
}

fn is_a_directory(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::IsADirectory,
        format!("is a directory: {}", path.display()),
    )
}

fn ensure_parent_dir(nodes: &Nodes, path: &Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if is_top(parent) {
        return Ok(());
    }
    match nodes.get(parent) {
        Some(MemNode::Directory) => Ok(()),
        Some(MemNode::File { .. } | MemNode::Symlink { .. }) => Err(not_a_directory(parent)),
        None => Err(not_found(parent)),
    }
}

fn has_children(nodes: &Nodes, path: &Path) -> bool {
    nodes
        .range::<Path, _>((Bound::Excluded(path), Bound::Unbounded))
        .next()
        .is_some_and(|(k, _)| k.starts_with(path))
}

impl MemFs {
    /// Creates an empty in-memory filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a file with mode `0o644`, creating missing parent directories.
    pub fn insert_file(&self, path: impl AsRef<Path>, data: &[u8]) -> io::Result<()> {
        let path = key(path.as_ref());
        if let Some(parent) = path.parent() {
            self.create_dir_all(parent)?;
        }
        let mut nodes = self.nodes.lock();
        if matches!(nodes.get(&path), Some(MemNode::Directory)) {
            return Err(is_a_directory(&path));
        }
        nodes.insert(
            path,
            MemNode::File {
                data: data.to_vec(),
                mode: 0o644,
            },
        );
        Ok(())
    }

    /// Stores a symlink at `path` pointing to `target`, creating missing
    /// parent directories.
    pub fn insert_symlink(
        &self,
        path: impl AsRef<Path>,
        target: impl AsRef<Path>,
    ) -> io::Result<()> {
        let path = key(path.as_ref());
        if let Some(parent) = path.parent() {
            self.create_dir_all(parent)?;
        }
        let mut nodes = self.nodes.lock();
        if matches!(nodes.get(&path), Some(MemNode::Directory)) {
            return Err(is_a_directory(&path));
        }
        nodes.insert(
            path,
            MemNode::Symlink {
                target: target.as_ref().to_path_buf(),
            },
        );
        Ok(())
    }

    /// Returns the content of a file.
    pub fn read(&self, path: impl AsRef<Path>) -> io::Result<Vec<u8>> {
        let path = key(path.as_ref());
        match self.nodes.lock().get(&path) {
            Some(MemNode::File { data, .. }) => Ok(data.clone()),
            Some(MemNode::Directory) => Err(is_a_directory(&path)),
            Some(MemNode::Symlink { .. }) => Err(is_a_symlink(&path)),
            None => Err(not_found(&path)),
        }
    }

    /// Returns the permission bits a file was created with.
    #[must_use]
    pub fn file_mode(&self, path: impl AsRef<Path>) -> Option<u32> {
        match self.nodes.lock().get(&key(path.as_ref())) {
            Some(MemNode::File { mode, .. }) => Some(*mode),
            _ => None,
        }
    }

    /// Returns `true` if a node exists at `path`.
    #[must_use]
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        let path = key(path.as_ref());
        is_top(&path) || self.nodes.lock().contains_key(&path)
    }

    /// Returns every stored path in walk order.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.nodes.lock().keys().cloned().collect()
    }
}

/// Writer that appends straight into the shared tree.
struct MemWriter {
    nodes: Arc<Mutex<Nodes>>,
    path: PathBuf,
}

impl Write for MemWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.nodes.lock().get_mut(&self.path) {
            Some(MemNode::File { data, .. }) => {
                data.extend_from_slice(buf);
                Ok(buf.len())
            }
            Some(MemNode::Directory) => Err(is_a_directory(&self.path)),
            Some(MemNode::Symlink { .. }) => Err(is_a_symlink(&self.path)),
            None => Err(not_found(&self.path)),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Filesystem for MemFs {
    fn open_read(&self, path: &Path) -> io::Result<Box<dyn ReadSeek + '_>> {
        let data = self.read(path)?;
        Ok(Box::new(Cursor::new(data)))
    }

    fn open_write(&self, path: &Path, mode: u32) -> io::Result<Box<dyn Write + '_>> {
        let path = key(path);
        let mut nodes = self.nodes.lock();
        ensure_parent_dir(&nodes, &path)?;
        if is_top(&path) || matches!(nodes.get(&path), Some(MemNode::Directory)) {
            return Err(is_a_directory(&path));
        }
        nodes.insert(
            path.clone(),
            MemNode::File {
                data: Vec::new(),
                mode,
            },
        );
        drop(nodes);

        Ok(Box::new(MemWriter {
            nodes: Arc::clone(&self.nodes),
            path,
        }))
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        let path = key(path);
        let mut nodes = self.nodes.lock();
        match nodes.get(&path).map(MemNode::kind) {
            None => Ok(()),
            Some(NodeKind::Directory) if has_children(&nodes, &path) => Err(io::Error::new(
                io::ErrorKind::DirectoryNotEmpty,
                format!("directory not empty: {}", path.display()),
            )),
            Some(_) => {
                nodes.remove(&path);
                Ok(())
            }
        }
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let path = key(path);
        let mut nodes = self.nodes.lock();
        let mut ancestors: Vec<&Path> = path.ancestors().filter(|p| !is_top(p)).collect();
        ancestors.reverse();

        for dir in ancestors {
            match nodes.get(dir) {
                Some(MemNode::Directory) => {}
                Some(MemNode::File { .. } | MemNode::Symlink { .. }) => {
                    return Err(not_a_directory(dir));
                }
                None => {
                    nodes.insert(dir.to_path_buf(), MemNode::Directory);
                }
            }
        }
        Ok(())
    }

    fn metadata(&self, path: &Path) -> io::Result<NodeMetadata> {
        let path = key(path);
        if is_top(&path) {
            return Ok(NodeMetadata {
                kind: NodeKind::Directory,
                len: 0,
            });
        }
        match self.nodes.lock().get(&path) {
            Some(MemNode::File { data, .. }) => Ok(NodeMetadata {
                kind: NodeKind::File,
                len: data.len() as u64,
            }),
            Some(MemNode::Directory) => Ok(NodeMetadata {
                kind: NodeKind::Directory,
                len: 0,
            }),
            Some(MemNode::Symlink { target }) => Ok(NodeMetadata {
                kind: NodeKind::Symlink,
                len: target.as_os_str().len() as u64,
            }),
            None => Err(not_found(&path)),
        }
    }

    fn walk(&self, root: &Path) -> io::Result<Walk<'_>> {
        let root = key(root);
        let nodes = self.nodes.lock();

        let root_kind = if is_top(&root) {
            NodeKind::Directory
        } else {
            nodes.get(&root).map(MemNode::kind).ok_or_else(|| not_found(&root))?
        };

        let mut entries: Vec<io::Result<WalkEntry>> = vec![Ok(WalkEntry {
            path: root.clone(),
            kind: root_kind,
        })];
        if root_kind == NodeKind::Directory {
            entries.extend(
                nodes
                    .range::<Path, _>((Bound::Excluded(root.as_path()), Bound::Unbounded))
                    .take_while(|(k, _)| k.starts_with(&root))
                    .map(|(k, node)| {
                        Ok(WalkEntry {
                            path: k.clone(),
                            kind: node.kind(),
                        })
                    }),
            );
        }

        Ok(Box::new(entries.into_iter()))
    }
}
