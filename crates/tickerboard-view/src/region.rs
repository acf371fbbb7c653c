use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// One rendered element of a [`Region`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    /// Heading; `level` follows html (`2` is an `<h2>`).
    Heading { level: u8, text: String },

    /// A `key : value` line, or any other plain text.
    Paragraph(String),

    Link { href: String, title: String },

    Break,

    /// A failed request, shown in place of the region's data.
    Error(String),
}

impl Block {
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level,
            text: text.into(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph(text.into())
    }

    pub fn link(href: impl Into<String>, title: impl Into<String>) -> Self {
        Block::Link {
            href: href.into(),
            title: title.into(),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Block::Heading { text, .. } => f.write_str(text),
            Block::Paragraph(text) => f.write_str(text),
            Block::Link { href, title } => write!(f, "{title} <{href}>"),
            Block::Break => Ok(()),
            Block::Error(message) => write!(f, "error: {message}"),
        }
    }
}

/// Handle to a named display region.
///
/// Clones share the same contents; a page builds its regions once and hands
/// the handles to whichever controller writes them.
#[derive(Clone, Debug)]
pub struct Region {
    id: &'static str,
    blocks: Arc<Mutex<Vec<Block>>>,
}

impl Region {
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            blocks: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn append(&self, block: Block) {
        self.lock().push(block);
    }

    pub fn extend(&self, blocks: impl IntoIterator<Item = Block>) {
        self.lock().extend(blocks);
    }

    /// Clears the region and writes `blocks` under a single lock, so readers
    /// never observe a half-rendered region.
    pub fn replace(&self, blocks: Vec<Block>) {
        *self.lock() = blocks;
    }

    /// Like [`replace`](Self::replace), but only when `current()` still holds
    /// once the region is locked. Returns whether the region was written.
    ///
    /// Checking under the lock means a clear that follows a newer token can't
    /// be overwritten by a response that checked against the older one.
    pub fn replace_if(&self, current: impl FnOnce() -> bool, blocks: Vec<Block>) -> bool {
        let mut guard = self.lock();
        if !current() {
            return false;
        }
        *guard = blocks;
        true
    }

    /// Copy of the current contents.
    pub fn blocks(&self) -> Vec<Block> {
        self.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Text of every non-break block, in order.
    pub fn lines(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|block| !matches!(block, Block::Break))
            .map(|block| block.to_string())
            .collect()
    }

    // a panic mid-render leaves at worst a partial region, which is still displayable
    fn lock(&self) -> MutexGuard<'_, Vec<Block>> {
        self.blocks.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
