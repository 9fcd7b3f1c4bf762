//! Interned symbols for feature names and value codes.
//!
//! Names and codes are interned while a declaration is resolved. Evaluation
//! then matches conditions and allowed values by comparing addresses.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::{LazyLock, Mutex};

/// Leaked texts, one allocation per distinct string.
#[derive(Default)]
struct SymbolTable {
    texts: HashSet<&'static str>,
}

impl SymbolTable {
    fn intern(&mut self, text: &str) -> &'static str {
        match self.texts.get(text) {
            Some(&known) => known,
            None => {
                let leaked: &'static str = Box::leak(text.into());
                self.texts.insert(leaked);
                leaked
            }
        }
    }
}

static TABLE: LazyLock<Mutex<SymbolTable>> = LazyLock::new(Default::default);

/// A feature name or value code, interned for the lifetime of the process.
#[derive(Clone, Copy)]
pub struct Symbol(&'static str);

impl Symbol {
    pub fn new(text: impl AsRef<str>) -> Self {
        // Only resolution writes to the table; a poisoned lock still holds
        // fully inserted entries.
        let mut table = TABLE.lock().unwrap_or_else(|e| e.into_inner());
        Symbol(table.intern(text.as_ref()))
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl Deref for Symbol {
    type Target = str;

    fn deref(&self) -> &str {
        self.0
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        self.0
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.0, other.0)
    }
}

impl Eq for Symbol {}

impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// Hashes the text so that `Borrow<str>` lookups land in the same bucket.
impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl From<&str> for Symbol {
    fn from(text: &str) -> Self {
        Symbol::new(text)
    }
}
