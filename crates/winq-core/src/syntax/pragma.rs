//! PRAGMA names.

use core::fmt;

use super::{Identifier, Node};

/// The name of a SQLite or SQLCipher pragma.
///
/// Named constructors cover the pragmas the engine and its cipher
/// extension understand; [`Pragma::new`] accepts any other name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pragma {
    pub name: String,
}

impl Pragma {
    /// Creates a pragma reference by name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

macro_rules! named_pragmas {
    ($($method:ident => $name:literal,)*) => {
        impl Pragma {
            $(
                #[doc = concat!("`", $name, "`")]
                #[must_use]
                pub fn $method() -> Self {
                    Self::new($name)
                }
            )*
        }
    };
}

named_pragmas! {
    application_id => "application_id",
    auto_vacuum => "auto_vacuum",
    automatic_index => "automatic_index",
    busy_timeout => "busy_timeout",
    cache_size => "cache_size",
    cache_spill => "cache_spill",
    case_sensitive_like => "case_sensitive_like",
    cell_size_check => "cell_size_check",
    checkpoint_fullfsync => "checkpoint_fullfsync",
    cipher => "cipher",
    cipher_add_random => "cipher_add_random",
    cipher_compatibility => "cipher_compatibility",
    cipher_default_kdf_iter => "cipher_default_kdf_iter",
    cipher_default_page_size => "cipher_default_page_size",
    cipher_default_use_hmac => "cipher_default_use_hmac",
    cipher_hmac_algorithm => "cipher_hmac_algorithm",
    cipher_kdf_algorithm => "cipher_kdf_algorithm",
    cipher_migrate => "cipher_migrate",
    cipher_page_size => "cipher_page_size",
    cipher_plaintext_header_size => "cipher_plaintext_header_size",
    cipher_profile => "cipher_profile",
    cipher_provider => "cipher_provider",
    cipher_provider_version => "cipher_provider_version",
    cipher_salt => "cipher_salt",
    cipher_use_hmac => "cipher_use_hmac",
    cipher_version => "cipher_version",
    collation_list => "collation_list",
    data_version => "data_version",
    database_list => "database_list",
    defer_foreign_keys => "defer_foreign_keys",
    encoding => "encoding",
    foreign_key_check => "foreign_key_check",
    foreign_key_list => "foreign_key_list",
    foreign_keys => "foreign_keys",
    freelist_count => "freelist_count",
    fullfsync => "fullfsync",
    function_list => "function_list",
    ignore_check_constraints => "ignore_check_constraints",
    incremental_vacuum => "incremental_vacuum",
    index_info => "index_info",
    index_list => "index_list",
    index_xinfo => "index_xinfo",
    integrity_check => "integrity_check",
    journal_mode => "journal_mode",
    journal_size_limit => "journal_size_limit",
    key => "key",
    kdf_iter => "kdf_iter",
    legacy_file_format => "legacy_file_format",
    locking_mode => "locking_mode",
    max_page_count => "max_page_count",
    mmap_size => "mmap_size",
    module_list => "module_list",
    optimize => "optimize",
    page_count => "page_count",
    page_size => "page_size",
    parser_trace => "parser_trace",
    pragma_list => "pragma_list",
    query_only => "query_only",
    quick_check => "quick_check",
    read_uncommitted => "read_uncommitted",
    recursive_triggers => "recursive_triggers",
    rekey => "rekey",
    reverse_unordered_selects => "reverse_unordered_selects",
    schema_version => "schema_version",
    secure_delete => "secure_delete",
    shrink_memory => "shrink_memory",
    soft_heap_limit => "soft_heap_limit",
    stats => "stats",
    synchronous => "synchronous",
    table_info => "table_info",
    temp_store => "temp_store",
    threads => "threads",
    user_version => "user_version",
    vdbe_addoptrace => "vdbe_addoptrace",
    vdbe_debug => "vdbe_debug",
    vdbe_listing => "vdbe_listing",
    vdbe_trace => "vdbe_trace",
    wal_autocheckpoint => "wal_autocheckpoint",
    wal_checkpoint => "wal_checkpoint",
    writable_schema => "writable_schema",
}

impl From<&str> for Pragma {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for Pragma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Identifier for Pragma {
    fn node(&self) -> Node<'_> {
        Node::Pragma(self)
    }

    fn is_valid(&self) -> bool {
        !self.name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_pragmas() {
        assert_eq!(Pragma::user_version().to_string(), "user_version");
        assert_eq!(
            Pragma::cipher_plaintext_header_size().name,
            "cipher_plaintext_header_size"
        );
        assert_eq!(Pragma::from("journal_mode"), Pragma::journal_mode());
    }

    #[test]
    fn test_empty_name_is_invalid() {
        assert!(!Pragma::new("").is_valid());
        assert!(Pragma::table_info().is_valid());
    }
}
