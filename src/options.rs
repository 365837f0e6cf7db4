// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// Processing options.
#[derive(Clone, Debug)]
pub struct Options {
    /// Relaxes the parser's document size guards.
    ///
    /// When not set, an input larger than 10_000_000 bytes, with more than
    /// 1_000_000 nodes or with elements nested deeper than 256 levels is rejected
    /// and returned untouched.
    ///
    /// When set, only the nesting limit stays, raised to 384 levels.
    ///
    /// Default: false
    pub allow_huge_files: bool,

    /// Renames classes that appear after the first selector token.
    ///
    /// Only classes which were already renamed by some rule of the same
    /// `style` element are affected, so `.a .b` becomes `.a-ID .b-ID`
    /// only when `.b` starts a rule of its own.
    ///
    /// Default: false
    pub rename_nested_classes: bool,

    /// Use single quotes for attribute values in the output.
    ///
    /// Default: false
    pub use_single_quote: bool,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            allow_huge_files: false,
            rename_nested_classes: false,
            use_single_quote: false,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) struct Limits {
    pub bytes: Option<usize>,
    pub nodes: u32,
    pub depth: u32,
}

impl Options {
    pub(crate) fn limits(&self) -> Limits {
        if self.allow_huge_files {
            Limits {
                bytes: None,
                nodes: u32::MAX,
                depth: 384,
            }
        } else {
            Limits {
                bytes: Some(10_000_000),
                nodes: 1_000_000,
                depth: 256,
            }
        }
    }
}
