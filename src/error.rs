// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// List of all errors.
///
/// None of them reach the caller of [`scope_styles`](crate::scope_styles),
/// which falls back to the original markup instead.
#[derive(Debug)]
pub enum Error {
    /// Failed to parse an XML data.
    ParsingFailed(roxmltree::Error),

    /// The input is larger than 10_000_000 bytes.
    ///
    /// Can be lifted via [`Options::allow_huge_files`](crate::Options::allow_huge_files).
    SizeLimitReached,

    /// Elements are nested deeper than allowed.
    ///
    /// 256 levels by default, 384 with
    /// [`Options::allow_huge_files`](crate::Options::allow_huge_files).
    DepthLimitReached,

    /// Serialization produced an empty string.
    EmptyOutput,
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Self {
        Error::ParsingFailed(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::ParsingFailed(ref e) => {
                write!(f, "SVG data parsing failed cause {}", e)
            }
            Error::SizeLimitReached => {
                write!(f, "the maximum input size has been reached")
            }
            Error::DepthLimitReached => {
                write!(f, "the maximum elements nesting depth has been reached")
            }
            Error::EmptyOutput => {
                write!(f, "the serialized SVG is empty")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::ParsingFailed(ref e) => Some(e),
            _ => None,
        }
    }
}
