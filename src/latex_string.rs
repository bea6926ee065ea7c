use core::convert::Infallible;
use std::ops::Deref;
use std::str::FromStr;

use derive_more::Display;

/// Text that is safe to embed in a LaTeX document.
#[derive(Debug, Clone, Display, PartialEq, Eq)]
#[display("{}", _0)]
pub struct LatexString(String);

impl FromStr for LatexString {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(value))
    }
}

impl From<&str> for LatexString {
    fn from(value: &str) -> Self {
        LatexString(v_latexescape::escape(value).to_string())
    }
}

impl Deref for LatexString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
