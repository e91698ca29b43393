//!
//! # Layout21 Error-Helper Utilities
//!
//! ```rust
//! use layout21utils::error::{ErrorHelper, Unwrapper};
//!
//! /// Example implementer of [`ErrorHelper`], reporting the line it was working on.
//! struct LineReader {
//!     line: usize,
//! }
//! impl ErrorHelper for LineReader {
//!     type Error = String;
//!
//!     fn err(&self, msg: impl Into<String>) -> Self::Error {
//!         format!("line {}: {}", self.line, msg.into())
//!     }
//! }
//! impl LineReader {
//!     fn read_layer(&self, txt: &str) -> Result<i16, String> {
//!         txt.parse::<i16>().unwrapper(self, "invalid layer number")
//!     }
//! }
//! let r = LineReader { line: 3 };
//! assert_eq!(r.read_layer("12"), Ok(12));
//! assert_eq!(r.read_layer("x").unwrap_err(), "line 3: invalid layer number");
//! ```
//!

///
/// # ErrorHelper
///
/// Helper trait for re-use among readers and tree-walkers.
/// Each implementer will generally have some internal state to report upon failure,
/// e.g. a line number or the name of the cell being processed,
/// which it can inject in the implementation-required `err` method.
/// The `fail` method, provided by default, simply returns the `err` value.
///
pub trait ErrorHelper {
    type Error;

    /// Create and return a [Self::Error] value.
    fn err(&self, msg: impl Into<String>) -> Self::Error;
    /// Return failure
    fn fail<T>(&self, msg: impl Into<String>) -> Result<T, Self::Error> {
        Err(self.err(msg))
    }
    /// Unwrap the [Option] `opt` if it is [Some], and return our error if not.
    fn unwrap<T>(&self, opt: Option<T>, msg: impl Into<String>) -> Result<T, Self::Error> {
        match opt {
            Some(val) => Ok(val),
            None => self.fail(msg),
        }
    }
    /// Assert a boolean condition. Returns through `self.fail` if it is not satisfied.
    fn assert(&self, b: bool, msg: impl Into<String>) -> Result<(), Self::Error> {
        match b {
            true => Ok(()),
            false => self.fail(msg),
        }
    }
}

///
/// # Unwrapper
///
/// Post-fix application of [`ErrorHelper`] handling to [`Option`]s and [`Result`]s.
///
/// ```rust
/// use layout21utils::error::{ErrorHelper, Unwrapper};
///
/// fn second_field(h: &impl ErrorHelper<Error = String>, line: &str) -> Result<String, String> {
///     let field = line.split_whitespace().nth(1).unwrapper(h, "missing field")?;
///     Ok(field.to_string())
/// }
/// ```
///
/// The trait is not meant to be implemented for new types;
/// import it and use it on the standard library [`Option`] and [`Result`].
///
pub trait Unwrapper {
    type Ok;
    fn unwrapper<H>(self, helper: &H, msg: impl Into<String>) -> Result<Self::Ok, H::Error>
    where
        H: ErrorHelper;
}

/// # Unwrapper for [`Option`]
///
/// Like [`Option::unwrap`], but routes `None` to the paired [`ErrorHelper`] rather than panicking.
///
impl<T> Unwrapper for Option<T> {
    type Ok = T;
    fn unwrapper<H>(self, helper: &H, msg: impl Into<String>) -> Result<Self::Ok, H::Error>
    where
        H: ErrorHelper,
    {
        match self {
            Some(t) => Ok(t),
            None => helper.fail(msg),
        }
    }
}

/// # Unwrapper for [`Result`]
///
/// Like [`Result::unwrap`], but routes `Err` to the paired [`ErrorHelper`] rather than panicking.
/// The original error value is dropped in favor of the helper's message.
///
impl<T, E> Unwrapper for Result<T, E> {
    type Ok = T;
    fn unwrapper<H>(
        self,
        helper: &H,
        msg: impl Into<String>,
    ) -> Result<<Self as Unwrapper>::Ok, H::Error>
    where
        H: ErrorHelper,
    {
        match self {
            Ok(t) => Ok(t),
            Err(_) => helper.fail(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ctx(&'static str);
    impl ErrorHelper for Ctx {
        type Error = String;
        fn err(&self, msg: impl Into<String>) -> String {
            format!("{}: {}", self.0, msg.into())
        }
    }

    #[test]
    fn helper_messages() {
        let ctx = Ctx("cell inv");
        assert_eq!(ctx.assert(true, "never"), Ok(()));
        assert_eq!(ctx.assert(false, "bad"), Err("cell inv: bad".to_string()));
        assert_eq!(ctx.unwrap(Some(1), "none"), Ok(1));
        let r: Result<u8, String> = "300".parse::<u8>().unwrapper(&ctx, "overflow");
        assert_eq!(r, Err("cell inv: overflow".to_string()));
    }
}
