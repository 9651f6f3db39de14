//! Errors raised by the checked entry points.

use alloc::vec::Vec;
use core::fmt;

use thiserror::Error;

use crate::term::TermType;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Some rule targets a type that cannot occur anywhere below `root`.
    ///
    /// Raised before any rule runs. `missing` lists the unreachable targets in
    /// chain order, without duplicates.
    #[error("no path from `{root}` to rule target(s) {}", TypeNames(.missing))]
    TypeMismatch {
        root: TermType,
        missing: Vec<TermType>,
    },

    /// `ty` is reachable but its constructors cannot be enumerated.
    ///
    /// This points at a `Term` implementation that leaves `shape` at its
    /// default; derived implementations never produce it.
    #[error("cannot enumerate the constructors of `{ty}`")]
    ConstructionFailure { ty: TermType },
}

struct TypeNames<'a>(&'a [TermType]);

impl fmt::Display for TypeNames<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ty) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "`{ty}`")?;
        }
        Ok(())
    }
}
