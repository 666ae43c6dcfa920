//! Declaration modifiers shared by the input model and the generated code model.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Modifier flags on types, methods, fields and parameters.
    ///
    /// Rendered in canonical Java order by [`Modifiers::keywords`].
    ///
    /// ```
    /// use snapin_core::Modifiers;
    ///
    /// let template_op = Modifiers::PROTECTED | Modifiers::ABSTRACT;
    /// assert!(template_op.is_template_operation());
    /// assert_eq!(template_op.keywords(), vec!["protected", "abstract"]);
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Modifiers: u16 {
        const PUBLIC = 1 << 0;
        const PROTECTED = 1 << 1;
        const PRIVATE = 1 << 2;
        const ABSTRACT = 1 << 3;
        const STATIC = 1 << 4;
        const FINAL = 1 << 5;
        const SYNCHRONIZED = 1 << 6;
    }
}

impl Modifiers {
    /// Keyword order used when rendering.
    const ORDER: [(Modifiers, &'static str); 7] = [
        (Modifiers::PUBLIC, "public"),
        (Modifiers::PROTECTED, "protected"),
        (Modifiers::PRIVATE, "private"),
        (Modifiers::ABSTRACT, "abstract"),
        (Modifiers::STATIC, "static"),
        (Modifiers::FINAL, "final"),
        (Modifiers::SYNCHRONIZED, "synchronized"),
    ];

    /// Keywords for the set flags, in declaration order.
    pub fn keywords(self) -> Vec<&'static str> {
        Self::ORDER
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, kw)| *kw)
            .collect()
    }

    /// `protected abstract`: the shape of an unfinished template operation.
    pub fn is_template_operation(self) -> bool {
        self.contains(Modifiers::PROTECTED | Modifiers::ABSTRACT)
    }

    /// Neither public, protected nor private.
    pub fn is_package_private(self) -> bool {
        !self.intersects(Modifiers::PUBLIC | Modifiers::PROTECTED | Modifiers::PRIVATE)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keywords().join(" "))
    }
}
