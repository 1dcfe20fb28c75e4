use derive_more::Display;
use std::str::FromStr;
use thiserror::Error as ThisError;

///
/// TypeCheck
///
/// Decides whether the argument of `Object::equals_object` is eligible for
/// field comparison at all.
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq)]
#[remain::sorted]
pub enum TypeCheck {
    /// The argument's runtime type must equal the woven type itself.
    #[display("exactly_of_type")]
    ExactlyOfType,

    /// The argument's runtime type must equal the runtime type of `self`.
    #[default]
    #[display("exactly_the_same_type_as_this")]
    ExactlyTheSameTypeAsThis,

    /// The argument must be the woven type or embed it through its base chain.
    #[display("same_type_or_subtype")]
    SameTypeOrSubtype,
}

impl TypeCheck {
    pub const ALL: [Self; 3] = [
        Self::ExactlyTheSameTypeAsThis,
        Self::ExactlyOfType,
        Self::SameTypeOrSubtype,
    ];

    #[must_use]
    pub const fn pascal_name(self) -> &'static str {
        match self {
            Self::ExactlyOfType => "ExactlyOfType",
            Self::ExactlyTheSameTypeAsThis => "ExactlyTheSameTypeAsThis",
            Self::SameTypeOrSubtype => "SameTypeOrSubtype",
        }
    }
}

///
/// ParseTypeCheckError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
#[error("unknown type check policy '{0}'")]
pub struct ParseTypeCheckError(pub String);

impl FromStr for TypeCheck {
    type Err = ParseTypeCheckError;

    // accepts both the snake_case and PascalCase spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        Self::ALL
            .into_iter()
            .find(|policy| policy.to_string() == s || policy.pascal_name() == s)
            .ok_or_else(|| ParseTypeCheckError(s.to_string()))
    }
}

///
/// TESTS
///
