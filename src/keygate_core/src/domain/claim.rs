use std::fmt;

/// The claim types the core derives and persists on an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimKind {
    DisplayName,
    DisplayRole,
    Picture,
}

impl ClaimKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimKind::DisplayName => "DisplayName",
            ClaimKind::DisplayRole => "DisplayRole",
            ClaimKind::Picture => "Picture",
        }
    }
}

impl fmt::Display for ClaimKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A (type, value) display attribute attached to an identity.
///
/// The store may physically accumulate duplicates, so writers must check
/// existence before inserting to keep one canonical value per kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedClaim {
    pub kind: ClaimKind,
    pub value: String,
}

impl DerivedClaim {
    pub fn new(kind: ClaimKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}
