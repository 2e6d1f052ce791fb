//! Member records and their attribute enums
//!
//! A MemberRecord is one documented entity as emitted by the documentation
//! generator: a qualified name of the form `owner#member`, a visibility token,
//! a kind marker, an optional change date and an abstract/concrete flag.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DocsiftError, Result};

/// Visibility of a member, from the `visbl` markup token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// `pub` token: always shown
    Public,
    /// `prt` token: hidden unless "show all" is active
    Protected,
}

impl FromStr for Visibility {
    type Err = DocsiftError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pub" => Ok(Visibility::Public),
            "prt" => Ok(Visibility::Protected),
            other => Err(DocsiftError::MalformedRecord(format!(
                "unknown visibility token: {other:?}"
            ))),
        }
    }
}

/// Symbol kind of a member, from the kind marker in the markup.
///
/// The generator emits `new` for constructors; every other kind marker is the
/// lowercase variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Package,
    Type,
    Object,
    Class,
    Trait,
    Constructor,
    Def,
    Val,
    Var,
}

impl Kind {
    /// All kinds, in markup order. The default kind-inclusion set.
    pub const ALL: [Kind; 9] = [
        Kind::Package,
        Kind::Type,
        Kind::Object,
        Kind::Class,
        Kind::Trait,
        Kind::Constructor,
        Kind::Def,
        Kind::Val,
        Kind::Var,
    ];
}

impl FromStr for Kind {
    type Err = DocsiftError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "package" => Ok(Kind::Package),
            "type" => Ok(Kind::Type),
            "object" => Ok(Kind::Object),
            "class" => Ok(Kind::Class),
            "trait" => Ok(Kind::Trait),
            // constructors are marked "new" in the generated markup
            "new" | "constructor" => Ok(Kind::Constructor),
            "def" => Ok(Kind::Def),
            "val" => Ok(Kind::Val),
            "var" => Ok(Kind::Var),
            other => Err(DocsiftError::MalformedRecord(format!(
                "unknown kind marker: {other:?}"
            ))),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Kind::Package => "package",
            Kind::Type => "type",
            Kind::Object => "object",
            Kind::Class => "class",
            Kind::Trait => "trait",
            Kind::Constructor => "constructor",
            Kind::Def => "def",
            Kind::Val => "val",
            Kind::Var => "var",
        };
        f.write_str(s)
    }
}

/// One documented entity shown in a member list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberRecord {
    /// Qualified name, `owner#member` form
    pub name: String,

    /// Declaring owner, the part of `name` before `#` (empty if unqualified)
    pub owner: String,

    pub visibility: Visibility,
    pub kind: Kind,

    /// Last-change date, when the generator emits one
    pub date: Option<NaiveDate>,

    /// Abstract member (`data-isabs="true"`)
    pub is_abstract: bool,

    /// Documentation text, matched by the free-text filter together with `name`
    pub comment: String,

    /// Displayed under a declaring-ancestor heading rather than flat.
    /// Ownership filtering does not apply to inherited entries.
    pub inherited: bool,

    /// Position in the original document, tie-breaker for stable sorting
    pub doc_order: usize,

    /// Render state: whether the entry is currently shown
    pub visible: bool,
}

impl MemberRecord {
    /// Create a record from parsed markup attributes.
    ///
    /// The owner is derived from the qualified name; a name with no `#`
    /// separator has an empty owner (top-level entity).
    pub fn new(
        name: impl Into<String>,
        visibility: Visibility,
        kind: Kind,
        doc_order: usize,
    ) -> Self {
        let name = name.into();
        let owner = name
            .find('#')
            .map(|idx| name[..idx].to_string())
            .unwrap_or_default();

        Self {
            name,
            owner,
            visibility,
            kind,
            date: None,
            is_abstract: false,
            comment: String::new(),
            inherited: false,
            doc_order,
            visible: true,
        }
    }

    /// Local name, the part of the qualified name after `#`
    pub fn local_name(&self) -> &str {
        match self.name.find('#') {
            Some(idx) => &self.name[idx + 1..],
            None => &self.name,
        }
    }

    /// The text the free-text filter matches against: name plus comment
    pub fn filter_text(&self) -> String {
        format!("{}{}", self.name, self.comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_from_markup_tokens() {
        assert_eq!("pub".parse::<Visibility>().unwrap(), Visibility::Public);
        assert_eq!("prt".parse::<Visibility>().unwrap(), Visibility::Protected);
    }

    #[test]
    fn test_visibility_rejects_unknown_token() {
        let err = "private".parse::<Visibility>().unwrap_err();
        assert!(matches!(err, DocsiftError::MalformedRecord(_)));
    }

    #[test]
    fn test_kind_from_markup_tokens() {
        assert_eq!("class".parse::<Kind>().unwrap(), Kind::Class);
        assert_eq!("def".parse::<Kind>().unwrap(), Kind::Def);
        // the generator marks constructors as "new"
        assert_eq!("new".parse::<Kind>().unwrap(), Kind::Constructor);
    }

    #[test]
    fn test_kind_rejects_unknown_marker() {
        assert!("lazyval".parse::<Kind>().is_err());
    }

    #[test]
    fn test_kind_display_roundtrip() {
        for kind in Kind::ALL {
            if kind == Kind::Constructor {
                continue; // parses from "new", displays as "constructor"
            }
            assert_eq!(kind.to_string().parse::<Kind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_record_derives_owner_from_qualified_name() {
        let record = MemberRecord::new("scala.BitSet#contains", Visibility::Public, Kind::Def, 0);
        assert_eq!(record.owner, "scala.BitSet");
        assert_eq!(record.local_name(), "contains");
    }

    #[test]
    fn test_record_without_separator_has_empty_owner() {
        let record = MemberRecord::new("scala", Visibility::Public, Kind::Package, 0);
        assert_eq!(record.owner, "");
        assert_eq!(record.local_name(), "scala");
    }

    #[test]
    fn test_filter_text_concatenates_name_and_comment() {
        let mut record = MemberRecord::new("scala.BitSet#apply", Visibility::Public, Kind::Def, 0);
        record.comment = "Tests whether a bit is set.".to_string();
        assert_eq!(record.filter_text(), "scala.BitSet#applyTests whether a bit is set.");
    }

    #[test]
    fn test_record_serialization_roundtrip() {
        let mut record = MemberRecord::new("scala.BitSet#size", Visibility::Protected, Kind::Val, 3);
        record.date = NaiveDate::from_ymd_opt(2021, 1, 1);
        let json = serde_json::to_string(&record).unwrap();
        let restored: MemberRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.name, record.name);
        assert_eq!(restored.visibility, Visibility::Protected);
        assert_eq!(restored.date, record.date);
    }
}
