// Copyright 2026 Oxide Computer Company

//! Git link references and access points.

use crate::ReferenceParseError;
use std::{fmt, str::FromStr};

/// Separates the head of a git link from its object expression.
pub const OBJECT_DELIMITER: &str = "::";

const LOCALHOST: &str = "localhost";

/// Where the version-control program runs for a given link.
///
/// # Examples
///
/// ```
/// use git_link::AccessPoint;
///
/// assert_eq!("localhost".parse::<AccessPoint>().unwrap(), AccessPoint::Local);
/// assert_eq!(
///     "build-01".parse::<AccessPoint>().unwrap(),
///     AccessPoint::Remote("build-01".to_owned()),
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum AccessPoint {
    /// Run the program directly on this machine (`localhost`).
    #[default]
    Local,
    /// Run the program on the named host via a remote shell.
    Remote(String),
}

impl AccessPoint {
    /// Returns true for [`AccessPoint::Local`].
    pub fn is_local(&self) -> bool {
        matches!(self, AccessPoint::Local)
    }

    /// Returns the textual form: `localhost` or the host identifier.
    pub fn as_str(&self) -> &str {
        match self {
            AccessPoint::Local => LOCALHOST,
            AccessPoint::Remote(host) => host,
        }
    }
}

impl fmt::Display for AccessPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses `localhost` as [`AccessPoint::Local`] and anything else as a
/// remote host.
///
/// A host starting with `-` is rejected, since the remote shell would read
/// it as an option.
impl FromStr for AccessPoint {
    type Err = ReferenceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == LOCALHOST {
            return Ok(AccessPoint::Local);
        }
        check_host(s)?;
        Ok(AccessPoint::Remote(s.to_owned()))
    }
}

fn check_host(host: &str) -> Result<(), ReferenceParseError> {
    if host.starts_with('-') {
        return Err(ReferenceParseError::OptionLikeHost {
            host: host.to_owned(),
        });
    }
    Ok(())
}

/// A parsed git link: `[access-point:]location[::object]`.
///
/// The meaning of `location` depends on how the link is used. In the bare
/// form it names a repository metadata directory (e.g. `/src/repo/.git`);
/// in the file form it names a file inside a working tree, and the
/// metadata directory is found by walking up from it.
///
/// Construct via [`FromStr`] (parsing) or [`Reference::new`]. A reference
/// is immutable once built.
///
/// # Invariants
///
/// - Neither `location` nor `object` contains `::`.
/// - A remote host never starts with `-`.
///
/// # Examples
///
/// ```
/// use git_link::{AccessPoint, Reference};
///
/// let link: Reference = "build-01:/srv/repo.git::v1.2:Cargo.toml"
///     .parse()
///     .unwrap();
/// assert_eq!(link.access_point(), &AccessPoint::Remote("build-01".into()));
/// assert_eq!(link.location(), "/srv/repo.git");
/// assert_eq!(link.object(), "v1.2:Cargo.toml");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Reference {
    access_point: AccessPoint,
    location: String,
    object: String,
}

impl Reference {
    /// Creates a new reference from its parts.
    ///
    /// Returns an error if the remote host starts with `-`, or if the parts
    /// could not be recovered from the textual form: a remote host
    /// containing `:`, a location or object containing `::`, or a location
    /// ending in `:` followed by an object.
    pub fn new(
        access_point: AccessPoint,
        location: impl Into<String>,
        object: impl Into<String>,
    ) -> Result<Self, ReferenceParseError> {
        let location = location.into();
        let object = object.into();
        if let AccessPoint::Remote(host) = &access_point {
            check_host(host)?;
            if host.contains(':') {
                return Err(ReferenceParseError::DelimiterInField {
                    field: "access point",
                    value: host.clone(),
                    delimiter: ":",
                });
            }
        }
        if location.contains(OBJECT_DELIMITER)
            || (!object.is_empty() && location.ends_with(':'))
        {
            return Err(ReferenceParseError::DelimiterInField {
                field: "location",
                value: location,
                delimiter: OBJECT_DELIMITER,
            });
        }
        if object.contains(OBJECT_DELIMITER) {
            return Err(ReferenceParseError::DelimiterInField {
                field: "object",
                value: object,
                delimiter: OBJECT_DELIMITER,
            });
        }
        Ok(Reference { access_point, location, object })
    }

    /// Returns the access point.
    pub fn access_point(&self) -> &AccessPoint {
        &self.access_point
    }

    /// Returns the location, interpreted relative to the access point.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns the object expression, or `""` if the link had none.
    pub fn object(&self) -> &str {
        &self.object
    }
}

/// Emits the canonical form: the access point is always explicit, and the
/// `::object` suffix is present only for a non-empty object expression.
impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.access_point, self.location)?;
        if !self.object.is_empty() {
            write!(f, "{OBJECT_DELIMITER}{}", self.object)?;
        }
        Ok(())
    }
}

impl FromStr for Reference {
    type Err = ReferenceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let count = s.matches(OBJECT_DELIMITER).count();
        if count > 1 {
            return Err(ReferenceParseError::AmbiguousDelimiter {
                input: s.to_owned(),
                count,
            });
        }

        let (head, object) =
            s.split_once(OBJECT_DELIMITER).unwrap_or((s, ""));
        let (access_point, location) = match head.split_once(':') {
            Some((access_point, location)) => {
                let access_point = access_point.parse::<AccessPoint>()?;
                (access_point, location)
            }
            None => (AccessPoint::Local, head),
        };

        Ok(Reference {
            access_point,
            location: location.to_owned(),
            object: object.to_owned(),
        })
    }
}
