//! Member validation.
//!
//! Validation is the first of two passes over an archive: every member is
//! checked before anything is written. The second pass (extraction) only
//! accepts a [`ValidatedMembers`] list, which can only be produced here.

use tracing::debug;
use tracing::warn;

use crate::Result;
use crate::RetrieveError;
use crate::SecurityRule;
use crate::security::path::validate_path;
use crate::types::ArchiveMember;
use crate::types::ContainedPath;
use crate::types::MemberKind;
use crate::types::TargetDir;

/// One member that passed every check, with its resolved destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMember {
    /// The member as listed.
    pub member: ArchiveMember,

    /// Destination relative to the target directory.
    pub path: ContainedPath,
}

/// The full member list of one archive, every entry validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMembers(Vec<ValidatedMember>);

impl ValidatedMembers {
    /// Returns the validated members in archive order.
    #[must_use]
    pub fn as_slice(&self) -> &[ValidatedMember] {
        &self.0
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the archive has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the validated members.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidatedMember> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a ValidatedMembers {
    type Item = &'a ValidatedMember;
    type IntoIter = std::slice::Iter<'a, ValidatedMember>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Checks archive members against the type and containment policy.
///
/// For each member, in listed order:
/// 1. Type check: only regular files and directories are accepted
/// 2. Absolute-path check
/// 3. Containment check against the canonical target directory
///
/// The first violation aborts validation of the whole archive.
///
/// # Examples
///
/// ```no_run
/// use irifetch_core::security::MemberValidator;
/// use irifetch_core::types::{ArchiveMember, MemberKind, TargetDir};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let target = TargetDir::open("/tmp/iri-data")?;
/// let members = vec![
///     ArchiveMember::new("irisub.for", MemberKind::Regular, 1024),
///     ArchiveMember::new("link", MemberKind::Symlink, 0),
/// ];
///
/// let result = MemberValidator::new(&target).validate(&members);
/// assert!(result.is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MemberValidator<'a> {
    target: &'a TargetDir,
}

impl<'a> MemberValidator<'a> {
    /// Creates a validator for the given target directory.
    #[must_use]
    pub fn new(target: &'a TargetDir) -> Self {
        Self { target }
    }

    /// Validates every member, failing on the first violation.
    ///
    /// # Errors
    ///
    /// Returns `RetrieveError::PathSecurity` naming the first offending
    /// member and the rule it broke.
    pub fn validate(&self, members: &[ArchiveMember]) -> Result<ValidatedMembers> {
        let validated = members
            .iter()
            .map(|member| self.validate_member(member))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            members = validated.len(),
            target = %self.target.as_path().display(),
            "all archive members passed validation"
        );
        Ok(ValidatedMembers(validated))
    }

    /// Validates a single member.
    ///
    /// # Errors
    ///
    /// Returns `RetrieveError::PathSecurity` if the member breaks a rule.
    pub fn validate_member(&self, member: &ArchiveMember) -> Result<ValidatedMember> {
        self.check(member).inspect_err(|err| {
            if let Some(rule) = err.rule() {
                warn!(member = %member.name.display(), %rule, "rejected archive member");
            }
        })
    }

    fn check(&self, member: &ArchiveMember) -> Result<ValidatedMember> {
        if !member.kind.is_extractable() {
            return Err(RetrieveError::path_security(
                &member.name,
                SecurityRule::ForbiddenKind(member.kind),
            ));
        }

        if member.name.has_root() || member.name.is_absolute() {
            return Err(RetrieveError::path_security(
                &member.name,
                SecurityRule::AbsolutePath,
            ));
        }

        let path = validate_path(&member.name, self.target)?;

        // Only a directory entry may name the root itself; it creates nothing.
        if path.is_root() && member.kind != MemberKind::Directory {
            return Err(RetrieveError::path_security(
                &member.name,
                SecurityRule::Degenerate,
            ));
        }

        debug!(member = %member.name.display(), kind = %member.kind, "archive member accepted");
        Ok(ValidatedMember {
            member: member.clone(),
            path,
        })
    }
}
