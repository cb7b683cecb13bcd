//! Prefix-to-route-group dispatch table.
//!
//! The table is generic over the group type so the HTTP layer can store
//! its own router objects while the collision rules live here:
//!
//! - a prefix is `/seg[/seg...]`: leading slash, no trailing slash, no empty
//!   segments, no path parameters or wildcards, never the bare root;
//! - two groups may not share a prefix;
//! - one prefix may not be a segment-wise ancestor of another
//!   (`/api` vs `/api/v1`), while `/api/v1` and `/api/v10` are independent.

use callagent_types::error::MountError;

/// One route group bound to a prefix.
#[derive(Debug, Clone)]
pub struct Mount<G> {
    pub prefix: String,
    pub name: String,
    pub group: G,
}

/// Ordered set of mounts with unique, non-overlapping prefixes.
#[derive(Debug, Clone)]
pub struct MountTable<G> {
    mounts: Vec<Mount<G>>,
}

impl<G> Default for MountTable<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> MountTable<G> {
    pub fn new() -> Self {
        Self { mounts: Vec::new() }
    }

    /// Bind `group` under `prefix`.
    ///
    /// The prefix is normalized first; the stored mount carries the
    /// normalized form. On error the table is unchanged.
    pub fn mount(&mut self, prefix: &str, name: &str, group: G) -> Result<&Mount<G>, MountError> {
        let prefix = normalize_prefix(prefix)?;

        for existing in &self.mounts {
            if existing.prefix == prefix {
                return Err(MountError::DuplicatePrefix {
                    prefix,
                    existing_group: existing.name.clone(),
                });
            }
            if is_segment_ancestor(&existing.prefix, &prefix)
                || is_segment_ancestor(&prefix, &existing.prefix)
            {
                return Err(MountError::OverlappingPrefix {
                    prefix,
                    existing: existing.prefix.clone(),
                    existing_group: existing.name.clone(),
                });
            }
        }

        self.mounts.push(Mount {
            prefix,
            name: name.to_string(),
            group,
        });
        Ok(&self.mounts[self.mounts.len() - 1])
    }

    /// Mounts in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &Mount<G>> {
        self.mounts.iter()
    }

    pub fn prefixes(&self) -> Vec<&str> {
        self.mounts.iter().map(|m| m.prefix.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.mounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounts.is_empty()
    }

    pub fn into_mounts(self) -> Vec<Mount<G>> {
        self.mounts
    }
}

/// Validate and canonicalize a mount prefix.
///
/// Accepts `api/v1/` style input and returns `/api/v1`.
pub fn normalize_prefix(raw: &str) -> Result<String, MountError> {
    let invalid = |reason: &str| MountError::InvalidPrefix {
        prefix: raw.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = raw.trim();
    if !trimmed.starts_with('/') {
        return Err(invalid("must start with '/'"));
    }

    let body = trimmed.trim_end_matches('/');
    if body.is_empty() {
        return Err(invalid("cannot mount at the root path"));
    }

    // Skip the leading empty segment produced by the leading slash.
    for segment in body.split('/').skip(1) {
        if segment.is_empty() {
            return Err(invalid("contains an empty path segment"));
        }
        if segment.contains(['{', '}', '*', ':']) {
            return Err(invalid("path parameters and wildcards are not allowed"));
        }
        if segment.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(invalid("contains whitespace"));
        }
    }

    Ok(body.to_string())
}

/// `true` when `ancestor` is a proper path-segment prefix of `path`.
fn is_segment_ancestor(ancestor: &str, path: &str) -> bool {
    path.len() > ancestor.len()
        && path.starts_with(ancestor)
        && path.as_bytes()[ancestor.len()] == b'/'
}
