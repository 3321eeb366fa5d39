//! Access-control companion paths
//!
//! Every ACL-bearing resource has its permissions stored at a second,
//! derived path. Deleting the resource deletes that companion on a
//! best-effort basis (see `endpoint::access`).
//!
//! ACLs attach to the organization, to each container (`nodes`, `roles`, …)
//! and to named objects directly inside a container. Anything deeper, such
//! as a data bag item or a cookbook version, shares its parent's ACL and has
//! no companion of its own.

/// Object kinds inside an organization that carry their own ACL
pub const ORG_ACL_KINDS: &[&str] = &[
    "clients",
    "containers",
    "cookbook_artifacts",
    "cookbooks",
    "data",
    "environments",
    "groups",
    "nodes",
    "policies",
    "policy_groups",
    "roles",
    "sandboxes",
];

/// Derives the companion ACL path of a resource path
pub trait AclPathDeriver: Send + Sync + std::fmt::Debug {
    /// Companion path, or `None` when the resource kind has no ACL of its own
    fn companion_path(&self, path: &[String]) -> Option<Vec<String>>;
}

/// Default layout: org ACLs under `organizations/<org>/acls` (containers
/// under `acls/containers`), user ACLs under `acls/users`
#[derive(Debug, Clone, Copy, Default)]
pub struct OrgAclPaths;

impl AclPathDeriver for OrgAclPaths {
    fn companion_path(&self, path: &[String]) -> Option<Vec<String>> {
        let segments: Vec<&str> = path.iter().map(String::as_str).collect();
        let acl = match segments.as_slice() {
            ["organizations", _, "acls", ..] => return None,
            ["organizations", org] => vec!["organizations", *org, "acls", "organization"],
            ["organizations", org, kind] if ORG_ACL_KINDS.contains(kind) => {
                vec!["organizations", *org, "acls", "containers", *kind]
            }
            ["organizations", org, kind, name] if ORG_ACL_KINDS.contains(kind) => {
                vec!["organizations", *org, "acls", *kind, *name]
            }
            ["users", name] => vec!["acls", "users", *name],
            _ => return None,
        };
        Some(acl.into_iter().map(str::to_string).collect())
    }
}

/// Deriver for deployments without ACL records
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAclPaths;

impl AclPathDeriver for NoAclPaths {
    fn companion_path(&self, _path: &[String]) -> Option<Vec<String>> {
        None
    }
}
