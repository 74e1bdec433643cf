//! Expert matching.

use crate::ids::UserId;
use crate::registry::Registry;

/// Users qualified to answer questions in `domain`: those who declared
/// expertise in it, followed by those holding the badge of the same name.
///
/// Each user appears once. `exclude` drops one user (the asker) from the
/// result.
#[must_use]
pub fn find_experts(registry: &Registry, domain: &str, exclude: Option<&UserId>) -> Vec<UserId> {
    let mut experts = registry.users_declaring(domain);
    for holder in registry.users_with_badge(domain) {
        if !experts.contains(&holder) {
            experts.push(holder);
        }
    }
    if let Some(excluded) = exclude {
        experts.retain(|user| user != excluded);
    }
    experts
}
