//! Domain and badge registry.
//!
//! Holds the known domains and badges plus, per user, the domains they have
//! declared expertise in and the badges they have earned. Every list keeps
//! insertion order so listings are reproducible.
//!
//! Removing a name is idempotent: an unknown name is simply a no-op.

use std::collections::HashMap;

use crate::ids::UserId;

#[derive(Debug, Clone, Default)]
struct Membership {
    declared: Vec<String>,
    earned: Vec<String>,
}

/// Known domains, badges and who holds them.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    domains: Vec<String>,
    badges: Vec<String>,
    members: HashMap<UserId, Membership>,
    member_order: Vec<UserId>,
}

/// Insert `name` if absent. Returns whether it was added.
fn insert_unique(list: &mut Vec<String>, name: &str) -> bool {
    if list.iter().any(|existing| existing == name) {
        return false;
    }
    list.push(name.to_string());
    true
}

/// Remove `name` if present. Returns whether it was removed.
fn remove_name(list: &mut Vec<String>, name: &str) -> bool {
    let before = list.len();
    list.retain(|existing| existing != name);
    list.len() != before
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a domain. Returns whether it was new.
    pub fn ensure_domain(&mut self, name: &str) -> bool {
        let added = insert_unique(&mut self.domains, name);
        if added {
            tracing::info!(domain = %name, "Domain registered");
        }
        added
    }

    /// Register a badge. Returns whether it was new.
    pub fn ensure_badge(&mut self, name: &str) -> bool {
        let added = insert_unique(&mut self.badges, name);
        if added {
            tracing::info!(badge = %name, "Badge registered");
        }
        added
    }

    /// Whether `name` is a known domain.
    #[must_use]
    pub fn has_domain(&self, name: &str) -> bool {
        self.domains.iter().any(|d| d == name)
    }

    /// Remove a domain and strip it from every user's declared expertise.
    ///
    /// Returns whether the domain existed.
    pub fn remove_domain(&mut self, name: &str) -> bool {
        let existed = remove_name(&mut self.domains, name);
        for membership in self.members.values_mut() {
            remove_name(&mut membership.declared, name);
        }
        if existed {
            tracing::info!(domain = %name, "Domain removed");
        }
        existed
    }

    /// Remove a badge and strip it from every holder.
    ///
    /// Points already paid out are not affected. Returns whether the badge
    /// existed.
    pub fn remove_badge(&mut self, name: &str) -> bool {
        let existed = remove_name(&mut self.badges, name);
        for membership in self.members.values_mut() {
            remove_name(&mut membership.earned, name);
        }
        if existed {
            tracing::info!(badge = %name, "Badge removed");
        }
        existed
    }

    /// Add `domain` to the user's declared expertise, registering the domain.
    ///
    /// Returns whether the declaration was new.
    pub fn declare_expertise(&mut self, user: &UserId, domain: &str) -> bool {
        self.ensure_domain(domain);
        insert_unique(&mut self.membership(user).declared, domain)
    }

    /// Give `badge` to the user, registering the badge.
    ///
    /// A (user, badge) pair is granted at most once. Returns whether the
    /// badge was newly granted.
    pub fn grant_badge(&mut self, user: &UserId, badge: &str) -> bool {
        self.ensure_badge(badge);
        let granted = insert_unique(&mut self.membership(user).earned, badge);
        if granted {
            tracing::info!(user_id = %user, badge = %badge, "Badge granted");
        }
        granted
    }

    /// All known domains in registration order.
    #[must_use]
    pub fn list_domains(&self) -> &[String] {
        &self.domains
    }

    /// All known badges in registration order.
    #[must_use]
    pub fn list_badges(&self) -> &[String] {
        &self.badges
    }

    /// Domains the user has declared.
    #[must_use]
    pub fn domains_of(&self, user: &UserId) -> &[String] {
        self.members.get(user).map_or(&[][..], |m| m.declared.as_slice())
    }

    /// Badges the user has earned, in grant order.
    #[must_use]
    pub fn badges_of(&self, user: &UserId) -> &[String] {
        self.members.get(user).map_or(&[][..], |m| m.earned.as_slice())
    }

    /// Users whose earned badges include `badge`.
    #[must_use]
    pub fn users_with_badge(&self, badge: &str) -> Vec<UserId> {
        self.members_where(|m| m.earned.iter().any(|b| b == badge))
    }

    /// Users who declared expertise in `domain`.
    #[must_use]
    pub fn users_declaring(&self, domain: &str) -> Vec<UserId> {
        self.members_where(|m| m.declared.iter().any(|d| d == domain))
    }

    fn members_where(&self, predicate: impl Fn(&Membership) -> bool) -> Vec<UserId> {
        self.member_order
            .iter()
            .filter(|user| self.members.get(*user).is_some_and(&predicate))
            .cloned()
            .collect()
    }

    fn membership(&mut self, user: &UserId) -> &mut Membership {
        if !self.members.contains_key(user) {
            self.member_order.push(user.clone());
        }
        self.members.entry(user.clone()).or_default()
    }
}
