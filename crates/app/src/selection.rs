//! Which entities get a monitor.
//!
//! The selection is an explicit list of ids plus whole domains whose
//! members are discovered on the hub at startup. Each id ends up monitored
//! at most once.

use std::collections::HashSet;

use hometray_domain::id::EntityId;

/// Entities requested by configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntitySelection {
    /// Ids monitored unconditionally.
    pub entity_ids: Vec<EntityId>,
    /// Domains whose every entity is monitored (e.g. `switch`).
    pub domains: Vec<String>,
    /// Ids to leave out of domain discovery.
    pub domain_entities_ignore: Vec<EntityId>,
}

impl EntitySelection {
    /// Whether nothing at all was requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entity_ids.is_empty() && self.domains.is_empty()
    }

    /// Combine the explicit ids with the entities discovered under the
    /// configured domains.
    ///
    /// Explicit ids come first, in configuration order. Discovered ids follow,
    /// minus the ignore list and minus anything already selected.
    #[must_use]
    pub fn merge(&self, discovered: impl IntoIterator<Item = EntityId>) -> Vec<EntityId> {
        let ignored: HashSet<&EntityId> = self.domain_entities_ignore.iter().collect();
        let mut seen = HashSet::new();
        let mut resolved = Vec::new();

        for id in &self.entity_ids {
            if seen.insert(id.clone()) {
                resolved.push(id.clone());
            }
        }

        for id in discovered {
            if ignored.contains(&id) {
                tracing::debug!(entity_id = %id, "ignoring discovered entity");
                continue;
            }
            if seen.insert(id.clone()) {
                resolved.push(id);
            }
        }

        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> EntityId {
        EntityId::parse(raw).unwrap()
    }

    #[test]
    fn should_merge_explicit_and_discovered_without_duplicates() {
        let selection = EntitySelection {
            entity_ids: vec![id("home.a"), id("home.b")],
            domains: vec!["home".to_string()],
            domain_entities_ignore: vec![id("home.c")],
        };

        let resolved = selection.merge([id("home.a"), id("home.c")]);
        assert_eq!(resolved, vec![id("home.a"), id("home.b")]);
    }

    #[test]
    fn should_keep_explicit_order_before_discovered() {
        let selection = EntitySelection {
            entity_ids: vec![id("switch.z")],
            domains: vec!["light".to_string()],
            domain_entities_ignore: Vec::new(),
        };

        let resolved = selection.merge([id("light.a"), id("light.b")]);
        assert_eq!(resolved, vec![id("switch.z"), id("light.a"), id("light.b")]);
    }

    #[test]
    fn should_drop_duplicates_within_explicit_list() {
        let selection = EntitySelection {
            entity_ids: vec![id("light.a"), id("light.a")],
            ..EntitySelection::default()
        };

        assert_eq!(selection.merge([]), vec![id("light.a")]);
    }

    #[test]
    fn should_not_apply_ignore_list_to_explicit_ids() {
        let selection = EntitySelection {
            entity_ids: vec![id("light.a")],
            domains: Vec::new(),
            domain_entities_ignore: vec![id("light.a")],
        };

        assert_eq!(selection.merge([]), vec![id("light.a")]);
    }

    #[test]
    fn should_report_empty_when_nothing_requested() {
        assert!(EntitySelection::default().is_empty());
        let selection = EntitySelection {
            domains: vec!["light".to_string()],
            ..EntitySelection::default()
        };
        assert!(!selection.is_empty());
    }
}
