use crate::allowlist::Allowlist;
use crate::error::{RankError, Result};
use crate::platform::RankPlatform;

/// Replace a member's rank role with `new_rank`.
///
/// Removes every allow-listed role the member currently holds except the
/// target, then adds the target if the member does not already hold it.
/// Holding the target already is a no-op, so the operation is idempotent.
///
/// The remove/add steps are separate upstream requests and not atomic. If
/// a step fails after one or more removals succeeded, the removed roles
/// are re-added best effort before the original error is returned; a
/// failed restore is logged and not retried.
pub async fn set_rank(
    platform: &dyn RankPlatform,
    allowlist: &Allowlist,
    member_id: &str,
    new_rank: &str,
) -> Result<()> {
    let roles = platform.fetch_roles().await?;
    let target = roles
        .iter()
        .find(|r| r.name == new_rank)
        .ok_or_else(|| RankError::RoleNotFound(new_rank.to_string()))?;

    let held = platform.member_role_ids(member_id).await?;
    let to_remove: Vec<u64> = roles
        .iter()
        .filter(|r| r.id != target.id && allowlist.contains(&r.name) && held.contains(&r.id))
        .map(|r| r.id)
        .collect();

    let mut removed: Vec<u64> = Vec::new();
    let mut failure: Option<RankError> = None;

    for role_id in to_remove {
        match platform.remove_member_role(member_id, role_id).await {
            Ok(()) => removed.push(role_id),
            Err(err) => {
                failure = Some(err);
                break;
            }
        }
    }

    if failure.is_none() && !held.contains(&target.id) {
        if let Err(err) = platform.add_member_role(member_id, target.id).await {
            failure = Some(err);
        }
    }

    match failure {
        None => Ok(()),
        Some(err) => {
            for role_id in removed {
                if let Err(restore_err) = platform.add_member_role(member_id, role_id).await {
                    tracing::warn!(
                        member_id,
                        role_id,
                        error = %restore_err,
                        "failed to restore previous rank role"
                    );
                }
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::PlatformRole;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Add(u64),
        Remove(u64),
    }

    /// Recording fake: fixed guild roles, fixed member roles, and an
    /// optional set of role ids whose `add` call fails.
    struct Recorder {
        roles: Vec<PlatformRole>,
        member_roles: Vec<u64>,
        fail_add: HashSet<u64>,
        calls: Mutex<Vec<Call>>,
    }

    impl Recorder {
        fn new(roles: Vec<PlatformRole>, member_roles: Vec<u64>) -> Self {
            Self {
                roles,
                member_roles,
                fail_add: HashSet::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing_add(mut self, role_id: u64) -> Self {
            self.fail_add.insert(role_id);
            self
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RankPlatform for Recorder {
        async fn fetch_roles(&self) -> crate::Result<Vec<PlatformRole>> {
            Ok(self.roles.clone())
        }

        async fn member_role_ids(&self, _member_id: &str) -> crate::Result<Vec<u64>> {
            Ok(self.member_roles.clone())
        }

        async fn add_member_role(&self, _member_id: &str, role_id: u64) -> crate::Result<()> {
            self.calls.lock().unwrap().push(Call::Add(role_id));
            if self.fail_add.contains(&role_id) {
                return Err(RankError::Upstream("missing permission".into()));
            }
            Ok(())
        }

        async fn remove_member_role(&self, _member_id: &str, role_id: u64) -> crate::Result<()> {
            self.calls.lock().unwrap().push(Call::Remove(role_id));
            Ok(())
        }
    }

    fn role(id: u64, name: &str) -> PlatformRole {
        PlatformRole {
            id,
            name: name.to_string(),
            color: 0,
        }
    }

    fn guild_roles() -> Vec<PlatformRole> {
        vec![
            role(10, "Placement"),
            role(11, "Bronze"),
            role(12, "Gold"),
            role(13, "Diamond"),
            role(99, "Moderator"),
        ]
    }

    #[tokio::test]
    async fn swaps_old_rank_for_new() {
        // Member holds Bronze (11) and the untracked Moderator (99).
        let platform = Recorder::new(guild_roles(), vec![11, 99]);
        set_rank(&platform, &Allowlist::default(), "42", "Gold")
            .await
            .unwrap();

        assert_eq!(platform.calls(), vec![Call::Remove(11), Call::Add(12)]);
    }

    #[tokio::test]
    async fn removes_every_held_rank_role() {
        // Pathological state: member holds two rank roles at once.
        let platform = Recorder::new(guild_roles(), vec![10, 11]);
        set_rank(&platform, &Allowlist::default(), "42", "Diamond")
            .await
            .unwrap();

        let calls = platform.calls();
        assert!(calls.contains(&Call::Remove(10)));
        assert!(calls.contains(&Call::Remove(11)));
        assert_eq!(calls.last(), Some(&Call::Add(13)));
    }

    #[tokio::test]
    async fn already_holding_target_is_a_no_op() {
        let platform = Recorder::new(guild_roles(), vec![12]);
        set_rank(&platform, &Allowlist::default(), "42", "Gold")
            .await
            .unwrap();

        assert!(platform.calls().is_empty());
    }

    #[tokio::test]
    async fn unknown_upstream_role_means_no_mutation() {
        let platform = Recorder::new(guild_roles(), vec![11]);
        let err = set_rank(&platform, &Allowlist::default(), "42", "Platinum")
            .await
            .unwrap_err();

        assert!(matches!(err, RankError::RoleNotFound(_)));
        assert!(platform.calls().is_empty());
    }

    #[tokio::test]
    async fn untracked_roles_are_never_touched() {
        let platform = Recorder::new(guild_roles(), vec![99]);
        set_rank(&platform, &Allowlist::default(), "42", "Bronze")
            .await
            .unwrap();

        assert_eq!(platform.calls(), vec![Call::Add(11)]);
    }

    #[tokio::test]
    async fn add_failure_restores_removed_roles() {
        // Adding Gold (12) fails; the removed Bronze (11) must come back.
        let platform = Recorder::new(guild_roles(), vec![11]).failing_add(12);
        let err = set_rank(&platform, &Allowlist::default(), "42", "Gold")
            .await
            .unwrap_err();

        assert!(matches!(err, RankError::Upstream(_)));
        assert_eq!(
            platform.calls(),
            vec![Call::Remove(11), Call::Add(12), Call::Add(11)]
        );
    }
}
