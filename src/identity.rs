use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use tokio::task;

use crate::error::ListError;
use crate::models::FsEntry;

pub const PASSWD_PATH: &str = "/etc/passwd";
pub const GROUP_PATH: &str = "/etc/group";

/// Names for every owner and group id in one listing, resolved once up front.
#[derive(Clone, Debug, Default)]
pub struct IdentityDb {
    users: HashMap<u32, String>,
    groups: HashMap<u32, String>,
}

impl IdentityDb {
    /// Resolves the ids used by `entries` through the system user and group
    /// databases. Both database files must exist.
    pub async fn load(passwd: &Path, group: &Path, entries: &[FsEntry]) -> anyhow::Result<Self> {
        tokio::try_join!(require_db(passwd), require_db(group))?;

        let uids: BTreeSet<u32> = entries.iter().map(|entry| entry.uid).collect();
        let gids: BTreeSet<u32> = entries.iter().map(|entry| entry.gid).collect();
        let db = task::spawn_blocking(move || Self::resolve(&uids, &gids)).await?;
        tracing::debug!(
            users = db.users.len(),
            groups = db.groups.len(),
            "resolved identities"
        );
        Ok(db)
    }

    #[cfg(unix)]
    fn resolve(uids: &BTreeSet<u32>, gids: &BTreeSet<u32>) -> Self {
        let users = uids
            .iter()
            .filter_map(|&uid| {
                uzers::get_user_by_uid(uid).map(|u| (uid, u.name().to_string_lossy().into_owned()))
            })
            .collect();
        let groups = gids
            .iter()
            .filter_map(|&gid| {
                uzers::get_group_by_gid(gid)
                    .map(|g| (gid, g.name().to_string_lossy().into_owned()))
            })
            .collect();
        Self { users, groups }
    }

    #[cfg(not(unix))]
    fn resolve(_uids: &BTreeSet<u32>, _gids: &BTreeSet<u32>) -> Self {
        Self::default()
    }

    pub fn from_names<U, G, S>(users: U, groups: G) -> Self
    where
        U: IntoIterator<Item = (u32, S)>,
        G: IntoIterator<Item = (u32, S)>,
        S: Into<String>,
    {
        Self {
            users: users.into_iter().map(|(id, name)| (id, name.into())).collect(),
            groups: groups.into_iter().map(|(id, name)| (id, name.into())).collect(),
        }
    }

    pub fn user_name(&self, uid: u32) -> Option<&str> {
        self.users.get(&uid).map(String::as_str)
    }

    pub fn group_name(&self, gid: u32) -> Option<&str> {
        self.groups.get(&gid).map(String::as_str)
    }

    /// Owner name for display, falling back to the decimal id.
    pub fn owner(&self, uid: u32) -> String {
        self.user_name(uid)
            .map(str::to_owned)
            .unwrap_or_else(|| uid.to_string())
    }

    pub fn group(&self, gid: u32) -> String {
        self.group_name(gid)
            .map(str::to_owned)
            .unwrap_or_else(|| gid.to_string())
    }
}

async fn require_db(path: &Path) -> Result<(), ListError> {
    tokio::fs::metadata(path)
        .await
        .map(|_| ())
        .map_err(|source| ListError::IdentityDatabase {
            path: PathBuf::from(path),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::entry;
    use crate::models::EntryKind;

    const UNKNOWN_ID: u32 = 4_000_000_007;

    fn db_files() -> (tempfile::TempDir, PathBuf, PathBuf) {
        let temp = tempfile::TempDir::new().unwrap();
        let passwd = temp.path().join("passwd");
        let group = temp.path().join("group");
        std::fs::write(&passwd, "").unwrap();
        std::fs::write(&group, "").unwrap();
        (temp, passwd, group)
    }

    #[test]
    fn resolves_known_ids() {
        let db = IdentityDb::from_names([(0, "root"), (1000, "alice")], [(50, "staff")]);
        assert_eq!(db.user_name(0), Some("root"));
        assert_eq!(db.user_name(1000), Some("alice"));
        assert_eq!(db.group_name(50), Some("staff"));
    }

    #[test]
    fn unknown_ids_fall_back_to_decimal() {
        let db = IdentityDb::from_names([(0, "root")], [(0, "root")]);
        assert_eq!(db.user_name(4242), None);
        assert_eq!(db.owner(4242), "4242");
        assert_eq!(db.group(7), "7");
        assert_eq!(db.owner(0), "root");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn load_resolves_only_ids_in_the_listing() {
        let (_temp, passwd, group) = db_files();
        let mut stray = entry("stray", EntryKind::File);
        stray.uid = UNKNOWN_ID;
        stray.gid = UNKNOWN_ID;

        let db = IdentityDb::load(&passwd, &group, &[stray]).await.unwrap();

        assert_eq!(db.user_name(UNKNOWN_ID), None);
        assert_eq!(db.owner(UNKNOWN_ID), UNKNOWN_ID.to_string());
        assert_eq!(db.group(UNKNOWN_ID), UNKNOWN_ID.to_string());
        // uid 0 was not part of the listing, so nothing was resolved for it.
        assert_eq!(db.user_name(0), None);
    }

    #[tokio::test]
    async fn missing_database_is_an_error() {
        let (_temp, _passwd, group) = db_files();

        let err = IdentityDb::load(Path::new("/nonexistent/passwd"), &group, &[])
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ListError>(),
            Some(ListError::IdentityDatabase { .. })
        ));
        assert!(err.to_string().contains("/nonexistent/passwd"));
    }
}
