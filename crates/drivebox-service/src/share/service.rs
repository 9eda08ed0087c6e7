//! Share-link issuing and resolution.
//!
//! A link's id doubles as the public token, so resolution is a primary-key
//! lookup. Expiry is absolute, computed once at issue time from the
//! request instant. There is no background sweeper: expired rows are
//! removed lazily when a resolution hits one and in bulk when an owner
//! lists their links.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use drivebox_core::{DriveError, DriveResult};
use drivebox_entity::file::File;
use drivebox_entity::folder::Folder;
use drivebox_entity::share::{
    expires_after, CreateShareLink, ExpiryUnit, ShareLink, ShareTargetKind,
};
use drivebox_entity::store::{FileStore, FolderStore, LinkStore};

use crate::context::RequestContext;

/// Request to issue a share link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueLinkRequest {
    /// What kind of resource is being shared.
    pub target_kind: ShareTargetKind,
    /// The folder or file to share.
    pub target_id: Uuid,
    /// How many `unit`s from now the link stays valid.
    pub duration: i64,
    /// The unit `duration` is expressed in.
    pub unit: ExpiryUnit,
}

/// The resource a resolved link points at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SharedTarget {
    /// A shared folder.
    Folder(Folder),
    /// A shared file.
    File(File),
}

/// Issues and resolves share links.
pub struct ShareLinkIssuer {
    links: Arc<dyn LinkStore>,
    folders: Arc<dyn FolderStore>,
    files: Arc<dyn FileStore>,
}

impl ShareLinkIssuer {
    /// Creates a new issuer over the given stores.
    pub fn new(
        links: Arc<dyn LinkStore>,
        folders: Arc<dyn FolderStore>,
        files: Arc<dyn FileStore>,
    ) -> Self {
        Self {
            links,
            folders,
            files,
        }
    }

    /// Issue a link for a resource the requesting user owns.
    ///
    /// The expiry is anchored to the request time, not the insert time.
    pub async fn issue(
        &self,
        ctx: &RequestContext,
        req: IssueLinkRequest,
    ) -> DriveResult<ShareLink> {
        if req.duration <= 0 {
            return Err(DriveError::validation("expiry duration must be positive"));
        }
        self.require_owned_target(ctx, req.target_kind, req.target_id)
            .await?;

        let link = self
            .links
            .create(&CreateShareLink {
                target_kind: req.target_kind,
                target_id: req.target_id,
                created_by: ctx.user_id,
                expires_at: expires_after(ctx.request_time, req.duration, req.unit),
            })
            .await?;

        info!(
            link_id = %link.id,
            target_kind = %link.target_kind,
            target_id = %link.target_id,
            expires_at = %link.expires_at,
            "Issued share link"
        );
        Ok(link)
    }

    /// Resolve a public token of the declared kind, as of now.
    pub async fn resolve(&self, kind: ShareTargetKind, token: Uuid) -> DriveResult<SharedTarget> {
        self.resolve_at(kind, token, Utc::now()).await
    }

    /// Resolve a public token against an explicit reference instant.
    ///
    /// A token of the other kind fails with `WrongKind` even though the id
    /// matches a stored link. An expired link is deleted on the way out
    /// and reads as `Expired`.
    pub async fn resolve_at(
        &self,
        kind: ShareTargetKind,
        token: Uuid,
        now: DateTime<Utc>,
    ) -> DriveResult<SharedTarget> {
        let link = self
            .links
            .find_by_id(token)
            .await?
            .ok_or_else(|| DriveError::not_found(format!("share link {token}")))?;

        if link.target_kind != kind {
            return Err(DriveError::WrongKind {
                requested: kind.to_string(),
                actual: link.target_kind.to_string(),
            });
        }

        if link.is_expired_at(now) {
            if let Err(error) = self.links.delete(link.id).await {
                warn!(link_id = %link.id, error = %error, "Failed to delete expired link");
            }
            return Err(DriveError::Expired);
        }

        match kind {
            ShareTargetKind::Folder => self
                .folders
                .find_by_id(link.target_id)
                .await?
                .map(SharedTarget::Folder),
            ShareTargetKind::File => self
                .files
                .find_by_id(link.target_id)
                .await?
                .map(SharedTarget::File),
        }
        .ok_or_else(|| DriveError::not_found(format!("shared {kind} {}", link.target_id)))
    }

    /// List the requesting user's live links, sweeping expired rows first.
    pub async fn list_links(&self, ctx: &RequestContext) -> DriveResult<Vec<ShareLink>> {
        let swept = self.links.delete_expired(ctx.request_time).await?;
        if swept > 0 {
            debug!(swept, "Swept expired share links");
        }
        self.links.list_by_creator(ctx.user_id).await
    }

    /// Revoke a link the requesting user issued.
    pub async fn revoke(&self, ctx: &RequestContext, link_id: Uuid) -> DriveResult<()> {
        let link = self
            .links
            .find_by_id(link_id)
            .await?
            .ok_or_else(|| DriveError::not_found(format!("share link {link_id}")))?;
        if link.created_by != ctx.user_id {
            return Err(DriveError::not_found(format!("share link {link_id}")));
        }
        self.links.delete(link.id).await?;
        info!(link_id = %link.id, "Revoked share link");
        Ok(())
    }

    /// Delete every expired link, returning how many were removed.
    pub async fn sweep_expired(&self, now: DateTime<Utc>) -> DriveResult<u64> {
        self.links.delete_expired(now).await
    }

    /// Verify the target exists and is owned by the requesting user. File
    /// ownership goes through the containing folder.
    async fn require_owned_target(
        &self,
        ctx: &RequestContext,
        kind: ShareTargetKind,
        target_id: Uuid,
    ) -> DriveResult<()> {
        let owner_id = match kind {
            ShareTargetKind::Folder => {
                self.folders
                    .find_by_id(target_id)
                    .await?
                    .map(|folder| folder.owner_id)
            }
            ShareTargetKind::File => match self.files.find_by_id(target_id).await? {
                Some(file) => self
                    .folders
                    .find_by_id(file.folder_id)
                    .await?
                    .map(|folder| folder.owner_id),
                None => None,
            },
        };

        match owner_id {
            Some(owner) if owner == ctx.user_id => Ok(()),
            _ => Err(DriveError::not_found(format!("{kind} {target_id}"))),
        }
    }
}
