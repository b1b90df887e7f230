use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::announcement_actor::AnnouncementError;
use crate::domain::{Announcement, AnnouncementCreate, AnnouncementPatch};

#[derive(Clone)]
pub struct AnnouncementClient {
    inner: ResourceClient<Announcement>,
}

impl_basic_client!(AnnouncementClient, Announcement, AnnouncementError, announcement);

impl AnnouncementClient {
    #[instrument(skip(self))]
    pub async fn post_announcement(&self, params: AnnouncementCreate) -> Result<String, AnnouncementError> {
        debug!("Sending request");
        Ok(self.inner.create(params).await?)
    }

    /// Newest first.
    #[instrument(skip(self))]
    pub async fn list_announcements(&self) -> Result<Vec<Announcement>, AnnouncementError> {
        debug!("Sending request");
        let mut announcements = self.inner.list(|_: &Announcement| true).await?;
        announcements.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(announcements)
    }

    #[instrument(skip(self))]
    pub async fn update_announcement(
        &self,
        id: String,
        patch: AnnouncementPatch,
    ) -> Result<Announcement, AnnouncementError> {
        debug!("Sending request");
        Ok(self.inner.update(id, patch).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete_announcement(&self, id: String) -> Result<(), AnnouncementError> {
        debug!("Sending request");
        self.inner.delete(id).await?;
        Ok(())
    }
}
