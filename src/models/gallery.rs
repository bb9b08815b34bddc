use crate::models::Photo;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Append-only log of every photo selected this session, newest first.
///
/// The gallery never deduplicates — a photo re-selected on a later
/// discover appears again. There is no removal; the gallery lives and
/// dies with the session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionGallery {
    photos: VecDeque<Photo>,
}

impl SessionGallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a selection. The newest photo lands at index 0.
    pub fn append(&mut self, photo: Photo) {
        self.photos.push_front(photo);
    }

    /// All photos, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Photo> {
        self.photos.iter()
    }

    /// Photo at `index`, where 0 is the most recent selection.
    pub fn get(&self, index: usize) -> Option<&Photo> {
        self.photos.get(index)
    }

    /// The most recent selection, if any.
    pub fn newest(&self) -> Option<&Photo> {
        self.photos.front()
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn clear(&mut self) {
        self.photos.clear();
    }
}
